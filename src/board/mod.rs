//! Board representation and map-state types.
//!
//! Contains the core data structures for colors, countries, provinces, and
//! the combined map state.

pub mod color;
pub mod country;
pub mod province;
pub mod state;

pub use color::{Color, ColorError, NEUTRAL_HEX};
pub use country::{Country, CountryId, CountryRegistry};
pub use province::{Province, ProvinceRegistry};
pub use state::{InvariantViolation, MapState};
