//! Mapcolor engine library.
//!
//! Exposes the country/province data model, the assignment engine, the
//! render pass, the map-asset and command parsers, and the interactive
//! session for use by integration tests and the binary entry point.

pub mod assign;
pub mod board;
pub mod config;
pub mod protocol;
pub mod render;
pub mod session;
