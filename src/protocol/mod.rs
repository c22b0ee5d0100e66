//! Text protocols.
//!
//! This module implements parsing for the two text formats the engine
//! consumes: the SVG map asset, which supplies the region identifiers, and
//! the line-oriented command protocol read by the main loop.

pub mod parser;
pub mod svg;

pub use parser::{parse_command, Command};
pub use svg::{extract_regions, region_id, MapError, Region, RegionScan, SkipReason, SkippedRegion};
