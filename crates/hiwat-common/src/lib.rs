//! Common types shared across the hiwat-calendar crates.

pub mod bbox;
pub mod crs;

pub use bbox::BoundingBox;
pub use crs::{CrsCode, CrsParseError};
