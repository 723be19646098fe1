//! Spatial and temporal axis identification.
//!
//! Gridded forecast files name their horizontal axes inconsistently
//! (`lon`/`longitude`/`x`, `lat`/`latitude`/`y`). These helpers decide which
//! coordinate or dimension plays each role so the loader can expose them under
//! the canonical `x`/`y` names.

use crate::error::{NetCdfError, NetCdfResult};

/// Canonical name of the longitude axis after loading.
pub const X_AXIS: &str = "x";

/// Canonical name of the latitude axis after loading.
pub const Y_AXIS: &str = "y";

/// Name of the time axis.
pub const TIME_AXIS: &str = "time";

/// Accepted (lowercase) names for the longitude axis.
pub const LON_CANDIDATES: [&str; 3] = ["lon", "longitude", "x"];

/// Accepted (lowercase) names for the latitude axis.
pub const LAT_CANDIDATES: [&str; 3] = ["lat", "latitude", "y"];

/// Where an axis was found in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxisSource {
    /// A coordinate variable carrying the axis values.
    Coordinate(String),
    /// A bare dimension without a coordinate variable.
    Dimension(String),
}

impl AxisSource {
    /// Name of the coordinate or dimension in the source file.
    pub fn source_name(&self) -> &str {
        match self {
            AxisSource::Coordinate(name) | AxisSource::Dimension(name) => name,
        }
    }
}

/// The resolved horizontal axes of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpatialAxes {
    pub x: AxisSource,
    pub y: AxisSource,
}

/// Identify the longitude and latitude axes.
///
/// Coordinates are searched first. If either axis is missing there, both axes
/// are looked up again among the dimension names.
pub fn resolve_spatial_axes(coords: &[String], dims: &[String]) -> NetCdfResult<SpatialAxes> {
    if let (Some(x), Some(y)) = (
        find_candidate(coords, &LON_CANDIDATES),
        find_candidate(coords, &LAT_CANDIDATES),
    ) {
        return Ok(SpatialAxes {
            x: AxisSource::Coordinate(x.to_string()),
            y: AxisSource::Coordinate(y.to_string()),
        });
    }

    match (
        find_candidate(dims, &LON_CANDIDATES),
        find_candidate(dims, &LAT_CANDIDATES),
    ) {
        (Some(x), Some(y)) => Ok(SpatialAxes {
            x: AxisSource::Dimension(x.to_string()),
            y: AxisSource::Dimension(y.to_string()),
        }),
        _ => Err(NetCdfError::InvalidFormat(
            "Could not find lon/lat coords in dataset".to_string(),
        )),
    }
}

/// Find the time dimension, if any.
pub fn find_time_dimension(dims: &[String]) -> Option<&str> {
    dims.iter()
        .find(|d| d.eq_ignore_ascii_case(TIME_AXIS))
        .map(String::as_str)
}

fn find_candidate<'a>(names: &'a [String], candidates: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .find(|n| candidates.contains(&n.to_lowercase().as_str()))
        .map(String::as_str)
}
