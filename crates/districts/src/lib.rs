//! District polygons for spatial aggregation.
//!
//! A [`DistrictRegistry`] is loaded once from a GeoJSON file of administrative
//! boundaries, reprojected to EPSG:4326, and then queried by name. Names are
//! trimmed on load and matched case-insensitively.

pub mod error;
pub mod registry;

pub use error::{DistrictError, DistrictResult};
pub use registry::{DistrictPolygon, DistrictRegistry, NAME_FIELD_CANDIDATES};
