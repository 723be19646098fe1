//! District aggregation of gridded forecast variables.
//!
//! Turns an opened forecast dataset into a per-district day-1 calendar entry:
//! scalar aggregates over the first 24 hours plus an hourly series.
//!
//! # Architecture
//!
//! ```text
//! summarize(dataset, registry, "Dhaka")
//!      │
//!      ├─► DistrictRegistry::find (case-insensitive)
//!      │
//!      ├─► DistrictMask::new (cell centres inside the polygon, computed once)
//!      │
//!      ├─► Day-1 scalars: reduce_window (sum / max / mean) ─► clip_mean
//!      │
//!      └─► Hourly series: slice(t) ─► clip_mean
//!               │
//!               ▼
//!          DistrictSummary (serialized by the API)
//! ```
//!
//! A clip that cannot be performed (polygon off the grid, empty geometry, CRS
//! mismatch) falls back to the whole-grid mean, logs a warning and marks the
//! summary as degraded.
//!
//! # Example
//!
//! ```ignore
//! use grid_processor::{summarize, VariableNames};
//!
//! let dataset = netcdf_parser::open_dataset(path)?;
//! let summary = summarize(&dataset, &registry, "dhaka", &VariableNames::from_env())?;
//! println!("{}", serde_json::to_string_pretty(&summary)?);
//! ```

pub mod clip;
pub mod config;
pub mod error;
pub mod reduce;
pub mod summary;

pub use clip::{clip_mean, ClipFailure, ClipMean, DistrictMask};
pub use config::VariableNames;
pub use error::{GridProcessorError, Result};
pub use reduce::{nanmean, reduce_window, TimeReduction};
pub use summary::{
    round2, summarize, summarize_district, to_percent, DistrictSummary, HourlyRecord,
    DAY1_WINDOW, KELVIN_OFFSET,
};
