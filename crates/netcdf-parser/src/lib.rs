//! NetCDF reader for gridded ensemble forecast files.
//!
//! This crate opens hourly lat/lon forecast files (for example the HIWAT
//! `hkhEnsemble_<YYYYMMDDHHMM>_hourly_latlon.nc` products), canonicalizes their
//! horizontal axes to `x`/`y`, and tags every data variable with a geographic
//! CRS so the arrays can be clipped to district polygons.
//!
//! # Implementation Notes
//!
//! Reading goes through the `netcdf` crate (libnetcdf/HDF5). Values are
//! widened to `f64`, CF packing attributes are applied, and fill values become
//! NaN.
//!
//! ```ignore
//! let dataset = netcdf_parser::open_dataset("_store/hkhEnsemble_202510030000_hourly_latlon.nc")?;
//! let rain = dataset.variable("Total_precipitation_surface_43_Hour_Accumulation");
//! ```

pub mod axes;
pub mod dataset;
pub mod error;
pub mod native;
pub mod time;
pub mod writer;

pub use axes::{AxisSource, SpatialAxes, TIME_AXIS, X_AXIS, Y_AXIS};
pub use dataset::{GridVariable, GriddedDataset};
pub use error::{NetCdfError, NetCdfResult};
pub use native::{open_dataset, silence_hdf5_errors};
pub use time::TimeAxis;
pub use writer::{write_dataset, WriteOptions};
