//! Local storage of forecast run files.
//!
//! Run files are NetCDF files named `<prefix>_<YYYYMMDDHHMM>_hourly_latlon.nc`
//! kept in a single directory. Remote retrieval is out of scope: the store
//! only decides which file already on disk is current.

pub mod error;
pub mod local;
pub mod run_file;

pub use error::{StorageError, StorageResult};
pub use local::{LocalStore, DATA_EXTENSION, FALLBACK_FILE_NAME};
pub use run_file::{parse_run_file_name, run_file_name, RunFile, HIWAT_PREFIX};
