//! Data preparation tools for the calendar service.
//!
//! - [`dummy`]: a seeded synthetic HIWAT forecast for local testing
//! - [`peek`]: a plain-text description of a NetCDF dataset
//! - [`clean`]: reduction of GADM level-2 boundaries to a `name` + geometry file

pub mod clean;
pub mod dummy;
pub mod peek;

pub use clean::{clean_districts, clean_districts_file, CleanReport, DEFAULT_NAME_FIELD};
pub use dummy::{dummy_dataset, dummy_run_time, write_dummy, DummyOptions, DUMMY_TITLE};
pub use peek::describe;
