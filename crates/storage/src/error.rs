//! Error types for the local store.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    /// Neither a run file nor the fallback file is present.
    #[error("No NetCDF found in {}. Create one with `dataprep make-dummy`.", .store.display())]
    NoDataAvailable { store: PathBuf },

    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;
