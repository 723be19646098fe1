//! Latest-file resolution in a local directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};
use crate::run_file::RunFile;

/// File created by the dummy generator, used when no run file is listed.
pub const FALLBACK_FILE_NAME: &str = "hkhEnsemble_202510030000_hourly_latlon.nc";

/// Extension of data files in the store.
pub const DATA_EXTENSION: &str = "nc";

/// A directory holding forecast run files.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Open the store, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        debug!(root = %root.display(), "Opened local store");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All `*.nc` files, sorted by name.
    pub fn data_files(&self) -> StorageResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            let is_data = path.extension().and_then(|e| e.to_str()) == Some(DATA_EXTENSION);
            if is_data && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Data files whose names follow the run naming scheme, sorted by name.
    pub fn list_runs(&self) -> StorageResult<Vec<RunFile>> {
        Ok(self
            .data_files()?
            .iter()
            .filter_map(|path| RunFile::from_path(path))
            .collect())
    }

    /// Pick the file to serve.
    ///
    /// The lexicographically greatest `*.nc` file wins; otherwise the fallback
    /// file is used if present. Nothing is downloaded.
    pub fn ensure_latest(&self) -> StorageResult<PathBuf> {
        if let Some(latest) = self.data_files()?.pop() {
            match RunFile::from_path(&latest) {
                Some(run) => info!(
                    path = %latest.display(),
                    run_time = %run.run_time,
                    "Using latest run file"
                ),
                None => info!(path = %latest.display(), "Using latest data file"),
            }
            return Ok(latest);
        }

        let fallback = self.root.join(FALLBACK_FILE_NAME);
        if fallback.exists() {
            info!(path = %fallback.display(), "Using fallback data file");
            return Ok(fallback);
        }

        Err(StorageError::NoDataAvailable {
            store: self.root.clone(),
        })
    }
}
