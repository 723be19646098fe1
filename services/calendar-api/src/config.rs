//! Service configuration from environment variables.

use std::fmt;
use std::path::PathBuf;

use grid_processor::VariableNames;

/// Default local store directory.
pub const DEFAULT_STORE: &str = "./_store";

/// Default district boundaries file.
pub const DEFAULT_DISTRICTS_PATH: &str = "data/districts.geojson";

/// Runtime configuration of the calendar service.
#[derive(Clone)]
pub struct CalendarConfig {
    /// Remote data credentials. Read for completeness; nothing is downloaded.
    pub earthdata_user: String,
    pub earthdata_pass: String,

    /// Directory holding forecast run files (`HIWAT_STORE`).
    pub store_dir: PathBuf,

    /// District GeoJSON (`DISTRICTS_PATH`).
    pub districts_path: PathBuf,

    /// Forecast variable names (`VAR_*`).
    pub variables: VariableNames,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            earthdata_user: String::new(),
            earthdata_pass: String::new(),
            store_dir: PathBuf::from(DEFAULT_STORE),
            districts_path: PathBuf::from(DEFAULT_DISTRICTS_PATH),
            variables: VariableNames::default(),
        }
    }
}

impl CalendarConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            earthdata_user: lookup("EARTHDATA_USER").unwrap_or(defaults.earthdata_user),
            earthdata_pass: lookup("EARTHDATA_PASS").unwrap_or(defaults.earthdata_pass),
            store_dir: lookup("HIWAT_STORE")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_dir),
            districts_path: lookup("DISTRICTS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.districts_path),
            variables: VariableNames::from_lookup(&lookup),
        }
    }
}

impl fmt::Debug for CalendarConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pass = if self.earthdata_pass.is_empty() {
            ""
        } else {
            "<redacted>"
        };
        f.debug_struct("CalendarConfig")
            .field("earthdata_user", &self.earthdata_user)
            .field("earthdata_pass", &pass)
            .field("store_dir", &self.store_dir)
            .field("districts_path", &self.districts_path)
            .field("variables", &self.variables)
            .finish()
    }
}
