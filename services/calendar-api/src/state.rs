//! Application state for the calendar API.

use std::sync::Arc;

use anyhow::{Context, Result};
use districts::DistrictRegistry;
use storage::LocalStore;
use tokio::sync::OnceCell;
use tracing::info;

use crate::config::CalendarConfig;
use crate::error::CalendarError;

/// Shared application state.
pub struct AppState {
    pub config: CalendarConfig,

    /// Local directory of forecast files.
    pub store: LocalStore,

    /// District boundaries, loaded on first use and kept for the process.
    districts: OnceCell<Arc<DistrictRegistry>>,
}

impl AppState {
    /// Create state from configuration, creating the store directory.
    pub fn new(config: CalendarConfig) -> Result<Self> {
        let store = LocalStore::open(&config.store_dir).with_context(|| {
            format!("Failed to open store {}", config.store_dir.display())
        })?;
        info!(config = ?config, "Initialized calendar state");
        Ok(Self {
            config,
            store,
            districts: OnceCell::new(),
        })
    }

    /// Create state with an already loaded registry.
    pub fn with_registry(config: CalendarConfig, registry: DistrictRegistry) -> Result<Self> {
        let mut state = Self::new(config)?;
        state.districts = OnceCell::new_with(Some(Arc::new(registry)));
        Ok(state)
    }

    /// The district registry, loading it on the first call.
    ///
    /// A failed load is not cached; the next call tries again.
    pub async fn districts(&self) -> Result<Arc<DistrictRegistry>, CalendarError> {
        let registry = self
            .districts
            .get_or_try_init(|| async {
                let path = self.config.districts_path.clone();
                let registry = tokio::task::spawn_blocking(move || DistrictRegistry::load(path))
                    .await
                    .map_err(|e| CalendarError::Task(e.to_string()))??;
                Ok::<_, CalendarError>(Arc::new(registry))
            })
            .await?;
        Ok(Arc::clone(registry))
    }
}
