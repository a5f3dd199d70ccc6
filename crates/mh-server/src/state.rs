//! Application state shared across all handlers.

use crate::history::RolloutHistory;
use mh_core::{CatalogStore, Result, WorkbenchConfig};
use std::sync::Arc;

/// Shared application state: the catalog store and the rollout history.
/// Both are interior-locked, so handlers clone the state freely.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CatalogStore>,
    pub history: Arc<RolloutHistory>,
}

impl AppState {
    pub fn from_config(config: &WorkbenchConfig) -> Result<Self> {
        Ok(Self {
            store: Arc::new(CatalogStore::open(config.data.user_models_path.clone())?),
            history: Arc::new(RolloutHistory::open(config.data.history_path.clone())?),
        })
    }
}
