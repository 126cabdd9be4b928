//! Application state.

use std::sync::Arc;

use promocast_worker::Composer;

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub composer: Arc<Composer>,
}

impl AppState {
    pub fn new(config: ApiConfig, composer: Arc<Composer>) -> Self {
        Self { config, composer }
    }
}
