//! Application state for the scheduling API.

use std::sync::Arc;

use crate::config::ConfigLoader;

/// Shared application state.
///
/// Requests are computed from their own payloads; only the loaded
/// configuration is shared.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ConfigLoader::with_defaults())
    }
}
