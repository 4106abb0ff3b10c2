//! Application state.

use sentra_vision::DetectorConfig;

use crate::config::ApiConfig;

/// Shared application state.
///
/// Deliberately carries no detector instance: background statistics must stay
/// per-stream, so the state holds only the template config from which each
/// connection builds its own detector.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub detector_config: DetectorConfig,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: ApiConfig) -> Self {
        let detector_config = config.detector_config();
        Self {
            config,
            detector_config,
        }
    }
}
