//! API configuration.

use std::time::Duration;

use sentra_vision::{DetectorConfig, SubtractorParams};

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Max inbound frame message size in bytes
    pub max_frame_bytes: usize,
    /// Close a stream after this long without a client message
    pub idle_timeout: Duration,
    /// Minimum contour area (pixels squared) that counts as motion
    pub min_contour_area: f64,
    /// Background model history, in frames
    pub mog_history: u32,
    /// Background model squared-deviation match threshold
    pub mog_var_threshold: f32,
    /// Environment (development/production)
    pub environment: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let params = SubtractorParams::default();
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["*".to_string()],
            max_frame_bytes: 10 * 1024 * 1024, // 10MB
            idle_timeout: Duration::from_secs(60),
            min_contour_area: 500.0,
            mog_history: params.history,
            mog_var_threshold: params.var_threshold,
            environment: "development".to_string(),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(defaults.cors_origins),
            max_frame_bytes: std::env::var("MAX_FRAME_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_frame_bytes),
            idle_timeout: Duration::from_secs(
                std::env::var("IDLE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.idle_timeout.as_secs()),
            ),
            min_contour_area: std::env::var("MIN_CONTOUR_AREA")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.min_contour_area),
            mog_history: std::env::var("MOG_HISTORY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.mog_history),
            mog_var_threshold: std::env::var("MOG_VAR_THRESHOLD")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.mog_var_threshold),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    /// Detector configuration derived from the server config. Each stream
    /// connection builds its own detector from this template.
    pub fn detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            min_contour_area: self.min_contour_area,
            params: SubtractorParams {
                history: self.mog_history,
                var_threshold: self.mog_var_threshold,
                ..SubtractorParams::default()
            },
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}
