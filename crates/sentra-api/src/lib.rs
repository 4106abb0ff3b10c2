//! Axum HTTP/WS motion-alert server.
//!
//! This crate provides:
//! - The `/ws/stream` frame-streaming endpoint with per-connection detectors
//! - Liveness probe at `/health`
//! - Prometheus metrics at `/metrics`

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod ws;

pub use config::ApiConfig;
pub use error::FrameError;
pub use routes::create_router;
pub use state::AppState;
