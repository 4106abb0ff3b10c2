//! Shared wire-protocol types for the sentra stream endpoint.
//!
//! This crate provides:
//! - Inbound frame payload parsing (data-URL text messages)
//! - The outbound alert token
//! - A classified error taxonomy for malformed payloads

pub mod frame;
pub mod protocol;

// Re-export common types
pub use frame::{FramePayload, ProtocolError};
pub use protocol::MOTION_ALERT;
