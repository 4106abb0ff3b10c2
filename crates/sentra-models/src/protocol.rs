//! Stream protocol constants.
//!
//! The protocol is deliberately minimal: one text message shape in each
//! direction, no handshake, no acknowledgments, no sequence numbers.

/// Outbound alert token, sent once per frame in which motion is judged
/// present. Sent as a bare UTF-8 text message, no envelope.
pub const MOTION_ALERT: &str = "motion_detected";

/// Path of the streaming websocket endpoint.
pub const STREAM_PATH: &str = "/ws/stream";
