//! WebSocket stream handler.
//!
//! One inbound text message per frame (`<prefix>,<base64 image>`), one
//! optional outbound `motion_detected` text message per frame. Frames are
//! handled strictly in arrival order; the alert send completes before the
//! next receive.

use std::sync::atomic::{AtomicI64, Ordering};

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use sentra_models::frame::decode_data_url;
use sentra_models::MOTION_ALERT;
use sentra_vision::{decode_frame, Detection, MotionDetector};

use crate::error::FrameError;
use crate::metrics;
use crate::state::AppState;

/// Global counter for active stream connections.
static ACTIVE_WS_CONNECTIONS: AtomicI64 = AtomicI64::new(0);

/// WebSocket stream endpoint.
pub async fn ws_stream(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    // Track connection
    let count = ACTIVE_WS_CONNECTIONS.fetch_add(1, Ordering::SeqCst) + 1;
    metrics::set_ws_active_connections(count);
    metrics::record_ws_connection();

    ws.on_upgrade(|socket| async move {
        handle_stream_socket(socket, state).await;
        // Decrement on disconnect
        let count = ACTIVE_WS_CONNECTIONS.fetch_sub(1, Ordering::SeqCst) - 1;
        metrics::set_ws_active_connections(count);
    })
}

/// Handle one stream connection.
///
/// The detector is created here and dropped on close: background statistics
/// belong to this stream alone and never leak across connections.
async fn handle_stream_socket(mut socket: WebSocket, state: AppState) {
    let mut detector = MotionDetector::new(state.detector_config);
    let idle_timeout = state.config.idle_timeout;
    let max_frame_bytes = state.config.max_frame_bytes;

    info!("stream connection established");

    let mut frames: u64 = 0;
    let mut alerts: u64 = 0;
    let mut dropped: u64 = 0;

    loop {
        // A silently-vanished peer surfaces as a timeout here instead of
        // suspending the task forever.
        let message = match timeout(idle_timeout, socket.recv()).await {
            Ok(Some(Ok(msg))) => msg,
            Ok(Some(Err(e))) => {
                info!(error = %e, "stream transport error, closing");
                break;
            }
            Ok(None) => {
                info!("client disconnected");
                break;
            }
            Err(_) => {
                info!(timeout_secs = idle_timeout.as_secs(), "stream idle, closing");
                break;
            }
        };

        match message {
            Message::Text(text) => {
                frames += 1;
                metrics::record_frame_received();
                match process_frame(&mut detector, &text, max_frame_bytes) {
                    Ok(Some(detection)) => {
                        debug!(
                            area = detection.largest_area,
                            regions = detection.regions,
                            frame = detection.frames_seen,
                            "motion detected"
                        );
                        metrics::record_motion_event();
                        if socket
                            .send(Message::Text(MOTION_ALERT.to_string()))
                            .await
                            .is_err()
                        {
                            warn!("alert send failed, client disconnected");
                            break;
                        }
                        alerts += 1;
                        metrics::record_alert_sent();
                    }
                    Ok(None) => {}
                    Err(err) => {
                        // A bad frame is dropped; the session survives.
                        dropped += 1;
                        metrics::record_frame_error(err.kind());
                        warn!(error = %err, "dropping bad frame");
                    }
                }
            }
            Message::Close(_) => {
                info!("client closed stream");
                break;
            }
            Message::Ping(payload) => {
                if socket.send(Message::Pong(payload)).await.is_err() {
                    break;
                }
            }
            Message::Pong(_) => {}
            Message::Binary(_) => {
                debug!("ignoring binary message on text-only stream");
            }
        }
    }

    // Dropping the socket runs an idempotent close handshake, so there is no
    // "is it still open" check to race against.
    info!(frames, alerts, dropped, "stream connection closed");
}

/// Decode and judge one frame. `Ok(Some(_))` means motion was detected and
/// an alert should be sent; `Ok(None)` means a clean frame without motion.
fn process_frame(
    detector: &mut MotionDetector,
    text: &str,
    max_frame_bytes: usize,
) -> Result<Option<Detection>, FrameError> {
    if text.len() > max_frame_bytes {
        return Err(FrameError::Oversized {
            size: text.len(),
            limit: max_frame_bytes,
        });
    }
    let bytes = decode_data_url(text)?;
    let gray = decode_frame(&bytes)?;
    let detection = detector.detect(&gray);
    Ok(detection.motion.then_some(detection))
}
