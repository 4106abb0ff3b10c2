//! End-to-end stream tests over a real websocket.

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message;

use sentra_api::{create_router, ApiConfig, AppState};

use super::{bright_frame, data_url, flat_frame};

async fn spawn_server() -> SocketAddr {
    let config = ApiConfig {
        idle_timeout: Duration::from_secs(5),
        ..ApiConfig::default()
    };
    let app = create_router(AppState::new(config), None);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn connect(
    addr: SocketAddr,
) -> tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>> {
    let (stream, _) = tokio_tungstenite::connect_async(format!("ws://{}/ws/stream", addr))
        .await
        .expect("websocket handshake");
    stream
}

/// Three identical frames produce no alerts; a fourth frame with an
/// injected bright rectangle produces exactly one alert before the next
/// frame.
#[tokio::test]
async fn static_then_bright_frame_alerts_once() {
    let addr = spawn_server().await;
    let mut ws = connect(addr).await;

    let static_msg = data_url(&flat_frame(40));
    for _ in 0..3 {
        ws.send(Message::Text(static_msg.clone())).await.unwrap();
    }
    ws.send(Message::Text(data_url(&bright_frame(40))))
        .await
        .unwrap();

    // Frames are processed in order, so the first inbound message must be
    // the alert for the fourth frame.
    let msg = tokio::time::timeout(Duration::from_secs(10), ws.next())
        .await
        .expect("alert within deadline")
        .expect("stream open")
        .unwrap();
    assert_eq!(msg, Message::Text("motion_detected".to_string()));

    // Back to the static scene: no further alert.
    ws.send(Message::Text(static_msg)).await.unwrap();
    let quiet = tokio::time::timeout(Duration::from_millis(500), ws.next()).await;
    assert!(quiet.is_err(), "unexpected message: {:?}", quiet);

    ws.close(None).await.unwrap();
}

/// Malformed payloads are dropped without killing the session.
#[tokio::test]
async fn bad_frames_do_not_close_the_stream() {
    let addr = spawn_server().await;
    let mut ws = connect(addr).await;

    let static_msg = data_url(&flat_frame(40));

    // Establish a background, then send every malformed shape in turn.
    for _ in 0..3 {
        ws.send(Message::Text(static_msg.clone())).await.unwrap();
    }
    ws.send(Message::Text("no separator at all".into()))
        .await
        .unwrap();
    ws.send(Message::Text("data:image/png;base64,???".into()))
        .await
        .unwrap();
    ws.send(Message::Text("data:image/png;base64,aGVsbG8=".into()))
        .await
        .unwrap();

    // The connection survived: a motion frame still produces an alert.
    ws.send(Message::Text(data_url(&bright_frame(40))))
        .await
        .unwrap();
    let msg = tokio::time::timeout(Duration::from_secs(10), ws.next())
        .await
        .expect("alert within deadline")
        .expect("stream open")
        .unwrap();
    assert_eq!(msg, Message::Text("motion_detected".to_string()));

    ws.close(None).await.unwrap();
}

/// An abrupt client close ends the server loop without incident, and a new
/// connection starts from a fresh background model.
#[tokio::test]
async fn reconnect_gets_a_fresh_detector() {
    let addr = spawn_server().await;

    let mut first = connect(addr).await;
    let bright = data_url(&bright_frame(40));
    for _ in 0..3 {
        first.send(Message::Text(bright.clone())).await.unwrap();
    }
    // Abrupt drop, no close frame.
    drop(first);

    // The bright scene is the second connection's background from frame one,
    // so it never alerts.
    let mut second = connect(addr).await;
    for _ in 0..3 {
        second.send(Message::Text(bright.clone())).await.unwrap();
    }
    let quiet = tokio::time::timeout(Duration::from_millis(500), second.next()).await;
    assert!(quiet.is_err(), "unexpected message: {:?}", quiet);

    second.close(None).await.unwrap();
}

/// Pings are answered; the protocol stays text-only otherwise.
#[tokio::test]
async fn ping_is_answered() {
    let addr = spawn_server().await;
    let mut ws = connect(addr).await;

    ws.send(Message::Ping(b"hello".to_vec())).await.unwrap();
    let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("pong within deadline")
        .expect("stream open")
        .unwrap();
    assert_eq!(msg, Message::Pong(b"hello".to_vec()));

    ws.close(None).await.unwrap();
}
