//! Shared test utilities: a local WebSocket feed server and event helpers.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use matrix_ticker::config::FeedConfig;
use matrix_ticker::tui::Message;
use matrix_ticker::websocket::FeedEvent;

/// A ticker frame in Binance's shape.
pub const TICK: &str = r#"{"e":"24hrTicker","s":"BTCUSDT","c":"50000.00","P":"2.50","v":"10","q":"500000"}"#;

/// Delay between a disconnect and the next attempt in feed tests.
pub const RECONNECT_DELAY: Duration = Duration::from_millis(200);

/// Feed settings pointing at a local server, with short timings.
pub fn feed_config(addr: SocketAddr) -> FeedConfig {
    FeedConfig {
        websocket_url: format!("ws://{addr}"),
        reconnect_delay: RECONNECT_DELAY,
        connect_timeout: Duration::from_secs(2),
        idle_timeout: Duration::from_secs(2),
    }
}

/// Waits for the next message from the feed, including errors.
pub async fn next_raw_feed_event(rx: &mut mpsc::UnboundedReceiver<Message>) -> FeedEvent {
    let message = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for feed event")
        .expect("feed channel closed");
    match message {
        Message::Feed(event) => event,
        other => panic!("unexpected message: {other:?}"),
    }
}

/// Binds a listener on an ephemeral localhost port.
pub async fn local_listener() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no address");
    (listener, addr)
}

/// Waits for the next feed event, skipping transport errors.
pub async fn next_feed_event(rx: &mut mpsc::UnboundedReceiver<Message>) -> FeedEvent {
    loop {
        match next_raw_feed_event(rx).await {
            FeedEvent::Error(_) => continue,
            event => return event,
        }
    }
}
