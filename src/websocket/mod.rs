//! Async WebSocket client for the Binance public ticker stream.
//!
//! - [`connection`] - Connection lifecycle with fixed-delay reconnection

pub mod connection;

use std::time::Duration;

use tokio::net::TcpStream;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::info;

use crate::{Result, TickerError};

pub use connection::{FeedCommand, FeedConnection};

/// A live feed connection.
pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Lifecycle and data events produced by a [`FeedConnection`], in the
/// order the transport delivered them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedEvent {
    /// A reconnect attempt is starting.
    Connecting,
    /// The WebSocket handshake completed.
    Opened,
    /// A text frame arrived.
    Frame(String),
    /// The transport reported an error.
    Error(String),
    /// The connection closed or could not be established.
    Closed,
}

/// Establishes a WebSocket connection to the given URL, giving up once
/// `limit` has passed without a completed handshake.
///
/// # Errors
///
/// Returns [`TickerError::ConnectTimeout`] when the limit expires, or a
/// [`TickerError::WebSocket`] if the connection or TLS handshake fails.
pub async fn connect(url: &str, limit: Duration) -> Result<WsStream> {
    let (ws_stream, _) = tokio::time::timeout(limit, connect_async(url))
        .await
        .map_err(|_| TickerError::ConnectTimeout(limit))??;
    info!(url, "WebSocket handshake completed");

    Ok(ws_stream)
}
