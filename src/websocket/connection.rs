//! WebSocket connection lifecycle management.
//!
//! [`FeedConnection`] owns the single feed socket. It connects, forwards
//! frames to the main loop, and after any disconnect waits a fixed delay
//! before trying again, forever, until told to shut down.

use std::time::Duration;

use futures_util::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tungstenite::Message as WsMessage;

use super::{FeedEvent, WsStream, connect};
use crate::config::FeedConfig;
use crate::tui::Message;

/// Commands sent from the main loop to the feed connection.
#[derive(Debug)]
pub enum FeedCommand {
    /// Close the socket and stop reconnecting.
    Shutdown,
}

/// Why the reader loop exited.
enum DisconnectReason {
    /// The connection was lost, errored or went silent.
    ConnectionLost,
    /// Shutdown was requested or the main loop is gone.
    Shutdown,
}

/// Manages the feed connection lifecycle including fixed-delay
/// reconnection and socket teardown.
pub struct FeedConnection {
    url: String,
    reconnect_delay: Duration,
    connect_timeout: Duration,
    idle_timeout: Duration,
    tx: mpsc::UnboundedSender<Message>,
    cmd_rx: mpsc::UnboundedReceiver<FeedCommand>,
}

impl FeedConnection {
    /// Creates a new feed connection. Nothing connects until [`run`](Self::run).
    #[must_use]
    pub fn new(
        config: FeedConfig,
        tx: mpsc::UnboundedSender<Message>,
        cmd_rx: mpsc::UnboundedReceiver<FeedCommand>,
    ) -> Self {
        Self {
            url: config.websocket_url,
            reconnect_delay: config.reconnect_delay,
            connect_timeout: config.connect_timeout,
            idle_timeout: config.idle_timeout,
            tx,
            cmd_rx,
        }
    }

    /// Forwards an event to the main loop. Returns `false` once the
    /// receiving side has gone away.
    fn emit(&self, event: FeedEvent) -> bool {
        self.tx.send(Message::Feed(event)).is_ok()
    }

    /// Runs the connect / read / reconnect cycle until shutdown.
    ///
    /// Every disconnect, including a failed or stalled connect, is reported as
    /// [`FeedEvent::Closed`] and followed by exactly one wait of the
    /// reconnect delay, after which [`FeedEvent::Connecting`] is sent and a
    /// new connection is opened.
    pub async fn run(mut self) {
        loop {
            info!(url = %self.url, "Connecting to feed");
            let attempt = tokio::select! {
                result = connect(&self.url, self.connect_timeout) => result,
                () = wait_for_shutdown(&mut self.cmd_rx) => {
                    info!("Feed shut down while connecting");
                    return;
                }
            };

            match attempt {
                Ok(mut ws) => {
                    if !self.emit(FeedEvent::Opened) {
                        close_socket(&mut ws).await;
                        return;
                    }
                    match self.read_loop(ws).await {
                        DisconnectReason::ConnectionLost => {}
                        DisconnectReason::Shutdown => {
                            info!("Feed connection shutting down");
                            return;
                        }
                    }
                }
                Err(e) => {
                    warn!("Feed connection failed: {e}");
                    if !self.emit(FeedEvent::Error(e.to_string())) {
                        return;
                    }
                }
            }

            if !self.emit(FeedEvent::Closed) {
                return;
            }

            info!(
                delay_ms = self.reconnect_delay.as_millis() as u64,
                "Connection lost, waiting before reconnect"
            );
            tokio::select! {
                () = tokio::time::sleep(self.reconnect_delay) => {}
                () = wait_for_shutdown(&mut self.cmd_rx) => {
                    info!("Feed shut down while waiting to reconnect");
                    return;
                }
            }

            if !self.emit(FeedEvent::Connecting) {
                return;
            }
        }
    }

    /// Reads frames until the connection drops, stays silent for the idle
    /// timeout, or shutdown is requested.
    async fn read_loop(&mut self, mut ws: WsStream) -> DisconnectReason {
        loop {
            tokio::select! {
                frame = tokio::time::timeout(self.idle_timeout, ws.next()) => {
                    let Ok(frame) = frame else {
                        let reason = format!("no data for {:?}", self.idle_timeout);
                        warn!("Feed went silent: {reason}");
                        let _ = self.emit(FeedEvent::Error(reason));
                        return DisconnectReason::ConnectionLost;
                    };
                    match frame {
                        Some(Ok(WsMessage::Text(text))) => {
                            if !self.emit(FeedEvent::Frame(text.as_str().to_owned())) {
                                close_socket(&mut ws).await;
                                return DisconnectReason::Shutdown;
                            }
                        }
                        Some(Ok(WsMessage::Close(frame))) => {
                            info!(?frame, "Feed sent close frame");
                        }
                        Some(Ok(_)) => {} // Binary/Ping/Pong frames
                        Some(Err(e)) => {
                            warn!("WebSocket error: {e}");
                            let _ = self.emit(FeedEvent::Error(e.to_string()));
                            return DisconnectReason::ConnectionLost;
                        }
                        None => {
                            warn!("WebSocket stream ended");
                            return DisconnectReason::ConnectionLost;
                        }
                    }
                }

                () = wait_for_shutdown(&mut self.cmd_rx) => {
                    close_socket(&mut ws).await;
                    return DisconnectReason::Shutdown;
                }
            }
        }
    }
}

/// Resolves once shutdown is requested or the command channel is dropped.
async fn wait_for_shutdown(cmd_rx: &mut mpsc::UnboundedReceiver<FeedCommand>) {
    match cmd_rx.recv().await {
        Some(FeedCommand::Shutdown) | None => {}
    }
}

/// Sends a close frame. The socket is dropped by the caller afterwards.
async fn close_socket(ws: &mut WsStream) {
    if let Err(e) = ws.close(None).await {
        debug!("Close handshake failed: {e}");
    }
}
