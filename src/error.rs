//! Crate-level error types.
//!
//! [`TickerError`] unifies every error source (configuration, WebSocket,
//! feed decoding, terminal I/O) behind a single enum so callers can match
//! on the variant they care about while still using the `?` operator.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TickerError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum TickerError {
    /// A configuration value was present but invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// A WebSocket operation (connect, receive, close) failed.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// The WebSocket handshake did not finish in time.
    #[error("connect timed out after {0:?}")]
    ConnectTimeout(std::time::Duration),

    /// A feed frame could not be decoded into a ticker snapshot.
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    /// Terminal or log file I/O failed.
    #[error("io error: {0}")]
    Io(String),
}
