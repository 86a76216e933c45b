//! Application configuration loaded from environment variables.
//!
//! Every setting is optional and falls back to the values the ticker ships
//! with:
//! - `MATRIX_WEBSOCKET_URL`: feed endpoint (Binance BTC/USDT ticker stream)
//! - `MATRIX_RECONNECT_DELAY_MS`: fixed delay before reconnecting (3000)
//! - `MATRIX_CONNECT_TIMEOUT_MS`: limit on the connect and handshake (10000)
//! - `MATRIX_IDLE_TIMEOUT_MS`: silence after which the feed counts as lost (30000)
//! - `MATRIX_PULSE_MS`: how long a price pulse stays lit (500)
//! - `MATRIX_LOG_CAPACITY`: rolling log size (6)
//! - `MATRIX_TRACE_PROBABILITY`: chance of a trace line per tick (0.02)
//! - `MATRIX_FRAME_INTERVAL_MS`: redraw cadence (33)
//! - `MATRIX_LOG_FILE`: tracing output file (`matrix-ticker.log`)
//! - `MATRIX_LOG_LEVEL`: tracing level (`info`)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::TickerError;

/// Default public WebSocket endpoint.
pub const DEFAULT_WEBSOCKET_URL: &str = "wss://stream.binance.com:9443/ws/btcusdt@ticker";

const DEFAULT_RECONNECT_DELAY_MS: u64 = 3000;
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;
/// Binance pushes a tick every second, so this much silence means a dead link.
const DEFAULT_IDLE_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_PULSE_MS: u64 = 500;
const DEFAULT_LOG_CAPACITY: usize = 6;
const DEFAULT_TRACE_PROBABILITY: f64 = 0.02;
const DEFAULT_FRAME_INTERVAL_MS: u64 = 33;
const DEFAULT_LOG_FILE: &str = "matrix-ticker.log";

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub feed: FeedConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Feed connection settings.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub websocket_url: String,
    pub reconnect_delay: Duration,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
}

/// Settings that shape what the session derives and how often it is drawn.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    pub log_capacity: usize,
    pub pulse_duration: Duration,
    pub trace_probability: f64,
    pub frame_interval: Duration,
}

/// Tracing output settings.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub file: PathBuf,
    pub level: tracing::Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feed: FeedConfig {
                websocket_url: DEFAULT_WEBSOCKET_URL.to_string(),
                reconnect_delay: Duration::from_millis(DEFAULT_RECONNECT_DELAY_MS),
                connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
                idle_timeout: Duration::from_millis(DEFAULT_IDLE_TIMEOUT_MS),
            },
            display: DisplayConfig {
                log_capacity: DEFAULT_LOG_CAPACITY,
                pulse_duration: Duration::from_millis(DEFAULT_PULSE_MS),
                trace_probability: DEFAULT_TRACE_PROBABILITY,
                frame_interval: Duration::from_millis(DEFAULT_FRAME_INTERVAL_MS),
            },
            logging: LoggingConfig {
                file: PathBuf::from(DEFAULT_LOG_FILE),
                level: tracing::Level::INFO,
            },
        }
    }
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`TickerError::Config`] if a variable is set to a value that
/// cannot be parsed or is out of range.
pub fn fetch_config() -> crate::Result<AppConfig> {
    config_from(non_empty_var)
}

/// Builds the configuration from an arbitrary variable lookup.
///
/// `lookup` returns `None` for unset variables; empty strings should be
/// mapped to `None` by the caller.
///
/// # Errors
///
/// Returns [`TickerError::Config`] for unparseable or out-of-range values.
pub fn config_from<F>(lookup: F) -> crate::Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = AppConfig::default();

    if let Some(url) = lookup("MATRIX_WEBSOCKET_URL") {
        config.feed.websocket_url = url;
    }
    if let Some(ms) = parse_var::<u64>(&lookup, "MATRIX_RECONNECT_DELAY_MS")? {
        config.feed.reconnect_delay = positive_millis("MATRIX_RECONNECT_DELAY_MS", ms)?;
    }
    if let Some(ms) = parse_var::<u64>(&lookup, "MATRIX_CONNECT_TIMEOUT_MS")? {
        config.feed.connect_timeout = positive_millis("MATRIX_CONNECT_TIMEOUT_MS", ms)?;
    }
    if let Some(ms) = parse_var::<u64>(&lookup, "MATRIX_IDLE_TIMEOUT_MS")? {
        config.feed.idle_timeout = positive_millis("MATRIX_IDLE_TIMEOUT_MS", ms)?;
    }
    if let Some(ms) = parse_var::<u64>(&lookup, "MATRIX_PULSE_MS")? {
        config.display.pulse_duration = positive_millis("MATRIX_PULSE_MS", ms)?;
    }
    if let Some(capacity) = parse_var::<usize>(&lookup, "MATRIX_LOG_CAPACITY")? {
        if capacity == 0 {
            return Err(TickerError::Config(
                "MATRIX_LOG_CAPACITY must be at least 1".to_string(),
            ));
        }
        config.display.log_capacity = capacity;
    }
    if let Some(p) = parse_var::<f64>(&lookup, "MATRIX_TRACE_PROBABILITY")? {
        if !(0.0..=1.0).contains(&p) {
            return Err(TickerError::Config(format!(
                "MATRIX_TRACE_PROBABILITY must be between 0 and 1, got {p}"
            )));
        }
        config.display.trace_probability = p;
    }
    if let Some(ms) = parse_var::<u64>(&lookup, "MATRIX_FRAME_INTERVAL_MS")? {
        config.display.frame_interval = positive_millis("MATRIX_FRAME_INTERVAL_MS", ms)?;
    }
    if let Some(path) = lookup("MATRIX_LOG_FILE") {
        config.logging.file = PathBuf::from(path);
    }
    if let Some(level) = parse_var::<tracing::Level>(&lookup, "MATRIX_LOG_LEVEL")? {
        config.logging.level = level;
    }

    Ok(config)
}

/// Parses a variable with [`FromStr`], reporting the variable name on failure.
fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> crate::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(name)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| TickerError::Config(format!("{name}={raw:?} is invalid: {e}")))
        })
        .transpose()
}

fn positive_millis(name: &str, ms: u64) -> crate::Result<Duration> {
    if ms == 0 {
        return Err(TickerError::Config(format!("{name} must be greater than 0")));
    }
    Ok(Duration::from_millis(ms))
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
