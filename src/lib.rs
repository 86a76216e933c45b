//! Matrix-themed live crypto ticker.
//!
//! Streams the Binance BTC/USDT 24h ticker over WebSocket and renders the
//! price, its 24h change, the connection status and a rolling log in a
//! terminal, over a falling-glyph backdrop.

pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod tui;
pub mod websocket;

pub use error::{Result, TickerError};
