use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{Result, TickerError};

/// 24h rolling ticker update from the `<symbol>@ticker` stream.
///
/// Binance sends every numeric field as a decimal string. Fields the ticker
/// does not display (open, high, low, trade ids, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TickerSnapshot {
    #[serde(rename = "s", default)]
    pub symbol: Option<String>,
    #[serde(rename = "c", with = "rust_decimal::serde::str")]
    pub last_price: Decimal,
    #[serde(rename = "P", with = "rust_decimal::serde::str")]
    pub price_change_percent: Decimal,
    #[serde(rename = "v")]
    pub base_volume: String,
    #[serde(rename = "q")]
    pub quote_volume: String,
}

impl TickerSnapshot {
    /// Decodes a single text frame from the feed.
    ///
    /// # Errors
    ///
    /// Returns [`TickerError::MalformedMessage`] if the frame is not JSON,
    /// lacks one of the consumed fields, or carries a non-decimal price.
    pub fn decode(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| TickerError::MalformedMessage(e.to_string()))
    }
}
