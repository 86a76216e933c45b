//! Models for Binance public stream messages.
//!
//! Only the 24h rolling ticker (`<symbol>@ticker`) is consumed.

pub mod ticker;
