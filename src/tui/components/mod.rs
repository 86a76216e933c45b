//! Reusable TUI widgets.

pub mod log_panel;
pub mod rain;
pub mod status_bar;
pub mod ticker_panel;
