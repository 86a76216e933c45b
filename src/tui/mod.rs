//! Terminal User Interface for the ticker.
//!
//! Provides a Ratatui-based TUI that draws the live price panel and rolling
//! log over a falling-glyph backdrop.

pub mod app;
pub mod components;
pub mod event;
pub mod run;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use event::{Event, Message};
pub use run::run;
pub use terminal::{Tui, restore_terminal, set_title, setup_terminal};
pub use ui::render;
