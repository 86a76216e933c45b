//! Application state for the TUI.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::session::{SessionConfig, StreamSession};
use crate::tui::components::rain::MatrixRain;

/// Ticks per half-period of the header cursor blink.
const CURSOR_BLINK_TICKS: u64 = 15;

/// Central application state container.
pub struct App<C> {
    /// Derived feed state.
    pub session: StreamSession<C>,
    /// Falling-glyph backdrop.
    pub rain: MatrixRain,
    /// Randomness for the backdrop only.
    pub rain_rng: StdRng,
    /// Hides the panel chrome and shows only the price over the rain.
    pub fullscreen: bool,
    /// Frames drawn since start.
    pub frame_count: u64,
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App<StdRng> {
    /// Creates an app with an OS-seeded session and backdrop.
    pub fn new(config: SessionConfig, width: u16, height: u16) -> Self {
        Self::with_session(StreamSession::new(config, StdRng::from_os_rng()), width, height)
    }
}

impl<C> App<C> {
    /// Creates an app around an existing session.
    pub fn with_session(session: StreamSession<C>, width: u16, height: u16) -> Self {
        Self {
            session,
            rain: MatrixRain::new(width, height),
            rain_rng: StdRng::from_os_rng(),
            fullscreen: false,
            frame_count: 0,
            should_quit: false,
        }
    }

    /// Toggles the chrome-less layout.
    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    /// Whether the header cursor is drawn on this frame.
    pub fn cursor_visible(&self) -> bool {
        (self.frame_count / CURSOR_BLINK_TICKS) % 2 == 0
    }
}
