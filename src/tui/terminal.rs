//! Terminal setup and teardown.
//!
//! Setup and restore each write one command sequence so the two stay
//! mirrored: raw mode, the alternate screen, cursor visibility and the
//! window title are all taken over on entry and handed back on exit.

use std::fmt;
use std::io::{self, IsTerminal, Stdout, Write};

use crossterm::{
    Command,
    cursor::{Hide, Show},
    execute, queue,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{Result, TickerError};

/// Type alias for our terminal backend.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Pushes the current window title onto the terminal's title stack
/// (xterm `CSI 22;0 t`).
#[derive(Debug, Clone, Copy)]
struct PushTitle;

/// Pops the title saved by [`PushTitle`] (xterm `CSI 23;0 t`).
#[derive(Debug, Clone, Copy)]
struct PopTitle;

impl Command for PushTitle {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        f.write_str("\x1b[22;0t")
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        Ok(())
    }
}

impl Command for PopTitle {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        f.write_str("\x1b[23;0t")
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes the entry sequence: save title, alternate screen, hidden cursor.
fn write_enter(out: &mut impl Write) -> io::Result<()> {
    queue!(out, PushTitle, EnterAlternateScreen, Hide)?;
    out.flush()
}

/// Writes the exit sequence. The title is blanked before the pop so
/// terminals without a title stack still drop the ticker's title.
fn write_leave(out: &mut impl Write) -> io::Result<()> {
    queue!(out, SetTitle(""), PopTitle, LeaveAlternateScreen, Show)?;
    out.flush()
}

/// Takes over the terminal for rendering.
///
/// # Errors
///
/// Returns an error if stdout is not a TTY or the terminal cannot be
/// switched into raw mode and the alternate screen.
pub fn setup_terminal() -> Result<Tui> {
    let mut stdout = io::stdout();
    if !stdout.is_terminal() {
        return Err(TickerError::Io(
            "the ticker requires an interactive terminal (TTY)".to_string(),
        ));
    }

    enable_raw_mode().map_err(|e| TickerError::Io(format!("failed to enable raw mode: {e}")))?;
    if let Err(e) = write_enter(&mut stdout) {
        let _ = disable_raw_mode();
        return Err(TickerError::Io(format!("failed to enter alternate screen: {e}")));
    }

    Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| {
        let _ = write_leave(&mut io::stdout());
        let _ = disable_raw_mode();
        TickerError::Io(format!("failed to create terminal: {e}"))
    })
}

/// Hands the terminal back: main screen, visible cursor, original title.
///
/// # Errors
///
/// Returns an error if raw mode cannot be left or the exit sequence
/// cannot be written.
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    let raw = disable_raw_mode();
    write_leave(terminal.backend_mut())
        .and(raw)
        .map_err(|e| TickerError::Io(format!("failed to restore terminal: {e}")))
}

/// Sets the terminal window title.
///
/// # Errors
///
/// Returns an error if the escape sequence cannot be written.
pub fn set_title(terminal: &mut Tui, title: &str) -> Result<()> {
    execute!(terminal.backend_mut(), SetTitle(title))
        .map_err(|e| TickerError::Io(format!("failed to set title: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(write: fn(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        write(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn entry_saves_title_before_switching_screens() {
        let out = written(|w| write_enter(w));
        let push = out.find("\x1b[22;0t").expect("title not saved");
        let screen = out.find("\x1b[?1049h").expect("no alternate screen");
        assert!(push < screen);
        assert!(out.contains("\x1b[?25l"));
    }

    #[test]
    fn exit_clears_then_restores_title() {
        let out = written(|w| write_leave(w));
        let clear = out.find("\x1b]0;\x07").expect("title not cleared");
        let pop = out.find("\x1b[23;0t").expect("title not restored");
        assert!(clear < pop);
        assert!(out.contains("\x1b[?1049l"));
        assert!(out.contains("\x1b[?25h"));
    }
}
