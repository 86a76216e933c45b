//! Main loop wiring the terminal, input task and feed connection.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{info, warn};

use super::event::{spawn_input_task, update};
use super::terminal::{Tui, restore_terminal, set_title, setup_terminal};
use super::{App, render};
use crate::config::AppConfig;
use crate::session::SessionConfig;
use crate::websocket::{FeedCommand, FeedConnection};
use crate::{Result, TickerError};

/// How long to wait for the feed task to close its socket on quit.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Runs the ticker until the user quits.
///
/// The terminal is restored on every exit path, including errors from the
/// loop itself.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, drawn to or restored.
pub async fn run(config: AppConfig) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let outcome = run_loop(&mut terminal, &config).await;
    let restored = restore_terminal(&mut terminal);
    outcome.and(restored)
}

async fn run_loop(terminal: &mut Tui, config: &AppConfig) -> Result<()> {
    let size = terminal
        .size()
        .map_err(|e| TickerError::Io(format!("failed to read terminal size: {e}")))?;
    let mut app = App::new(
        SessionConfig::from(&config.display),
        size.width,
        size.height,
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

    spawn_input_task(tx.clone(), config.display.frame_interval);

    let feed = FeedConnection::new(config.feed.clone(), tx, cmd_rx);
    let feed_handle = tokio::spawn(feed.run());

    let mut applied_title: Option<String> = None;
    let outcome = loop {
        if let Err(e) = terminal.draw(|frame| render(frame, &app)) {
            break Err(TickerError::Io(format!("failed to draw: {e}")));
        }

        if let Some(title) = app.session.title()
            && applied_title.as_deref() != Some(title)
        {
            if let Err(e) = set_title(terminal, title) {
                warn!("Failed to set window title: {e}");
            }
            applied_title = Some(title.to_string());
        }

        let Some(message) = rx.recv().await else {
            break Ok(());
        };
        update(&mut app, message);

        // Apply whatever queued up meanwhile before drawing again
        while let Ok(message) = rx.try_recv() {
            update(&mut app, message);
        }

        if app.should_quit {
            break Ok(());
        }
    };

    let _ = cmd_tx.send(FeedCommand::Shutdown);
    match tokio::time::timeout(SHUTDOWN_GRACE, feed_handle).await {
        Ok(_) => info!("Feed connection closed"),
        Err(_) => warn!("Feed connection did not close within {SHUTDOWN_GRACE:?}"),
    }

    outcome
}
