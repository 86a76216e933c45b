//! Event handling for the TUI.

use std::time::{Duration, Instant};

use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::warn;

use crate::session::ChanceSource;
use crate::websocket::FeedEvent;

use super::app::App;

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for animation and pulse expiry.
    Tick,
}

impl Event {
    /// Keeps the terminal events the ticker reacts to.
    fn from_terminal(raw: CrosstermEvent) -> Option<Self> {
        match raw {
            CrosstermEvent::Key(key) => Some(Event::Key(key)),
            CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
            _ => None,
        }
    }
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),
    /// Lifecycle or data event from the feed connection.
    Feed(FeedEvent),
    /// Request to quit the application.
    Quit,
}

/// Spawns the input task: terminal events from crossterm's async
/// [`EventStream`] interleaved with a tick every `frame_interval`.
///
/// Ticks keep coming if the terminal stream ends. The task stops once the
/// main loop drops its receiver.
pub fn spawn_input_task(tx: mpsc::UnboundedSender<Message>, frame_interval: Duration) {
    tokio::spawn(async move {
        let mut events = EventStream::new();
        let mut input_open = true;
        let mut ticks = tokio::time::interval(frame_interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            let event = tokio::select! {
                _ = ticks.tick() => Event::Tick,
                input = events.next(), if input_open => {
                    match input {
                        Some(Ok(raw)) => match Event::from_terminal(raw) {
                            Some(event) => event,
                            None => continue,
                        },
                        Some(Err(e)) => {
                            warn!("Terminal input failed: {e}");
                            input_open = false;
                            continue;
                        }
                        None => {
                            input_open = false;
                            continue;
                        }
                    }
                }
                () = tx.closed() => break,
            };

            if tx.send(Message::Input(event)).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
pub fn update<C: ChanceSource>(app: &mut App<C>, message: Message) {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::Feed(event) => app.session.handle(event, Instant::now()),
        Message::Quit => app.should_quit = true,
    }
}

/// Handles input events and updates application state.
fn handle_input<C: ChanceSource>(app: &mut App<C>, event: Event) {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(width, height) => app.rain.resize(width, height),
        Event::Tick => {
            app.session.expire_pulses(Instant::now());
            app.rain.step(&mut app.rain_rng);
            app.frame_count += 1;
        }
    }
}

/// Handles key press events.
fn handle_key<C>(app: &mut App<C>, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('f') => app.toggle_fullscreen(),
        _ => {}
    }
}
