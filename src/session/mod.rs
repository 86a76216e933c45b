//! Stream session state.
//!
//! [`StreamSession`] turns the feed connection's lifecycle events into the
//! values the ticker displays: connection status, the current snapshot,
//! formatted price and change, a timed price-direction pulse, the window
//! title and a rolling log. It performs no I/O and reads no clock; callers
//! pass `now` in, which keeps every transition deterministic under test.

pub mod chance;
pub mod format;
pub mod log;

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::config::DisplayConfig;
use crate::models::ticker::TickerSnapshot;
use crate::websocket::FeedEvent;

pub use chance::{ChanceSource, FixedChance};
pub use log::{LogEntry, RollingLog};

const BOOT_MESSAGE: &str = "Initializing websocket connection...";
const OPEN_MESSAGES: [&str; 2] = ["ACCESS GRANTED. Stream encrypted.", "Receiving data packets..."];
const LOST_MESSAGE: &str = "CONNECTION LOST. Re-routing through proxy...";
const TRACE_PREFIX_LEN: usize = 8;

/// Feed connection status as shown to the user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Live,
    Offline,
}

impl ConnectionStatus {
    /// Returns a display string for the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "Connecting...",
            ConnectionStatus::Live => "Live",
            ConnectionStatus::Offline => "Offline",
        }
    }

    /// Returns the themed protocol status shown in the ticker panel.
    pub fn protocol_label(&self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "HANDSHAKE",
            ConnectionStatus::Live => "SECURED",
            ConnectionStatus::Offline => "SEVERED",
        }
    }
}

/// Direction of the last price move, lit for a short pulse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PriceDirection {
    Up,
    Down,
    #[default]
    Neutral,
}

/// Settings the session needs from [`DisplayConfig`].
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub log_capacity: usize,
    pub pulse_duration: Duration,
    pub trace_probability: f64,
}

impl From<&DisplayConfig> for SessionConfig {
    fn from(display: &DisplayConfig) -> Self {
        Self {
            log_capacity: display.log_capacity,
            pulse_duration: display.pulse_duration,
            trace_probability: display.trace_probability,
        }
    }
}

/// Derived UI state for one mounted ticker session.
pub struct StreamSession<C> {
    config: SessionConfig,
    status: ConnectionStatus,
    snapshot: Option<TickerSnapshot>,
    previous_price: Decimal,
    direction: PriceDirection,
    /// Pending pulse resets, oldest first. Never cancelled.
    pulse_resets: VecDeque<Instant>,
    formatted_price: String,
    formatted_change: String,
    title: Option<String>,
    log: RollingLog,
    chance: C,
}

impl<C: ChanceSource> StreamSession<C> {
    /// Starts a session in [`ConnectionStatus::Connecting`].
    pub fn new(config: SessionConfig, chance: C) -> Self {
        let mut log = RollingLog::new(config.log_capacity);
        log.push(BOOT_MESSAGE);

        Self {
            config,
            status: ConnectionStatus::Connecting,
            snapshot: None,
            previous_price: Decimal::ZERO,
            direction: PriceDirection::Neutral,
            pulse_resets: VecDeque::new(),
            formatted_price: format::PRICE_PLACEHOLDER.to_string(),
            formatted_change: format::CHANGE_PLACEHOLDER.to_string(),
            title: None,
            log,
            chance,
        }
    }

    /// Applies a feed event.
    pub fn handle(&mut self, event: FeedEvent, now: Instant) {
        match event {
            FeedEvent::Connecting => self.on_connecting(),
            FeedEvent::Opened => self.on_open(),
            FeedEvent::Frame(text) => self.on_frame(&text, now),
            FeedEvent::Error(reason) => self.on_error(&reason),
            FeedEvent::Closed => self.on_close(),
        }
    }

    /// A reconnect attempt has started.
    pub fn on_connecting(&mut self) {
        if self.status == ConnectionStatus::Connecting {
            return;
        }
        self.status = ConnectionStatus::Connecting;
        self.log.push(BOOT_MESSAGE);
    }

    /// The connection is established.
    pub fn on_open(&mut self) {
        self.status = ConnectionStatus::Live;
        for message in OPEN_MESSAGES {
            self.log.push(message);
        }
        info!("Feed live");
    }

    /// Applies one text frame from the feed. Frames are ignored unless the
    /// session is live; undecodable frames are skipped and logged.
    pub fn on_frame(&mut self, text: &str, now: Instant) {
        if self.status != ConnectionStatus::Live {
            debug!(status = ?self.status, "Dropping frame received while not live");
            return;
        }

        let snapshot = match TickerSnapshot::decode(text) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Skipping feed frame: {e}");
                self.log.push("Corrupt packet discarded");
                return;
            }
        };

        let price = snapshot.last_price;
        if price > self.previous_price {
            self.start_pulse(PriceDirection::Up, now);
        } else if price < self.previous_price {
            self.start_pulse(PriceDirection::Down, now);
        }
        self.previous_price = price;

        self.formatted_price = format::format_price(price);
        self.formatted_change = format::format_change(snapshot.price_change_percent);
        self.title = Some(format::format_title(price));

        if self.chance.chance(self.config.trace_probability) {
            let units: String = snapshot.base_volume.chars().take(TRACE_PREFIX_LEN).collect();
            self.log.push(format!("Node trace: {units} base units"));
        }

        self.snapshot = Some(snapshot);
    }

    /// A transport error was reported. The close that usually follows
    /// drives the state change.
    pub fn on_error(&mut self, reason: &str) {
        warn!(reason, "Feed transport error");
        self.log.push(format!("Uplink fault: {reason}"));
    }

    /// The connection closed or could not be opened.
    pub fn on_close(&mut self) {
        if self.status == ConnectionStatus::Offline {
            return;
        }
        self.status = ConnectionStatus::Offline;
        self.log.push(LOST_MESSAGE);
        info!("Feed offline");
    }

    /// Ends every pulse whose reset deadline has passed.
    pub fn expire_pulses(&mut self, now: Instant) {
        let mut expired = false;
        while self.pulse_resets.front().is_some_and(|deadline| *deadline <= now) {
            self.pulse_resets.pop_front();
            expired = true;
        }
        if expired {
            self.direction = PriceDirection::Neutral;
        }
    }

    fn start_pulse(&mut self, direction: PriceDirection, now: Instant) {
        self.direction = direction;
        self.pulse_resets.push_back(now + self.config.pulse_duration);
    }
}

impl<C> StreamSession<C> {
    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    /// The most recently accepted snapshot.
    pub fn snapshot(&self) -> Option<&TickerSnapshot> {
        self.snapshot.as_ref()
    }

    /// Price of the last accepted frame, zero before the first one.
    pub fn previous_price(&self) -> Decimal {
        self.previous_price
    }

    pub fn direction(&self) -> PriceDirection {
        self.direction
    }

    pub fn formatted_price(&self) -> &str {
        &self.formatted_price
    }

    pub fn formatted_change(&self) -> &str {
        &self.formatted_change
    }

    /// Whether the last change was below zero.
    pub fn change_is_negative(&self) -> bool {
        self.formatted_change.starts_with('-')
    }

    /// Window title reflecting the latest price, once one has arrived.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn log(&self) -> &RollingLog {
        &self.log
    }

    /// Number of pulse resets still waiting to fire.
    pub fn pending_pulses(&self) -> usize {
        self.pulse_resets.len()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    const PULSE: Duration = Duration::from_millis(500);

    fn config(capacity: usize) -> SessionConfig {
        SessionConfig {
            log_capacity: capacity,
            pulse_duration: PULSE,
            trace_probability: 0.02,
        }
    }

    fn live_session(trace: bool) -> StreamSession<FixedChance> {
        let mut session = StreamSession::new(config(6), FixedChance(trace));
        session.on_open();
        session
    }

    fn tick(price: &str, change: &str) -> String {
        format!(
            r#"{{"e":"24hrTicker","s":"BTCUSDT","p":"1.00","c":"{price}","P":"{change}","v":"12345.678901","q":"500000"}}"#
        )
    }

    fn messages(session: &StreamSession<FixedChance>) -> Vec<String> {
        session.log().iter().map(|e| e.message.clone()).collect()
    }

    #[test]
    fn starts_connecting_with_boot_text() {
        let session = StreamSession::new(config(6), FixedChance(false));
        assert_eq!(session.status(), ConnectionStatus::Connecting);
        assert_eq!(session.formatted_price(), "-------");
        assert_eq!(session.formatted_change(), "--.--%");
        assert!(session.title().is_none());
        assert_eq!(messages(&session), ["> Initializing websocket connection..."]);
    }

    #[test]
    fn open_goes_live_and_logs() {
        let session = live_session(false);
        assert_eq!(session.status(), ConnectionStatus::Live);
        assert_eq!(
            messages(&session)[..2],
            ["> Receiving data packets...", "> ACCESS GRANTED. Stream encrypted."]
        );
    }

    #[test]
    fn first_tick_scenario() {
        let mut session = live_session(false);
        session.on_frame(&tick("50000.00", "2.50"), Instant::now());

        assert_eq!(session.formatted_price(), "$50,000.00");
        assert_eq!(session.formatted_change(), "+2.50%");
        assert_eq!(session.direction(), PriceDirection::Up);
        assert_eq!(session.status(), ConnectionStatus::Live);
        assert_eq!(session.title(), Some("BTC: $50000 // MATRIX"));
        assert_eq!(session.snapshot().unwrap().quote_volume, "500000");
    }

    #[test]
    fn previous_price_follows_every_frame() {
        let mut session = live_session(false);
        let now = Instant::now();
        for price in ["100.50", "99.00", "99.00", "120.25", "1.00"] {
            session.on_frame(&tick(price, "0"), now);
            assert_eq!(session.previous_price(), price.parse::<Decimal>().unwrap());
            assert_eq!(session.snapshot().unwrap().last_price, session.previous_price());
        }
    }

    #[test]
    fn direction_follows_strict_comparison() {
        let mut session = live_session(false);
        let now = Instant::now();

        session.on_frame(&tick("100", "0"), now);
        assert_eq!(session.direction(), PriceDirection::Up);

        session.on_frame(&tick("90", "0"), now);
        assert_eq!(session.direction(), PriceDirection::Down);
        assert_eq!(session.pending_pulses(), 2);
    }

    #[test]
    fn equal_price_fires_no_direction_event() {
        let mut session = live_session(false);
        let start = Instant::now();

        session.on_frame(&tick("100", "0"), start);
        session.expire_pulses(start + PULSE);
        assert_eq!(session.direction(), PriceDirection::Neutral);

        session.on_frame(&tick("100.00", "0"), start + PULSE);
        assert_eq!(session.direction(), PriceDirection::Neutral);
        assert_eq!(session.pending_pulses(), 0);
    }

    #[test]
    fn pulse_reverts_after_delay() {
        let mut session = live_session(false);
        let start = Instant::now();
        session.on_frame(&tick("100", "0"), start);

        session.expire_pulses(start + PULSE - Duration::from_millis(1));
        assert_eq!(session.direction(), PriceDirection::Up);

        session.expire_pulses(start + PULSE);
        assert_eq!(session.direction(), PriceDirection::Neutral);
    }

    #[test]
    fn earlier_pulse_reset_is_not_cancelled_by_later_update() {
        let mut session = live_session(false);
        let start = Instant::now();
        session.on_frame(&tick("100", "0"), start);
        session.on_frame(&tick("90", "0"), start + Duration::from_millis(400));

        // first reset lands while the second pulse is still young
        session.expire_pulses(start + PULSE);
        assert_eq!(session.direction(), PriceDirection::Neutral);
        assert_eq!(session.pending_pulses(), 1);

        session.expire_pulses(start + Duration::from_millis(900));
        assert_eq!(session.pending_pulses(), 0);
    }

    #[test]
    fn log_stays_bounded_and_newest_first() {
        let mut session = StreamSession::new(config(5), FixedChance(true));
        session.on_open();
        let now = Instant::now();
        for i in 0..20 {
            session.on_frame(&tick(&format!("{}", 100 + i), "1"), now);
            assert!(session.log().len() <= 5);
        }

        let ids: Vec<u64> = session.log().iter().map(|e| e.id).collect();
        assert!(ids.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn trace_line_uses_volume_prefix() {
        let mut session = live_session(true);
        session.on_frame(&tick("100", "0"), Instant::now());
        assert_eq!(
            session.log().latest().unwrap().message,
            "> Node trace: 12345.67 base units"
        );
    }

    #[test]
    fn suppressed_trace_adds_nothing() {
        let mut session = live_session(false);
        let before = session.log().len();
        session.on_frame(&tick("100", "0"), Instant::now());
        assert_eq!(session.log().len(), before);
    }

    #[test]
    fn malformed_frame_is_skipped() {
        let mut session = live_session(false);
        let now = Instant::now();
        session.on_frame(&tick("100", "1.5"), now);

        session.on_frame("not json", now);
        session.on_frame(r#"{"c":"abc","P":"1","v":"1","q":"1"}"#, now);
        session.on_frame(r#"{"P":"1","v":"1","q":"1"}"#, now);

        assert_eq!(session.status(), ConnectionStatus::Live);
        assert_eq!(session.previous_price(), dec!(100));
        assert_eq!(session.formatted_change(), "+1.50%");
        assert_eq!(
            session.log().latest().unwrap().message,
            "> Corrupt packet discarded"
        );
    }

    #[test]
    fn frames_before_open_are_ignored() {
        let mut session = StreamSession::new(config(6), FixedChance(false));
        session.on_frame(&tick("100", "0"), Instant::now());
        assert!(session.snapshot().is_none());
        assert_eq!(session.previous_price(), Decimal::ZERO);
    }

    #[test]
    fn close_then_reconnect_cycle() {
        let mut session = live_session(false);
        let now = Instant::now();
        session.on_frame(&tick("100", "0"), now);

        session.handle(FeedEvent::Closed, now);
        assert_eq!(session.status(), ConnectionStatus::Offline);
        assert_eq!(
            session.log().latest().unwrap().message,
            "> CONNECTION LOST. Re-routing through proxy..."
        );

        session.handle(FeedEvent::Connecting, now);
        assert_eq!(session.status(), ConnectionStatus::Connecting);
        assert_eq!(
            session.log().latest().unwrap().message,
            "> Initializing websocket connection..."
        );

        session.handle(FeedEvent::Opened, now);
        assert_eq!(session.status(), ConnectionStatus::Live);
        // the last snapshot survives the reconnect
        assert_eq!(session.formatted_price(), "$100.00");
    }

    #[test]
    fn repeated_close_logs_once() {
        let mut session = live_session(false);
        session.on_close();
        let len = session.log().len();
        session.on_close();
        assert_eq!(session.log().len(), len);
    }

    #[test]
    fn error_logs_without_transition() {
        let mut session = live_session(false);
        session.handle(FeedEvent::Error("connection reset".into()), Instant::now());
        assert_eq!(session.status(), ConnectionStatus::Live);
        assert_eq!(
            session.log().latest().unwrap().message,
            "> Uplink fault: connection reset"
        );
    }

    #[test]
    fn negative_change_is_flagged() {
        let mut session = live_session(false);
        session.on_frame(&tick("100", "-0.68"), Instant::now());
        assert_eq!(session.formatted_change(), "-0.68%");
        assert!(session.change_is_negative());
    }
}
