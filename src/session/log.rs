//! Bounded, newest-first log of human-readable session events.

use std::collections::VecDeque;

/// A single immutable log line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    /// Monotonic id, unique within one session.
    pub id: u64,
    /// Display text, already prefixed with `> `.
    pub message: String,
    /// Local wall-clock time the entry was created (`HH:MM:SS`).
    pub timestamp: String,
}

/// Fixed-capacity log ordered newest-first.
///
/// Pushing past capacity drops the oldest entry.
#[derive(Clone, Debug)]
pub struct RollingLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    next_id: u64,
}

impl RollingLog {
    /// Creates an empty log. A zero capacity is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
            next_id: 0,
        }
    }

    /// Appends a message as the newest entry and returns it.
    pub fn push(&mut self, message: impl AsRef<str>) -> &LogEntry {
        let entry = LogEntry {
            id: self.next_id,
            message: format!("> {}", message.as_ref()),
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
        };
        self.next_id += 1;

        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
        &self.entries[0]
    }

    /// Iterates entries newest-first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Returns the most recent entry.
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
