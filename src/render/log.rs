// src/render/log.rs

//! Capped event log shown under the dashboard.

use std::collections::VecDeque;
use std::fmt;

use chrono::Local;

/// Most recent entries kept by [`EventLog`].
pub const LOG_CAPACITY: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Info,
    Success,
    Warning,
}

impl LogKind {
    /// Short tag used in the terminal rendering.
    pub fn tag(self) -> &'static str {
        match self {
            LogKind::Info => "info",
            LogKind::Success => " ok ",
            LogKind::Warning => "warn",
        }
    }
}

/// A log message produced by the controller, not yet timestamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub kind: LogKind,
    pub message: String,
}

impl LogEntry {
    pub fn new(kind: LogKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogKind::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(LogKind::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(LogKind::Warning, message)
    }
}

/// An entry as displayed: local wall-clock time plus the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampedEntry {
    pub timestamp: String,
    pub entry: LogEntry,
}

impl fmt::Display for StampedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.timestamp,
            self.entry.kind.tag(),
            self.entry.message
        )
    }
}

#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<StampedEntry>,
    capacity: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(LOG_CAPACITY)
    }
}

impl EventLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Append an entry stamped with the current local time, dropping the
    /// oldest one when full. Returns the stored entry.
    pub fn push(&mut self, entry: LogEntry) -> &StampedEntry {
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        self.push_stamped(StampedEntry { timestamp, entry })
    }

    pub fn push_stamped(&mut self, stamped: StampedEntry) -> &StampedEntry {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(stamped);
        // Just pushed, so never empty.
        &self.entries[self.entries.len() - 1]
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &StampedEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_newest_entries() {
        let mut log = EventLog::default();
        for i in 0..45 {
            log.push(LogEntry::info(format!("entry {i}")));
        }
        assert_eq!(log.len(), LOG_CAPACITY);
        assert_eq!(log.iter().next().unwrap().entry.message, "entry 15");
        assert_eq!(log.iter().last().unwrap().entry.message, "entry 44");
    }

    #[test]
    fn timestamp_is_wall_clock() {
        let mut log = EventLog::default();
        let stamped = log.push(LogEntry::success("done"));
        assert_eq!(stamped.timestamp.len(), 8);
        assert!(stamped.to_string().ends_with("done"));
    }

    #[test]
    fn clear_empties() {
        let mut log = EventLog::default();
        log.push(LogEntry::warning("x"));
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn controller_kinds_have_distinct_tags() {
        let tags = [LogKind::Info, LogKind::Success, LogKind::Warning].map(LogKind::tag);
        assert_eq!(tags, ["info", " ok ", "warn"]);
        let mut log = EventLog::default();
        assert!(log.push(LogEntry::warning("late")).to_string().contains("[warn] late"));
    }
}
