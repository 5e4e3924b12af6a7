use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};

/// Most recent entries kept; anything older is silently evicted.
pub const LOG_CAPACITY: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Success,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Success => "success",
            Severity::Info => "info",
        };
        f.write_str(tag)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.at.format("%H:%M:%S"),
            self.severity,
            self.message
        )
    }
}

/// Append-only operator audit trail, newest first, bounded ring.
#[derive(Debug, Default)]
pub struct CommandLog {
    entries: VecDeque<LogEntry>,
}

impl CommandLog {
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        self.entries.push_front(LogEntry {
            at: Utc::now(),
            severity,
            message: message.into(),
        });
        self.entries.truncate(LOG_CAPACITY);
    }

    /// Entries newest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandLog, LOG_CAPACITY, Severity};

    #[test]
    fn newest_entry_comes_first() {
        let mut log = CommandLog::default();
        log.push(Severity::Info, "first");
        log.push(Severity::Success, "second");

        let messages: Vec<&str> = log.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "first"]);
    }

    #[test]
    fn evicts_silently_beyond_capacity() {
        let mut log = CommandLog::default();
        for i in 0..(LOG_CAPACITY + 5) {
            log.push(Severity::Info, format!("entry {i}"));
        }

        assert_eq!(log.len(), LOG_CAPACITY);
        let newest = log.entries().next().expect("log is non-empty");
        assert_eq!(newest.message, format!("entry {}", LOG_CAPACITY + 4));
        // The five oldest entries are gone.
        assert!(log.entries().all(|e| e.message != "entry 0"));
        assert!(log.entries().all(|e| e.message != "entry 4"));
    }

    #[test]
    fn severity_tags_render_lowercase() {
        let mut log = CommandLog::default();
        log.push(Severity::Warning, "late submission window closed");
        let line = log.entries().next().expect("entry present").to_string();
        assert!(line.contains("[warning] late submission window closed"));
    }
}
