//! Request log streaming via Server-Sent Events (SSE).
//!
//! Every entry is printed to stdout and broadcast to the clients
//! subscribed to `GET /logs`.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Capacity of the broadcast channel. Slow subscribers skip entries.
const LOG_CHANNEL_CAPACITY: usize = 100;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Request this entry belongs to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            request_id: None,
            timestamp: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, message)
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

/// Global log broadcaster
pub static LOG_BROADCASTER: Lazy<LogBroadcaster> = Lazy::new(LogBroadcaster::new);

/// Broadcasts log entries to all connected SSE clients
pub struct LogBroadcaster {
    sender: broadcast::Sender<LogEntry>,
}

impl LogBroadcaster {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(LOG_CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Send a log entry to all subscribers
    pub fn log(&self, entry: LogEntry) {
        let prefix = match entry.level {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        };
        match entry.request_id {
            Some(ref id) => println!(
                "{} {} [{}] {}",
                entry.timestamp.format("%H:%M:%S"),
                prefix,
                id,
                entry.message
            ),
            None => println!("{} {} {}", entry.timestamp.format("%H:%M:%S"), prefix, entry.message),
        }

        // No receivers is fine
        let _ = self.sender.send(entry);
    }

    /// Get a receiver for SSE streaming
    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.sender.subscribe()
    }
}

impl Default for LogBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

pub fn log_info(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::info(msg));
}

/// Request that completed.
pub fn log_success(request_id: &str, msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::success(msg).with_request_id(request_id));
}

/// Request answered with an `error ...` body.
pub fn log_warning(request_id: &str, msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::warning(msg).with_request_id(request_id));
}

pub fn log_error(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::error(msg));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscriber_receives_entry() {
        let broadcaster = LogBroadcaster::new();
        let mut rx = broadcaster.subscribe();

        broadcaster.log(LogEntry::success("POST /sum 3x3").with_request_id("abc"));

        let entry = rx.try_recv().unwrap();
        assert_eq!(entry.level, LogLevel::Success);
        assert_eq!(entry.message, "POST /sum 3x3");
        assert_eq!(entry.request_id.as_deref(), Some("abc"));
    }

    /// Next entry on the global broadcaster with `message`, skipping entries
    /// other tests log concurrently.
    fn find_entry(rx: &mut broadcast::Receiver<LogEntry>, message: &str) -> LogEntry {
        loop {
            match rx.try_recv() {
                Ok(entry) if entry.message == message => return entry,
                Ok(_) | Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(e) => panic!("entry '{}' not received: {:?}", message, e),
            }
        }
    }

    #[test]
    fn test_global_helpers() {
        let mut rx = LOG_BROADCASTER.subscribe();

        log_success("req-1", "helpers: /sum 2x2");
        log_warning("req-2", "helpers: /sum error");
        log_error("helpers: bind failed");

        let entry = find_entry(&mut rx, "helpers: /sum 2x2");
        assert_eq!(entry.level, LogLevel::Success);
        assert_eq!(entry.request_id.as_deref(), Some("req-1"));

        let entry = find_entry(&mut rx, "helpers: /sum error");
        assert_eq!(entry.level, LogLevel::Warning);
        assert_eq!(entry.request_id.as_deref(), Some("req-2"));

        let entry = find_entry(&mut rx, "helpers: bind failed");
        assert_eq!(entry.level, LogLevel::Error);
        assert!(entry.request_id.is_none());
    }

    #[test]
    fn test_log_without_subscribers() {
        let broadcaster = LogBroadcaster::default();
        broadcaster.log(LogEntry::info("nobody listening"));
    }

    #[test]
    fn test_entry_serialization() {
        let json = serde_json::to_value(LogEntry::warning("bad upload").with_request_id("r1")).unwrap();
        assert_eq!(json["level"], "warning");
        assert_eq!(json["requestId"], "r1");
        assert!(json["timestamp"].is_string());
    }
}
