// Logging module - subscriber setup and in-memory log capture
//
// A custom tracing layer feeds a bounded ring of recent events that the
// logs panel reads each frame. Writing logs straight to stdout would break
// through the alternate screen buffer and garble the display. Headless
// runs log to stdout normally, and rotating JSON log files can be layered
// on top.

use crate::config::{Config, LogRotation, LoggingConfig};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::layer::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Entries kept in memory; older ones fall off the front
const RING_CAPACITY: usize = 1000;

/// A single log event captured from tracing
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    /// The tracing target (module path)
    pub target: String,
    pub message: String,
}

/// Log level for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::ERROR => LogLevel::Error,
            Level::WARN => LogLevel::Warn,
            Level::INFO => LogLevel::Info,
            Level::DEBUG => LogLevel::Debug,
            Level::TRACE => LogLevel::Trace,
        }
    }
}

impl LogLevel {
    /// Get the display string for this log level
    pub fn as_str(&self) -> &str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// Bounded in-memory ring of recent log entries.
///
/// Cloning shares the underlying ring, so the subscriber layer and the
/// logs panel see the same entries.
#[derive(Clone)]
pub struct LogRing {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
}

impl LogRing {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(RING_CAPACITY))),
        }
    }

    /// Append an entry, dropping the oldest when the ring is full
    pub fn push(&self, entry: LogEntry) {
        let mut entries = self.entries.lock().unwrap();
        while entries.len() >= RING_CAPACITY {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// The newest `limit` entries, oldest first
    pub fn tail(&self, limit: usize) -> Vec<LogEntry> {
        let entries = self.entries.lock().unwrap();
        let skip = entries.len().saturating_sub(limit);
        entries.iter().skip(skip).cloned().collect()
    }
}

impl Default for LogRing {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracing layer that copies every event into a [`LogRing`]
pub struct RingLayer {
    ring: LogRing,
}

impl RingLayer {
    pub fn new(ring: LogRing) -> Self {
        Self { ring }
    }
}

impl<S> Layer<S> for RingLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut message = String::new();
        event.record(&mut MessageField(&mut message));

        self.ring.push(LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::from(*event.metadata().level()),
            target: event.metadata().target().to_string(),
            message,
        });
    }
}

/// Visitor that keeps only the `message` field of an event
struct MessageField<'a>(&'a mut String);

impl<'a> tracing::field::Visit for MessageField<'a> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() != "message" {
            return;
        }
        let rendered = format!("{:?}", value);
        // Strip the quotes Debug adds around plain strings
        let trimmed = rendered
            .strip_prefix('"')
            .and_then(|r| r.strip_suffix('"'))
            .unwrap_or(&rendered);
        self.0.push_str(trimmed);
    }
}

/// Initialize the global tracing subscriber.
///
/// TUI runs capture events into the ring the logs panel reads; headless
/// runs log to stdout. File logging, when enabled, adds a JSON layer with
/// the configured rotation. The returned guard must stay alive until exit
/// so buffered file writes flush.
///
/// Filter precedence: RUST_LOG env var > config file level > "info".
pub fn init_tracing(config: &Config, ring: &LogRing) -> Option<WorkerGuard> {
    let default_filter = format!("maitred={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // The file layer is optional; Option<Layer> composes as a no-op when absent
    let (file_layer, guard) = match file_writer(&config.logging) {
        Some((writer, guard)) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    let base = tracing_subscriber::registry().with(file_layer).with(filter);

    if config.enable_tui {
        base.with(RingLayer::new(ring.clone())).init();
    } else {
        base.with(tracing_subscriber::fmt::layer()).init();
    }

    guard
}

/// Build the rotating non-blocking file writer, if file logging is enabled
fn file_writer(logging: &LoggingConfig) -> Option<(NonBlocking, WorkerGuard)> {
    if !logging.file_enabled {
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&logging.file_dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            logging.file_dir, e
        );
        return None;
    }

    let appender = match logging.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
        }
    };

    Some(tracing_appender::non_blocking(appender))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::Info,
            target: "maitred::test".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_ring_drops_oldest_at_capacity() {
        let ring = LogRing::new();
        for i in 0..RING_CAPACITY + 5 {
            ring.push(entry(&format!("event {}", i)));
        }
        let all = ring.tail(usize::MAX);
        assert_eq!(all.len(), RING_CAPACITY);
        assert_eq!(all[0].message, "event 5");
    }

    #[test]
    fn test_tail_returns_newest_oldest_first() {
        let ring = LogRing::new();
        ring.push(entry("first"));
        ring.push(entry("second"));
        ring.push(entry("third"));
        let tail = ring.tail(2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].message, "second");
        assert_eq!(tail[1].message, "third");
    }

    #[test]
    fn test_tail_with_large_limit_returns_everything() {
        let ring = LogRing::new();
        ring.push(entry("only"));
        assert_eq!(ring.tail(50).len(), 1);
    }

    #[test]
    fn test_level_display_names() {
        assert_eq!(LogLevel::from(Level::ERROR).as_str(), "ERROR");
        assert_eq!(LogLevel::from(Level::TRACE).as_str(), "TRACE");
    }
}
