// Logging module - In-memory log capture for TUI display
//
// This module provides a custom tracing layer that captures log events
// in memory so the TUI can show them in its logs panel. This prevents logs
// from breaking through the TUI's alternate screen buffer and garbling the display.

use crate::config::LoggingConfig;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{Level, Metadata, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Maximum number of log entries to keep in memory
const MAX_LOG_ENTRIES: usize = 1000;

/// A single log entry captured from tracing
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
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

impl From<&Level> for LogLevel {
    fn from(level: &Level) -> Self {
        match *level {
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

/// In-memory log buffer with bounded size (ring buffer)
#[derive(Clone)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
}

impl LogBuffer {
    /// Create a new log buffer
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(MAX_LOG_ENTRIES))),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEntry>> {
        // A panic mid-push leaves the deque intact
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a log entry to the buffer
    /// If the buffer is full, removes the oldest entry
    pub fn add(&self, entry: LogEntry) {
        let mut entries = self.lock();
        if entries.len() >= MAX_LOG_ENTRIES {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// The last `n` entries, oldest first
    pub fn recent(&self, n: usize) -> Vec<LogEntry> {
        let entries = self.lock();
        let skip = entries.len().saturating_sub(n);
        entries.iter().skip(skip).cloned().collect()
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Custom tracing layer that captures logs to a buffer
pub struct TuiLogLayer {
    buffer: LogBuffer,
}

impl TuiLogLayer {
    /// Create a new TUI log layer with a log buffer
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

impl<S> Layer<S> for TuiLogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        // Extract the message using a visitor
        let mut message = String::new();
        let mut visitor = MessageVisitor(&mut message);
        event.record(&mut visitor);

        self.buffer.add(LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::from(metadata.level()),
            target: metadata.target().to_string(),
            message,
        });
    }

    fn enabled(&self, _metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        // Enable all log levels - filtering happens at subscriber level
        true
    }
}

/// Visitor to extract the message from a tracing event
///
/// Structured fields are appended as `key=value` after the message.
struct MessageVisitor<'a>(&'a mut String);

impl<'a> tracing::field::Visit for MessageVisitor<'a> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let rendered = format!("{:?}", value);
        // Remove the quotes that Debug adds
        let rendered = rendered
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .map(str::to_string)
            .unwrap_or(rendered);

        if field.name() == "message" {
            self.0.insert_str(0, &rendered);
        } else {
            self.0.push_str(&format!(" {}={}", field.name(), rendered));
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Subscriber setup
// ─────────────────────────────────────────────────────────────────────────────

/// Where console logs go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// Captured into the TUI's log buffer
    Tui,
    /// Written to stderr (one-shot commands)
    Stderr,
}

/// Install the global subscriber
///
/// Returns the file writer guard when file logging is on. Buffered lines
/// reach the file only when the guard is dropped, so keep it until the
/// program returns from `main`.
pub fn init(config: &LoggingConfig, output: LogOutput, buffer: &LogBuffer) -> Option<WorkerGuard> {
    let (subscriber, guard) = subscriber(config, output, buffer);
    subscriber.init();
    guard
}

/// Build the subscriber without installing it
///
/// Precedence for the filter: RUST_LOG env var > config level > "info".
fn subscriber(
    config: &LoggingConfig,
    output: LogOutput,
    buffer: &LogBuffer,
) -> (impl Subscriber + Send + Sync + 'static, Option<WorkerGuard>) {
    let default_filter = format!("clipflash={}", config.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let console = match output {
        LogOutput::Tui => TuiLogLayer::new(buffer.clone()).boxed(),
        LogOutput::Stderr => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed(),
    };

    let (file_layer, guard) = match &config.file {
        Some(file) => match RollingFileAppender::builder()
            .rotation(file.rotation.rotation())
            .filename_prefix(&file.prefix)
            .build(&file.dir)
        {
            Ok(appender) => {
                // Non-blocking writer: writes happen in a background thread
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not open log file in {}: {}",
                    file.dir.display(),
                    e
                );
                (None, None)
            }
        },
        None => (None, None),
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer);

    (subscriber, guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::Info,
            target: "test".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_buffer_is_bounded() {
        let buffer = LogBuffer::new();
        for i in 0..MAX_LOG_ENTRIES + 5 {
            buffer.add(entry(&i.to_string()));
        }
        assert_eq!(buffer.recent(usize::MAX).len(), MAX_LOG_ENTRIES);
        assert_eq!(buffer.recent(1)[0].message, (MAX_LOG_ENTRIES + 4).to_string());
        assert_eq!(buffer.recent(MAX_LOG_ENTRIES)[0].message, "5");
    }

    #[test]
    fn test_recent_with_fewer_entries() {
        let buffer = LogBuffer::new();
        buffer.add(entry("a"));
        buffer.add(entry("b"));
        let recent: Vec<_> = buffer.recent(10).into_iter().map(|e| e.message).collect();
        assert_eq!(recent, vec!["a", "b"]);
    }

    #[test]
    fn test_layer_captures_message_and_fields() {
        let buffer = LogBuffer::new();
        let subscriber = tracing_subscriber::registry().with(TuiLogLayer::new(buffer.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(backend = "osc52", "Clipboard write failed");
        });

        let captured = buffer.recent(1);
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].level, LogLevel::Warn);
        assert_eq!(captured[0].message, "Clipboard write failed backend=osc52");
    }

    #[test]
    fn test_file_log_is_flushed_when_guard_drops() {
        let dir = std::env::temp_dir().join(format!("clipflash-logs-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let config = LoggingConfig {
            level: "info".to_string(),
            file: Some(crate::config::LogFile {
                dir: dir.clone(),
                rotation: crate::config::LogRotation::Never,
                prefix: "copy".to_string(),
            }),
        };

        let (subscriber, guard) = subscriber(&config, LogOutput::Tui, &LogBuffer::new());
        assert!(guard.is_some());
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(backend = "system", "Clipboard write failed: no display");
        });
        drop(guard);

        let written: String = std::fs::read_dir(&dir)
            .unwrap()
            .filter_map(|e| std::fs::read_to_string(e.unwrap().path()).ok())
            .collect();
        let _ = std::fs::remove_dir_all(&dir);

        assert!(written.contains("Clipboard write failed: no display"), "{:?}", written);
        assert!(written.contains("\"level\":\"WARN\""), "{:?}", written);
    }

    #[test]
    fn test_no_log_file_means_no_guard() {
        let (_subscriber, guard) =
            subscriber(&LoggingConfig::default(), LogOutput::Stderr, &LogBuffer::new());
        assert!(guard.is_none());
    }
}
