//! Log sink collaborator for the mapping handler.
//!
//! The handler never logs through a global; it is given a [`LogSink`] at
//! construction. [`TracingLogSink`] forwards to `tracing`, and
//! [`RecordingLogSink`] keeps lines in memory for tests.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::Level;

/// Structured log line destination, keyed by source and journey id.
pub trait LogSink: Send + Sync {
    fn log(&self, level: Level, source: &str, journey_id: &str, message: &str);

    fn info(&self, source: &str, journey_id: &str, message: &str) {
        self.log(Level::INFO, source, journey_id, message);
    }

    fn error(&self, source: &str, journey_id: &str, message: &str) {
        self.log(Level::ERROR, source, journey_id, message);
    }
}

/// Sink that emits each line as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn log(&self, level: Level, source: &str, journey_id: &str, message: &str) {
        match level {
            Level::ERROR => {
                tracing::error!(source = %source, journey_id = %journey_id, "{}", message)
            }
            Level::WARN => {
                tracing::warn!(source = %source, journey_id = %journey_id, "{}", message)
            }
            Level::INFO => {
                tracing::info!(source = %source, journey_id = %journey_id, "{}", message)
            }
            Level::DEBUG => {
                tracing::debug!(source = %source, journey_id = %journey_id, "{}", message)
            }
            _ => {
                tracing::trace!(source = %source, journey_id = %journey_id, "{}", message)
            }
        }
    }
}

/// A captured log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: Level,
    pub source: String,
    pub journey_id: String,
    pub message: String,
}

/// In-memory sink (testing only).
#[derive(Debug, Default)]
pub struct RecordingLogSink {
    lines: Mutex<Vec<LogLine>>,
}

impl RecordingLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far.
    pub fn lines(&self) -> Vec<LogLine> {
        self.guard().clone()
    }

    /// Whether any line at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.lines()
            .iter()
            .any(|l| l.level == level && l.message.contains(needle))
    }

    // A panic while holding the lock leaves the recorded lines intact.
    fn guard(&self) -> MutexGuard<'_, Vec<LogLine>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LogSink for RecordingLogSink {
    fn log(&self, level: Level, source: &str, journey_id: &str, message: &str) {
        self.guard().push(LogLine {
            level,
            source: source.to_string(),
            journey_id: journey_id.to_string(),
            message: message.to_string(),
        });
    }
}
