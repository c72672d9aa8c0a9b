// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Sink
//!
//! Captures events in memory instead of writing them anywhere, which makes it the natural sink
//! for tests: register one, run the code under test, then inspect [`InMemorySink::drain_logs`].
//!
//! Lines are stored without a timestamp (`LEVEL file:line: message`) so assertions don't depend
//! on the clock.

use crate::log_event::LogEvent;
use crate::sink::Sink;
use std::sync::{Mutex, PoisonError};

/// A sink that stores rendered lines in a `Vec<String>`.
///
/// # Example
///
/// ```rust
/// use sinklog::{InMemorySink, Level};
/// use std::sync::Arc;
///
/// let sink = Arc::new(InMemorySink::new());
/// sinklog::register_sink(sink.clone(), Level::Warn).unwrap();
///
/// sinklog::info!("not captured");
/// sinklog::error!("failed with code {}", 404);
///
/// let logs = sink.drain_logs();
/// assert!(!logs.contains("not captured"));
/// assert!(logs.contains("failed with code 404"));
/// ```
#[derive(Debug, Default)]
pub struct InMemorySink {
    logs: Mutex<Vec<String>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self {
            logs: Mutex::new(Vec::new()),
        }
    }

    /// Joins every captured line with `\n` and clears the buffer.
    pub fn drain_logs(&self) -> String {
        let mut logs = self.logs.lock().unwrap_or_else(PoisonError::into_inner);
        let result = logs.join("\n");
        logs.clear();
        result
    }

    /// Captured lines, oldest first, without clearing.
    pub fn lines(&self) -> Vec<String> {
        self.logs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.logs.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Sink for InMemorySink {
    fn emit(&self, event: &LogEvent<'_>) {
        let line = format!(
            "{:<5} {}:{}: {}",
            event.level(),
            event.file(),
            event.line(),
            event.message()
        );
        self.logs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line);
    }
}

// - Clone: not implemented, two sinks sharing a name but not a buffer would be confusing.
// - PartialEq/Eq/Hash: equality of a mutex-guarded buffer isn't meaningful.
