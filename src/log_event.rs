// SPDX-License-Identifier: MIT OR Apache-2.0

//! The value handed to every sink for one log call.
//!
//! A [`LogEvent`] only lives for the duration of a single [`log`](crate::log) call.  It borrows
//! the call-site file name and the rendered message from the dispatcher, so sinks that want to
//! keep anything must copy it out.
//!
//! The dispatcher fills in the timestamp and renders the message at most once per call, and only
//! if at least one destination admits the event.  Every sink invoked during that call sees the
//! same timestamp and the same message text.

use crate::Level;
use chrono::{DateTime, Local};

/**
One emitted message, as seen by a sink.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent<'a> {
    level: Level,
    file: &'a str,
    line: u32,
    time: DateTime<Local>,
    message: &'a str,
}

impl<'a> LogEvent<'a> {
    /**
    Builds an event.

    Normally the dispatcher does this; it is public so that sinks can be exercised directly.
    */
    pub fn new(
        level: Level,
        file: &'a str,
        line: u32,
        time: DateTime<Local>,
        message: &'a str,
    ) -> Self {
        Self {
            level,
            file,
            line,
            time,
            message,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Source file of the call site.
    pub fn file(&self) -> &'a str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// Local wall-clock time of the `log` call.
    pub fn time(&self) -> DateTime<Local> {
        self.time
    }

    /// The caller's message, already formatted.
    pub fn message(&self) -> &'a str {
        self.message
    }
}

/*
Boilerplate notes for LogEvent:

- Clone/PartialEq/Eq: derived, handy for sinks that forward or compare events.
- Copy: possible, but leaving it out keeps the door open for owned fields.
- Default: no sensible call site or time.
- Hash: DateTime<Local> hashes, but nobody keys maps by events.
- Display: each sink renders its own layout, so there is no canonical one.
*/
