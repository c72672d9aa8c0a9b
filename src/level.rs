// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::error::ParseLevelError;
use std::fmt::Display;
use std::str::FromStr;

/**
Severity of a log event.

Levels are totally ordered by declaration order.  The same ordering is used to tag
events and to threshold destinations: an event reaches a destination iff
`event.level() >= destination_level`.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// Very fine-grained diagnostics
    #[default]
    Trace,
    Debug,
    Info,
    /// Suspicious condition
    Warn,
    Error,
    /// The program is about to go down
    Fatal,
}

impl Level {
    /// Every level, lowest first.
    pub const ALL: [Level; 6] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];

    /// The uppercase label used in rendered output, e.g. `"WARN"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }

    pub const fn as_lowercase(self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }
}

/// Returns the uppercase label for `level`.
pub fn level_to_string(level: Level) -> &'static str {
    level.as_str()
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // pad() so that `{:<5}` works on the label
        f.pad(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("warning") {
            return Ok(Level::Warn);
        }
        Level::ALL
            .into_iter()
            .find(|level| trimmed.eq_ignore_ascii_case(level.as_str()))
            .ok_or_else(|| ParseLevelError::new(s))
    }
}

/*
Boilerplate notes.

Copy: a fieldless enum, copying is free.
Default: Trace, which is what a freshly started logger admits on the console.
Display: the uppercase label, honoring width/alignment flags.
From/Into integers: deliberately absent, levels have no numeric meaning beyond ordering.
*/
