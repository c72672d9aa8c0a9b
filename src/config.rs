// SPDX-License-Identifier: MIT OR Apache-2.0

//! Build-time and environment configuration.
//!
//! # Build time
//!
//! The console layout is chosen when the crate is compiled:
//!
//! | Cargo feature | Effect on the console line                                      |
//! |---------------|-----------------------------------------------------------------|
//! | `pid`         | adds a `[  1234]` process-id field after the time               |
//! | `color`       | colorizes the level label and dims the location                 |
//! | `loc-align`   | right-aligns `file:line` in a fixed-width field, truncating left |
//!
//! The width used by `loc-align` comes from the `SINKLOG_LOC_WIDTH` environment variable *at
//! compile time* and defaults to [`DEFAULT_LOCATION_WIDTH`].
//!
//! These are only defaults.  [`ConsoleFormat`](crate::ConsoleFormat) can override each one for a
//! console sink built at runtime.
//!
//! # Environment
//!
//! [`configure_from_env`] applies `SINKLOG_LEVEL` and `SINKLOG_QUIET` to the process-wide
//! logger.  Nothing reads the environment unless it is called.

use crate::Level;

/// Location field width when nothing else is configured.
pub const DEFAULT_LOCATION_WIDTH: usize = 15;

/// Location field width baked in at compile time.
pub const LOCATION_WIDTH: usize = match option_env!("SINKLOG_LOC_WIDTH") {
    Some(text) => parse_width(text),
    None => DEFAULT_LOCATION_WIDTH,
};

pub const INCLUDE_PID: bool = cfg!(feature = "pid");
pub const USE_COLOR: bool = cfg!(feature = "color");
pub const ALIGN_LOCATION: bool = cfg!(feature = "loc-align");

/// Variable holding the console threshold, e.g. `SINKLOG_LEVEL=warn`.
pub const LEVEL_VAR: &str = "SINKLOG_LEVEL";
/// Variable muting the console path when set to `1`, `true` or `yes`.
pub const QUIET_VAR: &str = "SINKLOG_QUIET";

//decimal only; anything unparseable falls back to the default
const fn parse_width(text: &str) -> usize {
    let bytes = text.as_bytes();
    if bytes.is_empty() {
        return DEFAULT_LOCATION_WIDTH;
    }
    let mut value: usize = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if !b.is_ascii_digit() {
            return DEFAULT_LOCATION_WIDTH;
        }
        value = match value.checked_mul(10) {
            Some(v) => v,
            None => return DEFAULT_LOCATION_WIDTH,
        };
        value = match value.checked_add((b - b'0') as usize) {
            Some(v) => v,
            None => return DEFAULT_LOCATION_WIDTH,
        };
        i += 1;
    }
    value
}

/// What [`configure_from_env`] found and applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnvConfig {
    pub level: Option<Level>,
    pub quiet: Option<bool>,
}

impl EnvConfig {
    /// Reads the configuration variables through `lookup` without applying them.
    ///
    /// Values that don't parse are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = lookup(LEVEL_VAR).and_then(|v| v.parse().ok());
        let quiet = lookup(QUIET_VAR).and_then(|v| parse_flag(&v));
        Self { level, quiet }
    }

    pub fn apply(self) {
        if let Some(level) = self.level {
            crate::set_level(level);
        }
        if let Some(quiet) = self.quiet {
            crate::set_quiet(quiet);
        }
    }
}

fn parse_flag(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/**
Reads `SINKLOG_LEVEL` and `SINKLOG_QUIET` from the process environment and applies them.

Like the other setters this is not bracketed by the lock hook, so call it before other threads
start logging.

```no_run
// SINKLOG_LEVEL=error SINKLOG_QUIET=0 ./my-app
let applied = sinklog::configure_from_env();
if let Some(level) = applied.level {
    assert_eq!(sinklog::level(), level);
}
```
*/
pub fn configure_from_env() -> EnvConfig {
    let config = EnvConfig::from_lookup(|name| std::env::var(name).ok());
    config.apply();
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::global_state::{TEST_STATE_GUARD, reset_state};
    use crate::ConsoleFormat;
    use std::collections::HashMap;

    #[test]
    fn width_parsing() {
        assert_eq!(parse_width("24"), 24);
        assert_eq!(parse_width("0"), 0);
        assert_eq!(parse_width(""), DEFAULT_LOCATION_WIDTH);
        assert_eq!(parse_width("twelve"), DEFAULT_LOCATION_WIDTH);
        assert_eq!(parse_width("99999999999999999999999"), DEFAULT_LOCATION_WIDTH);
    }

    #[test]
    fn lookup_reads_both_variables() {
        let env: HashMap<&str, &str> = [(LEVEL_VAR, "Warn"), (QUIET_VAR, "yes")].into();
        let config = EnvConfig::from_lookup(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(
            config,
            EnvConfig {
                level: Some(Level::Warn),
                quiet: Some(true)
            }
        );
    }

    #[test]
    fn garbage_is_ignored() {
        let env: HashMap<&str, &str> = [(LEVEL_VAR, "loud"), (QUIET_VAR, "maybe")].into();
        let config = EnvConfig::from_lookup(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(config, EnvConfig::default());
        assert_eq!(EnvConfig::from_lookup(|_| None), EnvConfig::default());
    }

    #[test]
    fn apply_reaches_the_logger() {
        let _guard = TEST_STATE_GUARD.lock().unwrap_or_else(|e| e.into_inner());
        reset_state();
        let env: HashMap<&str, &str> = [(LEVEL_VAR, "error"), (QUIET_VAR, "on")].into();
        EnvConfig::from_lookup(|name| env.get(name).map(|v| v.to_string())).apply();
        assert_eq!(crate::level(), Level::Error);
        assert!(crate::is_quiet());

        //unset variables leave the current settings alone
        EnvConfig {
            level: None,
            quiet: Some(false),
        }
        .apply();
        assert_eq!(crate::level(), Level::Error);
        assert!(!crate::is_quiet());
        reset_state();
    }

    #[test]
    fn configure_from_env_without_variables() {
        let _guard = TEST_STATE_GUARD.lock().unwrap_or_else(|e| e.into_inner());
        reset_state();
        let applied = configure_from_env();
        match applied.level {
            Some(level) => assert_eq!(crate::level(), level),
            None => assert_eq!(crate::level(), Level::Trace),
        }
        assert_eq!(crate::is_quiet(), applied.quiet.unwrap_or(false));
        reset_state();
    }

    #[test]
    fn console_format_defaults_follow_features() {
        let format = ConsoleFormat::default();
        assert_eq!(format.include_pid, INCLUDE_PID);
        assert_eq!(format.include_pid, cfg!(feature = "pid"));
        assert_eq!(format.use_color, USE_COLOR);
        assert_eq!(format.align_location, ALIGN_LOCATION);
        assert_eq!(format.align_location, cfg!(feature = "loc-align"));
        assert_eq!(format.location_width, LOCATION_WIDTH);
    }
}
