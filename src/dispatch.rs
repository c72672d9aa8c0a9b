// SPDX-License-Identifier: MIT OR Apache-2.0

//! The dispatcher: one [`log`] call, start to finish.
//!
//! # Flow
//!
//! 1. Acquire the lock hook, if one is installed.
//! 2. Take a snapshot of the configuration.  If no destination admits the level, stop here.
//! 3. Console path: unless muted, and if the level passes the console threshold, render to the
//!    console sink.
//! 4. Fan out to every registered sink whose threshold the level passes, in registration order.
//! 5. Release the lock hook.
//!
//! The timestamp is read from the clock and the message is formatted on first use, i.e. only
//! when some destination fires, and at most once per call.  Every destination in the same call
//! sees the same time and the same text.  Nothing is memoized across calls.
//!
//! Nothing is reported back to the caller.  A sink that fails to write simply drops the event;
//! the remaining sinks still run.

use crate::global_state;
use crate::lock_hook::HookGuard;
use crate::log_event::LogEvent;
use crate::Level;
use chrono::{DateTime, Local};
use std::borrow::Cow;
use std::fmt::Arguments;

/// Per-call scratch: the call-site metadata plus the lazily computed time and message.
struct Dispatch<'a> {
    level: Level,
    file: &'a str,
    line: u32,
    args: Arguments<'a>,
    time: Option<DateTime<Local>>,
    message: Option<Cow<'a, str>>,
}

impl<'a> Dispatch<'a> {
    fn new(level: Level, file: &'a str, line: u32, args: Arguments<'a>) -> Self {
        Self {
            level,
            file,
            line,
            args,
            time: None,
            message: None,
        }
    }

    fn event(&mut self) -> LogEvent<'_> {
        let time = *self.time.get_or_insert_with(crate::sys::now);
        let args = self.args;
        //a format string without arguments needs no allocation
        let message: &str = self.message.get_or_insert_with(|| match args.as_str() {
            Some(literal) => Cow::Borrowed(literal),
            None => Cow::Owned(args.to_string()),
        });
        LogEvent::new(self.level, self.file, self.line, time, message)
    }
}

/**
Emits one message.

This is what the [`log!`](crate::log!) family of macros expands to; call it directly when the
file and line come from somewhere other than the call site.

```
use sinklog::Level;

sinklog::log(Level::Info, "generated.rs", 12, format_args!("{} rows", 3));
```
*/
pub fn log(level: Level, file: &str, line: u32, args: Arguments<'_>) {
    let mut dispatch = Dispatch::new(level, file, line, args);

    let hook = global_state::lock_hook();
    let _guard = HookGuard::acquire(hook.as_deref());

    let Some(config) = global_state::snapshot(level) else {
        return;
    };

    if !config.quiet && level >= config.level {
        config.console.emit(&dispatch.event());
    }

    for entry in config.sinks.iter() {
        if entry.admits(level) {
            entry.sink().emit(&dispatch.event());
        }
    }
}
