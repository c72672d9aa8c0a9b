//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# sinklog

sinklog is a small, embeddable logging facility.  One process-wide dispatcher takes leveled,
formatted messages and routes each one to the console and to any number of registered sinks,
every destination with its own severity threshold.

# Levels

| Level   | Label   |
|---------|---------|
| Trace   | `TRACE` |
| Debug   | `DEBUG` |
| Info    | `INFO`  |
| Warn    | `WARN`  |
| Error   | `ERROR` |
| Fatal   | `FATAL` |

Levels are ordered top to bottom.  An event reaches a destination iff its level is at or above
that destination's threshold.

# The API

```rust
use sinklog::Level;

sinklog::set_level(Level::Info);
sinklog::trace!("not shown");
sinklog::warn!("disk {}% full", 91);
```

The console path writes one line per event to stderr:

```text
14:05:07 WARN  src/main.rs:4: disk 91% full
```

Its layout can be extended at build time with the `pid`, `color` and `loc-align` features, see
[`config`].

# Sinks

Anything implementing [`Sink`] can be registered with its own threshold.  Shipped sinks:

* [`StreamSink`], any [`std::io::Write`], usually a log file: `2024-01-15 14:05:07 WARN  src/main.rs:4: disk 91% full`
* [`CallbackSink`], a closure, see [`register_callback`]
* [`InMemorySink`], for tests
* [`ConsoleSink`], the console path itself, replaceable with [`set_console_sink`]

```rust
use sinklog::Level;

let errors = sinklog::register_stream_sink(Vec::new(), Level::Error).unwrap();
sinklog::info!("only on the console");
sinklog::error!("fail");
let text = errors.with_stream(|buf| String::from_utf8_lossy(buf).into_owned());
assert_eq!(text.lines().count(), 1);
```

At most [`MAX_SINKS`] sinks can be registered; further registrations fail with
[`RegisterError::CapacityExceeded`] and change nothing.  Sinks are never unregistered.

# Multithreading

[`log`] takes no lock around sink calls by default, so concurrent calls may interleave inside a
shared stream.  Install a [`LockHook`] (for instance [`SpinLockHook`]) to make each whole
dispatch atomic with respect to other dispatches.  The setters are not bracketed by the hook:
configure the logger before logging from several threads.
*/

mod level;
mod error;
mod log_event;
mod sink;
mod console_sink;
mod stream_sink;
mod inmemory_sink;
mod registry;
mod global_state;
mod lock_hook;
mod dispatch;
mod macros;
mod spinlock;
mod sys;
pub mod config;

pub use level::{Level, level_to_string};
pub use error::{ParseLevelError, RegisterError};
pub use log_event::LogEvent;
pub use sink::{CallbackSink, Sink};
pub use console_sink::{ConsoleFormat, ConsoleSink, render_console_line};
pub use stream_sink::{StreamSink, render_stream_line};
pub use inmemory_sink::InMemorySink;
pub use registry::{MAX_SINKS, SinkEntry, SinkRegistry};
pub use global_state::{
    enabled, is_quiet, level, register_callback, register_sink, register_stream_sink,
    set_console_sink, set_level, set_lock_hook, set_quiet, sink_count,
};
pub use lock_hook::{LockHook, SpinLockHook};
pub use dispatch::log;
pub use config::configure_from_env;
pub use sys::ConsoleWriter;

#[doc(hidden)]
pub mod hidden {
    pub use crate::global_state::reset_state;
}
