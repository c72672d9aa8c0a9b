// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide logger state.
//!
//! There is exactly one logger per process.  It starts out as: console threshold
//! [`Level::Trace`], console not muted, no lock hook, console path writing to stderr, no
//! registered sinks.  It changes only through the functions in this module and is never torn
//! down.
//!
//! # Thread Safety
//!
//! The state sits behind a spinlock so that reads and writes are memory-safe from any thread,
//! but the lock is only held long enough to copy or update a field.  It is never held while a
//! sink runs.  Whole-dispatch serialization is opt-in via [`set_lock_hook`].
//!
//! The setters here are not bracketed by the lock hook.  A setter called while another thread is
//! inside [`log`](crate::log) takes effect for that thread's *next* call at the latest.
//!
//! # Examples
//!
//! ```
//! use sinklog::{Level, register_stream_sink, set_level};
//!
//! set_level(Level::Warn);
//! let file = register_stream_sink(Vec::new(), Level::Error).unwrap();
//!
//! sinklog::info!("dropped everywhere");
//! sinklog::error!("fail");
//!
//! let text = file.with_stream(|buf| String::from_utf8_lossy(buf).into_owned());
//! assert_eq!(text.lines().count(), 1);
//! assert!(text.ends_with("fail\n"));
//! ```

use crate::console_sink::ConsoleSink;
use crate::error::RegisterError;
use crate::lock_hook::LockHook;
use crate::log_event::LogEvent;
use crate::registry::{SinkEntry, SinkRegistry};
use crate::sink::{CallbackSink, Sink};
use crate::spinlock::Spinlock;
use crate::stream_sink::StreamSink;
use crate::Level;
use std::io::Write;
use std::sync::{Arc, OnceLock};

struct LoggerState {
    level: Level,
    quiet: bool,
    lock_hook: Option<Arc<dyn LockHook>>,
    console: Arc<dyn Sink>,
    registry: SinkRegistry,
}

impl LoggerState {
    fn admits(&self, level: Level) -> bool {
        (!self.quiet && level >= self.level)
            || self.registry.lowest_level().is_some_and(|lowest| level >= lowest)
    }

    fn new() -> Self {
        Self {
            level: Level::Trace,
            quiet: false,
            lock_hook: None,
            console: Arc::new(ConsoleSink::stderr()),
            registry: SinkRegistry::new(),
        }
    }
}

static STATE: OnceLock<Spinlock<LoggerState>> = OnceLock::new();

fn state() -> &'static Spinlock<LoggerState> {
    STATE.get_or_init(|| Spinlock::new(LoggerState::new()))
}

/// What one dispatch sees of the configuration.
pub(crate) struct Snapshot {
    pub(crate) level: Level,
    pub(crate) quiet: bool,
    pub(crate) console: Arc<dyn Sink>,
    pub(crate) sinks: Arc<Vec<SinkEntry>>,
}

/// `None` when no destination admits `level`, so a filtered call clones nothing.
pub(crate) fn snapshot(level: Level) -> Option<Snapshot> {
    state().with(|state| {
        state.admits(level).then(|| Snapshot {
            level: state.level,
            quiet: state.quiet,
            console: state.console.clone(),
            sinks: state.registry.snapshot(),
        })
    })
}

pub(crate) fn lock_hook() -> Option<Arc<dyn LockHook>> {
    state().with(|state| state.lock_hook.clone())
}

/// Sets the console threshold.  Registered sinks keep their own thresholds.
pub fn set_level(level: Level) {
    state().with_mut(|state| state.level = level);
}

/// The console threshold.
pub fn level() -> Level {
    state().with(|state| state.level)
}

/// Mutes (`true`) or unmutes the console path.  Registered sinks are unaffected.
pub fn set_quiet(quiet: bool) {
    state().with_mut(|state| state.quiet = quiet);
}

pub fn is_quiet() -> bool {
    state().with(|state| state.quiet)
}

/**
Installs or removes the hook bracketing every dispatch.

A dispatch that already started keeps using the hook it acquired, so its `release` always
pairs with its `acquire` even if the hook is swapped concurrently.
*/
pub fn set_lock_hook(hook: Option<Arc<dyn LockHook>>) {
    state().with_mut(|state| state.lock_hook = hook);
}

/**
Replaces the console path's sink.

The console path is not a registry entry: it is governed by [`set_level`] and [`set_quiet`]
and does not count against [`MAX_SINKS`](crate::MAX_SINKS).  Use this to redirect the console
to another stream or restyle it with a [`ConsoleFormat`](crate::ConsoleFormat).
*/
pub fn set_console_sink(sink: Arc<dyn Sink>) {
    state().with_mut(|state| state.console = sink);
}

/**
Registers a sink receiving every event at or above `min_level`.

The registry holds a reference; the caller may keep its own `Arc` to inspect the sink later.

# Errors

[`RegisterError::CapacityExceeded`] when [`MAX_SINKS`](crate::MAX_SINKS) sinks are already
registered.  Nothing is registered in that case.
*/
pub fn register_sink(sink: Arc<dyn Sink>, min_level: Level) -> Result<(), RegisterError> {
    state().with_mut(|state| state.registry.register(sink, min_level))
}

/**
Registers a closure as a sink.

# Errors

[`RegisterError::CapacityExceeded`] when the registry is full.
*/
pub fn register_callback<F>(callback: F, min_level: Level) -> Result<(), RegisterError>
where
    F: Fn(&LogEvent<'_>) + Send + Sync + 'static,
{
    register_sink(Arc::new(CallbackSink::new(callback)), min_level)
}

/**
Registers a stream, typically an open log file, as a sink.

Returns the [`StreamSink`] so the caller can still reach its stream.

# Errors

[`RegisterError::CapacityExceeded`] when the registry is full.  The stream is dropped in that
case.
*/
pub fn register_stream_sink<W>(
    stream: W,
    min_level: Level,
) -> Result<Arc<StreamSink<W>>, RegisterError>
where
    W: Write + Send + 'static,
{
    let sink = Arc::new(StreamSink::new(stream));
    register_sink(sink.clone(), min_level)?;
    Ok(sink)
}

/// Number of registered sinks, the console path excluded.
pub fn sink_count() -> usize {
    state().with(|state| state.registry.len())
}

/**
Whether an event at `level` would reach any destination right now.

Useful to skip computing expensive arguments.  The logging macros don't consult it: they always
dispatch, so the lock hook runs for every call.
*/
pub fn enabled(level: Level) -> bool {
    state().with(|state| state.admits(level))
}

#[cfg(test)]
pub(crate) static TEST_STATE_GUARD: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Puts the logger back into its initial state.  For test isolation.
#[doc(hidden)]
pub fn reset_state() {
    let fresh = LoggerState::new();
    //drop the old state outside the spinlock, sinks may do I/O on drop
    let old = state().with_mut(|state| std::mem::replace(state, fresh));
    drop(old);
}
