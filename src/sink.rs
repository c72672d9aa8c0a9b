//SPDX-License-Identifier: MIT OR Apache-2.0
use crate::log_event::LogEvent;
use std::fmt::Debug;

pub trait Sink: Debug + Send + Sync {
    /**
        Renders the event to this sink's destination.

        Delivery is best-effort: a sink that cannot write should drop the event quietly rather
        than panic, since the dispatcher keeps going to the remaining sinks either way.
    */
    fn emit(&self, event: &LogEvent<'_>);
}

/**
A sink backed by a closure.

Whatever the closure captures plays the role of the sink's context.

```
use sinklog::{CallbackSink, Level, LogEvent, Sink};
use std::sync::atomic::{AtomicUsize, Ordering};

let seen = AtomicUsize::new(0);
let sink = CallbackSink::new(|event: &LogEvent<'_>| {
    if event.level() >= Level::Error {
        seen.fetch_add(1, Ordering::Relaxed);
    }
});
# let now = chrono::Local::now();
sink.emit(&LogEvent::new(Level::Error, "main.rs", 1, now, "boom"));
assert_eq!(seen.load(Ordering::Relaxed), 1);
```
*/
pub struct CallbackSink<F> {
    callback: F,
}

impl<F> CallbackSink<F>
where
    F: Fn(&LogEvent<'_>) + Send + Sync,
{
    pub const fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> Debug for CallbackSink<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackSink").finish_non_exhaustive()
    }
}

impl<F> Sink for CallbackSink<F>
where
    F: Fn(&LogEvent<'_>) + Send + Sync,
{
    fn emit(&self, event: &LogEvent<'_>) {
        (self.callback)(event)
    }
}

/*
Boilerplate notes.

# Sink

Clone on a sink doesn't make sense, it usually owns a destination.  Share it with Arc instead.
PartialEq/Eq: data equality vs. "same destination" is ambiguous, skip.
Default: a sink needs a destination, so no.

# CallbackSink

Debug is implemented by hand since closures aren't Debug.
Clone could be conditional on F: Clone but nothing needs it.
*/
