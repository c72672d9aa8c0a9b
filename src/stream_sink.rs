// SPDX-License-Identifier: MIT OR Apache-2.0

//! A sink that writes to any [`Write`] stream, typically a log file.
//!
//! Each event becomes one line:
//!
//! ```text
//! 2024-01-15 09:05:03 WARN  src/main.rs:42: disk low
//! ```
//!
//! The stream is flushed after every line; nothing is buffered across events.  Write errors are
//! swallowed, so a full disk silently loses lines rather than failing the caller.
//!
//! The sink never closes its stream.  Registered sinks live as long as the process, so a file
//! passed to [`register_stream_sink`](crate::register_stream_sink) stays open until exit.

use crate::log_event::LogEvent;
use crate::sink::Sink;
use std::fmt::Write as _;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

pub struct StreamSink<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> StreamSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /**
    Runs `f` with exclusive access to the stream.

    Handy for reading back an in-memory buffer, or syncing a file, while the sink is registered.

    ```
    use sinklog::{Level, LogEvent, Sink, StreamSink};

    let sink = StreamSink::new(Vec::new());
    # let now = chrono::Local::now();
    sink.emit(&LogEvent::new(Level::Error, "main.rs", 3, now, "fail"));
    let text = sink.with_stream(|buf| String::from_utf8_lossy(buf).into_owned());
    assert!(text.ends_with("ERROR main.rs:3: fail\n"));
    ```
    */
    pub fn with_stream<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut out)
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W> std::fmt::Debug for StreamSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamSink").finish_non_exhaustive()
    }
}

impl<W: Write + Send> Sink for StreamSink<W> {
    fn emit(&self, event: &LogEvent<'_>) {
        let line = render_stream_line(event);
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = out.write_all(line.as_bytes());
        let _ = out.flush();
    }
}

/// Renders one stream line, trailing newline included.
pub fn render_stream_line(event: &LogEvent<'_>) -> String {
    let mut line = String::with_capacity(64 + event.message().len());
    let _ = writeln!(
        line,
        "{} {:<5} {}:{}: {}",
        event.time().format("%Y-%m-%d %H:%M:%S"),
        event.level(),
        event.file(),
        event.line(),
        event.message()
    );
    line
}
