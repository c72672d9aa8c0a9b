// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::log_event::LogEvent;
use crate::sink::Sink;
use crate::sys::ConsoleWriter;
use crate::{Level, config};
use std::fmt::Write as _;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

const ELLIPSIS: &str = "...";

/**
Layout options for console lines.

The [`Default`] comes from the build-time configuration, see [`config`](crate::config).
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConsoleFormat {
    /// Add a `[   pid]` field after the time.
    pub include_pid: bool,
    /// Colorize the level label and location with ANSI escapes, whatever the destination.
    /// Has no effect unless the `color` feature is on.
    pub use_color: bool,
    /// Right-align `file:line` in a field `location_width` wide, truncating on the left.
    pub align_location: bool,
    pub location_width: usize,
}

impl ConsoleFormat {
    /// No pid, no color, no alignment.
    pub const fn plain() -> Self {
        Self {
            include_pid: false,
            use_color: false,
            align_location: false,
            location_width: config::DEFAULT_LOCATION_WIDTH,
        }
    }
}

impl Default for ConsoleFormat {
    fn default() -> Self {
        Self {
            include_pid: config::INCLUDE_PID,
            use_color: config::USE_COLOR,
            align_location: config::ALIGN_LOCATION,
            location_width: config::LOCATION_WIDTH,
        }
    }
}

/**
The console sink.

Renders `HH:MM:SS [pid] LEVEL file:line: message`, one line per event, and flushes after
every line.  [`ConsoleSink::stderr`] is what the logger uses for its console path unless
replaced with [`set_console_sink`](crate::set_console_sink).
*/
pub struct ConsoleSink<W = ConsoleWriter> {
    format: ConsoleFormat,
    out: Mutex<W>,
}

impl ConsoleSink<ConsoleWriter> {
    pub fn stderr() -> Self {
        Self::new(ConsoleWriter::new())
    }
}

impl Default for ConsoleSink<ConsoleWriter> {
    fn default() -> Self {
        Self::stderr()
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    /// A console sink writing to `out` with the default [`ConsoleFormat`].
    pub fn new(out: W) -> Self {
        Self {
            format: ConsoleFormat::default(),
            out: Mutex::new(out),
        }
    }

    pub fn with_format(mut self, format: ConsoleFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format(&self) -> ConsoleFormat {
        self.format
    }

    /// Runs `f` with exclusive access to the destination.
    pub fn with_stream<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut out)
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W> std::fmt::Debug for ConsoleSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleSink")
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl<W: Write + Send> Sink for ConsoleSink<W> {
    fn emit(&self, event: &LogEvent<'_>) {
        let line = render_console_line(&self.format, event);
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        //best effort: a closed stderr shouldn't take the program down
        let _ = out.write_all(line.as_bytes());
        let _ = out.flush();
    }
}

/**
Renders one console line, trailing newline included.
*/
pub fn render_console_line(format: &ConsoleFormat, event: &LogEvent<'_>) -> String {
    let mut line = String::with_capacity(48 + event.message().len());
    let _ = write!(line, "{} ", event.time().format("%H:%M:%S"));
    if format.include_pid {
        let _ = write!(line, "[{:>6}] ", crate::sys::process_id());
    }

    let location = if format.align_location {
        align_location(event.file(), event.line(), format.location_width)
    } else {
        format!("{}:{}", event.file(), event.line())
    };

    if format.use_color {
        push_colored(&mut line, event.level(), &location);
    } else {
        let _ = write!(line, "{:<5} {}: ", event.level(), location);
    }

    line.push_str(event.message());
    line.push('\n');
    line
}

//escapes are written unconditionally: the destination is not necessarily stdout, so the
//tty and NO_COLOR checks `colored` applies to stdout don't apply here
#[cfg(feature = "color")]
fn push_colored(line: &mut String, level: Level, location: &str) {
    use colored::Color;
    let color = match level {
        Level::Trace => Color::BrightBlue,
        Level::Debug => Color::Cyan,
        Level::Info => Color::Green,
        Level::Warn => Color::Yellow,
        Level::Error => Color::Red,
        Level::Fatal => Color::Magenta,
    };
    let _ = write!(
        line,
        "\x1b[{}m{:<5}\x1b[0m \x1b[{}m{}:\x1b[0m ",
        color.to_fg_str(),
        level,
        Color::BrightBlack.to_fg_str(),
        location
    );
}

#[cfg(not(feature = "color"))]
fn push_colored(line: &mut String, level: Level, location: &str) {
    let _ = write!(line, "{:<5} {}: ", level, location);
}

/**
Fits `file:line` into exactly `width` columns.

Short locations are right-aligned with leading spaces.  Long ones lose their *prefix*, replaced
by `...`, so the line number always survives; if `width` is too narrow even for `...:line` the
result is wider than `width` rather than cutting the line number.
*/
pub(crate) fn align_location(file: &str, line: u32, width: usize) -> String {
    let text = format!("{file}:{line}");
    let len = text.chars().count();
    if len <= width {
        return format!("{text:>width$}");
    }
    let line_part = text.len() - file.len();
    let keep = width.saturating_sub(ELLIPSIS.len()).max(line_part);
    let skip = len - keep;
    let start = text
        .char_indices()
        .nth(skip)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    format!("{ELLIPSIS}{}", &text[start..])
}
