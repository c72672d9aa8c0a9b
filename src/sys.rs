// SPDX-License-Identifier: MIT OR Apache-2.0

//! Platform glue for native and WebAssembly targets.
//!
//! On native platforms the console path writes to the process's standard error stream.  In a
//! browser there is no stderr, so [`ConsoleWriter`] collects each line and hands it to
//! `console.log` when flushed.

use chrono::{DateTime, Local};
use std::io::{self, Write};

pub(crate) fn now() -> DateTime<Local> {
    Local::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn process_id() -> u32 {
    std::process::id()
}

//no pids in the browser
#[cfg(target_arch = "wasm32")]
pub(crate) fn process_id() -> u32 {
    0
}

/**
The default console destination.

Writes go to stderr on native targets and to the browser console on `wasm32`.
*/
#[derive(Debug, Default)]
pub struct ConsoleWriter {
    #[cfg(target_arch = "wasm32")]
    pending: Vec<u8>,
}

impl ConsoleWriter {
    pub const fn new() -> Self {
        Self {
            #[cfg(target_arch = "wasm32")]
            pending: Vec::new(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        io::stderr().lock().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

#[cfg(target_arch = "wasm32")]
impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let text = String::from_utf8_lossy(&self.pending);
        let text = text.strip_suffix('\n').unwrap_or(&text);
        web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(text));
        self.pending.clear();
        Ok(())
    }
}
