// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end behavior of `log` through the public API.

use sinklog::hidden::reset_state;
use sinklog::{ConsoleFormat, ConsoleSink, InMemorySink, Level, LogEvent};
use std::sync::{Arc, Mutex, MutexGuard};

static TEST_LOGGER_GUARD: Mutex<()> = Mutex::new(());

fn fresh_logger() -> MutexGuard<'static, ()> {
    let guard = TEST_LOGGER_GUARD
        .lock()
        .unwrap_or_else(|e| e.into_inner());
    reset_state();
    guard
}

fn capture_console() -> Arc<ConsoleSink<Vec<u8>>> {
    let console = Arc::new(ConsoleSink::new(Vec::new()).with_format(ConsoleFormat::plain()));
    sinklog::set_console_sink(console.clone());
    console
}

fn console_lines(console: &ConsoleSink<Vec<u8>>) -> Vec<String> {
    console.with_stream(|buf| {
        String::from_utf8_lossy(buf)
            .lines()
            .map(str::to_string)
            .collect()
    })
}

#[test]
fn sink_fires_only_at_or_above_its_threshold() {
    let _guard = fresh_logger();
    sinklog::set_quiet(true);
    for threshold in Level::ALL {
        let sink = Arc::new(InMemorySink::new());
        sinklog::register_sink(sink.clone(), threshold).unwrap();
        for level in Level::ALL {
            sinklog::log!(level, "probe");
            let expected = usize::from(level >= threshold);
            assert_eq!(
                sink.drain_logs().lines().count(),
                expected,
                "threshold {threshold:?}, emitted {level:?}"
            );
        }
    }
}

#[test]
fn quiet_mutes_console_but_not_sinks() {
    let _guard = fresh_logger();
    let console = capture_console();
    let sink = Arc::new(InMemorySink::new());
    sinklog::register_sink(sink.clone(), Level::Trace).unwrap();

    sinklog::set_quiet(true);
    sinklog::fatal!("muted");
    assert!(console_lines(&console).is_empty());
    assert_eq!(sink.len(), 1);

    sinklog::set_quiet(false);
    sinklog::fatal!("audible");
    let lines = console_lines(&console);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("audible"));
    assert_eq!(sink.len(), 2);
}

#[test]
fn console_threshold_example() {
    let _guard = fresh_logger();
    let console = capture_console();
    sinklog::set_level(Level::Warn);

    sinklog::trace!("x");
    sinklog::info!("x");
    assert!(console_lines(&console).is_empty());

    sinklog::warn!("x");
    let lines = console_lines(&console);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with('x'));
    assert!(lines[0].contains(" WARN "));
    assert!(lines[0].contains("tests/dispatch.rs:"));

    sinklog::error!("boom {}", 7);
    let lines = console_lines(&console);
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("ERROR"));
    assert!(lines[1].contains("boom 7"));
}

#[test]
fn stream_sink_example() {
    let _guard = fresh_logger();
    sinklog::set_quiet(true);
    let stream = sinklog::register_stream_sink(Vec::new(), Level::Error).unwrap();

    sinklog::info!("ignored");
    sinklog::error!("fail");

    let text = stream.with_stream(|buf| String::from_utf8(buf.clone()).unwrap());
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with(": fail"));
    assert!(lines[0].contains("ERROR tests/dispatch.rs:"));
    // YYYY-MM-DD HH:MM:SS prefix
    let (date, rest) = lines[0].split_at(10);
    assert_eq!(date.as_bytes()[4], b'-');
    assert_eq!(&rest[..1], " ");
    assert_eq!(rest.as_bytes()[3], b':');
}

#[test]
fn each_call_reads_the_clock() {
    let _guard = fresh_logger();
    sinklog::set_quiet(true);
    let times = Arc::new(Mutex::new(Vec::new()));
    let seen = times.clone();
    sinklog::register_callback(
        move |event: &LogEvent<'_>| seen.lock().unwrap().push(event.time()),
        Level::Trace,
    )
    .unwrap();

    sinklog::info!("first");
    std::thread::sleep(std::time::Duration::from_millis(10));
    sinklog::info!("second");

    let times = times.lock().unwrap();
    assert_eq!(times.len(), 2);
    assert!(times[1] > times[0]);
}

#[test]
fn same_sink_registered_twice_fires_twice() {
    let _guard = fresh_logger();
    sinklog::set_quiet(true);
    let sink = Arc::new(InMemorySink::new());
    sinklog::register_sink(sink.clone(), Level::Info).unwrap();
    sinklog::register_sink(sink.clone(), Level::Error).unwrap();

    sinklog::warn!("once");
    sinklog::error!("twice");
    assert_eq!(sink.lines().len(), 3);
    assert_eq!(sinklog::sink_count(), 2);
}

#[test]
fn registration_order_is_delivery_order() {
    let _guard = fresh_logger();
    sinklog::set_quiet(true);
    let order = Arc::new(Mutex::new(Vec::new()));
    for id in 0..4 {
        let order = order.clone();
        sinklog::register_callback(
            move |_: &LogEvent<'_>| order.lock().unwrap().push(id),
            Level::Trace,
        )
        .unwrap();
    }
    sinklog::debug!("go");
    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3]);
}

#[test]
fn sink_may_log_from_inside_emit() {
    let _guard = fresh_logger();
    sinklog::set_quiet(true);
    let sink = Arc::new(InMemorySink::new());
    sinklog::register_callback(
        |event: &LogEvent<'_>| {
            if event.level() == Level::Error {
                sinklog::info!("forwarded: {}", event.message());
            }
        },
        Level::Error,
    )
    .unwrap();
    sinklog::register_sink(sink.clone(), Level::Trace).unwrap();

    sinklog::error!("original");
    let lines = sink.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("forwarded: original"));
    assert!(lines[1].ends_with("original"));
}
