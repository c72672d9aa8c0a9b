// SPDX-License-Identifier: MIT OR Apache-2.0

//! Call-site macros.
//!
//! Each macro captures `file!()` and `line!()` at the call site and hands the message to
//! [`log`](crate::log) as `format_args!`, so the format string is checked at compile time and
//! nothing is formatted unless some destination admits the level.
//!
//! ```
//! let attempts = 3;
//! sinklog::debug!("retrying after {attempts} attempts");
//! sinklog::error!("boom {}", 7);
//! sinklog::log!(sinklog::Level::Fatal, "giving up");
//! ```

/// Logs at an explicit [`Level`](crate::Level).
#[macro_export]
macro_rules! log {
    ($level:expr, $($arg:tt)+) => {
        $crate::log(
            $level,
            ::core::file!(),
            ::core::line!(),
            ::core::format_args!($($arg)+),
        )
    };
}

#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Trace, $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Error, $($arg)+)
    };
}

/// Logs at [`Level::Fatal`](crate::Level::Fatal).  Does not abort; that is up to the caller.
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Fatal, $($arg)+)
    };
}
