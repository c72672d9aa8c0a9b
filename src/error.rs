// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types.
//!
//! Dispatch itself never fails from the caller's point of view; the only failure a caller
//! observes is a registration that does not fit in the sink registry.

/// Registering a sink failed.  The registry is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
    #[error("sink registry is full ({capacity} sinks)")]
    CapacityExceeded { capacity: usize },
}

/// The text did not name a [`Level`](crate::Level).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level {input:?}")]
pub struct ParseLevelError {
    input: String,
}

impl ParseLevelError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    /// The rejected text.
    pub fn input(&self) -> &str {
        &self.input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = RegisterError::CapacityExceeded { capacity: 32 };
        assert_eq!(err.to_string(), "sink registry is full (32 sinks)");
        let err = ParseLevelError::new("loud");
        assert_eq!(err.to_string(), "unknown log level \"loud\"");
    }
}
