// SPDX-License-Identifier: MIT OR Apache-2.0

//! The bounded, append-only list of registered sinks.
//!
//! Entries are kept in registration order and never removed.  The same sink may be registered
//! several times; each registration is an independent entry with its own threshold.
//!
//! Capacity is fixed at [`MAX_SINKS`] so that a misbehaving caller registering in a loop cannot
//! grow the logger without bound.  A registration past capacity fails with
//! [`RegisterError::CapacityExceeded`] and leaves the registry untouched.

use crate::error::RegisterError;
use crate::sink::Sink;
use crate::Level;
use std::sync::Arc;

/// How many sinks the process-wide registry accepts.
pub const MAX_SINKS: usize = 32;

/// One registration: a sink and the lowest level it admits.
#[derive(Debug, Clone)]
pub struct SinkEntry {
    sink: Arc<dyn Sink>,
    min_level: Level,
}

impl SinkEntry {
    pub fn new(sink: Arc<dyn Sink>, min_level: Level) -> Self {
        Self { sink, min_level }
    }

    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }

    pub fn admits(&self, level: Level) -> bool {
        level >= self.min_level
    }
}

/**
Append-only sink list with a fixed capacity.

Entries sit behind an `Arc` so a dispatch can take a snapshot with one reference-count bump
while registration goes on elsewhere; registering copies the list only if a snapshot is still
alive.
*/
#[derive(Debug, Clone)]
pub struct SinkRegistry {
    entries: Arc<Vec<SinkEntry>>,
    capacity: usize,
    lowest: Option<Level>,
}

impl SinkRegistry {
    pub fn new() -> Self {
        Self::with_capacity(MAX_SINKS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Vec::new()),
            capacity,
            lowest: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    /// Appends an entry, or fails without touching the registry when it is full.
    pub fn register(&mut self, sink: Arc<dyn Sink>, min_level: Level) -> Result<(), RegisterError> {
        if self.is_full() {
            return Err(RegisterError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        Arc::make_mut(&mut self.entries).push(SinkEntry::new(sink, min_level));
        self.lowest = Some(self.lowest.map_or(min_level, |lowest| lowest.min(min_level)));
        Ok(())
    }

    /// A cheap, immutable view of the current entries in registration order.
    pub fn snapshot(&self) -> Arc<Vec<SinkEntry>> {
        self.entries.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SinkEntry> {
        self.entries.iter()
    }

    /// The lowest threshold of any entry, or `None` when empty.
    pub fn lowest_level(&self) -> Option<Level> {
        self.lowest
    }
}

impl Default for SinkRegistry {
    fn default() -> Self {
        Self::new()
    }
}
