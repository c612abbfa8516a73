//! Polling and snapshot settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default delay between samples in a wait.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Default snapshot capacity.
pub const DEFAULT_SNAPSHOT_CAPACITY: usize = 64;

/// Settings for [`KeyQuery`](crate::KeyQuery).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Delay between samples in a wait, in microseconds. Zero spins.
    pub poll_interval_us: u64,
    /// Entries requested by [`snapshot_default`](crate::KeyQuery::snapshot_default).
    pub snapshot_capacity: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            poll_interval_us: duration_micros(DEFAULT_POLL_INTERVAL),
            snapshot_capacity: DEFAULT_SNAPSHOT_CAPACITY,
        }
    }
}

impl QueryConfig {
    /// Delay between samples.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_micros(self.poll_interval_us)
    }

    /// Set the delay between samples.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_us = duration_micros(interval);
        self
    }

    /// Set the default snapshot capacity.
    pub fn with_snapshot_capacity(mut self, capacity: usize) -> Self {
        self.snapshot_capacity = capacity;
        self
    }
}

fn duration_micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}
