//! Recurring spawn timer
//!
//! Lives inside scene state and is advanced by the tick, so it can never
//! fire after the frame loop has stopped.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    /// Seconds between firings
    pub period: f32,
    /// Seconds accumulated since the last firing
    pub elapsed: f32,
}

impl SpawnTimer {
    pub fn new(period: f32) -> Self {
        Self { period, elapsed: 0.0 }
    }

    /// Advance by `dt` seconds; true if at least one period boundary was crossed
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.period <= 0.0 || self.elapsed < self.period {
            return false;
        }
        self.elapsed %= self.period;
        true
    }
}
