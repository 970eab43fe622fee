//! Frame loop bookkeeping for the browser driver
//!
//! Tracks the last animation timestamp and whether the loop has been stopped
//! by the page going away.

use crate::consts::FRAME_DT;

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    /// Last `requestAnimationFrame` timestamp in ms, 0 when there is none
    last_time: f64,
    stopped: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Seconds since the previous frame; one reference frame for the first
    pub fn delta(&mut self, time: f64) -> f32 {
        let dt = if self.last_time > 0.0 {
            ((time - self.last_time) / 1000.0) as f32
        } else {
            FRAME_DT
        };
        self.last_time = time;
        dt
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Page shown again. Returns true when the loop must be restarted, which
    /// only happens for a page restored from the back/forward cache after a stop.
    pub fn resume(&mut self, persisted: bool) -> bool {
        if !persisted || !self.stopped {
            return false;
        }
        self.stopped = false;
        // Time spent in the cache is not animation time
        self.last_time = 0.0;
        true
    }
}
