//! Platform timing
//!
//! The simulation never reads a clock itself. The host measures the wall
//! time between frames here and hands the clamped delta to `tick`, so a
//! backgrounded or stalled process cannot push the ball through a brick.

use std::time::{Duration, Instant};

use crate::consts::MAX_FRAME_DELTA;
use crate::sim::clamp_frame_delta;

/// Wall-clock frame timer with a delta cap
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    max_delta: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DELTA)
    }
}

impl FrameClock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            last: Instant::now(),
            max_delta,
        }
    }

    /// Seconds since the previous frame, clamped to `max_delta`
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Same as `tick`, with the current time supplied by the caller
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;

        let raw = elapsed.as_secs_f32();
        let delta = clamp_frame_delta(raw, self.max_delta);
        if delta < raw {
            log::debug!("frame took {:.3}s, capped at {:.3}s", raw, delta);
        }
        delta
    }

    /// Forget the time spent away, e.g. after a pause
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    pub fn max_delta(&self) -> Duration {
        Duration::from_secs_f32(self.max_delta.max(0.0))
    }
}
