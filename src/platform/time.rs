//! Fixed timestep accumulator
//!
//! Converts wall-clock frame time into whole simulation ticks.

use crate::consts::MAX_SUBSTEPS;

/// Longest frame accepted, in seconds. Anything longer (a debugger stop, a
/// suspended window) is treated as this.
pub const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct FixedStep {
    dt: f32,
    accumulator: f32,
}

impl FixedStep {
    pub fn new(tick_rate_hz: u32) -> Self {
        Self {
            dt: 1.0 / tick_rate_hz.max(1) as f32,
            accumulator: 0.0,
        }
    }

    /// Seconds per tick
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Unspent time carried into the next frame
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Add `elapsed` seconds and return how many ticks to run now
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        let elapsed = if elapsed.is_finite() {
            elapsed.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += elapsed;

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < MAX_SUBSTEPS {
            self.accumulator -= self.dt;
            substeps += 1;
        }

        // Drop whole ticks we could not catch up on
        if substeps == MAX_SUBSTEPS && self.accumulator >= self.dt {
            log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator %= self.dt;
        }
        substeps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
