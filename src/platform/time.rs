//! Fixed-step frame clock

use crate::consts::MAX_SUBSTEPS;

/// Frame deltas above this are treated as a stall and clamped
const MAX_FRAME_DT: f32 = 0.1;

/// Converts variable display frame times into a bounded number of fixed ticks
#[derive(Debug, Clone)]
pub struct FrameClock {
    tick_dt: f32,
    accumulator: f32,
    max_substeps: u32,
}

impl FrameClock {
    pub fn new(tick_dt: f32) -> Self {
        Self {
            tick_dt,
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    /// Feed one display frame of `dt` seconds; returns how many ticks to run
    pub fn advance(&mut self, dt: f32) -> u32 {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= self.tick_dt && substeps < self.max_substeps {
            self.accumulator -= self.tick_dt;
            substeps += 1;
        }
        // Drop backlog we refused to simulate
        if substeps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.tick_dt);
        }
        substeps
    }

    /// Fraction of a tick left in the accumulator (for render interpolation)
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.tick_dt
    }
}
