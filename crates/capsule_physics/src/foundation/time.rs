//! Time management utilities
//!
//! The physics core is stepped with a fixed `delta_time`. [`FixedTimestep`]
//! converts variable frame times into a whole number of such steps.

use std::time::Duration;

/// Upper bound on steps consumed from a single frame
///
/// A long stall (debugger, window drag) would otherwise schedule hundreds of
/// catch-up steps in one frame.
const MAX_STEPS_PER_FRAME: u32 = 8;

/// Fixed-timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
    total_steps: u64,
}

impl FixedTimestep {
    /// Create an accumulator producing steps of `step` seconds
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
            total_steps: 0,
        }
    }

    /// Create an accumulator ticking `hz` times per second
    pub fn from_hz(hz: f32) -> Self {
        Self::new(1.0 / hz)
    }

    /// Length of one step in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add elapsed frame time and return how many fixed steps are due
    pub fn advance(&mut self, frame_time: f32) -> u32 {
        self.accumulator += frame_time.max(0.0);

        let mut due = 0;
        while self.accumulator >= self.step && due < MAX_STEPS_PER_FRAME {
            self.accumulator -= self.step;
            due += 1;
        }
        if due == MAX_STEPS_PER_FRAME && self.accumulator >= self.step {
            log::warn!(
                "Dropping {:.3}s of simulation time after a long frame",
                self.accumulator
            );
            self.accumulator = 0.0;
        }

        self.total_steps += u64::from(due);
        due
    }

    /// Fraction of a step left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }

    /// Total number of steps produced so far
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Simulated time covered by the produced steps
    pub fn simulated_time(&self) -> Duration {
        Duration::from_secs_f64(f64::from(self.step) * self.total_steps as f64)
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::from_hz(60.0)
    }
}
