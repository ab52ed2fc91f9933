//! Frame clock with fixed-timestep accumulator

use std::time::Instant;

/// Fixed simulation rate
pub const TICK_RATE: f64 = 60.0;
/// Longest frame time fed into the accumulator (seconds)
pub const MAX_FRAME_TIME: f64 = 0.1;
/// Most fixed steps run for a single frame
pub const MAX_STEPS_PER_FRAME: u32 = 4;

/// Converts presentation frame times into a number of fixed simulation
/// steps. A long frame is clamped to [`MAX_FRAME_TIME`] and never produces
/// more than [`MAX_STEPS_PER_FRAME`] steps; backlog beyond the cap is
/// discarded, a fraction of a step carries over.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Fixed timestep interval in seconds
    pub fixed_timestep: f64,
    accumulator: f64,
    last_instant: Option<Instant>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::with_tick_rate(TICK_RATE)
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tick_rate(hz: f64) -> Self {
        Self {
            fixed_timestep: 1.0 / hz,
            accumulator: 0.0,
            last_instant: None,
        }
    }

    /// Measure wall time since the previous call and return the number of
    /// steps due. The first call only starts the clock.
    pub fn tick(&mut self) -> u32 {
        let now = Instant::now();
        let Some(last) = self.last_instant.replace(now) else {
            return 0;
        };
        self.advance(now.duration_since(last).as_secs_f64())
    }

    /// Feed `elapsed` seconds of frame time and return the number of steps due
    pub fn advance(&mut self, elapsed: f64) -> u32 {
        let elapsed = if elapsed.is_finite() {
            elapsed.clamp(0.0, MAX_FRAME_TIME)
        } else {
            0.0
        };
        self.accumulator += elapsed;

        let mut steps = 0;
        while self.accumulator >= self.fixed_timestep && steps < MAX_STEPS_PER_FRAME {
            self.accumulator -= self.fixed_timestep;
            steps += 1;
        }
        if self.accumulator >= self.fixed_timestep {
            self.accumulator %= self.fixed_timestep;
        }
        steps
    }

    /// Fraction of a step currently carried over
    pub fn interpolation_alpha(&self) -> f64 {
        self.accumulator / self.fixed_timestep
    }
}
