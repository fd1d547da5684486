//! Fixed-timestep driver for hosts with a variable frame rate.
//!
//! Wall-clock time accumulates between frames; the world advances in whole
//! 1/60 s steps and is drawn once per frame however many steps ran.

use std::time::Duration;

use skyraid_core::constants::TIME_PER_FRAME;
use skyraid_core::render::RenderTarget;

use crate::world::World;

/// Converts elapsed wall-clock time into a number of fixed steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTimestep {
    step: Duration,
    accumulator: Duration,
    /// Most steps run for a single frame. Time beyond that is dropped.
    max_steps: usize,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(TIME_PER_FRAME, 8)
    }
}

impl FixedTimestep {
    pub fn new(step: Duration, max_steps: usize) -> Self {
        assert!(!step.is_zero(), "a fixed timestep cannot be zero");
        Self {
            step,
            accumulator: Duration::ZERO,
            max_steps,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Add `elapsed` and return how many steps are due.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        self.accumulator += elapsed;
        let mut steps = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            steps += 1;
        }

        if steps > self.max_steps {
            // Too far behind; reset to avoid a catch-up spiral.
            self.accumulator = Duration::ZERO;
            steps = self.max_steps;
        }
        steps
    }
}

/// Run every step due after `elapsed`, then draw once.
/// Returns the number of steps run.
pub fn run_frame(
    world: &mut World,
    timestep: &mut FixedTimestep,
    elapsed: Duration,
    target: &mut dyn RenderTarget,
) -> usize {
    let steps = timestep.advance(elapsed);
    for _ in 0..steps {
        world.update(timestep.step());
    }
    world.draw(target);
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_accumulate_across_frames() {
        let mut timestep = FixedTimestep::new(Duration::from_millis(10), 8);
        assert_eq!(timestep.advance(Duration::from_millis(25)), 2);
        assert_eq!(timestep.advance(Duration::from_millis(5)), 1, "leftover 5ms carries over");
        assert_eq!(timestep.advance(Duration::from_millis(9)), 0);
    }

    #[test]
    fn long_stall_is_capped() {
        let mut timestep = FixedTimestep::new(Duration::from_millis(10), 4);
        assert_eq!(timestep.advance(Duration::from_secs(1)), 4);
        assert_eq!(timestep.advance(Duration::from_millis(10)), 1, "backlog was dropped");
    }
}
