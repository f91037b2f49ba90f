//! The single driver of the simulation.

use tracing::{error, trace};

use crate::controller::GameController;
use crate::formatter;

/// Feeds ticks to a [`GameController`].
///
/// A tick that fails halts the clock for good: there is no rollback, and the state the failed tick
/// left behind is never simulated further.
#[derive(Debug)]
pub struct GameClock {
    controller: GameController,
    ticks: u64,
    halted: bool,
}

impl GameClock {
    pub fn new(controller: GameController) -> Self {
        Self {
            controller,
            ticks: 0,
            halted: false,
        }
    }

    /// Advances the whole simulation by one tick. Returns false if the clock is halted.
    pub fn advance_one_tick(&mut self) -> bool {
        if self.halted {
            return false;
        }

        formatter::increment_tick();
        match self.controller.update() {
            Ok(()) => {
                self.ticks += 1;
                trace!(tick = self.ticks, phase = %self.controller.current_phase(), "Tick");
                true
            }
            Err(e) => {
                error!(error = %e, tick = self.ticks, phase = %self.controller.current_phase(), "Simulation halted");
                self.halted = true;
                false
            }
        }
    }

    /// Advances up to `ticks` ticks, stopping early if the clock halts. Returns the ticks run.
    pub fn run_for(&mut self, ticks: u64) -> u64 {
        let mut run = 0;
        while run < ticks && self.advance_one_tick() {
            run += 1;
        }
        run
    }

    /// Ticks completed successfully.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut GameController {
        &mut self.controller
    }

    pub fn into_controller(self) -> GameController {
        self.controller
    }
}
