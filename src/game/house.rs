//! Decides when locked ghosts may leave the house.
//!
//! The ghost that is released next is always the first locked one in ID order. It leaves when its
//! personal dot counter reaches its limit or, after a life was lost, when the global dot counter
//! reaches the ghost's global limit. If Pac-Man stops eating for too long, it is forced out.

use tracing::debug;

use crate::actor::ghost::GhostId;
use crate::game::tables::{house_dot_limits, starvation_ticks, GLOBAL_DOT_LIMITS};

/// Why a ghost was allowed to leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseReason {
    PersonalDotLimit,
    GlobalDotLimit,
    Starvation,
}

#[derive(Debug, Clone)]
pub struct HouseControl {
    dot_limits: [u32; 4],
    dot_counters: [u32; 4],
    global_counter: Option<u32>,
    starving_ticks: u32,
    starvation_limit: u32,
}

impl HouseControl {
    pub fn new(level_number: u32) -> Self {
        Self {
            dot_limits: house_dot_limits(level_number),
            dot_counters: [0; 4],
            global_counter: None,
            starving_ticks: 0,
            starvation_limit: starvation_ticks(level_number),
        }
    }

    pub fn dot_counter(&self, ghost: GhostId) -> u32 {
        self.dot_counters[ghost.index()]
    }

    pub fn global_counter(&self) -> Option<u32> {
        self.global_counter
    }

    /// Counts eaten food for the ghost that would be released next.
    pub fn on_food_eaten(&mut self, next_locked: Option<GhostId>) {
        self.starving_ticks = 0;
        match self.global_counter.as_mut() {
            Some(counter) => *counter += 1,
            None => {
                if let Some(ghost) = next_locked {
                    self.dot_counters[ghost.index()] += 1;
                }
            }
        }
    }

    /// Switches to the global counter, which stays in use until the orange ghost leaves by it.
    pub fn on_life_lost(&mut self) {
        self.global_counter = Some(0);
        self.starving_ticks = 0;
    }

    /// Advances the starvation clock and decides whether `next_locked` leaves now.
    pub fn update(&mut self, next_locked: Option<GhostId>) -> Option<(GhostId, ReleaseReason)> {
        self.starving_ticks += 1;
        let ghost = next_locked?;

        if let Some(counter) = self.global_counter {
            if counter >= GLOBAL_DOT_LIMITS[ghost.index()] {
                if ghost == GhostId::Orange {
                    self.global_counter = None;
                }
                return Some(self.release(ghost, ReleaseReason::GlobalDotLimit));
            }
        } else if self.dot_counters[ghost.index()] >= self.dot_limits[ghost.index()] {
            return Some(self.release(ghost, ReleaseReason::PersonalDotLimit));
        }

        if self.starving_ticks >= self.starvation_limit {
            return Some(self.release(ghost, ReleaseReason::Starvation));
        }
        None
    }

    fn release(&mut self, ghost: GhostId, reason: ReleaseReason) -> (GhostId, ReleaseReason) {
        self.starving_ticks = 0;
        debug!(ghost = %ghost, ?reason, "Ghost may leave the house");
        (ghost, reason)
    }
}
