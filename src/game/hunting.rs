//! The scatter/chase schedule of a level.

use strum_macros::{AsRefStr, Display};
use tracing::debug;

use crate::game::tables::{hunting_durations, HUNTING_PHASE_COUNT};
use crate::timer::{TickDuration, TickTimer};

/// What hunting ghosts aim at during a hunting phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum HuntingKind {
    /// Ghosts head for their corners.
    Scatter,
    /// Ghosts pursue Pac-Man.
    Chase,
}

impl HuntingKind {
    /// Even phases scatter, odd phases chase.
    pub fn of_index(index: u8) -> Self {
        if index % 2 == 0 {
            Self::Scatter
        } else {
            Self::Chase
        }
    }
}

/// A single scatter or chase interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuntingPhase {
    pub kind: HuntingKind,
    pub index: u8,
    pub duration: TickDuration,
}

/// Runs the hunting phases of one level.
///
/// The timer never advances to the next phase on its own: the owner checks [`HuntingTimer::has_expired`]
/// and starts the following phase.
#[derive(Debug, Clone)]
pub struct HuntingTimer {
    level_number: u32,
    phase: Option<HuntingPhase>,
    timer: TickTimer,
}

impl HuntingTimer {
    pub fn new(level_number: u32) -> Self {
        Self {
            level_number,
            phase: None,
            timer: TickTimer::default(),
        }
    }

    /// Starts the hunting phase with the given index, clamped to the last phase of the table.
    pub fn start_hunting_phase(&mut self, index: u8) -> HuntingPhase {
        let index = index.min(HUNTING_PHASE_COUNT as u8 - 1);
        let phase = HuntingPhase {
            kind: HuntingKind::of_index(index),
            index,
            duration: hunting_durations(self.level_number)[index as usize],
        };
        self.timer.restart(phase.duration);
        self.phase = Some(phase);
        debug!(level = self.level_number, index, kind = %phase.kind, duration = ?phase.duration, "Hunting phase started");
        phase
    }

    /// Starts the phase after the current one, or the first phase if none was started yet.
    pub fn start_next_phase(&mut self) -> HuntingPhase {
        let next = self.phase.map_or(0, |phase| phase.index.saturating_add(1));
        self.start_hunting_phase(next)
    }

    pub fn tick(&mut self) {
        self.timer.tick();
    }

    /// Pauses the current phase, keeping its progress.
    pub fn stop(&mut self) {
        self.timer.stop();
    }

    /// Forgets the current phase; the next start begins from scratch.
    pub fn reset(&mut self) {
        self.phase = None;
        self.timer = TickTimer::default();
    }

    pub fn has_expired(&self) -> bool {
        self.timer.has_expired()
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// True once a phase was started and the timer is not currently running.
    pub fn is_stopped(&self) -> bool {
        self.phase.is_some() && self.timer.is_stopped()
    }

    pub fn phase(&self) -> Option<HuntingPhase> {
        self.phase
    }

    pub fn phase_index(&self) -> Option<u8> {
        self.phase.map(|phase| phase.index)
    }

    pub fn current_kind(&self) -> Option<HuntingKind> {
        self.phase.map(|phase| phase.kind)
    }

    pub fn in_scatter_phase(&self) -> bool {
        self.current_kind() == Some(HuntingKind::Scatter)
    }

    pub fn in_chase_phase(&self) -> bool {
        self.current_kind() == Some(HuntingKind::Chase)
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    pub fn level_number(&self) -> u32 {
        self.level_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_is_clamped() {
        let mut timer = HuntingTimer::new(1);
        let phase = timer.start_hunting_phase(200);
        assert_eq!(phase.index, HUNTING_PHASE_COUNT as u8 - 1);
        assert_eq!(phase.kind, HuntingKind::Chase);
        assert!(phase.duration.is_indefinite());
    }

    #[test]
    fn test_does_not_auto_advance() {
        let mut timer = HuntingTimer::new(5);
        timer.start_hunting_phase(6);
        timer.tick();
        assert!(timer.has_expired());
        timer.tick();
        assert_eq!(timer.phase_index(), Some(6));
    }
}
