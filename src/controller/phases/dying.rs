use tracing::debug;

use crate::controller::{GamePhase, GameState, Transition};
use crate::error::{GameError, GameResult};
use crate::events::GameEvent;
use crate::game::variant::PhaseDurations;
use crate::game::GameModel;
use crate::timer::{TickDuration, TickTimer};

/// Short freeze showing the bounty of the ghosts just eaten.
#[derive(Debug, Default)]
pub struct GhostDyingState {
    timer: TickTimer,
}

impl GameState for GhostDyingState {
    phase_timer!(GamePhase::GhostDying);

    fn on_enter(&mut self, model: &mut GameModel) -> GameResult<()> {
        model.require_level_mut()?.pac_mut().set_visible(false);
        self.timer.restart(TickDuration::Ticks(model.rules().durations.ghost_dying));
        Ok(())
    }

    fn on_update(&mut self, _model: &mut GameModel) -> GameResult<Option<Transition>> {
        Ok(self.timer.has_expired().then_some(Transition::ResumePrevious))
    }

    fn on_exit(&mut self, model: &mut GameModel) -> GameResult<()> {
        if let Some(level) = model.level.as_mut() {
            level.pac_mut().set_visible(true);
            level.start_ghosts_returning(&mut model.events);
        }
        Ok(())
    }
}

/// Pac-Man was caught. The life is taken when the sequence ends.
#[derive(Debug, Default)]
pub struct PacmanDyingState {
    timer: TickTimer,
}

impl PacmanDyingState {
    /// True while the death animation plays.
    pub fn is_animating(&self, durations: &PhaseDurations) -> bool {
        self.timer.elapsed() >= durations.pac_dying_animation && !self.timer.has_expired()
    }
}

impl GameState for PacmanDyingState {
    phase_timer!(GamePhase::PacmanDying);

    fn on_enter(&mut self, model: &mut GameModel) -> GameResult<()> {
        let level = model.level.as_mut().ok_or(GameError::NoLevel)?;
        level.stop_all();
        model.events.publish(GameEvent::StopAllSounds);
        model.events.publish(GameEvent::PacDying);
        self.timer.restart(TickDuration::Ticks(model.rules().durations.pac_dying));
        Ok(())
    }

    fn on_update(&mut self, model: &mut GameModel) -> GameResult<Option<Transition>> {
        let durations = model.rules().durations;
        if self.timer.at_tick(durations.pac_dying_hide_ghosts) {
            model.require_level_mut()?.set_ghosts_visible(false);
        }
        if !self.timer.has_expired() {
            return Ok(None);
        }

        if model.is_demo_level() {
            return Ok(Some(Transition::Change(GamePhase::Intro)));
        }

        let lives = model.lose_life();
        model.require_level_mut()?.on_life_lost();
        debug!(lives, "Pac-Man lost a life");
        let next = if lives == 0 { GamePhase::GameOver } else { GamePhase::Ready };
        Ok(Some(Transition::Change(next)))
    }
}
