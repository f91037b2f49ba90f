use tracing::trace;

use crate::controller::{GamePhase, GameState, Transition};
use crate::error::{GameError, GameResult};
use crate::game::GameModel;
use crate::timer::TickTimer;

/// The game itself. Runs until the level is cleared, Pac-Man is caught or a ghost is eaten.
#[derive(Debug, Default)]
pub struct HuntingState {
    timer: TickTimer,
}

impl GameState for HuntingState {
    phase_timer!(GamePhase::Hunting);

    fn on_enter(&mut self, model: &mut GameModel) -> GameResult<()> {
        let level = model.level.as_mut().ok_or(GameError::NoLevel)?;
        // Coming back from an eaten ghost keeps the running hunting phase.
        level.start_hunting(&mut model.events);
        level.set_actors_visible(true);
        self.timer.restart_indefinitely();
        Ok(())
    }

    fn on_update(&mut self, model: &mut GameModel) -> GameResult<Option<Transition>> {
        let level = model.level.as_mut().ok_or(GameError::NoLevel)?;
        let report = level.simulate_tick(&mut model.events);
        model.add_score(report.points);

        let next = if report.level_complete {
            Some(GamePhase::LevelComplete)
        } else if report.pac_killed {
            Some(GamePhase::PacmanDying)
        } else if !report.ghosts_killed.is_empty() {
            Some(GamePhase::GhostDying)
        } else {
            None
        };
        if next.is_some() {
            trace!(?report, ?next, "Hunting interrupted");
        }
        Ok(next.map(Transition::Change))
    }
}
