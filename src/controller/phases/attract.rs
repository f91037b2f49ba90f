//! The phases shown while nobody is playing.

use crate::controller::{GamePhase, GameState, Transition};
use crate::error::GameResult;
use crate::game::GameModel;
use crate::timer::{TickDuration, TickTimer};

#[derive(Debug, Default)]
pub struct BootState {
    timer: TickTimer,
}

impl GameState for BootState {
    phase_timer!(GamePhase::Boot);

    fn on_enter(&mut self, model: &mut GameModel) -> GameResult<()> {
        model.reset();
        self.timer.restart(TickDuration::Ticks(model.rules().durations.boot));
        Ok(())
    }

    fn on_update(&mut self, _model: &mut GameModel) -> GameResult<Option<Transition>> {
        Ok(self.timer.has_expired().then_some(Transition::Change(GamePhase::Intro)))
    }
}

#[derive(Debug, Default)]
pub struct IntroState {
    timer: TickTimer,
}

impl GameState for IntroState {
    phase_timer!(GamePhase::Intro);

    fn on_enter(&mut self, model: &mut GameModel) -> GameResult<()> {
        // Whatever was shown before (a demo or a finished game) is gone.
        model.discard_level();
        self.timer.restart(TickDuration::Ticks(model.rules().durations.intro));
        Ok(())
    }

    fn on_update(&mut self, _model: &mut GameModel) -> GameResult<Option<Transition>> {
        Ok(self.timer.has_expired().then_some(Transition::Change(GamePhase::Ready)))
    }
}

/// Waits for the start button; see `GameController::start_game`.
#[derive(Debug, Default)]
pub struct CreditState {
    timer: TickTimer,
}

impl GameState for CreditState {
    phase_timer!(GamePhase::Credit);

    fn on_enter(&mut self, model: &mut GameModel) -> GameResult<()> {
        if model.is_demo_level() {
            model.discard_level();
        }
        self.timer.restart_indefinitely();
        Ok(())
    }

    fn on_update(&mut self, _model: &mut GameModel) -> GameResult<Option<Transition>> {
        Ok(None)
    }
}
