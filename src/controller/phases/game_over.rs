use crate::controller::{GamePhase, GameState, Transition};
use crate::error::GameResult;
use crate::events::GameEvent;
use crate::game::GameModel;
use crate::timer::{TickDuration, TickTimer};

/// Shows GAME OVER. The credit paying for the finished game is taken on entry.
#[derive(Debug, Default)]
pub struct GameOverState {
    timer: TickTimer,
}

impl GameState for GameOverState {
    phase_timer!(GamePhase::GameOver);

    fn on_enter(&mut self, model: &mut GameModel) -> GameResult<()> {
        model.coins.consume_credit();
        model.end_game();
        if let Some(level) = model.level.as_mut() {
            level.stop_all();
        }
        model.events.publish(GameEvent::StopAllSounds);
        self.timer.restart(TickDuration::Ticks(model.rules().durations.game_over));
        Ok(())
    }

    fn on_update(&mut self, model: &mut GameModel) -> GameResult<Option<Transition>> {
        if !self.timer.has_expired() {
            return Ok(None);
        }
        let next = if model.coins().has_credit() {
            GamePhase::Credit
        } else {
            GamePhase::Intro
        };
        Ok(Some(Transition::Change(next)))
    }
}
