use tracing::debug;

use crate::controller::{GamePhase, GameState, Transition};
use crate::error::{GameError, GameResult};
use crate::events::GameEvent;
use crate::game::GameModel;
use crate::timer::{TickDuration, TickTimer};

/// Which of the three "get ready" sequences is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadyKind {
    /// Continuing a running game after a lost life or on a new level.
    #[default]
    Resume,
    /// A new game paid for with credit.
    NewGame,
    /// The attract mode demo.
    Demo,
}

#[derive(Debug, Default)]
pub struct ReadyState {
    timer: TickTimer,
    kind: ReadyKind,
}

impl ReadyState {
    pub fn kind(&self) -> ReadyKind {
        self.kind
    }

    /// The tick at which Pac-Man and the ghosts appear.
    fn show_actors_tick(&self, model: &GameModel) -> u32 {
        let durations = &model.rules().durations;
        match self.kind {
            ReadyKind::Resume => durations.ready_resume_show_actors,
            ReadyKind::NewGame => durations.ready_new_game_show_actors,
            ReadyKind::Demo => 0,
        }
    }
}

impl GameState for ReadyState {
    phase_timer!(GamePhase::Ready);

    fn on_enter(&mut self, model: &mut GameModel) -> GameResult<()> {
        let durations = model.rules().durations;

        let ticks = if model.is_playing() && model.level.is_some() {
            self.kind = ReadyKind::Resume;
            durations.ready_resume
        } else if model.coins().has_credit() {
            self.kind = ReadyKind::NewGame;
            model.start_new_game();
            model.create_level(1, false)?;
            durations.ready_new_game
        } else {
            self.kind = ReadyKind::Demo;
            model.create_level(model.rules().demo_level, true)?;
            durations.ready_demo
        };

        let level = model.level.as_mut().ok_or(GameError::NoLevel)?;
        level.reset_actors();
        level.set_actors_visible(self.kind == ReadyKind::Demo);
        if level.mark_started() {
            model.events.publish(GameEvent::LevelStarted { number: level.number() });
        }

        debug!(kind = ?self.kind, ticks, "Getting ready");
        self.timer.restart(TickDuration::Ticks(ticks));
        Ok(())
    }

    fn on_update(&mut self, model: &mut GameModel) -> GameResult<Option<Transition>> {
        if self.timer.at_tick(self.show_actors_tick(model)) {
            model.require_level_mut()?.set_actors_visible(true);
        }
        Ok(self.timer.has_expired().then_some(Transition::Change(GamePhase::Hunting)))
    }
}
