//! Phases used to check levels and cutscenes without playing through the game.

use tracing::debug;

use crate::controller::{GamePhase, GameState, Transition};
use crate::error::{GameError, GameResult};
use crate::events::GameEvent;
use crate::game::GameModel;
use crate::timer::{TickDuration, TickTimer};

/// Levels shown by the level teaser.
pub const TESTING_LEVEL_COUNT: u32 = 8;
/// Hunting ticks each teaser level runs for.
pub const TESTING_TICKS_PER_LEVEL: u32 = 300;

/// Runs the first levels for a few seconds each with the autopilot steering an immune Pac-Man.
#[derive(Debug, Default)]
pub struct TestingLevelsState {
    timer: TickTimer,
}

impl TestingLevelsState {
    fn start_level(&mut self, model: &mut GameModel, number: u32) -> GameResult<()> {
        model.create_level(number, true)?;
        let level = model.level.as_mut().ok_or(GameError::NoLevel)?;
        level.set_pac_immune(true);
        level.set_actors_visible(true);
        level.mark_started();
        model.events.publish(GameEvent::LevelStarted { number });
        level.start_hunting(&mut model.events);
        self.timer.restart(TickDuration::Ticks(TESTING_TICKS_PER_LEVEL));
        debug!(level = number, "Testing level");
        Ok(())
    }
}

impl GameState for TestingLevelsState {
    phase_timer!(GamePhase::TestingLevels);

    fn on_enter(&mut self, model: &mut GameModel) -> GameResult<()> {
        model.reset();
        self.start_level(model, 1)
    }

    fn on_update(&mut self, model: &mut GameModel) -> GameResult<Option<Transition>> {
        let level = model.level.as_mut().ok_or(GameError::NoLevel)?;
        let report = level.simulate_tick(&mut model.events);
        if !report.ghosts_killed.is_empty() {
            level.start_ghosts_returning(&mut model.events);
        }

        if !self.timer.has_expired() {
            return Ok(None);
        }
        let number = level.number();
        if number >= TESTING_LEVEL_COUNT {
            return Ok(Some(Transition::Change(GamePhase::Intro)));
        }
        self.start_level(model, number + 1)?;
        Ok(None)
    }
}

/// Plays every intermission once, in order.
#[derive(Debug, Default)]
pub struct TestingCutScenesState {
    timer: TickTimer,
    number: u8,
}

impl TestingCutScenesState {
    pub fn number(&self) -> u8 {
        self.number
    }

    fn play(&mut self, model: &mut GameModel, number: u8) {
        self.number = number;
        model.events.publish(GameEvent::IntermissionStarted { number });
        self.timer.restart(TickDuration::Ticks(model.rules().cutscene_duration(number)));
    }
}

impl GameState for TestingCutScenesState {
    phase_timer!(GamePhase::TestingCutScenes);

    fn on_enter(&mut self, model: &mut GameModel) -> GameResult<()> {
        self.play(model, 1);
        Ok(())
    }

    fn on_update(&mut self, model: &mut GameModel) -> GameResult<Option<Transition>> {
        if !self.timer.has_expired() {
            return Ok(None);
        }
        if self.number >= model.rules().cutscene_count() {
            return Ok(Some(Transition::Change(GamePhase::Intro)));
        }
        self.play(model, self.number + 1);
        Ok(None)
    }
}
