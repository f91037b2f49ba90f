//! Between levels: the flashing maze, the optional intermission and the switch to the next level.

use tracing::{debug, info};

use crate::controller::{GamePhase, GameState, Transition};
use crate::error::{GameError, GameResult};
use crate::events::GameEvent;
use crate::game::GameModel;
use crate::timer::{TickDuration, TickTimer};

#[derive(Debug, Default)]
pub struct LevelCompleteState {
    timer: TickTimer,
    maze_flashing: bool,
    flashes_done: u32,
}

impl LevelCompleteState {
    /// True while the maze is drawn in its highlighted colors.
    pub fn is_maze_flashing(&self) -> bool {
        self.maze_flashing
    }

    pub fn flashes_done(&self) -> u32 {
        self.flashes_done
    }
}

impl GameState for LevelCompleteState {
    phase_timer!(GamePhase::LevelComplete);

    fn on_enter(&mut self, model: &mut GameModel) -> GameResult<()> {
        let rules = model.rules();
        let level = model.level.as_mut().ok_or(GameError::NoLevel)?;
        level.stop_all();
        level.set_ghosts_visible(false);
        let ticks = rules.level_complete_ticks(level.num_flashes());
        info!(level = level.number(), "Level complete");
        model.events.publish(GameEvent::StopAllSounds);
        self.timer.restart(TickDuration::Ticks(ticks));
        Ok(())
    }

    fn on_update(&mut self, model: &mut GameModel) -> GameResult<Option<Transition>> {
        let durations = model.rules().durations;
        let level = model.require_level()?;
        let (number, demo, flashes) = (level.number(), level.is_demo(), level.num_flashes());

        let half = durations.level_complete_half_flash.max(1);
        let flashing_ticks = flashes * 2 * half;
        let since_pause = self.timer.elapsed().saturating_sub(durations.level_complete_pause);
        if since_pause > 0 && since_pause <= flashing_ticks {
            self.maze_flashing = ((since_pause - 1) / half) % 2 == 0;
            self.flashes_done = since_pause / (2 * half);
        } else {
            self.maze_flashing = false;
        }

        if !self.timer.has_expired() {
            return Ok(None);
        }

        if demo {
            return Ok(Some(Transition::Change(GamePhase::Intro)));
        }
        model.count_completed_level();
        let intermission = model.config().cutscenes_enabled && model.rules().intermission_after(number).is_some();
        let next = if intermission {
            GamePhase::Intermission
        } else {
            GamePhase::LevelTransition
        };
        Ok(Some(Transition::Change(next)))
    }
}

/// Creates the next level and gives the player a moment before it starts.
#[derive(Debug, Default)]
pub struct LevelTransitionState {
    timer: TickTimer,
}

impl GameState for LevelTransitionState {
    phase_timer!(GamePhase::LevelTransition);

    fn on_enter(&mut self, model: &mut GameModel) -> GameResult<()> {
        let next = model.require_level()?.number() + 1;
        model.create_level(next, false)?;
        debug!(level = next, "Next level prepared");
        self.timer.restart(TickDuration::Ticks(model.rules().durations.level_transition));
        Ok(())
    }

    fn on_update(&mut self, _model: &mut GameModel) -> GameResult<Option<Transition>> {
        Ok(self.timer.has_expired().then_some(Transition::Change(GamePhase::Ready)))
    }
}

#[derive(Debug, Default)]
pub struct IntermissionState {
    timer: TickTimer,
    number: u8,
}

impl IntermissionState {
    /// The cutscene being played, from 1.
    pub fn number(&self) -> u8 {
        self.number
    }
}

impl GameState for IntermissionState {
    phase_timer!(GamePhase::Intermission);

    fn on_enter(&mut self, model: &mut GameModel) -> GameResult<()> {
        let completed = model.require_level()?.number();
        self.number = model.rules().intermission_after(completed).unwrap_or(1);
        model.events.publish(GameEvent::IntermissionStarted { number: self.number });
        self.timer.restart(TickDuration::Ticks(model.rules().cutscene_duration(self.number)));
        Ok(())
    }

    fn on_update(&mut self, model: &mut GameModel) -> GameResult<Option<Transition>> {
        if !self.timer.has_expired() {
            return Ok(None);
        }
        let next = if model.is_playing() {
            GamePhase::LevelTransition
        } else {
            GamePhase::Intro
        };
        Ok(Some(Transition::Change(next)))
    }
}
