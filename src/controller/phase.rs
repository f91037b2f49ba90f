//! The closed set of top-level phases and their dispatch.

use strum_macros::{AsRefStr, Display, EnumIter};

use crate::controller::phases::{
    BootState, CreditState, GameOverState, GhostDyingState, HuntingState, IntermissionState, IntroState,
    LevelCompleteState, LevelTransitionState, PacmanDyingState, ReadyState, TestingCutScenesState,
    TestingLevelsState,
};
use crate::error::GameResult;
use crate::game::GameModel;
use crate::timer::TickTimer;

/// Names of the top-level phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    Boot,
    Intro,
    Credit,
    Ready,
    Hunting,
    LevelComplete,
    LevelTransition,
    GhostDying,
    PacmanDying,
    GameOver,
    Intermission,
    /// Plays a short teaser of the first levels.
    TestingLevels,
    /// Plays every intermission in order.
    TestingCutScenes,
}

impl GamePhase {
    /// Phases that are only reachable through an explicit `change_state`.
    pub fn is_test_only(self) -> bool {
        matches!(self, GamePhase::TestingLevels | GamePhase::TestingCutScenes)
    }
}

/// A phase transition requested by [`GameState::on_update`], applied once the update has returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Change(GamePhase),
    /// Return to the phase active before the current one.
    ResumePrevious,
    /// Reset the game model, then change to the phase.
    Restart(GamePhase),
}

/// Callbacks of one top-level phase.
///
/// Each phase owns a [`TickTimer`] which the controller ticks right before every `on_update`, so the
/// first update after entering sees one elapsed tick.
pub trait GameState {
    fn phase(&self) -> GamePhase;

    fn timer(&self) -> &TickTimer;

    fn timer_mut(&mut self) -> &mut TickTimer;

    /// Arms the timer and prepares the model.
    fn on_enter(&mut self, model: &mut GameModel) -> GameResult<()>;

    fn on_update(&mut self, model: &mut GameModel) -> GameResult<Option<Transition>>;

    fn on_exit(&mut self, _model: &mut GameModel) -> GameResult<()> {
        Ok(())
    }
}

/// The active phase together with its transient state.
#[derive(Debug)]
pub enum Phase {
    Boot(BootState),
    Intro(IntroState),
    Credit(CreditState),
    Ready(ReadyState),
    Hunting(HuntingState),
    LevelComplete(LevelCompleteState),
    LevelTransition(LevelTransitionState),
    GhostDying(GhostDyingState),
    PacmanDying(PacmanDyingState),
    GameOver(GameOverState),
    Intermission(IntermissionState),
    TestingLevels(TestingLevelsState),
    TestingCutScenes(TestingCutScenesState),
}

impl Phase {
    /// A fresh, not yet entered phase.
    pub fn new(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Boot => Phase::Boot(BootState::default()),
            GamePhase::Intro => Phase::Intro(IntroState::default()),
            GamePhase::Credit => Phase::Credit(CreditState::default()),
            GamePhase::Ready => Phase::Ready(ReadyState::default()),
            GamePhase::Hunting => Phase::Hunting(HuntingState::default()),
            GamePhase::LevelComplete => Phase::LevelComplete(LevelCompleteState::default()),
            GamePhase::LevelTransition => Phase::LevelTransition(LevelTransitionState::default()),
            GamePhase::GhostDying => Phase::GhostDying(GhostDyingState::default()),
            GamePhase::PacmanDying => Phase::PacmanDying(PacmanDyingState::default()),
            GamePhase::GameOver => Phase::GameOver(GameOverState::default()),
            GamePhase::Intermission => Phase::Intermission(IntermissionState::default()),
            GamePhase::TestingLevels => Phase::TestingLevels(TestingLevelsState::default()),
            GamePhase::TestingCutScenes => Phase::TestingCutScenes(TestingCutScenesState::default()),
        }
    }

    pub fn kind(&self) -> GamePhase {
        self.state().phase()
    }

    pub fn state(&self) -> &dyn GameState {
        match self {
            Phase::Boot(state) => state,
            Phase::Intro(state) => state,
            Phase::Credit(state) => state,
            Phase::Ready(state) => state,
            Phase::Hunting(state) => state,
            Phase::LevelComplete(state) => state,
            Phase::LevelTransition(state) => state,
            Phase::GhostDying(state) => state,
            Phase::PacmanDying(state) => state,
            Phase::GameOver(state) => state,
            Phase::Intermission(state) => state,
            Phase::TestingLevels(state) => state,
            Phase::TestingCutScenes(state) => state,
        }
    }

    pub fn state_mut(&mut self) -> &mut dyn GameState {
        match self {
            Phase::Boot(state) => state,
            Phase::Intro(state) => state,
            Phase::Credit(state) => state,
            Phase::Ready(state) => state,
            Phase::Hunting(state) => state,
            Phase::LevelComplete(state) => state,
            Phase::LevelTransition(state) => state,
            Phase::GhostDying(state) => state,
            Phase::PacmanDying(state) => state,
            Phase::GameOver(state) => state,
            Phase::Intermission(state) => state,
            Phase::TestingLevels(state) => state,
            Phase::TestingCutScenes(state) => state,
        }
    }

    pub fn timer(&self) -> &TickTimer {
        self.state().timer()
    }
}
