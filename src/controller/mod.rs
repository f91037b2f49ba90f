//! The top-level phase machine.
//!
//! Exactly one phase is active. Every tick the controller advances the phase's timer and calls its
//! `on_update`; a transition the phase asks for is applied only after that call has returned, so no
//! tick is ever partially applied and transitions never nest.

pub mod phase;
pub mod phases;

pub use phase::{GamePhase, GameState, Phase, Transition};

use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::error::GameResult;
use crate::events::{GameEvent, GameEventListener};
use crate::game::GameModel;
use crate::map::direction::Direction;

#[derive(Debug)]
pub struct GameController {
    model: GameModel,
    phase: Phase,
    /// The phase active before the current one. Only one level of history is kept.
    previous: Option<GamePhase>,
    transitioning: bool,
}

impl GameController {
    /// Creates a controller and enters the boot phase.
    pub fn new(config: SimulationConfig) -> GameResult<Self> {
        Self::with_model(GameModel::new(config))
    }

    /// Creates a controller around an existing model and enters the boot phase.
    pub fn with_model(model: GameModel) -> GameResult<Self> {
        let mut controller = Self {
            model,
            phase: Phase::new(GamePhase::Boot),
            previous: None,
            transitioning: false,
        };
        controller.phase.state_mut().on_enter(&mut controller.model)?;
        debug!(variant = %controller.model.variant(), "Game controller created");
        Ok(controller)
    }

    pub fn current_phase(&self) -> GamePhase {
        self.phase.kind()
    }

    /// The active phase with its transient state.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn previous_phase(&self) -> Option<GamePhase> {
        self.previous
    }

    pub fn model(&self) -> &GameModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut GameModel {
        &mut self.model
    }

    pub fn subscribe(&mut self, listener: impl GameEventListener + 'static) {
        self.model.events.subscribe(listener);
    }

    /// Runs one tick of the active phase, then applies the transition it requested.
    pub fn update(&mut self) -> GameResult<()> {
        let state = self.phase.state_mut();
        state.timer_mut().tick();
        let transition = state.on_update(&mut self.model)?;

        match transition {
            Some(Transition::Change(target)) => self.change_state(target),
            Some(Transition::ResumePrevious) => self.resume_previous_state(),
            Some(Transition::Restart(target)) => self.restart(target),
            None => Ok(()),
        }
    }

    /// Leaves the current phase and enters `target`.
    ///
    /// # Panics
    ///
    /// Panics if called while another transition is in progress.
    pub fn change_state(&mut self, target: GamePhase) -> GameResult<()> {
        self.switch_to(target, false)
    }

    /// Returns to the phase that was active before the current one.
    ///
    /// # Panics
    ///
    /// Panics if no phase was active before the current one.
    pub fn resume_previous_state(&mut self) -> GameResult<()> {
        let Some(previous) = self.previous else {
            panic!("Cannot resume: no phase was active before {}", self.current_phase());
        };
        debug!(from = %self.current_phase(), to = %previous, "Resuming previous phase");
        self.change_state(previous)
    }

    /// Resets the game model and enters `target` with an empty history.
    pub fn restart(&mut self, target: GamePhase) -> GameResult<()> {
        info!(phase = %target, "Restarting game");
        self.switch_to(target, true)
    }

    fn switch_to(&mut self, target: GamePhase, reset: bool) -> GameResult<()> {
        assert!(
            !self.transitioning,
            "Transition to {target} requested while leaving {}",
            self.current_phase()
        );
        self.transitioning = true;
        let result = self.apply_switch(target, reset);
        self.transitioning = false;
        result
    }

    fn apply_switch(&mut self, target: GamePhase, reset: bool) -> GameResult<()> {
        let old = self.current_phase();
        self.phase.state_mut().on_exit(&mut self.model)?;

        if reset {
            self.model.reset();
            self.previous = None;
        } else {
            self.previous = Some(old);
        }

        self.phase = Phase::new(target);
        self.phase.state_mut().on_enter(&mut self.model)?;

        debug!(from = %old, to = %target, "Phase changed");
        self.model.events.publish(GameEvent::GameStateChanged { old, new: target });
        Ok(())
    }

    pub fn has_credit(&self) -> bool {
        self.model.coins.has_credit()
    }

    /// Adds `delta` to the credit. Returns false, leaving the credit unchanged, if the result would be out of range.
    pub fn change_credit(&mut self, delta: i64) -> bool {
        self.model.coins.change_credit(delta).is_ok()
    }

    /// Sets the credit. Returns false, leaving the credit unchanged, if `credit` is out of range.
    pub fn set_credit(&mut self, credit: i64) -> bool {
        self.model.coins.set_credit(credit).is_ok()
    }

    /// Inserts a coin. Outside a running game this interrupts the attract mode and shows the credit screen.
    ///
    /// Returns false if the credit is already at its maximum.
    pub fn insert_coin(&mut self) -> GameResult<bool> {
        let Ok(credit) = self.model.coins.insert_coin() else {
            return Ok(false);
        };
        self.model.events.publish(GameEvent::CreditAdded { credit });

        let phase = self.current_phase();
        let attract_mode = !matches!(
            phase,
            GamePhase::Boot | GamePhase::Credit | GamePhase::GameOver
        ) && !phase.is_test_only();
        if attract_mode && !self.model.is_playing() {
            self.change_state(GamePhase::Credit)?;
        }
        Ok(true)
    }

    /// The start button: begins a game from the credit screen if there is credit.
    pub fn start_game(&mut self) -> GameResult<bool> {
        if self.current_phase() != GamePhase::Credit || !self.has_credit() {
            return Ok(false);
        }
        self.change_state(GamePhase::Ready)?;
        Ok(true)
    }

    /// Sets the direction Pac-Man turns to next. Ignored in demo levels.
    pub fn steer_pac(&mut self, dir: Direction) {
        if let Some(level) = self.model.level.as_mut().filter(|level| !level.is_demo()) {
            level.pac_mut().set_wish_dir(dir);
        }
    }
}
