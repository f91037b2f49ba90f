//! One module per group of related phases.

/// Implements the bookkeeping part of [`GameState`](crate::controller::GameState) for a state with a `timer` field.
macro_rules! phase_timer {
    ($phase:expr) => {
        fn phase(&self) -> $crate::controller::GamePhase {
            $phase
        }

        fn timer(&self) -> &$crate::timer::TickTimer {
            &self.timer
        }

        fn timer_mut(&mut self) -> &mut $crate::timer::TickTimer {
            &mut self.timer
        }
    };
}

mod attract;
mod dying;
mod game_over;
mod hunting;
mod level;
mod ready;
mod testing;

pub use attract::{BootState, CreditState, IntroState};
pub use dying::{GhostDyingState, PacmanDyingState};
pub use game_over::GameOverState;
pub use hunting::HuntingState;
pub use level::{IntermissionState, LevelCompleteState, LevelTransitionState};
pub use ready::{ReadyKind, ReadyState};
pub use testing::{TestingCutScenesState, TestingLevelsState};
