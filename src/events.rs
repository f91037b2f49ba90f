//! Notifications published by the rules core for the presentation layer.
//!
//! Events are delivered synchronously, in publication order, to every registered listener. The
//! bus also keeps the most recent events in a ring buffer for consumers that prefer polling.

use std::fmt;

use circular_buffer::CircularBuffer;
use glam::IVec2;
use tracing::trace;

use crate::actor::ghost::GhostId;
use crate::controller::GamePhase;
use crate::game::bonus::BonusSymbol;
use crate::game::hunting::HuntingKind;
use crate::map::Food;

/// Number of events kept in the bus history.
pub const EVENT_HISTORY: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// The controller switched phases.
    GameStateChanged { old: GamePhase, new: GamePhase },
    CreditAdded { credit: u8 },
    GameStarted,
    LevelCreated { number: u32, demo: bool },
    LevelStarted { number: u32 },
    HuntingPhaseStarted { index: u8, kind: HuntingKind },
    PacFoundFood { tile: IVec2, food: Food },
    PacGetsPower { ticks: u32 },
    PacStartsLosingPower,
    PacLostPower,
    GhostReleased { ghost: GhostId },
    GhostEaten { ghost: GhostId, bounty: u32 },
    GhostStartsReturningHome { ghost: GhostId },
    GhostEntersHouse { ghost: GhostId },
    BonusActivated { symbol: BonusSymbol },
    BonusEaten { symbol: BonusSymbol, points: u32 },
    BonusExpired { symbol: BonusSymbol },
    ExtraLifeWon { lives: u8 },
    PacDying,
    PacDied { lives: u8 },
    IntermissionStarted { number: u8 },
    StopAllSounds,
}

/// A receiver of game events.
pub trait GameEventListener {
    fn on_game_event(&mut self, event: &GameEvent);
}

impl<F> GameEventListener for F
where
    F: FnMut(&GameEvent),
{
    fn on_game_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Fans events out to listeners and records a bounded history.
pub struct EventBus {
    listeners: Vec<Box<dyn GameEventListener>>,
    history: CircularBuffer<EVENT_HISTORY, GameEvent>,
    published: u64,
}

impl Default for EventBus {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            history: CircularBuffer::new(),
            published: 0,
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .field("history", &self.history.len())
            .field("published", &self.published)
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener; it receives every event published from now on.
    pub fn subscribe(&mut self, listener: impl GameEventListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn publish(&mut self, event: GameEvent) {
        trace!(?event, "Publishing game event");
        self.published += 1;
        self.history.push_back(event);
        for listener in self.listeners.iter_mut() {
            listener.on_game_event(&event);
        }
    }

    /// The most recent events, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &GameEvent> + '_ {
        self.history.iter()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Total number of events published since creation.
    pub fn published(&self) -> u64 {
        self.published
    }
}
