//! The game model: everything the phase machine reads and writes.

pub mod bonus;
pub mod house;
pub mod hunting;
pub mod level;
pub mod tables;
pub mod variant;

use smallvec::SmallVec;
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::credit::CoinMechanism;
use crate::error::{GameError, GameResult};
use crate::events::{EventBus, GameEvent};
use crate::game::bonus::BonusSymbol;
use crate::game::level::GameLevel;
use crate::game::variant::{GameVariant, VariantRules};

/// Number of completed-level symbols kept for display.
pub const LEVEL_COUNTER_SIZE: usize = 7;

/// The mutable world snapshot shared by all phases.
///
/// Phases borrow the level and the event bus at the same time, so those fields are crate-visible.
#[derive(Debug)]
pub struct GameModel {
    config: SimulationConfig,
    rules: &'static VariantRules,
    pub(crate) coins: CoinMechanism,
    score: u32,
    high_score: u32,
    lives: u8,
    playing: bool,
    extra_life_awarded: bool,
    pub(crate) level: Option<GameLevel>,
    level_counter: SmallVec<[BonusSymbol; LEVEL_COUNTER_SIZE]>,
    pub(crate) events: EventBus,
}

impl GameModel {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            rules: config.variant.rules(),
            lives: config.initial_lives,
            config,
            coins: CoinMechanism::new(),
            score: 0,
            high_score: 0,
            playing: false,
            extra_life_awarded: false,
            level: None,
            level_counter: SmallVec::new(),
            events: EventBus::new(),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn rules(&self) -> &'static VariantRules {
        self.rules
    }

    pub fn variant(&self) -> GameVariant {
        self.rules.variant
    }

    pub fn coins(&self) -> &CoinMechanism {
        &self.coins
    }

    pub fn coins_mut(&mut self) -> &mut CoinMechanism {
        &mut self.coins
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Highest score reached since startup; it is never persisted.
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn set_lives(&mut self, lives: u8) {
        self.lives = lives;
    }

    /// True while a game paid for with credit is running.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn level(&self) -> Option<&GameLevel> {
        self.level.as_ref()
    }

    pub fn level_mut(&mut self) -> Option<&mut GameLevel> {
        self.level.as_mut()
    }

    /// The current level, for logic that cannot run without one.
    pub fn require_level(&self) -> GameResult<&GameLevel> {
        self.level.as_ref().ok_or(GameError::NoLevel)
    }

    pub fn require_level_mut(&mut self) -> GameResult<&mut GameLevel> {
        self.level.as_mut().ok_or(GameError::NoLevel)
    }

    pub fn is_demo_level(&self) -> bool {
        self.level.as_ref().is_some_and(GameLevel::is_demo)
    }

    /// Drops the current level, if any.
    pub fn discard_level(&mut self) {
        self.level = None;
    }

    /// Bonus symbols of the most recently completed levels, oldest first.
    pub fn level_counter(&self) -> &[BonusSymbol] {
        &self.level_counter
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// Forgets the running game. Credit, high score and listeners survive.
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.config.initial_lives;
        self.playing = false;
        self.extra_life_awarded = false;
        self.level = None;
        self.level_counter.clear();
    }

    pub fn start_new_game(&mut self) {
        self.reset();
        self.playing = true;
        info!(lives = self.lives, credit = self.coins.credit(), "New game started");
        self.events.publish(GameEvent::GameStarted);
    }

    /// Replaces the current level with a new one.
    pub fn create_level(&mut self, number: u32, demo: bool) -> GameResult<()> {
        let mut level = GameLevel::new(number, demo, self.rules)?;
        level.set_pac_immune(self.config.pac_immune);
        self.level = Some(level);
        self.events.publish(GameEvent::LevelCreated { number, demo });
        Ok(())
    }

    /// Adds points to the score, awarding the extra life once its threshold is crossed.
    pub fn add_score(&mut self, points: u32) {
        if points == 0 || self.is_demo_level() {
            return;
        }
        self.score += points;
        self.high_score = self.high_score.max(self.score);

        if !self.extra_life_awarded && self.score >= self.config.extra_life_score {
            self.extra_life_awarded = true;
            self.lives = self.lives.saturating_add(1);
            debug!(score = self.score, lives = self.lives, "Extra life won");
            self.events.publish(GameEvent::ExtraLifeWon { lives: self.lives });
        }
    }

    /// Takes a life and returns how many are left.
    pub fn lose_life(&mut self) -> u8 {
        self.lives = self.lives.saturating_sub(1);
        self.events.publish(GameEvent::PacDied { lives: self.lives });
        self.lives
    }

    /// Records the symbol of the level just completed.
    pub fn count_completed_level(&mut self) {
        let Some(level) = self.level.as_ref() else {
            return;
        };
        if self.level_counter.len() == LEVEL_COUNTER_SIZE {
            self.level_counter.remove(0);
        }
        self.level_counter.push(level.level_symbol());
    }

    pub fn end_game(&mut self) {
        self.playing = false;
        info!(score = self.score, high_score = self.high_score, "Game over");
    }
}
