//! Simulation settings, read from `PACMAN_`-prefixed environment variables on top of the defaults.

use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::constants::mechanics::{EXTRA_LIFE_SCORE, INITIAL_LIVES};
use crate::error::GameResult;
use crate::game::variant::GameVariant;

/// Prefix of the environment variables overriding the defaults, e.g. `PACMAN_INITIAL_LIVES=5`.
pub const ENV_PREFIX: &str = "PACMAN_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub variant: GameVariant,
    /// Lives at the start of a new game.
    pub initial_lives: u8,
    /// Score that earns the single extra life.
    pub extra_life_score: u32,
    /// Hunting ghosts pass through Pac-Man without harm.
    pub pac_immune: bool,
    /// Play intermissions between levels.
    pub cutscenes_enabled: bool,
    /// Coins the headless driver inserts before the first tick.
    pub coins: u8,
    /// Ticks after which the headless driver stops; unlimited if unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ticks: Option<u64>,
    /// Pace the headless driver at 60 ticks per second instead of running flat out.
    pub throttled: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            variant: GameVariant::default(),
            initial_lives: INITIAL_LIVES,
            extra_life_score: EXTRA_LIFE_SCORE,
            pac_immune: false,
            cutscenes_enabled: true,
            coins: 0,
            max_ticks: None,
            throttled: false,
        }
    }
}

impl SimulationConfig {
    /// The default settings, overridden by the environment.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    /// Loads the settings from the environment.
    pub fn load() -> GameResult<Self> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(figment: Figment) -> GameResult<Self> {
        Ok(figment.extract()?)
    }
}
