//! Data tables that differ between the supported game variants.
//!
//! Both variants share the phase machine and the hunting schedule; everything else that differs is
//! looked up here instead of branching on the variant inside phase logic.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter};

use crate::game::bonus::BonusSymbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, AsRefStr, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameVariant {
    #[default]
    PacMan,
    MsPacMan,
}

impl GameVariant {
    pub fn rules(self) -> &'static VariantRules {
        match self {
            GameVariant::PacMan => &PACMAN_RULES,
            GameVariant::MsPacMan => &MS_PACMAN_RULES,
        }
    }
}

/// Tick lengths of the top-level phases and of their scripted steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseDurations {
    pub boot: u32,
    pub intro: u32,
    /// Resuming a running game: the tick the actors appear, and the tick hunting starts.
    pub ready_resume_show_actors: u32,
    pub ready_resume: u32,
    /// Starting a new game.
    pub ready_new_game_show_actors: u32,
    pub ready_new_game: u32,
    /// Starting a demo level.
    pub ready_demo: u32,
    pub ghost_dying: u32,
    /// Pac-Man dying: ghosts disappear, the death animation starts, the phase ends.
    pub pac_dying_hide_ghosts: u32,
    pub pac_dying_animation: u32,
    pub pac_dying: u32,
    /// Level complete: pause before the maze flashes, length of half a flash, pause after flashing.
    pub level_complete_pause: u32,
    pub level_complete_half_flash: u32,
    pub level_complete_end_pause: u32,
    pub level_transition: u32,
    pub game_over: u32,
}

/// Per-variant rules and timings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRules {
    pub variant: GameVariant,
    pub durations: PhaseDurations,
    /// Completed level number and the intermission played after it.
    pub intermissions: &'static [(u32, u8)],
    /// Length of each intermission, indexed by intermission number - 1.
    pub cutscene_ticks: [u32; 3],
    /// Bonus symbol per level, the last entry repeats (unless `random_bonus_from` applies).
    pub bonus_symbols: &'static [BonusSymbol],
    /// From this level on, each bonus symbol is drawn at random from `bonus_symbols`.
    pub random_bonus_from: Option<u32>,
    pub bonus_points: &'static [(BonusSymbol, u32)],
    pub demo_level: u32,
}

impl VariantRules {
    /// The intermission shown after completing `level_number`, if any.
    pub fn intermission_after(&self, level_number: u32) -> Option<u8> {
        self.intermissions
            .iter()
            .find(|(level, _)| *level == level_number)
            .map(|(_, number)| *number)
    }

    /// Length of an intermission, clamped to the last one.
    pub fn cutscene_duration(&self, number: u8) -> u32 {
        let index = (number.max(1) as usize - 1).min(self.cutscene_ticks.len() - 1);
        self.cutscene_ticks[index]
    }

    pub fn cutscene_count(&self) -> u8 {
        self.cutscene_ticks.len() as u8
    }

    /// The fixed bonus symbol of a level; levels past the table repeat its last entry.
    pub fn bonus_symbol(&self, level_number: u32) -> BonusSymbol {
        let index = (level_number.max(1) as usize - 1).min(self.bonus_symbols.len() - 1);
        self.bonus_symbols[index]
    }

    /// True if the bonus symbol of this level is chosen at random.
    pub fn has_random_bonus(&self, level_number: u32) -> bool {
        self.random_bonus_from.is_some_and(|from| level_number >= from)
    }

    pub fn bonus_value(&self, symbol: BonusSymbol) -> u32 {
        self.bonus_points
            .iter()
            .find(|(candidate, _)| *candidate == symbol)
            .map_or(0, |(_, points)| *points)
    }

    /// Total length of the level complete phase for a level flashing `num_flashes` times.
    pub fn level_complete_ticks(&self, num_flashes: u32) -> u32 {
        let d = &self.durations;
        d.level_complete_pause + num_flashes * 2 * d.level_complete_half_flash + d.level_complete_end_pause
    }
}

const INTERMISSIONS: &[(u32, u8)] = &[(2, 1), (5, 2), (9, 3), (13, 3), (17, 3)];

const PACMAN_DURATIONS: PhaseDurations = PhaseDurations {
    boot: 240,
    intro: 600,
    ready_resume_show_actors: 1,
    ready_resume: 90,
    ready_new_game_show_actors: 120,
    ready_new_game: 240,
    ready_demo: 120,
    ghost_dying: 60,
    pac_dying_hide_ghosts: 60,
    pac_dying_animation: 90,
    pac_dying: 240,
    level_complete_pause: 60,
    level_complete_half_flash: 12,
    level_complete_end_pause: 60,
    level_transition: 60,
    // How long GAME OVER is shown was never pinned down; two seconds matches the arcade closely enough.
    game_over: 120,
};

static PACMAN_RULES: VariantRules = VariantRules {
    variant: GameVariant::PacMan,
    durations: PACMAN_DURATIONS,
    intermissions: INTERMISSIONS,
    cutscene_ticks: [570, 570, 600],
    bonus_symbols: &[
        BonusSymbol::Cherries,
        BonusSymbol::Strawberry,
        BonusSymbol::Peach,
        BonusSymbol::Peach,
        BonusSymbol::Apple,
        BonusSymbol::Apple,
        BonusSymbol::Grapes,
        BonusSymbol::Grapes,
        BonusSymbol::Galaxian,
        BonusSymbol::Galaxian,
        BonusSymbol::Bell,
        BonusSymbol::Bell,
        BonusSymbol::Key,
    ],
    random_bonus_from: None,
    bonus_points: &[
        (BonusSymbol::Cherries, 100),
        (BonusSymbol::Strawberry, 300),
        (BonusSymbol::Peach, 500),
        (BonusSymbol::Apple, 700),
        (BonusSymbol::Grapes, 1000),
        (BonusSymbol::Galaxian, 2000),
        (BonusSymbol::Bell, 3000),
        (BonusSymbol::Key, 5000),
    ],
    demo_level: 1,
};

static MS_PACMAN_RULES: VariantRules = VariantRules {
    variant: GameVariant::MsPacMan,
    durations: PhaseDurations {
        intro: 540,
        ..PACMAN_DURATIONS
    },
    intermissions: INTERMISSIONS,
    cutscene_ticks: [720, 600, 540],
    bonus_symbols: &[
        BonusSymbol::Cherries,
        BonusSymbol::Strawberry,
        BonusSymbol::Orange,
        BonusSymbol::Pretzel,
        BonusSymbol::Apple,
        BonusSymbol::Pear,
        BonusSymbol::Banana,
    ],
    random_bonus_from: Some(8),
    bonus_points: &[
        (BonusSymbol::Cherries, 100),
        (BonusSymbol::Strawberry, 200),
        (BonusSymbol::Orange, 500),
        (BonusSymbol::Pretzel, 700),
        (BonusSymbol::Apple, 1000),
        (BonusSymbol::Pear, 2000),
        (BonusSymbol::Banana, 5000),
    ],
    demo_level: 1,
};
