//! The bonus symbol that appears twice per level below the ghost house.

use strum_macros::{AsRefStr, Display, EnumIter};
use tracing::debug;

use crate::timer::{TickDuration, TickTimer};

/// Every symbol of both variants. Point values depend on the variant, see [`crate::game::variant::VariantRules`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum BonusSymbol {
    Cherries,
    Strawberry,
    Peach,
    Orange,
    Pretzel,
    Apple,
    Pear,
    Grapes,
    Banana,
    Galaxian,
    Bell,
    Key,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BonusState {
    #[default]
    Inactive,
    /// Visible and waiting to be eaten.
    Edible,
    /// Eaten; its points are shown for a moment.
    Eaten,
}

/// What happened to the bonus during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusChange {
    /// Nobody ate it in time.
    Expired(BonusSymbol),
    /// The points display of an eaten bonus ended.
    Vanished,
}

#[derive(Debug, Clone)]
pub struct Bonus {
    symbol: BonusSymbol,
    points: u32,
    state: BonusState,
    timer: TickTimer,
}

impl Bonus {
    pub fn new(symbol: BonusSymbol, points: u32) -> Self {
        Self {
            symbol,
            points,
            state: BonusState::Inactive,
            timer: TickTimer::default(),
        }
    }

    pub fn symbol(&self) -> BonusSymbol {
        self.symbol
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn state(&self) -> BonusState {
        self.state
    }

    pub fn is_edible(&self) -> bool {
        self.state == BonusState::Edible
    }

    /// Shows the symbol for `ticks` ticks.
    pub fn activate(&mut self, symbol: BonusSymbol, points: u32, ticks: u32) {
        self.symbol = symbol;
        self.points = points;
        self.state = BonusState::Edible;
        self.timer.restart(TickDuration::Ticks(ticks));
        debug!(symbol = %symbol, points, ticks, "Bonus activated");
    }

    /// Marks the bonus eaten and shows its points for `ticks` ticks. Returns the points earned.
    pub fn eat(&mut self, ticks: u32) -> Option<u32> {
        if self.state != BonusState::Edible {
            return None;
        }
        self.state = BonusState::Eaten;
        self.timer.restart(TickDuration::Ticks(ticks));
        Some(self.points)
    }

    pub fn deactivate(&mut self) {
        self.state = BonusState::Inactive;
        self.timer.stop();
    }

    pub fn tick(&mut self) -> Option<BonusChange> {
        if self.state == BonusState::Inactive {
            return None;
        }
        self.timer.tick();
        if !self.timer.has_expired() {
            return None;
        }

        let change = match self.state {
            BonusState::Edible => BonusChange::Expired(self.symbol),
            _ => BonusChange::Vanished,
        };
        self.state = BonusState::Inactive;
        Some(change)
    }
}
