//! The coin mechanism holding the player's credit.

use tracing::{debug, warn};

use crate::constants::mechanics::MAX_COINS;
use crate::error::CreditError;

/// Credit counter bounded to `0..=MAX_COINS`.
///
/// Every write is validated; an out-of-range write is logged and rejected, leaving the value unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoinMechanism {
    credit: u8,
}

impl CoinMechanism {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credit(&self) -> u8 {
        self.credit
    }

    pub fn has_credit(&self) -> bool {
        self.credit > 0
    }

    /// Sets the credit to an absolute value.
    pub fn set_credit(&mut self, credit: i64) -> Result<u8, CreditError> {
        if !(0..=i64::from(MAX_COINS)).contains(&credit) {
            warn!(requested = credit, current = self.credit, "Rejected credit out of range");
            return Err(CreditError::OutOfRange {
                requested: credit,
                max: MAX_COINS,
            });
        }
        self.credit = credit as u8;
        debug!(credit = self.credit, "Credit changed");
        Ok(self.credit)
    }

    /// Adds `delta` (which may be negative) to the credit.
    pub fn change_credit(&mut self, delta: i64) -> Result<u8, CreditError> {
        self.set_credit(i64::from(self.credit).saturating_add(delta))
    }

    /// Adds a single coin.
    pub fn insert_coin(&mut self) -> Result<u8, CreditError> {
        self.change_credit(1)
    }

    /// Takes one credit if there is any; does nothing at zero.
    pub fn consume_credit(&mut self) -> bool {
        self.has_credit() && self.change_credit(-1).is_ok()
    }
}
