//! In-game currency amounts.
//!
//! Prices are carried as a single copper amount. For display they split into
//! gold (10 000 copper), silver (100 copper), and copper. Zero denominations
//! are hidden, except that copper is always shown when nothing else is, so
//! an empty purse still reads `0c`.

use std::fmt;

const COPPER_PER_SILVER: u64 = 100;
const COPPER_PER_GOLD: u64 = 10_000;

/// Coin denomination used when rendering an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denomination {
    Gold,
    Silver,
    Copper,
}

impl Denomination {
    /// Short suffix used in plain-text output.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Gold => "g",
            Self::Silver => "s",
            Self::Copper => "c",
        }
    }
}

/// Amount of money in copper.
///
/// # Examples
/// ```
/// use salvage_ledger::domain::Coins;
///
/// assert_eq!(Coins::from_copper(10_203).to_string(), "1g 2s 3c");
/// assert_eq!(Coins::from_copper(10_000).to_string(), "1g");
/// assert_eq!(Coins::from_copper(0).to_string(), "0c");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Coins(u64);

impl Coins {
    #[must_use]
    pub const fn from_copper(copper: u64) -> Self {
        Self(copper)
    }

    #[must_use]
    pub const fn total_copper(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn gold(self) -> u64 {
        self.0 / COPPER_PER_GOLD
    }

    #[must_use]
    pub const fn silver(self) -> u64 {
        (self.0 % COPPER_PER_GOLD) / COPPER_PER_SILVER
    }

    #[must_use]
    pub const fn copper(self) -> u64 {
        self.0 % COPPER_PER_SILVER
    }

    /// Denominations to display, largest first.
    #[must_use]
    pub fn visible_parts(self) -> Vec<(Denomination, u64)> {
        let mut parts = Vec::with_capacity(3);
        if self.gold() > 0 {
            parts.push((Denomination::Gold, self.gold()));
        }
        if self.silver() > 0 {
            parts.push((Denomination::Silver, self.silver()));
        }
        if self.copper() > 0 || parts.is_empty() {
            parts.push((Denomination::Copper, self.copper()));
        }
        parts
    }

    /// Scale a unit price by `numerator / denominator`, rounding down.
    ///
    /// Returns `None` when `denominator` is zero.
    #[must_use]
    pub fn scaled(self, numerator: u32, denominator: u32) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        let total = u128::from(self.0) * u128::from(numerator) / u128::from(denominator);
        u64::try_from(total).ok().map(Self)
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (denomination, amount) in self.visible_parts() {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{amount}{}", denomination.suffix())?;
            first = false;
        }
        Ok(())
    }
}
