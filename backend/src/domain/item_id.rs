//! Canonical game item identifier.
//!
//! Item ids reach the application as form fields, JSON numbers, and numeric
//! strings. They are parsed into [`ItemId`] at the edge so the rest of the
//! code never compares a string id against a numeric one.

use std::fmt;
use std::num::{IntErrorKind, NonZeroU32};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Validation errors returned when parsing an [`ItemId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemIdValidationError {
    #[error("item id must not be empty")]
    Empty,
    #[error("item id must be a whole number, got {value:?}")]
    NotNumeric { value: String },
    #[error("item id must be greater than zero")]
    Zero,
    #[error("item id {value} is out of range")]
    OutOfRange { value: String },
}

/// Positive 32-bit game item identifier.
///
/// # Examples
/// ```
/// use salvage_ledger::domain::ItemId;
///
/// let id: ItemId = "19721".parse().expect("valid id");
/// assert_eq!(id.get(), 19721);
/// assert!("0".parse::<ItemId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ItemId(NonZeroU32);

impl ItemId {
    /// Construct an id from its numeric value.
    pub fn new(raw: u32) -> Result<Self, ItemIdValidationError> {
        NonZeroU32::new(raw)
            .map(Self)
            .ok_or(ItemIdValidationError::Zero)
    }

    /// Numeric value of the id.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl FromStr for ItemId {
    type Err = ItemIdValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ItemIdValidationError::Empty);
        }
        // `u32::from_str` also takes a leading `+`.
        if !s.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(ItemIdValidationError::NotNumeric {
                value: s.to_owned(),
            });
        }
        let raw = s.parse::<u32>().map_err(|err| match err.kind() {
            IntErrorKind::PosOverflow => ItemIdValidationError::OutOfRange {
                value: s.to_owned(),
            },
            _ => ItemIdValidationError::NotNumeric {
                value: s.to_owned(),
            },
        })?;
        Self::new(raw)
    }
}

impl TryFrom<u32> for ItemId {
    type Error = ItemIdValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<u64> for ItemId {
    type Error = ItemIdValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        let raw = u32::try_from(value).map_err(|_| ItemIdValidationError::OutOfRange {
            value: value.to_string(),
        })?;
        Self::new(raw)
    }
}

impl TryFrom<i64> for ItemId {
    type Error = ItemIdValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let raw = u32::try_from(value).map_err(|_| ItemIdValidationError::OutOfRange {
            value: value.to_string(),
        })?;
        Self::new(raw)
    }
}

impl From<ItemId> for u32 {
    fn from(value: ItemId) -> Self {
        value.get()
    }
}

impl From<ItemId> for i64 {
    fn from(value: ItemId) -> Self {
        Self::from(value.get())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
