//! Effective magic find.
//!
//! Magic find has diminishing returns for unique, set and rare items:
//! `effective = floor(f × mf / (f + mf))` with a per-quality factor `f`.
//! Magic items use the raw value.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Item quality tiers affected by magic find.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
pub enum ItemQuality {
    Unique,
    Set,
    Rare,
    Magic,
}

impl ItemQuality {
    /// Diminishing-returns factor, `None` when there are none.
    pub fn factor(self) -> Option<i64> {
        match self {
            ItemQuality::Unique => Some(250),
            ItemQuality::Set => Some(500),
            ItemQuality::Rare => Some(600),
            ItemQuality::Magic => None,
        }
    }
}

/// Effective magic find of `raw` for one quality tier.
///
/// Negative input is treated as zero.
///
/// # Examples
///
/// ```rust
/// use cainstat::magic_find::{effective_magic_find, ItemQuality};
///
/// assert_eq!(effective_magic_find(300, ItemQuality::Unique), 136);
/// assert_eq!(effective_magic_find(300, ItemQuality::Magic), 300);
/// assert_eq!(effective_magic_find(0, ItemQuality::Rare), 0);
/// ```
pub fn effective_magic_find(raw: i64, quality: ItemQuality) -> i64 {
    let raw = raw.max(0);
    match quality.factor() {
        Some(factor) => factor * raw / (factor + raw),
        None => raw,
    }
}

/// Effective magic find for every quality tier.
pub fn effective_magic_find_table(raw: i64) -> Vec<(ItemQuality, i64)> {
    ItemQuality::iter()
        .map(|quality| (quality, effective_magic_find(raw, quality)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factors_order_returns() {
        let table = effective_magic_find_table(500);
        assert_eq!(
            table,
            vec![
                (ItemQuality::Unique, 166),
                (ItemQuality::Set, 250),
                (ItemQuality::Rare, 272),
                (ItemQuality::Magic, 500),
            ]
        );
    }

    #[test]
    fn test_negative_is_zero() {
        assert_eq!(effective_magic_find(-50, ItemQuality::Magic), 0);
        assert_eq!(effective_magic_find(-50, ItemQuality::Unique), 0);
    }
}
