//! Item level and affix level solvers.
//!
//! Each solver takes three optional values, of which exactly two must be
//! known, and fills in the third.

use crate::error::FormulaError;
use serde::{Deserialize, Serialize};

const LEVEL_NAMES: [&str; 3] = ["character level", "monster level", "item level"];
const AFFIX_NAMES: [&str; 3] = ["item level", "quality level", "affix level"];

/// Round half up, matching how the game's calculators display levels.
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

fn require_two(values: [Option<i32>; 3], names: [&'static str; 3]) -> Result<(), FormulaError> {
    let given = values.iter().filter(|v| v.is_some()).count();
    if given == 2 {
        Ok(())
    } else {
        Err(FormulaError::WrongArity {
            names: names.to_vec(),
            given,
        })
    }
}

fn in_level_range(name: &'static str, value: i32) -> Result<i32, FormulaError> {
    if (1..=99).contains(&value) {
        Ok(value)
    } else {
        Err(FormulaError::OutOfRange { name, value })
    }
}

/// Character, monster and item level of a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropLevels {
    pub character_level: i32,
    pub monster_level: i32,
    pub item_level: i32,
}

/// `2 × known_item − other`, the inverse of the item level average.
///
/// The result must itself be a valid level.
fn solve_from_item_level(
    name: &'static str,
    item_level: i32,
    other: i32,
) -> Result<i32, FormulaError> {
    let value = item_level
        .checked_mul(2)
        .and_then(|doubled| doubled.checked_sub(other))
        .ok_or(FormulaError::OutOfRange {
            name,
            value: item_level,
        })?;
    in_level_range(name, value)
}

/// Solve `ilvl = clvl / 2 + mlvl / 2` for whichever value is missing.
///
/// Every given and solved level must lie in `1..=99`.
///
/// # Examples
///
/// ```rust
/// use cainstat::item_level::calculate_item_level;
///
/// let levels = calculate_item_level(Some(90), Some(85), None).unwrap();
/// assert_eq!(levels.item_level, 88);
///
/// let levels = calculate_item_level(None, Some(85), Some(88)).unwrap();
/// assert_eq!(levels.character_level, 91);
///
/// assert!(calculate_item_level(Some(90), None, None).is_err());
/// assert!(calculate_item_level(None, Some(90), Some(10)).is_err());
/// ```
pub fn calculate_item_level(
    character_level: Option<i32>,
    monster_level: Option<i32>,
    item_level: Option<i32>,
) -> Result<DropLevels, FormulaError> {
    require_two([character_level, monster_level, item_level], LEVEL_NAMES)?;
    let check = |name: &'static str, value: Option<i32>| {
        value.map(|v| in_level_range(name, v)).transpose()
    };
    let character_level = check(LEVEL_NAMES[0], character_level)?;
    let monster_level = check(LEVEL_NAMES[1], monster_level)?;
    let item_level = check(LEVEL_NAMES[2], item_level)?;

    let levels = match (character_level, monster_level, item_level) {
        (Some(c), Some(m), None) => DropLevels {
            character_level: c,
            monster_level: m,
            item_level: round_half_up(f64::from(c) / 2.0 + f64::from(m) / 2.0),
        },
        (None, Some(m), Some(i)) => DropLevels {
            character_level: solve_from_item_level(LEVEL_NAMES[0], i, m)?,
            monster_level: m,
            item_level: i,
        },
        (Some(c), None, Some(i)) => DropLevels {
            character_level: c,
            monster_level: solve_from_item_level(LEVEL_NAMES[1], i, c)?,
            item_level: i,
        },
        _ => unreachable!("exactly two levels were checked above"),
    };
    Ok(levels)
}

fn affix_threshold(quality_level: i32) -> i32 {
    99 - quality_level / 2
}

fn affix_level_unchecked(item_level: i32, quality_level: i32) -> i32 {
    let top = item_level.max(quality_level);
    let alvl = if top < affix_threshold(quality_level) {
        top - quality_level / 2
    } else {
        2 * top - 99
    };
    alvl.clamp(1, 99)
}

/// Affix level of an item, clamped to `1..=99`.
///
/// # Examples
///
/// ```rust
/// use cainstat::item_level::affix_level;
///
/// assert_eq!(affix_level(40, 20).unwrap(), 30);
/// assert_eq!(affix_level(85, 85).unwrap(), 71);
/// assert!(affix_level(0, 20).is_err());
/// ```
pub fn affix_level(item_level: i32, quality_level: i32) -> Result<i32, FormulaError> {
    let item_level = in_level_range("item level", item_level)?;
    let quality_level = in_level_range("quality level", quality_level)?;
    Ok(affix_level_unchecked(item_level, quality_level))
}

/// Item, quality and affix level of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffixLevels {
    pub item_level: i32,
    pub quality_level: i32,
    pub affix_level: i32,
}

/// Given two of item, quality and affix level, compute the third.
///
/// Solving backwards picks the smallest level consistent with the affix
/// formula; results are clamped to `1..=99`.
pub fn solve_affix(
    item_level: Option<i32>,
    quality_level: Option<i32>,
    affix_level: Option<i32>,
) -> Result<AffixLevels, FormulaError> {
    require_two([item_level, quality_level, affix_level], AFFIX_NAMES)?;
    let check = |name: &'static str, value: Option<i32>| {
        value.map(|v| in_level_range(name, v)).transpose()
    };
    let item_level = check("item level", item_level)?;
    let quality_level = check("quality level", quality_level)?;
    let affix_level = check("affix level", affix_level)?;

    let levels = match (item_level, quality_level, affix_level) {
        (Some(i), Some(q), None) => AffixLevels {
            item_level: i,
            quality_level: q,
            affix_level: affix_level_unchecked(i, q),
        },
        (None, Some(q), Some(a)) => {
            let below_threshold = a + q / 2;
            let i = if below_threshold < affix_threshold(q) {
                below_threshold.max(q)
            } else {
                ((a + 100) / 2).max(q)
            };
            AffixLevels {
                item_level: i.clamp(1, 99),
                quality_level: q,
                affix_level: a,
            }
        }
        (Some(i), None, Some(a)) => {
            let below_threshold = (i - a) * 2;
            let q = if (1..=99).contains(&below_threshold) {
                below_threshold
            } else {
                ((a + 99 - 2 * i) * 2).max(1)
            };
            AffixLevels {
                item_level: i,
                quality_level: q.clamp(1, 99),
                affix_level: a,
            }
        }
        _ => unreachable!("exactly two levels were checked above"),
    };
    Ok(levels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_errors() {
        let err = calculate_item_level(Some(1), Some(2), Some(3)).unwrap_err();
        assert_eq!(
            err,
            FormulaError::WrongArity {
                names: LEVEL_NAMES.to_vec(),
                given: 3
            }
        );
        assert!(solve_affix(None, None, Some(10)).is_err());
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(calculate_item_level(Some(1), Some(2), None).unwrap().item_level, 2);
        assert_eq!(calculate_item_level(Some(90), None, Some(88)).unwrap().monster_level, 86);
    }

    #[test]
    fn test_item_level_bounds() {
        assert_eq!(
            calculate_item_level(Some(i32::MAX), None, Some(i32::MIN)),
            Err(FormulaError::OutOfRange {
                name: "character level",
                value: i32::MAX
            })
        );
        assert_eq!(
            calculate_item_level(None, Some(0), Some(50)),
            Err(FormulaError::OutOfRange {
                name: "monster level",
                value: 0
            })
        );
        // 2 * 10 - 90
        assert_eq!(
            calculate_item_level(None, Some(90), Some(10)),
            Err(FormulaError::OutOfRange {
                name: "character level",
                value: -70
            })
        );
        assert_eq!(
            calculate_item_level(Some(99), Some(99), None).unwrap().item_level,
            99
        );
    }

    #[test]
    fn test_affix_level_edges() {
        assert_eq!(affix_level(1, 1).unwrap(), 1);
        assert_eq!(affix_level(99, 99).unwrap(), 99);
        assert_eq!(
            affix_level(40, 100),
            Err(FormulaError::OutOfRange {
                name: "quality level",
                value: 100
            })
        );
    }

    #[test]
    fn test_solve_affix_forward() {
        let levels = solve_affix(Some(40), Some(20), None).unwrap();
        assert_eq!(levels.affix_level, 30);
    }

    #[test]
    fn test_solve_affix_inverse_round_trips() {
        let levels = solve_affix(None, Some(20), Some(30)).unwrap();
        assert_eq!(levels.item_level, 40);
        assert_eq!(affix_level(levels.item_level, 20).unwrap(), 30);

        let levels = solve_affix(None, Some(85), Some(71)).unwrap();
        assert_eq!(levels.item_level, 85);

        let levels = solve_affix(Some(40), None, Some(30)).unwrap();
        assert_eq!(levels.quality_level, 20);
    }
}
