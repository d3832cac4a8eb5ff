//! The three calculation axes: difficulty tier, enemy class and roll scenario.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Game difficulty tier.
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
pub enum Difficulty {
    Normal,
    Nightmare,
    Hell,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Normal, Difficulty::Nightmare, Difficulty::Hell];

    pub fn index(self) -> usize {
        match self {
            Difficulty::Normal => 0,
            Difficulty::Nightmare => 1,
            Difficulty::Hell => 2,
        }
    }
}

/// Monster class of the target, which gates class-specific bonuses.
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
pub enum EnemyClass {
    Normal,
    Undead,
    Demon,
}

impl EnemyClass {
    pub const ALL: [EnemyClass; 3] = [EnemyClass::Normal, EnemyClass::Undead, EnemyClass::Demon];

    pub fn index(self) -> usize {
        match self {
            EnemyClass::Normal => 0,
            EnemyClass::Undead => 1,
            EnemyClass::Demon => 2,
        }
    }
}

/// Which end of every rolled range a calculation assumes.
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
#[strum(serialize_all = "lowercase")]
pub enum Scenario {
    Worst,
    Avg,
    Best,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::Worst, Scenario::Avg, Scenario::Best];

    pub fn index(self) -> usize {
        match self {
            Scenario::Worst => 0,
            Scenario::Avg => 1,
            Scenario::Best => 2,
        }
    }
}

/// One value per difficulty tier.
///
/// # Examples
///
/// ```rust
/// use cainstat::{Difficulty, PerDifficulty};
///
/// let bonus = PerDifficulty::new(5, 10, 15);
/// assert_eq!(bonus[Difficulty::Nightmare], 10);
/// assert_eq!(bonus.map(|v| v * 2)[Difficulty::Hell], 30);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerDifficulty<T> {
    pub normal: T,
    pub nightmare: T,
    pub hell: T,
}

impl<T> PerDifficulty<T> {
    pub const fn new(normal: T, nightmare: T, hell: T) -> Self {
        Self {
            normal,
            nightmare,
            hell,
        }
    }

    /// Build by evaluating `f` once per tier, in tier order.
    pub fn from_fn(mut f: impl FnMut(Difficulty) -> T) -> Self {
        Self {
            normal: f(Difficulty::Normal),
            nightmare: f(Difficulty::Nightmare),
            hell: f(Difficulty::Hell),
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> PerDifficulty<U> {
        PerDifficulty {
            normal: f(self.normal),
            nightmare: f(self.nightmare),
            hell: f(self.hell),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Difficulty, &T)> {
        Difficulty::ALL.into_iter().map(move |d| (d, &self[d]))
    }
}

impl<T> Index<Difficulty> for PerDifficulty<T> {
    type Output = T;

    fn index(&self, difficulty: Difficulty) -> &T {
        match difficulty {
            Difficulty::Normal => &self.normal,
            Difficulty::Nightmare => &self.nightmare,
            Difficulty::Hell => &self.hell,
        }
    }
}

impl<T> IndexMut<Difficulty> for PerDifficulty<T> {
    fn index_mut(&mut self, difficulty: Difficulty) -> &mut T {
        match difficulty {
            Difficulty::Normal => &mut self.normal,
            Difficulty::Nightmare => &mut self.nightmare,
            Difficulty::Hell => &mut self.hell,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_scenario_names() {
        assert_eq!(Scenario::Worst.to_string(), "worst");
        assert_eq!(Scenario::from_str("best").unwrap(), Scenario::Best);
    }

    #[test]
    fn test_indices_are_dense() {
        for (i, d) in Difficulty::ALL.iter().enumerate() {
            assert_eq!(d.index(), i);
        }
        for (i, c) in EnemyClass::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
        for (i, s) in Scenario::ALL.iter().enumerate() {
            assert_eq!(s.index(), i);
        }
    }

    #[test]
    fn test_per_difficulty_iter_order() {
        let values = PerDifficulty::from_fn(|d| d.index() * 10);
        let collected: Vec<_> = values.iter().map(|(d, v)| (d, *v)).collect();
        assert_eq!(
            collected,
            vec![
                (Difficulty::Normal, 0),
                (Difficulty::Nightmare, 10),
                (Difficulty::Hell, 20)
            ]
        );
    }
}
