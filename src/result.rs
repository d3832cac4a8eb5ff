//! Plain result records handed to the presentation layer.
//!
//! Everything here is read-only data: numbers, ranges and short labels.
//! Records serialize with serde and convert to a `serde_json::Value` for
//! formatters that work on untyped data.

use crate::modifiers::ModifierSet;
use crate::range::RangeValue;
use crate::scenario::{Difficulty, EnemyClass, PerDifficulty, Scenario};
use crate::summon::MageElement;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Which creature a result describes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
pub enum SummonKind {
    #[strum(serialize = "Skeleton")]
    Skeleton,
    #[strum(serialize = "Skeletal Mage")]
    SkeletalMage,
    #[strum(serialize = "Clay Golem")]
    ClayGolem,
    #[strum(serialize = "Blood Golem")]
    BloodGolem,
    #[strum(serialize = "Iron Golem")]
    IronGolem,
}

/// Combat numbers for one difficulty tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DifficultyStats {
    pub damage: RangeValue,
    pub attack_rating: i32,
    pub defense: i32,
    pub life: i32,
    /// Life regenerated per second, rounded to two decimals.
    pub life_regen_per_second: f64,
}

/// Resistances in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resistances {
    pub fire: i32,
    pub cold: i32,
    pub lightning: i32,
    pub poison: i32,
    pub physical: i32,
    pub magic: i32,
}

impl Resistances {
    /// The same value for the four elements, intrinsic physical and magic.
    pub fn elemental(value: i32, physical: i32, magic: i32) -> Self {
        Self {
            fire: value,
            cold: value,
            lightning: value,
            poison: value,
            physical,
            magic,
        }
    }
}

/// Result of a skeleton, mage or flesh golem calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummonResult {
    pub kind: SummonKind,
    pub skill_level: u32,
    /// Damage element; only skeletal mages carry one.
    pub element: Option<MageElement>,
    pub per_difficulty: PerDifficulty<DifficultyStats>,
    pub resistances: Resistances,
    /// Aura levels the numbers were computed with.
    pub modifiers: ModifierSet,
}

impl SummonResult {
    pub fn stats(&self, difficulty: Difficulty) -> &DifficultyStats {
        &self.per_difficulty[difficulty]
    }

    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// One cell of the iron golem scenario matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioCell {
    pub damage_min: i32,
    pub damage_max: i32,
    pub damage_avg: i32,
    pub attack_rating: i32,
}

impl ScenarioCell {
    pub fn new(damage: RangeValue, attack_rating: i32) -> Self {
        Self {
            damage_min: damage.min,
            damage_max: damage.max,
            damage_avg: damage.avg,
            attack_rating,
        }
    }

    pub fn damage(&self) -> RangeValue {
        RangeValue::new(self.damage_min, self.damage_max)
    }
}

/// Difficulty × enemy class × scenario grid of iron golem results.
///
/// # Examples
///
/// ```rust
/// use cainstat::result::{ScenarioCell, ScenarioMatrix};
/// use cainstat::range::RangeValue;
/// use cainstat::{Difficulty, EnemyClass, Scenario};
///
/// let mut matrix = ScenarioMatrix::default();
/// let cell = ScenarioCell::new(RangeValue::new(100, 200), 1500);
/// matrix.set(Difficulty::Hell, EnemyClass::Demon, Scenario::Best, cell);
///
/// assert_eq!(matrix.get(Difficulty::Hell, EnemyClass::Demon, Scenario::Best).damage_avg, 150);
/// assert_eq!(matrix.get(Difficulty::Normal, EnemyClass::Normal, Scenario::Worst).damage_avg, 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioMatrix {
    cells: [[[ScenarioCell; 3]; 3]; 3],
}

impl ScenarioMatrix {
    pub fn get(&self, difficulty: Difficulty, class: EnemyClass, scenario: Scenario) -> ScenarioCell {
        self.cells[difficulty.index()][class.index()][scenario.index()]
    }

    pub fn set(
        &mut self,
        difficulty: Difficulty,
        class: EnemyClass,
        scenario: Scenario,
        cell: ScenarioCell,
    ) {
        self.cells[difficulty.index()][class.index()][scenario.index()] = cell;
    }

    /// Every cell with its coordinates, difficulty-major.
    pub fn iter(&self) -> impl Iterator<Item = (Difficulty, EnemyClass, Scenario, ScenarioCell)> + '_ {
        Difficulty::ALL.into_iter().flat_map(move |d| {
            EnemyClass::ALL.into_iter().flat_map(move |c| {
                Scenario::ALL
                    .into_iter()
                    .map(move |s| (d, c, s, self.get(d, c, s)))
            })
        })
    }
}

/// Result of an iron golem calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IronGolemResult {
    pub skill_level: u32,
    /// Average-roll numbers against normal monsters.
    pub per_difficulty: PerDifficulty<DifficultyStats>,
    pub resistances: Resistances,
    pub scenarios: ScenarioMatrix,
}

impl IronGolemResult {
    pub fn cell(&self, difficulty: Difficulty, class: EnemyClass, scenario: Scenario) -> ScenarioCell {
        self.scenarios.get(difficulty, class, scenario)
    }

    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_iter_covers_every_cell() {
        let matrix = ScenarioMatrix::default();
        assert_eq!(matrix.iter().count(), 27);
        let (d, c, s, _) = matrix.iter().last().unwrap();
        assert_eq!((d, c, s), (Difficulty::Hell, EnemyClass::Demon, Scenario::Best));
    }

    #[test]
    fn test_cell_avg_from_range() {
        let cell = ScenarioCell::new(RangeValue::new(31, 40), 0);
        assert_eq!(cell.damage_avg, 35);
        assert_eq!(cell.damage(), RangeValue::new(31, 40));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(SummonKind::SkeletalMage.to_string(), "Skeletal Mage");
    }

    #[test]
    fn test_result_to_value() {
        let result = IronGolemResult {
            skill_level: 1,
            per_difficulty: PerDifficulty::default(),
            resistances: Resistances::elemental(28, 0, 0),
            scenarios: ScenarioMatrix::default(),
        };
        let value = result.to_value().unwrap();
        assert_eq!(value["resistances"]["fire"], 28);
        assert_eq!(value["per_difficulty"]["hell"]["life"], 0);
    }
}
