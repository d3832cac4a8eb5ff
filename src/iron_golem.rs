//! Iron golem calculator.
//!
//! The iron golem is built from an item and fights with it. Its damage
//! comes from the weapon base and any rune word in it rather than from a
//! skill curve. Every rolled rune word value (enhanced damage, added
//! damage, attack rating, aura levels) is a range, so the calculator
//! evaluates each roll [`Scenario`] separately and reports a full
//! difficulty × enemy class × scenario matrix.
//!
//! For every cell:
//!
//! ```text
//! physical = floor(weapon × (1 + (ED + classED) / 100)) + flat
//! damage   = floor(physical × auraDamage × 1.10) + elemental
//! AR       = floor((row + 25·L + charLevel·k + flatAR) × auraAR × (1 + AR% / 100))
//! ```

use crate::aura::{AuraLevels, AuraSource};
use crate::modifiers::{aggregate, FanaticismResolver, ModifierSet, SourceAware};
use crate::range::RangeValue;
use crate::result::{DifficultyStats, IronGolemResult, ScenarioCell, ScenarioMatrix};
use crate::runeword::RuneWord;
use crate::scenario::{Difficulty, EnemyClass, PerDifficulty, Scenario};
use crate::stat_line::{AttackMode, AttackTarget};
use crate::summon::{
    floor_i32, life_regen_per_second, per_level, SummonProfile, AVERAGE_CRIT_FACTOR,
};
use crate::tables::{MonsterStatRow, MonsterStatTable, WeaponBase};
use tracing::debug;

/// Upper-bound enhanced damage from a superior base.
pub const SUPERIOR_ENHANCED_DAMAGE: i32 = 15;

/// Flat damage the golem adds to one-handed weapons.
pub const ONE_HANDED_BONUS: PerDifficulty<i32> = PerDifficulty::new(5, 10, 15);

/// Attack rating per character level.
pub const CHARACTER_LEVEL_ATTACK_RATING: PerDifficulty<i32> = PerDifficulty::new(2, 4, 6);

const ELEMENTAL_KINDS: &[&str] = &[
    "FireDamage",
    "ColdDamage",
    "LightningDamage",
    "PoisonDamage",
    "MagicDamage",
];

/// Everything an iron golem calculation needs besides the stat table.
///
/// Built with [`IronGolemInputs::new`] and refined with the builder
/// methods; unset values are zero, no auras, no rune word and a
/// non-ethereal base.
///
/// # Examples
///
/// ```rust
/// use cainstat::category::ItemCategory;
/// use cainstat::tables::parse_weapon_table;
/// use cainstat::{Aura, AuraLevels, IronGolemInputs};
///
/// let swords = parse_weapon_table(
///     ItemCategory::Swords,
///     "header\nPhase Blade | Elite | 54 | 31 | 35 | -30 | 6 | 2 | 25 | 136 | 54\n",
/// );
/// let inputs = IronGolemInputs::new(20, &swords[0])
///     .mastery(10)
///     .character_level(90)
///     .auras(AuraLevels::new().with(Aura::Might, 12))
///     .ethereal(true);
///
/// assert_eq!(inputs.character_level, 90);
/// assert!(inputs.rune_word.is_none());
/// ```
pub struct IronGolemInputs<'a> {
    /// Iron Golem skill level; selects the monster stat row.
    pub skill_level: u32,
    /// Golem Mastery level, driving percent life.
    pub mastery_level: u32,
    /// Summon Resist level.
    pub resist_level: u32,
    /// Summoner's character level, added to attack rating per difficulty.
    pub character_level: u32,
    /// Auras from the party or the summoner.
    pub auras: AuraLevels,
    /// Base item the golem is made from.
    pub weapon: &'a WeaponBase,
    /// Whether the base is ethereal; ignored for categories that cannot be.
    pub ethereal: bool,
    /// Rune word socketed in the base, if any.
    pub rune_word: Option<&'a RuneWord>,
    /// Rule deciding whose Fanaticism the golem gets.
    pub resolver: &'a dyn FanaticismResolver,
}

impl<'a> IronGolemInputs<'a> {
    /// Inputs with no auras, no rune word, and the source-aware
    /// Fanaticism rule.
    pub fn new(skill_level: u32, weapon: &'a WeaponBase) -> Self {
        Self {
            skill_level,
            mastery_level: 0,
            resist_level: 0,
            character_level: 0,
            auras: AuraLevels::new(),
            weapon,
            ethereal: false,
            rune_word: None,
            resolver: &SourceAware,
        }
    }

    /// Set the Golem Mastery level.
    pub fn mastery(mut self, level: u32) -> Self {
        self.mastery_level = level;
        self
    }

    /// Set the Summon Resist level.
    pub fn resist(mut self, level: u32) -> Self {
        self.resist_level = level;
        self
    }

    /// Set the summoner's character level.
    pub fn character_level(mut self, level: u32) -> Self {
        self.character_level = level;
        self
    }

    /// Replace the external aura levels.
    pub fn auras(mut self, auras: AuraLevels) -> Self {
        self.auras = auras;
        self
    }

    /// Mark the base as ethereal.
    pub fn ethereal(mut self, ethereal: bool) -> Self {
        self.ethereal = ethereal;
        self
    }

    /// Socket a rune word into the base.
    pub fn rune_word(mut self, rune_word: &'a RuneWord) -> Self {
        self.rune_word = Some(rune_word);
        self
    }

    /// Swap the Fanaticism resolution rule, e.g. for [`crate::AlwaysAlly`].
    pub fn resolver(mut self, resolver: &'a dyn FanaticismResolver) -> Self {
        self.resolver = resolver;
        self
    }
}

/// Rune word bonuses relevant to the golem, zero when there is no rune word.
#[derive(Debug, Clone, Copy, Default)]
struct ItemBonuses {
    enhanced_damage: RangeValue,
    enhanced_damage_undead: RangeValue,
    enhanced_damage_demon: RangeValue,
    added_damage: RangeValue,
    min_damage: RangeValue,
    max_damage: RangeValue,
    damage: RangeValue,
    elemental: RangeValue,
}

impl ItemBonuses {
    fn from_rune_word(rune_word: Option<&RuneWord>) -> Self {
        let mut bonuses = rune_word.map_or_else(Self::default, |rw| Self {
            enhanced_damage: rw.generic_range("EnhancedDamage", None),
            enhanced_damage_undead: rw.class_range("EnhancedDamage", AttackTarget::Undead),
            enhanced_damage_demon: rw.class_range("EnhancedDamage", AttackTarget::Demon),
            added_damage: rw.generic_range("AddedDamage", None),
            min_damage: rw.generic_range("MinDamage", None),
            max_damage: rw.generic_range("MaxDamage", None),
            damage: rw.generic_range("Damage", None),
            elemental: ELEMENTAL_KINDS
                .iter()
                .map(|kind| rw.generic_range(kind, None))
                .fold(RangeValue::ZERO, |acc, v| acc + v),
        });
        bonuses.enhanced_damage = bonuses.enhanced_damage.widen_max(SUPERIOR_ENHANCED_DAMAGE);
        bonuses
    }

    fn class_enhanced_damage(&self, class: EnemyClass, scenario: Scenario) -> i32 {
        match class {
            EnemyClass::Normal => 0,
            EnemyClass::Undead => self.enhanced_damage_undead.pick(scenario),
            EnemyClass::Demon => self.enhanced_damage_demon.pick(scenario),
        }
    }
}

fn class_target(class: EnemyClass) -> Option<AttackTarget> {
    match class {
        EnemyClass::Normal => None,
        EnemyClass::Undead => Some(AttackTarget::Undead),
        EnemyClass::Demon => Some(AttackTarget::Demon),
    }
}

/// Attack rating bonus of one mode against one enemy class.
fn attack_rating_bonus(
    rune_word: Option<&RuneWord>,
    class: EnemyClass,
    mode: AttackMode,
    scenario: Scenario,
) -> i32 {
    let Some(rw) = rune_word else {
        return 0;
    };
    let all = rw.attack_rating(AttackTarget::All, mode).pick(scenario);
    let targeted = class_target(class)
        .map(|target| rw.attack_rating(target, mode).pick(scenario))
        .unwrap_or(0);
    all + targeted
}

struct CellInputs<'a> {
    inputs: &'a IronGolemInputs<'a>,
    bonuses: &'a ItemBonuses,
    row: &'a MonsterStatRow,
    weapon_damage: RangeValue,
}

impl CellInputs<'_> {
    fn compute(
        &self,
        difficulty: Difficulty,
        class: EnemyClass,
        scenario: Scenario,
        modifiers: &ModifierSet,
    ) -> ScenarioCell {
        let b = self.bonuses;
        let type_bonus = if self.inputs.weapon.is_two_handed() {
            0
        } else {
            ONE_HANDED_BONUS[difficulty]
        };
        let flat = b.damage.pick(scenario) + type_bonus;
        let to_min = b.added_damage.min + b.min_damage.pick(scenario) + flat;
        let to_max = b.added_damage.max + b.max_damage.pick(scenario) + flat;

        let ed = b.enhanced_damage.pick(scenario) + b.class_enhanced_damage(class, scenario);
        let ed_factor = 1.0 + f64::from(ed) / 100.0;
        let aura_factor = modifiers.damage_multiplier() * AVERAGE_CRIT_FACTOR;

        let physical = |base: i32, to: i32| floor_i32(f64::from(base) * ed_factor) + to;
        let damage_min =
            floor_i32(f64::from(physical(self.weapon_damage.min, to_min)) * aura_factor)
                + b.elemental.min;
        let damage_max =
            floor_i32(f64::from(physical(self.weapon_damage.max, to_max)) * aura_factor)
                + b.elemental.max;

        let rune_word = self.inputs.rune_word;
        let flat_ar = attack_rating_bonus(rune_word, class, AttackMode::Additive, scenario);
        let percent_ar = attack_rating_bonus(rune_word, class, AttackMode::Percent, scenario);
        let base_ar = i64::from(SummonProfile::IRON_GOLEM.attack_rating(
            self.row,
            difficulty,
            self.inputs.skill_level,
        )) + per_level(
            CHARACTER_LEVEL_ATTACK_RATING[difficulty],
            self.inputs.character_level,
        ) + i64::from(flat_ar);
        let attack_rating = floor_i32(
            base_ar as f64
                * modifiers.attack_rating_multiplier()
                * (1.0 + f64::from(percent_ar) / 100.0),
        );

        ScenarioCell::new(RangeValue::new(damage_min, damage_max), attack_rating)
    }
}

/// Calculate an iron golem built from `inputs.weapon`.
///
/// Returns `None` when the skill level is zero or has no stat row.
pub fn iron_golem(table: &MonsterStatTable, inputs: &IronGolemInputs<'_>) -> Option<IronGolemResult> {
    let level = inputs.skill_level;
    if level == 0 {
        return None;
    }
    let Some(row) = table.row(level) else {
        debug!(level, "no monster stat row for iron golem");
        return None;
    };

    let profile = &SummonProfile::IRON_GOLEM;
    let bonuses = ItemBonuses::from_rune_word(inputs.rune_word);
    let cell = CellInputs {
        inputs,
        bonuses: &bonuses,
        row,
        weapon_damage: inputs.weapon.damage(inputs.ethereal),
    };
    let item_auras = inputs.rune_word.map(|rw| rw as &dyn AuraSource);

    let mut scenarios = ScenarioMatrix::default();
    let mut average_modifiers = ModifierSet::none();
    for scenario in Scenario::ALL {
        let modifiers = aggregate(&inputs.auras, item_auras, scenario, inputs.resolver);
        for difficulty in Difficulty::ALL {
            for class in EnemyClass::ALL {
                let computed = cell.compute(difficulty, class, scenario, &modifiers);
                scenarios.set(difficulty, class, scenario, computed);
            }
        }
        if scenario == Scenario::Avg {
            average_modifiers = modifiers;
        }
    }

    let per_difficulty = PerDifficulty::from_fn(|difficulty| {
        let average = scenarios.get(difficulty, EnemyClass::Normal, Scenario::Avg);
        let life = profile.life(row, difficulty, level, inputs.mastery_level, &average_modifiers);
        DifficultyStats {
            damage: average.damage(),
            attack_rating: average.attack_rating,
            defense: profile.defense(row, difficulty, level, &average_modifiers),
            life,
            life_regen_per_second: life_regen_per_second(profile.regen, life),
        }
    });

    debug!(
        level,
        weapon = %inputs.weapon.name,
        rune_word = inputs.rune_word.map(|rw| rw.name.as_str()).unwrap_or("-"),
        "calculated iron golem"
    );

    Some(IronGolemResult {
        skill_level: level,
        per_difficulty,
        resistances: profile.resistances(inputs.resist_level),
        scenarios,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aura::Aura;
    use crate::category::ItemCategory;
    use crate::modifiers::AlwaysAlly;
    use crate::runeword::parse_rune_word_block;
    use crate::tables::parse_weapon_table;

    fn table() -> MonsterStatTable {
        MonsterStatTable::parse("1 10 20 30\n20 300 600 900\n")
    }

    fn weapon(category: ItemCategory) -> WeaponBase {
        let text = "header\nTest Blade | Exceptional | 40 | 10 | 20 | 0 | 4 | 2 | 50 | 50 | 30\n";
        parse_weapon_table(category, text).remove(0)
    }

    #[test]
    fn test_bare_weapon_one_handed() {
        let sword = weapon(ItemCategory::Swords);
        let inputs = IronGolemInputs::new(1, &sword);
        let result = iron_golem(&table(), &inputs).unwrap();

        // worst: ED 0, (10 + 5) * 1.1
        let worst = result.cell(Difficulty::Normal, EnemyClass::Normal, Scenario::Worst);
        assert_eq!((worst.damage_min, worst.damage_max), (16, 27));
        // best: ED 15, floor(20 * 1.15) + 5 = 28, * 1.1
        let best = result.cell(Difficulty::Normal, EnemyClass::Normal, Scenario::Best);
        assert_eq!(best.damage_max, 30);
        // row 10 + 25
        assert_eq!(worst.attack_rating, 35);
    }

    #[test]
    fn test_ethereal_base() {
        let sword = weapon(ItemCategory::Swords);
        let inputs = IronGolemInputs::new(1, &sword).ethereal(true);
        let result = iron_golem(&table(), &inputs).unwrap();
        let worst = result.cell(Difficulty::Normal, EnemyClass::Normal, Scenario::Worst);
        // (15 + 5) * 1.1, (30 + 5) * 1.1
        assert_eq!((worst.damage_min, worst.damage_max), (22, 38));
    }

    #[test]
    fn test_character_level_attack_rating() {
        let sword = weapon(ItemCategory::Swords);
        let inputs = IronGolemInputs::new(20, &sword).character_level(90);
        let result = iron_golem(&table(), &inputs).unwrap();
        let hell = result.cell(Difficulty::Hell, EnemyClass::Normal, Scenario::Avg);
        assert_eq!(hell.attack_rating, 900 + 500 + 540);
    }

    #[test]
    fn test_class_bonuses_only_hit_their_class() {
        let rw = parse_rune_word_block(
            "Test\nStat: EnhancedDamage | Undead | 100\nStat: AttackRating | Demon | 50\n",
        )
        .unwrap();
        let sword = weapon(ItemCategory::Swords);
        let inputs = IronGolemInputs::new(1, &sword).rune_word(&rw);
        let result = iron_golem(&table(), &inputs).unwrap();

        let normal = result.cell(Difficulty::Normal, EnemyClass::Normal, Scenario::Worst);
        let undead = result.cell(Difficulty::Normal, EnemyClass::Undead, Scenario::Worst);
        let demon = result.cell(Difficulty::Normal, EnemyClass::Demon, Scenario::Worst);

        // (20 + 5) * 1.1
        assert_eq!(undead.damage_min, 27);
        assert_eq!(normal.damage_min, demon.damage_min);
        assert_eq!(demon.attack_rating, normal.attack_rating + 50);
        assert_eq!(undead.attack_rating, normal.attack_rating);
    }

    #[test]
    fn test_plural_class_subtypes() {
        let rw = parse_rune_word_block(
            "Test\nStat: EnhancedDamage | Demons | 100\nStat: AttackRating | Demons | 50\n",
        )
        .unwrap();
        let sword = weapon(ItemCategory::Swords);
        let inputs = IronGolemInputs::new(1, &sword).rune_word(&rw);
        let result = iron_golem(&table(), &inputs).unwrap();

        let normal = result.cell(Difficulty::Normal, EnemyClass::Normal, Scenario::Worst);
        let demon = result.cell(Difficulty::Normal, EnemyClass::Demon, Scenario::Worst);

        // (20 + 5) * 1.1
        assert_eq!(demon.damage_min, 27);
        assert_eq!(normal.damage_min, 16);
        assert_eq!(demon.attack_rating, normal.attack_rating + 50);
    }

    #[test]
    fn test_fanaticism_resolver_changes_damage() {
        let rw = parse_rune_word_block("Test\nStat: Aura | Fanaticism | 5\n").unwrap();
        let sword = weapon(ItemCategory::Swords);
        let aware = iron_golem(&table(), &IronGolemInputs::new(1, &sword).rune_word(&rw)).unwrap();
        let ally = iron_golem(
            &table(),
            &IronGolemInputs::new(1, &sword)
                .rune_word(&rw)
                .resolver(&AlwaysAlly),
        )
        .unwrap();

        let aware_cell = aware.cell(Difficulty::Normal, EnemyClass::Normal, Scenario::Avg);
        let ally_cell = ally.cell(Difficulty::Normal, EnemyClass::Normal, Scenario::Avg);
        assert!(aware_cell.damage_max > ally_cell.damage_max);
        assert_eq!(aware_cell.attack_rating, ally_cell.attack_rating);
    }

    #[test]
    fn test_summary_uses_average_roll() {
        let sword = weapon(ItemCategory::Swords);
        let inputs = IronGolemInputs::new(1, &sword)
            .mastery(1)
            .resist(20)
            .auras(AuraLevels::new().with(Aura::Shout, 1));
        let result = iron_golem(&table(), &inputs).unwrap();
        let normal = result.per_difficulty[Difficulty::Normal];
        let cell = result.cell(Difficulty::Normal, EnemyClass::Normal, Scenario::Avg);

        assert_eq!(normal.damage, cell.damage());
        // (10 + 35) * 2.0
        assert_eq!(normal.defense, 90);
        // (306 + 10) * 1.2
        assert_eq!(normal.life, 379);
        assert_eq!(result.resistances.cold, 66);
    }

    #[test]
    fn test_missing_row() {
        let sword = weapon(ItemCategory::Swords);
        assert!(iron_golem(&table(), &IronGolemInputs::new(5, &sword)).is_none());
        assert!(iron_golem(&table(), &IronGolemInputs::new(0, &sword)).is_none());
    }
}
