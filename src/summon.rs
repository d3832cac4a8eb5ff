//! Summon calculators.
//!
//! Skeletons, skeletal mages and the flesh golems share one formula shape;
//! what differs between them is captured in a [`SummonProfile`]. A
//! calculation combines three inputs:
//!
//! 1. the monster stat row for the controlling skill level,
//! 2. piecewise skill-level curves from the profile,
//! 3. the aggregated aura modifiers.
//!
//! Every calculator returns `None` when the skill level is zero or the
//! stat table has no row for it.

use crate::aura::AuraLevels;
use crate::modifiers::{aggregate, ModifierSet, SourceAware};
use crate::result::{DifficultyStats, Resistances, SummonKind, SummonResult};
use crate::range::RangeValue;
use crate::scenario::{Difficulty, PerDifficulty, Scenario};
use crate::tables::{MonsterStatRow, MonsterStatTable};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use tracing::debug;

/// Average-damage inflation from a 5% chance of double damage.
pub const CRIT_CHANCE: f64 = 0.05;
pub const CRIT_MULTIPLIER: f64 = 2.0;
pub const AVERAGE_CRIT_FACTOR: f64 = 1.0 + CRIT_CHANCE * CRIT_MULTIPLIER;

/// Resistance ceiling granted by the summon resist skill.
pub const MAX_SUMMON_RESIST: i32 = 75;

/// First skill level of each curve band after the first.
const BAND_STARTS: [u32; 4] = [9, 17, 23, 29];

/// Round a formula result down, tolerating float noise just below an integer.
///
/// Results beyond the `i32` range saturate.
pub(crate) fn floor_i32(value: f64) -> i32 {
    (value + 1e-9).floor() as i32
}

/// Narrow a widened intermediate, saturating at the `i32` bounds.
pub(crate) fn saturate_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// `per_level × level` without overflow.
pub(crate) fn per_level(per_level: i32, level: u32) -> i64 {
    i64::from(per_level) * i64::from(level)
}

/// Piecewise-linear skill curve over five level bands
/// (1–8, 9–16, 17–22, 23–28, 29+).
///
/// # Examples
///
/// ```rust
/// use cainstat::summon::BandCurve;
///
/// let curve = BandCurve::new(2, [1, 2, 3, 4, 5]);
/// assert_eq!(curve.value(1), 2);
/// assert_eq!(curve.value(8), 9);
/// assert_eq!(curve.value(10), 13);
/// assert_eq!(curve.value(0), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandCurve {
    /// Value at level 1.
    pub base: i32,
    /// Increment per level inside each band.
    pub steps: [i32; 5],
}

impl BandCurve {
    pub const ZERO: BandCurve = BandCurve::new(0, [0; 5]);

    pub const fn new(base: i32, steps: [i32; 5]) -> Self {
        Self { base, steps }
    }

    pub fn value(&self, level: u32) -> i32 {
        if level == 0 {
            return 0;
        }
        let firsts = std::iter::once(2).chain(BAND_STARTS);
        let lasts = BAND_STARTS
            .iter()
            .map(|start| start - 1)
            .chain(std::iter::once(u32::MAX));
        let increments: i64 = firsts
            .zip(lasts)
            .zip(self.steps)
            .filter(|((first, _), _)| level >= *first)
            .map(|((first, last), step)| per_level(step, level.min(last) - first + 1))
            .sum();
        saturate_i32(i64::from(self.base) + increments)
    }
}

/// Skill-driven percent damage bonus, active only above `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDamageBonus {
    pub per_level: i32,
    pub threshold: u32,
}

impl SkillDamageBonus {
    pub const NONE: SkillDamageBonus = SkillDamageBonus {
        per_level: 0,
        threshold: 0,
    };

    pub fn percent(&self, level: u32) -> i32 {
        if level > self.threshold {
            saturate_i32(per_level(self.per_level, level - self.threshold))
        } else {
            0
        }
    }
}

/// Competing formulas for the skill-gated percent life bonus.
///
/// Both are zero up to level 3 and never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeBonusStrategy {
    /// `50 × (L − 3)`
    #[default]
    PerLevelAboveThree,
    /// `10 × L − 21`
    LinearOffset,
}

impl LifeBonusStrategy {
    pub fn percent(self, level: u32) -> i32 {
        if level <= 3 {
            return 0;
        }
        let percent = match self {
            LifeBonusStrategy::PerLevelAboveThree => per_level(50, level - 3),
            LifeBonusStrategy::LinearOffset => (per_level(10, level) - 21).max(0),
        };
        saturate_i32(percent)
    }
}

/// How a profile earns percent life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeBonus {
    /// Driven by the primary skill level.
    SkillGated(LifeBonusStrategy),
    /// Percent per level of the support skill.
    PerSupportLevel(i32),
}

impl LifeBonus {
    pub fn percent(self, skill_level: u32, support_level: u32) -> i32 {
        match self {
            LifeBonus::SkillGated(strategy) => strategy.percent(skill_level),
            LifeBonus::PerSupportLevel(percent) => saturate_i32(per_level(percent, support_level)),
        }
    }
}

/// Everything that distinguishes one summon type from another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummonProfile {
    pub kind: SummonKind,
    pub min_damage: BandCurve,
    pub max_damage: BandCurve,
    pub skill_damage: SkillDamageBonus,
    pub attack_rating_per_level: i32,
    pub defense_per_level: i32,
    pub base_life: PerDifficulty<i32>,
    pub life_bonus: LifeBonus,
    /// Flat life per support skill level.
    pub life_per_support: i32,
    /// Regeneration rate in 1/4096ths of life per frame.
    pub regen: i32,
    pub physical_resist: i32,
    pub magic_resist: i32,
}

impl SummonProfile {
    pub const SKELETON: SummonProfile = SummonProfile {
        kind: SummonKind::Skeleton,
        min_damage: BandCurve::new(2, [1, 2, 3, 4, 5]),
        max_damage: BandCurve::new(3, [2, 3, 4, 5, 6]),
        skill_damage: SkillDamageBonus {
            per_level: 7,
            threshold: 3,
        },
        attack_rating_per_level: 10,
        defense_per_level: 15,
        base_life: PerDifficulty::new(21, 45, 80),
        life_bonus: LifeBonus::SkillGated(LifeBonusStrategy::PerLevelAboveThree),
        life_per_support: 7,
        regen: 4,
        physical_resist: 0,
        magic_resist: 0,
    };

    pub const SKELETAL_MAGE: SummonProfile = SummonProfile {
        kind: SummonKind::SkeletalMage,
        min_damage: BandCurve::new(1, [1, 1, 2, 2, 3]),
        max_damage: BandCurve::new(3, [1, 2, 3, 4, 5]),
        skill_damage: SkillDamageBonus {
            per_level: 5,
            threshold: 3,
        },
        attack_rating_per_level: 8,
        defense_per_level: 10,
        base_life: PerDifficulty::new(18, 38, 66),
        life_bonus: LifeBonus::SkillGated(LifeBonusStrategy::PerLevelAboveThree),
        life_per_support: 4,
        regen: 4,
        physical_resist: 0,
        magic_resist: 0,
    };

    pub const CLAY_GOLEM: SummonProfile = SummonProfile {
        kind: SummonKind::ClayGolem,
        min_damage: BandCurve::new(2, [1, 2, 3, 4, 5]),
        max_damage: BandCurve::new(5, [2, 3, 4, 5, 6]),
        skill_damage: SkillDamageBonus::NONE,
        attack_rating_per_level: 20,
        defense_per_level: 25,
        base_life: PerDifficulty::new(100, 200, 350),
        life_bonus: LifeBonus::PerSupportLevel(20),
        life_per_support: 0,
        regen: 3,
        physical_resist: 0,
        magic_resist: 0,
    };

    pub const BLOOD_GOLEM: SummonProfile = SummonProfile {
        kind: SummonKind::BloodGolem,
        min_damage: BandCurve::new(6, [2, 3, 4, 5, 6]),
        max_damage: BandCurve::new(16, [3, 4, 5, 6, 7]),
        skill_damage: SkillDamageBonus::NONE,
        attack_rating_per_level: 25,
        defense_per_level: 20,
        base_life: PerDifficulty::new(201, 400, 700),
        life_bonus: LifeBonus::PerSupportLevel(20),
        life_per_support: 0,
        regen: 3,
        physical_resist: 0,
        magic_resist: 0,
    };

    /// Damage comes from the golem's weapon, so both curves are zero.
    pub const IRON_GOLEM: SummonProfile = SummonProfile {
        kind: SummonKind::IronGolem,
        min_damage: BandCurve::ZERO,
        max_damage: BandCurve::ZERO,
        skill_damage: SkillDamageBonus::NONE,
        attack_rating_per_level: 25,
        defense_per_level: 35,
        base_life: PerDifficulty::new(306, 612, 918),
        life_bonus: LifeBonus::PerSupportLevel(20),
        life_per_support: 0,
        regen: 3,
        physical_resist: 0,
        magic_resist: 0,
    };

    /// Swap the skill-gated life formula; other life rules are unaffected.
    pub fn with_life_strategy(mut self, strategy: LifeBonusStrategy) -> Self {
        if let LifeBonus::SkillGated(_) = self.life_bonus {
            self.life_bonus = LifeBonus::SkillGated(strategy);
        }
        self
    }

    /// Resistances at a given summon-resist skill level.
    pub fn resistances(&self, resist_level: u32) -> Resistances {
        Resistances::elemental(
            summon_resistance(resist_level),
            self.physical_resist,
            self.magic_resist,
        )
    }

    pub(crate) fn attack_rating(
        &self,
        row: &MonsterStatRow,
        difficulty: Difficulty,
        skill_level: u32,
    ) -> i32 {
        saturate_i32(
            i64::from(row.get(difficulty)) + per_level(self.attack_rating_per_level, skill_level),
        )
    }

    pub(crate) fn defense(
        &self,
        row: &MonsterStatRow,
        difficulty: Difficulty,
        skill_level: u32,
        modifiers: &ModifierSet,
    ) -> i32 {
        let base = i64::from(row.get(difficulty)) + per_level(self.defense_per_level, skill_level);
        floor_i32(base as f64 * (1.0 + modifiers.defense_percent() / 100.0))
    }

    pub(crate) fn life(
        &self,
        row: &MonsterStatRow,
        difficulty: Difficulty,
        skill_level: u32,
        support_level: u32,
        modifiers: &ModifierSet,
    ) -> i32 {
        let base = i64::from(self.base_life[difficulty])
            + i64::from(row.get(difficulty))
            + per_level(self.life_per_support, support_level);
        let percent = self.life_bonus.percent(skill_level, support_level);
        floor_i32(base as f64 * (1.0 + f64::from(percent) / 100.0) * modifiers.life_multiplier())
    }
}

/// Element a skeletal mage attacks with.
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
pub enum MageElement {
    Fire,
    Cold,
    Lightning,
    Poison,
}

/// Flesh golem variants sharing the generic calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GolemKind {
    Clay,
    Blood,
}

impl GolemKind {
    pub fn profile(self) -> &'static SummonProfile {
        match self {
            GolemKind::Clay => &SummonProfile::CLAY_GOLEM,
            GolemKind::Blood => &SummonProfile::BLOOD_GOLEM,
        }
    }
}

/// Elemental resistance from the summon resist skill.
///
/// `min(20 + 55 × (110·L / (L + 6)) / 100, 75)` in integer arithmetic,
/// `0` at level 0.
///
/// # Examples
///
/// ```rust
/// use cainstat::summon::summon_resistance;
///
/// assert_eq!(summon_resistance(0), 0);
/// assert_eq!(summon_resistance(1), 28);
/// assert_eq!(summon_resistance(20), 66);
/// assert_eq!(summon_resistance(99), 75);
/// ```
pub fn summon_resistance(level: u32) -> i32 {
    if level == 0 {
        return 0;
    }
    let level = i64::from(level);
    let diminished = 110 * level / (level + 6);
    saturate_i32((20 + 55 * diminished / 100).min(i64::from(MAX_SUMMON_RESIST)))
}

/// Life regenerated per second: `regen × 25 / 4096 × life`, two decimals.
pub fn life_regen_per_second(regen: i32, life: i32) -> f64 {
    let per_second = f64::from(regen) * 25.0 / 4096.0 * f64::from(life);
    (per_second * 100.0).round() / 100.0
}

/// Skill levels and party auras for one summon calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummonInputs {
    /// Level of the raising skill; also selects the monster stat row.
    pub skill_level: u32,
    /// Level of the mastery skill for this summon type.
    pub mastery_level: u32,
    pub resist_level: u32,
    pub auras: AuraLevels,
}

impl SummonInputs {
    pub fn new(skill_level: u32) -> Self {
        Self {
            skill_level,
            ..Self::default()
        }
    }

    pub fn mastery(mut self, level: u32) -> Self {
        self.mastery_level = level;
        self
    }

    pub fn resist(mut self, level: u32) -> Self {
        self.resist_level = level;
        self
    }

    pub fn auras(mut self, auras: AuraLevels) -> Self {
        self.auras = auras;
        self
    }
}

/// Run the shared summon formula for `profile`.
pub fn calculate(
    profile: &SummonProfile,
    table: &MonsterStatTable,
    inputs: &SummonInputs,
) -> Option<SummonResult> {
    let level = inputs.skill_level;
    if level == 0 {
        return None;
    }
    let Some(row) = table.row(level) else {
        debug!(kind = %profile.kind, level, "no monster stat row");
        return None;
    };

    let modifiers = aggregate(&inputs.auras, None, Scenario::Avg, &SourceAware);
    let support = per_level(2, inputs.mastery_level);
    let damage_factor = (1.0 + f64::from(profile.skill_damage.percent(level)) / 100.0)
        * modifiers.damage_multiplier()
        * AVERAGE_CRIT_FACTOR;
    let scale =
        |curve: &BandCurve| floor_i32((i64::from(curve.value(level)) + support) as f64 * damage_factor);
    let damage = RangeValue::new(scale(&profile.min_damage), scale(&profile.max_damage));

    let per_difficulty = PerDifficulty::from_fn(|difficulty| {
        let attack_rating = floor_i32(
            f64::from(profile.attack_rating(row, difficulty, level))
                * modifiers.attack_rating_multiplier(),
        );
        let life = profile.life(row, difficulty, level, inputs.mastery_level, &modifiers);
        DifficultyStats {
            damage,
            attack_rating,
            defense: profile.defense(row, difficulty, level, &modifiers),
            life,
            life_regen_per_second: life_regen_per_second(profile.regen, life),
        }
    });

    Some(SummonResult {
        kind: profile.kind,
        skill_level: level,
        element: None,
        per_difficulty,
        resistances: profile.resistances(inputs.resist_level),
        modifiers,
    })
}

/// Raise Skeleton.
///
/// # Examples
///
/// ```rust
/// use cainstat::summon::{raise_skeleton, SummonInputs};
/// use cainstat::tables::MonsterStatTable;
/// use cainstat::Difficulty;
///
/// let table = MonsterStatTable::parse("10 90 375 760\n");
/// let skeleton = raise_skeleton(&table, &SummonInputs::new(10)).unwrap();
///
/// let normal = skeleton.stats(Difficulty::Normal);
/// assert_eq!((normal.damage.min, normal.damage.max), (21, 37));
/// assert_eq!(normal.attack_rating, 190);
///
/// assert!(raise_skeleton(&table, &SummonInputs::new(11)).is_none());
/// ```
pub fn raise_skeleton(table: &MonsterStatTable, inputs: &SummonInputs) -> Option<SummonResult> {
    calculate(&SummonProfile::SKELETON, table, inputs)
}

/// Raise Skeleton with an explicit skill-gated life formula.
pub fn raise_skeleton_with(
    table: &MonsterStatTable,
    inputs: &SummonInputs,
    strategy: LifeBonusStrategy,
) -> Option<SummonResult> {
    calculate(
        &SummonProfile::SKELETON.with_life_strategy(strategy),
        table,
        inputs,
    )
}

/// Raise Skeletal Mage of the given element.
pub fn skeletal_mage(
    table: &MonsterStatTable,
    inputs: &SummonInputs,
    element: MageElement,
) -> Option<SummonResult> {
    skeletal_mage_with(table, inputs, element, LifeBonusStrategy::default())
}

/// Raise Skeletal Mage with an explicit skill-gated life formula.
pub fn skeletal_mage_with(
    table: &MonsterStatTable,
    inputs: &SummonInputs,
    element: MageElement,
    strategy: LifeBonusStrategy,
) -> Option<SummonResult> {
    let profile = SummonProfile::SKELETAL_MAGE.with_life_strategy(strategy);
    let mut result = calculate(&profile, table, inputs)?;
    result.element = Some(element);
    Some(result)
}

/// Clay or Blood Golem.
pub fn flesh_golem(
    table: &MonsterStatTable,
    inputs: &SummonInputs,
    kind: GolemKind,
) -> Option<SummonResult> {
    calculate(kind.profile(), table, inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aura::Aura;

    fn table() -> MonsterStatTable {
        MonsterStatTable::parse("1 10 20 30\n4 40 80 120\n10 90 375 760\n20 200 500 1000\n")
    }

    #[test]
    fn test_band_boundaries() {
        let curve = BandCurve::new(0, [1, 10, 100, 1000, 10000]);
        assert_eq!(curve.value(8), 7);
        assert_eq!(curve.value(9), 17);
        assert_eq!(curve.value(17), 7 + 80 + 100);
        assert_eq!(curve.value(23), 7 + 80 + 600 + 1000);
        assert_eq!(curve.value(29), 7 + 80 + 600 + 6000 + 10000);
    }

    #[test]
    fn test_skill_damage_threshold() {
        let bonus = SummonProfile::SKELETON.skill_damage;
        assert_eq!(bonus.percent(3), 0);
        assert_eq!(bonus.percent(4), 7);
        assert_eq!(bonus.percent(10), 49);
    }

    #[test]
    fn test_life_strategies_differ() {
        assert_eq!(LifeBonusStrategy::PerLevelAboveThree.percent(3), 0);
        assert_eq!(LifeBonusStrategy::LinearOffset.percent(3), 0);
        assert_eq!(LifeBonusStrategy::PerLevelAboveThree.percent(10), 350);
        assert_eq!(LifeBonusStrategy::LinearOffset.percent(10), 79);
    }

    #[test]
    fn test_resistance_monotone_and_clamped() {
        let mut previous = 0;
        let huge = [20_000_000, 3_000_000_000, u32::MAX];
        for level in (0..=200).chain(huge) {
            let value = summon_resistance(level);
            assert!(value >= previous, "level {level} dropped to {value}");
            assert!(value <= MAX_SUMMON_RESIST);
            previous = value;
        }
        assert_eq!(summon_resistance(u32::MAX), MAX_SUMMON_RESIST);
    }

    #[test]
    fn test_band_curve_far_levels() {
        let curve = SummonProfile::BLOOD_GOLEM.max_damage;
        // 16 + 7*3 + 8*4 + 6*5 + 6*6 + 72*7
        assert_eq!(curve.value(100), 16 + 21 + 32 + 30 + 36 + 504);
        assert_eq!(curve.value(u32::MAX), i32::MAX);
    }

    #[test]
    fn test_extreme_levels_saturate() {
        let inputs = SummonInputs::new(1)
            .mastery(u32::MAX)
            .resist(3_000_000_000);
        let result = raise_skeleton(&table(), &inputs).unwrap();
        let normal = result.stats(Difficulty::Normal);

        assert_eq!(normal.damage.min, i32::MAX);
        assert_eq!(normal.damage.max, i32::MAX);
        assert_eq!(normal.life, i32::MAX);
        assert_eq!(result.resistances.fire, MAX_SUMMON_RESIST);
        assert_eq!(LifeBonusStrategy::LinearOffset.percent(u32::MAX), i32::MAX);
    }

    #[test]
    fn test_regen_rounding() {
        // 4 * 25 / 4096 * 1000 = 24.414...
        assert_eq!(life_regen_per_second(4, 1000), 24.41);
        assert_eq!(life_regen_per_second(0, 1000), 0.0);
    }

    #[test]
    fn test_zero_level_is_not_raised() {
        assert!(raise_skeleton(&table(), &SummonInputs::new(0)).is_none());
    }

    #[test]
    fn test_skeleton_level_ten_without_modifiers() {
        let result = raise_skeleton(&table(), &SummonInputs::new(10)).unwrap();
        let hell = result.stats(Difficulty::Hell);
        assert_eq!(hell.damage, RangeValue::new(21, 37));
        assert_eq!(hell.attack_rating, 760 + 100);
        assert_eq!(hell.defense, 760 + 150);
        // (80 + 760) * (1 + 350%)
        assert_eq!(hell.life, 3780);
        assert_eq!(result.resistances, Resistances::default());
    }

    #[test]
    fn test_mastery_adds_damage_and_life() {
        let inputs = SummonInputs::new(4).mastery(2);
        let result = raise_skeleton(&table(), &inputs).unwrap();
        let normal = result.stats(Difficulty::Normal);
        // min curve 5 + 4 = 9, * 1.07 * 1.10
        assert_eq!(normal.damage.min, 10);
        // (21 + 40 + 14) * 1.5
        assert_eq!(normal.life, 112);
    }

    #[test]
    fn test_auras_scale_results() {
        let auras = AuraLevels::new()
            .with(Aura::Might, 1)
            .with(Aura::Concentration, 1)
            .with(Aura::BattleOrders, 1)
            .with(Aura::Defiance, 1);
        let inputs = SummonInputs::new(1).auras(auras);
        let result = raise_skeleton(&table(), &inputs).unwrap();
        let normal = result.stats(Difficulty::Normal);
        // dmg 2 * 2.0 * 1.1, ar (10 + 10) * 1.4, def (10 + 15) * 1.7, life (21 + 10) * 1.35
        assert_eq!(normal.damage.min, 4);
        assert_eq!(normal.attack_rating, 28);
        assert_eq!(normal.defense, 42);
        assert_eq!(normal.life, 41);
    }

    #[test]
    fn test_mage_carries_element() {
        let result = skeletal_mage(&table(), &SummonInputs::new(1), MageElement::Cold).unwrap();
        assert_eq!(result.element, Some(MageElement::Cold));
        assert_eq!(result.kind, SummonKind::SkeletalMage);
    }

    #[test]
    fn test_mage_level_ten_without_modifiers() {
        let result = skeletal_mage(&table(), &SummonInputs::new(10), MageElement::Fire).unwrap();
        let normal = result.stats(Difficulty::Normal);

        // curves 10 and 14, +35% from the skill, 1.10 from crits
        assert_eq!(normal.damage, RangeValue::new(14, 20));
        assert_eq!(normal.attack_rating, 90 + 80);
        assert_eq!(normal.defense, 90 + 100);
        // (18 + 90) * (1 + 350%)
        assert_eq!(normal.life, 486);
        assert_eq!(normal.life_regen_per_second, 11.87);
        assert_eq!(result.stats(Difficulty::Nightmare).life, 1858);
        assert_eq!(result.stats(Difficulty::Hell).life, 3717);
    }

    #[test]
    fn test_flesh_golems_level_ten() {
        let inputs = SummonInputs::new(10);

        let clay = flesh_golem(&table(), &inputs, GolemKind::Clay).unwrap();
        let normal = clay.stats(Difficulty::Normal);
        // curves 13 and 25, * 1.10
        assert_eq!(normal.damage, RangeValue::new(14, 27));
        assert_eq!(normal.attack_rating, 90 + 200);
        assert_eq!(normal.defense, 90 + 250);
        assert_eq!(normal.life, 100 + 90);

        let blood = flesh_golem(&table(), &inputs, GolemKind::Blood).unwrap();
        let hell = blood.stats(Difficulty::Hell);
        // curves 26 and 45, * 1.10
        assert_eq!(hell.damage, RangeValue::new(28, 49));
        assert_eq!(hell.attack_rating, 760 + 250);
        assert_eq!(hell.defense, 760 + 200);
        assert_eq!(hell.life, 700 + 760);
    }

    #[test]
    fn test_life_strategy_swap() {
        let inputs = SummonInputs::new(10);
        let default = raise_skeleton(&table(), &inputs).unwrap();
        let linear = raise_skeleton_with(&table(), &inputs, LifeBonusStrategy::LinearOffset).unwrap();
        // (21 + 90) * 1.79
        assert_eq!(linear.stats(Difficulty::Normal).life, 198);
        assert!(linear.stats(Difficulty::Normal).life < default.stats(Difficulty::Normal).life);
    }

    #[test]
    fn test_golem_life_from_mastery() {
        let inputs = SummonInputs::new(1).mastery(5).resist(1);
        let clay = flesh_golem(&table(), &inputs, GolemKind::Clay).unwrap();
        // (100 + 10) * 2.0
        assert_eq!(clay.stats(Difficulty::Normal).life, 220);
        assert_eq!(clay.resistances.fire, 28);
        assert_eq!(clay.resistances.physical, 0);

        let blood = flesh_golem(&table(), &inputs, GolemKind::Blood).unwrap();
        // min 6 + 10, max 16 + 10, * 1.10
        assert_eq!(blood.stats(Difficulty::Normal).damage, RangeValue::new(17, 28));
    }
}
