//! Modifier aggregation.
//!
//! Resolves the effective level of every aura for one calculation and turns
//! those levels into percent bonuses. Levels from independent sources
//! combine by a per-aura [`CombineRule`]:
//!
//! - `Max`: the strongest source wins.
//! - `SourceTagged`: the strongest source wins and the winner's origin is
//!   kept, because it changes the aura's potency (Fanaticism grants only
//!   half its damage bonus to allies).
//!
//! Aggregation runs once per roll scenario, since item-granted aura levels
//! are ranges.

use crate::aura::{Aura, AuraLevels, AuraSource};
use crate::scenario::Scenario;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

/// How levels of the same aura from different sources combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineRule {
    Max,
    SourceTagged,
}

impl Aura {
    pub fn combine_rule(self) -> CombineRule {
        match self {
            Aura::Fanaticism => CombineRule::SourceTagged,
            _ => CombineRule::Max,
        }
    }
}

/// Percent bonuses granted by one aura at one level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AuraEffect {
    pub damage: f64,
    pub attack_rating: f64,
    pub defense: f64,
    pub life: f64,
}

/// `base` at level 1, `per_level` for every level after it, 0 at level 0.
fn linear(level: u32, base: f64, per_level: f64) -> f64 {
    if level == 0 {
        0.0
    } else {
        base + per_level * f64::from(level - 1)
    }
}

impl Aura {
    /// Full-strength effect of this aura at `level`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cainstat::Aura;
    ///
    /// assert_eq!(Aura::Might.effect(1).damage, 40.0);
    /// assert_eq!(Aura::Might.effect(5).damage, 80.0);
    /// assert_eq!(Aura::Concentration.effect(0).attack_rating, 0.0);
    /// ```
    pub fn effect(self, level: u32) -> AuraEffect {
        let mut effect = AuraEffect::default();
        match self {
            Aura::Might => effect.damage = linear(level, 40.0, 10.0),
            Aura::Concentration => {
                effect.damage = linear(level, 60.0, 15.0);
                effect.attack_rating = linear(level, 40.0, 5.0);
            }
            Aura::Fanaticism => {
                effect.damage = linear(level, 50.0, 17.0);
                effect.attack_rating = linear(level, 40.0, 5.0);
            }
            Aura::HeartOfWolverine => {
                effect.damage = linear(level, 20.0, 7.0);
                effect.attack_rating = linear(level, 25.0, 7.0);
            }
            Aura::BattleOrders => effect.life = linear(level, 35.0, 3.0),
            Aura::OakSage => effect.life = linear(level, 30.0, 5.0),
            Aura::Defiance => effect.defense = linear(level, 70.0, 10.0),
            Aura::Shout => effect.defense = linear(level, 100.0, 10.0),
        }
        effect
    }
}

/// Who is running an aura relative to the summon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuraOrigin {
    /// The summon itself, through an equipped item.
    User,
    /// Someone else in the party.
    Ally,
}

/// Resolved Fanaticism level and the origin that supplied it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanaticismLevel {
    pub level: u32,
    pub source: AuraOrigin,
}

/// Decides the Fanaticism level and origin from the item-granted and
/// externally supplied levels.
pub trait FanaticismResolver {
    fn resolve(&self, item_level: u32, external_level: u32) -> FanaticismLevel;
}

/// The higher level wins; the item counts as the user's own aura only when
/// it is strictly higher.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceAware;

impl FanaticismResolver for SourceAware {
    fn resolve(&self, item_level: u32, external_level: u32) -> FanaticismLevel {
        if item_level > external_level {
            FanaticismLevel {
                level: item_level,
                source: AuraOrigin::User,
            }
        } else {
            FanaticismLevel {
                level: external_level,
                source: AuraOrigin::Ally,
            }
        }
    }
}

/// Legacy rule: always treat Fanaticism as an ally aura.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysAlly;

impl FanaticismResolver for AlwaysAlly {
    fn resolve(&self, item_level: u32, external_level: u32) -> FanaticismLevel {
        FanaticismLevel {
            level: item_level.max(external_level),
            source: AuraOrigin::Ally,
        }
    }
}

/// Effective aura levels for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierSet {
    levels: BTreeMap<Aura, u32>,
    fanaticism: FanaticismLevel,
}

impl Default for ModifierSet {
    fn default() -> Self {
        Self {
            levels: BTreeMap::new(),
            fanaticism: FanaticismLevel {
                level: 0,
                source: AuraOrigin::Ally,
            },
        }
    }
}

impl ModifierSet {
    /// A set with no active auras.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn level(&self, aura: Aura) -> u32 {
        if aura == Aura::Fanaticism {
            return self.fanaticism.level;
        }
        self.levels.get(&aura).copied().unwrap_or(0)
    }

    pub fn fanaticism(&self) -> FanaticismLevel {
        self.fanaticism
    }

    /// Effect of one aura after origin adjustments.
    fn effect(&self, aura: Aura) -> AuraEffect {
        let mut effect = aura.effect(self.level(aura));
        if aura == Aura::Fanaticism && self.fanaticism.source == AuraOrigin::Ally {
            effect.damage /= 2.0;
        }
        effect
    }

    fn total(&self, pick: impl Fn(&AuraEffect) -> f64) -> f64 {
        Aura::iter().map(|aura| pick(&self.effect(aura))).sum()
    }

    pub fn damage_percent(&self) -> f64 {
        self.total(|e| e.damage)
    }

    pub fn attack_rating_percent(&self) -> f64 {
        self.total(|e| e.attack_rating)
    }

    pub fn defense_percent(&self) -> f64 {
        self.total(|e| e.defense)
    }

    /// Battle Orders and Oak Sage percents, added together.
    pub fn life_percent(&self) -> f64 {
        self.total(|e| e.life)
    }

    pub fn damage_multiplier(&self) -> f64 {
        1.0 + self.damage_percent() / 100.0
    }

    pub fn attack_rating_multiplier(&self) -> f64 {
        1.0 + self.attack_rating_percent() / 100.0
    }

    pub fn life_multiplier(&self) -> f64 {
        1.0 + self.life_percent() / 100.0
    }
}

/// Combine external and item-granted aura levels for one scenario.
///
/// # Examples
///
/// ```rust
/// use cainstat::modifiers::{aggregate, AuraOrigin, SourceAware};
/// use cainstat::{Aura, AuraLevels, Scenario};
///
/// let party = AuraLevels::new().with(Aura::Fanaticism, 10).with(Aura::Might, 5);
/// let mods = aggregate(&party, None, Scenario::Avg, &SourceAware);
///
/// assert_eq!(mods.level(Aura::Might), 5);
/// assert_eq!(mods.fanaticism().source, AuraOrigin::Ally);
/// // Might 80% + half of Fanaticism's 203%
/// assert_eq!(mods.damage_percent(), 80.0 + 101.5);
/// ```
pub fn aggregate(
    external: &AuraLevels,
    item: Option<&dyn AuraSource>,
    scenario: Scenario,
    resolver: &dyn FanaticismResolver,
) -> ModifierSet {
    let item_level = |aura: Aura| item.map(|s| s.level(aura, scenario)).unwrap_or(0);
    let mut set = ModifierSet::default();

    for aura in Aura::iter() {
        let external_level = external.level(aura, scenario);
        match aura.combine_rule() {
            CombineRule::Max => {
                let level = external_level.max(item_level(aura));
                if level > 0 {
                    set.levels.insert(aura, level);
                }
            }
            CombineRule::SourceTagged => {
                set.fanaticism = resolver.resolve(item_level(aura), external_level);
            }
        }
    }
    set
}
