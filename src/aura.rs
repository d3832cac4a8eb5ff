//! Auras and where their levels come from.
//!
//! An aura level can reach a summon from several independent places: a
//! party member, the summoner's own skill tree, or an item the summon
//! carries. Each place is an [`AuraSource`]; the modifier aggregator asks
//! every source for a level and combines the answers.

use crate::range::RangeValue;
use crate::runeword::RuneWord;
use crate::scenario::Scenario;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Every aura or buff the calculators understand.
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
#[strum(ascii_case_insensitive)]
pub enum Aura {
    Might,
    Concentration,
    Fanaticism,
    #[strum(serialize = "HeartOfWolverine", serialize = "Heart of Wolverine", serialize = "Wolverine")]
    HeartOfWolverine,
    #[strum(serialize = "BattleOrders", serialize = "Battle Orders")]
    BattleOrders,
    #[strum(serialize = "OakSage", serialize = "Oak Sage", serialize = "Heart of Oak Sage")]
    OakSage,
    Defiance,
    Shout,
}

impl Aura {
    /// Resolve a name as written in data files, ignoring case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cainstat::Aura;
    ///
    /// assert_eq!(Aura::from_name("fanaticism"), Some(Aura::Fanaticism));
    /// assert_eq!(Aura::from_name("Battle Orders"), Some(Aura::BattleOrders));
    /// assert_eq!(Aura::from_name("Holy Freeze"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Aura> {
        Aura::from_str(name.trim()).ok()
    }
}

/// Something that can grant aura levels.
///
/// Sources are pure lookups. A source whose levels are rolled ranges picks
/// the bound that matches `scenario`; fixed sources ignore it.
pub trait AuraSource {
    /// Level of `aura` granted by this source; `0` when it grants none.
    fn level(&self, aura: Aura, scenario: Scenario) -> u32;
}

/// Externally supplied aura levels, e.g. from party members.
///
/// # Examples
///
/// ```rust
/// use cainstat::{Aura, AuraLevels, AuraSource, Scenario};
///
/// let party = AuraLevels::new()
///     .with(Aura::Might, 8)
///     .with(Aura::Fanaticism, 20);
///
/// assert_eq!(party.level(Aura::Might, Scenario::Worst), 8);
/// assert_eq!(party.level(Aura::Shout, Scenario::Best), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuraLevels {
    levels: BTreeMap<Aura, u32>,
}

impl AuraLevels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, aura: Aura, level: u32) -> Self {
        self.set(aura, level);
        self
    }

    /// Set a level; `0` removes the aura.
    pub fn set(&mut self, aura: Aura, level: u32) {
        if level == 0 {
            self.levels.remove(&aura);
        } else {
            self.levels.insert(aura, level);
        }
    }

    pub fn get(&self, aura: Aura) -> u32 {
        self.levels.get(&aura).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Aura, u32)> + '_ {
        self.levels.iter().map(|(a, l)| (*a, *l))
    }
}

impl AuraSource for AuraLevels {
    fn level(&self, aura: Aura, _scenario: Scenario) -> u32 {
        self.get(aura)
    }
}

impl AuraSource for RuneWord {
    fn level(&self, aura: Aura, scenario: Scenario) -> u32 {
        clamp_level(self.aura_level(aura), scenario)
    }
}

fn clamp_level(range: RangeValue, scenario: Scenario) -> u32 {
    u32::try_from(range.pick(scenario)).unwrap_or(0)
}
