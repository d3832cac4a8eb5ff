//! # cainstat - Rune Word Parser and Summon Combat Calculator
//!
//! A data engine for Diablo II: Resurrected item and summon numbers:
//! - **Rune word parsing** from the loose `Entry:` / `Stat:` text format
//!   into typed records
//! - **Summon calculators** for skeletons, skeletal mages, and clay, blood
//!   and iron golems
//! - **Scenario bounds** for every rolled value (worst / average / best)
//! - **Plain results** for an external formatter; no markup is produced here
//!
//! ## Core Concepts
//!
//! ### Data Flow
//!
//! ```text
//! text ─▶ [parse_stat_line] ─▶ [RuneWord] ─┐
//!                                          ├─▶ [calculators] ─▶ results
//! auras ─▶ [aggregate] ─▶ [ModifierSet] ───┘
//! ```
//!
//! 1. **Parsers** turn rune word, base item and monster stat text into
//!    typed data. They never fail on malformed lines.
//! 2. **The modifier aggregator** resolves effective aura levels from
//!    independent sources (party, equipped rune word) per roll scenario.
//! 3. **Calculators** combine a monster stat row, skill-level curves and the
//!    modifiers into per-difficulty results. An unresolvable lookup yields
//!    `None` rather than a wrong number.
//!
//! ### Key Features
//!
//! - **Total parsing**: every stat line maps to exactly one [`Stat`]
//! - **Swappable rules**: Fanaticism source resolution and the skill-gated
//!   life formula are strategies, not constants
//! - **Lazy loading**: [`loader::DataLoader`] reads source files
//!   concurrently once per process
//!
//! ## Example
//!
//! ```rust
//! use cainstat::*;
//! use cainstat::summon::{raise_skeleton, SummonInputs};
//! use cainstat::tables::MonsterStatTable;
//!
//! let table = MonsterStatTable::parse("10 90 375 760\n");
//! let auras = AuraLevels::new().with(Aura::Might, 1);
//!
//! let skeleton = raise_skeleton(&table, &SummonInputs::new(10).auras(auras)).unwrap();
//! let normal = skeleton.stats(Difficulty::Normal);
//!
//! // (13 .. 23) * 1.49 skill bonus * 1.40 Might * 1.10 crit
//! assert_eq!(normal.damage.min, 29);
//! assert_eq!(normal.damage.max, 52);
//! ```
//!
//! ## Modules
//!
//! - [`range`] - Range values and their parser
//! - [`stat_line`] - Stat line parser
//! - [`runeword`] - Rune word assembly and index
//! - [`category`] - Item categories
//! - [`tables`] - Base items, monster stats, runes and recipes
//! - [`aura`] - Auras and aura sources
//! - [`modifiers`] - Modifier aggregation
//! - [`summon`] - Skeleton, mage and flesh golem calculators
//! - [`iron_golem`] - Iron golem calculator
//! - [`result`] - Result records
//! - [`loader`] - Asynchronous data loading
//! - [`error`] - Error types

pub mod aura;
pub mod category;
pub mod config;
pub mod error;
pub mod iron_golem;
pub mod item_level;
pub mod loader;
pub mod magic_find;
pub mod modifiers;
pub mod range;
pub mod result;
pub mod runeword;
pub mod scenario;
pub mod stat_key;
pub mod stat_line;
pub mod summon;
pub mod tables;

// Re-export main types for convenience
pub use aura::{Aura, AuraLevels, AuraSource};
pub use category::ItemCategory;
pub use error::{DataError, FormulaError};
pub use range::{parse_range, RangeValue};
pub use runeword::{parse_rune_words, RuneWord, RuneWordIndex};
pub use scenario::{Difficulty, EnemyClass, PerDifficulty, Scenario};
pub use stat_key::StatKey;
pub use stat_line::{parse_stat_line, Stat, StatLabel};

// Re-export the calculation surface
pub use iron_golem::{iron_golem, IronGolemInputs};
pub use modifiers::{aggregate, AlwaysAlly, FanaticismResolver, ModifierSet, SourceAware};
pub use result::{IronGolemResult, ScenarioCell, ScenarioMatrix, SummonResult};
pub use summon::{
    flesh_golem, raise_skeleton, skeletal_mage, GolemKind, LifeBonusStrategy, MageElement,
    SummonInputs,
};
