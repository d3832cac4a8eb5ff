//! Rune word assembly.
//!
//! Rune word files hold many entries, each introduced by an `Entry:` marker
//! followed by the rune word name. Inside an entry, each line is routed by
//! its prefix:
//!
//! ```text
//! Entry: Faith
//! ImageURL: https://example.org/faith.png
//! RuneOrder: Ohm | Jah | Lem | Eld
//! CompatibleItems: Ranged Weapons
//! Stat: Aura | Fanaticism | 12-15
//! Stat: EnhancedDamage | 280-300
//! ```
//!
//! Entries are assembled independently: a broken entry is logged and
//! dropped without affecting its neighbours.

use crate::aura::Aura;
use crate::category::{expand_category_token, ItemCategory};
use crate::error::DataError;
use crate::range::RangeValue;
use crate::stat_line::{parse_stat_line, AttackMode, AttackTarget, Stat, StatLabel, STAT_PREFIX};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

pub const ENTRY_MARKER: &str = "Entry:";
pub const IMAGE_PREFIX: &str = "ImageURL:";
pub const RUNE_ORDER_PREFIX: &str = "RuneOrder:";
pub const COMPATIBLE_PREFIX: &str = "CompatibleItems:";

/// Label fragments hidden from the golem-oriented view of a rune word.
const GOLEM_HIDDEN_LABELS: &[&str] = &[
    "resist",
    "enhanced",
    "life",
    "defense",
    "rating",
    "attribute",
    "mana",
];

/// One fully assembled rune word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuneWord {
    pub name: String,
    pub image_url: Option<String>,
    pub runes: Vec<String>,
    pub socket_count: usize,
    pub compatible_items: BTreeSet<ItemCategory>,
    pub stats: Vec<Stat>,
    /// Formatter metadata, one entry per stat in `stats` order.
    pub labels: Vec<StatLabel>,
}

impl RuneWord {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            image_url: None,
            runes: Vec::new(),
            socket_count: 0,
            compatible_items: BTreeSet::new(),
            stats: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn fits(&self, category: ItemCategory) -> bool {
        self.compatible_items.contains(&category)
    }

    /// Sum of every generic stat of `kind` (and `subtype`, when given).
    ///
    /// With `subtype == None` only stats without a subtype match, so
    /// `EnhancedDamage` and `EnhancedDamage | Demon` stay separate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cainstat::runeword::parse_rune_words;
    /// use cainstat::range::RangeValue;
    ///
    /// let index = parse_rune_words(
    ///     "Entry: Test\nRuneOrder: Tal | Eth\nCompatibleItems: Swords\n\
    ///      Stat: EnhancedDamage | 100-120\nStat: EnhancedDamage | Undead | 50\n",
    /// );
    /// let rw = index.get("Test").unwrap();
    /// assert_eq!(rw.generic_range("EnhancedDamage", None), RangeValue::new(100, 120));
    /// assert_eq!(rw.generic_range("EnhancedDamage", Some("Undead")), RangeValue::fixed(50));
    /// assert_eq!(rw.generic_range("FireDamage", None), RangeValue::ZERO);
    /// ```
    pub fn generic_range(&self, kind: &str, subtype: Option<&str>) -> RangeValue {
        self.stats
            .iter()
            .filter_map(|stat| match stat {
                Stat::Generic {
                    kind: k,
                    subtype: s,
                    value: Some(value),
                    ..
                } if k.eq_ignore_ascii_case(kind) && subtype_matches(s.as_deref(), subtype) => {
                    Some(*value)
                }
                _ => None,
            })
            .fold(RangeValue::ZERO, |acc, v| acc + v)
    }

    /// Summed range of a generic stat whose subtype names a monster class.
    ///
    /// Subtypes go through [`AttackTarget::from_token`], so `Demon` and
    /// `Demons` count alike.
    ///
    /// ```rust
    /// use cainstat::runeword::parse_rune_word_block;
    /// use cainstat::stat_line::AttackTarget;
    /// use cainstat::range::RangeValue;
    ///
    /// let rw = parse_rune_word_block(
    ///     "Test\nStat: EnhancedDamage | Demons | 100\nStat: EnhancedDamage | Demon | 20\n",
    /// )
    /// .unwrap();
    /// assert_eq!(
    ///     rw.class_range("EnhancedDamage", AttackTarget::Demon),
    ///     RangeValue::fixed(120)
    /// );
    /// assert_eq!(rw.class_range("EnhancedDamage", AttackTarget::Undead), RangeValue::ZERO);
    /// ```
    pub fn class_range(&self, kind: &str, target: AttackTarget) -> RangeValue {
        self.stats
            .iter()
            .filter_map(|stat| match stat {
                Stat::Generic {
                    kind: k,
                    subtype: Some(s),
                    value: Some(value),
                    ..
                } if k.eq_ignore_ascii_case(kind)
                    && AttackTarget::from_token(s) == Some(target) =>
                {
                    Some(*value)
                }
                _ => None,
            })
            .fold(RangeValue::ZERO, |acc, v| acc + v)
    }

    /// Level range of an aura granted while equipped; zero when absent.
    pub fn aura_level(&self, aura: Aura) -> RangeValue {
        self.stats
            .iter()
            .filter_map(|stat| match stat {
                Stat::Aura { aura_name, level } if Aura::from_name(aura_name) == Some(aura) => {
                    Some(*level)
                }
                _ => None,
            })
            .max_by_key(|level| level.max)
            .unwrap_or(RangeValue::ZERO)
    }

    /// Summed attack rating bonus for one target and mode.
    pub fn attack_rating(&self, target: AttackTarget, mode: AttackMode) -> RangeValue {
        self.stats
            .iter()
            .filter_map(|stat| match stat {
                Stat::AttackRating {
                    target: t,
                    mode: m,
                    amount,
                } if *t == target && *m == mode => Some(*amount),
                _ => None,
            })
            .fold(RangeValue::ZERO, |acc, v| acc + v)
    }

    /// Labels relevant to a golem built from this item.
    pub fn golem_view(&self) -> Vec<&StatLabel> {
        self.labels
            .iter()
            .filter(|entry| {
                let label = entry.label.to_lowercase();
                let key = entry.key.as_str().to_lowercase();
                !GOLEM_HIDDEN_LABELS
                    .iter()
                    .any(|p| label.contains(p) || key.contains(p))
            })
            .collect()
    }
}

fn subtype_matches(actual: Option<&str>, wanted: Option<&str>) -> bool {
    match (actual, wanted) {
        (None, None) => true,
        (Some(a), Some(w)) => a.eq_ignore_ascii_case(w),
        _ => false,
    }
}

fn split_pipes(text: &str) -> impl Iterator<Item = &str> {
    text.split('|').map(str::trim).filter(|s| !s.is_empty())
}

/// Assemble a single entry block (the text after one `Entry:` marker).
///
/// # Errors
///
/// * [`DataError::MissingName`] when the block has no lines.
/// * [`DataError::UnknownItemCategory`] when `CompatibleItems:` names an
///   unknown category or shorthand group.
pub fn parse_rune_word_block(block: &str) -> Result<RuneWord, DataError> {
    let mut lines = block.lines().map(str::trim).filter(|l| !l.is_empty());
    let name = lines.next().ok_or(DataError::MissingName)?;
    let mut rune_word = RuneWord::named(name);

    for line in lines {
        if let Some(rest) = line.strip_prefix(IMAGE_PREFIX) {
            rune_word.image_url = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix(RUNE_ORDER_PREFIX) {
            rune_word.runes = split_pipes(rest).map(str::to_string).collect();
            rune_word.socket_count = rune_word.runes.len();
        } else if let Some(rest) = line.strip_prefix(COMPATIBLE_PREFIX) {
            for token in split_pipes(rest) {
                rune_word
                    .compatible_items
                    .extend(expand_category_token(token)?);
            }
        } else if line.starts_with(STAT_PREFIX) {
            let parsed = parse_stat_line(line);
            rune_word.stats.push(parsed.stat);
            rune_word.labels.push(parsed.label);
        } else {
            debug!(rune_word = name, line, "ignoring unrecognized line");
        }
    }

    Ok(rune_word)
}

/// Name-keyed, read-only collection of rune words.
///
/// When the source text repeats a name, the later entry replaces the
/// earlier one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuneWordIndex {
    entries: BTreeMap<String, RuneWord>,
}

impl RuneWordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rune_word: RuneWord) {
        if let Some(previous) = self.entries.insert(rune_word.name.clone(), rune_word) {
            warn!(name = %previous.name, "duplicate rune word, keeping the later entry");
        }
    }

    /// Merge another index into this one; `other` wins on name collisions.
    pub fn extend(&mut self, other: RuneWordIndex) {
        for (_, rune_word) in other.entries {
            self.insert(rune_word);
        }
    }

    pub fn get(&self, name: &str) -> Option<&RuneWord> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuneWord> {
        self.entries.values()
    }

    /// Rune words that can be made in a base of `category`.
    pub fn compatible_with(&self, category: ItemCategory) -> impl Iterator<Item = &RuneWord> {
        self.entries.values().filter(move |rw| rw.fits(category))
    }
}

/// Parse a multi-entry rune word text blob.
///
/// Text before the first `Entry:` marker is ignored. Entries that fail to
/// assemble are logged and skipped.
pub fn parse_rune_words(text: &str) -> RuneWordIndex {
    let mut index = RuneWordIndex::new();
    for block in text.split(ENTRY_MARKER).skip(1) {
        match parse_rune_word_block(block) {
            Ok(rune_word) => {
                debug!(
                    name = %rune_word.name,
                    sockets = rune_word.socket_count,
                    stats = rune_word.stats.len(),
                    "assembled rune word"
                );
                index.insert(rune_word);
            }
            Err(err) => warn!(error = %err, "skipping rune word entry"),
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# rune words for weapons
Entry: Faith
ImageURL: https://example.org/faith.png
RuneOrder: Ohm | Jah | Lem | Eld
CompatibleItems: Ranged Weapons
Stat: Aura | Fanaticism | 12-15
Stat: EnhancedDamage | 280-300

Entry: Broken
RuneOrder: Tal
CompatibleItems: Heavy Weapons
Stat: EnhancedDamage | 10

Entry: Spirit
RuneOrder: Tal | Thul | Ort | Amn
CompatibleItems: Swords | Shields
Stat: Skill | All Skills | 2
";

    #[test]
    fn test_parse_sample() {
        let index = parse_rune_words(SAMPLE);
        assert_eq!(index.len(), 2);
        assert!(index.get("Broken").is_none());

        let faith = index.get("Faith").unwrap();
        assert_eq!(faith.image_url.as_deref(), Some("https://example.org/faith.png"));
        assert_eq!(faith.runes, vec!["Ohm", "Jah", "Lem", "Eld"]);
        assert_eq!(faith.socket_count, 4);
        assert!(faith.fits(ItemCategory::Bows));
        assert!(!faith.fits(ItemCategory::Swords));
        assert_eq!(faith.aura_level(Aura::Fanaticism), RangeValue::new(12, 15));
        assert_eq!(faith.stats.len(), faith.labels.len());

        let spirit = index.get("Spirit").unwrap();
        assert!(spirit.fits(ItemCategory::Shields));
        assert!(spirit.fits(ItemCategory::Swords));
    }

    #[test]
    fn test_unknown_category_is_error() {
        let err = parse_rune_word_block("Broken\nCompatibleItems: Heavy Weapons\n").unwrap_err();
        assert!(matches!(err, DataError::UnknownItemCategory(ref c) if c == "Heavy Weapons"));
    }

    #[test]
    fn test_empty_block_is_missing_name() {
        assert!(matches!(
            parse_rune_word_block("\n   \n"),
            Err(DataError::MissingName)
        ));
    }

    #[test]
    fn test_duplicate_name_last_wins() {
        let text = "Entry: Twin\nRuneOrder: Tal\nEntry: Twin\nRuneOrder: Tal | Eth\n";
        let index = parse_rune_words(text);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("Twin").unwrap().socket_count, 2);
    }

    #[test]
    fn test_attack_rating_lookup() {
        let text = "Entry: Ar\nStat: AttackRating | Demon | 100\nStat: AttackRating | Demon | 50\n\
                    Stat: AttackRating | All | 20%\n";
        let rw = parse_rune_word_block(text.trim_start_matches("Entry:")).unwrap();
        assert_eq!(
            rw.attack_rating(AttackTarget::Demon, AttackMode::Additive),
            RangeValue::fixed(150)
        );
        assert_eq!(
            rw.attack_rating(AttackTarget::All, AttackMode::Percent),
            RangeValue::fixed(20)
        );
        assert_eq!(
            rw.attack_rating(AttackTarget::Undead, AttackMode::Additive),
            RangeValue::ZERO
        );
    }

    #[test]
    fn test_golem_view_filters() {
        let block = "Filter\nStat: Resist | Fire | 30\nStat: EnhancedDamage | 50\n\
                     Stat: ChanceToCast | 5 | 10 | Amplify Damage | on striking\n";
        let rw = parse_rune_word_block(block).unwrap();
        let view = rw.golem_view();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].key.as_str(), "ctc_amplify_damage");
    }
}
