//! Tabular source data: base items, monster stats, runes and recipes.
//!
//! All parsers here are best effort. Missing numeric fields read as `0`,
//! rows too short to identify anything are skipped, and nothing panics on
//! malformed text.

use crate::category::ItemCategory;
use crate::range::RangeValue;
use crate::scenario::{Difficulty, PerDifficulty};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Ethereal bases get half again their base damage or defense.
pub const ETHEREAL_MULTIPLIER: f64 = 1.5;

/// Ethereal bases need this much less strength and dexterity.
pub const ETHEREAL_REQUIREMENT_REDUCTION: i32 = 10;

fn field<'a>(parts: &[&'a str], index: usize) -> &'a str {
    parts.get(index).copied().unwrap_or("")
}

/// Integer field, accepting decimal notation and defaulting to `0`.
fn int_field(parts: &[&str], index: usize) -> i32 {
    let raw = field(parts, index);
    raw.parse::<i32>()
        .or_else(|_| raw.parse::<f64>().map(|v| v as i32))
        .unwrap_or(0)
}

fn float_field(parts: &[&str], index: usize) -> f64 {
    field(parts, index).parse().unwrap_or(0.0)
}

/// Split a pipe-delimited table into trimmed rows, dropping the header and
/// any row with fewer than two fields.
fn pipe_rows(text: &str) -> impl Iterator<Item = Vec<&str>> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .skip(1)
        .map(|l| l.split('|').map(str::trim).collect::<Vec<_>>())
        .filter(|parts| parts.len() >= 2)
}

fn ethereal(value: i32) -> i32 {
    (f64::from(value) * ETHEREAL_MULTIPLIER).floor() as i32
}

fn ethereal_requirement(value: i32) -> i32 {
    (value - ETHEREAL_REQUIREMENT_REDUCTION).max(0)
}

/// Common view over weapon and armor bases.
pub trait BaseItem {
    fn name(&self) -> &str;
    fn category(&self) -> ItemCategory;

    fn is_ethereal_capable(&self) -> bool {
        self.category().is_ethereal_capable()
    }
}

/// One weapon base.
///
/// Columns: name, tier, quality level, min dmg, max dmg, speed, sockets,
/// range, str req, dex req, level req.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponBase {
    pub name: String,
    pub category: ItemCategory,
    pub tier: String,
    pub quality_level: i32,
    pub min_damage: i32,
    pub max_damage: i32,
    pub speed: i32,
    pub max_sockets: i32,
    pub range: i32,
    pub strength_req: i32,
    pub dexterity_req: i32,
    pub level_req: i32,
}

impl WeaponBase {
    fn from_row(category: ItemCategory, parts: &[&str]) -> Self {
        Self {
            name: field(parts, 0).to_string(),
            category,
            tier: field(parts, 1).to_string(),
            quality_level: int_field(parts, 2),
            min_damage: int_field(parts, 3),
            max_damage: int_field(parts, 4),
            speed: int_field(parts, 5),
            max_sockets: int_field(parts, 6),
            range: int_field(parts, 7),
            strength_req: int_field(parts, 8),
            dexterity_req: int_field(parts, 9),
            level_req: int_field(parts, 10),
        }
    }

    pub fn is_two_handed(&self) -> bool {
        self.category.is_two_handed()
    }

    /// Base damage, boosted when `ethereal` and the category allows it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cainstat::tables::parse_weapon_table;
    /// use cainstat::category::ItemCategory;
    ///
    /// let text = "Name|Tier|QLvl|Min|Max|Speed|Sockets|Range|Str|Dex|Lvl\n\
    ///             Phase Blade|Elite|54|31|35|-30|6|2|25|136|54\n";
    /// let blade = &parse_weapon_table(ItemCategory::Swords, text)[0];
    ///
    /// assert_eq!(blade.damage(false).max, 35);
    /// assert_eq!(blade.damage(true).min, 46);
    /// assert_eq!(blade.damage(true).max, 52);
    /// ```
    pub fn damage(&self, ethereal_base: bool) -> RangeValue {
        if ethereal_base && self.is_ethereal_capable() {
            RangeValue::new(ethereal(self.min_damage), ethereal(self.max_damage))
        } else {
            RangeValue::new(self.min_damage, self.max_damage)
        }
    }

    /// Ethereal damage, or `None` for categories that cannot be ethereal.
    pub fn ethereal_damage(&self) -> Option<RangeValue> {
        self.is_ethereal_capable().then(|| self.damage(true))
    }

    /// Ethereal strength and dexterity requirements.
    pub fn ethereal_requirements(&self) -> Option<(i32, i32)> {
        self.is_ethereal_capable().then(|| {
            (
                ethereal_requirement(self.strength_req),
                ethereal_requirement(self.dexterity_req),
            )
        })
    }
}

impl BaseItem for WeaponBase {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> ItemCategory {
        self.category
    }
}

/// One armor base.
///
/// Columns: name, tier, quality level, min def, max def, sockets, str req,
/// level req, speed penalty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorBase {
    pub name: String,
    pub category: ItemCategory,
    pub tier: String,
    pub quality_level: i32,
    pub min_defense: i32,
    pub max_defense: i32,
    pub max_sockets: i32,
    pub strength_req: i32,
    pub level_req: i32,
    pub speed_penalty: i32,
}

impl ArmorBase {
    fn from_row(category: ItemCategory, parts: &[&str]) -> Self {
        Self {
            name: field(parts, 0).to_string(),
            category,
            tier: field(parts, 1).to_string(),
            quality_level: int_field(parts, 2),
            min_defense: int_field(parts, 3),
            max_defense: int_field(parts, 4),
            max_sockets: int_field(parts, 5),
            strength_req: int_field(parts, 6),
            level_req: int_field(parts, 7),
            speed_penalty: int_field(parts, 8),
        }
    }

    pub fn defense(&self, ethereal_base: bool) -> RangeValue {
        if ethereal_base && self.is_ethereal_capable() {
            RangeValue::new(ethereal(self.min_defense), ethereal(self.max_defense))
        } else {
            RangeValue::new(self.min_defense, self.max_defense)
        }
    }

    pub fn ethereal_defense(&self) -> Option<RangeValue> {
        self.is_ethereal_capable().then(|| self.defense(true))
    }

    pub fn ethereal_strength_req(&self) -> Option<i32> {
        self.is_ethereal_capable()
            .then(|| ethereal_requirement(self.strength_req))
    }
}

impl BaseItem for ArmorBase {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> ItemCategory {
        self.category
    }
}

/// Parse one weapon category file. The first non-empty line is a header.
pub fn parse_weapon_table(category: ItemCategory, text: &str) -> Vec<WeaponBase> {
    let items: Vec<_> = pipe_rows(text)
        .map(|parts| WeaponBase::from_row(category, &parts))
        .collect();
    debug!(%category, count = items.len(), "parsed weapon bases");
    items
}

/// Parse one armor category file. The first non-empty line is a header.
pub fn parse_armor_table(category: ItemCategory, text: &str) -> Vec<ArmorBase> {
    let items: Vec<_> = pipe_rows(text)
        .map(|parts| ArmorBase::from_row(category, &parts))
        .collect();
    debug!(%category, count = items.len(), "parsed armor bases");
    items
}

/// Base items grouped by category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseCatalog<T> {
    categories: BTreeMap<ItemCategory, Vec<T>>,
}

impl<T> Default for BaseCatalog<T> {
    fn default() -> Self {
        Self {
            categories: BTreeMap::new(),
        }
    }
}

impl<T: BaseItem> BaseCatalog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the items of one category.
    pub fn insert(&mut self, category: ItemCategory, items: Vec<T>) {
        self.categories.insert(category, items);
    }

    pub fn category(&self, category: ItemCategory) -> &[T] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn categories(&self) -> impl Iterator<Item = ItemCategory> + '_ {
        self.categories.keys().copied()
    }

    /// Look an item up by exact name across all categories.
    pub fn find(&self, name: &str) -> Option<&T> {
        self.categories
            .values()
            .flat_map(|items| items.iter())
            .find(|item| item.name() == name)
    }

    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-difficulty additive bonus for one controlling skill level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterStatRow {
    pub level: u32,
    pub bonus: PerDifficulty<i32>,
}

impl MonsterStatRow {
    pub fn get(&self, difficulty: Difficulty) -> i32 {
        self.bonus[difficulty]
    }
}

/// Level-indexed monster stat table.
///
/// # Examples
///
/// ```rust
/// use cainstat::tables::MonsterStatTable;
/// use cainstat::Difficulty;
///
/// let table = MonsterStatTable::parse("Level Normal Nightmare Hell\n10 90 375 760\n");
/// let row = table.row(10).unwrap();
///
/// assert_eq!(row.get(Difficulty::Hell), 760);
/// assert!(table.row(11).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonsterStatTable {
    rows: BTreeMap<u32, MonsterStatRow>,
}

impl MonsterStatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse whitespace-delimited `level normal nightmare hell` rows.
    ///
    /// Rows whose first field is not a level (headers, comments) are
    /// skipped; missing bonuses read as `0`.
    pub fn parse(text: &str) -> Self {
        let mut table = Self::new();
        for line in text.lines() {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 2 {
                continue;
            }
            let Ok(level) = parts[0].parse::<u32>() else {
                continue;
            };
            table.insert(MonsterStatRow {
                level,
                bonus: PerDifficulty::new(
                    int_field(&parts, 1),
                    int_field(&parts, 2),
                    int_field(&parts, 3),
                ),
            });
        }
        debug!(rows = table.len(), "parsed monster stat table");
        table
    }

    pub fn insert(&mut self, row: MonsterStatRow) {
        self.rows.insert(row.level, row);
    }

    pub fn row(&self, level: u32) -> Option<&MonsterStatRow> {
        self.rows.get(&level)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One rune from `RuneInfo.txt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rune {
    pub number: u32,
    pub name: String,
    pub creation: String,
    pub combines_into: String,
    pub weapon_effect: String,
    pub armor_effect: String,
    pub shield_effect: String,
    pub drop_chance: f64,
    pub expected_drop: f64,
}

impl Rune {
    /// Display form, e.g. `Ber (#30)`.
    pub fn display(&self) -> String {
        format!("{} (#{})", self.name, self.number)
    }
}

/// Parse the rune info table. Lines starting with `RuneNumber` are headers.
pub fn parse_rune_info(text: &str) -> Vec<Rune> {
    text.lines()
        .filter(|l| !l.trim().is_empty() && !l.starts_with("RuneNumber"))
        .map(|l| l.split('|').map(str::trim).collect::<Vec<_>>())
        .filter(|parts| parts.len() >= 2)
        .map(|parts| Rune {
            number: field(&parts, 0).parse().unwrap_or(0),
            name: field(&parts, 1).to_string(),
            creation: field(&parts, 2).to_string(),
            combines_into: field(&parts, 3).to_string(),
            weapon_effect: field(&parts, 4).to_string(),
            armor_effect: field(&parts, 5).to_string(),
            shield_effect: field(&parts, 6).to_string(),
            drop_chance: float_field(&parts, 7),
            expected_drop: float_field(&parts, 8),
        })
        .collect()
}

/// A modifier a crafting recipe always rolls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetMod {
    pub name: String,
    pub range: String,
    pub max_possible: Option<String>,
}

impl PresetMod {
    /// Parsed numeric form of `range`.
    pub fn range_value(&self) -> RangeValue {
        crate::range::parse_range(&self.range)
    }

    /// Display form, e.g. `1-3 (Max 5)`.
    pub fn display(&self) -> String {
        match &self.max_possible {
            Some(max) => format!("{} (Max {})", self.range, max),
            None => self.range.clone(),
        }
    }
}

/// One crafting recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraftingRecipe {
    pub name: String,
    pub category: String,
    pub ingredients: Vec<String>,
    pub preset_mods: Vec<PresetMod>,
}

impl CraftingRecipe {
    fn ingredient(&self, index: usize) -> &str {
        self.ingredients.get(index).map(String::as_str).unwrap_or("")
    }

    /// The base item being crafted.
    pub fn item(&self) -> &str {
        self.ingredient(0)
    }

    pub fn rune(&self) -> &str {
        self.ingredient(2)
    }

    /// The remaining ingredients, e.g. `Jewel + Perfect Ruby`.
    pub fn misc(&self) -> String {
        format!("{} + {}", self.ingredient(1), self.ingredient(3))
    }
}

/// Split `Key: name | value` into its trimmed halves.
fn keyed_pair(rest: &str) -> Option<(&str, &str)> {
    let (key, value) = rest.split_once('|')?;
    let (key, value) = (key.trim(), value.trim());
    (!key.is_empty() && !value.is_empty()).then_some((key, value))
}

fn parse_recipe_entry(category: &str, lines: &[&str]) -> Option<CraftingRecipe> {
    let mut name = String::new();
    let mut ingredients = Vec::new();
    let mut presets: Vec<(String, String)> = Vec::new();
    let mut max_possible: BTreeMap<String, String> = BTreeMap::new();

    for line in lines {
        if let Some(rest) = line.strip_prefix("Name:") {
            name = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("Ingredients:") {
            ingredients.extend(rest.split('|').map(|s| s.trim().to_string()));
        } else if let Some(rest) = line.strip_prefix("PresetMod:") {
            if let Some((key, value)) = keyed_pair(rest) {
                presets.push((key.to_string(), value.to_string()));
            }
        } else if let Some(rest) = line.strip_prefix("MaxPossible:") {
            if let Some((key, value)) = keyed_pair(rest) {
                max_possible.insert(key.to_string(), value.to_string());
            }
        }
    }

    if name.is_empty() {
        return None;
    }

    let preset_mods = presets
        .into_iter()
        .map(|(name, range)| PresetMod {
            max_possible: max_possible.remove(&name),
            name,
            range,
        })
        .collect();

    Some(CraftingRecipe {
        name,
        category: category.to_string(),
        ingredients,
        preset_mods,
    })
}

/// Parse a recipe file whose entries are separated by blank lines.
///
/// # Examples
///
/// ```rust
/// use cainstat::tables::parse_crafting_recipes;
///
/// let text = "\
/// Name: Blood Gloves
/// Ingredients: Heavy Gloves | Jewel | Nef | Perfect Ruby
/// PresetMod: Crushing Blow | 5-10
/// MaxPossible: Crushing Blow | 10
/// ";
/// let recipes = parse_crafting_recipes("BloodRecipes", text);
///
/// assert_eq!(recipes[0].item(), "Heavy Gloves");
/// assert_eq!(recipes[0].rune(), "Nef");
/// assert_eq!(recipes[0].preset_mods[0].display(), "5-10 (Max 10)");
/// ```
pub fn parse_crafting_recipes(category: &str, text: &str) -> Vec<CraftingRecipe> {
    let mut recipes = Vec::new();
    let mut entry: Vec<&str> = Vec::new();

    for line in text.lines().map(str::trim).chain(std::iter::once("")) {
        if line.is_empty() {
            if !entry.is_empty() {
                recipes.extend(parse_recipe_entry(category, &entry));
                entry.clear();
            }
        } else {
            entry.push(line);
        }
    }
    debug!(category, count = recipes.len(), "parsed crafting recipes");
    recipes
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOWS: &str = "\
Name | Tier | QLvl | Min | Max | Speed | Sockets | Range | Str | Dex | Lvl
Hydra Bow | Elite | 85 | 10 | 68 | 10 | 6 | 0 | 63 | 167 | 71
";

    #[test]
    fn test_bows_are_never_ethereal() {
        let bows = parse_weapon_table(ItemCategory::Bows, BOWS);
        assert_eq!(bows.len(), 1);
        assert_eq!(bows[0].damage(true), RangeValue::new(10, 68));
        assert!(bows[0].ethereal_damage().is_none());
        assert!(bows[0].ethereal_requirements().is_none());
        assert!(bows[0].is_two_handed());
    }

    #[test]
    fn test_short_and_missing_fields() {
        let text = "header\nlonely\nClub | Normal | 1 | 1\n";
        let maces = parse_weapon_table(ItemCategory::Maces, text);
        assert_eq!(maces.len(), 1);
        assert_eq!(maces[0].min_damage, 1);
        assert_eq!(maces[0].max_damage, 0);
        assert_eq!(maces[0].level_req, 0);
    }

    #[test]
    fn test_ethereal_requirements_floor_at_zero() {
        let text = "header\nHand Axe | Normal | 3 | 3 | 6 | 0 | 2 | 0 | 0 | 0 | 0\n";
        let axes = parse_weapon_table(ItemCategory::Axes, text);
        assert_eq!(axes[0].ethereal_requirements(), Some((0, 0)));
    }

    #[test]
    fn test_armor_columns() {
        let text = "header\nArchon Plate | Elite | 84 | 410 | 524 | 4 | 103 | 63 | 10\n";
        let armors = parse_armor_table(ItemCategory::BodyArmors, text);
        let plate = &armors[0];
        assert_eq!(plate.defense(false), RangeValue::new(410, 524));
        assert_eq!(plate.ethereal_defense(), Some(RangeValue::new(615, 786)));
        assert_eq!(plate.ethereal_strength_req(), Some(93));
        assert_eq!(plate.speed_penalty, 10);
    }

    #[test]
    fn test_catalog_lookup() {
        let mut catalog = BaseCatalog::new();
        catalog.insert(ItemCategory::Bows, parse_weapon_table(ItemCategory::Bows, BOWS));
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find("Hydra Bow").is_some());
        assert!(catalog.find("Hydra").is_none());
        assert!(catalog.category(ItemCategory::Axes).is_empty());
    }

    #[test]
    fn test_monster_stats_skip_bad_rows() {
        let table = MonsterStatTable::parse("# comment\nLevel N NM H\n1 10 20 30\n2 15\nx 1 2 3\n");
        assert_eq!(table.len(), 2);
        assert_eq!(table.row(2).unwrap().bonus, PerDifficulty::new(15, 0, 0));
    }

    #[test]
    fn test_rune_info() {
        let text = "RuneNumber | Name | Creation\n30 | Ber | 2 Sur + Flawless Topaz | Jah | Crushing Blow | DR | DR | 0.01 | 1.5\n";
        let runes = parse_rune_info(text);
        assert_eq!(runes.len(), 1);
        assert_eq!(runes[0].display(), "Ber (#30)");
        assert_eq!(runes[0].combines_into, "Jah");
        assert_eq!(runes[0].expected_drop, 1.5);
    }

    #[test]
    fn test_recipes_split_on_blank_lines() {
        let text = "\
Name: Blood Helm
Ingredients: Helm | Jewel | Ral | Perfect Ruby
PresetMod: Life Leech | 1-3

Ingredients: nameless

Name: Blood Boots
Ingredients: Boots | Jewel | Eth | Perfect Ruby
";
        let recipes = parse_crafting_recipes("BloodRecipes", text);
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].misc(), "Jewel + Perfect Ruby");
        assert_eq!(recipes[0].preset_mods[0].range_value(), RangeValue::new(1, 3));
        assert_eq!(recipes[0].preset_mods[0].max_possible, None);
        assert_eq!(recipes[1].name, "Blood Boots");
    }
}
