//! Data file locations.
//!
//! Defaults match the standard asset layout:
//!
//! ```text
//! assets/
//!   RuneWords/*.txt
//!   WeaponStats/<Category>.txt
//!   ArmorStats/<Category>.txt
//!   Runes/RuneInfo.txt
//!   Crafting/BloodRecipes.txt
//!   Summons/MonStats.txt
//! ```
//!
//! Any subset can be overridden from TOML; relative paths resolve against
//! `base_dir`.

use crate::category::ItemCategory;
use crate::error::DataError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the loader finds each kind of source file.
///
/// # Examples
///
/// ```rust
/// use cainstat::config::DataConfig;
/// use cainstat::category::ItemCategory;
///
/// let config = DataConfig::from_toml_str(r#"
///     base_dir = "/srv/cain"
///     armor_categories = ["BodyArmors"]
/// "#).unwrap();
///
/// assert_eq!(config.armor_categories, vec![ItemCategory::BodyArmors]);
/// assert!(config.monster_stats_path().ends_with("assets/Summons/MonStats.txt"));
/// assert!(config.monster_stats_path().starts_with("/srv/cain"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub base_dir: PathBuf,
    /// Every `.txt` file in this directory is a rune word file.
    pub rune_word_dir: PathBuf,
    pub weapon_dir: PathBuf,
    pub weapon_categories: Vec<ItemCategory>,
    pub armor_dir: PathBuf,
    pub armor_categories: Vec<ItemCategory>,
    pub rune_info: PathBuf,
    pub recipe_files: Vec<PathBuf>,
    pub monster_stats: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            rune_word_dir: PathBuf::from("assets/RuneWords"),
            weapon_dir: PathBuf::from("assets/WeaponStats"),
            weapon_categories: vec![
                ItemCategory::Axes,
                ItemCategory::TwoHandedAxes,
                ItemCategory::Polearms,
                ItemCategory::Swords,
                ItemCategory::TwoHandedSwords,
                ItemCategory::Maces,
                ItemCategory::TwoHandedMaces,
                ItemCategory::TwoHandedSpears,
                ItemCategory::Bows,
            ],
            armor_dir: PathBuf::from("assets/ArmorStats"),
            armor_categories: vec![ItemCategory::BodyArmors, ItemCategory::Boots],
            rune_info: PathBuf::from("assets/Runes/RuneInfo.txt"),
            recipe_files: vec![PathBuf::from("assets/Crafting/BloodRecipes.txt")],
            monster_stats: PathBuf::from("assets/Summons/MonStats.txt"),
        }
    }
}

impl DataConfig {
    /// Default layout rooted at `base_dir`.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, DataError> {
        toml::from_str(text).map_err(|e| DataError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self, DataError> {
        let text = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }

    pub fn rune_word_dir_path(&self) -> PathBuf {
        self.resolve(&self.rune_word_dir)
    }

    pub fn weapon_path(&self, category: ItemCategory) -> PathBuf {
        self.resolve(&self.weapon_dir).join(format!("{category}.txt"))
    }

    pub fn armor_path(&self, category: ItemCategory) -> PathBuf {
        self.resolve(&self.armor_dir).join(format!("{category}.txt"))
    }

    pub fn rune_info_path(&self) -> PathBuf {
        self.resolve(&self.rune_info)
    }

    pub fn recipe_paths(&self) -> Vec<PathBuf> {
        self.recipe_files.iter().map(|p| self.resolve(p)).collect()
    }

    pub fn monster_stats_path(&self) -> PathBuf {
        self.resolve(&self.monster_stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(DataConfig::from_toml_str("").unwrap(), DataConfig::default());
    }

    #[test]
    fn test_category_file_names() {
        let config = DataConfig::with_base_dir("data");
        assert_eq!(
            config.weapon_path(ItemCategory::TwoHandedAxes),
            PathBuf::from("data/assets/WeaponStats/2HAxes.txt")
        );
    }

    #[test]
    fn test_bad_category_is_config_error() {
        let err = DataConfig::from_toml_str("weapon_categories = [\"Spoons\"]").unwrap_err();
        assert!(matches!(err, DataError::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = DataConfig::from_file(Path::new("/nonexistent/cain.toml")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}
