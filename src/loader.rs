//! Asynchronous bulk loading with at-most-once caches.
//!
//! A [`DataLoader`] owns one cache per data group. The first call to a
//! group's accessor reads every file of that group concurrently, parses
//! them, and stores the result; later calls return the cached `Arc`.
//! Concurrent first calls wait for the same load.
//!
//! A file that cannot be read is logged and treated as empty. Nothing here
//! fails: a missing category just yields fewer entries.

use crate::config::DataConfig;
use crate::error::DataError;
use crate::runeword::{parse_rune_words, RuneWordIndex};
use crate::tables::{
    parse_armor_table, parse_crafting_recipes, parse_rune_info, parse_weapon_table, ArmorBase,
    BaseCatalog, CraftingRecipe, MonsterStatTable, Rune, WeaponBase,
};
use futures_util::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// Read a file, logging and substituting empty text on failure.
async fn read_or_empty(path: &Path) -> String {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => {
            debug!(path = %path.display(), bytes = text.len(), "loaded data file");
            text
        }
        Err(source) => {
            let err = DataError::Io {
                path: path.to_path_buf(),
                source,
            };
            warn!(error = %err, "data file unavailable, treating it as empty");
            String::new()
        }
    }
}

/// `.txt` files directly inside `dir`, sorted by name.
async fn text_files(dir: &Path) -> Vec<PathBuf> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "cannot list rune word directory");
            return Vec::new();
        }
    };

    let mut files = Vec::new();
    loop {
        match entries.next_entry().await {
            Ok(Some(entry)) => {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "txt") {
                    files.push(path);
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "stopped listing rune word directory");
                break;
            }
        }
    }
    files.sort();
    files
}

/// Read all `paths` concurrently, preserving order.
async fn read_all(paths: &[PathBuf]) -> Vec<String> {
    join_all(paths.iter().map(|p| read_or_empty(p))).await
}

/// Every data group, fully loaded.
#[derive(Debug, Clone)]
pub struct GameData {
    pub rune_words: Arc<RuneWordIndex>,
    pub monster_stats: Arc<MonsterStatTable>,
    pub weapons: Arc<BaseCatalog<WeaponBase>>,
    pub armors: Arc<BaseCatalog<ArmorBase>>,
    pub runes: Arc<Vec<Rune>>,
    pub recipes: Arc<Vec<CraftingRecipe>>,
}

/// Lazily populated, shareable data caches.
///
/// # Examples
///
/// ```rust,no_run
/// use cainstat::config::DataConfig;
/// use cainstat::loader::DataLoader;
///
/// # async fn run() {
/// let loader = DataLoader::new(DataConfig::with_base_dir("."));
/// let data = loader.load_all().await;
/// println!("{} rune words", data.rune_words.len());
/// # }
/// ```
#[derive(Debug, Default)]
pub struct DataLoader {
    config: DataConfig,
    rune_words: OnceCell<Arc<RuneWordIndex>>,
    monster_stats: OnceCell<Arc<MonsterStatTable>>,
    weapons: OnceCell<Arc<BaseCatalog<WeaponBase>>>,
    armors: OnceCell<Arc<BaseCatalog<ArmorBase>>>,
    runes: OnceCell<Arc<Vec<Rune>>>,
    recipes: OnceCell<Arc<Vec<CraftingRecipe>>>,
}

impl DataLoader {
    pub fn new(config: DataConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &DataConfig {
        &self.config
    }

    /// All rune word files merged into one index; later files win on
    /// duplicate names.
    pub async fn rune_words(&self) -> Arc<RuneWordIndex> {
        self.rune_words
            .get_or_init(|| async {
                let files = text_files(&self.config.rune_word_dir_path()).await;
                let mut index = RuneWordIndex::new();
                for text in read_all(&files).await {
                    index.extend(parse_rune_words(&text));
                }
                debug!(files = files.len(), rune_words = index.len(), "rune words ready");
                Arc::new(index)
            })
            .await
            .clone()
    }

    pub async fn monster_stats(&self) -> Arc<MonsterStatTable> {
        self.monster_stats
            .get_or_init(|| async {
                let text = read_or_empty(&self.config.monster_stats_path()).await;
                Arc::new(MonsterStatTable::parse(&text))
            })
            .await
            .clone()
    }

    pub async fn weapons(&self) -> Arc<BaseCatalog<WeaponBase>> {
        self.weapons
            .get_or_init(|| async {
                let categories = &self.config.weapon_categories;
                let paths: Vec<_> = categories
                    .iter()
                    .map(|c| self.config.weapon_path(*c))
                    .collect();
                let mut catalog = BaseCatalog::new();
                for (category, text) in categories.iter().zip(read_all(&paths).await) {
                    catalog.insert(*category, parse_weapon_table(*category, &text));
                }
                Arc::new(catalog)
            })
            .await
            .clone()
    }

    pub async fn armors(&self) -> Arc<BaseCatalog<ArmorBase>> {
        self.armors
            .get_or_init(|| async {
                let categories = &self.config.armor_categories;
                let paths: Vec<_> = categories
                    .iter()
                    .map(|c| self.config.armor_path(*c))
                    .collect();
                let mut catalog = BaseCatalog::new();
                for (category, text) in categories.iter().zip(read_all(&paths).await) {
                    catalog.insert(*category, parse_armor_table(*category, &text));
                }
                Arc::new(catalog)
            })
            .await
            .clone()
    }

    pub async fn runes(&self) -> Arc<Vec<Rune>> {
        self.runes
            .get_or_init(|| async {
                let text = read_or_empty(&self.config.rune_info_path()).await;
                Arc::new(parse_rune_info(&text))
            })
            .await
            .clone()
    }

    pub async fn recipes(&self) -> Arc<Vec<CraftingRecipe>> {
        self.recipes
            .get_or_init(|| async {
                let paths = self.config.recipe_paths();
                let mut recipes = Vec::new();
                for (path, text) in paths.iter().zip(read_all(&paths).await) {
                    let category = path
                        .file_stem()
                        .map(|s| s.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    recipes.extend(parse_crafting_recipes(&category, &text));
                }
                Arc::new(recipes)
            })
            .await
            .clone()
    }

    /// Populate every cache concurrently.
    pub async fn load_all(&self) -> GameData {
        let (rune_words, monster_stats, weapons, armors, runes, recipes) = tokio::join!(
            self.rune_words(),
            self.monster_stats(),
            self.weapons(),
            self.armors(),
            self.runes(),
            self.recipes(),
        );
        GameData {
            rune_words,
            monster_stats,
            weapons,
            armors,
            runes,
            recipes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::ItemCategory;
    use std::fs;

    fn write(root: &Path, relative: &str, text: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    #[tokio::test]
    async fn test_missing_files_yield_empty_data() {
        let dir = tempfile::tempdir().unwrap();
        let loader = DataLoader::new(DataConfig::with_base_dir(dir.path()));
        let data = loader.load_all().await;
        assert!(data.rune_words.is_empty());
        assert!(data.monster_stats.is_empty());
        assert!(data.weapons.is_empty());
        assert!(data.runes.is_empty());
        assert!(data.recipes.is_empty());
    }

    #[tokio::test]
    async fn test_cache_is_populated_once() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "assets/Summons/MonStats.txt", "1 10 20 30\n");
        let loader = DataLoader::new(DataConfig::with_base_dir(dir.path()));

        let first = loader.monster_stats().await;
        write(dir.path(), "assets/Summons/MonStats.txt", "1 10 20 30\n2 1 1 1\n");
        let second = loader.monster_stats().await;

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
    }

    #[tokio::test]
    async fn test_one_bad_category_does_not_block_others() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "assets/WeaponStats/Swords.txt",
            "header\nCrystal Sword | Normal | 11 | 5 | 15 | 0 | 6 | 2 | 43 | 0 | 11\n",
        );
        let loader = DataLoader::new(DataConfig::with_base_dir(dir.path()));
        let weapons = loader.weapons().await;

        assert_eq!(weapons.len(), 1);
        assert_eq!(weapons.category(ItemCategory::Swords).len(), 1);
        assert!(weapons.category(ItemCategory::Axes).is_empty());
    }

    #[tokio::test]
    async fn test_rune_word_directory_merge() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "assets/RuneWords/a.txt",
            "Entry: Spirit\nRuneOrder: Tal | Thul | Ort | Amn\nCompatibleItems: Swords\n",
        );
        write(
            dir.path(),
            "assets/RuneWords/b.txt",
            "Entry: Spirit\nRuneOrder: Tal | Thul | Ort | Amn\nCompatibleItems: Shields\n",
        );
        write(dir.path(), "assets/RuneWords/notes.md", "Entry: Ignored\n");

        let loader = DataLoader::new(DataConfig::with_base_dir(dir.path()));
        let index = loader.rune_words().await;

        assert_eq!(index.len(), 1);
        let spirit = index.get("Spirit").unwrap();
        assert!(spirit.fits(ItemCategory::Shields));
        assert!(!spirit.fits(ItemCategory::Swords));
    }
}
