//! Iron golem built from an ethereal Phase Blade with Grief, against every
//! enemy class and difficulty.
//!
//! Pass a data directory to load the full asset layout from disk:
//!
//! ```text
//! RUST_LOG=cainstat=debug cargo run --example iron_golem -- path/to/data
//! ```
//!
//! Without an argument the demo runs on built-in sample data.

use cainstat::config::DataConfig;
use cainstat::loader::{DataLoader, GameData};
use cainstat::runeword::parse_rune_words;
use cainstat::tables::{parse_weapon_table, BaseCatalog, MonsterStatTable};
use cainstat::*;
use std::sync::Arc;

const SAMPLE_RUNE_WORDS: &str = "\
Entry: Grief
RuneOrder: Eth | Tir | Lo | Mal | Ral
CompatibleItems: Swords | Axes
Stat: ChanceToCast | 35 | 15 | Venom | on striking
Stat: Damage | 340-400
Stat: AttackRating | All | 30%
Stat: FireDamage | 5-30
";

const SAMPLE_SWORDS: &str = "\
Name | Tier | QLvl | Min | Max | Speed | Sockets | Range | Str | Dex | Lvl
Phase Blade | Elite | 54 | 31 | 35 | -30 | 6 | 2 | 25 | 136 | 54
";

const SAMPLE_MONSTER_STATS: &str = "\
Level Normal Nightmare Hell
20 200 500 1000
";

fn sample_data() -> GameData {
    let mut weapons = BaseCatalog::new();
    weapons.insert(
        ItemCategory::Swords,
        parse_weapon_table(ItemCategory::Swords, SAMPLE_SWORDS),
    );
    GameData {
        rune_words: Arc::new(parse_rune_words(SAMPLE_RUNE_WORDS)),
        monster_stats: Arc::new(MonsterStatTable::parse(SAMPLE_MONSTER_STATS)),
        weapons: Arc::new(weapons),
        armors: Arc::new(BaseCatalog::new()),
        runes: Arc::new(Vec::new()),
        recipes: Arc::new(Vec::new()),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let data = match std::env::args().nth(1) {
        Some(dir) => DataLoader::new(DataConfig::with_base_dir(dir)).load_all().await,
        None => sample_data(),
    };

    let (Some(grief), Some(blade)) = (
        data.rune_words.get("Grief"),
        data.weapons.find("Phase Blade"),
    ) else {
        eprintln!("Grief or Phase Blade missing from the data set");
        return;
    };

    let auras = AuraLevels::new()
        .with(Aura::Fanaticism, 20)
        .with(Aura::BattleOrders, 30);
    let inputs = IronGolemInputs::new(20, blade)
        .mastery(10)
        .resist(10)
        .character_level(90)
        .ethereal(true)
        .auras(auras)
        .rune_word(grief);

    let Some(result) = iron_golem(&data.monster_stats, &inputs) else {
        eprintln!("no monster stat row for skill level 20");
        return;
    };

    println!("Iron Golem (level {}) from {} {}", result.skill_level, blade.name, grief.name);
    for (difficulty, stats) in result.per_difficulty.iter() {
        println!(
            "{difficulty:>9}: life {:>6}  defense {:>5}  regen {:>6.2}/s",
            stats.life, stats.defense, stats.life_regen_per_second
        );
    }
    println!();
    for (difficulty, class, scenario, cell) in result.scenarios.iter() {
        println!(
            "{difficulty:>9} {class:>6} {scenario:>5}: {:>5}-{:<5} (avg {:>5})  AR {:>6}",
            cell.damage_min, cell.damage_max, cell.damage_avg, cell.attack_rating
        );
    }

    println!();
    println!("Shown on the golem:");
    for label in grief.golem_view() {
        println!("  {} {}", label.label, label.value);
    }
}
