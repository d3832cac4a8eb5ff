//! Item categories and the shorthand groups rune word data uses for them.

use crate::error::DataError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// A concrete base item category.
///
/// String forms match the category file names (`2HAxes.txt`, `Bows.txt`, ...).
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
pub enum ItemCategory {
    Axes,
    #[strum(serialize = "2HAxes")]
    #[serde(rename = "2HAxes")]
    TwoHandedAxes,
    Maces,
    #[strum(serialize = "2HMaces")]
    #[serde(rename = "2HMaces")]
    TwoHandedMaces,
    Swords,
    #[strum(serialize = "2HSwords")]
    #[serde(rename = "2HSwords")]
    TwoHandedSwords,
    Polearms,
    #[strum(serialize = "2HSpears")]
    #[serde(rename = "2HSpears")]
    TwoHandedSpears,
    Daggers,
    Scepters,
    Staves,
    Wands,
    Claws,
    Bows,
    Crossbows,
    Throwing,
    Javelins,
    BodyArmors,
    Helms,
    Shields,
    Boots,
    Gloves,
    Belts,
}

impl ItemCategory {
    pub fn is_weapon(self) -> bool {
        !matches!(
            self,
            ItemCategory::BodyArmors
                | ItemCategory::Helms
                | ItemCategory::Shields
                | ItemCategory::Boots
                | ItemCategory::Gloves
                | ItemCategory::Belts
        )
    }

    pub fn is_ranged(self) -> bool {
        matches!(
            self,
            ItemCategory::Bows
                | ItemCategory::Crossbows
                | ItemCategory::Throwing
                | ItemCategory::Javelins
        )
    }

    /// Bow-type categories cannot spawn ethereal.
    pub fn is_ethereal_capable(self) -> bool {
        !matches!(self, ItemCategory::Bows | ItemCategory::Crossbows)
    }

    pub fn is_two_handed(self) -> bool {
        matches!(
            self,
            ItemCategory::TwoHandedAxes
                | ItemCategory::TwoHandedMaces
                | ItemCategory::TwoHandedSwords
                | ItemCategory::TwoHandedSpears
                | ItemCategory::Polearms
                | ItemCategory::Staves
                | ItemCategory::Bows
                | ItemCategory::Crossbows
        )
    }

    pub fn weapons() -> impl Iterator<Item = ItemCategory> {
        ItemCategory::iter().filter(|c| c.is_weapon())
    }
}

/// A named group of categories used in `CompatibleItems:` lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
pub enum CategoryGroup {
    #[strum(serialize = "All Weapons")]
    AllWeapons,
    #[strum(serialize = "Melee Weapons")]
    MeleeWeapons,
    #[strum(serialize = "Ranged Weapons")]
    RangedWeapons,
}

impl CategoryGroup {
    pub fn categories(self) -> Vec<ItemCategory> {
        match self {
            CategoryGroup::AllWeapons => ItemCategory::weapons().collect(),
            CategoryGroup::MeleeWeapons => {
                ItemCategory::weapons().filter(|c| !c.is_ranged()).collect()
            }
            CategoryGroup::RangedWeapons => {
                ItemCategory::weapons().filter(|c| c.is_ranged()).collect()
            }
        }
    }
}

/// Expand one `CompatibleItems:` token into concrete categories.
///
/// # Examples
///
/// ```rust
/// use cainstat::category::{expand_category_token, ItemCategory};
///
/// let ranged = expand_category_token("Ranged Weapons").unwrap();
/// assert!(ranged.contains(&ItemCategory::Bows));
/// assert!(!ranged.contains(&ItemCategory::Swords));
///
/// assert_eq!(expand_category_token("2HAxes").unwrap(), vec![ItemCategory::TwoHandedAxes]);
/// assert!(expand_category_token("Heavy Weapons").is_err());
/// ```
pub fn expand_category_token(token: &str) -> Result<Vec<ItemCategory>, DataError> {
    let token = token.trim();
    if let Ok(group) = CategoryGroup::from_str(token) {
        return Ok(group.categories());
    }
    ItemCategory::from_str(token)
        .map(|c| vec![c])
        .map_err(|_| DataError::UnknownItemCategory(token.to_string()))
}
