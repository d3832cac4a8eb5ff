//! Internal key module.
//!
//! Provides the `StatKey` type, the interned internal name under which a
//! parsed stat is exposed to the external formatter. Uses `Arc<str>` so the
//! same key can be shared across every rune word that carries it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

/// Interned internal key for a stat's presentation entry.
///
/// # Examples
///
/// ```rust
/// use cainstat::StatKey;
///
/// let key = StatKey::from_label_parts(&["aura", "Heart of Wolverine"]);
/// assert_eq!(key.as_str(), "aura_heart_of_wolverine");
///
/// let same: StatKey = "aura_heart_of_wolverine".into();
/// assert_eq!(key, same);
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct StatKey(Arc<str>);

impl Serialize for StatKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.as_ref().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StatKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(StatKey::from(s))
    }
}

impl StatKey {
    /// Create a key from a string slice, unchanged.
    pub fn new(s: &str) -> Self {
        Self(Arc::from(s))
    }

    /// Build a snake_case key from display fragments.
    ///
    /// Letters and digits are kept (lowercased); every other run of
    /// characters collapses to a single `_`. Empty fragments are skipped.
    pub fn from_label_parts(parts: &[&str]) -> Self {
        let mut key = String::new();
        for part in parts {
            let snake = snake_case(part);
            if snake.is_empty() {
                continue;
            }
            if !key.is_empty() {
                key.push('_');
            }
            key.push_str(&snake);
        }
        Self(Arc::from(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn snake_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_lower = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            // CamelCase boundary: "EnhancedDamage" -> "enhanced_damage"
            if c.is_ascii_uppercase() && prev_lower {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        } else {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            prev_lower = false;
        }
    }
    out.trim_end_matches('_').to_string()
}

impl From<&str> for StatKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StatKey {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl std::fmt::Display for StatKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
