//! Stat-line parsing.
//!
//! A rune word lists its bonuses one per `Stat:` line, with `|`-separated
//! fields. The first field picks a matcher from a fixed, ordered table;
//! lines that no matcher claims fall through to the positional generic
//! matcher. Parsing is total: every input produces exactly one [`Stat`].
//!
//! ```text
//! Stat: Aura | Fanaticism | 12-15
//! Stat: ChanceToCast | 20 | 33 | Chain Lightning | on striking
//! Stat: EnhancedDamage | Demon | 100
//! ```

use crate::range::{parse_range, RangeValue};
use crate::stat_key::StatKey;
use serde::{Deserialize, Serialize};

/// Line prefix shared by every stat line.
pub const STAT_PREFIX: &str = "Stat:";

/// Which monsters an attack rating bonus applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackTarget {
    All,
    Demon,
    Undead,
}

impl AttackTarget {
    /// Resolve a monster class token, singular or plural, ignoring case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cainstat::stat_line::AttackTarget;
    ///
    /// assert_eq!(AttackTarget::from_token("Demons"), Some(AttackTarget::Demon));
    /// assert_eq!(AttackTarget::from_token("undead"), Some(AttackTarget::Undead));
    /// assert_eq!(AttackTarget::from_token("Elves"), None);
    /// ```
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        let matches = |names: &[&str]| names.iter().any(|n| token.eq_ignore_ascii_case(n));
        if matches(&["all"]) {
            Some(AttackTarget::All)
        } else if matches(&["demon", "demons"]) {
            Some(AttackTarget::Demon)
        } else if matches(&["undead", "undeads"]) {
            Some(AttackTarget::Undead)
        } else {
            None
        }
    }

    /// Unknown targets apply to all monsters.
    fn parse(token: &str) -> Self {
        Self::from_token(token).unwrap_or(AttackTarget::All)
    }

    fn label(self) -> &'static str {
        match self {
            AttackTarget::All => "All",
            AttackTarget::Demon => "Demons",
            AttackTarget::Undead => "Undead",
        }
    }

    fn key(self) -> &'static str {
        match self {
            AttackTarget::All => "",
            AttackTarget::Demon => "demon",
            AttackTarget::Undead => "undead",
        }
    }
}

/// Whether an attack rating bonus is flat or a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackMode {
    Additive,
    Percent,
}

/// One typed bonus line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Stat {
    ChanceToCast {
        skill: String,
        level: RangeValue,
        chance_percent: RangeValue,
        trigger: String,
    },
    Aura {
        aura_name: String,
        level: RangeValue,
    },
    Skill {
        skill_name: String,
        level: RangeValue,
        class_restriction: Option<String>,
    },
    Charges {
        skill_name: String,
        level: RangeValue,
        charges: RangeValue,
    },
    AfterEachKill {
        resource: String,
        kill_target: String,
        amount: RangeValue,
    },
    AttackRating {
        target: AttackTarget,
        mode: AttackMode,
        amount: RangeValue,
    },
    Generic {
        kind: String,
        subtype: Option<String>,
        value: Option<RangeValue>,
        extra: Vec<String>,
    },
}

/// Presentation metadata for one stat: internal key, display label and the
/// value text the formatter shows next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLabel {
    pub key: StatKey,
    pub label: String,
    pub value: String,
}

/// A parsed line: the stat plus its presentation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedStat {
    pub stat: Stat,
    pub label: StatLabel,
}

type Matcher = fn(&[&str]) -> Stat;

/// Specialized matchers in priority order, keyed by leading token.
const MATCHERS: &[(&str, Matcher)] = &[
    ("ChanceToCast", match_chance_to_cast),
    ("Aura", match_aura),
    ("Skill", match_skill),
    ("Charges", match_charges),
    ("AfterEachKill", match_after_each_kill),
    ("AttackRating", match_attack_rating),
];

/// Parse one stat line.
///
/// The `Stat:` prefix is optional. Never fails.
///
/// # Examples
///
/// ```rust
/// use cainstat::stat_line::{parse_stat_line, Stat};
/// use cainstat::range::RangeValue;
///
/// let parsed = parse_stat_line("Stat: Aura | Fanaticism | 12-15");
/// assert_eq!(
///     parsed.stat,
///     Stat::Aura { aura_name: "Fanaticism".into(), level: RangeValue::new(12, 15) }
/// );
/// assert_eq!(parsed.label.key.as_str(), "aura_fanaticism");
///
/// // Unknown leading tokens are still parsed
/// let parsed = parse_stat_line("Stat: Resist | Fire | 30");
/// assert!(matches!(parsed.stat, Stat::Generic { .. }));
/// ```
pub fn parse_stat_line(line: &str) -> ParsedStat {
    let body = line.trim();
    let body = body.strip_prefix(STAT_PREFIX).unwrap_or(body);
    let fields: Vec<&str> = body.split('|').map(str::trim).collect();
    let lead = fields.first().copied().unwrap_or("");

    let stat = MATCHERS
        .iter()
        .find(|(token, _)| lead.eq_ignore_ascii_case(token))
        .map(|(_, matcher)| matcher(&fields[1..]))
        .unwrap_or_else(|| match_generic(&fields));

    let label = stat.label();
    ParsedStat { stat, label }
}

fn field<'a>(fields: &[&'a str], index: usize) -> &'a str {
    fields.get(index).copied().unwrap_or("")
}

fn optional_field(fields: &[&str], index: usize) -> Option<String> {
    let value = field(fields, index);
    (!value.is_empty()).then(|| value.to_string())
}

fn match_chance_to_cast(fields: &[&str]) -> Stat {
    Stat::ChanceToCast {
        chance_percent: parse_range(field(fields, 0)),
        level: parse_range(field(fields, 1)),
        skill: field(fields, 2).to_string(),
        trigger: field(fields, 3).to_string(),
    }
}

fn match_aura(fields: &[&str]) -> Stat {
    Stat::Aura {
        aura_name: field(fields, 0).to_string(),
        level: parse_range(field(fields, 1)),
    }
}

fn match_skill(fields: &[&str]) -> Stat {
    Stat::Skill {
        skill_name: field(fields, 0).to_string(),
        level: parse_range(field(fields, 1)),
        class_restriction: optional_field(fields, 2),
    }
}

fn match_charges(fields: &[&str]) -> Stat {
    Stat::Charges {
        skill_name: field(fields, 0).to_string(),
        level: parse_range(field(fields, 1)),
        charges: parse_range(field(fields, 2)),
    }
}

fn match_after_each_kill(fields: &[&str]) -> Stat {
    Stat::AfterEachKill {
        resource: field(fields, 0).to_string(),
        amount: parse_range(field(fields, 1)),
        kill_target: optional_field(fields, 2).unwrap_or_else(|| "Kill".to_string()),
    }
}

fn match_attack_rating(fields: &[&str]) -> Stat {
    let amount_text = field(fields, 1);
    let mode = match field(fields, 2) {
        m if m.eq_ignore_ascii_case("percent") => AttackMode::Percent,
        m if m.eq_ignore_ascii_case("additive") => AttackMode::Additive,
        _ if amount_text.ends_with('%') => AttackMode::Percent,
        _ => AttackMode::Additive,
    };
    Stat::AttackRating {
        target: AttackTarget::parse(field(fields, 0)),
        mode,
        amount: parse_range(amount_text),
    }
}

fn looks_numeric(token: &str) -> bool {
    token
        .chars()
        .next()
        .map(|c| c.is_ascii_digit() || c == '-' || c == '+')
        .unwrap_or(false)
}

fn match_generic(fields: &[&str]) -> Stat {
    let kind = field(fields, 0).to_string();
    let second = field(fields, 1);

    let (subtype, value, rest) = if second.is_empty() && fields.len() <= 2 {
        (None, None, 2)
    } else if looks_numeric(second) {
        (None, Some(parse_range(second)), 2)
    } else {
        let value = optional_field(fields, 2).map(|v| parse_range(&v));
        (optional_field(fields, 1), value, 3)
    };

    let extra = fields
        .iter()
        .skip(rest)
        .filter(|f| !f.is_empty())
        .map(|f| f.to_string())
        .collect();

    Stat::Generic {
        kind,
        subtype,
        value,
        extra,
    }
}

/// Insert spaces at CamelCase boundaries: `EnhancedDamage` -> `Enhanced Damage`.
fn humanize(kind: &str) -> String {
    let mut out = String::with_capacity(kind.len() + 4);
    let mut prev_lower = false;
    for c in kind.chars() {
        if c.is_ascii_uppercase() && prev_lower {
            out.push(' ');
        }
        prev_lower = c.is_ascii_lowercase();
        out.push(c);
    }
    out
}

impl Stat {
    /// Derive the formatter metadata for this stat.
    pub fn label(&self) -> StatLabel {
        match self {
            Stat::ChanceToCast {
                skill,
                level,
                chance_percent,
                trigger,
            } => StatLabel {
                key: StatKey::from_label_parts(&["ctc", skill]),
                label: format!(
                    "{chance_percent}% Chance to cast level {level} {skill} {trigger}"
                )
                .trim_end()
                .to_string(),
                value: format!("{chance_percent}%"),
            },
            Stat::Aura { aura_name, level } => StatLabel {
                key: StatKey::from_label_parts(&["aura", aura_name]),
                label: format!("Level {level} {aura_name} Aura When Equipped"),
                value: level.to_string(),
            },
            Stat::Skill {
                skill_name,
                level,
                class_restriction,
            } => {
                let mut label = format!("+{level} to {skill_name}");
                if let Some(class) = class_restriction {
                    label.push_str(&format!(" ({class} Only)"));
                }
                StatLabel {
                    key: StatKey::from_label_parts(&["skill", skill_name]),
                    label,
                    value: level.to_string(),
                }
            }
            Stat::Charges {
                skill_name,
                level,
                charges,
            } => StatLabel {
                key: StatKey::from_label_parts(&["charges", skill_name]),
                label: format!("Level {level} {skill_name} ({charges} Charges)"),
                value: charges.to_string(),
            },
            Stat::AfterEachKill {
                resource,
                kill_target,
                amount,
            } => StatLabel {
                key: StatKey::from_label_parts(&[resource, "after", kill_target]),
                label: format!("+{amount} {resource} after each {kill_target}"),
                value: amount.to_string(),
            },
            Stat::AttackRating {
                target,
                mode,
                amount,
            } => {
                let (suffix, key_mode) = match mode {
                    AttackMode::Percent => ("%", "percent"),
                    AttackMode::Additive => ("", ""),
                };
                let against = match target {
                    AttackTarget::All => String::new(),
                    other => format!(" against {}", other.label()),
                };
                StatLabel {
                    key: StatKey::from_label_parts(&["attack_rating", key_mode, target.key()]),
                    label: format!("+{amount}{suffix} Attack Rating{against}"),
                    value: format!("{amount}{suffix}"),
                }
            }
            Stat::Generic {
                kind,
                subtype,
                value,
                extra,
            } => {
                let mut label = humanize(kind);
                if let Some(subtype) = subtype {
                    label.push_str(&format!(" ({subtype})"));
                }
                let mut value_text = value.map(|v| v.to_string()).unwrap_or_default();
                if !extra.is_empty() {
                    if !value_text.is_empty() {
                        value_text.push(' ');
                    }
                    value_text.push_str(&extra.join(" "));
                }
                StatLabel {
                    key: StatKey::from_label_parts(&[kind, subtype.as_deref().unwrap_or("")]),
                    label,
                    value: value_text,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chance_to_cast() {
        let parsed = parse_stat_line("Stat: ChanceToCast | 20 | 33 | Chain Lightning | on striking");
        assert_eq!(
            parsed.stat,
            Stat::ChanceToCast {
                skill: "Chain Lightning".into(),
                level: RangeValue::fixed(33),
                chance_percent: RangeValue::fixed(20),
                trigger: "on striking".into(),
            }
        );
        assert_eq!(parsed.label.key.as_str(), "ctc_chain_lightning");
        assert_eq!(
            parsed.label.label,
            "20% Chance to cast level 33 Chain Lightning on striking"
        );
    }

    #[test]
    fn test_skill_with_class() {
        let parsed = parse_stat_line("Stat: Skill | All Skills | 1-2 | Necromancer");
        assert_eq!(parsed.label.label, "+1-2 to All Skills (Necromancer Only)");
        match parsed.stat {
            Stat::Skill {
                class_restriction, ..
            } => assert_eq!(class_restriction.as_deref(), Some("Necromancer")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_charges() {
        let parsed = parse_stat_line("Stat: Charges | Venom | 13 | 11");
        assert_eq!(
            parsed.stat,
            Stat::Charges {
                skill_name: "Venom".into(),
                level: RangeValue::fixed(13),
                charges: RangeValue::fixed(11),
            }
        );
    }

    #[test]
    fn test_after_each_kill_default_target() {
        let parsed = parse_stat_line("Stat: AfterEachKill | Life | 5");
        assert_eq!(
            parsed.stat,
            Stat::AfterEachKill {
                resource: "Life".into(),
                kill_target: "Kill".into(),
                amount: RangeValue::fixed(5),
            }
        );
        assert_eq!(parsed.label.key.as_str(), "life_after_kill");
    }

    #[test]
    fn test_attack_rating_modes() {
        let flat = parse_stat_line("Stat: AttackRating | Demon | 200-300");
        assert_eq!(
            flat.stat,
            Stat::AttackRating {
                target: AttackTarget::Demon,
                mode: AttackMode::Additive,
                amount: RangeValue::new(200, 300),
            }
        );
        assert_eq!(flat.label.key.as_str(), "attack_rating_demon");

        let pct = parse_stat_line("Stat: AttackRating | All | 75%");
        assert!(matches!(
            pct.stat,
            Stat::AttackRating {
                mode: AttackMode::Percent,
                target: AttackTarget::All,
                ..
            }
        ));
        assert_eq!(pct.label.key.as_str(), "attack_rating_percent");

        let explicit = parse_stat_line("Stat: AttackRating | Undead | 50 | Percent");
        assert!(matches!(
            explicit.stat,
            Stat::AttackRating {
                mode: AttackMode::Percent,
                target: AttackTarget::Undead,
                ..
            }
        ));
    }

    #[test]
    fn test_generic_value_only() {
        let parsed = parse_stat_line("Stat: EnhancedDamage | 200-240");
        assert_eq!(
            parsed.stat,
            Stat::Generic {
                kind: "EnhancedDamage".into(),
                subtype: None,
                value: Some(RangeValue::new(200, 240)),
                extra: vec![],
            }
        );
        assert_eq!(parsed.label.label, "Enhanced Damage");
        assert_eq!(parsed.label.key.as_str(), "enhanced_damage");
    }

    #[test]
    fn test_generic_with_subtype_and_extra() {
        let parsed = parse_stat_line("Stat: Resist | Fire | 30 | when equipped");
        assert_eq!(
            parsed.stat,
            Stat::Generic {
                kind: "Resist".into(),
                subtype: Some("Fire".into()),
                value: Some(RangeValue::fixed(30)),
                extra: vec!["when equipped".into()],
            }
        );
        assert_eq!(parsed.label.label, "Resist (Fire)");
        assert_eq!(parsed.label.value, "30 when equipped");
    }

    #[test]
    fn test_degenerate_lines_still_parse() {
        for line in ["", "Stat:", "Stat: |||", "Stat: Aura", "Stat: ChanceToCast | x"] {
            let parsed = parse_stat_line(line);
            // always a stat and a label
            let _ = parsed.label.key.as_str();
        }
        let parsed = parse_stat_line("Stat: CannotBeFrozen");
        assert_eq!(
            parsed.stat,
            Stat::Generic {
                kind: "CannotBeFrozen".into(),
                subtype: None,
                value: None,
                extra: vec![],
            }
        );
    }

    #[test]
    fn test_leading_token_is_case_insensitive() {
        let parsed = parse_stat_line("Stat: aura | Might | 6");
        assert!(matches!(parsed.stat, Stat::Aura { .. }));
    }
}
