//! Range values.
//!
//! Rune word data expresses most numbers either as a bare integer (`7`) or
//! as an inclusive roll range (`10-20`). Both parse into a [`RangeValue`].
//! Parsing is total: malformed text degrades to zero instead of failing.

use crate::scenario::Scenario;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// A parsed `min-max` value with its floored midpoint.
///
/// `min <= max` is not enforced; inverted source data is carried as given.
///
/// # Examples
///
/// ```rust
/// use cainstat::range::{parse_range, RangeValue};
///
/// assert_eq!(parse_range("10-20"), RangeValue::new(10, 20));
/// assert_eq!(parse_range("10-20").avg, 15);
/// assert_eq!(parse_range("7"), RangeValue::fixed(7));
/// assert_eq!(parse_range(""), RangeValue::ZERO);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeValue {
    pub min: i32,
    pub max: i32,
    pub avg: i32,
}

impl RangeValue {
    pub const ZERO: RangeValue = RangeValue {
        min: 0,
        max: 0,
        avg: 0,
    };

    /// Build a range, recomputing the midpoint.
    pub fn new(min: i32, max: i32) -> Self {
        Self {
            min,
            max,
            avg: midpoint(min, max),
        }
    }

    /// A range whose bounds are both `value`.
    pub fn fixed(value: i32) -> Self {
        Self::new(value, value)
    }

    pub fn is_zero(&self) -> bool {
        self.min == 0 && self.max == 0
    }

    /// Select the bound that matches a roll scenario.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cainstat::range::RangeValue;
    /// use cainstat::Scenario;
    ///
    /// let ed = RangeValue::new(200, 241);
    /// assert_eq!(ed.pick(Scenario::Worst), 200);
    /// assert_eq!(ed.pick(Scenario::Avg), 220);
    /// assert_eq!(ed.pick(Scenario::Best), 241);
    /// ```
    pub fn pick(&self, scenario: Scenario) -> i32 {
        match scenario {
            Scenario::Worst => self.min,
            Scenario::Avg => self.avg,
            Scenario::Best => self.max,
        }
    }

    /// Raise the upper bound by `amount`.
    pub fn widen_max(self, amount: i32) -> Self {
        Self::new(self.min, self.max + amount)
    }
}

impl Add for RangeValue {
    type Output = RangeValue;

    fn add(self, rhs: RangeValue) -> RangeValue {
        RangeValue::new(self.min + rhs.min, self.max + rhs.max)
    }
}

impl fmt::Display for RangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}

fn midpoint(min: i32, max: i32) -> i32 {
    (i64::from(min) + i64::from(max)).div_euclid(2) as i32
}

fn parse_side(text: &str) -> i32 {
    let text = text.trim();
    let text = text.strip_suffix('%').unwrap_or(text).trim();
    let text = text.strip_prefix('+').unwrap_or(text);
    text.parse().unwrap_or(0)
}

/// Parse a scalar or `min-max` token.
///
/// The separator is searched after the first character so a leading minus
/// sign stays attached to its number. A leading `+` and trailing `%` are
/// ignored. Any side that is not an integer reads as `0`.
pub fn parse_range(token: &str) -> RangeValue {
    let token = token.trim();
    let separator = token
        .char_indices()
        .skip(1)
        .find(|&(_, c)| c == '-')
        .map(|(i, _)| i);

    match separator {
        Some(i) => RangeValue::new(parse_side(&token[..i]), parse_side(&token[i + 1..])),
        None => RangeValue::fixed(parse_side(token)),
    }
}
