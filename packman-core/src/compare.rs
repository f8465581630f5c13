//! Value comparison used by `get_by`, `filter_by` and `sort_by_field`.
//!
//! Member values frequently hold numbers as strings (`"25"`), and callers compare them with
//! plain numbers (`age > 25`). The rules are:
//!
//! - two numbers, or a number and a numeric-looking string, or two numeric-looking strings
//!   compare numerically (`"30" > 25`, `"002" == "2"`)
//! - integers compare exactly at any magnitude; floating point is used only when one side is
//!   fractional or written with an exponent
//! - two strings where at least one is not numeric compare lexicographically
//! - booleans compare as booleans, `null` equals `null`
//! - arrays and objects are equal only when structurally equal and are otherwise unordered
//! - any other pairing is unequal and unordered, so every ordering operator answers `false`

use serde_json::{Number, Value};
use std::cmp::Ordering;

/// A numeric reading of a value: exact when integral, floating point otherwise.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Numeric {
    Integer(i128),
    Float(f64),
}

impl Numeric {
    fn from_number(number: &Number) -> Option<Self> {
        if let Some(integer) = number.as_i64() {
            Some(Numeric::Integer(integer.into()))
        } else if let Some(integer) = number.as_u64() {
            Some(Numeric::Integer(integer.into()))
        } else {
            number.as_f64().map(Numeric::Float)
        }
    }

    /// Orders two readings. Mixed pairs compare exactly when the float is integral.
    fn compare(&self, other: &Self) -> Ordering {
        match (*self, *other) {
            (Numeric::Integer(a), Numeric::Integer(b)) => a.cmp(&b),
            (Numeric::Float(a), Numeric::Float(b)) => a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b)),
            (Numeric::Integer(a), Numeric::Float(b)) => integer_cmp_float(a, b),
            (Numeric::Float(a), Numeric::Integer(b)) => integer_cmp_float(b, a).reverse(),
        }
    }
}

fn integer_cmp_float(integer: i128, float: f64) -> Ordering {
    // i128::MAX as f64 rounds up to 2^127, so the upper bound is exclusive
    if float.fract() == 0.0 && float >= i128::MIN as f64 && float < i128::MAX as f64 {
        integer.cmp(&(float as i128))
    } else {
        (integer as f64)
            .partial_cmp(&float)
            .unwrap_or_else(|| (integer as f64).total_cmp(&float))
    }
}

/// Borrowed, comparable view of a JSON value.
#[derive(Debug)]
pub(crate) enum Comparable<'a> {
    Null,
    Bool(bool),
    Number(Numeric),
    String(&'a str),
    /// Arrays and objects
    Composite(&'a Value),
}

impl<'a> From<&'a Value> for Comparable<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => Comparable::Null,
            Value::Bool(value) => Comparable::Bool(*value),
            Value::Number(number) => Numeric::from_number(number)
                .map(Comparable::Number)
                .unwrap_or(Comparable::Composite(value)),
            Value::String(value) => Comparable::String(value),
            Value::Array(_) | Value::Object(_) => Comparable::Composite(value),
        }
    }
}

impl Comparable<'_> {
    /// Numeric reading of this value, if it has one.
    fn numeric(&self) -> Option<Numeric> {
        match self {
            Comparable::Number(number) => Some(*number),
            Comparable::String(text) => parse_numeric(text),
            _ => None,
        }
    }
}

impl PartialEq for Comparable<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Comparable<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => Some(Ordering::Equal),
            (Comparable::Bool(a), Comparable::Bool(b)) => a.partial_cmp(b),
            (Comparable::Composite(a), Comparable::Composite(b)) => (a == b).then_some(Ordering::Equal),
            (Comparable::String(a), Comparable::String(b)) => match (self.numeric(), other.numeric()) {
                (Some(a), Some(b)) => Some(a.compare(&b)),
                _ => a.partial_cmp(b),
            },
            (Comparable::Number(_) | Comparable::String(_), Comparable::Number(_) | Comparable::String(_)) => {
                Some(self.numeric()?.compare(&other.numeric()?))
            }
            _ => None,
        }
    }
}

/// Owned sort key with a total order, used when sorting members by a field.
///
/// Within one kind the ordering matches [`compare_values`]; across kinds the order is
/// `null < booleans < numbers (including numeric strings) < strings < arrays/objects`.
#[derive(Debug, Clone)]
pub(crate) enum SortKey {
    Null,
    Bool(bool),
    Number(Numeric),
    Text(String),
    Composite(String),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Null => 0,
            SortKey::Bool(_) => 1,
            SortKey::Number(_) => 2,
            SortKey::Text(_) => 3,
            SortKey::Composite(_) => 4,
        }
    }
}

impl From<&Value> for SortKey {
    fn from(value: &Value) -> Self {
        match Comparable::from(value) {
            Comparable::Null => SortKey::Null,
            Comparable::Bool(value) => SortKey::Bool(value),
            Comparable::Number(number) => SortKey::Number(number),
            Comparable::String(text) => match parse_numeric(text) {
                Some(number) => SortKey::Number(number),
                None => SortKey::Text(text.to_string()),
            },
            Comparable::Composite(value) => SortKey::Composite(value.to_string()),
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.compare(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Composite(a), SortKey::Composite(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

/// Parses a decimal literal such as `"25"`, `"-3.5"` or `"1e3"`.
///
/// Plain integer literals are read exactly; anything with a fraction or exponent, or an
/// integer too wide for `i128`, is read as `f64`. Words that `f64::from_str` would otherwise
/// accept (`"inf"`, `"NaN"`) are not numeric.
fn parse_numeric(text: &str) -> Option<Numeric> {
    let text = text.trim();

    if text.is_empty()
        || !text
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
        || !text.bytes().any(|b| b.is_ascii_digit())
    {
        return None;
    }

    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(integer) = text.parse::<i128>() {
            return Some(Numeric::Integer(integer));
        }
    }

    text.parse::<f64>().ok().map(Numeric::Float)
}

/// Returns `true` when the two values are equal under the comparison rules.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    Comparable::from(left) == Comparable::from(right)
}

/// Orders two values under the comparison rules, or `None` if they are not comparable.
pub fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    Comparable::from(left).partial_cmp(&Comparable::from(right))
}
