//! Collection keys.
//!
//! A member of a [`Collection`](crate::collection::Collection) is addressed either by a
//! non-negative integer position or by a string name. Keys are typed: `Key::Name("5")`
//! and `Key::Index(5)` are distinct keys.

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

use crate::error::{PackmanError, PackmanResult};

/// The key a member is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Positional (or explicit integer) key.
    Index(u64),
    /// Named key, either supplied by the caller or read from the index field.
    Name(String),
}

impl Key {
    /// Derives a key from a value read out of a member's index field.
    ///
    /// Strings become [`Key::Name`], non-negative integers become [`Key::Index`].
    ///
    /// # Errors
    ///
    /// Returns [`PackmanError::InvalidKey`] for any other value shape.
    pub fn from_value(value: &Value) -> PackmanResult<Self> {
        match value {
            Value::String(name) => Ok(Key::Name(name.clone())),
            Value::Number(number) => number
                .as_u64()
                .map(Key::Index)
                .ok_or_else(|| PackmanError::InvalidKey(number.to_string())),
            other => Err(PackmanError::InvalidKey(other.to_string())),
        }
    }

    /// Returns the integer position if this is an [`Key::Index`].
    pub fn as_index(&self) -> Option<u64> {
        match self {
            Key::Index(index) => Some(*index),
            Key::Name(_) => None,
        }
    }

    /// Returns the name if this is a [`Key::Name`].
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Index(_) => None,
            Key::Name(name) => Some(name),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "{index}"),
            Key::Name(name) => f.write_str(name),
        }
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Key::Index(index) => serializer.serialize_u64(*index),
            Key::Name(name) => serializer.serialize_str(name),
        }
    }
}

impl From<u64> for Key {
    fn from(index: u64) -> Self {
        Key::Index(index)
    }
}

impl From<u32> for Key {
    fn from(index: u32) -> Self {
        Key::Index(index.into())
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index as u64)
    }
}

impl TryFrom<i64> for Key {
    type Error = PackmanError;

    /// Accepts non-negative integers; negative ones are not valid positions.
    fn try_from(index: i64) -> Result<Self, Self::Error> {
        u64::try_from(index)
            .map(Key::Index)
            .map_err(|_| PackmanError::InvalidKey(index.to_string()))
    }
}

impl TryFrom<i32> for Key {
    type Error = PackmanError;

    fn try_from(index: i32) -> Result<Self, Self::Error> {
        Key::try_from(i64::from(index))
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl From<&String> for Key {
    fn from(name: &String) -> Self {
        Key::Name(name.clone())
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_accepts_strings_and_unsigned_integers() {
        assert_eq!(Key::from_value(&json!("001")).unwrap(), Key::Name("001".into()));
        assert_eq!(Key::from_value(&json!(7)).unwrap(), Key::Index(7));
    }

    #[test]
    fn test_from_value_rejects_other_shapes() {
        for value in [json!(-1), json!(1.5), json!(null), json!(true), json!([1]), json!({"a": 1})] {
            assert!(matches!(Key::from_value(&value), Err(PackmanError::InvalidKey(_))));
        }
    }

    #[test]
    fn test_named_and_positional_keys_are_distinct() {
        assert_ne!(Key::from("5"), Key::from(5u64));
        assert_eq!(Key::from("5").to_string(), Key::from(5u64).to_string());
    }

    #[test]
    fn test_signed_integers_convert_when_non_negative() {
        assert_eq!(Key::try_from(0i32).unwrap(), Key::Index(0));
        assert_eq!(Key::try_from(42i64).unwrap(), Key::Index(42));
        assert_eq!(Key::try_from(-1i32), Err(PackmanError::InvalidKey("-1".to_string())));
        assert!(matches!(Key::try_from(i64::MIN), Err(PackmanError::InvalidKey(_))));
    }

    #[test]
    fn test_serializes_as_plain_json() {
        assert_eq!(serde_json::to_string(&Key::Index(3)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&Key::from("k1")).unwrap(), "\"k1\"");
    }
}
