//! Records: ordered named attributes with uniform access.
//!
//! A [`Record`] wraps an insertion-ordered attribute map. There is exactly one access surface,
//! [`has`](Record::has), [`get`](Record::get), [`set`](Record::set) and
//! [`delete`](Record::delete), and two front-ends that call into it:
//!
//! - **bracket access** through `Index<&str>` / `IndexMut<&str>` (`record["name"]`)
//! - **property access** through [`Attribute`] / [`AttributeMut`] handles
//!   (`record.attr("name")`, `record.attr_mut("name").set("piyo")`)
//!
//! Reading an absent attribute yields `null` (bracket) or `None` (property), never an error.
//!
//! # Example
//!
//! ```ignore
//! use packman::{record, record::Record};
//!
//! let mut user = record! { "id" => 1, "name" => "hoge", "age" => 20 };
//!
//! user["name"] = "piyo".into();
//! assert_eq!(user.attr("name").value(), Some(&json!("piyo")));
//!
//! user.attr_mut("name").unset();
//! assert!(!user.has("name"));
//! assert!(user["name"].is_null());
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, map::Values};
use std::ops::{Index, IndexMut};

use crate::{
    error::{PackmanError, PackmanResult},
    field::FieldAccess,
    options::ToArrayOptions,
};

static NULL: Value = Value::Null;

/// A single entity with ordered, named attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    attributes: Map<String, Value>,
}

impl Record {
    /// Creates a record with no attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a record over an existing attribute map, keeping its order.
    pub fn from_attributes(attributes: Map<String, Value>) -> Self {
        Self { attributes }
    }

    /// Returns the underlying attribute map.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Consumes the record, returning its attribute map.
    pub fn into_attributes(self) -> Map<String, Value> {
        self.attributes
    }

    /// Returns `true` if the attribute is present (even when its value is `null`).
    pub fn has(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Returns the attribute value, or `None` if it is absent.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Returns a mutable reference to the attribute value, or `None` if it is absent.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.attributes.get_mut(name)
    }

    /// Sets an attribute, returning its previous value.
    ///
    /// An existing attribute keeps its position; a new one is appended.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.attributes.insert(name.into(), value.into())
    }

    /// Removes an attribute, returning its value. Remaining attributes keep their order.
    pub fn delete(&mut self, name: &str) -> Option<Value> {
        self.attributes.shift_remove(name)
    }

    /// Property-style read handle for `name`.
    pub fn attr<'r>(&'r self, name: &'r str) -> Attribute<'r> {
        Attribute { record: self, name }
    }

    /// Property-style read/write handle for `name`.
    pub fn attr_mut(&mut self, name: impl Into<String>) -> AttributeMut<'_> {
        AttributeMut { record: self, name: name.into() }
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if the record has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Iterates over attribute values in attribute order.
    pub fn values(&self) -> Values<'_> {
        self.attributes.values()
    }

    /// Projects the record to an attribute map.
    ///
    /// With `only` set, the result holds exactly those fields in the given order, absent
    /// attributes projected as `null`. Otherwise the full attribute map is returned.
    pub fn to_array(&self, options: &ToArrayOptions) -> Map<String, Value> {
        match &options.only {
            Some(fields) => fields
                .iter()
                .map(|field| (field.clone(), self[field.as_str()].clone()))
                .collect(),
            None => self.attributes.clone(),
        }
    }

    /// Serializes [`to_array`](Record::to_array) as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`PackmanError::Serialization`] if encoding fails.
    pub fn to_json(&self, options: &ToArrayOptions) -> PackmanResult<String> {
        Ok(serde_json::to_string(&self.to_array(options))?)
    }
}

impl FieldAccess for Record {
    fn shape(&self) -> &'static str {
        "record"
    }

    fn field(&self, name: &str) -> PackmanResult<Option<&Value>> {
        Ok(self.get(name))
    }
}

impl Index<&str> for Record {
    type Output = Value;

    fn index(&self, name: &str) -> &Value {
        self.get(name).unwrap_or(&NULL)
    }
}

impl IndexMut<&str> for Record {
    /// Returns the attribute slot, inserting `null` at the end if it is absent.
    fn index_mut(&mut self, name: &str) -> &mut Value {
        self.attributes.entry(name).or_insert(Value::Null)
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a Value;
    type IntoIter = Values<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.values()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(attributes: Map<String, Value>) -> Self {
        Self::from_attributes(attributes)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record.attributes)
    }
}

impl TryFrom<Value> for Record {
    type Error = PackmanError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(attributes) => Ok(Self::from_attributes(attributes)),
            other => Err(PackmanError::Serialization(format!(
                "a record needs an object of attributes, got {}",
                other.shape()
            ))),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.set(name, value);
        }
        record
    }
}

/// Read-only property handle returned by [`Record::attr`].
#[derive(Debug, Clone, Copy)]
pub struct Attribute<'r> {
    record: &'r Record,
    name: &'r str,
}

impl<'r> Attribute<'r> {
    /// The attribute name.
    pub fn name(&self) -> &str {
        self.name
    }

    /// Returns `true` if the attribute is present.
    pub fn is_set(&self) -> bool {
        self.record.has(self.name)
    }

    /// The attribute value, or `None` if absent.
    pub fn value(&self) -> Option<&'r Value> {
        self.record.get(self.name)
    }
}

/// Read/write property handle returned by [`Record::attr_mut`].
#[derive(Debug)]
pub struct AttributeMut<'r> {
    record: &'r mut Record,
    name: String,
}

impl AttributeMut<'_> {
    /// The attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if the attribute is present.
    pub fn is_set(&self) -> bool {
        self.record.has(&self.name)
    }

    /// The attribute value, or `None` if absent.
    pub fn value(&self) -> Option<&Value> {
        self.record.get(&self.name)
    }

    /// Sets the attribute, returning its previous value.
    pub fn set(self, value: impl Into<Value>) -> Option<Value> {
        self.record.set(self.name, value)
    }

    /// Removes the attribute, returning its value.
    pub fn unset(self) -> Option<Value> {
        self.record.delete(&self.name)
    }
}

/// Builds a [`Record`] from `name => value` pairs, keeping the written order.
///
/// ```ignore
/// let user = record! { "id" => "001", "name" => "hoge", "age" => 30 };
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::record::Record::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut record = $crate::record::Record::new();
        $(
            record.set($name, $value);
        )+
        record
    }};
}
