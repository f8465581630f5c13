//! Field lookup across heterogeneous member shapes.
//!
//! `pluck`, `get_by`, `filter_by`, `sort_by_field` and index-field key derivation all read a
//! named field out of a member without knowing whether it is a raw JSON object or a
//! [`Record`](crate::record::Record). [`FieldAccess`] is that single capability: objects and
//! records answer the lookup, scalars and arrays refuse it with
//! [`PackmanError::FieldAccess`].

use serde_json::Value;

use crate::error::{PackmanError, PackmanResult};

/// Capability of answering "what is the value of field `name`?".
pub trait FieldAccess {
    /// Short description of this value's shape, used in error messages.
    fn shape(&self) -> &'static str;

    /// Looks up a field.
    ///
    /// Returns `Ok(None)` when the value supports field lookup but has no such field.
    ///
    /// # Errors
    ///
    /// Returns [`PackmanError::FieldAccess`] if this value does not support field lookup at all.
    fn field(&self, name: &str) -> PackmanResult<Option<&Value>>;

    /// Looks up a field that must be present.
    ///
    /// # Errors
    ///
    /// Returns [`PackmanError::FieldAccess`] if this value does not support field lookup or
    /// lacks the field.
    fn require_field(&self, name: &str) -> PackmanResult<&Value> {
        self.field(name)?.ok_or_else(|| {
            PackmanError::FieldAccess(name.to_string(), format!("{} without that field", self.shape()))
        })
    }
}

impl FieldAccess for Value {
    fn shape(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    fn field(&self, name: &str) -> PackmanResult<Option<&Value>> {
        match self {
            Value::Object(map) => Ok(map.get(name)),
            other => Err(PackmanError::FieldAccess(name.to_string(), other.shape().to_string())),
        }
    }
}
