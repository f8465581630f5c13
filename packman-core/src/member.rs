//! Collection members.
//!
//! A member is either a raw JSON value (a scalar, array or object) or a [`Record`]. Both
//! shapes go through the same [`FieldAccess`] capability and the same projection, so the
//! collection never needs to know which one it is holding.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::ops::Index;

use crate::{
    error::PackmanResult,
    field::FieldAccess,
    options::ToArrayOptions,
    record::Record,
};

/// One element held by a collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Member {
    /// Raw scalar, array or object.
    Value(Value),
    /// Record with named attributes.
    Record(Record),
}

impl Member {
    /// Returns the raw value, if this member is not a record.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Member::Value(value) => Some(value),
            Member::Record(_) => None,
        }
    }

    /// Returns the record, if this member is one.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Member::Value(_) => None,
            Member::Record(record) => Some(record),
        }
    }

    /// Returns the record mutably, if this member is one.
    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Member::Value(_) => None,
            Member::Record(record) => Some(record),
        }
    }

    /// Returns `true` if this member is a record.
    pub fn is_record(&self) -> bool {
        matches!(self, Member::Record(_))
    }

    /// Projects the member for serialization.
    ///
    /// Records are projected through [`Record::to_array`]; raw values are returned as-is.
    pub fn to_array(&self, options: &ToArrayOptions) -> Value {
        match self {
            Member::Value(value) => value.clone(),
            Member::Record(record) => Value::Object(record.to_array(options)),
        }
    }

    /// Converts the member into a plain JSON value.
    pub fn into_value(self) -> Value {
        match self {
            Member::Value(value) => value,
            Member::Record(record) => record.into(),
        }
    }
}

impl FieldAccess for Member {
    fn shape(&self) -> &'static str {
        match self {
            Member::Value(value) => value.shape(),
            Member::Record(record) => record.shape(),
        }
    }

    fn field(&self, name: &str) -> PackmanResult<Option<&Value>> {
        match self {
            Member::Value(value) => value.field(name),
            Member::Record(record) => record.field(name),
        }
    }
}

impl Index<&str> for Member {
    type Output = Value;

    /// Reads a field, yielding `null` when it is absent or the member has no fields.
    fn index(&self, name: &str) -> &Value {
        match self {
            Member::Value(value) => &value[name],
            Member::Record(record) => &record[name],
        }
    }
}

impl<'de> Deserialize<'de> for Member {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Member::Value)
    }
}

impl PartialEq<Value> for Member {
    fn eq(&self, other: &Value) -> bool {
        match self {
            Member::Value(value) => value == other,
            Member::Record(_) => false,
        }
    }
}

impl From<Value> for Member {
    fn from(value: Value) -> Self {
        Member::Value(value)
    }
}

impl From<Record> for Member {
    fn from(record: Record) -> Self {
        Member::Record(record)
    }
}

impl From<Map<String, Value>> for Member {
    fn from(map: Map<String, Value>) -> Self {
        Member::Value(Value::Object(map))
    }
}

impl From<Member> for Value {
    fn from(member: Member) -> Self {
        member.into_value()
    }
}

macro_rules! member_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Member {
                fn from(value: $ty) -> Self {
                    Member::Value(Value::from(value))
                }
            }
        )*
    };
}

member_from_scalar!(&str, String, bool, i32, i64, u32, u64, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PackmanError;
    use serde_json::json;

    #[test]
    fn test_field_access_dispatches_per_shape() {
        let raw = Member::from(json!({"id": "001"}));
        let record = Member::from(crate::record! { "id" => "002" });
        let scalar = Member::from("hoge");

        assert_eq!(raw.require_field("id").unwrap(), &json!("001"));
        assert_eq!(record.require_field("id").unwrap(), &json!("002"));
        assert!(matches!(scalar.field("id"), Err(PackmanError::FieldAccess(..))));
    }

    #[test]
    fn test_index_reads_fields_of_both_shapes() {
        let raw = Member::from(json!({"id": "001"}));
        let record = Member::from(crate::record! { "id" => "002" });

        assert_eq!(raw["id"], json!("001"));
        assert_eq!(record["id"], json!("002"));
        assert!(raw["missing"].is_null());
        assert!(Member::from(3)["id"].is_null());
    }

    #[test]
    fn test_to_array_projects_records_only() {
        let only = ToArrayOptions::only(["id"]);
        let raw = Member::from(json!({"id": "001", "name": "hoge"}));
        let record = Member::from(crate::record! { "id" => "002", "name" => "fuge" });

        assert_eq!(raw.to_array(&only), json!({"id": "001", "name": "hoge"}));
        assert_eq!(record.to_array(&only), json!({"id": "002"}));
    }

    #[test]
    fn test_serializes_untagged() {
        let members = vec![Member::from("hoge"), Member::from(crate::record! { "id" => 1 })];
        assert_eq!(serde_json::to_string(&members).unwrap(), r#"["hoge",{"id":1}]"#);
    }

    #[test]
    fn test_deserializes_as_raw_value() {
        let member: Member = serde_json::from_str(r#"{"id":1}"#).unwrap();
        assert_eq!(member, json!({"id": 1}));
        assert!(!member.is_record());
    }
}
