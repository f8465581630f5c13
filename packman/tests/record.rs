mod common;

use common::{array_models, object_models};
use packman::prelude::*;
use serde_json::{Value, json};

fn user() -> Record {
    record! { "id" => 1, "name" => "hoge", "age" => 20 }
}

#[test]
fn test_iterates_attribute_values_in_order() {
    let record = user();
    let values = (&record).into_iter().cloned().collect::<Vec<_>>();

    assert_eq!(values, vec![json!(1), json!("hoge"), json!(20)]);
}

// ---
// bracket access
// ---

#[test]
fn test_bracket_exists() {
    assert!(user().has("id"));
    assert!(!user().has("email"));
}

#[test]
fn test_bracket_get() {
    assert_eq!(user()["id"], json!(1));
    assert!(user()["email"].is_null());
}

#[test]
fn test_bracket_set() {
    let mut record = user();
    record["name"] = json!("piyo");

    assert_eq!(record["name"], json!("piyo"));
    assert_eq!(record.len(), 3);
}

#[test]
fn test_bracket_set_appends_new_attribute() {
    let mut record = user();
    record["email"] = json!("hoge@example.com");

    assert_eq!(
        record.attributes().keys().collect::<Vec<_>>(),
        vec!["id", "name", "age", "email"]
    );
}

#[test]
fn test_bracket_unset() {
    let mut record = user();
    record.delete("name");

    assert!(!record.has("name"));
    assert!(record["name"].is_null());
}

// ---
// property access
// ---

#[test]
fn test_property_isset() {
    let record = user();
    assert!(record.attr("id").is_set());
    assert!(!record.attr("email").is_set());
}

#[test]
fn test_property_get() {
    let record = user();
    assert_eq!(record.attr("id").value(), Some(&json!(1)));
    assert_eq!(record.attr("email").value(), None);
}

#[test]
fn test_property_set() {
    let mut record = user();
    let previous = record.attr_mut("name").set("piyo");

    assert_eq!(previous, Some(json!("hoge")));
    assert_eq!(record.attr("name").value(), Some(&json!("piyo")));
}

#[test]
fn test_property_unset() {
    let mut record = user();
    record.attr_mut("name").unset();

    assert!(!record.attr("name").is_set());
    assert!(record.attr("name").value().is_none());
}

#[test]
fn test_both_front_ends_share_storage() {
    let mut record = user();
    record.attr_mut("name").set("piyo");
    assert_eq!(record["name"], json!("piyo"));

    record["age"] = json!(21);
    assert_eq!(record.attr("age").value(), Some(&json!(21)));
}

#[test]
fn test_null_attribute_is_present() {
    let record = record! { "deleted_at" => Value::Null };

    assert!(record.has("deleted_at"));
    assert!(record.attr("deleted_at").is_set());
    assert!(record["deleted_at"].is_null());
}

// ---
// projection
// ---

#[test]
fn test_to_array_with_only_projects_absent_fields_as_null() {
    let record = user();
    let projected = record.to_array(&ToArrayOptions::only(["name", "email"]));

    assert_eq!(Value::Object(projected), json!({"name": "hoge", "email": null}));
}

#[test]
fn test_to_json_keeps_attribute_order() {
    assert_eq!(
        user().to_json(&ToArrayOptions::new()).unwrap(),
        r#"{"id":1,"name":"hoge","age":20}"#
    );
    assert_eq!(
        user().to_json(&ToArrayOptions::only(["age", "id"])).unwrap(),
        r#"{"age":20,"id":1}"#
    );
}

#[test]
fn test_records_from_fixture_match_raw_models() {
    for (record, raw) in object_models().into_iter().zip(array_models()) {
        assert_eq!(Value::from(record), raw);
    }
}

#[test]
fn test_record_from_non_object_fails() {
    assert!(matches!(
        Record::try_from(json!(["id", 1])),
        Err(PackmanError::Serialization(_))
    ));
}

#[test]
fn test_field_access_on_record() {
    let record = user();

    assert_eq!(record.require_field("name").unwrap(), &json!("hoge"));
    assert!(matches!(
        record.require_field("email"),
        Err(PackmanError::FieldAccess(field, _)) if field == "email"
    ));
}
