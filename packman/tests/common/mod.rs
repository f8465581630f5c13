//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use packman::prelude::*;
use serde_json::Value;
use std::path::PathBuf;

/// Loads `tests/fixtures/<name>.json`.
pub fn load_fixture(name: &str) -> Value {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{name}.json"));
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {err}", path.display()));

    serde_json::from_str(&text).expect("fixture is valid JSON")
}

/// The three user maps from the `models` fixture.
pub fn array_models() -> Vec<Value> {
    match load_fixture("models")["array_of_hash"].clone() {
        Value::Array(models) => models,
        other => panic!("expected an array of maps, got {other}"),
    }
}

/// The same users wrapped in records.
pub fn object_models() -> Vec<Record> {
    array_models()
        .into_iter()
        .map(|model| Record::try_from(model).expect("fixture models are objects"))
        .collect()
}

pub fn text_models() -> Vec<&'static str> {
    vec!["hoge", "fuge", "piyo"]
}

/// Builds a collection from an optional index field and a member list.
pub fn collection_of<M: Into<Member>>(index: Option<&str>, members: Vec<M>) -> Collection {
    Collection::from_options(CollectionOptions {
        index: index.map(str::to_string),
        members: Some(Members::sequence(members)),
    })
    .expect("fixture members can be keyed")
}
