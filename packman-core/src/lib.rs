//! An ordered, flexibly-keyed in-memory collection of JSON models and records.
//!
//! This crate is the core of the packman project and provides:
//!
//! - **Collections** ([`collection`]) - Ordered members addressed by position, explicit key or index field
//! - **Records** ([`record`]) - Ordered named attributes with bracket and property access
//! - **Members** ([`member`]) - Raw JSON values and records held side by side
//! - **Field access** ([`field`]) - One lookup capability across every member shape
//! - **Keys** ([`key`]) - Positional and named collection keys
//! - **Filtering** ([`query`], [`compare`]) - Comparison operators and mixed string/number comparison
//! - **Options** ([`options`]) - Constructor and projection options
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! # Example
//!
//! ```ignore
//! use packman_core::{collection::Collection, record, options::ToArrayOptions};
//!
//! let mut users = Collection::with_index("id");
//! users.add(record! { "id" => "001", "name" => "hoge" })?;
//! users.add(record! { "id" => "002", "name" => "fuge" })?;
//!
//! assert_eq!(
//!     users.to_json(&ToArrayOptions::only(["name"]))?,
//!     r#"[{"name":"hoge"},{"name":"fuge"}]"#
//! );
//! ```

#[allow(unused_extern_crates)]
extern crate self as packman_core;

pub mod collection;
pub mod compare;
pub mod error;
pub mod field;
pub mod key;
pub mod member;
pub mod options;
pub mod query;
pub mod record;
