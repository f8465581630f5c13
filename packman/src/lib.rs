//! Main packman crate providing ordered, flexibly-keyed collections of models.
//!
//! This crate is the primary entry point for users of packman. It re-exports the core types
//! and functionality from `packman-core`.
//!
//! # Features
//!
//! - **Flexible keys** - Address members by position, by explicit key, or by an index field read from the member
//! - **Heterogeneous members** - Raw scalars, raw JSON objects and [`Record`](record::Record)s side by side
//! - **Key-preserving views** - `filter`, `filter_by` and `slice` keep the original keys and order
//! - **Projection** - Serialize members to JSON, optionally restricted to selected fields
//!
//! # Quick Start
//!
//! ```ignore
//! use packman::prelude::*;
//!
//! fn main() -> PackmanResult<()> {
//!     let users = Collection::builder()
//!         .index("id")
//!         .members(Members::sequence([
//!             record! { "id" => "001", "name" => "hoge", "sex" => "man", "age" => "30" },
//!             record! { "id" => "002", "name" => "fuge", "sex" => "woman", "age" => "25" },
//!             record! { "id" => "003", "name" => "piyo", "sex" => "woman", "age" => "20" },
//!         ]))
//!         .build()?;
//!
//!     // Keys come from the index field
//!     let fuge = users.get("002");
//!
//!     // Derived views keep their keys
//!     let women = users.filter_by("sex", "=", "woman")?;
//!     println!("{:?}", women.keys().collect::<Vec<_>>());
//!
//!     // Project only some fields
//!     println!("{}", users.to_json(&ToArrayOptions::only(["id", "name"]))?);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Loading from options
//!
//! [`CollectionOptions`](options::CollectionOptions) deserializes from the options map a
//! fixture file holds, so external loaders can decode and hand it over as-is:
//!
//! ```ignore
//! use packman::prelude::*;
//!
//! let options: CollectionOptions = serde_json::from_str(r#"{"index": "id", "members": [{"id": "001"}]}"#)?;
//! let collection = Collection::from_options(options)?;
//! ```

pub mod prelude;

pub use packman_core::{collection, compare, error, field, key, member, options, query, record};

// Re-export JSON types for convenience
pub use serde_json;
