//! Convenient re-exports of commonly used types from packman.
//!
//! Import this prelude module to quickly access the most frequently used types
//! and traits without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use packman::prelude::*;
//! ```

pub use packman_core::{
    collection::{Collection, CollectionBuilder},
    error::{PackmanError, PackmanResult},
    field::FieldAccess,
    key::Key,
    member::Member,
    options::{CollectionOptions, Members, ToArrayOptions},
    query::Operator,
    record,
    record::{Attribute, AttributeMut, Record},
};
