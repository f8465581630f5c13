//! Error types and result types for collection and record operations.
//!
//! Plain lookups (`get`, bracket access, `has`) never fail; they answer with an absent
//! value instead. Only operations that *require* a field or an operator to be meaningful
//! return a [`PackmanError`]. Use [`PackmanResult<T>`] as the return type for fallible operations.

use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when operating on a collection or record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PackmanError {
    /// A field lookup was requested on a member that cannot answer it.
    /// The first argument is the field name, the second describes the member.
    #[error("Cannot access field {0} on {1}")]
    FieldAccess(String, String),
    /// The comparison operator passed to `filter_by` is not one of `=`, `<`, `>`, `<=`, `>=`.
    #[error("Invalid operator: {0}")]
    InvalidOperator(String),
    /// A value read from the index field cannot be used as a collection key.
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    /// Serialization/deserialization error when converting to or from JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A specialized `Result` type for collection and record operations.
pub type PackmanResult<T> = Result<T, PackmanError>;

impl From<SerdeJsonError> for PackmanError {
    fn from(err: SerdeJsonError) -> Self {
        PackmanError::Serialization(err.to_string())
    }
}
