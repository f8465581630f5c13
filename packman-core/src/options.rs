//! Constructor and projection options.
//!
//! [`CollectionOptions`] is the options map a collection is built from. It deserializes from
//! the same shape fixture files use (`{"index": "id", "members": [...]}`, with `models` and
//! `indexField` accepted as aliases), so loaders only ever have to hand over decoded data.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::member::Member;

/// Initial members of a collection: either a plain sequence or a pre-keyed map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Members {
    /// Members keyed by their position (`0..n`).
    Sequence(Vec<Member>),
    /// Members keyed by name, in map order.
    Map(IndexMap<String, Member>),
}

impl Members {
    /// Builds a positional member list.
    pub fn sequence<I, M>(members: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Member>,
    {
        Members::Sequence(members.into_iter().map(Into::into).collect())
    }

    /// Builds a keyed member map, preserving the iteration order of `members`.
    pub fn map<I, K, M>(members: I) -> Self
    where
        I: IntoIterator<Item = (K, M)>,
        K: Into<String>,
        M: Into<Member>,
    {
        Members::Map(
            members
                .into_iter()
                .map(|(key, member)| (key.into(), member.into()))
                .collect(),
        )
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        match self {
            Members::Sequence(members) => members.len(),
            Members::Map(members) => members.len(),
        }
    }

    /// Returns `true` if there are no members.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Options for constructing a [`Collection`](crate::collection::Collection).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionOptions {
    /// Field read from every member to derive its key.
    #[serde(default, alias = "indexField", skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    /// Members loaded through `add` at construction time.
    #[serde(default, alias = "models", skip_serializing_if = "Option::is_none")]
    pub members: Option<Members>,
}

impl CollectionOptions {
    /// Creates empty options: no index field, no members.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Options for projecting a record (or every record in a collection) to a map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToArrayOptions {
    /// When set, only these fields are emitted, in this order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only: Option<Vec<String>>,
}

impl ToArrayOptions {
    /// Creates options that project every attribute.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that project exactly `fields`, in the given order.
    pub fn only<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ToArrayOptions {
            only: Some(fields.into_iter().map(Into::into).collect()),
        }
    }
}
