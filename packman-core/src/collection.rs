//! Ordered, flexibly-keyed collections of members.
//!
//! A [`Collection`] keeps its members in insertion order and addresses each one by a [`Key`].
//! When a member is added, its key is derived in priority order:
//!
//! 1. the member's **index field**, if the collection was built with one (an explicit key is
//!    then ignored)
//! 2. the explicit key passed by the caller
//! 3. the next positional integer key
//!
//! Inserting under an existing key overwrites the member in place; it keeps its position.
//!
//! Derived collections ([`filter`](Collection::filter), [`filter_by`](Collection::filter_by),
//! [`slice`](Collection::slice)) are independent copies that keep the index field and,
//! unless asked otherwise, the original keys.
//!
//! # Example
//!
//! ```ignore
//! use packman::prelude::*;
//!
//! let mut users = Collection::with_index("id");
//! users.add(record! { "id" => "001", "name" => "hoge", "age" => "30" })?;
//! users.add(record! { "id" => "002", "name" => "fuge", "age" => "25" })?;
//!
//! let older = users.filter_by("age", ">", 25)?;
//! assert_eq!(older.keys().collect::<Vec<_>>(), vec![&Key::from("001")]);
//!
//! users.sort_by_field("age")?;
//! assert_eq!(users.pluck("name")?, vec![json!("fuge"), json!("hoge")]);
//! ```

use indexmap::{IndexMap, map};
use rand::Rng;
use serde::{Serialize, Serializer, ser::SerializeSeq};
use serde_json::Value;
use std::cmp::Ordering;
use tracing::{debug, trace};

use crate::{
    compare::{SortKey, values_equal},
    error::PackmanResult,
    field::FieldAccess,
    key::Key,
    member::Member,
    options::{CollectionOptions, Members, ToArrayOptions},
    query::Operator,
};

/// An ordered mapping from [`Key`] to [`Member`] with a configurable key-derivation policy.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    index: Option<String>,
    members: IndexMap<Key, Member>,
    /// One past the largest integer key ever inserted.
    next_index: u64,
}

impl Collection {
    /// Creates an empty collection without an index field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty collection that keys every member by its `index` field.
    pub fn with_index(index: impl Into<String>) -> Self {
        Self {
            index: Some(index.into()),
            ..Self::default()
        }
    }

    /// Creates a builder for constructing a collection with options.
    pub fn builder() -> CollectionBuilder {
        CollectionBuilder::default()
    }

    /// Builds a collection from constructor options.
    ///
    /// Every initial member is passed through [`add_with_key`](Collection::add_with_key) in
    /// iteration order, so index-field keying applies the same way to sequences and maps.
    ///
    /// # Errors
    ///
    /// Returns an error if an initial member cannot be keyed by the index field.
    pub fn from_options(options: CollectionOptions) -> PackmanResult<Self> {
        let mut collection = Self {
            index: options.index,
            ..Self::default()
        };

        if let Some(members) = options.members {
            collection.set_members(members)?;
        }

        Ok(collection)
    }

    /// New empty collection sharing this collection's key policy.
    fn derived(&self, members: IndexMap<Key, Member>) -> Self {
        let next_index = members
            .keys()
            .filter_map(Key::as_index)
            .map(|index| index.saturating_add(1))
            .max()
            .unwrap_or(0);

        Self {
            index: self.index.clone(),
            members,
            next_index,
        }
    }

    /// Returns the index field, if any.
    pub fn index(&self) -> Option<&str> {
        self.index.as_deref()
    }

    /// Returns the underlying ordered member map.
    pub fn members(&self) -> &IndexMap<Key, Member> {
        &self.members
    }

    /// Adds every member, keyed by position (sequences) or by map key (maps).
    ///
    /// # Errors
    ///
    /// Returns an error if a member cannot be keyed by the index field. Members before the
    /// failing one stay added.
    pub fn set_members(&mut self, members: Members) -> PackmanResult<()> {
        match members {
            Members::Sequence(members) => {
                for (position, member) in members.into_iter().enumerate() {
                    self.add_with_key(member, position)?;
                }
            }
            Members::Map(members) => {
                for (name, member) in members {
                    self.add_with_key(member, name)?;
                }
            }
        }

        Ok(())
    }

    /// Adds a member without an explicit key, returning the key it was stored under.
    ///
    /// # Errors
    ///
    /// Returns [`PackmanError::FieldAccess`](crate::error::PackmanError::FieldAccess) if the
    /// collection has an index field the member cannot provide, or
    /// [`PackmanError::InvalidKey`](crate::error::PackmanError::InvalidKey) if the index value
    /// is neither a string nor a non-negative integer.
    pub fn add(&mut self, member: impl Into<Member>) -> PackmanResult<Key> {
        self.insert_derived(member.into(), None)
    }

    /// Adds a member under `key`, unless the collection has an index field, in which case the
    /// key is read from the member and `key` is ignored.
    ///
    /// # Errors
    ///
    /// Same as [`add`](Collection::add).
    pub fn add_with_key(&mut self, member: impl Into<Member>, key: impl Into<Key>) -> PackmanResult<Key> {
        self.insert_derived(member.into(), Some(key.into()))
    }

    fn insert_derived(&mut self, member: Member, key: Option<Key>) -> PackmanResult<Key> {
        let key = match &self.index {
            Some(index) => {
                let derived = Key::from_value(member.require_field(index)?)?;

                if let Some(ignored) = key.filter(|key| *key != derived) {
                    debug!(index = %index, key = %derived, ignored = %ignored, "index field overrides explicit key");
                }

                derived
            }
            None => key.unwrap_or(Key::Index(self.next_index)),
        };

        self.insert(key.clone(), member);

        Ok(key)
    }

    /// Inserts or overwrites in place, bypassing key derivation.
    fn insert(&mut self, key: Key, member: Member) -> Option<Member> {
        if let Key::Index(index) = key {
            self.next_index = self.next_index.max(index.saturating_add(1));
        }

        let (position, previous) = self.members.insert_full(key, member);

        if previous.is_some() {
            debug!(position, "overwrote existing member in place");
        }

        previous
    }

    /// Returns the member stored under `key`, or `None` if there is none.
    ///
    /// Positional keys are unsigned: write `get(0u64)` or `get(position)` with a `usize`. A
    /// signed integer goes through `Key::try_from`, which rejects negatives.
    ///
    /// ```ignore
    /// let first = collection.get(0u64);
    /// let same = collection.get(Key::try_from(0i32)?);
    /// ```
    pub fn get(&self, key: impl Into<Key>) -> Option<&Member> {
        self.members.get(&key.into())
    }

    /// Returns the member stored under `key` mutably.
    ///
    /// Changing the member's index field does not re-key it.
    pub fn get_mut(&mut self, key: impl Into<Key>) -> Option<&mut Member> {
        self.members.get_mut(&key.into())
    }

    /// Returns `true` if a member is stored under `key`.
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.members.contains_key(&key.into())
    }

    /// Stores `member` under exactly `key`, returning the member it replaced.
    ///
    /// This is the indexable-access setter: unlike [`add`](Collection::add) it never consults
    /// the index field.
    pub fn set(&mut self, key: impl Into<Key>, member: impl Into<Member>) -> Option<Member> {
        self.insert(key.into(), member.into())
    }

    /// Removes the member stored under `key`. Remaining members keep their order.
    pub fn remove(&mut self, key: impl Into<Key>) -> Option<Member> {
        self.members.shift_remove(&key.into())
    }

    /// Iterates over keys in collection order.
    pub fn keys(&self) -> map::Keys<'_, Key, Member> {
        self.members.keys()
    }

    /// Iterates over members in collection order.
    pub fn values(&self) -> map::Values<'_, Key, Member> {
        self.members.values()
    }

    /// Iterates over `(key, member)` pairs in collection order.
    pub fn iter(&self) -> map::Iter<'_, Key, Member> {
        self.members.iter()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the collection has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns the first member, or `None` if empty.
    pub fn first(&self) -> Option<&Member> {
        self.members.first().map(|(_, member)| member)
    }

    /// Returns the last member, or `None` if empty.
    pub fn last(&self) -> Option<&Member> {
        self.members.last().map(|(_, member)| member)
    }

    /// Reads `field` from every member, in order.
    ///
    /// # Errors
    ///
    /// Returns [`PackmanError::FieldAccess`](crate::error::PackmanError::FieldAccess) if a
    /// member does not support field lookup or lacks the field.
    pub fn pluck(&self, field: &str) -> PackmanResult<Vec<Value>> {
        self.values()
            .map(|member| member.require_field(field).cloned())
            .collect()
    }

    /// Returns the first member whose `field` equals `value`.
    ///
    /// # Errors
    ///
    /// Returns [`PackmanError::FieldAccess`](crate::error::PackmanError::FieldAccess) if a
    /// member visited before the match does not support field lookup or lacks the field.
    pub fn get_by(&self, field: &str, value: impl Into<Value>) -> PackmanResult<Option<&Member>> {
        let value = value.into();

        for member in self.values() {
            if values_equal(member.require_field(field)?, &value) {
                return Ok(Some(member));
            }
        }

        Ok(None)
    }

    /// Returns a new collection holding the members `predicate` accepts, with their
    /// original keys and order.
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Member) -> bool,
    {
        let members = self
            .iter()
            .filter(|(_, member)| predicate(*member))
            .map(|(key, member)| (key.clone(), member.clone()))
            .collect::<IndexMap<_, _>>();

        trace!(from = self.len(), kept = members.len(), "filtered collection");

        self.derived(members)
    }

    /// Returns a new collection holding the members where `field <op> value` holds.
    ///
    /// `op` is one of `=`, `<`, `>`, `<=`, `>=`; see [`compare`](crate::compare) for how
    /// mixed strings and numbers compare.
    ///
    /// # Errors
    ///
    /// Returns [`PackmanError::InvalidOperator`](crate::error::PackmanError::InvalidOperator)
    /// before looking at any member if `op` is unknown, and
    /// [`PackmanError::FieldAccess`](crate::error::PackmanError::FieldAccess) if a member does
    /// not support field lookup or lacks the field.
    pub fn filter_by(&self, field: &str, op: &str, value: impl Into<Value>) -> PackmanResult<Self> {
        self.filter_where(field, op.parse()?, value)
    }

    /// Typed form of [`filter_by`](Collection::filter_by).
    ///
    /// # Errors
    ///
    /// Returns [`PackmanError::FieldAccess`](crate::error::PackmanError::FieldAccess) if a
    /// member does not support field lookup or lacks the field.
    pub fn filter_where(&self, field: &str, op: Operator, value: impl Into<Value>) -> PackmanResult<Self> {
        let value = value.into();
        let mut members = IndexMap::new();

        for (key, member) in self.iter() {
            if op.evaluate(member.require_field(field)?, &value) {
                members.insert(key.clone(), member.clone());
            }
        }

        trace!(field, op = %op, from = self.len(), kept = members.len(), "filtered collection by field");

        Ok(self.derived(members))
    }

    /// Reorders members in place with `compare`. Each key keeps its member.
    ///
    /// The relative order of members `compare` considers equal is not part of the contract.
    pub fn sort<F>(&mut self, mut compare: F) -> &mut Self
    where
        F: FnMut(&Member, &Member) -> Ordering,
    {
        self.members.sort_by(|_, a, _, b| compare(a, b));
        self
    }

    /// Reorders members in place by ascending `key_fn(member)`, computing each sort key once.
    ///
    /// The key must be totally ordered. For keys that are JSON values, floats or a mix of
    /// strings and numbers, use [`sort_by_value`](Collection::sort_by_value).
    ///
    /// The relative order of members with equal sort keys is not part of the contract.
    pub fn sort_by<T, F>(&mut self, mut key_fn: F) -> &mut Self
    where
        T: Ord,
        F: FnMut(&Member) -> T,
    {
        self.members.sort_by_cached_key(|_, member| key_fn(member));
        self
    }

    /// Reorders members in place by ascending `key_fn(member)` under the comparison rules of
    /// [`compare_values`](crate::compare::compare_values).
    ///
    /// Values that rule leaves unordered still get a fixed place:
    /// `null < booleans < numbers < strings < arrays/objects`.
    pub fn sort_by_value<F>(&mut self, mut key_fn: F) -> &mut Self
    where
        F: FnMut(&Member) -> Value,
    {
        let sort_keys = self
            .values()
            .map(|member| SortKey::from(&key_fn(member)))
            .collect();

        self.reorder(sort_keys);
        self
    }

    /// Reorders members in place by ascending value of `field`.
    ///
    /// Numbers and numeric strings order numerically, other strings lexicographically.
    /// The collection is left untouched if any member cannot provide the field.
    ///
    /// # Errors
    ///
    /// Returns [`PackmanError::FieldAccess`](crate::error::PackmanError::FieldAccess) if a
    /// member does not support field lookup or lacks the field.
    pub fn sort_by_field(&mut self, field: &str) -> PackmanResult<&mut Self> {
        let sort_keys = self
            .values()
            .map(|member| member.require_field(field).map(SortKey::from))
            .collect::<PackmanResult<Vec<_>>>()?;

        self.reorder(sort_keys);

        trace!(field, len = self.len(), "sorted collection by field");

        Ok(self)
    }

    /// Sorts entries by precomputed keys, one per member in current order.
    fn reorder(&mut self, sort_keys: Vec<SortKey>) {
        let mut entries = std::mem::take(&mut self.members)
            .into_iter()
            .zip(sort_keys)
            .collect::<Vec<_>>();
        entries.sort_by(|(_, a), (_, b)| a.cmp(b));

        self.members = entries.into_iter().map(|(entry, _)| entry).collect();
    }

    /// Returns a new collection with a run of members.
    ///
    /// A negative `offset` counts from the end. `length` of `None` runs to the end; a negative
    /// `length` stops that many members before the end. With `preserve_keys` the original keys
    /// are kept; otherwise members are re-keyed positionally from `0`, or keep their index-field
    /// keys when the collection has an index field.
    pub fn slice(&self, offset: isize, length: Option<isize>, preserve_keys: bool) -> Self {
        let len = self.len();
        let start = resolve_bound(offset, len);
        let end = match length {
            None => len,
            Some(length) if length < 0 => resolve_bound(length, len),
            Some(length) => start.saturating_add(length.unsigned_abs()).min(len),
        };

        let entries = self
            .iter()
            .skip(start)
            .take(end.saturating_sub(start))
            .map(|(key, member)| (key.clone(), member.clone()));

        let members = if preserve_keys || self.index.is_some() {
            entries.collect::<IndexMap<_, _>>()
        } else {
            entries
                .enumerate()
                .map(|(position, (_, member))| (Key::from(position), member))
                .collect::<IndexMap<_, _>>()
        };

        trace!(offset, ?length, preserve_keys, kept = members.len(), "sliced collection");

        self.derived(members)
    }

    /// Returns a uniformly random member, or `None` if empty.
    pub fn get_random(&self) -> Option<&Member> {
        self.get_random_with(&mut rand::thread_rng())
    }

    /// Returns a uniformly random member drawn from `rng`, or `None` if empty.
    pub fn get_random_with<R: Rng>(&self, rng: &mut R) -> Option<&Member> {
        if self.is_empty() {
            return None;
        }

        self.members
            .get_index(rng.gen_range(0..self.len()))
            .map(|(_, member)| member)
    }

    /// Projects every member in order: records through
    /// [`Record::to_array`](crate::record::Record::to_array), raw values as-is.
    pub fn to_array(&self, options: &ToArrayOptions) -> Vec<Value> {
        self.values()
            .map(|member| member.to_array(options))
            .collect()
    }

    /// Serializes [`to_array`](Collection::to_array) as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`PackmanError::Serialization`](crate::error::PackmanError::Serialization) if
    /// encoding fails.
    pub fn to_json(&self, options: &ToArrayOptions) -> PackmanResult<String> {
        Ok(serde_json::to_string(&self.to_array(options))?)
    }
}

/// Resolves a possibly negative slice bound against `len`, clamped to `0..=len`.
fn resolve_bound(bound: isize, len: usize) -> usize {
    if bound < 0 {
        len.saturating_sub(bound.unsigned_abs())
    } else {
        bound.unsigned_abs().min(len)
    }
}

impl PartialEq for Collection {
    /// Collections are equal when they share the index field and hold the same keys and
    /// members in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.members.iter().eq(other.members.iter())
    }
}

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for member in self.values() {
            seq.serialize_element(member)?;
        }
        seq.end()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = (&'a Key, &'a Member);
    type IntoIter = map::Iter<'a, Key, Member>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Collection {
    type Item = (Key, Member);
    type IntoIter = map::IntoIter<Key, Member>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<M: Into<Member>> Extend<M> for Collection {
    /// Appends members under the next positional keys, without consulting the index field.
    fn extend<I: IntoIterator<Item = M>>(&mut self, iter: I) {
        for member in iter {
            let key = Key::Index(self.next_index);
            self.insert(key, member.into());
        }
    }
}

impl<M: Into<Member>> FromIterator<M> for Collection {
    /// Collects members positionally into a collection without an index field.
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        let mut collection = Collection::new();
        collection.extend(iter);
        collection
    }
}

/// Fluent builder for [`Collection`].
///
/// ```ignore
/// let users = Collection::builder()
///     .index("id")
///     .members(Members::sequence(records))
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct CollectionBuilder {
    options: CollectionOptions,
}

impl CollectionBuilder {
    /// Creates a new collection builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the index field.
    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.options.index = Some(index.into());
        self
    }

    /// Sets the initial members.
    pub fn members(mut self, members: Members) -> Self {
        self.options.members = Some(members);
        self
    }

    /// Builds the collection.
    ///
    /// # Errors
    ///
    /// Same as [`Collection::from_options`].
    pub fn build(self) -> PackmanResult<Collection> {
        Collection::from_options(self.options)
    }
}
