//! Property-based tests for collections using proptest.

use packman::prelude::*;
use proptest::prelude::*;
use serde_json::{Value, json};

fn user_strategy() -> impl Strategy<Value = Value> {
    ("[a-z]{1,8}", 0u32..120).prop_map(|(name, age)| json!({ "name": name, "age": age.to_string() }))
}

fn positional(items: &[i64]) -> Collection {
    items.iter().copied().collect()
}

proptest! {
    /// Adding n members without keys yields the keys 0..n in order.
    #[test]
    fn positional_adds_yield_consecutive_keys(items in prop::collection::vec(any::<i64>(), 0..64)) {
        let mut collection = Collection::new();
        for item in &items {
            collection.add(*item).unwrap();
        }

        let keys = collection.keys().cloned().collect::<Vec<_>>();
        let expected = (0..items.len()).map(Key::from).collect::<Vec<_>>();
        prop_assert_eq!(keys, expected);
    }

    /// A member added under a key can be read back under that key.
    #[test]
    fn add_then_get_round_trips(key in "[a-z]{1,8}", value in any::<i64>()) {
        let mut collection = Collection::new();
        let stored = collection.add_with_key(value, key.as_str()).unwrap();

        prop_assert_eq!(&stored, &Key::from(key.as_str()));
        prop_assert_eq!(collection.get(stored), Some(&Member::from(value)));
    }

    /// Filtering keeps every surviving member under its original key, in order.
    #[test]
    fn filter_preserves_keys(items in prop::collection::vec(any::<i64>(), 0..64), threshold in any::<i64>()) {
        let collection = positional(&items);
        let filtered = collection.filter(|member| member.as_value().and_then(Value::as_i64) > Some(threshold));

        prop_assert!(filtered.len() <= collection.len());
        for (key, member) in &filtered {
            prop_assert_eq!(collection.get(key), Some(member));
        }

        let positions = filtered
            .keys()
            .filter_map(|key| collection.members().get_index_of(key))
            .collect::<Vec<_>>();
        prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    /// Filtering twice with the same predicate changes nothing the second time.
    #[test]
    fn filter_is_idempotent(users in prop::collection::vec(user_strategy(), 0..32), age in 0u32..120) {
        let collection = Collection::from_iter(users);
        let once = collection.filter_by("age", ">=", age).unwrap();
        let twice = once.filter_by("age", ">=", age).unwrap();

        prop_assert_eq!(once, twice);
    }

    /// filter_by with `>` keeps exactly the members whose numeric age is larger.
    #[test]
    fn filter_by_compares_numeric_strings_numerically(
        users in prop::collection::vec(user_strategy(), 0..32),
        age in 0u32..120,
    ) {
        let collection = Collection::from_iter(users);
        let older = collection.filter_by("age", ">", age).unwrap();

        let expected = collection
            .values()
            .filter(|member| member["age"].as_str().and_then(|age| age.parse::<u32>().ok()) > Some(age))
            .count();
        prop_assert_eq!(older.len(), expected);
    }

    /// slice(0, n) is the first n members with their keys.
    #[test]
    fn slice_from_start_is_a_prefix(items in prop::collection::vec(any::<i64>(), 0..64), length in 0isize..80) {
        let collection = positional(&items);
        let sliced = collection.slice(0, Some(length), true);

        prop_assert_eq!(sliced.len(), items.len().min(length.unsigned_abs()));
        for ((key, member), (original_key, original)) in sliced.iter().zip(collection.iter()) {
            prop_assert_eq!(key, original_key);
            prop_assert_eq!(member, original);
        }
    }

    /// Sorting by a field reorders members without separating them from their keys.
    #[test]
    fn sort_by_field_keeps_key_member_pairs(users in prop::collection::vec(user_strategy(), 0..32)) {
        let original = Collection::from_iter(users);
        let mut sorted = original.clone();
        sorted.sort_by_field("age").unwrap();

        prop_assert_eq!(sorted.len(), original.len());
        for (key, member) in &sorted {
            prop_assert_eq!(original.get(key), Some(member));
        }

        let ages = sorted
            .pluck("age")
            .unwrap()
            .iter()
            .filter_map(|age| age.as_str().and_then(|age| age.parse::<u32>().ok()))
            .collect::<Vec<_>>();
        prop_assert!(ages.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
