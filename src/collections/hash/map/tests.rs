#![cfg(test)]

use std::cell::Cell;

use super::*;
use crate::collections::contiguous::Vector;
use crate::collections::traits::hashing::FnHashing;
use crate::util::alloc::CountedDrop;
use crate::util::error::CapacityExhausted;
use crate::util::hash::{PassThrough, ManualHash};
use crate::util::panic::assert_panics;

#[test]
fn test_insert_and_replace() {
    let mut map = HashMap::new();
    assert_eq!(map.insert("A", 1), None);
    assert_eq!(map.insert("B", 2), None);
    assert_eq!(map.get(&"A"), Some(&1));
    assert_eq!(map.insert("A", 3), Some(1), "Replacing a value should return the old one.");
    assert_eq!(map.get(&"A"), Some(&3));
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&"C"), None);

    assert_eq!(map.remove(&"B"), Some(2));
    assert!(!map.contains_key(&"B"));
    assert_eq!(map.remove(&"B"), None, "Removing a missing key should report nothing.");
    assert_eq!(map.len(), 1);
}

#[test]
fn test_growth_and_rehash() {
    let mut map = HashMap::new();
    assert_eq!(map.bucket_count(), 0);

    let mut rehashes = 0;
    let mut buckets = map.bucket_count();
    for i in 0..100_u32 {
        map.insert(i, i * 10);
        assert!(map.load_factor() <= 0.75, "The load factor should never stay above 3/4.");
        if map.bucket_count() != buckets {
            rehashes += 1;
            buckets = map.bucket_count();
        }

        match i + 1 {
            1..=3 => assert_eq!(map.bucket_count(), 4),
            4..=6 => assert_eq!(map.bucket_count(), 8),
            7 => assert_eq!(map.bucket_count(), 16),
            _ => (),
        }
    }

    assert!(rehashes >= 2, "The map should have rehashed more than once.");
    assert_eq!(map.len(), 100);
    for i in 0..100 {
        assert_eq!(map.get(&i), Some(&(i * 10)), "Every entry should survive rehashing.");
    }
    assert_eq!(map.iter().count(), 100);
}

#[test]
fn test_hash_collisions() {
    let mut map = HashMap::with_hasher(PassThrough);
    map.insert(ManualHash::new(0, "zero"), 0);
    map.insert(ManualHash::new(0, "one"), 1);
    map.insert(ManualHash::new(2, "two"), 2);
    map.insert(ManualHash::new(0, "three"), 3);
    map.insert(ManualHash::new(2, "four"), 4);
    map.insert(ManualHash::new(1, "five"), 5);

    assert_eq!(map.remove(&ManualHash::new(0, "zero")), Some(0));
    assert_eq!(map.remove(&ManualHash::new(2, "two")), Some(2));
    assert_eq!(map.remove(&ManualHash::new(0, "missing")), None);

    let mut values: Vector<_> = map.values().copied().collect();
    values.sort();
    assert_eq!(
        *values,
        [1, 3, 4, 5],
        "HashMap should handle hash collisions so that no entries are lost during removal."
    );

    assert_eq!(map.get(&ManualHash::new(0, "three")), Some(&3));
    assert_eq!(map.get(&ManualHash::new(2, "four")), Some(&4));
}

#[test]
fn test_single_chain_survives_rehash() {
    let mut map = HashMap::with_hasher(PassThrough);
    for i in 0..50 {
        map.insert(ManualHash::new(7, i), i);
    }

    assert_eq!(map.len(), 50);
    for i in 0..50 {
        assert_eq!(map.get(&ManualHash::new(7, i)), Some(&i));
    }
    for i in (0..50).step_by(2) {
        assert_eq!(map.remove(&ManualHash::new(7, i)), Some(i));
    }
    assert_eq!(map.len(), 25);
    assert!(map.keys().all(|key| map.get(key).is_some_and(|v| v % 2 == 1)));
}

#[test]
fn test_rehash_uses_cached_hashes() {
    let calls = Cell::new(0_usize);
    let mut map = HashMap::with_hashing(FnHashing::new(
        |key: &u64| {
            calls.set(calls.get() + 1);
            key.wrapping_mul(0x9E3779B97F4A7C15)
        },
        |a: &u64, b: &u64| a == b,
    ));

    for i in 0..64 {
        map.insert(i, ());
    }

    assert!(map.bucket_count() >= 64);
    assert_eq!(calls.get(), 64, "Each key should be hashed once, not again on every rehash.");
}

#[test]
fn test_custom_hashing() {
    let mut map = HashMap::with_hashing(FnHashing::new(
        |key: &String| {
            key.bytes().fold(0_u64, |h, b| h.wrapping_mul(31).wrapping_add(b.to_ascii_lowercase() as u64))
        },
        |a: &String, b: &String| a.eq_ignore_ascii_case(b),
    ));

    map.insert(String::from("Content-Type"), 1);
    assert_eq!(map.insert(String::from("content-type"), 2), Some(1));
    assert_eq!(map.len(), 1);
    assert_eq!(
        map.get_key_value(&String::from("CONTENT-TYPE")),
        Some((&String::from("Content-Type"), &2)),
        "The first inserted key should be kept."
    );
}

#[test]
fn test_none_is_an_ordinary_key() {
    let mut map = HashMap::new();
    map.insert(None, "absent");
    map.insert(Some(1), "one");

    assert_eq!(map.get(&None), Some(&"absent"));
    assert_eq!(map.insert(None, "still absent"), Some("absent"));
    assert_eq!(map.remove_entry(&None), Some((None, "still absent")));
    assert!(!map.contains_key(&None));
    assert!(map.contains_key(&Some(1)));
}

#[test]
fn test_reserve() {
    let mut map = HashMap::with_cap(100);
    let buckets = map.bucket_count();
    assert!(buckets * 3 >= 100 * 4);

    for i in 0..100 {
        map.insert(i, i);
    }
    assert_eq!(map.bucket_count(), buckets, "Reserved buckets should avoid rehashing.");

    map.reserve(0);
    assert_eq!(map.bucket_count(), buckets);
}

#[test]
fn test_capacity_exhausted() {
    let mut map: HashMap<_, _> = (0..10).map(|i| (i, i)).collect();
    let buckets = map.bucket_count();

    assert_eq!(map.try_reserve(usize::MAX), Err(CapacityExhausted));
    assert_eq!(map.try_reserve(usize::MAX / 8), Err(CapacityExhausted));

    assert_eq!(map.bucket_count(), buckets, "A failed reserve should leave the map unchanged.");
    assert_eq!(map.len(), 10);
    assert!((0..10).all(|i| map.get(&i) == Some(&i)));
}

#[test]
fn test_failed_rehash_leaves_map_unchanged() {
    let mut map: HashMap<_, _> = (0..3).map(|i| (i, i)).collect();
    let buckets = map.bucket_count();

    // Claim far more entries than there are, so that the next rehash can't be sized.
    map.len = usize::MAX / 2;
    assert_eq!(map.try_insert(10, 10), Err(CapacityExhausted));
    assert_eq!(map.len(), usize::MAX / 2);
    assert_eq!(map.bucket_count(), buckets, "A failed rehash should keep the old buckets.");
    assert_eq!(map.try_insert(1, 100), Ok(Some(1)), "Replacing a value never needs to grow.");
    assert_panics!({
        map.insert(11, 11);
    }, contains "Capacity exhausted");

    map.len = 3;
    assert!(!map.contains_key(&10));
    assert!(!map.contains_key(&11));
    let mut entries: Vector<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
    entries.sort();
    assert_eq!(*entries, [(0, 0), (1, 100), (2, 2)]);
}

#[test]
fn test_clear() {
    let mut map: HashMap<_, _> = (0..20).map(|i| (i, i.to_string())).collect();
    let buckets = map.bucket_count();

    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.bucket_count(), buckets);
    assert_eq!(map.iter().next(), None);

    map.insert(1, String::from("again"));
    assert_eq!(map.get(&1).map(String::as_str), Some("again"));
}

#[test]
fn test_iteration() {
    let mut map: HashMap<_, _> = (0..10).map(|i| (i, i)).collect();

    for value in map.values_mut() {
        *value *= 2;
    }
    for (key, value) in &mut map {
        *value += key;
    }

    let mut entries: Vector<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
    entries.sort();
    assert!(entries.iter().all(|&(k, v)| v == k * 3));

    let first: Vector<_> = map.keys().collect();
    let second: Vector<_> = map.keys().collect();
    assert_eq!(first, second, "Iteration order should be stable while the map is unmodified.");
    drop(first);
    drop(second);

    assert_eq!(map.iter().len(), 10);
    let mut keys: Vector<_> = map.clone().into_keys().collect();
    keys.sort();
    assert_eq!(*keys, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(map.into_values().sum::<i32>(), 135);
}

#[test]
fn test_equality_and_clone() {
    let a: HashMap<_, _> = [("x", 1), ("y", 2)].into_iter().collect();
    let b: HashMap<_, _> = [("y", 2), ("x", 1)].into_iter().collect();
    assert_eq!(a, b, "Equality shouldn't depend on insertion order.");

    let mut c = a.clone();
    assert_eq!(a, c);
    c.insert("x", 5);
    assert_ne!(a, c);
    assert_eq!(a.get(&"x"), Some(&1), "Clones should not share entries.");
}

#[test]
fn test_display() {
    let mut map: HashMap<&str, i32> = HashMap::new();
    assert_eq!(format!("{map}"), "{}");
    map.insert("A", 1);
    assert_eq!(format!("{map}"), r#"{"A": 1}"#);
}

#[test]
fn test_drops() {
    let counter = CountedDrop::new();
    let mut map = HashMap::new();
    for i in 0..10 {
        map.insert(i, counter.clone());
    }

    drop(map.insert(3, counter.clone()));
    assert_eq!(counter.drops(), 1, "Replaced values should be dropped by the caller.");

    drop(map.remove(&4));
    assert_eq!(counter.drops(), 2);

    let mut iter = map.into_iter();
    drop(iter.next());
    assert_eq!(counter.drops(), 3);

    drop(iter);
    assert_eq!(counter.drops(), 11, "Dropping a partial iterator should drop the rest.");
}
