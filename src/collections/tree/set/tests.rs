#![cfg(test)]

use std::cell::Cell;
use std::cmp::Ordering;
use std::{iter, thread};

use super::*;
use crate::collections::traits::order::{Comparator, by_key};
use crate::collections::traits::set::Set;
use crate::util::alloc::CountedDrop;
use crate::util::error::EmptyCollection;

/// Walks the whole tree, checking the parent links, the ordering and both color invariants.
/// Returns the black height of the tree.
fn validate<T, C: Comparator<T>>(set: &OrderedSet<T, C>) -> usize {
    fn walk<T, C: Comparator<T>>(cmp: &C, link: Link<T>, parent: Link<T>, count: &mut usize) -> usize {
        let Some(node) = link else {
            return 1;
        };
        *count += 1;

        assert!(node.parent() == parent, "Parent links should point back up the tree.");
        if node.color().is_red() {
            assert!(
                color_of(node.left()).is_black() && color_of(node.right()).is_black(),
                "A red node should never have a red child."
            );
        }
        if let Some(left) = node.left() {
            assert_eq!(cmp.compare(left.value(), node.value()), Ordering::Less);
        }
        if let Some(right) = node.right() {
            assert_eq!(cmp.compare(right.value(), node.value()), Ordering::Greater);
        }

        let left_height = walk(cmp, node.left(), link, count);
        let right_height = walk(cmp, node.right(), link, count);
        assert_eq!(left_height, right_height, "Every path should have the same black height.");

        left_height + usize::from(node.color().is_black())
    }

    assert!(color_of(set.root).is_black(), "The root should always be black.");
    let mut count = 0;
    let height = walk(&set.cmp, set.root, None, &mut count);
    assert_eq!(count, set.len(), "len should match the number of nodes.");
    height
}

/// A small deterministic generator so that the shuffled sequences are reproducible.
fn scrambled(count: u64, seed: u64) -> impl Iterator<Item = u64> {
    let mut state = seed;
    iter::repeat_with(move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        state >> 33
    }).take(count as usize)
}

#[derive(Debug, Clone, PartialEq)]
struct Person {
    name: &'static str,
    age: u32,
}

#[test]
fn test_comparator_by_age() {
    let mut people = OrderedSet::with_comparator(|a: &Person, b: &Person| a.age.cmp(&b.age));
    people.insert(Person { name: "Alice", age: 23 });
    people.insert(Person { name: "Bob", age: 20 });
    people.insert(Person { name: "Charlie", age: 22 });

    let names: Vec<_> = people.iter().map(|p| p.name).collect();
    assert_eq!(names, ["Bob", "Charlie", "Alice"]);

    assert!(
        !people.insert(Person { name: "Dave", age: 22 }),
        "An element that compares equal should be rejected."
    );
    assert_eq!(people.get(&Person { name: "", age: 22 }).map(|p| p.name), Some("Charlie"));
    validate(&people);
}

#[test]
fn test_duplicate_rejection() {
    let mut set = OrderedSet::new();
    for i in [5, 3, 8, 1, 4] {
        assert!(set.insert(i));
    }
    let before = set.clone();

    for i in [5, 3, 8, 1, 4] {
        assert!(!set.insert(i));
    }
    assert_eq!(set, before, "Rejected inserts should leave the set unchanged.");
    assert_eq!(set.len(), 5);
}

#[test]
fn test_ascending_regardless_of_insertion_order() {
    let ascending: OrderedSet<_> = (0..200).collect();
    let descending: OrderedSet<_> = (0..200).rev().collect();
    let scrambled_set: OrderedSet<_> = scrambled(500, 7).collect();

    for set in [&ascending, &descending] {
        assert!(set.iter().copied().eq(0..200));
        validate(set);
    }

    let items: Vec<_> = scrambled_set.iter().collect();
    assert!(items.windows(2).all(|w| w[0] < w[1]), "Iteration should be strictly ascending.");
    validate(&scrambled_set);
}

#[test]
fn test_balance_under_sequential_inserts() {
    let set: OrderedSet<_> = (0..1024).collect();
    let black_height = validate(&set);
    // A red-black tree with n nodes has black height at most log2(n + 1) + 1 (counting leaves).
    assert!(black_height <= 12, "Black height {black_height} is too large for 1024 nodes.");
}

#[test]
fn test_remove_keeps_invariants() {
    let mut set: OrderedSet<_> = scrambled(400, 11).map(|i| i % 300).collect();
    let mut model: Vec<_> = set.iter().copied().collect();

    for (step, value) in scrambled(400, 13).map(|i| i % 300).enumerate() {
        let expected = model.binary_search(&value).map(|i| model.remove(i)).is_ok();
        assert_eq!(set.remove(&value), expected, "Step {step} removing {value}.");
        validate(&set);
    }

    assert!(set.iter().copied().eq(model.iter().copied()));
    assert!(!set.remove(&1000), "Removing an absent element should return false.");
}

#[test]
fn test_first_last_and_pops() {
    let mut set = OrderedSet::new();
    assert_eq!(set.first(), Err(EmptyCollection));
    assert_eq!(set.last(), Err(EmptyCollection));
    assert_eq!(set.pop_first(), Err(EmptyCollection));

    set.extend([40, 10, 30, 20]);
    assert_eq!(set.first(), Ok(&10));
    assert_eq!(set.last(), Ok(&40));

    assert_eq!(set.pop_first(), Ok(10));
    assert_eq!(set.pop_last(), Ok(40));
    validate(&set);
    assert!(set.iter().eq(&[20, 30]));

    set.clear();
    assert!(set.is_empty());
    assert_eq!(set.last(), Err(EmptyCollection));
}

#[test]
fn test_iteration_is_restartable_and_double_ended() {
    let set: OrderedSet<_> = [3, 1, 4, 5, 9, 2, 6].into();

    assert!(set.iter().eq(&[1, 2, 3, 4, 5, 6, 9]));
    assert!(set.iter().eq(&[1, 2, 3, 4, 5, 6, 9]), "Iteration should be restartable.");
    assert!(set.iter().rev().eq(&[9, 6, 5, 4, 3, 2, 1]));

    let mut iter = set.iter();
    assert_eq!(iter.next(), Some(&1));
    assert_eq!(iter.next_back(), Some(&9));
    assert_eq!(iter.len(), 5);
    assert_eq!(iter.collect::<Vec<_>>(), [&2, &3, &4, &5, &6]);

    assert_eq!(set.into_iter().rev().collect::<Vec<_>>(), [9, 6, 5, 4, 3, 2, 1]);
}

#[test]
fn test_by_key_comparator() {
    let mut words = OrderedSet::with_comparator(by_key(|s: &String| s.len()));
    assert!(words.insert(String::from("three")));
    assert!(words.insert(String::from("a")));
    assert!(!words.insert(String::from("seven")));
    assert!(words.iter().eq(["a", "three"]));
}

#[test]
fn test_set_algebra() {
    let a: OrderedSet<_> = (0..6).collect();
    let b: OrderedSet<_> = (3..9).collect();

    assert!(a.difference(&b).eq(&[0, 1, 2]));
    assert!(a.intersection(&b).eq(&[3, 4, 5]));
    assert!(a.union(&b).eq(&[0, 1, 2, 3, 4, 5, 6, 7, 8]));
    assert!(a.symmetric_difference(&b).eq(&[0, 1, 2, 6, 7, 8]));

    let small: OrderedSet<_> = (1..3).collect();
    assert!(small.is_subset(&a));
    assert!(a.is_superset(&small));
    assert!(!small.is_subset(&b));
    assert!(small.is_disjoint(&b));
    assert!(!a.is_disjoint(&b));

    let empty: OrderedSet<i32> = OrderedSet::new();
    assert!(empty.is_subset(&a));
    assert!(a.difference(&empty).eq(a.iter()));
    assert!(empty.union(&b).eq(b.iter()));
    assert_eq!(a.intersection(&empty).next(), None);
}

#[test]
fn test_set_algebra_walks_in_comparator_order() {
    let descending = |a: &i32, b: &i32| b.cmp(a);
    let mut a = OrderedSet::with_comparator(descending);
    let mut b = OrderedSet::with_comparator(descending);
    a.extend([1, 3, 5, 7]);
    b.extend([3, 4, 5, 6]);

    assert!(a.union(&b).eq(&[7, 6, 5, 4, 3, 1]));
    assert!(a.intersection(&b).eq(&[5, 3]));
    assert!(a.symmetric_difference(&b).eq(&[7, 6, 4, 1]));
    assert!(b.difference(&a).eq(&[6, 4]));
}

#[test]
fn test_set_algebra_is_linear() {
    let calls = Cell::new(0_usize);
    let counting = |a: &u32, b: &u32| {
        calls.set(calls.get() + 1);
        a.cmp(b)
    };
    let mut evens = OrderedSet::with_comparator(counting);
    let mut threes = OrderedSet::with_comparator(counting);
    evens.extend((0..1000).map(|i| i * 2));
    threes.extend((0..1000).map(|i| i * 3));

    calls.set(0);
    assert_eq!(evens.intersection(&threes).count(), 334);
    assert!(
        calls.get() < 2000,
        "A merge walk should compare each element at most once, not search for it."
    );

    calls.set(0);
    assert!(!threes.is_subset(&evens));
    assert!(calls.get() < 10, "is_subset should stop at the first missing element.");
}

#[test]
fn test_drops() {
    let counter = CountedDrop::new();
    // CountedDrop has no ordering of its own, so the comparator only looks at the index.
    let mut set = OrderedSet::with_comparator(|a: &(u32, CountedDrop), b: &(u32, CountedDrop)| {
        a.0.cmp(&b.0)
    });
    for i in 0..10 {
        set.insert((i, counter.clone()));
    }

    assert!(!set.insert((0, counter.clone())));
    assert_eq!(counter.drops(), 1, "A rejected element should be dropped.");

    assert!(set.remove(&(5, counter.clone())));
    assert_eq!(counter.drops(), 3, "The removed element and the probe should both be dropped.");

    drop(set);
    assert_eq!(counter.drops(), 12, "Dropping the set should drop every remaining element.");
}

#[test]
fn test_clone_is_deep() {
    let original: OrderedSet<_> = (0..50).map(|i| i.to_string()).collect();
    let mut copy = original.clone();
    validate(&copy);

    copy.remove(&String::from("7"));
    assert!(original.contains(&String::from("7")));
    assert!(!copy.contains(&String::from("7")));
    assert_eq!(copy.len(), 49);
}

#[test]
fn test_iter_across_threads() {
    let set: OrderedSet<u64> = (1..=100).collect();

    let iter = set.iter();
    let total = thread::scope(|s| s.spawn(move || iter.sum::<u64>()).join());

    assert_eq!(total.ok(), Some(5050));
}
