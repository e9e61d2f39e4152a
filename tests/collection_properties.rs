//! Property tests comparing each collection against the equivalent collection from `std`, driven by
//! random sequences of operations.

use std::collections::{BTreeSet, HashMap as StdHashMap, VecDeque};

use proptest::prelude::*;
use standard_collections::collections::circ::Deque;
use standard_collections::collections::contiguous::Vector;
use standard_collections::collections::hash::HashMap;
use standard_collections::collections::traits::FnHashing;
use standard_collections::collections::tree::OrderedSet;
use standard_collections::collections::{EmptyCollection, IndexOutOfBounds};

#[derive(Debug, Clone)]
enum VectorOp {
    Push(i32),
    Pop,
    Insert(usize, i32),
    Remove(usize),
    Set(usize, i32),
}

fn vector_ops() -> impl Strategy<Value = Vec<VectorOp>> {
    prop::collection::vec(
        prop_oneof![
            any::<i32>().prop_map(VectorOp::Push),
            Just(VectorOp::Pop),
            (0..64_usize, any::<i32>()).prop_map(|(i, v)| VectorOp::Insert(i, v)),
            (0..64_usize).prop_map(VectorOp::Remove),
            (0..64_usize, any::<i32>()).prop_map(|(i, v)| VectorOp::Set(i, v)),
        ],
        0..300,
    )
}

#[derive(Debug, Clone)]
enum DequeOp {
    PushFront(u16),
    PushBack(u16),
    PopFront,
    PopBack,
}

fn deque_ops() -> impl Strategy<Value = Vec<DequeOp>> {
    prop::collection::vec(
        prop_oneof![
            any::<u16>().prop_map(DequeOp::PushFront),
            any::<u16>().prop_map(DequeOp::PushBack),
            Just(DequeOp::PopFront),
            Just(DequeOp::PopBack),
        ],
        0..300,
    )
}

#[derive(Debug, Clone)]
enum MapOp {
    Insert(u8, u32),
    Remove(u8),
    Get(u8),
    Clear,
}

fn map_ops() -> impl Strategy<Value = Vec<MapOp>> {
    prop::collection::vec(
        prop_oneof![
            6 => (any::<u8>(), any::<u32>()).prop_map(|(k, v)| MapOp::Insert(k, v)),
            3 => any::<u8>().prop_map(MapOp::Remove),
            3 => any::<u8>().prop_map(MapOp::Get),
            1 => Just(MapOp::Clear),
        ],
        0..500,
    )
}

proptest! {
    #[test]
    fn prop_vector_matches_vec(ops in vector_ops()) {
        let mut vec = Vector::new();
        let mut model = Vec::new();

        for op in ops {
            match op {
                VectorOp::Push(value) => {
                    vec.push(value);
                    model.push(value);
                },
                VectorOp::Pop => prop_assert_eq!(vec.pop(), model.pop()),
                VectorOp::Insert(index, value) => {
                    let result = vec.insert(index, value);
                    if index <= model.len() {
                        prop_assert_eq!(result, Ok(()));
                        model.insert(index, value);
                    } else {
                        prop_assert_eq!(result, Err(IndexOutOfBounds { index, len: model.len() }));
                    }
                },
                VectorOp::Remove(index) => {
                    let result = vec.remove(index);
                    if index < model.len() {
                        prop_assert_eq!(result, Ok(model.remove(index)));
                    } else {
                        prop_assert_eq!(result, Err(IndexOutOfBounds { index, len: model.len() }));
                    }
                },
                VectorOp::Set(index, value) => {
                    let result = vec.set(index, value);
                    prop_assert_eq!(result.is_ok(), index < model.len());
                    if let Some(slot) = model.get_mut(index) {
                        *slot = value;
                    }
                },
            }

            prop_assert!(vec.len() <= vec.cap());
        }

        prop_assert_eq!(&*vec, model.as_slice());
    }

    #[test]
    fn prop_vector_insert_then_remove_is_noop(
        values in prop::collection::vec(any::<i64>(), 0..100),
        index in any::<prop::sample::Index>(),
        value in any::<i64>(),
    ) {
        let mut vec: Vector<_> = values.iter().copied().collect();
        let index = index.index(values.len() + 1);

        vec.insert(index, value).expect("index is within [0, len]");
        prop_assert_eq!(vec.remove(index), Ok(value));
        prop_assert_eq!(&*vec, values.as_slice());
    }

    #[test]
    fn prop_deque_matches_vec_deque(ops in deque_ops()) {
        let mut deque = Deque::new();
        let mut model = VecDeque::new();

        for op in ops {
            match op {
                DequeOp::PushFront(value) => {
                    deque.push_front(value);
                    model.push_front(value);
                },
                DequeOp::PushBack(value) => {
                    deque.push_back(value);
                    model.push_back(value);
                },
                DequeOp::PopFront => {
                    prop_assert_eq!(deque.pop_front().ok(), model.pop_front());
                },
                DequeOp::PopBack => {
                    prop_assert_eq!(deque.pop_back().ok(), model.pop_back());
                },
            }

            prop_assert_eq!(deque.len(), model.len());
            prop_assert_eq!(deque.front().ok(), model.front());
            prop_assert_eq!(deque.back().ok(), model.back());
        }

        prop_assert!(deque.iter().eq(model.iter()));
        prop_assert!(deque.iter().rev().eq(model.iter().rev()));
    }

    #[test]
    fn prop_deque_fifo(values in prop::collection::vec(any::<u32>(), 0..200)) {
        let mut deque = Deque::new();
        for &value in &values {
            deque.push_back(value);
        }
        for &value in &values {
            prop_assert_eq!(deque.pop_front(), Ok(value));
        }
        prop_assert_eq!(deque.pop_front(), Err(EmptyCollection));
    }

    #[test]
    fn prop_ordered_set_matches_btree_set(
        inserts in prop::collection::vec(any::<i16>(), 0..400),
        removes in prop::collection::vec(any::<i16>(), 0..400),
    ) {
        let mut set = OrderedSet::new();
        let mut model = BTreeSet::new();

        for value in inserts {
            prop_assert_eq!(set.insert(value), model.insert(value));
        }
        prop_assert!(set.iter().eq(model.iter()));

        for value in removes {
            prop_assert_eq!(set.remove(&value), model.remove(&value));
        }

        prop_assert_eq!(set.len(), model.len());
        prop_assert!(set.iter().eq(model.iter()));
        prop_assert!(set.iter().rev().eq(model.iter().rev()));
        prop_assert_eq!(set.first().ok(), model.first());
        prop_assert_eq!(set.last().ok(), model.last());
    }

    #[test]
    fn prop_ordered_set_with_reversed_comparator(
        values in prop::collection::vec(any::<u8>(), 0..200),
    ) {
        let set: OrderedSet<u8, _> = {
            let mut set = OrderedSet::with_comparator(|a: &u8, b: &u8| b.cmp(a));
            set.extend(values.iter().copied());
            set
        };
        let model: BTreeSet<_> = values.iter().copied().collect();

        prop_assert!(set.iter().copied().eq(model.iter().rev().copied()));
    }

    #[test]
    fn prop_hash_map_matches_std(ops in map_ops()) {
        let mut map = HashMap::new();
        let mut model = StdHashMap::new();

        for op in ops {
            match op {
                MapOp::Insert(key, value) => {
                    prop_assert_eq!(map.insert(key, value), model.insert(key, value));
                },
                MapOp::Remove(key) => prop_assert_eq!(map.remove(&key), model.remove(&key)),
                MapOp::Get(key) => prop_assert_eq!(map.get(&key), model.get(&key)),
                MapOp::Clear => {
                    map.clear();
                    model.clear();
                },
            }

            prop_assert_eq!(map.len(), model.len());
            prop_assert!(map.load_factor() <= 0.75);
        }

        prop_assert_eq!(map.iter().count(), model.len());
        for (key, value) in &map {
            prop_assert_eq!(model.get(key), Some(value));
        }
    }

    #[test]
    fn prop_hash_map_survives_collisions(
        keys in prop::collection::btree_set(any::<u32>(), 0..300),
    ) {
        // Only eight distinct hashes, so most keys share a chain with others.
        let mut map = HashMap::with_hashing(FnHashing::new(
            |key: &u32| u64::from(key % 8),
            |a: &u32, b: &u32| a == b,
        ));

        for &key in &keys {
            prop_assert_eq!(map.insert(key, key.wrapping_mul(3)), None);
        }
        prop_assert_eq!(map.len(), keys.len());
        for &key in &keys {
            prop_assert_eq!(map.get(&key), Some(&key.wrapping_mul(3)));
        }
        for &key in keys.iter().step_by(2) {
            prop_assert_eq!(map.remove(&key), Some(key.wrapping_mul(3)));
        }
        for (i, &key) in keys.iter().enumerate() {
            prop_assert_eq!(map.contains_key(&key), i % 2 == 1);
        }
    }
}
