//! The hashing capability used by [`HashMap`](crate::collections::hash::HashMap).
//!
//! A [`KeyHashing`] scheme supplies both a hash and an equality test for keys, with the contract
//! that `eq(a, b)` implies `hash(a) == hash(b)`. Keys that implement [`Hash`] and [`Eq`] can use
//! [`DefaultHashing`], which hashes through any [`BuildHasher`]. [`FnHashing`] adapts a pair of
//! closures instead.
//!
//! It is a logic error for a key to be modified in a way that changes its hash or equality while
//! it is stored in a collection.

use std::fmt::{self, Debug, Formatter};
use std::hash::{BuildHasher, Hash, RandomState};

pub trait KeyHashing<K: ?Sized> {
    /// Hashes `key`. Keys for which [`eq`](KeyHashing::eq) returns true must hash identically.
    fn hash(&self, key: &K) -> u64;

    /// Returns true if `a` and `b` should be treated as the same key.
    fn eq(&self, a: &K, b: &K) -> bool;
}

/// A [`KeyHashing`] scheme which uses the [`Hash`] and [`Eq`] implementations of the key, hashing
/// with the wrapped [`BuildHasher`].
#[derive(Debug, Default, Clone)]
pub struct DefaultHashing<B: BuildHasher = RandomState>(pub B);

impl<K: Hash + Eq + ?Sized, B: BuildHasher> KeyHashing<K> for DefaultHashing<B> {
    fn hash(&self, key: &K) -> u64 {
        self.0.hash_one(key)
    }

    fn eq(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

/// A [`KeyHashing`] scheme built from a hash function and an equality function.
///
/// # Examples
/// ```
/// # use standard_collections::collections::traits::{FnHashing, KeyHashing};
/// let case_insensitive = FnHashing::new(
///     |s: &str| s.bytes().fold(0_u64, |h, b| h.wrapping_mul(31).wrapping_add(b.to_ascii_lowercase() as u64)),
///     |a: &str, b: &str| a.eq_ignore_ascii_case(b),
/// );
/// assert!(case_insensitive.eq("Key", "kEY"));
/// assert_eq!(case_insensitive.hash("Key"), case_insensitive.hash("kEY"));
/// ```
#[derive(Clone, Copy)]
pub struct FnHashing<H, E> {
    pub(crate) hash: H,
    pub(crate) eq: E,
}

impl<H, E> FnHashing<H, E> {
    pub const fn new(hash: H, eq: E) -> FnHashing<H, E> {
        FnHashing {
            hash,
            eq,
        }
    }
}

impl<K: ?Sized, H: Fn(&K) -> u64, E: Fn(&K, &K) -> bool> KeyHashing<K> for FnHashing<H, E> {
    fn hash(&self, key: &K) -> u64 {
        (self.hash)(key)
    }

    fn eq(&self, a: &K, b: &K) -> bool {
        (self.eq)(a, b)
    }
}

impl<H, E> Debug for FnHashing<H, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHashing").finish_non_exhaustive()
    }
}
