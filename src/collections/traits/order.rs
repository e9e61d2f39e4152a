//! The ordering capability used by [`OrderedSet`](crate::collections::tree::OrderedSet).
//!
//! A [`Comparator`] imposes a strict total order on a type. Types which already implement [`Ord`]
//! can use [`NaturalOrder`], otherwise any closure of the form `Fn(&T, &T) -> Ordering` is a
//! Comparator.
//!
//! It is a logic error for a Comparator to be inconsistent (e.g. `compare(a, b) == Less` while
//! `compare(b, a) == Less`) or for a stored element to be mutated in a way that changes its order.
//! Neither case can be detected, and the behavior of any collection relying on the Comparator is
//! unspecified afterwards, although it will remain memory safe.

use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;

pub trait Comparator<T: ?Sized> {
    /// Returns the ordering of `a` relative to `b`. [`Ordering::Equal`] means that the two values
    /// occupy the same slot in an ordered collection.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// A [`Comparator`] which defers to the [`Ord`] implementation of `T`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F: Fn(&T, &T) -> Ordering> Comparator<T> for F {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// A [`Comparator`] which orders values by a key extracted from each of them. Created by
/// [`by_key`].
pub struct ByKey<T: ?Sized, K: Ord, F: Fn(&T) -> K> {
    pub(crate) key: F,
    pub(crate) _phantom: PhantomData<fn(&T) -> K>,
}

/// Creates a [`Comparator`] which compares values by the key returned from `key`.
///
/// # Examples
/// ```
/// # use standard_collections::collections::traits::{Comparator, by_key};
/// # use std::cmp::Ordering;
/// let by_len = by_key(|s: &&str| s.len());
/// assert_eq!(by_len.compare(&"ab", &"abc"), Ordering::Less);
/// assert_eq!(by_len.compare(&"ab", &"cd"), Ordering::Equal);
/// ```
pub const fn by_key<T: ?Sized, K: Ord, F: Fn(&T) -> K>(key: F) -> ByKey<T, K, F> {
    ByKey {
        key,
        _phantom: PhantomData,
    }
}

impl<T: ?Sized, K: Ord, F: Fn(&T) -> K> Comparator<T> for ByKey<T, K, F> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.key)(a).cmp(&(self.key)(b))
    }
}

impl<T: ?Sized, K: Ord, F: Fn(&T) -> K + Clone> Clone for ByKey<T, K, F> {
    fn clone(&self) -> Self {
        by_key(self.key.clone())
    }
}

impl<T: ?Sized, K: Ord, F: Fn(&T) -> K> Debug for ByKey<T, K, F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByKey").finish_non_exhaustive()
    }
}
