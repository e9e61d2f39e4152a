//! The [`Set`] trait, providing set algebra for collections of unique elements that can be iterated
//! in ascending order.
//!
//! Because both operands are already sorted, every operation here is a single merge walk over the
//! two sets, taking `O(n + m)` comparisons rather than a lookup in `other` for each element of
//! `self`. The ordering used for the walk is always the one belonging to `self`, so both sets are
//! expected to order their elements the same way. If they don't, the results are unspecified but
//! still memory safe.

use std::cmp::{self, Ordering};
use std::iter::{FusedIterator, Peekable};

/// A collection of unique elements with a total order, supporting set algebra.
///
/// Implementors must yield elements from [`iter`](Set::iter) in strictly ascending order according
/// to [`compare`](Set::compare).
pub trait Set<T>: Sized {
    /// The borrowed iterator type, which must be sorted.
    type Iter<'a>: Iterator<Item = &'a T> where Self: 'a, T: 'a;

    /// Returns the number of elements in the set.
    fn len(&self) -> usize;

    /// Returns true if the set contains no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the set contains an element equal to `item`.
    fn contains(&self, item: &T) -> bool;

    /// Returns an iterator over all elements in the set, in ascending order.
    fn iter<'a>(&'a self) -> Self::Iter<'a>;

    /// Compares two elements using the ordering of this set.
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Creates a borrowed iterator over all items that are in `self` but not `other`, in ascending
    /// order. (`self \ other`)
    fn difference<'a>(&'a self, other: &'a Self) -> Difference<'a, Self, T> {
        Difference(MergeWalk::new(self, other))
    }

    /// Creates a borrowed iterator over all items that are in `self` or `other` but not both, in
    /// ascending order. (`self △ other`)
    fn symmetric_difference<'a>(&'a self, other: &'a Self) -> SymmetricDifference<'a, Self, T> {
        SymmetricDifference(MergeWalk::new(self, other))
    }

    /// Creates a borrowed iterator over all items that are in both `self` and `other`, in
    /// ascending order. The items are borrowed from `self`. (`self ∩ other`)
    fn intersection<'a>(&'a self, other: &'a Self) -> Intersection<'a, Self, T> {
        Intersection(MergeWalk::new(self, other))
    }

    /// Creates a borrowed iterator over all items that are in either `self` or `other`, in
    /// ascending order. Items found in both sets are borrowed from `self`. (`self ∪ other`)
    fn union<'a>(&'a self, other: &'a Self) -> Union<'a, Self, T> {
        Union(MergeWalk::new(self, other))
    }

    /// Returns true if `other` contains all elements of `self`. (`self ⊆ other`)
    ///
    /// Stops at the first element of `self` that is missing from `other`.
    fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.difference(other).next().is_none()
    }

    /// Returns true if `self` contains all elements of `other`. (`self ⊇ other`)
    fn is_superset(&self, other: &Self) -> bool {
        other.len() <= self.len() && other.difference(self).next().is_none()
    }

    /// Returns true if `self` and `other` have no elements in common.
    ///
    /// Stops at the first shared element.
    fn is_disjoint(&self, other: &Self) -> bool {
        self.intersection(other).next().is_none()
    }
}

/// Which side of a merge walk an element came from.
enum Side<'a, T> {
    Left(&'a T),
    Right(&'a T),
    Both(&'a T),
}

/// Walks two sorted sets in step, producing each distinct element once along with the side(s)
/// that contain it.
struct MergeWalk<'a, S: Set<T> + 'a, T: 'a> {
    set: &'a S,
    left: Peekable<S::Iter<'a>>,
    right: Peekable<S::Iter<'a>>,
}

impl<'a, S: Set<T>, T: 'a> MergeWalk<'a, S, T> {
    fn new(set: &'a S, other: &'a S) -> Self {
        MergeWalk {
            set,
            left: set.iter().peekable(),
            right: other.iter().peekable(),
        }
    }

    /// The remaining number of elements on each side, as upper bounds.
    fn remaining(&self) -> (Option<usize>, Option<usize>) {
        (self.left.size_hint().1, self.right.size_hint().1)
    }
}

impl<'a, S: Set<T>, T: 'a> Iterator for MergeWalk<'a, S, T> {
    type Item = Side<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let order = match (self.left.peek(), self.right.peek()) {
            (None, None) => return None,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(l), Some(r)) => self.set.compare(l, r),
        };

        match order {
            Ordering::Less => self.left.next().map(Side::Left),
            Ordering::Greater => self.right.next().map(Side::Right),
            Ordering::Equal => {
                self.right.next();
                self.left.next().map(Side::Both)
            },
        }
    }
}

impl<S: Set<T>, T> FusedIterator for MergeWalk<'_, S, T> {}

/// A borrowed iterator over the items of one set that aren't in another.
///
/// See [`Set::difference`].
pub struct Difference<'a, S: Set<T> + 'a, T: 'a>(MergeWalk<'a, S, T>);

impl<'a, S: Set<T>, T: 'a> Iterator for Difference<'a, S, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.find_map(|side| match side {
            Side::Left(item) => Some(item),
            _ => None,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.0.remaining().0)
    }
}

impl<S: Set<T>, T> FusedIterator for Difference<'_, S, T> {}

/// A borrowed iterator over the items that are in exactly one of two sets.
///
/// See [`Set::symmetric_difference`].
pub struct SymmetricDifference<'a, S: Set<T> + 'a, T: 'a>(MergeWalk<'a, S, T>);

impl<'a, S: Set<T>, T: 'a> Iterator for SymmetricDifference<'a, S, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.find_map(|side| match side {
            Side::Left(item) | Side::Right(item) => Some(item),
            Side::Both(_) => None,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (left, right) = self.0.remaining();
        (0, left.zip(right).and_then(|(l, r)| l.checked_add(r)))
    }
}

impl<S: Set<T>, T> FusedIterator for SymmetricDifference<'_, S, T> {}

/// A borrowed iterator over the items shared by two sets.
///
/// See [`Set::intersection`].
pub struct Intersection<'a, S: Set<T> + 'a, T: 'a>(MergeWalk<'a, S, T>);

impl<'a, S: Set<T>, T: 'a> Iterator for Intersection<'a, S, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.find_map(|side| match side {
            Side::Both(item) => Some(item),
            _ => None,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (left, right) = self.0.remaining();
        let upper = match (left, right) {
            (Some(l), Some(r)) => Some(cmp::min(l, r)),
            (l, r) => l.or(r),
        };
        (0, upper)
    }
}

impl<S: Set<T>, T> FusedIterator for Intersection<'_, S, T> {}

/// A borrowed iterator over the items in either of two sets.
///
/// See [`Set::union`].
pub struct Union<'a, S: Set<T> + 'a, T: 'a>(MergeWalk<'a, S, T>);

impl<'a, S: Set<T>, T: 'a> Iterator for Union<'a, S, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|side| match side {
            Side::Left(item) | Side::Right(item) | Side::Both(item) => item,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (left, right) = self.0.remaining();
        let (left_min, right_min) = (self.0.left.size_hint().0, self.0.right.size_hint().0);
        (
            cmp::max(left_min, right_min),
            left.zip(right).and_then(|(l, r)| l.checked_add(r)),
        )
    }
}

impl<S: Set<T>, T> FusedIterator for Union<'_, S, T> {}
