use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::{Link, OrderedSet};
use crate::collections::traits::order::Comparator;

impl<T, C: Comparator<T>> IntoIterator for OrderedSet<T, C> {
    type Item = T;

    type IntoIter = IntoIter<T, C>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

/// A type for owned iteration over an [`OrderedSet`]. Produces values of type `T` in ascending
/// order.
///
/// See [`OrderedSet::into_iter`].
pub struct IntoIter<T, C: Comparator<T>>(pub(crate) OrderedSet<T, C>);

impl<T, C: Comparator<T>> Iterator for IntoIter<T, C> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        // Each pop takes O(log n), but keeps the tree valid if the iterator is dropped early.
        self.0.pop_first().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl<T, C: Comparator<T>> DoubleEndedIterator for IntoIter<T, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.pop_last().ok()
    }
}

impl<T, C: Comparator<T>> ExactSizeIterator for IntoIter<T, C> {}

impl<T, C: Comparator<T>> FusedIterator for IntoIter<T, C> {}

impl<'a, T, C: Comparator<T>> IntoIterator for &'a OrderedSet<T, C> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            front: self.root.map(|root| root.leftmost()),
            back: self.root.map(|root| root.rightmost()),
            len: self.len,
            _phantom: PhantomData,
        }
    }
}

/// A type for borrowed iteration over an [`OrderedSet`]. Produces values of type `&T` in ascending
/// order, stepping between neighbouring nodes through their parent links.
///
/// See [`OrderedSet::iter`].
pub struct Iter<'a, T> {
    pub(crate) front: Link<T>,
    pub(crate) back: Link<T>,
    // The two ends meet when len reaches 0, which is simpler than comparing the cursors.
    pub(crate) len: usize,
    pub(crate) _phantom: PhantomData<&'a T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let node = self.front?;
        self.front = node.next();
        self.len -= 1;
        Some(node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let node = self.back?;
        self.back = node.prev();
        self.len -= 1;
        Some(node.value())
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            front: self.front,
            back: self.back,
            len: self.len,
            _phantom: PhantomData,
        }
    }
}

// SAFETY: Iter only hands out shared references to values owned by the set it borrows, the same as
// &'a T.
unsafe impl<T: Sync> Send for Iter<'_, T> {}
// SAFETY: Iter has no interior mutability, the node pointers are only ever read.
unsafe impl<T: Sync> Sync for Iter<'_, T> {}
