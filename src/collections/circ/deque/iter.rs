use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ptr::NonNull;

use super::Deque;

impl<T> IntoIterator for Deque<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            deque: self,
        }
    }
}

/// A type for owned iteration over a [`Deque`]. Produces values of type `T`.
///
/// See [`Deque::into_iter`].
pub struct IntoIter<T> {
    // The Deque already has O(1) pops from both ends, so the iterator just holds onto it.
    pub(crate) deque: Deque<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.deque.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len(), Some(self.deque.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.deque.pop_back().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<'a, T> IntoIterator for &'a Deque<T> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            deque: self,
            front: 0,
            back: self.len(),
        }
    }
}

/// A type for borrowed iteration over a [`Deque`]. Produces values of type `&T` in logical order.
///
/// See [`Deque::iter`].
pub struct Iter<'a, T> {
    pub(crate) deque: &'a Deque<T>,
    pub(crate) front: usize,
    pub(crate) back: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        let item = self.deque.get(self.front).ok();
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        self.back -= 1;
        self.deque.get(self.back).ok()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            deque: self.deque,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, T> IntoIterator for &'a mut Deque<T> {
    type Item = &'a mut T;

    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        IterMut {
            ptr: self.buf.ptr,
            cap: self.cap(),
            head: self.head,
            front: 0,
            back: self.len(),
            _phantom: PhantomData,
        }
    }
}

/// A type for mutable borrowed iteration over a [`Deque`]. Produces values of type `&mut T` in
/// logical order.
///
/// See [`Deque::iter_mut`].
pub struct IterMut<'a, T> {
    // A raw pointer is held rather than &mut Deque, because each yielded reference has to outlive
    // the borrow of the iterator itself.
    pub(crate) ptr: NonNull<MaybeUninit<T>>,
    pub(crate) cap: usize,
    pub(crate) head: usize,
    pub(crate) front: usize,
    pub(crate) back: usize,
    pub(crate) _phantom: PhantomData<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    /// # Safety
    /// `index` must be in `front..back` and must not have been yielded before.
    unsafe fn yield_at(&mut self, index: usize) -> &'a mut T {
        let room = self.cap - self.head;
        let physical = if index < room { self.head + index } else { index - room };
        // SAFETY: The caller guarantees that the logical index is initialized and yielded only
        // once, so the returned reference is unique for 'a.
        unsafe { self.ptr.add(physical).as_mut().assume_init_mut() }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        let index = self.front;
        self.front += 1;
        // SAFETY: index was in front..back and front has moved past it.
        Some(unsafe { self.yield_at(index) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        self.back -= 1;
        let index = self.back;
        // SAFETY: index was in front..back and back has moved before it.
        Some(unsafe { self.yield_at(index) })
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

// SAFETY: IterMut holds a unique borrow of the Deque's elements for 'a, the same as &'a mut [T].
unsafe impl<T: Send> Send for IterMut<'_, T> {}
// SAFETY: Shared access to IterMut itself gives no access to the elements.
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}
