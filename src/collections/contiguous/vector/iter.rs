use std::iter::FusedIterator;
use std::mem::ManuallyDrop;
use std::ptr;

use super::Vector;
use crate::collections::contiguous::buffer::RawBuffer;

// Borrowed iteration uses slice::Iter and slice::IterMut through Deref<Target = [T]>.

/// A type for owned iteration over a [`Vector`]. Produces values of type `T`.
///
/// See [`Vector::into_iter`].
pub struct IntoIter<T> {
    pub(crate) buf: RawBuffer<T>,
    pub(crate) front: usize,
    pub(crate) back: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(vec: Vector<T>) -> IntoIter<T> {
        let vec = ManuallyDrop::new(vec);
        IntoIter {
            // SAFETY: vec is never dropped, so ownership of the buffer moves here exactly once.
            buf: unsafe { ptr::read(&vec.buf) },
            front: 0,
            back: vec.len,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        // SAFETY: All slots in front..back are initialized, incrementing front means that this
        // one is never read again.
        let value = unsafe { self.buf.read(self.front) };
        self.front += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        self.back -= 1;
        // SAFETY: back has just been decremented and is still >= front, so it is initialized.
        Some(unsafe { self.buf.read(self.back) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        for _ in self.by_ref() {}
    }
}
