use std::borrow::{Borrow, BorrowMut};
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr;
use std::slice;

use super::IntoIter;
use crate::collections::contiguous::buffer::{self, RawBuffer};
use crate::util::error::{CapacityExhausted, IndexOrCapExhausted, IndexOutOfBounds};
use crate::util::result::ResultExtension;

/// A growable contiguous sequence, storing `len` initialized elements at the front of a single
/// allocation.
///
/// The capacity doubles (with a minimum of 4) whenever an element is added to a full Vector and
/// never shrinks unless [`shrink_to_fit`](Vector::shrink_to_fit) is called.
///
/// # Errors
/// Accessing an index outside of the Vector returns [`IndexOutOfBounds`] rather than panicking.
/// Growth that can't be satisfied by the allocator is reported as [`CapacityExhausted`] by the
/// `try_` methods and leaves the Vector unchanged. The infallible counterparts panic instead.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Vector.
/// - `i`: The index of the item in question.
///
/// | Method | Complexity |
/// |-|-|
/// | `get` | `O(1)` |
/// | `set` | `O(1)` |
/// | `len` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `pop` | `O(1)` |
/// | `insert` | `O(n-i)` |
/// | `remove` | `O(n-i)` |
/// | `reserve` | `O(n)`**, `O(1)` |
/// | `contains` | `O(n)` |
///
/// \* If the Vector doesn't have enough capacity for the new element, `push` will take `O(n)`.
///
/// \** If the Vector has enough capacity for the additional items already, `reserve` is `O(1)`.
pub struct Vector<T> {
    pub(crate) buf: RawBuffer<T>,
    pub(crate) len: usize,
}

impl<T> Vector<T> {
    /// Creates a new Vector with length and capacity 0. Memory will be allocated when the first
    /// element is added.
    ///
    /// # Examples
    /// ```
    /// # use standard_collections::collections::contiguous::Vector;
    /// let vec: Vector<u8> = Vector::new();
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.cap(), 0);
    /// ```
    pub const fn new() -> Vector<T> {
        Vector {
            buf: RawBuffer::new(),
            len: 0,
        }
    }

    /// Creates a new Vector with capacity exactly equal to `cap`.
    ///
    /// # Panics
    /// Panics if the allocation can't be made, see [`Vector::try_with_cap`].
    ///
    /// # Examples
    /// ```
    /// # use standard_collections::collections::contiguous::Vector;
    /// let mut vec: Vector<u8> = Vector::with_cap(5);
    /// assert_eq!(vec.cap(), 5);
    /// vec.extend([1_u8, 2, 3, 4, 5]);
    /// assert_eq!(vec.cap(), 5);
    /// ```
    #[track_caller]
    pub fn with_cap(cap: usize) -> Vector<T> {
        Vector::try_with_cap(cap).throw()
    }

    /// Creates a new Vector with capacity exactly equal to `cap`, returning an error if the memory
    /// can't be allocated.
    pub fn try_with_cap(cap: usize) -> Result<Vector<T>, CapacityExhausted> {
        Ok(Vector {
            buf: RawBuffer::try_with_cap(cap)?,
            len: 0,
        })
    }

    /// Returns the number of elements in the Vector.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Vector contains no elements.
    ///
    /// # Examples
    /// ```
    /// # use standard_collections::collections::contiguous::Vector;
    /// let mut vec: Vector<u8> = Vector::new();
    /// assert!(vec.is_empty());
    /// vec.push(1);
    /// assert!(!vec.is_empty())
    /// ```
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current capacity of the Vector.
    pub const fn cap(&self) -> usize {
        self.buf.cap()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use standard_collections::collections::contiguous::Vector;
    /// let vec: Vector<_> = [10, 20, 30].into_iter().collect();
    /// assert_eq!(vec.get(1), Ok(&20));
    /// assert!(vec.get(3).is_err());
    /// ```
    pub fn get(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.check_index(index)?;
        // SAFETY: index < len, so the slot is initialized.
        Ok(unsafe { self.buf.get(index) })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        self.check_index(index)?;
        // SAFETY: index < len, so the slot is initialized.
        Ok(unsafe { self.buf.get_mut(index) })
    }

    /// Overwrites the element at `index` with `value`, dropping the previous element.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`, in which case `value` is dropped and the
    /// Vector is unchanged.
    pub fn set(&mut self, index: usize, value: T) -> Result<(), IndexOutOfBounds> {
        self.replace(index, value).map(drop)
    }

    /// Replaces the element at `index` with `value`, returning the previous element.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    pub fn replace(&mut self, index: usize, value: T) -> Result<T, IndexOutOfBounds> {
        Ok(std::mem::replace(self.get_mut(index)?, value))
    }

    /// Pushes `value` onto the end of the Vector, growing the capacity if required.
    ///
    /// # Panics
    /// Panics if growth is required but can't be satisfied, see [`Vector::try_push`].
    ///
    /// # Examples
    /// ```
    /// # use standard_collections::collections::contiguous::Vector;
    /// let mut vec = Vector::<u8>::new();
    /// for i in 0..=5 {
    ///     vec.push(i);
    /// }
    /// assert_eq!(&*vec, &[0, 1, 2, 3, 4, 5]);
    /// ```
    #[track_caller]
    pub fn push(&mut self, value: T) {
        self.try_push(value).throw()
    }

    /// Pushes `value` onto the end of the Vector, returning an error if the Vector is full and its
    /// buffer can't grow. On error, `value` is dropped and the Vector is unchanged.
    pub fn try_push(&mut self, value: T) -> Result<(), CapacityExhausted> {
        if self.len == self.cap() {
            self.try_grow()?;
        }

        // SAFETY: There is at least one uninitialized slot at len.
        unsafe { self.buf.write(self.len, value) }
        self.len += 1;
        Ok(())
    }

    /// Pops the last element off the end of the Vector, if there is one.
    ///
    /// # Examples
    /// ```
    /// # use standard_collections::collections::contiguous::Vector;
    /// let mut vec: Vector<_> = (0..5).collect();
    /// for i in (0..vec.len()).rev() {
    ///     assert_eq!(vec.pop(), Some(i));
    /// }
    /// assert_eq!(vec.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;
        // SAFETY: The slot at the old last index is initialized and is no longer counted by len,
        // so it won't be read again.
        Some(unsafe { self.buf.read(self.len) })
    }

    /// Inserts `value` at `index`, shifting all following elements to the right. `index` may be
    /// equal to `len`, which is the same as a push.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index > len`.
    ///
    /// # Panics
    /// Panics if growth is required but can't be satisfied, see [`Vector::try_insert`].
    ///
    /// # Examples
    /// ```
    /// # use standard_collections::collections::contiguous::Vector;
    /// let mut vec: Vector<_> = (0..3).collect();
    /// vec.insert(1, 100).unwrap();
    /// vec.insert(1, 200).unwrap();
    /// vec.insert(5, 300).unwrap();
    /// assert_eq!(&*vec, &[0, 200, 100, 1, 2, 300]);
    /// assert!(vec.insert(7, 400).is_err());
    /// ```
    #[track_caller]
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), IndexOutOfBounds> {
        match self.try_insert(index, value) {
            Ok(()) => Ok(()),
            Err(IndexOrCapExhausted::IndexOutOfBounds(err)) => Err(err),
            Err(IndexOrCapExhausted::CapacityExhausted(err)) => Err(err).throw(),
        }
    }

    /// Inserts `value` at `index`, returning an error for both bad indices and failed growth. The
    /// Vector is unchanged if an error is returned.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), IndexOrCapExhausted> {
        if index > self.len {
            return Err(IndexOutOfBounds {
                index,
                len: self.len,
            }.into());
        }

        if self.len == self.cap() {
            self.try_grow()?;
        }

        // SAFETY: Both ranges are within the allocation because len < cap. ptr::copy handles the
        // overlap.
        unsafe {
            let src = self.buf.slot(index);
            ptr::copy(src, src.add(1), self.len - index);
            self.buf.write(index, value);
        }
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting all following elements to the left.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use standard_collections::collections::contiguous::Vector;
    /// let mut vec: Vector<_> = "Hello world!".chars().collect();
    /// assert_eq!(vec.remove(1), Ok('e'));
    /// assert_eq!(vec.remove(4), Ok(' '));
    /// assert_eq!(vec, "Hlloworld!".chars().collect());
    /// ```
    pub fn remove(&mut self, index: usize) -> Result<T, IndexOutOfBounds> {
        self.check_index(index)?;

        // SAFETY: index < len so the slot is initialized. After reading it, the following
        // elements are shifted over it, so it is never read twice.
        let value = unsafe {
            let value = self.buf.read(index);
            let dst = self.buf.slot(index);
            ptr::copy(dst.add(1), dst, self.len - index - 1);
            value
        };
        self.len -= 1;
        Ok(value)
    }

    /// Drops all elements in the Vector, keeping the capacity.
    pub fn clear(&mut self) {
        let len = self.len;
        // Set len first so that a panicking drop can't cause a double drop.
        self.len = 0;
        // SAFETY: The first len elements were initialized and are no longer reachable.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.ptr.as_ptr().cast::<T>(), len));
        }
    }

    /// Ensures that the Vector has capacity for an additional `extra` elements.
    ///
    /// # Panics
    /// Panics if the memory can't be allocated, see [`Vector::try_reserve`].
    #[track_caller]
    pub fn reserve(&mut self, extra: usize) {
        self.try_reserve(extra).throw()
    }

    /// Ensures that the Vector has capacity for an additional `extra` elements, returning an error
    /// if the memory can't be allocated.
    pub fn try_reserve(&mut self, extra: usize) -> Result<(), CapacityExhausted> {
        let new_cap = self.len.checked_add(extra).ok_or(CapacityExhausted)?;
        if new_cap <= self.cap() {
            return Ok(());
        }

        log::debug!("Reserving Vector capacity {} -> {new_cap}", self.cap());
        self.buf.try_realloc(new_cap)
    }

    /// Shrinks the capacity of the Vector to match its length.
    pub fn shrink_to_fit(&mut self) {
        if self.len == self.cap() {
            return;
        }

        log::debug!("Shrinking Vector capacity {} -> {}", self.cap(), self.len);
        // Shrinking only fails if the allocator refuses, in which case the larger buffer remains
        // valid.
        if let Err(err) = self.buf.try_realloc(self.len) {
            log::debug!("Keeping Vector capacity {} after a failed shrink: {err}", self.cap());
        }
    }

    /// Grows the buffer by the shared growth factor, leaving the Vector untouched on failure.
    pub(crate) fn try_grow(&mut self) -> Result<(), CapacityExhausted> {
        let new_cap = buffer::grown_cap(self.cap())?;
        log::trace!("Growing Vector capacity {} -> {new_cap}", self.cap());
        self.buf.try_realloc(new_cap)
    }

    pub(crate) const fn check_index(&self, index: usize) -> Result<(), IndexOutOfBounds> {
        if index >= self.len {
            return Err(IndexOutOfBounds {
                index,
                len: self.len,
            });
        }
        Ok(())
    }
}

impl<T> Extend<T> for Vector<T> {
    fn extend<A: IntoIterator<Item = T>>(&mut self, iter: A) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(value: I) -> Self {
        let mut vec = Vector::new();
        vec.extend(value);
        vec
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
    fn from(value: [T; N]) -> Self {
        value.into_iter().collect()
    }
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;

    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;

    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).throw()
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index).throw()
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        self.clear();
        // The buffer deallocates itself afterwards.
    }
}

impl<T> Deref for Vector<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: The first len slots are initialized, properly aligned and within a single
        // allocation. The borrow of self prevents mutation for the slice's lifetime.
        unsafe { slice::from_raw_parts(self.buf.ptr.as_ptr().cast(), self.len) }
    }
}

impl<T> DerefMut for Vector<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: As with deref, with the unique borrow of self preventing any other access.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr.as_ptr().cast(), self.len) }
    }
}

impl<T> AsRef<[T]> for Vector<T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T> AsMut<[T]> for Vector<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T> Borrow<[T]> for Vector<T> {
    fn borrow(&self) -> &[T] {
        self
    }
}

impl<T> BorrowMut<[T]> for Vector<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Clone> Clone for Vector<T> {
    fn clone(&self) -> Self {
        let mut vec = Self::with_cap(self.cap());
        vec.extend(self.iter().cloned());
        vec
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T: Hash> Hash for Vector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug> Debug for Vector<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("contents", &&**self)
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}

impl<T: Debug> Display for Vector<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
