use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::{Index, IndexMut};
use std::ptr;

use super::{Iter, IterMut};
use crate::collections::contiguous::buffer::{self, RawBuffer};
use crate::util::error::{CapacityExhausted, EmptyCollection, IndexOutOfBounds};
use crate::util::option::OptionExtension;
use crate::util::result::ResultExtension;

/// A double-ended queue, implemented as a ring buffer.
///
/// Logical index `i` is stored at physical index `(head + i) % cap`. When a push finds the Deque
/// full, the buffer doubles in size (with a minimum of 4) and the elements are laid out again in
/// logical order from physical index 0.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Deque.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `front/back` | `O(1)` |
/// | `push_front/back` | `O(1)`*, `O(n)` |
/// | `pop_front/back` | `O(1)` |
/// | `get` | `O(1)` |
/// | `contains` | `O(n)` |
///
/// \* If the Deque is full, pushing will take `O(n)` to grow and re-linearize the buffer.
pub struct Deque<T> {
    pub(crate) buf: RawBuffer<T>,
    pub(crate) head: usize,
    pub(crate) len: usize,
}

impl<T> Deque<T> {
    /// Creates a new Deque with capacity 0. Memory will be allocated when the first element is
    /// pushed.
    pub const fn new() -> Deque<T> {
        Deque {
            buf: RawBuffer::new(),
            head: 0,
            len: 0,
        }
    }

    /// Creates a new Deque with capacity exactly equal to `cap`.
    ///
    /// # Panics
    /// Panics if the allocation can't be made.
    #[track_caller]
    pub fn with_cap(cap: usize) -> Deque<T> {
        Deque::try_with_cap(cap).throw()
    }

    /// Creates a new Deque with capacity exactly equal to `cap`, returning an error if the memory
    /// can't be allocated.
    pub fn try_with_cap(cap: usize) -> Result<Deque<T>, CapacityExhausted> {
        Ok(Deque {
            buf: RawBuffer::try_with_cap(cap)?,
            head: 0,
            len: 0,
        })
    }

    /// Returns the number of elements in the Deque.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Deque contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current capacity of the Deque.
    pub const fn cap(&self) -> usize {
        self.buf.cap()
    }

    /// Adds `value` to the front of the Deque.
    ///
    /// # Panics
    /// Panics if growth is required but can't be satisfied, see [`Deque::try_push_front`].
    ///
    /// # Examples
    /// ```
    /// # use standard_collections::collections::circ::Deque;
    /// let mut deque = Deque::new();
    /// deque.push_front("A");
    /// deque.push_back("B");
    /// deque.push_front("C");
    /// assert!(deque.iter().eq(&["C", "A", "B"]));
    /// ```
    #[track_caller]
    pub fn push_front(&mut self, value: T) {
        self.try_push_front(value).throw()
    }

    /// Adds `value` to the front of the Deque, returning an error if the Deque is full and can't
    /// grow. On error, `value` is dropped and the Deque is unchanged.
    pub fn try_push_front(&mut self, value: T) -> Result<(), CapacityExhausted> {
        if self.len == self.cap() {
            self.try_grow()?;
        }

        self.head = self.wrap_sub(self.head, 1);
        // SAFETY: The Deque isn't full, so the slot before the old head is uninitialized.
        unsafe { self.buf.write(self.head, value) }
        self.len += 1;
        Ok(())
    }

    /// Adds `value` to the back of the Deque.
    ///
    /// # Panics
    /// Panics if growth is required but can't be satisfied, see [`Deque::try_push_back`].
    #[track_caller]
    pub fn push_back(&mut self, value: T) {
        self.try_push_back(value).throw()
    }

    /// Adds `value` to the back of the Deque, returning an error if the Deque is full and can't
    /// grow. On error, `value` is dropped and the Deque is unchanged.
    pub fn try_push_back(&mut self, value: T) -> Result<(), CapacityExhausted> {
        if self.len == self.cap() {
            self.try_grow()?;
        }

        let index = self.physical_index(self.len);
        // SAFETY: The Deque isn't full, so the slot after the last element is uninitialized.
        unsafe { self.buf.write(index, value) }
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the first element of the Deque.
    ///
    /// # Errors
    /// Returns [`EmptyCollection`] if the Deque has no elements.
    ///
    /// # Examples
    /// ```
    /// # use standard_collections::collections::circ::Deque;
    /// let mut deque = Deque::new();
    /// deque.push_back('a');
    /// deque.push_back('b');
    /// assert_eq!(deque.pop_front(), Ok('a'));
    /// assert_eq!(deque.pop_front(), Ok('b'));
    /// assert!(deque.pop_front().is_err());
    /// ```
    pub fn pop_front(&mut self) -> Result<T, EmptyCollection> {
        if self.is_empty() {
            return Err(EmptyCollection);
        }

        // SAFETY: The Deque isn't empty, so head is initialized. Moving head forward means that it
        // won't be read again.
        let value = unsafe { self.buf.read(self.head) };
        self.head = self.physical_index(1);
        self.len -= 1;
        Ok(value)
    }

    /// Removes and returns the last element of the Deque.
    ///
    /// # Errors
    /// Returns [`EmptyCollection`] if the Deque has no elements.
    pub fn pop_back(&mut self) -> Result<T, EmptyCollection> {
        if self.is_empty() {
            return Err(EmptyCollection);
        }

        self.len -= 1;
        // SAFETY: The old last element is initialized and is no longer counted by len.
        Ok(unsafe { self.buf.read(self.physical_index(self.len)) })
    }

    /// Returns a reference to the first element of the Deque.
    ///
    /// # Errors
    /// Returns [`EmptyCollection`] if the Deque has no elements.
    pub fn front(&self) -> Result<&T, EmptyCollection> {
        self.get(0).map_err(|_| EmptyCollection)
    }

    /// Returns a mutable reference to the first element of the Deque.
    ///
    /// # Errors
    /// Returns [`EmptyCollection`] if the Deque has no elements.
    pub fn front_mut(&mut self) -> Result<&mut T, EmptyCollection> {
        self.get_mut(0).map_err(|_| EmptyCollection)
    }

    /// Returns a reference to the last element of the Deque.
    ///
    /// # Errors
    /// Returns [`EmptyCollection`] if the Deque has no elements.
    pub fn back(&self) -> Result<&T, EmptyCollection> {
        let last = self.len.checked_sub(1).or_empty()?;
        self.get(last).map_err(|_| EmptyCollection)
    }

    /// Returns a mutable reference to the last element of the Deque.
    ///
    /// # Errors
    /// Returns [`EmptyCollection`] if the Deque has no elements.
    pub fn back_mut(&mut self) -> Result<&mut T, EmptyCollection> {
        let last = self.len.checked_sub(1).or_empty()?;
        self.get_mut(last).map_err(|_| EmptyCollection)
    }

    /// Returns a reference to the element at the logical `index`, counting from the front.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.check_index(index)?;
        // SAFETY: index < len, so its physical slot is initialized.
        Ok(unsafe { self.buf.get(self.physical_index(index)) })
    }

    /// Returns a mutable reference to the element at the logical `index`, counting from the
    /// front.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        self.check_index(index)?;
        let physical = self.physical_index(index);
        // SAFETY: index < len, so its physical slot is initialized.
        Ok(unsafe { self.buf.get_mut(physical) })
    }

    /// Returns true if the Deque contains an element equal to `item`.
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|e| e == item)
    }

    /// Drops all elements in the Deque, keeping the capacity.
    pub fn clear(&mut self) {
        while self.pop_back().is_ok() {}
        self.head = 0;
    }

    /// Returns an iterator over references to the elements of the Deque, from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        self.into_iter()
    }

    /// Returns an iterator over mutable references to the elements of the Deque, from front to
    /// back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.into_iter()
    }

    /// Maps a logical index to its physical position in the buffer. The result is only meaningful
    /// when the capacity is non-zero.
    pub(crate) const fn physical_index(&self, index: usize) -> usize {
        let cap = self.cap();
        if cap == 0 {
            return 0;
        }
        // head < cap and index <= cap. Zero sized elements can have a capacity of usize::MAX, so
        // the sum is never formed directly.
        let room = cap - self.head;
        if index < room {
            self.head + index
        } else {
            index - room
        }
    }

    /// Steps `index` back by `sub` slots, wrapping around the start of the buffer. Requires
    /// `index < cap` and `sub <= cap`.
    const fn wrap_sub(&self, index: usize, sub: usize) -> usize {
        if index >= sub {
            index - sub
        } else {
            self.cap() - (sub - index)
        }
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

    /// Grows the buffer and lays the elements out again in logical order, starting at physical
    /// index 0. The new buffer is allocated before anything is moved, so a failure leaves the
    /// Deque untouched.
    pub(crate) fn try_grow(&mut self) -> Result<(), CapacityExhausted> {
        let old_cap = self.cap();
        let new_cap = buffer::grown_cap(old_cap)?;
        let new_buf = RawBuffer::try_with_cap(new_cap)?;

        log::trace!("Growing Deque capacity {old_cap} -> {new_cap}");

        // The elements occupy head..head + len, possibly wrapping past the end of the buffer.
        let first_run = usize::min(self.len, old_cap - self.head);
        let second_run = self.len - first_run;

        // SAFETY: Both runs are initialized in the old buffer and the new buffer has room for all
        // len elements. The buffers are separate allocations, so they don't overlap. The old
        // buffer never drops any T, so the moved values are only owned by the new buffer.
        unsafe {
            ptr::copy_nonoverlapping(self.buf.slot(self.head), new_buf.slot(0), first_run);
            ptr::copy_nonoverlapping(self.buf.slot(0), new_buf.slot(first_run), second_run);
        }

        self.buf = new_buf;
        self.head = 0;
        Ok(())
    }
}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Deque::new();
        deque.extend(iter);
        deque
    }
}

impl<T> Index<usize> for Deque<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).throw()
    }
}

impl<T> IndexMut<usize> for Deque<T> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index).throw()
    }
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Deque<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for Deque<T> {
    fn clone(&self) -> Self {
        let mut deque = Deque::with_cap(self.len);
        deque.extend(self.iter().cloned());
        deque
    }
}

impl<T: PartialEq> PartialEq for Deque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Deque<T> {}

impl<T: Hash> Hash for Deque<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for item in self {
            item.hash(state);
        }
    }
}

impl<T: Debug> Debug for Deque<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deque")
            .field("contents", &DebugEntries(self))
            .field("head", &self.head)
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}

impl<T: Debug> Display for Deque<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

struct DebugEntries<'a, T>(&'a Deque<T>);

impl<T: Debug> Debug for DebugEntries<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}
