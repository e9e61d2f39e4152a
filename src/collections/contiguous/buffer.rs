//! The raw backing store shared by [`Vector`](super::Vector) and
//! [`Deque`](crate::collections::circ::Deque), along with the growth policy they have in common.

use std::alloc::{self, Layout};
use std::cmp;
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ptr::NonNull;

use crate::util::error::CapacityExhausted;

/// The smallest non-zero capacity that a growing collection will allocate.
pub(crate) const MIN_CAP: usize = 4;

pub(crate) const GROWTH_FACTOR: usize = 2;

/// Calculates the capacity that a full collection with `cap` slots should grow to.
///
/// # Errors
/// Returns [`CapacityExhausted`] if doubling would overflow a [`usize`].
pub(crate) fn grown_cap(cap: usize) -> Result<usize, CapacityExhausted> {
    cap.checked_mul(GROWTH_FACTOR)
        .map(|new_cap| cmp::max(new_cap, MIN_CAP))
        .ok_or(CapacityExhausted)
}

/// An allocation of `cap` slots of `MaybeUninit<T>`. RawBuffer never tracks which slots are
/// initialized, so it never drops any `T`. That is the responsibility of the owning collection.
pub(crate) struct RawBuffer<T> {
    pub(crate) ptr: NonNull<MaybeUninit<T>>,
    pub(crate) cap: usize,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> RawBuffer<T> {
    /// Creates a RawBuffer with capacity 0 that doesn't allocate.
    pub(crate) const fn new() -> RawBuffer<T> {
        RawBuffer {
            ptr: NonNull::dangling(),
            cap: 0,
            _phantom: PhantomData,
        }
    }

    /// Allocates a RawBuffer with exactly `cap` slots.
    pub(crate) fn try_with_cap(cap: usize) -> Result<RawBuffer<T>, CapacityExhausted> {
        let mut buf = RawBuffer::new();
        buf.try_realloc(cap)?;
        Ok(buf)
    }

    pub(crate) const fn cap(&self) -> usize {
        self.cap
    }

    /// Returns a raw pointer to the slot at `index`.
    ///
    /// # Safety
    /// `index` must be less than or equal to the capacity.
    pub(crate) const unsafe fn slot(&self, index: usize) -> *mut MaybeUninit<T> {
        // SAFETY: The caller guarantees that index is within (or one past) the allocation.
        unsafe { self.ptr.as_ptr().add(index) }
    }

    /// Writes `value` into the slot at `index` without dropping its previous contents.
    ///
    /// # Safety
    /// `index` must be less than the capacity.
    pub(crate) unsafe fn write(&mut self, index: usize, value: T) {
        // SAFETY: The caller guarantees that index is in bounds.
        unsafe { self.slot(index).write(MaybeUninit::new(value)) }
    }

    /// Moves the value out of the slot at `index`, leaving it logically uninitialized.
    ///
    /// # Safety
    /// `index` must be less than the capacity and the slot must be initialized. The slot must not
    /// be read again until it is rewritten.
    pub(crate) unsafe fn read(&self, index: usize) -> T {
        // SAFETY: The caller guarantees that index is in bounds and initialized.
        unsafe { self.slot(index).read().assume_init() }
    }

    /// # Safety
    /// `index` must be less than the capacity and the slot must be initialized.
    pub(crate) unsafe fn get(&self, index: usize) -> &T {
        // SAFETY: The caller guarantees that index is in bounds and initialized.
        unsafe { (*self.slot(index)).assume_init_ref() }
    }

    /// # Safety
    /// `index` must be less than the capacity and the slot must be initialized.
    pub(crate) unsafe fn get_mut(&mut self, index: usize) -> &mut T {
        // SAFETY: The caller guarantees that index is in bounds and initialized.
        unsafe { (*self.slot(index)).assume_init_mut() }
    }

    /// Reallocates the buffer to hold exactly `new_cap` slots. The first `min(cap, new_cap)` slots
    /// keep their contents. If this returns an error, the buffer is left exactly as it was.
    ///
    /// Shrinking past initialized slots leaks them, callers drop those values first.
    pub(crate) fn try_realloc(&mut self, new_cap: usize) -> Result<(), CapacityExhausted> {
        if new_cap == self.cap {
            return Ok(());
        }

        if size_of::<T>() == 0 {
            // Zero sized types never need memory, the dangling pointer is valid for all of them.
            self.cap = new_cap;
            return Ok(());
        }

        let new_layout = Self::make_layout(new_cap)?;

        let new_ptr = match (self.cap, new_cap) {
            (_, 0) => {
                self.dealloc();
                NonNull::dangling()
            },
            (0, _) => {
                // SAFETY: Zero-sized layouts have been guarded against.
                NonNull::new(unsafe { alloc::alloc(new_layout) }.cast())
                    .ok_or(CapacityExhausted)?
            },
            (_, _) => {
                let old_layout = Self::make_layout(self.cap)?;
                // SAFETY: ptr was allocated with old_layout in the global allocator and the new
                // size is non-zero and fits in isize::MAX. On failure, the old block is untouched.
                NonNull::new(unsafe {
                    alloc::realloc(self.ptr.as_ptr().cast(), old_layout, new_layout.size())
                }.cast()).ok_or(CapacityExhausted)?
            },
        };

        self.ptr = new_ptr;
        self.cap = new_cap;
        Ok(())
    }

    pub(crate) fn make_layout(cap: usize) -> Result<Layout, CapacityExhausted> {
        Layout::array::<MaybeUninit<T>>(cap).map_err(|_| CapacityExhausted)
    }

    fn dealloc(&mut self) {
        if self.cap == 0 || size_of::<T>() == 0 {
            return;
        }

        if let Ok(layout) = Self::make_layout(self.cap) {
            // SAFETY: ptr was allocated in the global allocator with this exact layout.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) }
        }
    }
}

impl<T> Default for RawBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        self.dealloc();
    }
}

// SAFETY: RawBuffer uniquely owns its allocation.
unsafe impl<T: Send> Send for RawBuffer<T> {}
// SAFETY: RawBuffer exposes no interior mutability.
unsafe impl<T: Sync> Sync for RawBuffer<T> {}
