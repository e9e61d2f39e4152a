use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant, TryInto};

/// An index was outside of the valid range of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfBounds {
    /// The index that was requested.
    pub index: usize,
    /// The length of the collection at the time.
    pub len: usize,
}

impl Display for IndexOutOfBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Index {} out of bounds for collection with {} elements!", self.index, self.len)
    }
}

impl Error for IndexOutOfBounds {}

/// An element was requested from a collection that doesn't contain any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyCollection;

impl Display for EmptyCollection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Attempted to access an element of an empty collection!")
    }
}

impl Error for EmptyCollection {}

/// A collection couldn't grow, either because the requested layout exceeds [`isize::MAX`] bytes
/// or because the allocator refused the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityExhausted;

impl Display for CapacityExhausted {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Capacity exhausted!")
    }
}

impl Error for CapacityExhausted {}

/// The errors that can occur when inserting at an index, which may need the collection to grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From, TryInto, IsVariant)]
pub enum IndexOrCapExhausted {
    /// The index was past the end of the collection.
    IndexOutOfBounds(IndexOutOfBounds),
    /// The collection was full and couldn't grow.
    CapacityExhausted(CapacityExhausted),
}
