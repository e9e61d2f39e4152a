//! Various general-purpose collection types.
//!
//! # Purpose
//! Four containers, each owning its storage outright: a growable [`Vector`](contiguous::Vector),
//! a ring-buffer [`Deque`](circ::Deque), a red-black [`OrderedSet`](tree::OrderedSet) and a
//! chained [`HashMap`](hash::HashMap). The set and map take their ordering or hashing from a
//! capability supplied at construction, see [`traits`].
//!
//! # Method
//! Applicable types here implement [`Deref<Target = [T]>`](std::ops::Deref) (and DerefMut), which
//! saves writing some of the more repetitive functionality.
//!
//! # Errors
//! Recoverable failures are returned as one of the error types re-exported here. Lookups that
//! can't find a key return [`None`] instead.

#[cfg(feature = "circ")]
pub mod circ;
#[cfg(feature = "contiguous")]
pub mod contiguous;
#[cfg(feature = "hash")]
pub mod hash;
#[cfg(feature = "traits")]
pub mod traits;
#[cfg(feature = "tree")]
pub mod tree;

#[doc(inline)]
pub use crate::util::error::{CapacityExhausted, EmptyCollection, IndexOrCapExhausted, IndexOutOfBounds};
