//! Hash-based collections, storing their entries in buckets picked by a [`KeyHashing`]
//! capability.
//!
//! [`KeyHashing`]: crate::collections::traits::KeyHashing

#![warn(missing_docs)]

pub mod map;

#[doc(inline)]
pub use map::HashMap;
