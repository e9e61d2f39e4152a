//! Contiguous collection types. Namely [`Vector`], a growable sequence stored in a single
//! allocation.
#![warn(missing_docs)]

pub(crate) mod buffer;
pub mod vector;

#[doc(inline)]
pub use vector::Vector;
