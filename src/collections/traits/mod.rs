//! Traits shared between collections. These describe the capabilities that a collection requires
//! from its elements (an ordering or a hashing scheme), as well as set algebra over sorted sets.

pub mod hashing;
pub mod order;
pub mod set;

#[doc(inline)]
pub use hashing::{DefaultHashing, FnHashing, KeyHashing};
#[doc(inline)]
pub use order::{Comparator, NaturalOrder, by_key};
#[doc(inline)]
pub use set::Set;
