//! A module containing [`OrderedSet`] and associated types.
//!
//! The set is a red-black tree: every node owns its children, while the parent links are
//! non-owning pointers used only for rebalancing and for stepping between neighbouring nodes during
//! iteration.
//!
//! As with the hash-based collections, there is no mutable iterator over the elements of a set
//! because mutating the elements in place could break the ordering of the tree.
//!
//! [`OrderedSet`] is also re-exported under the parent module.

mod iter;
mod node;
mod ordered_set;
mod tests;

pub use iter::*;
pub(crate) use node::*;
pub use ordered_set::*;
