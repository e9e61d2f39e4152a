//! Tree-based collection types. Currently just [`OrderedSet`], a set of unique elements kept in
//! ascending order by a red-black tree.

pub mod set;

#[doc(inline)]
pub use set::OrderedSet;
