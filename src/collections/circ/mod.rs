//! Circular collection types. Currently just [`Deque`], a double-ended queue stored in a ring
//! buffer.

pub mod deque;

#[doc(inline)]
pub use deque::Deque;
