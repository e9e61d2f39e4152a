//! A module containing [`Deque`] and associated types.
//!
//! The other included types provide owned and borrowed iteration over a Deque's elements, always
//! in logical order from front to back regardless of where the ring buffer currently wraps.
//!
//! [`Deque`] is also re-exported under the parent module.

mod deque;
mod iter;

pub use deque::*;
pub use iter::*;
