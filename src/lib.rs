//! This crate is a small collections library, written from the ground up over raw allocations
//! rather than on top of [`Vec`] or the other collections in [`std`].
//!
//! # Purpose
//! Writing these data structures is a way to understand them properly: how a buffer grows, how a
//! ring buffer wraps, how a red-black tree stays balanced and how a hash table redistributes its
//! entries. The APIs take a lot of inspiration from [`std`] without trying to copy it.
//!
//! # Error Handling
//! Errors are strongly typed, using structs (mostly ZSTs) that implement
//! [`Error`](std::error::Error) and enums to combine them, rather than dynamic dispatch. Anything
//! a caller can reasonably recover from is returned as a [`Result`] or an [`Option`]: indexing out
//! of bounds, peeking into an empty collection or looking up a missing key.
//!
//! Running out of capacity is different. Having to handle a possible allocation failure every time
//! you push into a [`Vector`](collections::contiguous::Vector) isn't ergonomic, so the plain
//! methods panic and `try_` variants return
//! [`CapacityExhausted`](collections::CapacityExhausted) instead, leaving the collection as it was.
//!
//! # Logging
//! Structural changes (growing a buffer, rehashing a map) are reported through the [`log`] facade
//! at the `trace` level, with explicit capacity changes at `debug`. No logger is installed by this
//! crate.
//!
//! # Dependencies
//! Other than [`log`], this crate only depends on some derive macros because they're helpful and
//! remove the need for some very repetitive programming.

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

#[cfg(feature = "collections")]
pub mod collections;

pub(crate) mod util;
