//! Ordered collection types.
//!
//! # Purpose
//! I wrote these types to learn about binary search trees themselves, but also concepts such as
//! arenas, cursors, iterators and traversal orders.

#[cfg(feature = "map")]
pub mod binary_tree;
