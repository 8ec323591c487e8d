//! This crate is an unbalanced binary search tree, written as a map and a set, where the order that
//! the tree is walked in is part of its type.
//!
//! # Purpose
//! Most ordered collections only ever hand out their contents in key order. The collections here
//! let the caller pick one of three depth-first orders ([`Preorder`], [`Inorder`] or
//! [`Postorder`]) as a type parameter, then walk the tree in that order, forwards or backwards,
//! with a [`Cursor`]. No traversal sequence is ever collected up front: every step is worked out
//! from the links between nodes.
//!
//! [`Preorder`]: collections::binary_tree::Preorder
//! [`Inorder`]: collections::binary_tree::Inorder
//! [`Postorder`]: collections::binary_tree::Postorder
//! [`Cursor`]: collections::binary_tree::Cursor
//!
//! # Method
//! Nodes are stored in an arena and refer to each other through generational handles rather than
//! pointers. A node owns its children and keeps a handle to its parent purely as a lookup aid.
//! This keeps the whole crate free of `unsafe` and means a stale handle is detected, rather than
//! dereferenced.
//!
//! The tree is never rebalanced. Its shape depends only on the order keys were inserted in, so the
//! caller controls what each traversal order looks like.
//!
//! # Error Handling
//! As with most collections, lookups that miss return [`None`] or `false` rather than an error.
//! Stepping a cursor off either end of the traversal returns a
//! [`TraversalExhausted`](collections::binary_tree::TraversalExhausted) error and leaves the
//! cursor where it was. Errors are strongly typed, using enums for static dispatch rather than
//! dynamic, with small structs that implement [`Error`](std::error::Error).
//!
//! # Dependencies
//! This crate depends on some derive macros because they're helpful and remove the need for some
//! very repetitive programming. Structural changes to a tree are reported through the [`log`]
//! facade at the `trace` level; no logger is installed by the crate itself.

// #![warn(missing_docs)]
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod collections;

pub(crate) mod util;
