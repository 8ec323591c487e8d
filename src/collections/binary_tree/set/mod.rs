//! A module containing [`BinaryTreeSet`] and associated types.
//!
//! The set is a thin wrapper around a [`BinaryTreeMap`](super::BinaryTreeMap) with `()` values,
//! so inserting an element that is already present does nothing at all.
//!
//! [`BinaryTreeSet`] is also re-exported under the parent module.

mod binary_tree_set;
mod iter;

pub use binary_tree_set::*;
pub use iter::*;
