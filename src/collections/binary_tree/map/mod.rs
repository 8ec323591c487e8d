//! A module containing [`BinaryTreeMap`] and associated types.
//!
//! Currently, the only other included types are for iteration, providing owned and borrowed
//! iteration over the entries of a map in its traversal order. There is no mutable iterator,
//! because mutating keys in place would break the ordering of the tree.
//!
//! [`BinaryTreeMap`] is also re-exported under the parent module.

mod binary_tree_map;
mod iter;
mod tests;

pub use binary_tree_map::*;
pub use iter::*;
