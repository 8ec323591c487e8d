//! Binary search tree collections whose traversal order is a type parameter. Primarily revolves
//! around [`BinaryTreeMap`], [`BinaryTreeSet`] and the accompanying [`Cursor`] type.
//!
//! Each tree carries one of the [`Traversal`] tags, [`Preorder`] (the default), [`Inorder`] or
//! [`Postorder`], which decides the order its cursors and iterators walk the nodes in. The same
//! tree can also be walked in another order with [`BinaryTreeMap::iter_in`] and friends.
//!
//! ```
//! use traversal_tree::collections::binary_tree::{BinaryTreeSet, Inorder};
//!
//! let preorder: BinaryTreeSet<u32> = [100, 20, 10, 200, 150, 300].into();
//! assert!(preorder.iter().eq(&[100, 20, 10, 200, 150, 300]));
//!
//! let inorder: BinaryTreeSet<u32, Inorder> = [100, 20, 10, 200, 150, 300].into();
//! assert!(inorder.iter().eq(&[10, 20, 100, 150, 200, 300]));
//!
//! // Equality always compares elements in key order, whatever the traversal tag.
//! assert_eq!(preorder, inorder);
//! ```

pub mod cursor;
pub mod map;
#[cfg(feature = "set")]
pub mod set;

mod node;
mod order;

#[doc(inline)]
pub use cursor::{Cursor, Position, State};
#[doc(inline)]
pub use map::BinaryTreeMap;
pub(crate) use node::*;
pub use order::*;
#[cfg(feature = "set")]
#[doc(inline)]
pub use set::BinaryTreeSet;

#[doc(inline)]
pub use crate::util::error::{
    CursorError, Direction, IndexOutOfBounds, InvalidPosition, TraversalExhausted,
};
