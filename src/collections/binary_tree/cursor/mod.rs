//! A module containing [`Cursor`], the bidirectional traversal type for binary tree collections,
//! along with its accompanying [`State`] and [`Position`] types.
//!
//! A [`Cursor`] borrows its tree, so the tree can't change while it is being walked. To mutate a
//! tree between steps, take a [`Position`] from the cursor, drop the cursor, mutate the tree and
//! then reattach with [`BinaryTreeMap::cursor_at`](super::BinaryTreeMap::cursor_at). Reattaching
//! fails with [`InvalidPosition`](super::InvalidPosition) if the node has been removed in the
//! meantime.

mod cursor;
mod position;
mod state;

pub use cursor::*;
pub use position::*;
pub use state::*;
