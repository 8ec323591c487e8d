use std::marker::PhantomData;

use crate::collections::binary_tree::{Handle, Traversal};

/// The location of a node in a tree, detached from any borrow of the tree. Obtained from
/// [`Cursor::position`](super::Cursor::position) and turned back into a cursor with
/// [`BinaryTreeMap::cursor_at`](crate::collections::binary_tree::BinaryTreeMap::cursor_at).
///
/// Unlike cursors, positions compare by identity: two positions are equal only if they refer to
/// the same node. A position only has meaning for the tree it was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position<O: Traversal> {
    pub(crate) handle: Handle,
    pub(crate) _order: PhantomData<O>,
}

impl<O: Traversal> Position<O> {
    pub(crate) const fn new(handle: Handle) -> Position<O> {
        Position {
            handle,
            _order: PhantomData,
        }
    }
}
