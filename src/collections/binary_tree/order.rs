//! The three depth-first traversal orders, as type-level tags.
//!
//! Each order knows how to find its first and last node and how to take one step in either
//! direction, using nothing but the parent and child links of the nodes. No traversal state is
//! stored in the nodes themselves, so any number of cursors can walk the same tree at once.
//!
//! Forward and backward steps are exact inverses of each other: stepping forward then back always
//! returns to the starting node, unless the forward step was past the end.

use std::fmt::Debug;
use std::hash::Hash;

use super::{Handle, NodeStore, Side};

mod sealed {
    pub trait Sealed {}
}

/// A depth-first traversal order, used as a type parameter on trees, cursors and iterators. This
/// trait is sealed: the only implementors are [`Preorder`], [`Inorder`] and [`Postorder`].
pub trait Traversal:
    sealed::Sealed + Debug + Default + Clone + Copy + PartialEq + Eq + Hash + 'static
{
    /// A human-readable name for the order.
    const NAME: &'static str;

    #[doc(hidden)]
    fn first<K, V>(store: &NodeStore<K, V>, root: Handle) -> Handle;

    #[doc(hidden)]
    fn last<K, V>(store: &NodeStore<K, V>, root: Handle) -> Handle;

    #[doc(hidden)]
    fn next<K, V>(store: &NodeStore<K, V>, handle: Handle) -> Option<Handle>;

    #[doc(hidden)]
    fn prev<K, V>(store: &NodeStore<K, V>, handle: Handle) -> Option<Handle>;
}

/// Visits a node, then its left subtree, then its right subtree. This is the order keys would
/// need to be inserted in to rebuild a tree with the same shape.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Preorder;

/// Visits a node's left subtree, then the node, then its right subtree. This is ascending key
/// order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Inorder;

/// Visits a node's left subtree, then its right subtree, then the node. Every node is visited
/// after all of its descendants.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Postorder;

impl sealed::Sealed for Preorder {}
impl sealed::Sealed for Inorder {}
impl sealed::Sealed for Postorder {}

impl Traversal for Preorder {
    const NAME: &'static str = "preorder";

    fn first<K, V>(_store: &NodeStore<K, V>, root: Handle) -> Handle {
        root
    }

    fn last<K, V>(store: &NodeStore<K, V>, root: Handle) -> Handle {
        store.descend_to_leaf(root, Side::Right)
    }

    fn next<K, V>(store: &NodeStore<K, V>, mut handle: Handle) -> Option<Handle> {
        let links = store.links(handle);
        if let Some(child) = links.left.or(links.right) {
            return Some(child);
        }

        // A leaf: climb until we leave a left subtree whose parent still has a right one.
        loop {
            let (parent, side) = store.parent_side(handle)?;
            if side == Side::Left {
                if let Some(right) = store.links(parent).right {
                    return Some(right);
                }
            }
            handle = parent;
        }
    }

    fn prev<K, V>(store: &NodeStore<K, V>, handle: Handle) -> Option<Handle> {
        let (parent, side) = store.parent_side(handle)?;
        match (side, store.links(parent).left) {
            (Side::Right, Some(left)) => Some(Self::last(store, left)),
            _ => Some(parent),
        }
    }
}

impl Traversal for Inorder {
    const NAME: &'static str = "inorder";

    fn first<K, V>(store: &NodeStore<K, V>, root: Handle) -> Handle {
        store.leftmost(root)
    }

    fn last<K, V>(store: &NodeStore<K, V>, root: Handle) -> Handle {
        store.rightmost(root)
    }

    fn next<K, V>(store: &NodeStore<K, V>, handle: Handle) -> Option<Handle> {
        match store.links(handle).right {
            Some(right) => Some(store.leftmost(right)),
            None => ascend_until_from(store, handle, Side::Left),
        }
    }

    fn prev<K, V>(store: &NodeStore<K, V>, handle: Handle) -> Option<Handle> {
        match store.links(handle).left {
            Some(left) => Some(store.rightmost(left)),
            None => ascend_until_from(store, handle, Side::Right),
        }
    }
}

impl Traversal for Postorder {
    const NAME: &'static str = "postorder";

    fn first<K, V>(store: &NodeStore<K, V>, root: Handle) -> Handle {
        store.descend_to_leaf(root, Side::Left)
    }

    fn last<K, V>(_store: &NodeStore<K, V>, root: Handle) -> Handle {
        root
    }

    fn next<K, V>(store: &NodeStore<K, V>, handle: Handle) -> Option<Handle> {
        let (parent, side) = store.parent_side(handle)?;
        match (side, store.links(parent).right) {
            (Side::Left, Some(right)) => Some(Self::first(store, right)),
            _ => Some(parent),
        }
    }

    fn prev<K, V>(store: &NodeStore<K, V>, mut handle: Handle) -> Option<Handle> {
        let links = store.links(handle);
        if let Some(child) = links.right.or(links.left) {
            return Some(child);
        }

        // A leaf: climb until we leave a right subtree whose parent still has a left one.
        loop {
            let (parent, side) = store.parent_side(handle)?;
            if side == Side::Right {
                if let Some(left) = store.links(parent).left {
                    return Some(left);
                }
            }
            handle = parent;
        }
    }
}

/// Climbs from `handle` until it is reached from a `side` child, returning that ancestor.
fn ascend_until_from<K, V>(
    store: &NodeStore<K, V>,
    mut handle: Handle,
    side: Side,
) -> Option<Handle> {
    loop {
        let (parent, from) = store.parent_side(handle)?;
        if from == side {
            return Some(parent);
        }
        handle = parent;
    }
}
