use std::fmt::{self, Debug, Formatter};
use std::mem;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_STORE_ID: AtomicU64 = AtomicU64::new(1);

/// A generational index into a [`NodeStore`]. The generation is bumped every time a slot is freed,
/// so a handle to a removed node can never be mistaken for whatever reuses its slot. The id of the
/// owning store is carried too, so a handle is never valid in any other tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: usize,
    generation: u32,
    store: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// The links of a node. Children are owned by the node, the parent is only a lookup aid for
/// walking back up the tree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Links {
    pub parent: Option<Handle>,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
}

impl Links {
    pub const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

pub struct Node<K, V> {
    pub key: K,
    pub value: V,
    pub links: Links,
}

impl<K, V> Node<K, V> {
    pub const fn new(key: K, value: V, parent: Option<Handle>) -> Node<K, V> {
        Node {
            key,
            value,
            links: Links {
                parent,
                left: None,
                right: None,
            },
        }
    }

    pub fn into_tuple(self) -> (K, V) {
        (self.key, self.value)
    }

    pub const fn tuple(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }
}

struct Slot<K, V> {
    generation: u32,
    entry: Entry<K, V>,
}

enum Entry<K, V> {
    Occupied(Node<K, V>),
    // The entry has been moved out by an owned iterator, but the links are still needed to keep
    // stepping through the rest of the tree.
    Drained(Links),
    Vacant { next_free: Option<usize> },
}

use Entry::*;

/// The arena that owns every node of a tree. Nothing else allocates or frees nodes.
///
/// A node keeps its slot for as long as it is in the tree, and an entry never moves to another
/// node, so a handle always refers to the same entry until that entry is removed.
pub struct NodeStore<K, V> {
    slots: Vec<Slot<K, V>>,
    free: Option<usize>,
    // Assigned on the first allocation, 0 until then.
    id: u64,
}

impl<K, V> NodeStore<K, V> {
    pub const fn new() -> NodeStore<K, V> {
        NodeStore {
            slots: Vec::new(),
            free: None,
            id: 0,
        }
    }

    pub fn alloc(&mut self, node: Node<K, V>) -> Handle {
        if self.id == 0 {
            self.id = NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed);
        }
        let store = self.id;

        match self.free {
            Some(index) => {
                let slot = &mut self.slots[index];
                self.free = match slot.entry {
                    Vacant { next_free } => next_free,
                    _ => unreachable!("free list points at an occupied slot"),
                };
                slot.entry = Occupied(node);
                Handle {
                    index,
                    generation: slot.generation,
                    store,
                }
            },
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    entry: Occupied(node),
                });
                Handle {
                    index: self.slots.len() - 1,
                    generation: 0,
                    store,
                }
            },
        }
    }

    /// Releases the slot behind `handle` and returns its node. The caller is responsible for
    /// unlinking the node from the rest of the tree first.
    pub fn free(&mut self, handle: Handle) -> Node<K, V> {
        let next_free = self.free;
        let slot = self.live_slot_mut(handle);
        slot.generation = slot.generation.wrapping_add(1);
        match mem::replace(&mut slot.entry, Vacant { next_free }) {
            Occupied(node) => {
                self.free = Some(handle.index);
                node
            },
            _ => unreachable!("handle checked to be occupied"),
        }
    }

    /// Moves the entry out of the node behind `handle` while keeping its links in place.
    pub fn drain(&mut self, handle: Handle) -> (K, V) {
        let slot = self.live_slot_mut(handle);
        let links = match &slot.entry {
            Occupied(node) => node.links,
            _ => unreachable!("handle checked to be occupied"),
        };
        match mem::replace(&mut slot.entry, Drained(links)) {
            Occupied(node) => node.into_tuple(),
            _ => unreachable!("handle checked to be occupied"),
        }
    }

    /// Frees every slot, bumping each generation so no old handle stays valid.
    pub fn clear(&mut self) {
        self.free = None;
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if !matches!(slot.entry, Vacant { .. }) {
                slot.generation = slot.generation.wrapping_add(1);
            }
            slot.entry = Vacant { next_free: self.free };
            self.free = Some(index);
        }
    }

    /// Returns the slot behind `handle` if the handle belongs to this store and is current.
    fn slot(&self, handle: Handle) -> Option<&Slot<K, V>> {
        self.slots
            .get(handle.index)
            .filter(|slot| handle.store == self.id && slot.generation == handle.generation)
    }

    fn slot_mut(&mut self, handle: Handle) -> Option<&mut Slot<K, V>> {
        let id = self.id;
        self.slots
            .get_mut(handle.index)
            .filter(|slot| handle.store == id && slot.generation == handle.generation)
    }

    pub fn get(&self, handle: Handle) -> Option<&Node<K, V>> {
        match self.slot(handle) {
            Some(Slot {
                entry: Occupied(node),
                ..
            }) => Some(node),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut Node<K, V>> {
        match self.slot_mut(handle) {
            Some(Slot {
                entry: Occupied(node),
                ..
            }) => Some(node),
            _ => None,
        }
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    /// Returns the node behind a handle that the tree itself holds.
    ///
    /// # Panics
    /// Panics if the handle is stale, which would mean the tree's links are corrupt.
    pub fn node(&self, handle: Handle) -> &Node<K, V> {
        match self.get(handle) {
            Some(node) => node,
            None => panic!("tree link points at a freed node: {handle:?}"),
        }
    }

    /// # Panics
    /// Panics if the handle is stale, which would mean the tree's links are corrupt.
    pub fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        match self.get_mut(handle) {
            Some(node) => node,
            None => panic!("tree link points at a freed node: {handle:?}"),
        }
    }

    /// Returns the links of a node, including one that has been drained by an owned iterator.
    ///
    /// # Panics
    /// Panics if the handle is stale.
    pub fn links(&self, handle: Handle) -> Links {
        match self.slot(handle).map(|slot| &slot.entry) {
            Some(Occupied(node)) => node.links,
            Some(Drained(links)) => *links,
            _ => panic!("tree link points at a freed node: {handle:?}"),
        }
    }

    fn links_mut(&mut self, handle: Handle) -> &mut Links {
        &mut self.node_mut(handle).links
    }

    fn live_slot_mut(&mut self, handle: Handle) -> &mut Slot<K, V> {
        match self.slot_mut(handle) {
            Some(slot) if !matches!(slot.entry, Vacant { .. }) => slot,
            _ => panic!("tree link points at a freed node: {handle:?}"),
        }
    }

    /// Returns the parent of a node and which of the parent's children it is.
    pub fn parent_side(&self, handle: Handle) -> Option<(Handle, Side)> {
        let parent = self.links(handle).parent?;
        if self.links(parent).left == Some(handle) {
            Some((parent, Side::Left))
        } else {
            Some((parent, Side::Right))
        }
    }

    /// Replaces one of `parent`'s child slots, relinking the new child back to `parent`.
    pub fn set_child(&mut self, parent: Handle, side: Side, child: Option<Handle>) {
        let links = self.links_mut(parent);
        match side {
            Side::Left => links.left = child,
            Side::Right => links.right = child,
        }
        if let Some(child) = child {
            self.links_mut(child).parent = Some(parent);
        }
    }

    /// Follows `side` children until there are none left.
    pub fn extreme(&self, mut handle: Handle, side: Side) -> Handle {
        while let Some(child) = self.links(handle).child(side) {
            handle = child;
        }
        handle
    }

    pub fn leftmost(&self, handle: Handle) -> Handle {
        self.extreme(handle, Side::Left)
    }

    pub fn rightmost(&self, handle: Handle) -> Handle {
        self.extreme(handle, Side::Right)
    }

    /// Descends from `handle`, taking the `first` side whenever it exists and the other side
    /// otherwise, until a leaf is reached.
    pub fn descend_to_leaf(&self, mut handle: Handle, first: Side) -> Handle {
        loop {
            let links = self.links(handle);
            let (preferred, other) = match first {
                Side::Left => (links.left, links.right),
                Side::Right => (links.right, links.left),
            };
            match preferred.or(other) {
                Some(child) => handle = child,
                None => break handle,
            }
        }
    }

    /// Deep-copies the subtree rooted at `root` in `source` into this store, below `parent`.
    /// Returns the new root, along with the copy of `track` if it was part of the subtree.
    ///
    /// Uses an explicit work stack so degenerate trees can't overflow the call stack.
    pub fn copy_subtree(
        &mut self,
        source: &NodeStore<K, V>,
        root: Handle,
        parent: Option<(Handle, Side)>,
        track: Option<Handle>,
    ) -> (Handle, Option<Handle>)
    where
        K: Clone,
        V: Clone,
    {
        let mut new_root = None;
        let mut tracked = None;
        let mut pending = vec![(root, parent)];

        while let Some((original, parent)) = pending.pop() {
            let node = source.node(original);
            let copy = self.alloc(Node::new(node.key.clone(), node.value.clone(), None));

            if let Some((parent, side)) = parent {
                self.set_child(parent, side, Some(copy));
            }
            if new_root.is_none() {
                new_root = Some(copy);
            }
            if track == Some(original) {
                tracked = Some(copy);
            }

            if let Some(right) = node.links.right {
                pending.push((right, Some((copy, Side::Right))));
            }
            if let Some(left) = node.links.left {
                pending.push((left, Some((copy, Side::Left))));
            }
        }

        match new_root {
            Some(new_root) => (new_root, tracked),
            None => unreachable!("the work stack always starts with the root"),
        }
    }
}

impl<K, V> Default for NodeStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders a tree sideways, one node per line in key order. Left children sit above their parent
/// and right children below, indented by their depth.
pub struct Render<'a, K, V> {
    pub store: &'a NodeStore<K, V>,
    pub root: Option<Handle>,
}

impl<K: Debug, V: Debug> Debug for Render<'_, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Some(root) = self.root else {
            return write!(f, "-");
        };

        // Nodes whose left subtree is still being written, with their depth and side.
        let mut pending = vec![];
        let mut curr = Some((root, 0_usize, None));
        loop {
            while let Some((handle, depth, side)) = curr {
                pending.push((handle, depth, side));
                let left = self.store.links(handle).left;
                curr = left.map(|left| (left, depth + 1, Some(Side::Left)));
            }
            let Some((handle, depth, side)) = pending.pop() else {
                break;
            };

            let node = self.store.node(handle);
            let branch = match side {
                Some(Side::Left) => "┌── ",
                Some(Side::Right) => "└── ",
                None => "",
            };
            write!(
                f,
                "\n{:indent$}{branch}({:?}: {:?})",
                "",
                node.key,
                node.value,
                indent = 4 * depth.saturating_sub(1),
            )?;
            curr = node.links.right.map(|right| (right, depth + 1, Some(Side::Right)));
        }
        writeln!(f)
    }
}
