use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::marker::PhantomData;
use std::mem;

use log::trace;

use super::Iter;
use crate::collections::binary_tree::{
    Cursor, Handle, Inorder, Node, NodeStore, Position, Preorder, Render, Side, Traversal,
};
#[doc(inline)]
pub use crate::util::error::{CursorError, IndexOutOfBounds, InvalidPosition};

/// An unbalanced binary search tree mapping unique keys to values, walked in the order given by
/// `O`.
///
/// Inserting an existing key keeps whichever of the two values is smaller, see
/// [`insert`](BinaryTreeMap::insert).
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of entries in the BinaryTreeMap.
/// - `h`: The height of the tree, between `log2 n` and `n` depending on insertion order.
/// - `i`: The index of the entry in question, in traversal order.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(h)` |
/// | `remove` | `O(h)` |
/// | `get/contains` | `O(h)` |
/// | `cursor_front/back` | `O(h)` |
/// | cursor step | `O(h)`, amortised `O(1)` over a full walk |
/// | `nth` | `O(i * h)` worst case |
/// | `clone` | `O(n)` |
///
/// The tree never rebalances, so inserting keys in sorted order degrades it into a linked list.
pub struct BinaryTreeMap<K: Ord, V, O: Traversal = Preorder> {
    pub(crate) store: NodeStore<K, V>,
    pub(crate) root: Option<Handle>,
    // The most recently inserted node, reseated to the maximum when it is removed.
    pub(crate) last: Option<Handle>,
    pub(crate) len: usize,
    pub(crate) _order: PhantomData<O>,
}

impl<K: Ord, V, O: Traversal> BinaryTreeMap<K, V, O> {
    /// Creates a new BinaryTreeMap with no entries.
    pub const fn new() -> BinaryTreeMap<K, V, O> {
        BinaryTreeMap {
            store: NodeStore::new(),
            root: None,
            last: None,
            len: 0,
            _order: PhantomData,
        }
    }

    /// Returns the number of entries in the BinaryTreeMap.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the BinaryTreeMap contains no entries.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts a new entry, returning true if a new node was created.
    ///
    /// If `key` is already present, the stored value is only replaced when `value` compares less
    /// than it. Otherwise `value` is dropped. Either way the length doesn't change and false is
    /// returned.
    pub fn insert(&mut self, key: K, value: V) -> bool
    where
        V: PartialOrd,
    {
        let mut parent = None;
        let mut curr = self.root;

        while let Some(handle) = curr {
            let node = self.store.node_mut(handle);
            match key.cmp(&node.key) {
                Ordering::Less => {
                    parent = Some((handle, Side::Left));
                    curr = node.links.left;
                },
                Ordering::Greater => {
                    parent = Some((handle, Side::Right));
                    curr = node.links.right;
                },
                Ordering::Equal => {
                    if value < node.value {
                        trace!("duplicate key, keeping the smaller new value");
                        node.value = value;
                    } else {
                        trace!("duplicate key, keeping the stored value");
                    }
                    return false;
                },
            }
        }

        let handle = self.store.alloc(Node::new(key, value, None));
        match parent {
            Some((parent, side)) => self.store.set_child(parent, side, Some(handle)),
            None => self.root = Some(handle),
        }
        trace!("inserted node {handle:?} below {parent:?}");

        self.last = Some(handle);
        self.len += 1;
        true
    }

    /// Removes the entry for `key` and returns it, if it exists.
    ///
    /// A node with two children is replaced by the node of its in-order successor. Entries never
    /// move between nodes, so a [`Position`] on any other entry stays valid.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let handle = self.find_handle(key)?;
        Some(self.extract(handle))
    }

    /// Removes the entry for `key` and returns its value, if it exists.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|e| e.1)
    }

    /// Removes the entry at a detached `position`, returning it.
    ///
    /// # Errors
    /// Returns [`InvalidPosition`] if the node at `position` has already been removed.
    pub fn remove_at(&mut self, position: Position<O>) -> Result<(K, V), InvalidPosition> {
        if !self.store.contains(position.handle) {
            return Err(InvalidPosition);
        }
        Ok(self.extract(position.handle))
    }

    /// Removes every entry from `from` to `to`, both inclusive, in this map's traversal order,
    /// returning how many were removed.
    ///
    /// The keys in the range are collected before anything is removed, because removing a node
    /// reshapes the tree and changes the traversal.
    ///
    /// # Errors
    /// Returns [`CursorError::InvalidPosition`] if either position is stale and
    /// [`CursorError::TraversalExhausted`] if `to` can't be reached by stepping forward from
    /// `from`. Nothing is removed in either case.
    pub fn remove_range(
        &mut self,
        from: Position<O>,
        to: Position<O>,
    ) -> Result<usize, CursorError>
    where
        K: Clone,
    {
        if !self.store.contains(to.handle) {
            return Err(InvalidPosition.into());
        }

        let mut cursor = self.cursor_at(from)?;
        let mut keys = vec![];
        loop {
            if let Some(key) = cursor.key() {
                keys.push(key.clone());
            }
            if cursor.current == Some(to.handle) {
                break;
            }
            cursor.move_next()?;
        }

        for key in &keys {
            self.remove_entry(key);
        }
        Ok(keys.len())
    }

    /// Removes all entries from the BinaryTreeMap.
    pub fn clear(&mut self) {
        trace!("clearing {} nodes", self.len);
        self.store.clear();
        self.root = None;
        self.last = None;
        self.len = 0;
    }

    pub fn get_entry<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_handle(key).map(|handle| self.store.node(handle).tuple())
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_entry(key).map(|e| e.1)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let handle = self.find_handle(key)?;
        Some(&mut self.store.node_mut(handle).value)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_handle(key).is_some()
    }

    /// Returns a cursor pointing at the entry for `key`, if it exists.
    pub fn find<Q>(&self, key: &Q) -> Option<Cursor<'_, K, V, O>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_handle(key)
            .map(|handle| Cursor::at(&self.store, Some(handle)))
    }

    /// Returns the entry with the smallest key.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.root
            .map(|root| self.store.node(self.store.leftmost(root)).tuple())
    }

    /// Returns the entry with the largest key.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.root
            .map(|root| self.store.node(self.store.rightmost(root)).tuple())
    }

    /// Returns the most recently inserted entry that is still in the map. If that entry has been
    /// removed, this is the entry with the largest key instead.
    pub fn last_inserted(&self) -> Option<(&K, &V)> {
        self.last.map(|handle| self.store.node(handle).tuple())
    }

    /// Returns a reference to the `index`th entry in traversal order, panicking on a failure.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the BinaryTreeMap.
    #[track_caller]
    pub fn nth(&self, index: usize) -> (&K, &V) {
        match self.try_nth(index) {
            Ok(entry) => entry,
            Err(error) => panic!("{error}"),
        }
    }

    /// Returns a reference to the `index`th entry in traversal order, returning an [`Err`] on a
    /// failure rather than panicking. This steps a cursor forward from the front `index` times.
    pub fn try_nth(&self, index: usize) -> Result<(&K, &V), IndexOutOfBounds> {
        let out_of_bounds = IndexOutOfBounds {
            index,
            len: self.len,
        };

        let mut cursor = self.cursor_front();
        for _ in 0..index {
            cursor.move_next().map_err(|_| out_of_bounds)?;
        }
        cursor.read().ok_or(out_of_bounds)
    }

    /// Returns a cursor pointing at the first entry in this map's traversal order.
    pub fn cursor_front(&self) -> Cursor<'_, K, V, O> {
        self.cursor_front_in()
    }

    /// Returns a cursor pointing at the last entry in this map's traversal order.
    pub fn cursor_back(&self) -> Cursor<'_, K, V, O> {
        self.cursor_back_in()
    }

    /// Returns a cursor pointing at the first entry in the traversal order `P`, which doesn't
    /// need to match the map's own order.
    pub fn cursor_front_in<P: Traversal>(&self) -> Cursor<'_, K, V, P> {
        Cursor::front(&self.store, self.root)
    }

    /// Returns a cursor pointing at the last entry in the traversal order `P`.
    pub fn cursor_back_in<P: Traversal>(&self) -> Cursor<'_, K, V, P> {
        Cursor::back(&self.store, self.root)
    }

    /// Reattaches a detached [`Position`] to this map.
    ///
    /// # Errors
    /// Returns [`InvalidPosition`] if the node at `position` has since been removed.
    pub fn cursor_at(&self, position: Position<O>) -> Result<Cursor<'_, K, V, O>, InvalidPosition> {
        if self.store.contains(position.handle) {
            Ok(Cursor::at(&self.store, Some(position.handle)))
        } else {
            Err(InvalidPosition)
        }
    }

    pub fn iter(&self) -> Iter<'_, K, V, O> {
        self.into_iter()
    }

    /// Returns an iterator over the map in traversal order `P` rather than the map's own order.
    pub fn iter_in<P: Traversal>(&self) -> Iter<'_, K, V, P> {
        Iter::new(&self.store, self.root, self.len)
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.iter().map(|e| e.0)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.iter().map(|e| e.1)
    }

    /// Exchanges the contents of two maps. Nothing happens if they are already equal.
    pub fn swap(&mut self, other: &mut BinaryTreeMap<K, V, O>)
    where
        V: PartialEq,
    {
        if self != other {
            mem::swap(self, other);
        }
    }

    /// Inserts a copy of every entry in `other`, following the same duplicate key rule as
    /// [`insert`](BinaryTreeMap::insert). An empty map becomes a copy of `other`, shape included.
    pub fn merge<P: Traversal>(&mut self, other: &BinaryTreeMap<K, V, P>)
    where
        K: Clone,
        V: Clone + PartialOrd,
    {
        match (self.root, other.root) {
            (_, None) => {},
            (None, Some(other_root)) => {
                let (root, last) =
                    self.store.copy_subtree(&other.store, other_root, None, other.last);
                self.root = Some(root);
                self.last = last;
                self.len = other.len;
            },
            // Preorder reinsertion reproduces as much of other's shape as possible.
            (Some(_), Some(_)) => {
                for (key, value) in other.iter_in::<Preorder>() {
                    self.insert(key.clone(), value.clone());
                }
            },
        }
    }

    pub(crate) fn find_handle<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = self.store.node(handle);
            curr = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.links.left,
                Ordering::Greater => node.links.right,
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    /// Removes the entry at a live `handle` from the tree.
    fn extract(&mut self, handle: Handle) -> (K, V) {
        let links = self.store.links(handle);

        if let (Some(_), Some(right)) = (links.left, links.right) {
            // The successor has no left child, so it can be unlinked directly and then moved,
            // entry and all, into the place of the node being removed.
            let successor = self.store.leftmost(right);
            trace!("replacing {handle:?} with its successor {successor:?}");
            self.unlink(successor);

            let links = self.store.links(handle);
            self.replace_in_parent(handle, Some(successor));
            self.store.set_child(successor, Side::Left, links.left);
            self.store.set_child(successor, Side::Right, links.right);
        } else {
            self.unlink(handle);
        }

        let node = self.store.free(handle);
        self.len -= 1;
        if self.last == Some(handle) {
            self.last = self.root.map(|root| self.store.rightmost(root));
        }
        node.into_tuple()
    }

    /// Detaches a node with at most one child from the tree, moving the child up into its place.
    /// The node itself stays allocated.
    fn unlink(&mut self, handle: Handle) {
        let links = self.store.links(handle);
        let child = links.left.or(links.right);
        self.replace_in_parent(handle, child);
        trace!("unlinked {handle:?}, moving {child:?} up");
    }

    /// Points whatever refers to `handle` from above, a parent or the root, at `replacement`.
    fn replace_in_parent(&mut self, handle: Handle, replacement: Option<Handle>) {
        match self.store.parent_side(handle) {
            Some((parent, side)) => self.store.set_child(parent, side, replacement),
            None => {
                self.root = replacement;
                if let Some(replacement) = replacement {
                    self.store.node_mut(replacement).links.parent = None;
                }
            },
        }
    }

    #[allow(clippy::unwrap_used)]
    #[cfg(test)]
    pub(crate) fn verify_links(&self) {
        let mut count = 0;
        let mut cursor = self.cursor_front_in::<Inorder>();
        let mut prev: Option<&K> = None;

        if let Some(root) = self.root {
            assert!(self.store.links(root).parent.is_none());
        }
        while let Some(handle) = cursor.current {
            count += 1;
            let links = self.store.links(handle);
            for child in [links.left, links.right].into_iter().flatten() {
                assert_eq!(self.store.links(child).parent, Some(handle));
            }
            let key = cursor.key().unwrap();
            if let Some(prev) = prev {
                assert!(prev < key);
            }
            prev = Some(key);
            if cursor.move_next().is_err() {
                break;
            }
        }
        assert_eq!(count, self.len);
    }
}

impl<K: Ord, V, O: Traversal> Default for BinaryTreeMap<K, V, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone, V: Clone, O: Traversal> Clone for BinaryTreeMap<K, V, O> {
    fn clone(&self) -> Self {
        let mut store = NodeStore::new();
        let (root, last) = match self.root {
            Some(root) => {
                let (root, last) = store.copy_subtree(&self.store, root, None, self.last);
                (Some(root), last)
            },
            None => (None, None),
        };

        BinaryTreeMap {
            store,
            root,
            last,
            len: self.len,
            _order: PhantomData,
        }
    }
}

/// Two maps are equal if they hold equal entries in ascending key order. Neither the shape of the
/// trees nor their traversal orders are taken into account.
impl<K, V, O, P> PartialEq<BinaryTreeMap<K, V, P>> for BinaryTreeMap<K, V, O>
where
    K: Ord,
    V: PartialEq,
    O: Traversal,
    P: Traversal,
{
    fn eq(&self, other: &BinaryTreeMap<K, V, P>) -> bool {
        self.len == other.len && self.iter_in::<Inorder>().eq(other.iter_in::<Inorder>())
    }
}

impl<K: Ord, V: Eq, O: Traversal> Eq for BinaryTreeMap<K, V, O> {}

impl<K: Ord, V: PartialOrd, O: Traversal> Extend<(K, V)> for BinaryTreeMap<K, V, O> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V: PartialOrd, O: Traversal> FromIterator<(K, V)> for BinaryTreeMap<K, V, O> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = BinaryTreeMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V: PartialOrd, O: Traversal, const N: usize> From<[(K, V); N]>
    for BinaryTreeMap<K, V, O>
{
    fn from(value: [(K, V); N]) -> Self {
        value.into_iter().collect()
    }
}

impl<K: Ord + Debug, V: Debug, O: Traversal> Debug for BinaryTreeMap<K, V, O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryTreeMap")
            .field("order", &O::NAME)
            .field("nodes", &Render {
                store: &self.store,
                root: self.root,
            })
            .field("len", &self.len)
            .finish()
    }
}

impl<K: Ord + Debug, V: Debug, O: Traversal> Display for BinaryTreeMap<K, V, O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
