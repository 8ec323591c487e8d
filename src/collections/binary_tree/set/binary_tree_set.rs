use std::borrow::Borrow;
use std::fmt::{self, Debug, Display, Formatter};
use std::ops::Index;

use super::Iter;
use crate::collections::binary_tree::{
    BinaryTreeMap, Cursor, CursorError, IndexOutOfBounds, InvalidPosition, Position, Preorder,
    Traversal,
};

/// An unbalanced binary search tree of unique items, walked in the order given by `O`.
///
/// Cursors over a set have a value type of `()`, so [`Cursor::key`] is the item they point at.
///
/// # Time Complexity
/// See [`BinaryTreeMap`], which this type wraps with no extra cost.
pub struct BinaryTreeSet<T: Ord, O: Traversal = Preorder> {
    pub(crate) inner: BinaryTreeMap<T, (), O>,
}

impl<T: Ord, O: Traversal> BinaryTreeSet<T, O> {
    pub const fn new() -> BinaryTreeSet<T, O> {
        BinaryTreeSet {
            inner: BinaryTreeMap::new(),
        }
    }

    pub const fn len(&self) -> usize {
        self.inner.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Inserts `item` into the set, returning true if it wasn't already present. A duplicate item
    /// is dropped and leaves the set untouched.
    pub fn insert(&mut self, item: T) -> bool {
        self.inner.insert(item, ())
    }

    pub fn remove<Q>(&mut self, item: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.remove_entry(item).map(|e| e.0)
    }

    /// Removes the item at a detached `position`, returning it.
    ///
    /// # Errors
    /// Returns [`InvalidPosition`] if the item at `position` has already been removed.
    pub fn remove_at(&mut self, position: Position<O>) -> Result<T, InvalidPosition> {
        self.inner.remove_at(position).map(|e| e.0)
    }

    /// Removes every item from `from` to `to`, both inclusive, in this set's traversal order. See
    /// [`BinaryTreeMap::remove_range`].
    ///
    /// # Errors
    /// Returns a [`CursorError`] without removing anything if either position is stale or `to`
    /// doesn't come after `from`.
    pub fn remove_range(
        &mut self,
        from: Position<O>,
        to: Position<O>,
    ) -> Result<usize, CursorError>
    where
        T: Clone,
    {
        self.inner.remove_range(from, to)
    }

    pub fn clear(&mut self) {
        self.inner.clear()
    }

    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.contains(item)
    }

    /// Returns a reference to the stored item equal to `item`, if there is one.
    pub fn get<Q>(&self, item: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.get_entry(item).map(|e| e.0)
    }

    /// Returns a cursor pointing at `item`, to walk the set from there.
    pub fn find<Q>(&self, item: &Q) -> Option<Cursor<'_, T, (), O>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.find(item)
    }

    /// Returns the smallest item in the set.
    pub fn first(&self) -> Option<&T> {
        self.inner.first_key_value().map(|e| e.0)
    }

    /// Returns the largest item in the set.
    pub fn last(&self) -> Option<&T> {
        self.inner.last_key_value().map(|e| e.0)
    }

    /// Returns the most recently inserted item still in the set, or the largest item if that one
    /// has been removed.
    pub fn last_inserted(&self) -> Option<&T> {
        self.inner.last_inserted().map(|e| e.0)
    }

    /// Returns the `index`th item in traversal order.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the BinaryTreeSet.
    #[track_caller]
    pub fn nth(&self, index: usize) -> &T {
        self.inner.nth(index).0
    }

    pub fn try_nth(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.inner.try_nth(index).map(|e| e.0)
    }

    pub fn cursor_front(&self) -> Cursor<'_, T, (), O> {
        self.inner.cursor_front()
    }

    pub fn cursor_back(&self) -> Cursor<'_, T, (), O> {
        self.inner.cursor_back()
    }

    pub fn cursor_front_in<P: Traversal>(&self) -> Cursor<'_, T, (), P> {
        self.inner.cursor_front_in()
    }

    pub fn cursor_back_in<P: Traversal>(&self) -> Cursor<'_, T, (), P> {
        self.inner.cursor_back_in()
    }

    /// Reattaches a detached [`Position`] to this set.
    ///
    /// # Errors
    /// Returns [`InvalidPosition`] if the item at `position` has since been removed.
    pub fn cursor_at(
        &self,
        position: Position<O>,
    ) -> Result<Cursor<'_, T, (), O>, InvalidPosition> {
        self.inner.cursor_at(position)
    }

    pub fn iter(&self) -> Iter<'_, T, O> {
        self.into_iter()
    }

    pub fn iter_in<P: Traversal>(&self) -> Iter<'_, T, P> {
        Iter(self.inner.iter_in())
    }

    /// Exchanges the contents of two sets, unless they are already equal.
    pub fn swap(&mut self, other: &mut BinaryTreeSet<T, O>) {
        self.inner.swap(&mut other.inner)
    }

    /// Inserts a copy of every item in `other`.
    pub fn merge<P: Traversal>(&mut self, other: &BinaryTreeSet<T, P>)
    where
        T: Clone,
    {
        self.inner.merge(&other.inner)
    }

    pub fn is_subset<P: Traversal>(&self, other: &BinaryTreeSet<T, P>) -> bool {
        self.len() <= other.len() && self.iter().all(|item| other.contains(item))
    }

    pub fn is_superset<P: Traversal>(&self, other: &BinaryTreeSet<T, P>) -> bool {
        other.is_subset(self)
    }
}

impl<T: Ord, O: Traversal> Default for BinaryTreeSet<T, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone, O: Traversal> Clone for BinaryTreeSet<T, O> {
    fn clone(&self) -> Self {
        BinaryTreeSet {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Ord, O: Traversal> Index<usize> for BinaryTreeSet<T, O> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.nth(index)
    }
}

/// Two sets are equal if they hold equal items, regardless of shape or traversal order.
impl<T: Ord, O: Traversal, P: Traversal> PartialEq<BinaryTreeSet<T, P>> for BinaryTreeSet<T, O> {
    fn eq(&self, other: &BinaryTreeSet<T, P>) -> bool {
        self.inner == other.inner
    }
}

impl<T: Ord, O: Traversal> Eq for BinaryTreeSet<T, O> {}

impl<T: Ord, O: Traversal> Extend<T> for BinaryTreeSet<T, O> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Ord, O: Traversal> FromIterator<T> for BinaryTreeSet<T, O> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = BinaryTreeSet::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord, O: Traversal, const N: usize> From<[T; N]> for BinaryTreeSet<T, O> {
    fn from(value: [T; N]) -> Self {
        value.into_iter().collect()
    }
}

impl<T: Ord + Debug, O: Traversal> Debug for BinaryTreeSet<T, O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryTreeSet")
            .field("order", &O::NAME)
            .field("items", &DebugList(self))
            .field("len", &self.len())
            .finish()
    }
}

impl<T: Ord + Debug, O: Traversal> Display for BinaryTreeSet<T, O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

struct DebugList<'a, T: Ord, O: Traversal>(&'a BinaryTreeSet<T, O>);

impl<T: Ord + Debug, O: Traversal> Debug for DebugList<'_, T, O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}
