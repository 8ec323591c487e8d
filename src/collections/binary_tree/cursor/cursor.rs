use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::ops::{Add, Sub};

use super::{Position, State};
use crate::collections::binary_tree::{Handle, NodeStore, Traversal};
use crate::util::error::{Direction, TraversalExhausted};

/// A type for bi-directional traversal of binary tree collections, in the order given by `O`. See
/// [`BinaryTreeMap::cursor_front`](crate::collections::binary_tree::BinaryTreeMap::cursor_front)
/// and [`BinaryTreeMap::cursor_back`](crate::collections::binary_tree::BinaryTreeMap::cursor_back)
/// to create one.
///
/// A cursor over a non-empty tree always points at a node: stepping past either end of the
/// traversal returns [`TraversalExhausted`] and leaves the cursor where it was.
///
/// Cursors compare by the entries they point at, not by which node they point at. Two cursors on
/// different nodes (or different trees) holding equal keys and values are equal.
pub struct Cursor<'a, K, V, O: Traversal> {
    pub(crate) store: &'a NodeStore<K, V>,
    pub(crate) current: Option<Handle>,
    pub(crate) _order: PhantomData<O>,
}

impl<'a, K, V, O: Traversal> Cursor<'a, K, V, O> {
    pub(crate) fn front(store: &'a NodeStore<K, V>, root: Option<Handle>) -> Cursor<'a, K, V, O> {
        Cursor::at(store, root.map(|root| O::first(store, root)))
    }

    pub(crate) fn back(store: &'a NodeStore<K, V>, root: Option<Handle>) -> Cursor<'a, K, V, O> {
        Cursor::at(store, root.map(|root| O::last(store, root)))
    }

    pub(crate) const fn at(
        store: &'a NodeStore<K, V>,
        current: Option<Handle>,
    ) -> Cursor<'a, K, V, O> {
        Cursor {
            store,
            current,
            _order: PhantomData,
        }
    }

    pub fn state(&self) -> State<'a, K, V> {
        match self.current {
            Some(handle) => {
                let (key, value) = self.store.node(handle).tuple();
                State::Node(key, value)
            },
            None => State::Empty,
        }
    }

    /// Returns the entry the cursor points at, or [`None`] if the tree is empty.
    pub fn read(&self) -> Option<(&'a K, &'a V)> {
        self.state().node()
    }

    pub fn key(&self) -> Option<&'a K> {
        self.read().map(|e| e.0)
    }

    pub fn value(&self) -> Option<&'a V> {
        self.read().map(|e| e.1)
    }

    /// Returns the entry after the current one in this cursor's order, without moving.
    pub fn peek_next(&self) -> Option<(&'a K, &'a V)> {
        let next = O::next(self.store, self.current?)?;
        Some(self.store.node(next).tuple())
    }

    /// Returns the entry before the current one in this cursor's order, without moving.
    pub fn peek_prev(&self) -> Option<(&'a K, &'a V)> {
        let prev = O::prev(self.store, self.current?)?;
        Some(self.store.node(prev).tuple())
    }

    /// Steps forward to the next node in this cursor's order.
    ///
    /// # Errors
    /// Returns [`TraversalExhausted`] if the cursor is on the last node, or the tree is empty. The
    /// cursor doesn't move in that case.
    pub fn move_next(&mut self) -> Result<&mut Self, TraversalExhausted> {
        self.step(Direction::Forward)
    }

    /// Steps backward to the previous node in this cursor's order.
    ///
    /// # Errors
    /// Returns [`TraversalExhausted`] if the cursor is on the first node, or the tree is empty. The
    /// cursor doesn't move in that case.
    pub fn move_prev(&mut self) -> Result<&mut Self, TraversalExhausted> {
        self.step(Direction::Backward)
    }

    /// Takes `|n|` single steps, forward for a positive `n` and backward for a negative one. This
    /// is `O(|n|)` steps, each of which can take up to the depth of the tree.
    ///
    /// # Errors
    /// Returns [`TraversalExhausted`] if fewer than `|n|` steps are possible in that direction. The
    /// cursor is returned to where it started in that case.
    pub fn advance(&mut self, n: isize) -> Result<&mut Self, TraversalExhausted> {
        let direction = if n < 0 {
            Direction::Backward
        } else {
            Direction::Forward
        };

        let start = self.current;
        for _ in 0..n.unsigned_abs() {
            if let Err(error) = self.step(direction) {
                self.current = start;
                return Err(error);
            }
        }
        Ok(self)
    }

    /// Returns true if there is no node before this one in the cursor's order.
    pub fn is_front(&self) -> bool {
        self.current
            .is_some_and(|handle| O::prev(self.store, handle).is_none())
    }

    /// Returns true if there is no node after this one in the cursor's order.
    pub fn is_back(&self) -> bool {
        self.current
            .is_some_and(|handle| O::next(self.store, handle).is_none())
    }

    /// Detaches the cursor's location from the borrow of the tree, so the tree can be mutated
    /// before coming back to it. Returns [`None`] for a cursor over an empty tree.
    pub fn position(&self) -> Option<Position<O>> {
        self.current.map(Position::new)
    }

    fn step(&mut self, direction: Direction) -> Result<&mut Self, TraversalExhausted> {
        let exhausted = TraversalExhausted { direction };
        let current = self.current.ok_or(exhausted)?;
        let target = match direction {
            Direction::Forward => O::next(self.store, current),
            Direction::Backward => O::prev(self.store, current),
        };
        self.current = Some(target.ok_or(exhausted)?);
        Ok(self)
    }
}

impl<K, V, O: Traversal> Clone for Cursor<'_, K, V, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, O: Traversal> Copy for Cursor<'_, K, V, O> {}

impl<'a, K, V, O: Traversal> Add<isize> for Cursor<'a, K, V, O> {
    type Output = Result<Cursor<'a, K, V, O>, TraversalExhausted>;

    fn add(mut self, rhs: isize) -> Self::Output {
        self.advance(rhs)?;
        Ok(self)
    }
}

impl<'a, K, V, O: Traversal> Sub<isize> for Cursor<'a, K, V, O> {
    type Output = Result<Cursor<'a, K, V, O>, TraversalExhausted>;

    fn sub(mut self, rhs: isize) -> Self::Output {
        self.advance(rhs.saturating_neg())?;
        Ok(self)
    }
}

impl<K, V, O, P> PartialEq<Cursor<'_, K, V, P>> for Cursor<'_, K, V, O>
where
    K: PartialEq,
    V: PartialEq,
    O: Traversal,
    P: Traversal,
{
    fn eq(&self, other: &Cursor<'_, K, V, P>) -> bool {
        self.read() == other.read()
    }
}

impl<K: PartialOrd, V: PartialOrd, O: Traversal, P: Traversal> PartialOrd<Cursor<'_, K, V, P>>
    for Cursor<'_, K, V, O>
{
    fn partial_cmp(&self, other: &Cursor<'_, K, V, P>) -> Option<Ordering> {
        self.read().partial_cmp(&other.read())
    }
}

impl<K: Debug, V: Debug, O: Traversal> Debug for Cursor<'_, K, V, O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("order", &O::NAME)
            .field("state", &self.state())
            .finish()
    }
}
