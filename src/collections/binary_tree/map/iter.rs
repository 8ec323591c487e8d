use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::BinaryTreeMap;
use crate::collections::binary_tree::{Handle, NodeStore, Traversal};

impl<K: Ord, V, O: Traversal> IntoIterator for BinaryTreeMap<K, V, O> {
    type Item = (K, V);

    type IntoIter = IntoIter<K, V, O>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            front: self.root.map(|root| O::first(&self.store, root)),
            back: self.root.map(|root| O::last(&self.store, root)),
            remaining: self.len,
            store: self.store,
            _order: PhantomData,
        }
    }
}

/// A type for owned iteration over a [`BinaryTreeMap`], in the map's traversal order. Produces
/// values of type `(K, V)`.
pub struct IntoIter<K, V, O: Traversal> {
    // Entries are moved out as they are yielded, but the links stay behind so that stepping from
    // one node to the next still works.
    pub(crate) store: NodeStore<K, V>,
    pub(crate) front: Option<Handle>,
    pub(crate) back: Option<Handle>,
    pub(crate) remaining: usize,
    pub(crate) _order: PhantomData<O>,
}

impl<K, V, O: Traversal> Iterator for IntoIter<K, V, O> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.front.filter(|_| self.remaining > 0)?;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.front = O::next(&self.store, handle);
        }
        Some(self.store.drain(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, O: Traversal> DoubleEndedIterator for IntoIter<K, V, O> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let handle = self.back.filter(|_| self.remaining > 0)?;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.back = O::prev(&self.store, handle);
        }
        Some(self.store.drain(handle))
    }
}

impl<K, V, O: Traversal> FusedIterator for IntoIter<K, V, O> {}

impl<K, V, O: Traversal> ExactSizeIterator for IntoIter<K, V, O> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<'a, K: Ord, V, O: Traversal> IntoIterator for &'a BinaryTreeMap<K, V, O> {
    type Item = (&'a K, &'a V);

    type IntoIter = Iter<'a, K, V, O>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_in()
    }
}

/// A type for borrowed iteration over a [`BinaryTreeMap`], in the traversal order `O`. Produces
/// values of type `(&K, &V)`.
///
/// Each step is worked out from the node links as the iterator goes; nothing is collected ahead
/// of time.
pub struct Iter<'a, K, V, O: Traversal> {
    pub(crate) store: &'a NodeStore<K, V>,
    pub(crate) front: Option<Handle>,
    pub(crate) back: Option<Handle>,
    pub(crate) remaining: usize,
    pub(crate) _order: PhantomData<O>,
}

impl<'a, K, V, O: Traversal> Iter<'a, K, V, O> {
    pub(crate) fn new(
        store: &'a NodeStore<K, V>,
        root: Option<Handle>,
        len: usize,
    ) -> Iter<'a, K, V, O> {
        Iter {
            store,
            front: root.map(|root| O::first(store, root)),
            back: root.map(|root| O::last(store, root)),
            remaining: len,
            _order: PhantomData,
        }
    }
}

impl<'a, K, V, O: Traversal> Iterator for Iter<'a, K, V, O> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.front.filter(|_| self.remaining > 0)?;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.front = O::next(self.store, handle);
        }
        Some(self.store.node(handle).tuple())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, O: Traversal> DoubleEndedIterator for Iter<'_, K, V, O> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let handle = self.back.filter(|_| self.remaining > 0)?;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.back = O::prev(self.store, handle);
        }
        Some(self.store.node(handle).tuple())
    }
}

impl<K, V, O: Traversal> FusedIterator for Iter<'_, K, V, O> {}

impl<K, V, O: Traversal> ExactSizeIterator for Iter<'_, K, V, O> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V, O: Traversal> Clone for Iter<'_, K, V, O> {
    fn clone(&self) -> Self {
        Iter {
            store: self.store,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
            _order: PhantomData,
        }
    }
}
