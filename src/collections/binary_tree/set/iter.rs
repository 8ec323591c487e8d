use std::iter::FusedIterator;

use super::BinaryTreeSet;
use crate::collections::binary_tree::Traversal;
use crate::collections::binary_tree::map;

impl<T: Ord, O: Traversal> IntoIterator for BinaryTreeSet<T, O> {
    type Item = T;

    type IntoIter = IntoIter<T, O>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self.inner.into_iter())
    }
}

/// A type for owned iteration over a [`BinaryTreeSet`], in the set's traversal order. Produces
/// values of type `T`.
pub struct IntoIter<T, O: Traversal>(pub(crate) map::IntoIter<T, (), O>);

impl<T, O: Traversal> Iterator for IntoIter<T, O> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T, O: Traversal> DoubleEndedIterator for IntoIter<T, O> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|e| e.0)
    }
}

impl<T, O: Traversal> FusedIterator for IntoIter<T, O> {}

impl<T, O: Traversal> ExactSizeIterator for IntoIter<T, O> {}

impl<'a, T: Ord, O: Traversal> IntoIterator for &'a BinaryTreeSet<T, O> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T, O>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_in()
    }
}

/// A type for borrowed iteration over a [`BinaryTreeSet`], in the traversal order `O`. Produces
/// values of type `&T`.
pub struct Iter<'a, T, O: Traversal>(pub(crate) map::Iter<'a, T, (), O>);

impl<'a, T, O: Traversal> Iterator for Iter<'a, T, O> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T, O: Traversal> DoubleEndedIterator for Iter<'_, T, O> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|e| e.0)
    }
}

impl<T, O: Traversal> FusedIterator for Iter<'_, T, O> {}

impl<T, O: Traversal> ExactSizeIterator for Iter<'_, T, O> {}

impl<T, O: Traversal> Clone for Iter<'_, T, O> {
    fn clone(&self) -> Self {
        Iter(self.0.clone())
    }
}
