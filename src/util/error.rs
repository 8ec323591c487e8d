use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant, TryInto};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfBounds {
    pub index: usize,
    pub len: usize,
}

impl Display for IndexOutOfBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Index {} out of bounds for collection with {} elements!", self.index, self.len)
    }
}

impl Error for IndexOutOfBounds {}

/// The direction a cursor was stepped in.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, IsVariant)]
pub enum Direction {
    #[display("forward")]
    Forward,
    #[display("backward")]
    Backward,
}

/// A cursor was stepped past the last element, or before the first element, of its traversal.
/// The cursor is left where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalExhausted {
    pub direction: Direction,
}

impl Display for TraversalExhausted {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let end = match self.direction {
            Direction::Forward => "last",
            Direction::Backward => "first",
        };
        write!(f, "Cannot step {} past the {end} node of the traversal!", self.direction)
    }
}

impl Error for TraversalExhausted {}

/// A detached [`Position`](crate::collections::binary_tree::Position) no longer refers to a node
/// in the tree, because that node has since been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidPosition;

impl Display for InvalidPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Position refers to a node that is no longer in the tree!")
    }
}

impl Error for InvalidPosition {}

#[derive(Debug, Display, Error, From, TryInto, IsVariant, Clone, Copy, PartialEq, Eq)]
pub enum CursorError {
    TraversalExhausted(TraversalExhausted),
    InvalidPosition(InvalidPosition),
}
