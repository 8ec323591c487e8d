/// An enum to represent the state of a [`Cursor`](super::Cursor).
#[derive(Debug, PartialEq, Eq)]
pub enum State<'a, K, V> {
    /// The cursor belongs to an empty tree and therefore doesn't point anywhere.
    Empty,
    /// The cursor is pointing to a node within the tree, containing the borrowed key and value.
    Node(&'a K, &'a V),
}

impl<'a, K, V> State<'a, K, V> {
    pub const fn is_empty(&self) -> bool {
        matches!(self, State::Empty)
    }

    pub const fn node(self) -> Option<(&'a K, &'a V)> {
        match self {
            State::Empty => None,
            State::Node(key, value) => Some((key, value)),
        }
    }
}
