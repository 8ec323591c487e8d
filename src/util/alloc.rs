#![cfg(test)]

use std::cell::Cell;
use std::cmp::Ordering;
use std::rc::Rc;

/// A test value that counts how many times values sharing its counter have been dropped. Ordered
/// by `id` alone, so it can be used as a tree key.
#[derive(Debug, Clone)]
pub struct CountedDrop {
    pub id: usize,
    pub drops: Rc<Cell<usize>>,
}

impl CountedDrop {
    pub fn new(id: usize, drops: &Rc<Cell<usize>>) -> CountedDrop {
        CountedDrop {
            id,
            drops: Rc::clone(drops),
        }
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

impl PartialEq for CountedDrop {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CountedDrop {}

impl PartialOrd for CountedDrop {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CountedDrop {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}
