#![cfg(test)]

use std::cell::Cell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::collections::binary_tree::{
    Direction, Handle, Inorder, NodeStore, Postorder, Preorder, Render, State, Traversal,
    TraversalExhausted,
};
use crate::util::alloc::CountedDrop;
use crate::util::panic::assert_panics;

const SAMPLE: [u32; 6] = [100, 20, 10, 200, 150, 300];

fn sample<O: Traversal>() -> BinaryTreeMap<u32, char, O> {
    SAMPLE.iter().zip("abcdef".chars()).map(|(k, v)| (*k, v)).collect()
}

fn keys<O: Traversal>(map: &BinaryTreeMap<u32, char, O>) -> Vec<u32> {
    map.keys().copied().collect()
}

#[test]
fn test_traversal_orders() {
    assert_eq!(keys(&sample::<Preorder>()), [100, 20, 10, 200, 150, 300]);
    assert_eq!(keys(&sample::<Inorder>()), [10, 20, 100, 150, 200, 300]);
    assert_eq!(keys(&sample::<Postorder>()), [10, 20, 150, 300, 200, 100]);

    let map = sample::<Preorder>();
    assert_eq!(
        map.iter_in::<Postorder>().map(|e| *e.0).collect::<Vec<_>>(),
        [10, 20, 150, 300, 200, 100],
        "A map should be walkable in an order other than its own."
    );
    assert_eq!(
        map.iter().rev().map(|e| *e.0).collect::<Vec<_>>(),
        [300, 150, 200, 10, 20, 100],
        "Reversed iteration should walk backwards through the same order."
    );
}

#[test]
fn test_iter_meets_in_the_middle() {
    let map = sample::<Inorder>();
    let mut iter = map.iter();

    assert_eq!(iter.len(), 6);
    assert_eq!(iter.next().map(|e| *e.0), Some(10));
    assert_eq!(iter.next_back().map(|e| *e.0), Some(300));
    assert_eq!(iter.next().map(|e| *e.0), Some(20));
    assert_eq!(iter.next_back().map(|e| *e.0), Some(200));
    assert_eq!(iter.next().map(|e| *e.0), Some(100));
    assert_eq!(iter.next_back().map(|e| *e.0), Some(150));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next_back(), None);
}

#[test]
fn test_cursor_preorder() {
    let map = sample::<Preorder>();
    let mut cursor = map.cursor_front();

    assert_eq!(cursor.key(), Some(&100), "Preorder starts at the root.");
    cursor.move_next().unwrap();
    assert_eq!(cursor.key(), Some(&20));
    assert_eq!(map.cursor_back().key(), Some(&300));

    cursor.move_prev().unwrap();
    assert_eq!(cursor.key(), Some(&100));
    assert_eq!(
        cursor.move_prev().map(|c| c.key()),
        Err(TraversalExhausted { direction: Direction::Backward }),
        "Stepping before the first node should fail."
    );
    assert_eq!(cursor.key(), Some(&100), "A failed step shouldn't move the cursor.");
}

#[test]
fn test_cursor_inorder() {
    let map = sample::<Inorder>();
    let mut cursor = map.cursor_back();

    assert_eq!(map.cursor_front().key(), Some(&10));
    assert_eq!(cursor.key(), Some(&300));
    assert!(cursor.is_back());
    assert_eq!(
        cursor.move_next().map(|c| c.key()),
        Err(TraversalExhausted { direction: Direction::Forward }),
    );

    let mut seen = vec![*cursor.key().unwrap()];
    while cursor.move_prev().is_ok() {
        seen.push(*cursor.key().unwrap());
    }
    assert_eq!(seen, [300, 200, 150, 100, 20, 10]);
    assert!(cursor.is_front());
    assert_eq!(
        cursor.move_prev().unwrap_err().to_string(),
        "Cannot step backward past the first node of the traversal!"
    );
}

#[test]
fn test_cursor_postorder() {
    let map = sample::<Postorder>();
    let mut cursor = map.cursor_front();

    assert_eq!(cursor.key(), Some(&10));
    assert_eq!(map.cursor_back().key(), Some(&100), "Postorder ends at the root.");
    assert_eq!(cursor.peek_next().map(|e| *e.0), Some(20));
    assert_eq!(cursor.peek_prev(), None);

    cursor.advance(4).unwrap();
    assert_eq!(cursor.key(), Some(&200));
    cursor.advance(-2).unwrap();
    assert_eq!(cursor.key(), Some(&150));

    assert!(cursor.advance(10).is_err());
    assert_eq!(cursor.key(), Some(&150), "A failed advance should restore the cursor.");
}

#[test]
fn test_cursor_arithmetic_and_comparisons() {
    let map = sample::<Inorder>();
    let front = map.cursor_front();

    let third = (front + 2).unwrap();
    assert_eq!(third.key(), Some(&100));
    assert_eq!((third - 2).unwrap(), front);
    assert!((front - 1).is_err());
    assert!(front < third);

    let other: BinaryTreeMap<u32, char, Preorder> = [(10, 'c')].into();
    assert_eq!(
        other.cursor_front(),
        front,
        "Cursors compare by the entries they point at, across trees and orders."
    );
}

#[test]
fn test_empty() {
    let mut map = BinaryTreeMap::<u32, u32>::new();
    let mut cursor = map.cursor_front();

    assert_eq!(cursor.state(), State::Empty);
    assert_eq!(cursor.read(), None);
    assert!(cursor.move_next().is_err());
    assert!(cursor.move_prev().is_err());
    assert_eq!(cursor.position(), None);
    assert_eq!(map.iter().next(), None);
    assert_eq!(map.first_key_value(), None);
    assert_eq!(map.last_inserted(), None);

    map.clear();
    assert_eq!(map.len(), 0, "Clearing an empty map should leave it empty.");
}

#[test]
fn test_insert_merge_policy() {
    let mut map = BinaryTreeMap::<&str, u32>::new();

    assert!(map.insert("a", 5));
    assert!(!map.insert("a", 7), "Duplicate keys shouldn't create a node.");
    assert_eq!(map.get("a"), Some(&5), "A larger value shouldn't replace a smaller one.");
    assert!(!map.insert("a", 2));
    assert_eq!(map.get("a"), Some(&2), "A smaller value should replace a larger one.");
    assert_eq!(map.len(), 1);
}

#[test]
fn test_remove() {
    let mut map = sample::<Inorder>();

    assert_eq!(map.remove(&20), Some('b'), "Removing a node with one child.");
    map.verify_links();
    assert_eq!(map.remove_entry(&200), Some((200, 'd')), "Removing a node with two children.");
    map.verify_links();
    assert_eq!(map.remove(&100), Some('a'), "Removing the root.");
    map.verify_links();
    assert_eq!(map.remove(&100), None);
    assert_eq!(map.len(), 3);

    assert_eq!(keys(&map), [10, 150, 300]);
    assert!(!map.contains(&100));
    assert!(map.contains(&150));
}

#[test]
fn test_remove_two_children_keeps_shape() {
    let mut map = sample::<Preorder>();
    map.remove(&100);
    map.verify_links();

    assert_eq!(
        keys(&map),
        [150, 20, 10, 200, 300],
        "The successor should move into the removed node's place."
    );
}

#[test]
fn test_last_inserted() {
    let mut map = sample::<Preorder>();
    assert_eq!(map.last_inserted(), Some((&300, &'f')));

    map.remove(&300);
    assert_eq!(
        map.last_inserted(),
        Some((&200, &'d')),
        "Removing the last inserted entry should fall back to the maximum."
    );

    map.insert(15, 'g');
    assert_eq!(map.last_inserted(), Some((&15, &'g')));
    map.remove(&20);
    assert_eq!(map.last_inserted(), Some((&15, &'g')));

    let mut map: BinaryTreeMap<u32, char> = [(2, 'a'), (1, 'b'), (4, 'c'), (3, 'd')].into();
    map.remove(&2);
    assert_eq!(
        map.last_inserted(),
        Some((&3, &'d')),
        "The last inserted entry should be tracked when it moves into a removed node."
    );
}

#[test]
fn test_positions_across_mutation() {
    let mut map = sample::<Inorder>();
    let position = map.find(&150).unwrap().position().unwrap();
    let doomed = map.find(&10).unwrap().position().unwrap();

    map.insert(160, 'g');
    map.remove(&10);

    let mut cursor = map.cursor_at(position).unwrap();
    cursor.move_next().unwrap();
    assert_eq!(cursor.key(), Some(&160), "A position should survive unrelated mutation.");

    assert_eq!(map.cursor_at(doomed).map(|c| c.read()), Err(InvalidPosition));
    assert_eq!(map.remove_at(doomed), Err(InvalidPosition));

    map.insert(5, 'h');
    assert!(
        map.cursor_at(doomed).is_err(),
        "A reused slot shouldn't revive an old position."
    );
}

#[test]
fn test_positions_follow_entries() {
    let mut map = sample::<Inorder>();
    let removed = map.find(&200).unwrap().position().unwrap();
    let successor = map.find(&300).unwrap().position().unwrap();

    assert_eq!(map.remove(&200), Some('d'));
    map.verify_links();
    assert_eq!(
        map.cursor_at(removed).map(|c| c.read()),
        Err(InvalidPosition),
        "A position on a removed node with two children should be invalid."
    );
    assert_eq!(map.remove_at(removed), Err(InvalidPosition));
    assert_eq!(
        map.cursor_at(successor).map(|c| c.key()),
        Ok(Some(&300)),
        "A position on the successor should still point at the successor."
    );
    assert_eq!(keys(&map), [10, 20, 100, 150, 300]);

    // The root's successor is now two levels down, below 300.
    let root = map.find(&100).unwrap().position().unwrap();
    let deep = map.find(&150).unwrap().position().unwrap();
    assert_eq!(map.remove(&100), Some('a'));
    map.verify_links();
    assert!(map.cursor_at(root).is_err());
    assert_eq!(map.cursor_at(successor).map(|c| c.key()), Ok(Some(&300)));
    assert_eq!(map.remove_at(deep), Ok((150, 'e')));
    map.verify_links();
    assert_eq!(keys(&map), [10, 20, 300]);
}

#[test]
fn test_positions_from_other_trees() {
    let a: BinaryTreeMap<u32, char> = [(7, 'x')].into();
    let mut b: BinaryTreeMap<u32, char> = [(8, 'y')].into();
    let foreign = a.cursor_front().position().unwrap();

    assert_eq!(
        b.remove_at(foreign),
        Err(InvalidPosition),
        "A position should only be valid in the tree it was taken from."
    );
    assert!(b.cursor_at(foreign).is_err());
    assert_eq!(b.len(), 1);

    let copy = a.clone();
    assert!(copy.cursor_at(foreign).is_err(), "A clone shouldn't accept the original's positions.");
    assert_eq!(a.cursor_at(foreign).map(|c| c.key()), Ok(Some(&7)));
}

#[test]
fn test_remove_at_and_range() {
    let mut map = sample::<Preorder>();

    let position = map.cursor_front().position().unwrap();
    assert_eq!(map.remove_at(position), Ok((100, 'a')));
    map.verify_links();

    // 150, 20, 10, 200, 300
    let from = map.find(&20).unwrap().position().unwrap();
    let to = map.find(&200).unwrap().position().unwrap();
    assert_eq!(map.remove_range(from, to), Ok(3));
    map.verify_links();
    assert_eq!(keys(&map), [150, 300]);

    let from = map.find(&300).unwrap().position().unwrap();
    let to = map.find(&150).unwrap().position().unwrap();
    assert_eq!(
        map.remove_range(from, to),
        Err(CursorError::TraversalExhausted(TraversalExhausted {
            direction: Direction::Forward
        })),
    );
    assert_eq!(map.len(), 2, "A failed range removal shouldn't remove anything.");
}

#[test]
fn test_nth() {
    let map = sample::<Postorder>();

    assert_eq!(map.nth(0), (&10, &'c'));
    assert_eq!(map.nth(5), (&100, &'a'));
    assert_eq!(map.try_nth(6), Err(IndexOutOfBounds { index: 6, len: 6 }));
    assert_panics!({ map.nth(6) }, "Index 6 out of bounds");
}

#[test]
fn test_equality() {
    let a: BinaryTreeMap<u32, u32> = [(1, 1), (2, 2), (3, 3)].into();
    let b: BinaryTreeMap<u32, u32, Postorder> = [(3, 3), (1, 1), (2, 2)].into();
    assert_eq!(a, b, "Shape and traversal order shouldn't affect equality.");

    let c: BinaryTreeMap<u32, u32> = [(1, 1), (2, 2), (3, 4)].into();
    assert_ne!(a, c);

    let mut d: BinaryTreeMap<u32, u32> = [(1, 1), (2, 2), (3, 3)].into();
    d.remove(&2);
    let e: BinaryTreeMap<u32, u32> = [(1, 1), (3, 3)].into();
    assert_eq!(d, e);
    assert_ne!(a, d);
}

#[test]
fn test_clone_is_independent() {
    let mut original = sample::<Preorder>();
    let mut copy = original.clone();
    copy.verify_links();

    assert_eq!(original, copy);
    assert_eq!(keys(&original), keys(&copy), "Cloning should keep the shape of the tree.");
    assert_eq!(copy.last_inserted(), Some((&300, &'f')));

    copy.remove(&100);
    copy.insert(1, 'z');
    assert_eq!(original.len(), 6);
    assert!(original.contains(&100));
    assert!(!original.contains(&1));

    original.clear();
    assert_eq!(copy.len(), 6);
}

#[test]
fn test_swap() {
    let mut a: BinaryTreeMap<u32, u32> = [(1, 1), (2, 2)].into();
    let mut b: BinaryTreeMap<u32, u32> = [(3, 3)].into();

    a.swap(&mut b);
    assert_eq!(a.keys().copied().collect::<Vec<_>>(), [3]);
    assert_eq!(b.keys().copied().collect::<Vec<_>>(), [1, 2]);

    let mut c: BinaryTreeMap<u32, u32> = [(2, 2), (1, 1)].into();
    b.swap(&mut c);
    assert_eq!(
        b.keys().copied().collect::<Vec<_>>(),
        [1, 2],
        "Swapping equal maps should do nothing."
    );
}

#[test]
fn test_merge() {
    let mut empty = BinaryTreeMap::<u32, char>::new();
    let source = sample::<Inorder>();
    empty.merge(&source);
    empty.verify_links();
    assert_eq!(empty, source);
    assert_eq!(
        empty.iter_in::<Preorder>().map(|e| *e.0).collect::<Vec<_>>(),
        [100, 20, 10, 200, 150, 300],
        "Merging into an empty map should copy the shape."
    );

    let mut map: BinaryTreeMap<u32, char> = [(20, 'a'), (5, 'z')].into();
    map.merge(&source);
    map.verify_links();
    assert_eq!(map.len(), 7);
    assert_eq!(map.get(&20), Some(&'a'), "Merging should keep the smaller value.");
}

#[test]
fn test_into_iter() {
    let map = sample::<Inorder>();
    let mut iter = map.into_iter();

    assert_eq!(iter.next(), Some((10, 'c')));
    assert_eq!(iter.next_back(), Some((300, 'f')));
    assert_eq!(iter.collect::<Vec<_>>(), [(20, 'b'), (100, 'a'), (150, 'e'), (200, 'd')]);

    let preorder: Vec<_> = sample::<Preorder>().into_iter().map(|e| e.0).collect();
    assert_eq!(preorder, [100, 20, 10, 200, 150, 300]);
}

#[test]
fn test_drops() {
    let drops = Rc::new(Cell::new(0));
    let mut map = BinaryTreeMap::<CountedDrop, u32>::new();
    for id in [4, 2, 6, 1, 3, 5, 7] {
        map.insert(CountedDrop::new(id, &drops), 0);
    }

    map.insert(CountedDrop::new(4, &drops), 1);
    assert_eq!(drops.get(), 1, "A rejected duplicate key should be dropped.");

    map.remove(&CountedDrop::new(4, &drops));
    assert_eq!(drops.get(), 3, "The removed key and the probe should both be dropped.");

    let mut iter = map.into_iter();
    iter.next();
    assert_eq!(drops.get(), 4);
    drop(iter);
    assert_eq!(drops.get(), 9, "Dropping an owned iterator should drop what's left.");

    let mut map = BinaryTreeMap::<CountedDrop, u32>::new();
    for id in 0..10 {
        map.insert(CountedDrop::new(id, &drops), 0);
    }
    map.clear();
    assert_eq!(drops.get(), 19, "Clearing should drop every entry.");
}

#[test]
fn test_degenerate_tree() {
    let mut map: BinaryTreeMap<u32, (), Postorder> = (0..3_000).map(|k| (k, ())).collect();
    let copy = map.clone();

    assert_eq!(copy.len(), 3_000, "Cloning a deep tree shouldn't overflow the stack.");
    assert_eq!(map.cursor_front().key(), Some(&2_999));
    assert_eq!(map.cursor_back().key(), Some(&0));

    map.remove(&0);
    assert_eq!(map.cursor_back().key(), Some(&1));
}

#[test]
fn test_debug_render() {
    let map: BinaryTreeMap<u32, char, Inorder> = [(2, 'b'), (1, 'a'), (4, 'd'), (3, 'c')].into();
    let render = Render {
        store: &map.store,
        root: map.root,
    };
    assert_eq!(
        format!("{render:?}"),
        "\n┌── (1: 'a')\n(2: 'b')\n    ┌── (3: 'c')\n└── (4: 'd')\n"
    );

    let empty = BinaryTreeMap::<u32, char>::new();
    let render = Render {
        store: &empty.store,
        root: empty.root,
    };
    assert_eq!(format!("{render:?}"), "-");

    let deep: BinaryTreeMap<u32, ()> = (0..2_000).map(|k| (k, ())).collect();
    let rendered = format!("{deep:?}");
    assert_eq!(
        rendered.lines().filter(|l| l.ends_with(": ())")).count(),
        2_000,
        "Rendering a deep tree should write one line per node without overflowing the stack."
    );
}

#[test]
fn test_display() {
    let map: BinaryTreeMap<u32, char, Inorder> = [(2, 'b'), (1, 'a')].into();
    assert_eq!(format!("{map}"), "{1: 'a', 2: 'b'}");
    assert!(format!("{map:?}").contains("inorder"));
}

/// Walks a tree recursively, as a reference for the link-based stepping.
fn reference_walk<O: Traversal>(
    store: &NodeStore<u16, ()>,
    handle: Option<Handle>,
    out: &mut Vec<u16>,
) {
    let Some(handle) = handle else {
        return;
    };
    let node = store.node(handle);
    let (key, left, right) = (node.key, node.links.left, node.links.right);

    if O::NAME == Preorder::NAME {
        out.push(key);
    }
    reference_walk::<O>(store, left, out);
    if O::NAME == Inorder::NAME {
        out.push(key);
    }
    reference_walk::<O>(store, right, out);
    if O::NAME == Postorder::NAME {
        out.push(key);
    }
}

/// Checks that a cursor walks the whole tree in both directions, and that every forward step can
/// be undone by a backward one.
fn check_cursor_walk<O: Traversal>(keys: &[u16]) -> Result<(), TestCaseError> {
    let map: BinaryTreeMap<u16, (), O> = keys.iter().map(|k| (*k, ())).collect();
    let mut expected = vec![];
    reference_walk::<O>(&map.store, map.root, &mut expected);

    let mut cursor = map.cursor_front();
    let mut forward: Vec<u16> = cursor.key().copied().into_iter().collect();
    while cursor.move_next().is_ok() {
        forward.push(*cursor.key().unwrap());
        let mut back = cursor;
        prop_assert!(back.move_prev().is_ok());
        prop_assert_eq!(back.key(), forward.get(forward.len() - 2));
    }

    let mut cursor = map.cursor_back();
    let mut backward: Vec<u16> = cursor.key().copied().into_iter().collect();
    while cursor.move_prev().is_ok() {
        backward.push(*cursor.key().unwrap());
    }
    backward.reverse();

    prop_assert_eq!(forward.len(), map.len());
    prop_assert_eq!(&forward, &expected);
    prop_assert_eq!(&backward, &expected);
    Ok(())
}

proptest! {
    #[test]
    fn prop_inorder_is_sorted(keys in proptest::collection::vec(any::<u16>(), 0..200)) {
        let map: BinaryTreeMap<u16, (), Inorder> = keys.iter().map(|k| (*k, ())).collect();
        let mut expected = keys.clone();
        expected.sort();
        expected.dedup();

        prop_assert_eq!(map.len(), expected.len());
        prop_assert_eq!(map.keys().copied().collect::<Vec<_>>(), expected);
        map.verify_links();
    }

    #[test]
    fn prop_cursor_walks(keys in proptest::collection::vec(any::<u16>(), 0..200)) {
        check_cursor_walk::<Preorder>(&keys)?;
        check_cursor_walk::<Inorder>(&keys)?;
        check_cursor_walk::<Postorder>(&keys)?;
    }

    #[test]
    fn prop_remove(
        keys in proptest::collection::vec(any::<u8>(), 0..100),
        removed in proptest::collection::vec(any::<u8>(), 0..50),
    ) {
        let mut map: BinaryTreeMap<u8, ()> = keys.iter().map(|k| (*k, ())).collect();
        for key in &removed {
            let len = map.len();
            let existed = map.contains(key);
            map.remove(key);
            prop_assert!(!map.contains(key));
            prop_assert_eq!(map.len(), if existed { len - 1 } else { len });
            map.verify_links();
        }
    }
}
