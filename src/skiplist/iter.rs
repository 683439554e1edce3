// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

//! Iteration over a [`SkipList`] in ascending order.
//!
//! [`Iter`] and [`IntoIter`] are ordinary Rust iterators: `Iter` borrows the
//! list, so the list cannot change underneath it.
//!
//! [`Cursor`] is different. It holds a position in the node arena instead of a
//! borrow, so the list may be mutated between steps, and each step reads
//! whatever links exist at that moment. Mutation while a cursor is live makes
//! the visiting order undefined, though never unsafe:
//!
//! - if the node under the cursor is deleted, the cursor keeps following that
//!   node's old forward links, so it may visit other since-deleted nodes, or
//!   skip elements inserted after it;
//! - elements inserted ahead of the cursor on live links are visited.
//!
//! Every node a cursor can reach still holds its value, so
//! [`Cursor::current`] never dangles. [`Cursor::rewind`] restarts from the
//! first element. After [`SkipList::clear`] or [`SkipList::compact`] a cursor
//! is exhausted until rewound.

use std::iter::FusedIterator;

use super::{
    node::{
        Link,
        Node,
        HEAD,
    },
    NodeRef,
    SkipList,
};
use crate::comparator::Comparator;

/// Arena indices of the linked nodes, level 0 order.
pub(crate) struct Links<'a, T> {
    nodes: &'a [Node<T>],
    next: Link,
}

impl<T> Iterator for Links<'_, T> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        let current = self.next?;
        self.next = self.nodes[current].next(0);
        Some(current)
    }
}

impl<T, C: Comparator<T>> SkipList<T, C> {
    pub(crate) fn links(&self) -> Links<'_, T> {
        Links {
            nodes: &self.nodes,
            next: self.nodes[HEAD].next(0),
        }
    }

    /// Borrowing iterator over the elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            links: self.links(),
            remaining: self.len,
        }
    }

    /// A detached cursor positioned on the first element.
    pub fn cursor(&self) -> Cursor {
        Cursor {
            position: self.nodes[HEAD].next(0),
            epoch: self.epoch,
        }
    }
}

/// Borrowing iterator returned by [`SkipList::iter`].
pub struct Iter<'a, T> {
    links: Links<'a, T>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let index = self.links.next()?;
        self.remaining = self.remaining.saturating_sub(1);
        let nodes = self.links.nodes;
        nodes[index].value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T, C: Comparator<T>> IntoIterator for &'a SkipList<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Owning iterator returned by `SkipList::into_iter`.
pub struct IntoIter<T> {
    nodes: Vec<Node<T>>,
    next: Link,
    remaining: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let current = self.next?;
        let node = &mut self.nodes[current];
        self.next = node.next(0);
        self.remaining = self.remaining.saturating_sub(1);
        node.value.take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T, C> IntoIterator for SkipList<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            next: self.nodes[HEAD].next(0),
            nodes: self.nodes,
            remaining: self.len,
        }
    }
}

/// A restartable position in a [`SkipList`] that does not borrow it. See the
/// [module docs](self) for how it behaves under mutation.
///
/// ```
/// use skipset::skiplist::SkipList;
///
/// let mut list = SkipList::new(4).unwrap();
/// list.add_many([1, 2, 3]);
///
/// let mut cursor = list.cursor();
/// let mut seen = Vec::new();
/// while let Some(value) = cursor.current(&list) {
///     seen.push(*value);
///     cursor.advance(&list);
/// }
/// assert_eq!(seen, vec![1, 2, 3]);
///
/// cursor.rewind(&list);
/// assert_eq!(cursor.current(&list), Some(&1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    position: Link,
    epoch: u64,
}

impl Cursor {
    /// The element under the cursor, `None` once past the end.
    pub fn current<'a, T, C>(&self, list: &'a SkipList<T, C>) -> Option<&'a T> {
        let index = self.resolve(list)?;
        list.nodes[index].value.as_ref()
    }

    /// The node under the cursor.
    pub fn node<T, C>(&self, list: &SkipList<T, C>) -> Option<NodeRef> {
        self.resolve(list).map(|index| NodeRef::new(index, self.epoch))
    }

    /// Step to the next node along the current node's level 0 link.
    pub fn advance<T, C>(&mut self, list: &SkipList<T, C>) {
        self.position = self.resolve(list).and_then(|index| list.nodes[index].next(0));
    }

    /// Return to the first element.
    pub fn rewind<T, C>(&mut self, list: &SkipList<T, C>) {
        self.position = list.nodes[HEAD].next(0);
        self.epoch = list.epoch;
    }

    pub fn is_valid<T, C>(&self, list: &SkipList<T, C>) -> bool {
        self.resolve(list).is_some()
    }

    fn resolve<T, C>(&self, list: &SkipList<T, C>) -> Link {
        if self.epoch != list.epoch {
            return None;
        }
        self.position.filter(|&index| index != HEAD && index < list.nodes.len())
    }
}
