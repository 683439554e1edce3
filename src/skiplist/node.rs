// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

/// Arena slot of the sentinel head. It is never removed.
pub(crate) const HEAD: usize = 0;

/// A link to the next node at some level, as an arena index.
pub(crate) type Link = Option<usize>;

/// One arena slot. The head carries no value; every other node does.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: Option<T>,
    /// `forward[l]` is the next node participating at level `l`.
    pub(crate) forward: Vec<Link>,
    /// Set once the node has been unspliced from its predecessors. Its own
    /// `forward` links are left as they were.
    pub(crate) detached: bool,
}

impl<T> Node<T> {
    pub(crate) fn head(max_level: usize) -> Self {
        Node {
            value: None,
            forward: vec![None; max_level + 1],
            detached: false,
        }
    }

    pub(crate) fn new(value: T, level: usize) -> Self {
        Node {
            value: Some(value),
            forward: vec![None; level + 1],
            detached: false,
        }
    }

    /// Highest level index this node participates in.
    #[inline]
    pub(crate) fn level(&self) -> usize {
        self.forward.len() - 1
    }

    #[inline]
    pub(crate) fn next(&self, level: usize) -> Link {
        self.forward.get(level).copied().flatten()
    }
}

/// A handle to a node returned by [`add`](super::SkipList::add) and
/// [`search`](super::SkipList::search).
///
/// A handle stays resolvable after its node is deleted: the node is only
/// detached from the ladder, so [`SkipList::value`](super::SkipList::value)
/// still returns the value. Handles stop resolving once the list is cleared or
/// compacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub(crate) index: usize,
    pub(crate) epoch: u64,
}

impl NodeRef {
    pub(crate) fn new(index: usize, epoch: u64) -> Self {
        NodeRef { index, epoch }
    }
}
