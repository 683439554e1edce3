// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

//! An ordered, duplicate-free skiplist. The lowest level (level 0) links every
//! element in ascending order, and each level `n > 0` links a random subset of
//! the elements on level `n - 1`, which lets a search skip most of the list.
//!
//! Levels follow a geometric distribution: the chance that a node occupies
//! level `n` is `p` times the chance of occupying level `n-1` (with
//! `0 < p < 1`, a fair coin by default). No rebalancing ever happens; the
//! expected cost of search, insertion and deletion is `O(log n)`, though
//! nothing bounds the worst case.
//!
//! Nodes live in a single arena and link to each other by index. Deleting an
//! element only unsplices it from its predecessors; the node itself, its value
//! and its own links stay in the arena until [`SkipList::compact`] or
//! [`SkipList::clear`] rebuilds it. This is what gives a detached
//! [`Cursor`] its weak semantics, see [`iter`].
//!
//! ```
//! use skipset::skiplist::SkipList;
//!
//! let mut list = SkipList::new(4).unwrap();
//! list.add_many([5, 1, 4, 2, 3]);
//! assert_eq!(list.to_vec(), vec![&1, &2, &3, &4, &5]);
//!
//! assert!(list.delete(&3));
//! assert_eq!(list.search_range(&2, &4), vec![&2, &4]);
//! assert_eq!(list.get_at(0), Some(&1));
//! ```

mod codec;
mod dump;
pub mod iter;
mod level_generator;
mod node;
mod rank;
mod sample;

#[cfg(test)]
mod test;

use std::fmt;

use rand::prelude::*;
use tracing::{
    debug,
    instrument,
};

pub use self::{
    iter::{
        Cursor,
        IntoIter,
        Iter,
    },
    level_generator::{
        GeometricalLevelGenerator,
        LevelGenerator,
    },
    node::NodeRef,
};
use self::node::{
    Link,
    Node,
    HEAD,
};
use crate::{
    comparator::{
        Comparator,
        NaturalOrder,
    },
    config::Config,
    errs::SkipListError,
};

/// A probabilistically balanced ordered set.
///
/// Elements are kept in ascending order under the comparator `C`, and no two
/// stored elements ever compare equal. See the [module docs](self) for the
/// structure.
#[derive(Clone)]
pub struct SkipList<T, C = NaturalOrder> {
    // nodes[HEAD] is the sentinel, every other slot holds a value
    nodes: Vec<Node<T>>,
    max_level: usize,
    level: usize,
    len: usize,
    epoch: u64,
    comparator: C,
    level_generator: GeometricalLevelGenerator,
    rng: SmallRng,
}

impl<T: Ord> SkipList<T, NaturalOrder> {
    /// Create an empty list ordered by `T`'s [`Ord`] implementation, whose
    /// nodes occupy at most levels `0..=max_level`.
    pub fn new(max_level: usize) -> Result<Self, SkipListError> {
        Self::with_comparator(max_level, NaturalOrder)
    }
}

impl<T, C: Comparator<T>> SkipList<T, C> {
    pub fn with_comparator(max_level: usize, comparator: C) -> Result<Self, SkipListError> {
        Self::with_config(Config::new(max_level), comparator)
    }

    pub fn with_config(config: Config, comparator: C) -> Result<Self, SkipListError> {
        config.validate()?;
        let level_generator = GeometricalLevelGenerator::from_config(&config);
        let rng = match config.seed() {
            // keep sampling draws independent of level draws
            | Some(seed) => SmallRng::seed_from_u64(seed.rotate_left(32) ^ 0x5DEE_CE66),
            | None => SmallRng::from_entropy(),
        };

        Ok(SkipList {
            nodes: vec![Node::head(config.max_level())],
            max_level: config.max_level(),
            level: 0,
            len: 0,
            epoch: 0,
            comparator,
            level_generator,
            rng,
        })
    }

    /// The number of elements in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The ceiling on node levels fixed at construction.
    #[inline]
    pub fn max_level(&self) -> usize {
        self.max_level
    }

    /// The highest level any linked node currently occupies.
    #[inline]
    pub fn current_level(&self) -> usize {
        self.level
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Swap in a different comparator, keeping the nodes as they are.
    ///
    /// The existing order is not re-checked, so `comparator` must agree with
    /// the one the list was built under. This is how a comparator is
    /// re-supplied after [`decode`](SkipList::decode).
    pub fn replace_comparator<D: Comparator<T>>(self, comparator: D) -> SkipList<T, D> {
        SkipList {
            nodes: self.nodes,
            max_level: self.max_level,
            level: self.level,
            len: self.len,
            epoch: self.epoch,
            comparator,
            level_generator: self.level_generator,
            rng: self.rng,
        }
    }

    /// Find the node holding an element equal to `value`.
    #[instrument(level = "trace", skip_all)]
    pub fn search(&self, value: &T) -> Option<NodeRef> {
        let candidate = self.lower_bound(value)?;
        self.comparator
            .equal(self.key(candidate), value)
            .then(|| NodeRef::new(candidate, self.epoch))
    }

    /// The stored element equal to `value`, if any.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.search(value).map(|node| self.key(node.index))
    }

    pub fn contains(&self, value: &T) -> bool {
        self.search(value).is_some()
    }

    /// Resolve a handle to its value. Handles to deleted nodes still resolve;
    /// handles minted before the last [`clear`](Self::clear) or
    /// [`compact`](Self::compact) do not.
    pub fn value(&self, node: NodeRef) -> Option<&T> {
        if node.epoch != self.epoch || node.index == HEAD {
            return None;
        }
        self.nodes.get(node.index).and_then(|n| n.value.as_ref())
    }

    /// Whether the handle's node is still part of the list.
    pub fn is_linked(&self, node: NodeRef) -> bool {
        node.epoch == self.epoch
            && node.index != HEAD
            && self.nodes.get(node.index).is_some_and(|n| !n.detached)
    }

    /// Every element `e` with `low <= e <= high`, ascending.
    #[instrument(level = "trace", skip_all)]
    pub fn search_range(&self, low: &T, high: &T) -> Vec<&T> {
        let mut found = Vec::new();
        let mut current = self.lower_bound(low);

        while let Some(index) = current {
            let value = self.key(index);
            if !(self.comparator.less_than(value, high) || self.comparator.equal(value, high)) {
                break;
            }
            found.push(value);
            current = self.nodes[index].next(0);
        }

        found
    }

    /// Insert `value` unless an equal element is already present. Returns the
    /// handle of the new node, or of the existing one, in which case `value` is
    /// dropped and the list is untouched.
    #[instrument(level = "trace", skip_all)]
    pub fn add(&mut self, value: T) -> NodeRef {
        let mut update = self.predecessors(&value);

        if let Some(existing) = self.nodes[update[0]].next(0) {
            if self.comparator.equal(self.key(existing), &value) {
                return NodeRef::new(existing, self.epoch);
            }
        }

        let level = self.level_generator.random();
        if level > self.level {
            for slot in update.iter_mut().take(level + 1).skip(self.level + 1) {
                *slot = HEAD;
            }
            debug!(from = self.level, to = level, "raising current level");
            self.level = level;
        }

        let index = self.nodes.len();
        let mut node = Node::new(value, level);
        for (l, link) in node.forward.iter_mut().enumerate() {
            *link = self.nodes[update[l]].forward[l];
        }
        self.nodes.push(node);
        for (l, &predecessor) in update.iter().enumerate().take(level + 1) {
            self.nodes[predecessor].forward[l] = Some(index);
        }

        self.len += 1;
        NodeRef::new(index, self.epoch)
    }

    /// Add every element of `values`, in order.
    pub fn add_many<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for value in values {
            self.add(value);
        }
    }

    /// Remove the element equal to `value`. Returns `false`, leaving the list
    /// unchanged, when there is none.
    ///
    /// The removed element is not dropped. Its node stays in the arena so
    /// handles and cursors on it keep resolving, and the value is released by
    /// the next [`compact`](Self::compact) or [`clear`](Self::clear). Lists
    /// holding resource-owning elements under heavy churn should compact
    /// periodically.
    #[instrument(level = "trace", skip_all)]
    pub fn delete(&mut self, value: &T) -> bool {
        let update = self.predecessors(value);
        match self.nodes[update[0]].next(0) {
            | Some(target) if self.comparator.equal(self.key(target), value) => {
                self.unlink(target, &update);
                true
            },
            | _ => false,
        }
    }

    /// The elements in ascending order.
    pub fn to_vec(&self) -> Vec<&T> {
        self.iter().collect()
    }

    /// Drop every element. Outstanding handles and cursors stop resolving.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(Node::head(self.max_level));
        self.level = 0;
        self.len = 0;
        self.epoch += 1;
    }

    /// Rebuild the arena without the nodes deleted so far, keeping every
    /// linked node's level. Outstanding handles and cursors stop resolving.
    pub fn compact(&mut self) {
        let detached = self.nodes.len() - 1 - self.len;
        let order: Vec<usize> = self.links().collect();
        let mut old: Vec<Option<Node<T>>> = std::mem::take(&mut self.nodes)
            .into_iter()
            .map(Some)
            .collect();

        self.nodes = Vec::with_capacity(self.len + 1);
        self.nodes.push(Node::head(self.max_level));
        self.level = 0;
        self.len = 0;
        self.epoch += 1;

        let mut tails = vec![HEAD; self.max_level + 1];
        for index in order {
            if let Some(Node {
                value: Some(value),
                forward,
                ..
            }) = old[index].take()
            {
                self.push_tail(&mut tails, value, forward.len() - 1);
            }
        }

        debug!(reclaimed = detached, len = self.len, "compacted skiplist");
    }

    /// Append `value` after every current element, skipping the search. The
    /// caller guarantees `value` sorts after the last element.
    pub(crate) fn push_tail(&mut self, tails: &mut [usize], value: T, level: usize) {
        let index = self.nodes.len();
        self.nodes.push(Node::new(value, level));
        for (l, tail) in tails.iter_mut().enumerate().take(level + 1) {
            self.nodes[*tail].forward[l] = Some(index);
            *tail = index;
        }
        self.level = self.level.max(level);
        self.len += 1;
    }

    /// The value of a linked node. Links never point at the head.
    #[inline]
    fn key(&self, index: usize) -> &T {
        match &self.nodes[index].value {
            | Some(value) => value,
            | None => unreachable!("the head node is never linked"),
        }
    }

    /// Walk down from the head at the current level. At each level, advance
    /// while the next node is less than `value`, report the last node passed to
    /// `visit`, then drop a level without restarting. Returns the last node
    /// less than `value` on level 0.
    #[inline]
    fn descend(&self, value: &T, mut visit: impl FnMut(usize, usize)) -> usize {
        let mut current = HEAD;
        for level in (0..=self.level).rev() {
            while let Some(next) = self.nodes[current].next(level) {
                if !self.comparator.less_than(self.key(next), value) {
                    break;
                }
                current = next;
            }
            visit(level, current);
        }
        current
    }

    /// The first node not less than `value`.
    fn lower_bound(&self, value: &T) -> Link {
        let last = self.descend(value, |_, _| {});
        self.nodes[last].next(0)
    }

    /// Per level, the node whose link would have to change to splice a node
    /// holding `value` in or out. Levels above the current one point at the
    /// head.
    fn predecessors(&self, value: &T) -> Vec<usize> {
        let mut update = vec![HEAD; self.max_level + 1];
        self.descend(value, |level, node| update[level] = node);
        update
    }

    /// Unsplice `target` at every level where `update` links to it, then trim
    /// empty top levels. `target` keeps its own links.
    fn unlink(&mut self, target: usize, update: &[usize]) {
        for level in 0..=self.level {
            let predecessor = update[level];
            if self.nodes[predecessor].next(level) == Some(target) {
                self.nodes[predecessor].forward[level] = self.nodes[target].next(level);
            }
        }
        self.nodes[target].detached = true;

        let before = self.level;
        while self.level > 0 && self.nodes[HEAD].forward[self.level].is_none() {
            self.level -= 1;
        }
        if self.level != before {
            debug!(from = before, to = self.level, "trimmed current level");
        }

        self.len -= 1;
    }
}

impl<T: Ord> Default for SkipList<T, NaturalOrder> {
    fn default() -> Self {
        let config = Config::default();
        SkipList {
            nodes: vec![Node::head(config.max_level())],
            max_level: config.max_level(),
            level: 0,
            len: 0,
            epoch: 0,
            comparator: NaturalOrder,
            level_generator: GeometricalLevelGenerator::from_config(&config),
            rng: SmallRng::from_entropy(),
        }
    }
}

impl<T: Ord> FromIterator<T> for SkipList<T, NaturalOrder> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = SkipList::default();
        list.add_many(iter);
        list
    }
}

impl<T, C: Comparator<T>> Extend<T> for SkipList<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_many(iter);
    }
}

impl<T: fmt::Debug, C: Comparator<T>> fmt::Debug for SkipList<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
