// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use tracing::instrument;

use super::{
    node::Link,
    SkipList,
};
use crate::comparator::Comparator;

// Ranks are zero based. Nodes carry no span counts, so every rank lookup is a
// linear walk along level 0.
impl<T, C: Comparator<T>> SkipList<T, C> {
    fn index_at(&self, rank: usize) -> Link {
        if rank >= self.len {
            return None;
        }
        self.links().nth(rank)
    }

    /// The element at `rank` in ascending order. `O(n)`.
    pub fn get_at(&self, rank: usize) -> Option<&T> {
        self.index_at(rank).map(|index| self.key(index))
    }

    /// Remove whatever element holds `rank`, then add `value`. The new element
    /// lands at its sorted position, which need not be `rank`, and is added
    /// even when `rank` is out of range. Returns whether an element was
    /// removed.
    #[instrument(level = "trace", skip(self, value))]
    pub fn set_at(&mut self, rank: usize, value: T) -> bool {
        let removed = self.delete_at(rank);
        self.add(value);
        removed
    }

    /// Remove the element at `rank`. Returns `false` when `rank` is out of
    /// range.
    #[instrument(level = "trace", skip(self))]
    pub fn delete_at(&mut self, rank: usize) -> bool {
        let Some(target) = self.index_at(rank) else {
            return false;
        };

        // delete by value, the same way `delete` does
        let update = self.predecessors(self.key(target));
        let found = self.nodes[update[0]]
            .next(0)
            .filter(|&found| self.comparator.equal(self.key(found), self.key(target)));

        match found {
            | Some(found) => {
                self.unlink(found, &update);
                true
            },
            | None => false,
        }
    }
}
