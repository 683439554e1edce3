// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use rand::Rng;
use tracing::instrument;

use super::SkipList;
use crate::{
    comparator::Comparator,
    errs::SkipListError,
};

/// Draw `k` one-based ranks in `[1, len]` with replacement, ascending.
fn draw_ranks<R: Rng + ?Sized>(len: usize, k: usize, rng: &mut R) -> Result<Vec<usize>, SkipListError> {
    if k == 0 {
        return Ok(Vec::new());
    }
    if len == 0 {
        return Err(SkipListError::Empty);
    }

    let mut ranks: Vec<usize> = (0..k).map(|_| rng.gen_range(1..=len)).collect();
    ranks.sort_unstable();
    Ok(ranks)
}

impl<T, C: Comparator<T>> SkipList<T, C> {
    /// A uniformly chosen element, using the list's own rng.
    pub fn sample_one(&mut self) -> Result<&T, SkipListError> {
        let ranks = draw_ranks(self.len, 1, &mut self.rng)?;
        self.collect_ranks(&ranks)
            .pop()
            .ok_or(SkipListError::Empty)
    }

    /// `k` elements drawn uniformly with replacement, in ascending order. An
    /// element drawn more than once appears that many times.
    pub fn sample_many(&mut self, k: usize) -> Result<Vec<&T>, SkipListError> {
        let ranks = draw_ranks(self.len, k, &mut self.rng)?;
        Ok(self.collect_ranks(&ranks))
    }

    /// Same as [`sample_one`](Self::sample_one), drawing from `rng`.
    pub fn sample_one_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&T, SkipListError> {
        let ranks = draw_ranks(self.len, 1, rng)?;
        self.collect_ranks(&ranks)
            .pop()
            .ok_or(SkipListError::Empty)
    }

    /// Same as [`sample_many`](Self::sample_many), drawing from `rng`.
    pub fn sample_many_with<R: Rng + ?Sized>(
        &self,
        k: usize,
        rng: &mut R,
    ) -> Result<Vec<&T>, SkipListError> {
        let ranks = draw_ranks(self.len, k, rng)?;
        Ok(self.collect_ranks(&ranks))
    }

    /// One pass along level 0 picking the value at each one-based rank in
    /// `ranks`, which must be sorted.
    #[instrument(level = "trace", skip_all, fields(k = ranks.len()))]
    fn collect_ranks(&self, ranks: &[usize]) -> Vec<&T> {
        let mut picked = Vec::with_capacity(ranks.len());
        let mut links = self.links();
        let mut current = links.next();
        let mut position = 1;
        let mut pending = ranks.iter().peekable();

        while let (Some(index), Some(&&rank)) = (current, pending.peek()) {
            if position == rank {
                picked.push(self.key(index));
                pending.next();
            } else {
                position += 1;
                current = links.next();
            }
        }

        picked
    }
}
