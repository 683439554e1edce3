// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use getset::CopyGetters;

use crate::errs::SkipListError;

/// The default ladder ceiling. Ten levels comfortably index a few thousand
/// elements before the top level stops thinning out.
pub const DEFAULT_MAX_LEVEL: usize = 10;

/// The highest `max_level` accepted. A fair coin would need about 2^64
/// elements before a node reached this level.
pub const MAX_LEVEL_LIMIT: usize = 64;

/// The chance a node is promoted to the next level. `0.5` is a fair coin.
pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// Construction parameters for a [`SkipList`](crate::skiplist::SkipList).
#[derive(Debug, Clone, Copy, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Config {
    /// Highest level index a node may be assigned.
    max_level: usize,
    /// Promotion probability used by the level generator.
    probability: f64,
    /// Fixed rng seed. `None` seeds from the operating system.
    seed: Option<u64>,
}

impl Config {
    pub fn new(max_level: usize) -> Self {
        Config {
            max_level,
            ..Default::default()
        }
    }

    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), SkipListError> {
        if !(1..=MAX_LEVEL_LIMIT).contains(&self.max_level) {
            return Err(SkipListError::InvalidMaxLevel(self.max_level));
        }
        if !(self.probability > 0.0 && self.probability < 1.0) {
            return Err(SkipListError::InvalidProbability(self.probability));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_level: DEFAULT_MAX_LEVEL,
            probability: DEFAULT_PROBABILITY,
            seed: None,
        }
    }
}
