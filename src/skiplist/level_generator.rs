// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use rand::prelude::*;

use crate::{
    config::Config,
    errs::SkipListError,
};

/// Upon the insertion of a new node in the list, the node is replicated to high
/// levels with a certain probability as determined by a `LevelGenerator`.
pub trait LevelGenerator {
    /// The highest level this generator will ever produce.
    fn max_level(&self) -> usize;
    /// Generate a random level for a new node in the range `[0, max_level]`.
    ///
    /// This must never return a level that is `> self.max_level()`.
    fn random(&mut self) -> usize;
}

/// A level generator which will produce geometrically distributed numbers.
///
/// Starting from level 0, a coin which lands heads with probability `p` is
/// flipped; every head promotes the node one level, the first tail stops.
/// With `p = 0.5` the chance of level `k` is `2^-(k+1)`, and whatever mass lies
/// above `max_level` is folded into `max_level` itself.
#[derive(Debug, Clone)]
pub struct GeometricalLevelGenerator {
    max_level: usize,
    p: f64,
    rng: SmallRng, // Fast generator
}

impl GeometricalLevelGenerator {
    /// Create a new GeometricalLevelGenerator producing levels in
    /// `[0, max_level]`, with `p` as the probability that a given node is
    /// present in the next level.
    pub fn new(max_level: usize, p: f64) -> Result<Self, SkipListError> {
        let config = Config::new(max_level).with_probability(p);
        config.validate()?;
        Ok(Self::from_config(&config))
    }

    /// Same as [`GeometricalLevelGenerator::new`] but deterministic.
    pub fn with_seed(max_level: usize, p: f64, seed: u64) -> Result<Self, SkipListError> {
        let config = Config::new(max_level).with_probability(p).with_seed(seed);
        config.validate()?;
        Ok(Self::from_config(&config))
    }

    /// Build from a config the caller has already validated.
    pub(crate) fn from_config(config: &Config) -> Self {
        let rng = match config.seed() {
            | Some(seed) => SmallRng::seed_from_u64(seed),
            | None => SmallRng::from_entropy(),
        };
        GeometricalLevelGenerator {
            max_level: config.max_level(),
            p: config.probability(),
            rng,
        }
    }

    pub fn probability(&self) -> f64 {
        self.p
    }
}

impl LevelGenerator for GeometricalLevelGenerator {
    fn random(&mut self) -> usize {
        let mut h = 0;
        while h < self.max_level && self.rng.gen_bool(self.p) {
            h += 1;
        }
        h
    }

    fn max_level(&self) -> usize {
        self.max_level
    }
}

#[cfg(test)]
mod tests {
    use super::{
        GeometricalLevelGenerator,
        LevelGenerator,
    };
    use crate::errs::SkipListError;

    #[test]
    fn invalid_max_level() {
        assert_eq!(
            GeometricalLevelGenerator::new(0, 0.5).unwrap_err(),
            SkipListError::InvalidMaxLevel(0)
        );
    }

    #[test]
    fn invalid_p_0() {
        assert!(GeometricalLevelGenerator::new(1, 0.0).is_err());
    }

    #[test]
    fn invalid_p_1() {
        assert!(GeometricalLevelGenerator::new(1, 1.0).is_err());
    }

    #[test]
    fn invalid_max_level_above_limit() {
        assert_eq!(
            GeometricalLevelGenerator::new(usize::MAX, 0.5).unwrap_err(),
            SkipListError::InvalidMaxLevel(usize::MAX)
        );
    }

    #[test]
    fn new() {
        assert!(GeometricalLevelGenerator::new(1, 0.5).is_ok());
    }

    #[test]
    fn never_exceeds_max_level() {
        let mut lg = GeometricalLevelGenerator::with_seed(3, 0.9, 42).unwrap();
        let mut seen_max = false;
        for _ in 0..10_000 {
            let level = lg.random();
            assert!(level <= lg.max_level());
            seen_max |= level == 3;
        }
        assert!(seen_max, "p = 0.9 should saturate the ceiling regularly");
    }

    #[test]
    fn roughly_geometric() {
        let mut lg = GeometricalLevelGenerator::with_seed(16, 0.5, 7).unwrap();
        let samples = 100_000;
        let mut counts = [0usize; 17];
        for _ in 0..samples {
            counts[lg.random()] += 1;
        }

        // P(0) = 1/2, P(1) = 1/4, P(2) = 1/8
        for (level, expected) in [(0, 0.5), (1, 0.25), (2, 0.125)] {
            let observed = counts[level] as f64 / samples as f64;
            assert!(
                (observed - expected).abs() < 0.01,
                "level {} observed {} expected {}",
                level,
                observed,
                expected
            );
        }
    }

    #[test]
    fn seeded_is_deterministic() {
        let mut a = GeometricalLevelGenerator::with_seed(8, 0.5, 99).unwrap();
        let mut b = GeometricalLevelGenerator::with_seed(8, 0.5, 99).unwrap();
        for _ in 0..100 {
            assert_eq!(a.random(), b.random());
        }
    }
}
