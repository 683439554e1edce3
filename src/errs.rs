// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkipListError {
    #[error("max level must be in [1, 64], got {0}")]
    InvalidMaxLevel(usize),
    #[error("level probability must be in (0, 1), got {0}")]
    InvalidProbability(f64),
    #[error("cannot sample from an empty skiplist")]
    Empty,
    #[error("element of {0} bytes exceeds the 4 GiB entry limit")]
    ElementTooLarge(usize),
}

/// Reasons a persisted skiplist image is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid magic bytes")]
    InvalidMagic,
    #[error("unsupported format version {0}")]
    UnsupportedVersion(u32),
    #[error("input truncated, needed {needed} more bytes")]
    Truncated { needed: usize },
    #[error("checksum mismatch. found: {found} computed: {computed}")]
    ChecksumMismatch { found: u32, computed: u32 },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("level {level} exceeds max level {max_level}")]
    InvalidLevel { level: usize, max_level: usize },
    #[error("declared {field} {declared} does not match decoded {actual}")]
    LengthMismatch {
        field: &'static str,
        declared: usize,
        actual: usize,
    },
    #[error("element {0} is not strictly greater than its predecessor")]
    Unordered(usize),
    #[error("invalid element payload: {0}")]
    Value(String),
}
