// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

//! Persisted-state image of a [`SkipList`].
//!
//! All integers are little endian:
//!
//! ```text
//! magic "SKIPSET\0" | version u32 | max_level u64 | current_level u64 |
//! len u64 | probability f64 |
//! (level u32 | size u32 | element bytes) * len, ascending |
//! crc32 u32 over everything before it
//! ```
//!
//! Each node's level plus the ascending order fully determines the ladder, so
//! no links are written. The comparator is not part of the image: decoding
//! builds the list with `C::default()`, and a different comparator has to be
//! re-supplied with [`SkipList::replace_comparator`]. Decoding checks the
//! restored order under that default comparator.

use bytes::{
    Buf,
    BufMut,
    Bytes,
    BytesMut,
};
use crc32fast::Hasher;
use tracing::{
    debug,
    instrument,
    warn,
};

use super::{
    node::HEAD,
    SkipList,
};
use crate::{
    comparator::Comparator,
    config::Config,
    encoding::BinaryMarshaller,
    errs::{
        DecodeError,
        SkipListError,
    },
};

const MAGIC: &[u8; 8] = b"SKIPSET\0";
const VERSION: u32 = 1;
// magic, version, max_level, current_level, len, probability
const HEADER_LEN: usize = 8 + 4 + 8 + 8 + 8 + 8;
const CHECKSUM_LEN: usize = 4;
// level + size
const ENTRY_HEADER_LEN: usize = 4 + 4;

/// The entry size field is a u32, so a single element is capped at 4 GiB.
fn entry_size(len: usize) -> Result<u32, SkipListError> {
    u32::try_from(len).map_err(|_| SkipListError::ElementTooLarge(len))
}

fn take(buf: &mut Bytes, n: usize) -> Result<Bytes, DecodeError> {
    if buf.remaining() < n {
        return Err(DecodeError::Truncated {
            needed: n - buf.remaining(),
        });
    }
    Ok(buf.split_to(n))
}

impl<T: BinaryMarshaller, C: Comparator<T>> SkipList<T, C> {
    /// Serialize the list. See the [module docs](self) for the layout.
    ///
    /// Fails with [`SkipListError::ElementTooLarge`] when an element encodes
    /// to more than `u32::MAX` bytes.
    #[instrument(level = "debug", skip_all, fields(len = self.len))]
    pub fn encode(&self) -> Result<Bytes, SkipListError> {
        let body: usize = self
            .iter()
            .map(|v| ENTRY_HEADER_LEN + v.encoded_size())
            .sum();
        let mut buf = BytesMut::with_capacity(HEADER_LEN + body + CHECKSUM_LEN);

        buf.put_slice(MAGIC);
        buf.put_u32_le(VERSION);
        buf.put_u64_le(self.max_level as u64);
        buf.put_u64_le(self.level as u64);
        buf.put_u64_le(self.len as u64);
        buf.put_f64_le(self.level_generator.probability());

        for index in self.links() {
            let payload = self.key(index).encode();
            let size = entry_size(payload.len())?;
            // levels never exceed MAX_LEVEL_LIMIT
            buf.put_u32_le(self.nodes[index].level() as u32);
            buf.put_u32_le(size);
            buf.put(payload);
        }

        let mut hasher = Hasher::new();
        hasher.update(&buf);
        buf.put_u32_le(hasher.finalize());

        Ok(buf.freeze())
    }
}

impl<T: BinaryMarshaller, C: Comparator<T> + Default> SkipList<T, C> {
    /// Restore a list produced by [`encode`](Self::encode), ordered by
    /// `C::default()`.
    pub fn decode(src: Bytes) -> Result<Self, DecodeError> {
        Self::decode_image(src).inspect_err(|err| warn!(%err, "rejecting skiplist image"))
    }

    fn decode_image(src: Bytes) -> Result<Self, DecodeError> {
        if src.len() < MAGIC.len() {
            return Err(DecodeError::Truncated {
                needed: MAGIC.len() - src.len(),
            });
        }
        if &src[..MAGIC.len()] != MAGIC {
            return Err(DecodeError::InvalidMagic);
        }
        if src.len() < HEADER_LEN + CHECKSUM_LEN {
            return Err(DecodeError::Truncated {
                needed: HEADER_LEN + CHECKSUM_LEN - src.len(),
            });
        }

        let split = src.len() - CHECKSUM_LEN;
        let found = (&src[split..]).get_u32_le();
        let computed = crc32fast::hash(&src[..split]);
        if found != computed {
            return Err(DecodeError::ChecksumMismatch { found, computed });
        }

        let mut body = src.slice(MAGIC.len()..split);
        let version = body.get_u32_le();
        if version != VERSION {
            return Err(DecodeError::UnsupportedVersion(version));
        }
        // out-of-range values saturate and are rejected below
        let max_level = usize::try_from(body.get_u64_le()).unwrap_or(usize::MAX);
        let declared_level = usize::try_from(body.get_u64_le()).unwrap_or(usize::MAX);
        let declared_len = usize::try_from(body.get_u64_le()).unwrap_or(usize::MAX);
        let probability = body.get_f64_le();

        // validated before anything is sized from max_level
        let config = Config::new(max_level).with_probability(probability);
        let mut list = SkipList::with_config(config, C::default())
            .map_err(|e| DecodeError::InvalidConfig(e.to_string()))?;
        if declared_level > max_level {
            return Err(DecodeError::InvalidLevel {
                level: declared_level,
                max_level,
            });
        }

        let mut tails = vec![HEAD; max_level + 1];
        let mut position = 0;
        while body.has_remaining() {
            let mut entry = take(&mut body, ENTRY_HEADER_LEN)?;
            let level = entry.get_u32_le() as usize;
            let size = entry.get_u32_le() as usize;
            if level > max_level {
                return Err(DecodeError::InvalidLevel { level, max_level });
            }

            let value = T::decode(take(&mut body, size)?)?;
            if tails[0] != HEAD && !list.comparator.less_than(list.key(tails[0]), &value) {
                return Err(DecodeError::Unordered(position));
            }

            list.push_tail(&mut tails, value, level);
            position += 1;
        }

        if list.len != declared_len {
            return Err(DecodeError::LengthMismatch {
                field: "len",
                declared: declared_len,
                actual: list.len,
            });
        }
        if list.level != declared_level {
            return Err(DecodeError::LengthMismatch {
                field: "current level",
                declared: declared_level,
                actual: list.level,
            });
        }

        debug!(len = list.len, max_level, "decoded skiplist");
        Ok(list)
    }
}
