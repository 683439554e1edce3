/// Orderings a [`skiplist::SkipList`] can be built with.
pub mod comparator;
/// Construction settings for a [`skiplist::SkipList`].
pub mod config;
/// Element encoding used by the persisted image of a list.
pub mod encoding;
pub mod errs;
/// An ordered, duplicate-free [`skip list`] with rank access, uniform sampling
/// and a checksummed binary image.
///
/// [`skip list`]: https://en.wikipedia.org/wiki/Skip_list
pub mod skiplist;

pub use crate::{
    comparator::{
        Comparator,
        NaturalOrder,
        OrderBy,
    },
    config::Config,
    errs::{
        DecodeError,
        SkipListError,
    },
    skiplist::SkipList,
};
