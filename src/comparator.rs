// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::{
    cmp::Ordering,
    fmt,
};

/// The ordering strategy a [`SkipList`](crate::skiplist::SkipList) is built
/// around.
///
/// Implementations must describe a consistent strict total order: for any `a`
/// and `b`, exactly one of `less_than(a, b)`, `equal(a, b)` and
/// `less_than(b, a)` holds. The list does not check this. An inconsistent
/// comparator leaves the list unordered or holding duplicates, but never
/// causes memory unsafety.
pub trait Comparator<T: ?Sized> {
    fn less_than(&self, a: &T, b: &T) -> bool;
    fn equal(&self, a: &T, b: &T) -> bool;
}

/// Orders elements by their [`Ord`] implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn less_than(&self, a: &T, b: &T) -> bool {
        a < b
    }

    #[inline]
    fn equal(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

/// Adapts a three-way comparison closure into a [`Comparator`].
///
/// ```
/// use skipset::{comparator::OrderBy, skiplist::SkipList};
///
/// let mut list = SkipList::with_comparator(4, OrderBy(|a: &i32, b: &i32| b.cmp(a))).unwrap();
/// list.add_many([1, 3, 2]);
/// assert_eq!(list.to_vec(), vec![&3, &2, &1]);
/// ```
#[derive(Clone, Copy)]
pub struct OrderBy<F>(pub F);

impl<T, F> Comparator<T> for OrderBy<F>
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn less_than(&self, a: &T, b: &T) -> bool {
        (self.0)(a, b) == Ordering::Less
    }

    #[inline]
    fn equal(&self, a: &T, b: &T) -> bool {
        (self.0)(a, b) == Ordering::Equal
    }
}

impl<F> fmt::Debug for OrderBy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OrderBy(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_order() {
        assert!(NaturalOrder.less_than(&1, &2));
        assert!(!NaturalOrder.less_than(&2, &1));
        assert!(NaturalOrder.equal(&"a", &"a"));
        assert!(!NaturalOrder.equal(&"a", &"b"));
    }

    #[test]
    fn test_order_by_is_trichotomous() {
        // case-insensitive strings
        let cmp = OrderBy(|a: &String, b: &String| a.to_lowercase().cmp(&b.to_lowercase()));
        let (a, b) = ("Apple".to_string(), "apple".to_string());
        assert!(cmp.equal(&a, &b));
        assert!(!cmp.less_than(&a, &b));
        assert!(!cmp.less_than(&b, &a));

        let c = "banana".to_string();
        assert!(cmp.less_than(&a, &c));
        assert!(!cmp.equal(&a, &c));
    }
}
