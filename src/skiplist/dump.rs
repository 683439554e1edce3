// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::fmt::{
    Display,
    Write,
};

use super::{
    node::HEAD,
    SkipList,
};
use crate::comparator::Comparator;

impl<T, C: Comparator<T>> SkipList<T, C> {
    /// Render every level from `max_level` down to 0, one line each, as
    /// `"{level}:\t"` followed by the elements on that level.
    ///
    /// ```
    /// use skipset::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new(1).unwrap();
    /// list.add(1);
    /// let dump = list.dump();
    /// assert!(dump.ends_with("0:\t1 \n"));
    /// ```
    pub fn dump(&self) -> String
    where
        T: Display,
    {
        self.render(|out, value| {
            let _ = write!(out, "{} ", value);
        })
    }

    /// Like [`dump`](Self::dump), formatting each element with `convert`.
    pub fn dump_with<F>(&self, convert: F) -> String
    where
        F: Fn(&T) -> String,
    {
        self.render(|out, value| {
            out.push_str(&convert(value));
            out.push(' ');
        })
    }

    fn render(&self, mut write_value: impl FnMut(&mut String, &T)) -> String {
        let mut out = String::new();
        for level in (0..=self.max_level).rev() {
            let _ = write!(out, "{}:\t", level);
            let mut current = self.nodes[HEAD].next(level);
            while let Some(index) = current {
                write_value(&mut out, self.key(index));
                current = self.nodes[index].next(level);
            }
            out.push('\n');
        }
        out
    }
}
