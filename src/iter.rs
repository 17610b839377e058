//! Forward cursor over a `ChainTable`.
//!
//! Visits buckets in ascending index order and each chain from its head,
//! so within a bucket the most recently added entry comes first. The
//! iterator borrows the table, which rules out mutation while it is alive.

use crate::chain_table::{ChainTable, Link};
use core::iter::FusedIterator;

pub struct Iter<'a, E, B> {
    table: &'a ChainTable<E, B>,
    // Next bucket whose chain has not been started.
    bucket: usize,
    pending: Link,
    remaining: usize,
}

impl<'a, E, B> Iter<'a, E, B> {
    pub(crate) fn new(table: &'a ChainTable<E, B>) -> Self {
        Self {
            table,
            bucket: 0,
            pending: None,
            remaining: table.nodes.len(),
        }
    }
}

impl<'a, E, B> Iterator for Iter<'a, E, B> {
    type Item = &'a E;

    fn next(&mut self) -> Option<&'a E> {
        let table = self.table;
        loop {
            if let Some(k) = self.pending {
                let node = &table.nodes[k];
                self.pending = node.next;
                self.remaining -= 1;
                return Some(&node.entry);
            }
            let buckets = table.buckets.as_deref()?;
            self.pending = *buckets.get(self.bucket)?;
            self.bucket += 1;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E, B> ExactSizeIterator for Iter<'_, E, B> {}

impl<E, B> FusedIterator for Iter<'_, E, B> {}

impl<E, B> Clone for Iter<'_, E, B> {
    fn clone(&self) -> Self {
        Self {
            table: self.table,
            bucket: self.bucket,
            pending: self.pending,
            remaining: self.remaining,
        }
    }
}
