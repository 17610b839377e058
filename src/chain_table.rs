//! ChainTable: open hashing with singly linked collision chains.
//!
//! Entries live in a `SlotMap` arena; each bucket holds the arena key of its
//! chain head and each node holds the key of its successor. New entries are
//! pushed at the chain head, so the most recent entry in a bucket is probed
//! first. The bucket array exists only while the table holds entries.

use crate::entry::{BucketFn, Entry, ModuloBucket};
use crate::error::TableError;
use crate::iter::Iter;
use crate::ladder::{ladder_size_for, DEFAULT_BUCKET_COUNT, MAX_CHAIN_LEN};
use crate::reentrancy::ProbeGuard;
use core::fmt;
use slotmap::{DefaultKey, SlotMap};

pub(crate) type Link = Option<DefaultKey>;

#[derive(Debug)]
pub(crate) struct Node<E> {
    pub(crate) entry: E,
    pub(crate) next: Link,
}

/// Where a probe matched: its bucket, its predecessor in the chain, and the node.
#[derive(Clone, Copy)]
struct Found {
    bucket: usize,
    prev: Link,
    node: DefaultKey,
}

pub struct ChainTable<E, B = ModuloBucket> {
    bucket_fn: B,
    bucket_count: usize,
    pub(crate) buckets: Option<Box<[Link]>>,
    pub(crate) nodes: SlotMap<DefaultKey, Node<E>>,
    guard: ProbeGuard,
}

impl<E: Entry> ChainTable<E> {
    pub fn new() -> Self {
        Self::with_bucket_fn(ModuloBucket)
    }

    /// A table presized for `expected` entries.
    pub fn with_expected(expected: usize) -> Self {
        let mut t = Self::new();
        t.reserve(expected);
        t
    }
}

impl<E: Entry> Default for ChainTable<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, B> ChainTable<E, B>
where
    E: Entry,
    B: BucketFn,
{
    pub fn with_bucket_fn(bucket_fn: B) -> Self {
        Self {
            bucket_fn,
            bucket_count: DEFAULT_BUCKET_COUNT,
            buckets: None,
            nodes: SlotMap::with_key(),
            guard: ProbeGuard::new(),
        }
    }

    /// Number of stored entries.
    #[inline]
    pub fn count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    /// Whether the bucket array currently exists.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.buckets.is_some()
    }

    /// Presize for `expected` entries so chains average at most
    /// [`MAX_CHAIN_LEN`]. Only valid while the table is empty.
    pub fn try_reserve(&mut self, expected: usize) -> Result<(), TableError<E>> {
        if !self.is_empty() {
            return Err(TableError::AlreadyPopulated { count: self.len() });
        }
        self.bucket_count = ladder_size_for(expected);
        Ok(())
    }

    /// Panics if the table already holds entries.
    #[track_caller]
    pub fn reserve(&mut self, expected: usize) {
        if let Err(e) = self.try_reserve(expected) {
            panic!("{e}");
        }
    }

    /// Take ownership of `entry` and push it onto the head of its chain.
    ///
    /// Rejects the entry, handing it back, if an equal one is already stored.
    pub fn try_add(&mut self, entry: E) -> Result<(), TableError<E>> {
        let _g = self.guard.enter();
        if self.locate(&entry).is_some() {
            return Err(TableError::DuplicateEntry(entry));
        }
        let bucket = self.bucket_index(entry.key());
        let count = self.bucket_count;
        let buckets = self
            .buckets
            .get_or_insert_with(|| vec![None; count].into_boxed_slice());
        let head = buckets[bucket];
        let key = self.nodes.insert(Node { entry, next: head });
        buckets[bucket] = Some(key);
        Ok(())
    }

    /// Panics if an equal entry is already stored.
    #[track_caller]
    pub fn add(&mut self, entry: E) {
        if let Err(e) = self.try_add(entry) {
            panic!("{e}");
        }
    }

    /// Unlink and return the stored entry equal to `probe`.
    ///
    /// Removing the last entry releases the bucket array.
    pub fn try_remove(&mut self, probe: &E) -> Result<E, TableError<E>> {
        let _g = self.guard.enter();
        let found = self.locate(probe).ok_or(TableError::MissingEntry)?;
        let node = self
            .nodes
            .remove(found.node)
            .ok_or(TableError::MissingEntry)?;
        match found.prev {
            Some(prev) => self.nodes[prev].next = node.next,
            None => {
                if let Some(buckets) = self.buckets.as_mut() {
                    buckets[found.bucket] = node.next;
                }
            }
        }
        if self.nodes.is_empty() {
            self.buckets = None;
            self.nodes = SlotMap::with_key();
        }
        Ok(node.entry)
    }

    /// Panics if no equal entry is stored.
    #[track_caller]
    pub fn remove(&mut self, probe: &E) -> E {
        match self.try_remove(probe) {
            Ok(e) => e,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn find(&self, probe: &E) -> Option<&E> {
        let _g = self.guard.enter();
        let found = self.locate(probe)?;
        self.nodes.get(found.node).map(|n| &n.entry)
    }

    /// Mutable access to a stored entry. Its key must not change.
    pub fn find_mut(&mut self, probe: &E) -> Option<&mut E> {
        let found = {
            let _g = self.guard.enter();
            self.locate(probe)?
        };
        self.nodes.get_mut(found.node).map(|n| &mut n.entry)
    }

    pub fn exists(&self, probe: &E) -> bool {
        self.find(probe).is_some()
    }

    /// Drop every entry and release the bucket array. A presized bucket
    /// count is kept for the next fill.
    pub fn clear(&mut self) {
        let _g = self.guard.enter();
        self.buckets = None;
        // Entry destructors run here, still under the guard.
        self.nodes = SlotMap::with_key();
    }

    pub fn iter(&self) -> Iter<'_, E, B> {
        Iter::new(self)
    }

    /// Snapshot of the chain distribution.
    pub fn stats(&self) -> ChainStats {
        let mut stats = ChainStats {
            bucket_count: self.bucket_count,
            item_count: self.len(),
            occupied_buckets: 0,
            longest_chain: 0,
        };
        let Some(buckets) = self.buckets.as_deref() else {
            return stats;
        };
        for &head in buckets {
            let mut len = 0;
            let mut cur = head;
            while let Some(k) = cur {
                len += 1;
                cur = self.nodes[k].next;
            }
            if len > 0 {
                stats.occupied_buckets += 1;
                stats.longest_chain = stats.longest_chain.max(len);
            }
        }
        stats
    }

    fn bucket_index(&self, key: u32) -> usize {
        let i = self.bucket_fn.bucket(key, self.bucket_count);
        assert!(
            i < self.bucket_count,
            "bucket function returned {i} for a table of {} buckets",
            self.bucket_count
        );
        i
    }

    // Callers hold the probe guard.
    fn locate(&self, probe: &E) -> Option<Found> {
        let buckets = self.buckets.as_deref()?;
        let bucket = self.bucket_index(probe.key());
        let mut prev = None;
        let mut cur = buckets[bucket];
        while let Some(k) = cur {
            let node = &self.nodes[k];
            if probe.equals(&node.entry) {
                return Some(Found {
                    bucket,
                    prev,
                    node: k,
                });
            }
            prev = Some(k);
            cur = node.next;
        }
        None
    }
}

impl<E, B> fmt::Debug for ChainTable<E, B>
where
    E: Entry + fmt::Debug,
    B: BucketFn,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, E, B> IntoIterator for &'a ChainTable<E, B>
where
    E: Entry,
    B: BucketFn,
{
    type Item = &'a E;
    type IntoIter = Iter<'a, E, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Chain distribution of a table at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainStats {
    pub bucket_count: usize,
    pub item_count: usize,
    pub occupied_buckets: usize,
    pub longest_chain: usize,
}

impl ChainStats {
    /// Whether some chain is longer than the presizing target.
    pub fn exceeds_target(&self) -> bool {
        self.longest_chain > MAX_CHAIN_LEN
    }
}

impl fmt::Display for ChainStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} items in {}/{} buckets, longest chain {}",
            self.item_count, self.occupied_buckets, self.bucket_count, self.longest_chain
        )
    }
}
