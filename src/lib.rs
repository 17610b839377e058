//! chain-table: a growable element buffer and a chained hash table meant to
//! sit underneath typed sequence and map wrappers.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: two small primitives with precise contracts that typed façades
//!   (integer-keyed maps, string-keyed maps, arrays of handles, tree nodes)
//!   can wrap without adding algorithms of their own.
//! - Pieces:
//!   - Buffer<T>: contiguous storage with capacity growth in steps of four
//!     elements, positional insert/remove that shift the tail, and in-place
//!     sorting.
//!   - Entry: the capability a stored record provides, a `u32` key and an
//!     equality test.
//!   - ChainTable<E, B>: open hashing over a ladder of prime bucket counts;
//!     each bucket heads a singly linked chain of entries.
//!   - Iter: bucket-ordered cursor over a ChainTable.
//!
//! Constraints
//! - Single-threaded: no locking; `ChainTable` is `!Send`/`!Sync`.
//! - Preconditions are fatal: duplicate adds, removing an absent entry,
//!   out-of-range indices and presizing a populated table all panic.
//!   Checked `try_*` forms report the same conditions as errors and leave
//!   the structure unchanged.
//! - No rehashing: the bucket count is chosen once, either the first ladder
//!   rung or the rung picked by `reserve`, and never changes while entries
//!   are stored.
//!
//! Chains and ownership
//! - Entries live in a `SlotMap` arena owned by the table. Chain links are
//!   arena keys held beside the entry, so caller types never carry a `next`
//!   field and no link can dangle.
//! - `add` pushes at the chain head; a probe walks the chain from the head
//!   comparing with `Entry::equals`. `remove` unlinks the match, keeps the
//!   order of the remaining nodes and hands the entry back.
//! - The bucket array is allocated on the first `add` and released when the
//!   table becomes empty again, whether by `remove` or `clear`.
//!
//! Reentrancy
//! - Probes run caller code (`key`, `equals`, the bucket function). A debug
//!   guard panics if that code reaches back into the same table; release
//!   builds skip the check.
//!
//! Notes and non-goals
//! - No persistence format and no growth policy beyond one-time presizing.
//! - `Iter` borrows the table, so the borrow checker rejects mutation while
//!   an iteration is in progress.

pub mod buffer;
mod buffer_proptest;
pub mod chain_table;
mod chain_table_proptest;
pub mod entry;
pub mod error;
pub mod iter;
pub mod ladder;
mod reentrancy;

// Public surface
pub use buffer::Buffer;
pub use chain_table::{ChainStats, ChainTable};
pub use entry::{BucketFn, Entry, ModuloBucket};
pub use error::{BufferError, TableError};
pub use iter::Iter;
pub use ladder::{BUCKET_LADDER, GROWTH_GRANULARITY, MAX_CHAIN_LEN};
