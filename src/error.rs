//! Precondition errors reported by the checked (`try_*`) operations.
//!
//! The unchecked operations treat every one of these as fatal and panic with
//! the error's message.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("index {index} out of range for buffer of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("capacity overflow reserving {requested} elements")]
    CapacityOverflow { requested: usize },
}

/// Precondition violations on a `ChainTable`.
///
/// `DuplicateEntry` hands the rejected entry back so a failed `try_add`
/// never drops caller data.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum TableError<E> {
    #[error("an equal entry is already present")]
    DuplicateEntry(E),
    #[error("no matching entry is present")]
    MissingEntry,
    #[error("cannot presize a table that already holds {count} entries")]
    AlreadyPopulated { count: usize },
}

impl<E> TableError<E> {
    /// Recover the entry carried by a rejected add.
    pub fn into_entry(self) -> Option<E> {
        match self {
            TableError::DuplicateEntry(e) => Some(e),
            _ => None,
        }
    }
}
