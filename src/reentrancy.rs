//! Debug-only guard against reentering a table from its own probes.
//!
//! `ChainTable` calls caller code (`Entry::key`, `Entry::equals` and the
//! bucket function) while walking a chain. A probe that reaches back into the
//! same table observes it mid-operation; debug builds turn that into a panic.
//! Release builds reduce it to a no-op.

use core::marker::PhantomData;

#[derive(Debug)]
pub(crate) struct ProbeGuard {
    #[cfg(debug_assertions)]
    active: core::cell::Cell<bool>,
    // Tables are single-threaded; keep the guard !Send + !Sync to match.
    _nosend: PhantomData<*mut ()>,
}

impl ProbeGuard {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: core::cell::Cell::new(false),
            _nosend: PhantomData,
        }
    }

    /// Mark the table busy until the returned scope is dropped.
    #[inline]
    #[track_caller]
    pub(crate) fn enter(&self) -> ProbeScope<'_> {
        #[cfg(debug_assertions)]
        assert!(
            !self.active.replace(true),
            "reentrant access to a ChainTable from inside a key, equals or bucket call"
        );
        ProbeScope { owner: self }
    }
}

impl Default for ProbeGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Busy marker returned by `ProbeGuard::enter`; dropping it frees the table
/// for the next operation, including on unwind out of a probe.
pub(crate) struct ProbeScope<'a> {
    #[cfg_attr(not(debug_assertions), allow(dead_code))]
    owner: &'a ProbeGuard,
}

impl Drop for ProbeScope<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.owner.active.set(false);
    }
}
