//! Entry capability and bucket selection.

/// A record stored in a [`ChainTable`](crate::ChainTable).
///
/// `key` feeds bucket selection; `equals` resolves collisions within a
/// chain. Two entries that are `equals` must report the same `key`.
pub trait Entry {
    fn key(&self) -> u32;
    fn equals(&self, other: &Self) -> bool;
}

/// Maps an entry key onto a bucket index in `0..bucket_count`.
///
/// Implementations must be deterministic and depend only on `key` and
/// `bucket_count`; the table never re-buckets stored entries.
pub trait BucketFn {
    fn bucket(&self, key: u32, bucket_count: usize) -> usize;
}

/// Default bucket function: `key mod bucket_count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModuloBucket;

impl BucketFn for ModuloBucket {
    #[inline]
    fn bucket(&self, key: u32, bucket_count: usize) -> usize {
        key as usize % bucket_count
    }
}

impl<F> BucketFn for F
where
    F: Fn(u32, usize) -> usize,
{
    #[inline]
    fn bucket(&self, key: u32, bucket_count: usize) -> usize {
        self(key, bucket_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: the default bucket is `key mod bucket_count`.
    #[test]
    fn modulo_bucket_matches_remainder() {
        let b = ModuloBucket;
        assert_eq!(b.bucket(0, 3), 0);
        assert_eq!(b.bucket(3, 3), 0);
        assert_eq!(b.bucket(5, 3), 2);
        assert_eq!(b.bucket(u32::MAX, 17), (u32::MAX % 17) as usize);
    }

    /// Invariant: closures act as bucket functions.
    #[test]
    fn closure_bucket_fn() {
        let first = |_key: u32, _n: usize| 0usize;
        assert_eq!(first.bucket(99, 7), 0);
    }
}
