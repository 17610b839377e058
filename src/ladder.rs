//! Sizing constants shared by `Buffer` and `ChainTable`.

/// Candidate bucket counts, ascending. Every rung is prime.
pub const BUCKET_LADDER: [usize; 15] = [
    3, 7, 17, 31, 61, 127, 257, 509, 1021, 2053, 4093, 8191, 16381, 32771, 65537,
];

/// Expected chain length a presized table aims to stay at or below.
pub const MAX_CHAIN_LEN: usize = 4;

/// Buffer capacity is always allocated in multiples of this many elements.
pub const GROWTH_GRANULARITY: usize = 4;

/// Bucket count of a table that was never presized.
pub const DEFAULT_BUCKET_COUNT: usize = BUCKET_LADDER[0];

/// Round `n` up to the next multiple of [`GROWTH_GRANULARITY`].
///
/// `None` when the rounded count does not fit in a `usize`.
#[inline]
pub const fn round_capacity(n: usize) -> Option<usize> {
    n.checked_next_multiple_of(GROWTH_GRANULARITY)
}

/// Smallest ladder rung `v` with `v >= expected / MAX_CHAIN_LEN`.
///
/// Saturates at the top rung when `expected` is larger than the ladder can
/// cover at the target chain length.
pub fn ladder_size_for(expected: usize) -> usize {
    let min = expected / MAX_CHAIN_LEN;
    BUCKET_LADDER
        .iter()
        .copied()
        .find(|&v| v >= min)
        .unwrap_or(BUCKET_LADDER[BUCKET_LADDER.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: the ladder is strictly ascending.
    #[test]
    fn ladder_is_ascending() {
        assert!(BUCKET_LADDER.windows(2).all(|w| w[0] < w[1]));
    }

    /// Invariant: rounded capacity is a multiple of 4, never below the request,
    /// and never more than 3 elements above it.
    #[test]
    fn round_capacity_granularity() {
        assert_eq!(round_capacity(0), Some(0));
        assert_eq!(round_capacity(1), Some(4));
        assert_eq!(round_capacity(4), Some(4));
        assert_eq!(round_capacity(5), Some(8));
        for n in 0..200 {
            let c = round_capacity(n).unwrap();
            assert_eq!(c % GROWTH_GRANULARITY, 0);
            assert!(c >= n && c - n < GROWTH_GRANULARITY);
        }
    }

    /// Invariant: presizing picks the smallest rung at or above
    /// `expected / MAX_CHAIN_LEN`.
    #[test]
    fn ladder_size_picks_smallest_sufficient_rung() {
        assert_eq!(ladder_size_for(0), 3);
        assert_eq!(ladder_size_for(12), 3);
        assert_eq!(ladder_size_for(13), 3);
        assert_eq!(ladder_size_for(16), 7);
        assert_eq!(ladder_size_for(40), 17);
        assert_eq!(ladder_size_for(68), 17);
        assert_eq!(ladder_size_for(72), 31);
        assert_eq!(ladder_size_for(4 * 65537), 65537);
        for expected in (0..300_000).step_by(997) {
            let v = ladder_size_for(expected);
            let min = expected / MAX_CHAIN_LEN;
            if min <= 65537 {
                assert!(v >= min);
                let pos = BUCKET_LADDER.iter().position(|&x| x == v).unwrap();
                if pos > 0 {
                    assert!(BUCKET_LADDER[pos - 1] < min);
                }
            }
        }
    }

    /// Invariant: rounding near `usize::MAX` reports overflow instead of wrapping.
    #[test]
    fn round_capacity_overflow_is_none() {
        assert_eq!(round_capacity(usize::MAX), None);
        assert_eq!(round_capacity(usize::MAX - 2), None);
        assert_eq!(round_capacity(usize::MAX - 3), Some(usize::MAX - 3));
    }

    /// Invariant: requests past the top of the ladder saturate.
    #[test]
    fn ladder_size_saturates() {
        assert_eq!(ladder_size_for(usize::MAX), 65537);
    }
}
