#![cfg(test)]

// Property tests for Buffer against a Vec model.

use crate::buffer::Buffer;
use crate::error::BufferError;
use crate::ladder::GROWTH_GRANULARITY;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Add(u32),
    Insert(usize, u32),
    Remove(usize),
    Set(usize, u32),
    Reserve(usize),
    Sort,
    Clear,
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    // Indices range past typical lengths so out-of-range paths get exercised.
    let op = prop_oneof![
        4 => any::<u32>().prop_map(Op::Add),
        3 => (0usize..40, any::<u32>()).prop_map(|(i, v)| Op::Insert(i, v)),
        3 => (0usize..40).prop_map(Op::Remove),
        2 => (0usize..40, any::<u32>()).prop_map(|(i, v)| Op::Set(i, v)),
        1 => (0usize..64).prop_map(Op::Reserve),
        1 => Just(Op::Sort),
        1 => Just(Op::Clear),
    ];
    proptest::collection::vec(op, 1..120)
}

// - Contents always equal the model; untouched elements keep their relative order.
// - Checked operations fail exactly when the index is out of range and then change nothing.
// - Capacity is a multiple of 4, covers the length and only drops on `clear`.
// - A sufficient `reserve` leaves capacity untouched.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_buffer_matches_vec(ops in arb_ops()) {
        let mut sut: Buffer<u32> = Buffer::new();
        let mut model: Vec<u32> = Vec::new();

        for op in ops {
            let cap_before = sut.capacity();
            let mut cleared = false;
            match op {
                Op::Add(v) => {
                    let at = sut.add(v);
                    prop_assert_eq!(at, model.len());
                    model.push(v);
                }
                Op::Insert(i, v) => {
                    let res = sut.try_insert(i, v);
                    if i <= model.len() {
                        prop_assert_eq!(res, Ok(()));
                        model.insert(i, v);
                    } else {
                        prop_assert_eq!(res, Err(BufferError::IndexOutOfRange { index: i, len: model.len() }));
                    }
                }
                Op::Remove(i) => {
                    let res = sut.try_remove(i);
                    if i < model.len() {
                        prop_assert_eq!(res, Ok(model.remove(i)));
                    } else {
                        prop_assert!(res.is_err());
                    }
                }
                Op::Set(i, v) => {
                    let res = sut.try_set(i, v);
                    if i < model.len() {
                        prop_assert_eq!(res, Ok(model[i]));
                        model[i] = v;
                    } else {
                        prop_assert!(res.is_err());
                    }
                }
                Op::Reserve(n) => {
                    sut.reserve(n);
                    if n <= cap_before {
                        prop_assert_eq!(sut.capacity(), cap_before);
                    } else {
                        prop_assert!(sut.capacity() >= n);
                        prop_assert!(sut.capacity() - n < GROWTH_GRANULARITY);
                    }
                }
                Op::Sort => {
                    sut.sort_by(|a, b| a.cmp(b));
                    model.sort_unstable();
                }
                Op::Clear => {
                    sut.clear();
                    model.clear();
                    cleared = true;
                }
            }

            prop_assert_eq!(sut.as_slice(), model.as_slice());
            prop_assert_eq!(sut.size(), model.len());
            prop_assert!(sut.len() <= sut.capacity());
            prop_assert_eq!(sut.capacity() % GROWTH_GRANULARITY, 0);
            if cleared {
                prop_assert_eq!(sut.capacity(), 0);
            } else {
                prop_assert!(sut.capacity() >= cap_before, "capacity shrank");
            }
        }
    }
}
