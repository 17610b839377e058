#![cfg(test)]

// Property tests for ChainTable kept inside the crate so they can inspect
// chain statistics alongside the public surface.

use crate::chain_table::ChainTable;
use crate::entry::{BucketFn, Entry};
use crate::error::TableError;
use crate::ladder::ladder_size_for;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeSet, HashMap};

// String-keyed entry carrying a value, as a typed map would define it.
#[derive(Clone, Debug, PartialEq)]
struct Pair {
    name: String,
    value: i32,
}

impl Pair {
    fn probe(name: &str) -> Self {
        Pair {
            name: name.to_string(),
            value: 0,
        }
    }
}

impl Entry for Pair {
    fn key(&self) -> u32 {
        self.name
            .bytes()
            .fold(0u32, |h, b| h.wrapping_mul(17) ^ u32::from(b))
    }
    fn equals(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

// Pool-indexed operations so shrinking moves toward earlier names.
#[derive(Clone, Debug)]
enum Op {
    Add(usize, i32),
    Remove(usize),
    Find(usize),
    Mutate(usize, i32),
    Iterate,
    Clear,
    Reserve(usize),
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Add(i, v)),
            2 => idx.clone().prop_map(Op::Remove),
            2 => idx.clone().prop_map(Op::Find),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| Op::Mutate(i, d)),
            1 => Just(Op::Iterate),
            1 => Just(Op::Clear),
            1 => (0usize..2000).prop_map(Op::Reserve),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// State-machine equivalence against std::collections::HashMap.
// - Duplicate adds are rejected and hand the entry back untouched.
// - `find`/`exists` parity with the model; `remove` returns the stored entry.
// - `iter` yields each live entry exactly once.
// - The bucket array exists exactly while the table is non-empty.
// - `reserve` succeeds only on an empty table.
fn run_state_machine<B: BucketFn>(
    mut sut: ChainTable<Pair, B>,
    pool: Vec<String>,
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        match op {
            Op::Add(i, v) => {
                let name = &pool[i];
                let already = model.contains_key(name);
                let entry = Pair {
                    name: name.clone(),
                    value: v,
                };
                match sut.try_add(entry.clone()) {
                    Ok(()) => {
                        prop_assert!(!already, "add must fail on duplicate");
                        model.insert(name.clone(), v);
                    }
                    Err(TableError::DuplicateEntry(back)) => {
                        prop_assert!(already, "duplicate error only when present");
                        prop_assert_eq!(back, entry);
                    }
                    Err(other) => prop_assert!(false, "unexpected error {:?}", other),
                }
            }
            Op::Remove(i) => {
                let name = &pool[i];
                match sut.try_remove(&Pair::probe(name)) {
                    Ok(removed) => {
                        let mv = model.remove(name);
                        prop_assert_eq!(Some(removed.value), mv);
                        prop_assert!(!sut.exists(&Pair::probe(name)));
                    }
                    Err(TableError::MissingEntry) => {
                        prop_assert!(!model.contains_key(name));
                    }
                    Err(other) => prop_assert!(false, "unexpected error {:?}", other),
                }
            }
            Op::Find(i) => {
                let name = &pool[i];
                let found = sut.find(&Pair::probe(name)).map(|p| p.value);
                prop_assert_eq!(found, model.get(name).copied());
                prop_assert_eq!(sut.exists(&Pair::probe(name)), found.is_some());
            }
            Op::Mutate(i, d) => {
                let name = &pool[i];
                if let Some(p) = sut.find_mut(&Pair::probe(name)) {
                    p.value = p.value.saturating_add(d);
                    let mv = model.get_mut(name);
                    prop_assert!(mv.is_some(), "model must hold a found entry");
                    if let Some(mv) = mv {
                        *mv = mv.saturating_add(d);
                    }
                } else {
                    prop_assert!(!model.contains_key(name));
                }
            }
            Op::Iterate => {
                let seen: Vec<&str> = sut.iter().map(|p| p.name.as_str()).collect();
                let unique: BTreeSet<&str> = seen.iter().copied().collect();
                prop_assert_eq!(seen.len(), unique.len(), "iteration repeated an entry");
                let expected: BTreeSet<&str> = model.keys().map(String::as_str).collect();
                prop_assert_eq!(unique, expected);
            }
            Op::Clear => {
                sut.clear();
                model.clear();
            }
            Op::Reserve(n) => {
                let before = sut.bucket_count();
                match sut.try_reserve(n) {
                    Ok(()) => {
                        prop_assert!(model.is_empty());
                        prop_assert_eq!(sut.bucket_count(), ladder_size_for(n));
                    }
                    Err(TableError::AlreadyPopulated { count }) => {
                        prop_assert_eq!(count, model.len());
                        prop_assert_eq!(sut.bucket_count(), before);
                    }
                    Err(other) => prop_assert!(false, "unexpected error {:?}", other),
                }
            }
        }

        prop_assert_eq!(sut.count(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert_eq!(sut.is_allocated(), !model.is_empty());
        let stats = sut.stats();
        prop_assert_eq!(stats.item_count, model.len());
        prop_assert!(stats.occupied_buckets <= stats.bucket_count);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(ChainTable::new(), pool, ops)?;
    }
}

// Every key lands in bucket 0, so all probing relies on `equals`.
#[derive(Clone, Copy, Default)]
struct SingleBucket;

impl BucketFn for SingleBucket {
    fn bucket(&self, _key: u32, _bucket_count: usize) -> usize {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_state_machine(ChainTable::with_bucket_fn(SingleBucket), pool, ops)?;
    }
}

proptest! {
    // A presized table holds, iterates and finds every entry of a fill.
    #[test]
    fn prop_presized_fill_visits_all(n in 0usize..3000) {
        let mut t: ChainTable<Pair> = ChainTable::with_expected(n);
        for i in 0..n {
            t.add(Pair { name: format!("k{i}"), value: i as i32 });
        }
        prop_assert_eq!(t.count(), n);
        prop_assert_eq!(t.iter().count(), n);
        prop_assert!(t.bucket_count() >= n / crate::ladder::MAX_CHAIN_LEN);
        for i in (0..n).step_by(97) {
            let name = format!("k{i}");
            prop_assert_eq!(t.find(&Pair::probe(&name)).map(|p| p.value), Some(i as i32));
        }
    }
}
