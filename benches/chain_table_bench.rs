use chain_table::{ChainTable, Entry};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u32> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some((s >> 32) as u32)
    })
}

struct Item {
    key: u32,
    value: u64,
}

impl Entry for Item {
    fn key(&self) -> u32 {
        self.key
    }
    fn equals(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

fn probe(key: u32) -> Item {
    Item { key, value: 0 }
}

fn filled(n: usize, seed: u64) -> (ChainTable<Item>, Vec<u32>) {
    let mut t = ChainTable::with_expected(n);
    let mut keys = Vec::with_capacity(n);
    for (i, k) in lcg(seed).enumerate() {
        if keys.len() == n {
            break;
        }
        if t.try_add(Item { key: k, value: i as u64 }).is_ok() {
            keys.push(k);
        }
    }
    (t, keys)
}

fn bench_add_presized_50k(c: &mut Criterion) {
    c.bench_function("chain_table::add_presized_50k", |b| {
        b.iter_batched(
            || ChainTable::<Item>::with_expected(50_000),
            |mut t| {
                for (i, k) in lcg(1).take(50_000).enumerate() {
                    let _ = t.try_add(Item { key: k, value: i as u64 });
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_add_unsized_5k(c: &mut Criterion) {
    // Three buckets: every probe walks long chains.
    c.bench_function("chain_table::add_unsized_5k", |b| {
        b.iter_batched(
            ChainTable::<Item>::new,
            |mut t| {
                for (i, k) in lcg(2).take(5_000).enumerate() {
                    let _ = t.try_add(Item { key: k, value: i as u64 });
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_find_hit(c: &mut Criterion) {
    c.bench_function("chain_table::find_hit", |b| {
        let (t, keys) = filled(50_000, 7);
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = *it.next().unwrap();
            black_box(t.find(&probe(k)).map(|e| e.value));
        })
    });
}

fn bench_find_miss(c: &mut Criterion) {
    c.bench_function("chain_table::find_miss", |b| {
        let (t, _) = filled(50_000, 11);
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            let k = miss.next().unwrap();
            black_box(t.exists(&probe(k)));
        })
    });
}

fn bench_remove_all(c: &mut Criterion) {
    c.bench_function("chain_table::remove_all_20k", |b| {
        b.iter_batched(
            || filled(20_000, 13),
            |(mut t, keys)| {
                for k in keys {
                    black_box(t.remove(&probe(k)));
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_iterate(c: &mut Criterion) {
    c.bench_function("chain_table::iterate_50k", |b| {
        let (t, _) = filled(50_000, 17);
        b.iter(|| black_box(t.iter().map(|e| e.value).sum::<u64>()))
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_add_presized_50k, bench_add_unsized_5k, bench_find_hit, bench_find_miss, bench_remove_all, bench_iterate
}
criterion_main!(benches);
