//! A typed string-to-value map written purely against the public
//! `ChainTable`/`Entry` contract, the way a façade crate would.

use chain_table::{Buffer, ChainTable, Entry};

struct StrEntry<V> {
    key: String,
    value: Option<V>,
}

impl<V> Entry for StrEntry<V> {
    fn key(&self) -> u32 {
        self.key
            .chars()
            .fold(0u32, |h, c| h.wrapping_mul(17) | u32::from(c))
    }
    fn equals(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

struct StrMap<V> {
    table: ChainTable<StrEntry<V>>,
}

impl<V> StrMap<V> {
    fn new() -> Self {
        Self {
            table: ChainTable::new(),
        }
    }

    fn probe(key: &str) -> StrEntry<V> {
        StrEntry {
            key: key.to_string(),
            value: None,
        }
    }

    fn add(&mut self, key: &str, value: V) {
        self.table.add(StrEntry {
            key: key.to_string(),
            value: Some(value),
        });
    }

    fn get(&self, key: &str) -> Option<&V> {
        self.table.find(&Self::probe(key))?.value.as_ref()
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        self.table.remove(&Self::probe(key)).value
    }

    fn keys(&self) -> Buffer<&str> {
        let mut keys: Buffer<&str> = self.table.iter().map(|e| e.key.as_str()).collect();
        keys.sort();
        keys
    }
}

#[test]
fn string_keyed_map_over_table() {
    let mut m = StrMap::new();
    m.add("src", 1);
    m.add("tests", 2);
    m.add("benches", 3);

    assert_eq!(m.get("tests"), Some(&2));
    assert_eq!(m.get("docs"), None);
    assert_eq!(m.keys().as_slice(), &["benches", "src", "tests"]);

    assert_eq!(m.remove("src"), Some(1));
    assert_eq!(m.get("src"), None);
    assert_eq!(m.table.count(), 2);
}

#[test]
#[should_panic(expected = "already present")]
fn typed_map_duplicate_key_is_fatal() {
    let mut m = StrMap::new();
    m.add("a", 1);
    m.add("a", 2);
}
