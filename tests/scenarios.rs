//! End-to-end scenarios exercising the trie as a whole rather than one
//! module at a time: non-ASCII and NUL-bearing keys, the burst path
//! under load, a shadow-map cross-check, delete round-trips, and the
//! ordering/partition guarantees the two sorted and prefix-bounded
//! iterators make.

use hattrie::HatTrie;
use im::HashMap as ImHashMap;
use itertools::Itertools;
use proptest::prelude::*;
use rand::{thread_rng, Rng};

#[test]
fn s1_non_ascii_key() {
    let mut trie = HatTrie::new();
    trie.get(b"\x81\x70").unwrap().set(10);
    assert_eq!(trie.try_get(b"\x81\x70"), Some(10));
}

#[test]
fn s2_nul_bytes() {
    let mut trie = HatTrie::new();
    let entries: [(&[u8], u64); 5] = [
        (b"", 0),
        (b"\x00", 1),
        (b"\x00\x14", 2),
        (b"\x14\x00", 3),
        (b"\x00\x14\x00", 4),
    ];
    for (key, value) in entries {
        trie.get(key).unwrap().set(value);
    }
    for (key, value) in entries {
        assert_eq!(trie.try_get(key), Some(value));
    }
    let mut seen: Vec<Vec<u8>> = trie.iter().map(|(k, _)| k).collect();
    seen.sort();
    let mut expected: Vec<Vec<u8>> = entries.iter().map(|(k, _)| k.to_vec()).collect();
    expected.sort();
    assert_eq!(seen, expected);
}

#[test]
fn s3_burst_trigger_under_random_load() {
    let mut rng = thread_rng();
    let mut trie = HatTrie::new();
    let mut expected = std::collections::HashSet::new();
    for _ in 0..20_000 {
        let key: Vec<u8> = (0..50).map(|_| rng.gen::<u8>()).collect();
        trie.get(&key).unwrap().set(1);
        expected.insert(key);
    }
    assert_eq!(trie.len(), expected.len());
    let iterated: std::collections::HashSet<Vec<u8>> = trie.iter().map(|(k, _)| k).collect();
    assert_eq!(iterated.len(), trie.len());
    assert_eq!(iterated, expected);
}

#[test]
fn s4_tally_consistency_against_shadow_map() {
    let mut rng = thread_rng();
    let mut trie = HatTrie::new();
    let mut shadow: ImHashMap<Vec<u8>, u64> = ImHashMap::new();

    for _ in 0..4_000 {
        let len = rng.gen_range(50..=500);
        let key: Vec<u8> = (0..len).map(|_| rng.gen::<u8>()).collect();
        trie.get(&key).unwrap().increment(1);
        let existing = shadow.get(&key).copied().unwrap_or(0);
        shadow.insert(key, existing + 1);
    }

    for (key, expected_value) in shadow.iter() {
        assert_eq!(trie.try_get(key), Some(*expected_value));
    }
    assert_eq!(trie.len(), shadow.len());
}

#[test]
fn s5_delete_round_trip() {
    let mut rng = thread_rng();
    let mut trie = HatTrie::new();
    let mut keys = Vec::new();
    for i in 0u64..2_000 {
        let key = format!("delete-roundtrip-{i}").into_bytes();
        trie.get(&key).unwrap().set(i);
        keys.push(key);
    }

    let mut deleted = std::collections::HashSet::new();
    for key in &keys {
        if rng.gen_bool(0.25) {
            assert!(trie.del(key).is_some());
            deleted.insert(key.clone());
        }
    }

    for (i, key) in keys.iter().enumerate() {
        if deleted.contains(key) {
            assert_eq!(trie.try_get(key), None);
        } else {
            assert_eq!(trie.try_get(key), Some(i as u64));
        }
    }
}

#[test]
fn s6_sorted_iteration_is_nondecreasing() {
    let mut rng = thread_rng();
    let mut trie = HatTrie::new();
    for _ in 0..2_000 {
        let len = rng.gen_range(1..=30);
        let key: Vec<u8> = (0..len).map(|_| rng.gen::<u8>()).collect();
        trie.get(&key).unwrap().set(1);
    }
    let keys: Vec<Vec<u8>> = trie.iter_sorted().map(|(k, _)| k).collect();
    for (a, b) in keys.iter().tuple_windows() {
        assert!(a <= b, "{:?} should sort before or equal to {:?}", a, b);
    }
}

#[test]
fn s7_prefix_iteration_partitions_by_prefix_length() {
    let mut rng = thread_rng();
    let mut trie = HatTrie::new();
    let mut all_keys = Vec::new();
    for _ in 0..3_000 {
        let len = rng.gen_range(0..=8);
        let key: Vec<u8> = (0..len).map(|_| rng.gen::<u8>()).collect();
        trie.get(&key).unwrap().set(1);
        all_keys.push(key);
    }

    for prefix_len in 0..=4usize {
        let mut groups: std::collections::HashMap<Vec<u8>, usize> = std::collections::HashMap::new();
        for key in &all_keys {
            if key.len() >= prefix_len {
                *groups.entry(key[..prefix_len].to_vec()).or_insert(0) += 1;
            }
        }
        for (prefix, expected_count) in &groups {
            let got = trie.iter_prefix(prefix).count();
            assert_eq!(got, *expected_count, "prefix {:?}", prefix);
        }
    }
}

proptest! {
    #[test]
    fn insert_then_lookup_matches_a_hashmap(
        pairs in prop::collection::vec(
            (prop::collection::vec(any::<u8>(), 0..40), any::<u64>()),
            0..300,
        )
    ) {
        let mut trie = HatTrie::new();
        let mut model = std::collections::HashMap::new();
        for (key, value) in pairs {
            trie.get(&key).unwrap().set(value);
            model.insert(key, value);
        }
        for (key, value) in &model {
            prop_assert_eq!(trie.try_get(key), Some(*value));
        }
        prop_assert_eq!(trie.len(), model.len());
    }

    #[test]
    fn delete_removes_exactly_the_requested_key(
        keys in prop::collection::hash_set(prop::collection::vec(any::<u8>(), 0..20), 1..100)
    ) {
        let mut trie = HatTrie::new();
        let keys: Vec<Vec<u8>> = keys.into_iter().collect();
        for (i, key) in keys.iter().enumerate() {
            trie.get(key).unwrap().set(i as u64);
        }
        let victim = &keys[0];
        let removed = trie.del(victim);
        prop_assert_eq!(removed, Some(0u64));
        prop_assert_eq!(trie.try_get(victim), None);
        for (i, key) in keys.iter().enumerate().skip(1) {
            prop_assert_eq!(trie.try_get(key), Some(i as u64));
        }
    }
}
