//! Property tests for the ordered index.
//!
//! Random insert/search sequences are replayed against `BTreeMap` as an
//! oracle, with a full invariant check after every insert.

use std::collections::{BTreeMap, BTreeSet};

use interchangedb_index::OrderedIndex;
use proptest::prelude::*;

const TEST_SIZE: usize = 300;

fn key_strategy() -> impl Strategy<Value = i64> {
    // Narrow range so duplicates show up regularly.
    -500i64..500
}

fn degree_strategy() -> impl Strategy<Value = usize> {
    2usize..=6
}

#[derive(Debug, Clone)]
enum IndexOp {
    Insert(i64, i64),
    Search(i64),
}

fn op_strategy() -> impl Strategy<Value = IndexOp> {
    prop_oneof![
        3 => (key_strategy(), any::<i64>()).prop_map(|(k, v)| IndexOp::Insert(k, v)),
        1 => key_strategy().prop_map(IndexOp::Search),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Every insert leaves the tree valid and agrees with BTreeMap on the
    /// returned previous value; every search agrees on the result.
    #[test]
    fn ops_match_btreemap(
        degree in degree_strategy(),
        ops in proptest::collection::vec(op_strategy(), TEST_SIZE),
    ) {
        let mut index: OrderedIndex<i64, i64> = OrderedIndex::new(degree).unwrap();
        let mut oracle: BTreeMap<i64, i64> = BTreeMap::new();

        for op in &ops {
            match op {
                IndexOp::Insert(k, v) => {
                    prop_assert_eq!(index.insert(*k, *v), oracle.insert(*k, *v), "insert({}, {})", k, v);
                    let valid = index.validate();
                    prop_assert!(valid.is_ok(), "after insert({}): {:?}", k, valid);
                }
                IndexOp::Search(k) => {
                    prop_assert_eq!(index.search(k), oracle.get(k), "search({})", k);
                }
            }
        }

        prop_assert_eq!(index.len(), oracle.len());
    }

    /// Inserted keys are found with their values; keys never inserted are not.
    #[test]
    fn lookup_correctness(
        degree in degree_strategy(),
        keys in proptest::collection::btree_set(key_strategy(), 0..TEST_SIZE),
        probes in proptest::collection::vec(key_strategy(), 50),
    ) {
        let mut index = OrderedIndex::new(degree).unwrap();
        for &k in &keys {
            prop_assert_eq!(index.insert(k, k.wrapping_mul(7)), None);
        }

        for &k in &keys {
            let expected = k.wrapping_mul(7);
            prop_assert_eq!(index.search(&k), Some(&expected));
        }
        for k in probes {
            if !keys.contains(&k) {
                prop_assert_eq!(index.search(&k), None);
            }
        }
    }

    /// The same set of distinct keys walks out in the same sorted order no
    /// matter how it was inserted.
    #[test]
    fn in_order_is_insertion_order_independent(
        degree in degree_strategy(),
        keys in proptest::collection::btree_set(key_strategy(), 0..TEST_SIZE)
            .prop_map(|set| set.into_iter().collect::<Vec<_>>())
            .prop_shuffle(),
    ) {
        let mut shuffled = OrderedIndex::new(degree).unwrap();
        for &k in &keys {
            shuffled.insert(k, ());
        }

        let mut ascending = OrderedIndex::new(degree).unwrap();
        let sorted: BTreeSet<i64> = keys.iter().copied().collect();
        for &k in &sorted {
            ascending.insert(k, ());
        }

        let expected: Vec<&i64> = sorted.iter().collect();
        prop_assert_eq!(shuffled.keys(), expected.clone());
        prop_assert_eq!(ascending.keys(), expected);
    }

    /// Height grows by at most one per insert, and only when the root splits.
    #[test]
    fn height_grows_only_by_root_split(
        degree in degree_strategy(),
        keys in proptest::collection::vec(key_strategy(), TEST_SIZE),
    ) {
        let mut index = OrderedIndex::new(degree).unwrap();

        for k in keys {
            let height_before = index.height();
            let root_splits_before = index.stats().snapshot().root_splits;

            index.insert(k, ());

            let grew = index.height() - height_before;
            let root_splits = index.stats().snapshot().root_splits - root_splits_before;
            prop_assert!(grew <= 1, "height jumped by {}", grew);
            prop_assert_eq!(grew as u64, root_splits);
            prop_assert_eq!(index.levels().len(), index.height());
        }
    }
}
