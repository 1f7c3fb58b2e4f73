//! Integration tests for the shared (lock-protected) index.
//!
//! These tests verify behavior under concurrent readers and writers.

use interchangedb_index::SharedIndex;
use std::sync::Arc;
use std::sync::Barrier;
use std::thread;

/// Test concurrent writers to disjoint key ranges.
#[test]
fn test_concurrent_writers() {
    let index: SharedIndex<i64, i64> = SharedIndex::new(3).unwrap();
    let mut handles = vec![];

    for t in 0..4i64 {
        let index_clone = index.clone();
        handles.push(thread::spawn(move || {
            for j in 0..250 {
                let key = t * 1000 + j;
                assert_eq!(index_clone.insert(key, key * 2), None);
            }
        }));
    }

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(index.len(), 1000);
    let guard = index.read();
    assert!(guard.validate().is_ok());
    for t in 0..4i64 {
        for j in 0..250 {
            let key = t * 1000 + j;
            assert_eq!(guard.search(&key), Some(&(key * 2)));
        }
    }
}

/// Readers running alongside a writer only ever see complete entries.
#[test]
fn test_readers_during_inserts() {
    let index: SharedIndex<i64, String> = SharedIndex::new(2).unwrap();
    let barrier = Arc::new(Barrier::new(5));
    let mut handles = vec![];

    {
        let index = index.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for k in 0..500i64 {
                index.insert(k, format!("Record {}", k));
            }
        }));
    }

    for _ in 0..4 {
        let index = index.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for round in 0..20 {
                for k in (round..500i64).step_by(37) {
                    if let Some(value) = index.search(&k) {
                        assert_eq!(value, format!("Record {}", k));
                    }
                }
                let guard = index.read();
                assert!(guard.validate().is_ok());
            }
        }));
    }

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(index.len(), 500);
}

/// Overwrites from several threads leave exactly one value per key.
#[test]
fn test_concurrent_overwrites() {
    let index: SharedIndex<i64, usize> = SharedIndex::new(4).unwrap();
    for k in 0..100 {
        index.insert(k, 0);
    }

    let mut handles = vec![];
    for t in 1..=4usize {
        let index_clone = index.clone();
        handles.push(thread::spawn(move || {
            for k in 0..100 {
                assert!(index_clone.insert(k, t).is_some());
            }
        }));
    }

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(index.len(), 100);
    let stats = index.stats();
    assert_eq!(stats.inserts, 100);
    assert_eq!(stats.overwrites, 400);
    for k in 0..100 {
        let value = index.search(&k).unwrap();
        assert!((1..=4).contains(&value));
    }
}
