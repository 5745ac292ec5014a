//! Fixed-case coverage of invariants 1-5 from `spec.md` §8: insert/remove
//! must not lose or misplace data.

use crate::Rhamt;

#[test]
fn insert_returns_the_value_just_stored() {
    let mut map = Rhamt::new();
    assert_eq!(*map.insert("key", 42), 42);
}

#[test]
fn insert_overwrite_is_observationally_idempotent() {
    let mut map = Rhamt::new();
    map.insert("key", 1);
    map.insert("key", 2);
    assert_eq!(map.len(), 1);
    assert_eq!(map.read(&"key"), Some(&2));

    map.insert("key", 2);
    assert_eq!(map.len(), 1);
    assert_eq!(map.read(&"key"), Some(&2));
}

#[test]
fn insert_update_chain() {
    let mut map = Rhamt::new();
    assert_eq!(*map.insert("k", 10), 10);
    assert_eq!(*map.insert("k", 20), 20);
    assert_eq!(*map.insert("k", 30), 30);
    assert_eq!(map.read(&"k"), Some(&30));
    assert_eq!(map.len(), 1);
}

#[test]
fn remove_existing_returns_true_and_drops_the_key() {
    let mut map = Rhamt::new();
    map.insert("a", 100);
    assert!(map.remove(&"a"));
    assert_eq!(map.read(&"a"), None);
}

#[test]
fn remove_missing_returns_false_and_changes_nothing() {
    let mut map = Rhamt::new();
    map.insert("a", 1);
    assert!(!map.remove(&"z"));
    assert_eq!(map.len(), 1);
    assert_eq!(map.read(&"a"), Some(&1));
}

#[test]
fn size_tracks_inserts_and_removes_among_many() {
    let mut map = Rhamt::new();
    for i in 0..100 {
        map.insert(i, i * 10);
    }
    assert_eq!(map.len(), 100);
    assert!(map.remove(&50));
    assert_eq!(map.read(&50), None);
    assert!(!map.remove(&50));
    assert_eq!(map.len(), 99);
}

#[test]
fn round_trip_insert_then_remove_every_key_reaches_zero() {
    let mut map = Rhamt::new();
    let keys: Vec<i32> = (0..500).collect();
    for &k in &keys {
        map.insert(k, k);
    }
    assert_eq!(map.len(), keys.len());

    // Remove in a different order than inserted.
    for &k in keys.iter().rev() {
        assert!(map.remove(&k));
    }
    assert_eq!(map.len(), 0);
    assert!(map.is_empty());
}
