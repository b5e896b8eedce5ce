// ==============================================
// CONTRACT-LEVEL BEHAVIOR TESTS (integration)
// ==============================================
//
// Exercises the public `Cache` contract exclusively through the factory, the
// way external callers consume the crate. White-box recovery tests live next
// to the policy implementation; everything here is black-box.

use std::sync::Arc;

use softcache::new_lru_cache;
use softcache::traits::Cache;

#[test]
fn retrieve_on_empty_cache() {
    let mut cache = new_lru_cache::<i32>(5).unwrap();
    assert_eq!(cache.current_size(), 0);
    assert!(cache.retrieve("x").is_none());
}

#[test]
fn add_and_retrieve() {
    let mut cache = new_lru_cache::<i32>(5).unwrap();
    let value = Arc::new(0);

    cache.add("obj1", &value);

    assert_eq!(cache.current_size(), 1);
    assert_eq!(cache.retrieve("obj1").as_deref(), Some(&0));
}

#[test]
fn flush() {
    let mut cache = new_lru_cache::<i32>(5).unwrap();
    let value = Arc::new(0);

    cache.add("obj1", &value);
    cache.flush();

    assert_eq!(cache.current_size(), 0);
    assert!(cache.retrieve("obj1").is_none());
}

#[test]
fn lru_eviction() {
    let mut cache = new_lru_cache::<i32>(5).unwrap();
    let values: Vec<Arc<i32>> = (0..5).map(Arc::new).collect();
    for (i, value) in values.iter().enumerate() {
        cache.add(&format!("obj{i}"), value);
    }

    assert_eq!(cache.current_size(), 5);

    // Promote obj1 so obj0 is the strict LRU when the next add overflows.
    assert_eq!(cache.retrieve("obj1").as_deref(), Some(&1));

    let new_value = Arc::new(1000);
    cache.add("newObj", &new_value);

    assert_eq!(cache.current_size(), 5);
    assert_eq!(cache.retrieve("newObj").as_deref(), Some(&1000));
    assert_eq!(cache.retrieve("obj1").as_deref(), Some(&1));
    assert!(cache.retrieve("obj0").is_none());
}

#[test]
fn duplicate_add_is_a_noop() {
    let mut cache = new_lru_cache::<i32>(5).unwrap();
    let first = Arc::new(1);
    let second = Arc::new(2);

    cache.add("obj", &first);
    cache.add("obj", &second);

    assert_eq!(cache.current_size(), 1);
    assert_eq!(cache.retrieve("obj").as_deref(), Some(&1));
}

#[test]
fn repeated_retrieve_returns_same_value() {
    let mut cache = new_lru_cache::<String>(3).unwrap();
    let value = Arc::new("stable".to_string());
    cache.add("k", &value);

    let a = cache.retrieve("k").unwrap();
    let b = cache.retrieve("k").unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(cache.current_size(), 1);
}

#[test]
fn dropped_value_expires() {
    let mut cache = new_lru_cache::<i32>(5).unwrap();
    cache.add("gone", &Arc::new(42));

    // The cache holds only a weak reference; the value died with its Arc.
    assert!(cache.retrieve("gone").is_none());
    assert_eq!(cache.current_size(), 0);
}

#[test]
fn cache_never_extends_value_lifetime() {
    let mut cache = new_lru_cache::<Vec<u8>>(5).unwrap();
    let value = Arc::new(vec![1, 2, 3]);
    cache.add("buf", &value);

    assert_eq!(Arc::strong_count(&value), 1);
    let retrieved = cache.retrieve("buf").unwrap();
    assert_eq!(Arc::strong_count(&value), 2);
    drop(retrieved);
    assert_eq!(Arc::strong_count(&value), 1);
}

#[test]
fn eviction_over_many_inserts_keeps_bound() {
    let mut cache = new_lru_cache::<usize>(8).unwrap();
    let values: Vec<Arc<usize>> = (0..100).map(Arc::new).collect();
    for (i, value) in values.iter().enumerate() {
        cache.add(&format!("k{i}"), value);
        assert!(cache.current_size() <= 8);
    }
    assert_eq!(cache.current_size(), 8);

    // Only the eight most recent keys survive.
    for i in 0..92 {
        assert!(cache.retrieve(&format!("k{i}")).is_none());
    }
    for i in 92..100 {
        assert_eq!(cache.retrieve(&format!("k{i}")).as_deref(), Some(&i));
    }
}
