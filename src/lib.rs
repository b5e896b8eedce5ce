//! softcache: size-bounded LRU caching over weakly-held values.
//!
//! The cache tracks up to `capacity` keys in recency order, but holds every
//! value through a [`std::sync::Weak`] reference. Dropping the last strong
//! `Arc` outside the cache silently expires the entry; the cache observes the
//! expiry on the next `retrieve` and cleans up after itself. If its internal
//! recency bookkeeping is ever found corrupted, the cache logs through an
//! injectable diagnostic sink and resets itself instead of panicking.
//!
//! ```
//! use std::sync::Arc;
//! use softcache::new_lru_cache;
//! use softcache::traits::Cache;
//!
//! let mut cache = new_lru_cache::<String>(128).unwrap();
//! let page = Arc::new("contents".to_string());
//! cache.add("page:1", &page);
//! assert_eq!(cache.retrieve("page:1").as_deref(), Some(&"contents".to_string()));
//!
//! // The cache alone does not keep a value alive.
//! cache.add("page:2", &Arc::new("gone".to_string()));
//! assert!(cache.retrieve("page:2").is_none());
//! ```

pub mod diag;
pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;

use crate::error::ConfigError;
use crate::policy::lru::LruCache;
use crate::traits::Cache;

/// Creates an LRU cache behind the [`Cache`] contract.
///
/// This is the entry point callers should depend on; it decouples them from
/// the concrete eviction policy. Returns [`ConfigError`] if `capacity` is
/// zero.
pub fn new_lru_cache<T: 'static>(capacity: usize) -> Result<Box<dyn Cache<T>>, ConfigError> {
    Ok(Box::new(LruCache::new(capacity)?))
}
