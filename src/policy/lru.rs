//! # LRU cache over weakly-held values
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────────────────────────┐
//!   │                        LruCache<T>                          │
//!   │                                                             │
//!   │   ┌───────────────────────────────────────────────────┐     │
//!   │   │  FxHashMap<String, CacheEntry<T>>                 │     │
//!   │   │                                                   │     │
//!   │   │  "page:1" ──► { value: Weak<T>, node: NodeId }    │     │
//!   │   │  "page:2" ──► { value: Weak<T>, node: NodeId }    │     │
//!   │   └──────────────────────────┬────────────────────────┘     │
//!   │                              │ node handles                 │
//!   │   ┌──────────────────────────▼────────────────────────┐     │
//!   │   │  RecencyQueue (arena-backed, sentinel-bounded)    │     │
//!   │   │                                                   │     │
//!   │   │  head ─► ["page:2"] ◄──► ["page:1"] ◄── tail      │     │
//!   │   │          (MRU)            (LRU)                   │     │
//!   │   └───────────────────────────────────────────────────┘     │
//!   └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every public operation consults the entry map first, then mutates the
//! recency queue, then applies capacity and consistency policy. The queue
//! never inspects values; the map never inspects ordering.
//!
//! ## Operations
//!
//! | Method           | Complexity | Notes                                      |
//! |------------------|------------|--------------------------------------------|
//! | `add(id, v)`     | O(1)       | No-op on duplicate id; may evict one entry |
//! | `retrieve(id)`   | O(1)       | Promotes to MRU; cleans up expired entries |
//! | `flush()`        | O(n)       | Full reset                                 |
//! | `current_size()` | O(1)       | Tracked entries, live or not               |
//!
//! ## Weak-reference liveness
//!
//! Values are stored as `Weak<T>`, so the cache never extends a value's
//! lifetime. The last strong `Arc` may drop at any point between `add` and a
//! later `retrieve`; the cache treats every entry as possibly dead and cleans
//! up the first time it observes the expiry.
//!
//! ## Self-healing
//!
//! A failed queue relink ([`InconsistencyError`](crate::error::InconsistencyError))
//! means the structure can no longer be trusted. The policy is a full reset:
//! log through the injected [`DiagnosticSink`], flush everything, and return
//! `None` for the triggering call. No inconsistency ever escapes to callers.
//!
//! ## Thread safety
//!
//! - `LruCache<T>`: **not thread-safe**; unsynchronized concurrent use is a
//!   usage error.
//! - `SharedLruCache<T>` (feature `concurrency`): serializes every call
//!   through a `parking_lot::Mutex`.

use std::fmt;
use std::sync::{Arc, Weak};

#[cfg(feature = "concurrency")]
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::diag::{DiagnosticSink, Severity, TracingSink};
use crate::ds::arena::NodeId;
use crate::ds::recency_queue::RecencyQueue;
use crate::error::ConfigError;
use crate::traits::Cache;

/// One tracked key's stored value: a weak payload plus its queue node.
struct CacheEntry<T> {
    value: Weak<T>,
    node: NodeId,
}

/// LRU cache whose values may expire out from under it.
///
/// Construct through [`LruCache::new`], [`LruCache::with_sink`], or the
/// [`new_lru_cache`](crate::new_lru_cache) factory.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use softcache::policy::lru::LruCache;
/// use softcache::traits::Cache;
///
/// let mut cache = LruCache::new(2).unwrap();
/// let a = Arc::new("a".to_string());
/// let b = Arc::new("b".to_string());
/// let c = Arc::new("c".to_string());
///
/// cache.add("a", &a);
/// cache.add("b", &b);
/// cache.add("c", &c); // evicts "a", the least recently used
///
/// assert!(cache.retrieve("a").is_none());
/// assert_eq!(cache.retrieve("c").as_deref(), Some(&"c".to_string()));
/// ```
pub struct LruCache<T> {
    queue: RecencyQueue,
    entries: FxHashMap<String, CacheEntry<T>>,
    capacity: usize,
    len: usize,
    sink: Box<dyn DiagnosticSink>,
}

impl<T> LruCache<T> {
    /// Creates a cache holding at most `capacity` entries, with diagnostics
    /// going to the `tracing` ecosystem.
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        Self::with_sink(capacity, TracingSink)
    }

    /// Creates a cache with an explicit diagnostic sink.
    ///
    /// The sink only sees the inconsistency-recovery path; it never affects
    /// observable cache behavior.
    pub fn with_sink(
        capacity: usize,
        sink: impl DiagnosticSink + 'static,
    ) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than zero"));
        }
        Ok(Self {
            queue: RecencyQueue::new(),
            entries: FxHashMap::default(),
            capacity,
            len: 0,
            sink: Box::new(sink),
        })
    }

    /// Maximum number of tracked entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes the least-recently-used key from both structures.
    fn evict_least_recently_used(&mut self) {
        let Some(last) = self.queue.peek_lru().map(str::to_owned) else {
            return;
        };
        if self.entries.remove(&last).is_some() {
            self.queue.evict_lru();
        }
    }

    fn reset(&mut self) {
        self.queue.flush();
        self.entries.clear();
        self.len = 0;
    }

    #[cfg(test)]
    pub(crate) fn sever_node_for(&mut self, id: &str) {
        if let Some(node) = self.entries.get(id).map(|entry| entry.node) {
            self.queue.sever_links(node);
        }
    }

    #[cfg(test)]
    pub(crate) fn debug_validate_invariants(&self) {
        self.queue.debug_validate_invariants();
        assert_eq!(self.len, self.entries.len());
        assert_eq!(self.len, self.queue.len());
    }
}

impl<T> Cache<T> for LruCache<T> {
    fn add(&mut self, id: &str, value: &Arc<T>) {
        if self.entries.contains_key(id) {
            // First-write-wins: no value replacement, no recency refresh.
            return;
        }

        let node = self.queue.enqueue(id);
        self.entries.insert(
            id.to_owned(),
            CacheEntry {
                value: Arc::downgrade(value),
                node,
            },
        );
        self.len += 1;

        // Capacity is a soft ceiling, enforced right after the breaching
        // insert. The strict LRU key goes, live or expired.
        if self.len > self.capacity {
            self.evict_least_recently_used();
            self.len -= 1;
        }
    }

    fn retrieve(&mut self, id: &str) -> Option<Arc<T>> {
        let (node, value) = {
            let entry = self.entries.get(id)?;
            (entry.node, entry.value.upgrade())
        };

        let Some(value) = value else {
            // The payload was reclaimed behind our back; the entry is dead
            // either way, so drop it before touching the queue.
            self.entries.remove(id);
            self.len -= 1;
            if let Err(err) = self.queue.discard(node) {
                self.sink.log(
                    Severity::Error,
                    &format!("error discarding {id:?}: {err}; flushing cache"),
                );
                self.reset();
            }
            return None;
        };

        if let Err(err) = self.queue.touch(node) {
            // Consistency violation takes precedence over returning the
            // value, even though it was live.
            self.sink.log(
                Severity::Error,
                &format!("error promoting {id:?}: {err}; flushing cache"),
            );
            self.reset();
            return None;
        }

        Some(value)
    }

    fn flush(&mut self) {
        self.reset();
    }

    fn current_size(&self) -> usize {
        self.len
    }
}

impl<T> fmt::Debug for LruCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

/// Mutex-serialized wrapper around [`LruCache`].
///
/// The core contract gives no thread-safety guarantee; this wrapper is the
/// documented external serialization for callers that need shared access.
/// Every call takes the lock.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use softcache::policy::lru::SharedLruCache;
///
/// let cache: SharedLruCache<String> = SharedLruCache::new(64).unwrap();
/// let value = Arc::new("shared".to_string());
/// cache.add("k", &value);
/// assert_eq!(cache.retrieve("k").as_deref(), Some(&"shared".to_string()));
/// ```
#[cfg(feature = "concurrency")]
pub struct SharedLruCache<T> {
    inner: Mutex<LruCache<T>>,
}

#[cfg(feature = "concurrency")]
impl<T> SharedLruCache<T> {
    /// Creates a shared cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Mutex::new(LruCache::new(capacity)?),
        })
    }

    /// Creates a shared cache with an explicit diagnostic sink.
    pub fn with_sink(
        capacity: usize,
        sink: impl DiagnosticSink + 'static,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Mutex::new(LruCache::with_sink(capacity, sink)?),
        })
    }

    pub fn add(&self, id: &str, value: &Arc<T>) {
        self.inner.lock().add(id, value)
    }

    pub fn retrieve(&self, id: &str) -> Option<Arc<T>> {
        self.inner.lock().retrieve(id)
    }

    pub fn flush(&self) {
        self.inner.lock().flush()
    }

    pub fn current_size(&self) -> usize {
        self.inner.lock().current_size()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }
}

#[cfg(feature = "concurrency")]
impl<T> fmt::Debug for SharedLruCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.lock();
        f.debug_struct("SharedLruCache")
            .field("len", &cache.len)
            .field("capacity", &cache.capacity)
            .finish_non_exhaustive()
    }
}
