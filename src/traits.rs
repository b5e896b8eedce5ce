//! Cache capability contract.
//!
//! [`Cache`] is the surface external code should depend on; concrete eviction
//! policies implement it and the [`new_lru_cache`](crate::new_lru_cache)
//! factory hands out boxed instances, so callers never name a policy type.
//!
//! Values move across the boundary as `Arc<T>`: the cache downgrades on
//! [`add`](Cache::add) and upgrades on [`retrieve`](Cache::retrieve), which
//! makes the weak-holding explicit. The cache alone never keeps a value
//! alive; callers must treat every retrieval as possibly absent.

use std::sync::Arc;

/// A size-bounded cache of weakly-held values keyed by string identifiers.
///
/// Implementations are single-threaded: no operation blocks or suspends, and
/// nothing here is safe for unsynchronized concurrent use. Callers needing
/// shared access must serialize externally (see
/// [`SharedLruCache`](crate::policy::lru::SharedLruCache)).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use softcache::new_lru_cache;
/// use softcache::traits::Cache;
///
/// let mut cache = new_lru_cache::<u64>(16).unwrap();
/// let value = Arc::new(42);
/// cache.add("answer", &value);
/// assert_eq!(cache.retrieve("answer").as_deref(), Some(&42));
/// assert_eq!(cache.current_size(), 1);
///
/// cache.flush();
/// assert_eq!(cache.current_size(), 0);
/// ```
pub trait Cache<T> {
    /// Tracks `value` under `id`, holding it weakly.
    ///
    /// A no-op if `id` is already tracked: the stored value is not replaced
    /// and the key's recency is not refreshed (first-write-wins). If the
    /// insert pushes the cache over capacity, the least-recently-used key is
    /// evicted immediately afterwards.
    fn add(&mut self, id: &str, value: &Arc<T>);

    /// Returns the value for `id`, promoting the key to most-recently-used.
    ///
    /// Returns `None` when the key is untracked, when its value has expired
    /// (the last strong reference outside the cache was dropped), or when an
    /// internal inconsistency forced a full reset.
    fn retrieve(&mut self, id: &str) -> Option<Arc<T>>;

    /// Drops every tracked entry and resets the size to zero.
    fn flush(&mut self);

    /// Number of tracked entries.
    ///
    /// Counts tracked keys, not necessarily live values: an entry whose value
    /// has expired still counts until a `retrieve` observes the expiry.
    fn current_size(&self) -> usize;
}
