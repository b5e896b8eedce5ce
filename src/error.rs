//! Error types for the softcache library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when cache configuration parameters are invalid
//!   (zero capacity).
//! - [`InconsistencyError`]: Returned when the recency queue's linked-list
//!   invariant is violated. Never escapes the orchestrator boundary; the cache
//!   converts it into a logged full reset.
//!
//! ## Example Usage
//!
//! ```
//! use softcache::error::ConfigError;
//! use softcache::policy::lru::LruCache;
//!
//! // Fallible constructor for user-configurable parameters
//! let cache: Result<LruCache<String>, ConfigError> = LruCache::new(100);
//! assert!(cache.is_ok());
//!
//! // Invalid capacity is caught without panicking
//! let bad = LruCache::<String>::new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`LruCache::new`](crate::policy::lru::LruCache::new) and the
/// [`new_lru_cache`](crate::new_lru_cache) factory. Carries a human-readable
/// description of which parameter failed validation.
///
/// # Example
///
/// ```
/// use softcache::policy::lru::LruCache;
///
/// let err = LruCache::<u64>::new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InconsistencyError
// ---------------------------------------------------------------------------

/// Error returned when the recency queue's structural invariants are violated
/// during a relink or unlink.
///
/// This should be unreachable under correct usage. It is produced by
/// [`RecencyQueue::touch`](crate::ds::recency_queue::RecencyQueue::touch) and
/// [`RecencyQueue::discard`](crate::ds::recency_queue::RecencyQueue::discard),
/// and is always absorbed by the cache orchestrator, which distrusts the whole
/// structure once any invariant is broken and flushes everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InconsistencyError(String);

impl InconsistencyError {
    /// Creates a new `InconsistencyError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InconsistencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InconsistencyError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
