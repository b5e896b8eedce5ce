pub use crate::diag::{DiagnosticSink, NullSink, Severity, TracingSink};
pub use crate::ds::{NodeArena, NodeId, RecencyQueue};
pub use crate::error::{ConfigError, InconsistencyError};
pub use crate::new_lru_cache;
pub use crate::policy::lru::LruCache;
pub use crate::traits::Cache;

#[cfg(feature = "concurrency")]
pub use crate::policy::lru::SharedLruCache;
