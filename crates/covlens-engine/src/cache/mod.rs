//! Cache layer: freshness-checked file cache + age-bounded matcher cache.
//!
//! Both caches are explicitly constructed and dependency-injected into the
//! analyzer, never module-level singletons, so tests get a fresh isolated
//! cache per case. Eviction never affects correctness, only performance.

pub mod file_cache;
pub mod keys;
pub mod matcher_cache;

pub use file_cache::FileCache;
pub use keys::matcher_request_key;
pub use matcher_cache::MatcherCache;
