//! Recoverable cache-layer errors.

use super::error_code::ErrorCode;

/// Unexpected failure reading from a cache store. Recoverable: callers
/// bypass the cache and recompute.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    #[error("cache entry corrupted for key {key}: {message}")]
    Corrupted { key: String, message: String },
}

impl ErrorCode for CacheError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Corrupted { .. } => "CACHE_CORRUPTED",
        }
    }
}
