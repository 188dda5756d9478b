//! File read cache keyed by path, validated by (mtime, size).
//!
//! No TTL: file content change is the only trustworthy staleness signal for
//! local files, and (mtime, size) captures it. Any mismatch invalidates the
//! entry and forces a re-read.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

use moka::sync::Cache;

use covlens_core::errors::{AnalysisError, CacheError, ErrorCode};

#[derive(Clone)]
struct CachedFile {
    mtime: SystemTime,
    size: u64,
    content: Arc<str>,
}

/// Bounded LRU cache of file contents with (mtime, size) freshness checks.
pub struct FileCache {
    inner: Cache<String, CachedFile>,
    disk_reads: AtomicU64,
    hits: AtomicU64,
}

impl FileCache {
    /// Create a new file cache with the given entry capacity.
    pub fn new(capacity: u64) -> Self {
        Self {
            inner: Cache::new(capacity),
            disk_reads: AtomicU64::new(0),
            hits: AtomicU64::new(0),
        }
    }

    /// Read a file through the cache.
    ///
    /// Returns the cached content when both mtime and size are unchanged
    /// since the last read; otherwise invalidates and re-reads. A missing
    /// file is `InputNotFound`, which aborts the calling service's run.
    pub fn read(&self, path: &Path) -> Result<Arc<str>, AnalysisError> {
        let key = path.display().to_string();

        let metadata = std::fs::metadata(path).map_err(|e| map_io_error(&key, e))?;
        let size = metadata.len();
        let mtime = match metadata.modified() {
            Ok(t) => t,
            Err(e) => {
                // Platform without mtime support: the freshness check is
                // impossible, so bypass the cache entirely for this read.
                let cache_err = CacheError::Corrupted {
                    key: key.clone(),
                    message: format!("mtime unavailable: {e}"),
                };
                tracing::warn!(
                    path = %key,
                    code = cache_err.error_code(),
                    "bypassing file cache: {cache_err}"
                );
                return self.read_from_disk(path, &key);
            }
        };

        if let Some(entry) = self.inner.get(&key) {
            if entry.mtime == mtime && entry.size == size {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(entry.content.clone());
            }
            self.inner.invalidate(&key);
        }

        let content = self.read_from_disk(path, &key)?;
        self.inner.insert(
            key,
            CachedFile {
                mtime,
                size,
                content: content.clone(),
            },
        );
        Ok(content)
    }

    fn read_from_disk(&self, path: &Path, key: &str) -> Result<Arc<str>, AnalysisError> {
        let content = std::fs::read_to_string(path).map_err(|e| map_io_error(key, e))?;
        self.disk_reads.fetch_add(1, Ordering::Relaxed);
        Ok(Arc::from(content))
    }

    /// Drop a cached entry.
    pub fn invalidate(&self, path: &Path) {
        self.inner.invalidate(&path.display().to_string());
    }

    /// Number of actual disk reads performed. Unchanged-file re-reads are
    /// served from cache and do not increment this.
    pub fn disk_reads(&self) -> u64 {
        self.disk_reads.load(Ordering::Relaxed)
    }

    /// Number of cache hits.
    pub fn hit_count(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Current entry count.
    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }
}

fn map_io_error(path: &str, e: std::io::Error) -> AnalysisError {
    if e.kind() == std::io::ErrorKind::NotFound {
        AnalysisError::InputNotFound {
            path: path.to_string(),
        }
    } else {
        AnalysisError::Io {
            path: path.to_string(),
            message: e.to_string(),
        }
    }
}
