//! Configuration for the analyzer, matcher providers, and caches.
//!
//! All fields are optional; `effective_*` accessors apply defaults so a
//! partial TOML file (or an empty one) is always valid.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;

/// Semantic-matcher provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MatcherConfig {
    /// Provider name: "heuristic", "anthropic", or "openai". Default: "heuristic".
    pub provider: Option<String>,
    /// Model identifier passed to HTTP providers.
    pub model: Option<String>,
    /// Environment variable holding the provider API key.
    pub api_key_env: Option<String>,
    /// Override for the provider endpoint URL.
    pub endpoint: Option<String>,
    /// Per-call timeout in milliseconds. Default: 30_000.
    pub timeout_ms: Option<u64>,
}

impl MatcherConfig {
    pub fn effective_provider(&self) -> &str {
        self.provider.as_deref().unwrap_or("heuristic")
    }

    pub fn effective_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.unwrap_or(30_000))
    }
}

/// Cache sizing and freshness configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CacheConfig {
    /// Max entries in the file cache. Default: 1024.
    pub file_capacity: Option<u64>,
    /// Max entries in the matcher-response cache. Default: 4096.
    pub matcher_capacity: Option<u64>,
    /// Max age of a matcher-response entry in seconds. Default: 3600 (1 hour).
    pub matcher_max_age_secs: Option<u64>,
}

impl CacheConfig {
    pub fn effective_file_capacity(&self) -> u64 {
        self.file_capacity.unwrap_or(1024)
    }

    pub fn effective_matcher_capacity(&self) -> u64 {
        self.matcher_capacity.unwrap_or(4096)
    }

    pub fn effective_matcher_max_age(&self) -> Duration {
        Duration::from_secs(self.matcher_max_age_secs.unwrap_or(3600))
    }
}

/// Analyzer scheduling options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Analyze APIs within a service in parallel. Default: false.
    /// Each API's analysis is independent, so enabling this is safe.
    pub parallel_apis: Option<bool>,
    /// Minimum token-overlap similarity for orphan suggestions. Default: 0.4.
    pub suggestion_threshold: Option<f64>,
}

impl AnalysisOptions {
    pub fn effective_parallel_apis(&self) -> bool {
        self.parallel_apis.unwrap_or(false)
    }

    pub fn effective_suggestion_threshold(&self) -> f64 {
        self.suggestion_threshold.unwrap_or(0.4)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CovlensConfig {
    pub matcher: MatcherConfig,
    pub cache: CacheConfig,
    pub analysis: AnalysisOptions,
}

impl CovlensConfig {
    /// Parse from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, AnalysisError> {
        toml::from_str(s).map_err(|e| AnalysisError::MalformedInput {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, AnalysisError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AnalysisError::InputNotFound { path: display.clone() }
            } else {
                AnalysisError::Io {
                    path: display.clone(),
                    message: e.to_string(),
                }
            }
        })?;
        toml::from_str(&content).map_err(|e| AnalysisError::MalformedInput {
            path: display,
            message: e.to_string(),
        })
    }
}
