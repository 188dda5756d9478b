//! Engine configuration.

pub mod analysis_config;

pub use analysis_config::{AnalysisOptions, CacheConfig, CovlensConfig, MatcherConfig};
