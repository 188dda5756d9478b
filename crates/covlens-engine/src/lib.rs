//! # covlens-engine
//!
//! The coverage completeness engine: caches, catalog loading, semantic-
//! matcher providers, the three-layer coverage analyzer, orphan detection,
//! gap classification, and report assembly.

pub mod analyzer;
pub mod cache;
pub mod catalog;
pub mod gaps;
pub mod matcher;
pub mod orphans;
pub mod report;
pub mod similarity;

pub use analyzer::{AnalysisInput, AnalyzerOptions, CoverageAnalyzer};
pub use cache::{FileCache, MatcherCache};
pub use matcher::create_matcher;
