//! Error taxonomy for the coverage engine.
//!
//! Fatal errors (`AnalysisError::InputNotFound`, `MalformedInput`) abort one
//! service's analysis. Recoverable errors (`MatcherError`, `CacheError`) are
//! absorbed into the report's degraded markers and never abort a run.

pub mod analysis_error;
pub mod cache_error;
pub mod error_code;
pub mod matcher_error;

pub use analysis_error::AnalysisError;
pub use cache_error::CacheError;
pub use error_code::ErrorCode;
pub use matcher_error::MatcherError;
