//! Fatal per-service analysis errors.

use super::error_code::ErrorCode;
use super::matcher_error::MatcherError;

/// Errors that abort one service's analysis. Other services continue.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// A catalog file is missing. Fatal for the whole run of that service.
    #[error("input not found: {path}")]
    InputNotFound { path: String },

    /// A catalog or baseline document failed to parse.
    #[error("malformed input {path}: {message}")]
    MalformedInput { path: String, message: String },

    /// I/O failure reading an input that was known to exist.
    #[error("io error on {path}: {message}")]
    Io { path: String, message: String },

    /// The analysis was cancelled between API iterations.
    #[error("analysis cancelled")]
    Cancelled,

    /// Matcher failure escalated at a point where it cannot be absorbed
    /// (e.g. provider construction at startup).
    #[error("matcher error: {0}")]
    Matcher(#[from] MatcherError),
}

impl ErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InputNotFound { .. } => "ANALYSIS_INPUT_NOT_FOUND",
            Self::MalformedInput { .. } => "ANALYSIS_MALFORMED_INPUT",
            Self::Io { .. } => "ANALYSIS_IO_ERROR",
            Self::Cancelled => "ANALYSIS_CANCELLED",
            Self::Matcher(e) => e.error_code(),
        }
    }
}
