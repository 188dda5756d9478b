//! Recoverable semantic-matcher errors.

use super::error_code::ErrorCode;

/// Failures of the external semantic-matching capability.
///
/// All variants are recoverable: the analyzer degrades the affected API's
/// scenarios to NOT_COVERED and continues the run.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MatcherError {
    #[error("matcher unavailable: {message}")]
    Unavailable { message: String },

    #[error("matcher call timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("matcher authentication failed: {message}")]
    Auth { message: String },

    #[error("malformed matcher response: {message}")]
    MalformedResponse { message: String },

    #[error("unknown matcher provider: {provider}")]
    UnknownProvider { provider: String },
}

impl ErrorCode for MatcherError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => "MATCHER_UNAVAILABLE",
            Self::Timeout { .. } => "MATCHER_TIMEOUT",
            Self::Auth { .. } => "MATCHER_AUTH_FAILED",
            Self::MalformedResponse { .. } => "MATCHER_MALFORMED_RESPONSE",
            Self::UnknownProvider { .. } => "MATCHER_UNKNOWN_PROVIDER",
        }
    }
}
