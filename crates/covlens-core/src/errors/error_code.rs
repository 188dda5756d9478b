//! Stable error-code strings for diagnostics and host integrations.

/// Every error type exposes a stable machine-readable code.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}
