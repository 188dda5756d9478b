//! Seam for the out-of-scope per-language test scanners.

use std::path::Path;

use crate::errors::AnalysisError;
use crate::types::test::UnitTest;

/// One language's test-catalog scanner behind a common interface.
///
/// The engine never invokes scanners itself; hosts build catalogs up front
/// and hand them in. New languages plug in without touching the analyzer.
pub trait TestCatalogBuilder: Send + Sync {
    /// Language this builder understands, e.g. "java" or "typescript".
    fn language(&self) -> &str;

    /// Scan a source root and produce the unit-test catalog for it.
    fn build(&self, root: &Path, service: &str) -> Result<Vec<UnitTest>, AnalysisError>;
}
