//! Merge analyzer output into one immutable [`CoverageReport`].
//!
//! External renderers (HTML/CSV/Markdown) and exit-code policies consume
//! the report; nothing here renders or decides process exits.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use covlens_core::types::coverage::CoverageMatch;
use covlens_core::types::gap::Gap;
use covlens_core::types::orphan::{OrphanApi, OrphanTest};
use covlens_core::types::report::{ApiFailureNote, CoverageReport, CoverageSummary};

/// Assemble the final report for one service.
///
/// Gaps are sorted most urgent first, informational entries after blocking
/// ones of the same priority, then by endpoint for a stable rendering order.
/// The report is degraded when any failure note exists or any match was
/// produced under matcher failure.
pub fn assemble(
    service: String,
    matches: Vec<CoverageMatch>,
    mut gaps: Vec<Gap>,
    orphan_tests: Vec<OrphanTest>,
    orphan_apis: Vec<OrphanApi>,
    failure_notes: Vec<ApiFailureNote>,
    elapsed: Duration,
) -> CoverageReport {
    gaps.sort_by(|a, b| {
        (a.priority, a.informational, api_sort_key(a))
            .cmp(&(b.priority, b.informational, api_sort_key(b)))
    });

    let degraded = !failure_notes.is_empty() || matches.iter().any(|m| m.degraded);
    let summary =
        CoverageSummary::compute(&matches, &gaps, orphan_tests.len(), orphan_apis.len());

    CoverageReport {
        service,
        matches,
        gaps,
        orphan_tests,
        orphan_apis,
        summary,
        degraded,
        failure_notes,
        generated_at_ms: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64,
        analysis_time_ms: elapsed.as_millis() as u64,
    }
}

fn api_sort_key(gap: &Gap) -> String {
    gap.api.as_ref().map(|k| k.to_string()).unwrap_or_default()
}
