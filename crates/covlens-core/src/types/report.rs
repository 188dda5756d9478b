//! The immutable per-run coverage report.

use serde::{Deserialize, Serialize};

use super::api::ApiKey;
use super::coverage::{CoverageMatch, CoverageStatus};
use super::gap::Gap;
use super::orphan::{OrphanApi, OrphanTest};
use super::scenario::Priority;

/// Record of one API whose analysis was degraded by a recoverable failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiFailureNote {
    pub api: ApiKey,
    pub reason: String,
}

/// Summary counts for renderers and exit-code policies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageSummary {
    pub total_scenarios: usize,
    pub fully_covered: usize,
    pub partially_covered: usize,
    pub not_covered: usize,
    /// Gap counts indexed P0..P3. Informational gaps are excluded.
    pub gaps_by_priority: [usize; 4],
    pub orphan_tests: usize,
    pub orphan_apis: usize,
    /// Fully covered scenarios as a percentage of all scenarios.
    pub coverage_percent: f64,
}

impl CoverageSummary {
    /// Compute summary counts from report parts.
    pub fn compute(matches: &[CoverageMatch], gaps: &[Gap], orphan_tests: usize, orphan_apis: usize) -> Self {
        let mut summary = Self {
            total_scenarios: matches.len(),
            orphan_tests,
            orphan_apis,
            ..Self::default()
        };
        for m in matches {
            match m.status {
                CoverageStatus::FullyCovered => summary.fully_covered += 1,
                CoverageStatus::PartiallyCovered => summary.partially_covered += 1,
                CoverageStatus::NotCovered => summary.not_covered += 1,
            }
        }
        for gap in gaps.iter().filter(|g| !g.informational) {
            summary.gaps_by_priority[gap.priority as usize] += 1;
        }
        summary.coverage_percent = if summary.total_scenarios > 0 {
            summary.fully_covered as f64 / summary.total_scenarios as f64 * 100.0
        } else {
            0.0
        };
        summary
    }
}

/// Immutable aggregate of one analysis run for one service.
///
/// Consumed by external renderers and an optional exit-code policy, then
/// discarded. The engine never persists it across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub service: String,
    /// Exactly one entry per baseline scenario.
    pub matches: Vec<CoverageMatch>,
    /// Sorted by priority (most urgent first), then API.
    pub gaps: Vec<Gap>,
    pub orphan_tests: Vec<OrphanTest>,
    pub orphan_apis: Vec<OrphanApi>,
    pub summary: CoverageSummary,
    /// True when any recoverable failure degraded part of the analysis.
    /// A degraded report must never be presented as a clean one.
    pub degraded: bool,
    pub failure_notes: Vec<ApiFailureNote>,
    /// Wall-clock timestamp (ms since the Unix epoch) when assembled.
    pub generated_at_ms: u64,
    pub analysis_time_ms: u64,
}

impl CoverageReport {
    /// Count non-informational gaps at or above the given urgency.
    ///
    /// The core only classifies; whether such gaps fail a CI run is the
    /// caller's policy.
    pub fn blocking_gap_count(&self, max: Priority) -> usize {
        self.gaps
            .iter()
            .filter(|g| !g.informational && g.priority <= max)
            .count()
    }
}
