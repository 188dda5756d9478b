//! Derive prioritized gaps from matches and orphan tests.
//!
//! A gap is never synthesized without a backing entity: every entry points
//! at a concrete scenario or orphan test.

use covlens_core::types::coverage::{CoverageMatch, CoverageStatus};
use covlens_core::types::gap::{Gap, GapSource};
use covlens_core::types::orphan::OrphanTest;

/// Classify every non-fully-covered scenario and actionable orphan test.
///
/// Orphan APIs are informational by policy: they surface through the
/// report's orphan-API list, never as gap entries.
pub fn classify_gaps(matches: &[CoverageMatch], orphan_tests: &[OrphanTest]) -> Vec<Gap> {
    let mut gaps = Vec::new();

    for m in matches {
        let source = match m.status {
            CoverageStatus::FullyCovered => continue,
            // Real but incomplete coverage.
            CoverageStatus::PartiallyCovered => GapSource::CompletenessGap,
            // No coverage at all.
            CoverageStatus::NotCovered => GapSource::UnitTestGap,
        };
        // The scenario's declared priority is authoritative, never recomputed.
        let priority = m.scenario.priority;
        gaps.push(Gap {
            api: Some(m.scenario.api.clone()),
            description: format!("scenario not fully covered: {}", m.scenario.scenario),
            priority,
            risk: priority.risk_level(),
            source,
            scenario: Some(m.scenario.scenario.clone()),
            test: None,
            informational: false,
        });
    }

    for orphan in orphan_tests {
        if !orphan.classification.action.is_actionable() {
            continue;
        }
        let priority = orphan.classification.priority;
        gaps.push(Gap {
            api: orphan.api.clone(),
            description: format!(
                "tested behavior lacks a baseline scenario: {}",
                orphan.test.description
            ),
            priority,
            risk: priority.risk_level(),
            source: GapSource::OrphanTest,
            scenario: orphan.suggested_scenario.clone(),
            test: Some(orphan.test.id.clone()),
            informational: false,
        });
    }

    gaps
}
