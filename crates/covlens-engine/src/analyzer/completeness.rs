//! Verdict application and status adjustment.
//!
//! Layer 2 output (raw matcher verdicts) becomes one [`CoverageMatch`] per
//! scenario; Layer 1b derives the unclaimed-test set from the same verdicts;
//! Layer 3 adjusts statuses downward only.

use covlens_core::traits::matcher::ScenarioVerdict;
use covlens_core::types::collections::FxHashSet;
use covlens_core::types::coverage::{CoverageMatch, CoverageStatus};
use covlens_core::types::scenario::BaselineScenario;
use covlens_core::types::test::{TestId, UnitTest};

/// Apply raw verdicts to a scenario slice.
///
/// Every scenario gets exactly one match: scenarios missing from a partial
/// response stay NOT_COVERED with a "no verdict returned" explanation. When
/// several verdicts target the same index the last one wins. Matched test
/// ids are filtered to tests actually attributed to this API, so a claimed
/// test is always real.
///
/// Also returns the unclaimed tests: attributed tests no scenario claims.
pub fn apply_verdicts(
    scenarios: &[BaselineScenario],
    verdicts: &[ScenarioVerdict],
    tests: &[UnitTest],
) -> (Vec<CoverageMatch>, Vec<UnitTest>) {
    let known_ids: FxHashSet<&TestId> = tests.iter().map(|t| &t.id).collect();

    let mut matches: Vec<CoverageMatch> = scenarios
        .iter()
        .map(|scenario| CoverageMatch {
            scenario: scenario.clone(),
            status: CoverageStatus::NotCovered,
            matched_tests: Vec::new(),
            explanation: "no verdict returned".to_string(),
            confidence: 0.0,
            degraded: false,
        })
        .collect();

    for verdict in verdicts {
        let Some(entry) = matches.get_mut(verdict.scenario_index) else {
            continue;
        };
        let matched_tests: Vec<TestId> = verdict
            .matched_tests
            .iter()
            .filter(|id| known_ids.contains(id))
            .cloned()
            .collect();
        entry.status = verdict.status;
        entry.matched_tests = matched_tests;
        entry.explanation = verdict.explanation.clone();
        entry.confidence = verdict.confidence;
    }

    let claimed: FxHashSet<&TestId> = matches
        .iter()
        .flat_map(|m| m.matched_tests.iter())
        .collect();
    let unclaimed: Vec<UnitTest> = tests
        .iter()
        .filter(|t| !claimed.contains(&t.id))
        .cloned()
        .collect();

    (matches, unclaimed)
}

/// Layer 3: downgrade-only status adjustment.
///
/// Unclaimed tests mean the API's true behavioral surface is incompletely
/// documented, so coverage of the documented part cannot imply completeness:
/// FULLY_COVERED drops to PARTIALLY_COVERED. PARTIALLY and NOT_COVERED are
/// left unchanged — a status is never upgraded here.
pub fn downgrade_for_unclaimed(matches: &mut [CoverageMatch], unclaimed_count: usize) {
    if unclaimed_count == 0 {
        return;
    }
    for m in matches {
        if m.status == CoverageStatus::FullyCovered {
            m.status = CoverageStatus::PartiallyCovered;
            m.explanation.push_str(&format!(
                "; {unclaimed_count} unclaimed test(s) indicate undocumented endpoint behavior"
            ));
        }
    }
}
