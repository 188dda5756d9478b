//! Deterministic offline matcher.
//!
//! Token-overlap scoring between scenario text and test descriptions. Used
//! when no LLM provider is configured and as the reference implementation
//! for analyzer tests: same inputs, same verdicts, every run.

use covlens_core::errors::MatcherError;
use covlens_core::traits::matcher::{ScenarioVerdict, SemanticMatcher};
use covlens_core::types::api::ApiDefinition;
use covlens_core::types::coverage::CoverageStatus;
use covlens_core::types::orphan::{OrphanCategory, OrphanClassification};
use covlens_core::types::scenario::{BaselineScenario, Priority};
use covlens_core::types::test::UnitTest;

use crate::gaps::fallback::classify_by_file;
use crate::similarity::coverage_score;

const FULL_THRESHOLD: f64 = 0.75;
const PARTIAL_THRESHOLD: f64 = 0.35;

/// Offline token-overlap matcher.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicMatcher;

impl HeuristicMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl SemanticMatcher for HeuristicMatcher {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn match_coverage(
        &self,
        _api: &ApiDefinition,
        scenarios: &[BaselineScenario],
        tests: &[UnitTest],
    ) -> Result<Vec<ScenarioVerdict>, MatcherError> {
        let verdicts = scenarios
            .iter()
            .enumerate()
            .map(|(i, scenario)| {
                let mut best: f64 = 0.0;
                let mut matched = Vec::new();
                for test in tests {
                    let score = coverage_score(&scenario.scenario, &test.description);
                    if score >= PARTIAL_THRESHOLD {
                        matched.push(test.id.clone());
                    }
                    best = best.max(score);
                }
                let status = if best >= FULL_THRESHOLD {
                    CoverageStatus::FullyCovered
                } else if best >= PARTIAL_THRESHOLD {
                    CoverageStatus::PartiallyCovered
                } else {
                    CoverageStatus::NotCovered
                };
                let explanation = if matched.is_empty() {
                    "no test description overlaps this scenario".to_string()
                } else {
                    format!(
                        "token overlap {best:.2} across {} matching test(s)",
                        matched.len()
                    )
                };
                ScenarioVerdict {
                    scenario_index: i,
                    status,
                    matched_tests: matched,
                    explanation,
                    confidence: best as f32,
                }
            })
            .collect();
        Ok(verdicts)
    }

    fn categorize_orphans(
        &self,
        tests: &[UnitTest],
    ) -> Result<Vec<OrphanClassification>, MatcherError> {
        tests
            .iter()
            .map(|test| {
                let mut classification = classify_by_file(test);
                if classification.category == OrphanCategory::Business {
                    // Description-driven refinement; the file table alone
                    // cannot distinguish urgency among business tests.
                    classification.priority = self.infer_priority(&test.description)?;
                }
                Ok(classification)
            })
            .collect()
    }

    fn infer_priority(&self, scenario_text: &str) -> Result<Priority, MatcherError> {
        let lower = scenario_text.to_lowercase();
        let security = ["security", "unauthorized", "auth", "injection", "permission"];
        let correctness = ["error", "fail", "invalid", "reject", "missing", "conflict"];

        // Conservative: keyword heuristics are never confident enough for P0.
        let priority = if security.iter().any(|kw| lower.contains(kw)) {
            Priority::P1
        } else if correctness.iter().any(|kw| lower.contains(kw)) {
            Priority::P2
        } else {
            Priority::P3
        };
        Ok(priority)
    }
}
