//! The semantic-matcher capability interface.
//!
//! The engine depends only on this surface, never on a concrete provider.
//! Providers are non-deterministic, rate- and cost-bounded network callers;
//! two calls with identical input are logically idempotent but need not be
//! byte-identical. Downstream logic must depend only on the declared enum
//! and priority fields.

use serde::{Deserialize, Serialize};

use crate::errors::MatcherError;
use crate::types::api::ApiDefinition;
use crate::types::coverage::CoverageStatus;
use crate::types::orphan::OrphanClassification;
use crate::types::scenario::{BaselineScenario, Priority};
use crate::types::test::{TestId, UnitTest};

/// Raw per-scenario verdict from a matcher, before status adjustment.
///
/// `scenario_index` refers into the scenario slice passed to
/// [`SemanticMatcher::match_coverage`]; indices outside the slice are
/// ignored by the analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioVerdict {
    pub scenario_index: usize,
    pub status: CoverageStatus,
    pub matched_tests: Vec<TestId>,
    pub explanation: String,
    pub confidence: f32,
}

/// Pluggable semantic-matching capability.
///
/// Implementations must not panic; every failure mode maps to a
/// [`MatcherError`]. Partial or empty result lists are valid — the analyzer
/// fills in missing scenarios conservatively.
pub trait SemanticMatcher: Send + Sync {
    /// Provider name for logging and diagnostics.
    fn name(&self) -> &str;

    /// Judge which tests cover which scenarios of one API.
    fn match_coverage(
        &self,
        api: &ApiDefinition,
        scenarios: &[BaselineScenario],
        tests: &[UnitTest],
    ) -> Result<Vec<ScenarioVerdict>, MatcherError>;

    /// Categorize orphan tests as technical or business. Result is
    /// index-aligned with `tests`; a short result leaves the tail to the
    /// caller's fallback table.
    fn categorize_orphans(
        &self,
        tests: &[UnitTest],
    ) -> Result<Vec<OrphanClassification>, MatcherError>;

    /// Infer a priority for a scenario string. Implementations fail closed
    /// to P3 on ambiguous responses and never silently default to P0.
    fn infer_priority(&self, scenario_text: &str) -> Result<Priority, MatcherError>;
}
