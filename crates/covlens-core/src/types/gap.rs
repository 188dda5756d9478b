//! Prioritized coverage gaps.

use serde::{Deserialize, Serialize};

use super::api::ApiKey;
use super::scenario::{Priority, RiskLevel};
use super::test::TestId;

/// Where a gap came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GapSource {
    /// A scenario with no test coverage at all.
    UnitTestGap,
    /// A scenario whose coverage is real but incomplete.
    CompletenessGap,
    /// An actionable orphan test (undocumented tested behavior).
    OrphanTest,
    /// An endpoint with no scenarios and no tests. The engine itself keeps
    /// orphan APIs out of the gap list (they are informational and live in
    /// the report's orphan-API list); hosts folding them into a combined
    /// gap view use this source.
    OrphanApi,
}

impl GapSource {
    pub fn name(&self) -> &'static str {
        match self {
            Self::UnitTestGap => "unit-test-gap",
            Self::CompletenessGap => "completeness-gap",
            Self::OrphanTest => "orphan-test",
            Self::OrphanApi => "orphan-api",
        }
    }
}

/// A prioritized, risk-annotated coverage gap.
///
/// Always backed by a real scenario or a real orphan; the classifier never
/// synthesizes gaps without a backing entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    /// Owning endpoint; absent for orphan tests the scanner could not
    /// attribute to any API.
    pub api: Option<ApiKey>,
    pub description: String,
    pub priority: Priority,
    pub risk: RiskLevel,
    pub source: GapSource,
    /// Backing scenario text for scenario-derived gaps.
    #[serde(default)]
    pub scenario: Option<String>,
    /// Backing test for orphan-test gaps.
    #[serde(default)]
    pub test: Option<TestId>,
    /// Informational gaps never participate in blocking policies.
    #[serde(default)]
    pub informational: bool,
}
