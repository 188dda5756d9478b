//! Orphan tests and orphan APIs.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::api::ApiKey;
use super::scenario::Priority;
use super::test::UnitTest;

/// Whether an orphan test exercises infrastructure or business behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrphanCategory {
    Technical,
    Business,
}

impl OrphanCategory {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Technical => "TECHNICAL",
            Self::Business => "BUSINESS",
        }
    }
}

impl fmt::Display for OrphanCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Recommended follow-up for an orphan test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanAction {
    /// Nothing to do; the test is legitimately outside the baseline.
    None,
    /// A baseline scenario should be authored for this behavior.
    AddScenario,
    /// Human review needed before deciding.
    Investigate,
}

impl OrphanAction {
    /// Actionable orphans produce gaps; `None` ones are informational.
    pub fn is_actionable(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Classification of an orphan test, either matcher-produced or from the
/// conservative fallback table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrphanClassification {
    pub category: OrphanCategory,
    /// Free-form refinement, e.g. "entity-mapping" or "uncovered-endpoint-behavior".
    pub subtype: String,
    pub priority: Priority,
    pub action: OrphanAction,
}

/// A unit test not traceable to any baseline scenario of its API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrphanTest {
    pub test: UnitTest,
    /// API the scanner attributed the test to, when known.
    pub api: Option<ApiKey>,
    pub classification: OrphanClassification,
    /// Closest match from the AI-suggestion pool, when one clears the
    /// similarity bar. Never fabricated.
    pub suggested_scenario: Option<String>,
}

/// An endpoint with neither documented scenarios nor unit tests.
/// Reported as informational, never as a blocking gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrphanApi {
    pub api: ApiKey,
    pub description: Option<String>,
}
