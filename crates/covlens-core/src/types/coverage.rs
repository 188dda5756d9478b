//! Coverage status and per-scenario verdicts.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::scenario::BaselineScenario;
use super::test::TestId;

/// Coverage verdict for one scenario. Total order of "goodness":
/// FULLY > PARTIALLY > NOT, exposed via [`CoverageStatus::rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoverageStatus {
    FullyCovered,
    PartiallyCovered,
    NotCovered,
}

impl CoverageStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FullyCovered => "FULLY_COVERED",
            Self::PartiallyCovered => "PARTIALLY_COVERED",
            Self::NotCovered => "NOT_COVERED",
        }
    }

    /// Goodness rank: higher is better covered.
    pub fn rank(&self) -> u8 {
        match self {
            Self::FullyCovered => 2,
            Self::PartiallyCovered => 1,
            Self::NotCovered => 0,
        }
    }
}

impl fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The verdict for one baseline scenario in one analysis run.
///
/// Created fresh each run, never persisted across runs. The only cached
/// intermediate is the raw matcher response, not this final record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageMatch {
    pub scenario: BaselineScenario,
    pub status: CoverageStatus,
    pub matched_tests: Vec<TestId>,
    pub explanation: String,
    pub confidence: f32,
    /// True when this verdict was produced under matcher failure.
    #[serde(default)]
    pub degraded: bool,
}
