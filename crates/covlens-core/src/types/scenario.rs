//! Baseline scenarios, priorities, and risk levels.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::api::ApiKey;

/// QA-assigned category of a baseline scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioCategory {
    HappyCase,
    EdgeCase,
    ErrorCase,
    Security,
}

impl ScenarioCategory {
    pub fn name(&self) -> &'static str {
        match self {
            Self::HappyCase => "happy_case",
            Self::EdgeCase => "edge_case",
            Self::ErrorCase => "error_case",
            Self::Security => "security",
        }
    }

    /// Parse a category name as it appears in baseline documents.
    pub fn parse_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "happy_case" | "happy" => Some(Self::HappyCase),
            "edge_case" | "edge" => Some(Self::EdgeCase),
            "error_case" | "error" => Some(Self::ErrorCase),
            "security" => Some(Self::Security),
            _ => None,
        }
    }
}

impl fmt::Display for ScenarioCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scenario/gap priority. Declares urgency: P0 is most urgent.
///
/// The derived `Ord` sorts P0 first, which is the ordering gap lists use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    P0,
    P1,
    P2,
    P3,
}

impl Priority {
    pub fn name(&self) -> &'static str {
        match self {
            Self::P0 => "P0",
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
        }
    }

    /// Parse a `"P0"`..`"P3"` label, case-insensitively.
    pub fn parse_label(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "P0" => Some(Self::P0),
            "P1" => Some(Self::P1),
            "P2" => Some(Self::P2),
            "P3" => Some(Self::P3),
            _ => None,
        }
    }

    /// Default priority for a scenario carrying no explicit tag.
    /// Security scenarios are always urgent; edge cases least so.
    pub fn default_for(category: ScenarioCategory) -> Self {
        match category {
            ScenarioCategory::Security => Self::P0,
            ScenarioCategory::HappyCase | ScenarioCategory::ErrorCase => Self::P1,
            ScenarioCategory::EdgeCase => Self::P2,
        }
    }

    /// Fixed 1:1 mapping from priority to risk level.
    pub fn risk_level(&self) -> RiskLevel {
        match self {
            Self::P0 => RiskLevel::Critical,
            Self::P1 => RiskLevel::High,
            Self::P2 => RiskLevel::Medium,
            Self::P3 => RiskLevel::Low,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Risk annotation derived from priority. Never computed independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A QA-authored, one-line description of expected API behavior.
/// Authored externally; the engine never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineScenario {
    pub api: ApiKey,
    pub scenario: String,
    pub category: ScenarioCategory,
    pub priority: Priority,
}

impl BaselineScenario {
    pub fn new(
        api: ApiKey,
        scenario: impl Into<String>,
        category: ScenarioCategory,
        priority: Priority,
    ) -> Self {
        Self {
            api,
            scenario: scenario.into(),
            category,
            priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_ordering_sorts_most_urgent_first() {
        let mut v = vec![Priority::P2, Priority::P0, Priority::P3, Priority::P1];
        v.sort();
        assert_eq!(v, vec![Priority::P0, Priority::P1, Priority::P2, Priority::P3]);
    }

    #[test]
    fn risk_mapping_is_fixed() {
        assert_eq!(Priority::P0.risk_level(), RiskLevel::Critical);
        assert_eq!(Priority::P1.risk_level(), RiskLevel::High);
        assert_eq!(Priority::P2.risk_level(), RiskLevel::Medium);
        assert_eq!(Priority::P3.risk_level(), RiskLevel::Low);
    }

    #[test]
    fn category_defaults() {
        assert_eq!(Priority::default_for(ScenarioCategory::Security), Priority::P0);
        assert_eq!(Priority::default_for(ScenarioCategory::EdgeCase), Priority::P2);
    }

    #[test]
    fn label_parsing() {
        assert_eq!(Priority::parse_label(" p1 "), Some(Priority::P1));
        assert_eq!(Priority::parse_label("P9"), None);
    }
}
