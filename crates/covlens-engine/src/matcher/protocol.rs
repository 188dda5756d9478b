//! Prompt construction and defensive response parsing for LLM providers.
//!
//! Providers are asked for strict JSON, but responses are treated as
//! untrusted: fenced blocks are unwrapped, unknown enum values are skipped,
//! out-of-range indices are dropped, and confidence is clamped to [0, 1].

use serde::Deserialize;

use covlens_core::errors::MatcherError;
use covlens_core::traits::matcher::ScenarioVerdict;
use covlens_core::types::api::ApiDefinition;
use covlens_core::types::coverage::CoverageStatus;
use covlens_core::types::orphan::{OrphanAction, OrphanCategory, OrphanClassification};
use covlens_core::types::scenario::{BaselineScenario, Priority};
use covlens_core::types::test::{TestId, UnitTest};

pub fn build_coverage_prompt(
    api: &ApiDefinition,
    scenarios: &[BaselineScenario],
    tests: &[UnitTest],
) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "You are judging unit-test coverage of documented API test scenarios.\n\
         Endpoint: ",
    );
    prompt.push_str(&api.key.to_string());
    if let Some(desc) = &api.description {
        prompt.push_str("\nDescription: ");
        prompt.push_str(desc);
    }
    prompt.push_str("\n\nScenarios:\n");
    for (i, s) in scenarios.iter().enumerate() {
        prompt.push_str(&format!("{i}. [{}] {}\n", s.category, s.scenario));
    }
    prompt.push_str("\nUnit tests:\n");
    for t in tests {
        prompt.push_str(&format!("- id={} file={} :: {}\n", t.id, t.file, t.description));
    }
    prompt.push_str(
        "\nFor every scenario, decide whether the tests cover it. Respond with ONLY a JSON \
         array, one object per scenario:\n\
         [{\"scenario_index\": 0, \"status\": \"FULLY_COVERED|PARTIALLY_COVERED|NOT_COVERED\", \
         \"matched_test_ids\": [\"...\"], \"explanation\": \"...\", \"confidence\": 0.0}]\n",
    );
    prompt
}

pub fn build_orphan_prompt(tests: &[UnitTest]) -> String {
    let mut prompt = String::from(
        "Categorize each unit test below as TECHNICAL (infrastructure plumbing: entities, DTOs, \
         mappers, exception messages, indexes, connection lifecycle) or BUSINESS (observable API \
         behavior that deserves a documented scenario).\n\nTests:\n",
    );
    for (i, t) in tests.iter().enumerate() {
        prompt.push_str(&format!("{i}. file={} :: {}\n", t.file, t.description));
    }
    prompt.push_str(
        "\nRespond with ONLY a JSON array, one object per test, in order:\n\
         [{\"category\": \"TECHNICAL|BUSINESS\", \"subtype\": \"...\", \
         \"priority\": \"P0|P1|P2|P3\", \"action\": \"none|add_scenario|investigate\"}]\n",
    );
    prompt
}

pub fn build_priority_prompt(scenario_text: &str) -> String {
    format!(
        "Assign a test priority to this API scenario. P0 = critical path or security, \
         P1 = important behavior, P2 = secondary behavior, P3 = cosmetic.\n\
         Scenario: {scenario_text}\n\
         Respond with exactly one label: P0, P1, P2 or P3.\n"
    )
}

#[derive(Deserialize)]
struct RawVerdict {
    scenario_index: usize,
    status: String,
    #[serde(default)]
    matched_test_ids: Vec<String>,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    confidence: f32,
}

/// Parse a coverage response. Verdicts with unknown statuses or indices
/// outside the scenario slice are skipped; a partial result is valid.
pub fn parse_coverage_response(
    text: &str,
    scenario_count: usize,
) -> Result<Vec<ScenarioVerdict>, MatcherError> {
    let raw: Vec<RawVerdict> = serde_json::from_str(extract_json(text)).map_err(|e| {
        MatcherError::MalformedResponse {
            message: format!("coverage response: {e}"),
        }
    })?;

    let mut verdicts = Vec::with_capacity(raw.len());
    for v in raw {
        if v.scenario_index >= scenario_count {
            tracing::warn!(index = v.scenario_index, "dropping out-of-range verdict");
            continue;
        }
        let Some(status) = parse_status(&v.status) else {
            tracing::warn!(status = %v.status, "dropping verdict with unknown status");
            continue;
        };
        verdicts.push(ScenarioVerdict {
            scenario_index: v.scenario_index,
            status,
            matched_tests: v.matched_test_ids.into_iter().map(TestId).collect(),
            explanation: v.explanation,
            confidence: v.confidence.clamp(0.0, 1.0),
        });
    }
    Ok(verdicts)
}

#[derive(Deserialize)]
struct RawOrphan {
    category: String,
    #[serde(default)]
    subtype: String,
    #[serde(default)]
    priority: String,
    #[serde(default)]
    action: String,
}

/// Parse an orphan-categorization response. Index-aligned with the request;
/// extra entries are truncated, a short result leaves the tail to the
/// caller's fallback table. Unparseable priorities fail closed to P3.
pub fn parse_orphan_response(
    text: &str,
    test_count: usize,
) -> Result<Vec<OrphanClassification>, MatcherError> {
    let raw: Vec<RawOrphan> = serde_json::from_str(extract_json(text)).map_err(|e| {
        MatcherError::MalformedResponse {
            message: format!("orphan response: {e}"),
        }
    })?;

    Ok(raw
        .into_iter()
        .take(test_count)
        .map(|o| {
            let category = match o.category.trim().to_ascii_uppercase().as_str() {
                "TECHNICAL" => OrphanCategory::Technical,
                _ => OrphanCategory::Business,
            };
            OrphanClassification {
                category,
                subtype: o.subtype,
                priority: Priority::parse_label(&o.priority).unwrap_or(Priority::P3),
                action: parse_action(&o.action, category),
            }
        })
        .collect())
}

/// Parse a priority response: the first `P0`..`P3` label wins; anything
/// ambiguous fails closed to P3 — never to P0.
pub fn parse_priority_response(text: &str) -> Priority {
    let upper = text.to_ascii_uppercase();
    let mut best: Option<(usize, Priority)> = None;
    for p in [Priority::P0, Priority::P1, Priority::P2, Priority::P3] {
        if let Some(pos) = upper.find(p.name()) {
            if best.map_or(true, |(bpos, _)| pos < bpos) {
                best = Some((pos, p));
            }
        }
    }
    best.map(|(_, p)| p).unwrap_or(Priority::P3)
}

fn parse_status(s: &str) -> Option<CoverageStatus> {
    match s.trim().to_ascii_uppercase().as_str() {
        "FULLY_COVERED" => Some(CoverageStatus::FullyCovered),
        "PARTIALLY_COVERED" => Some(CoverageStatus::PartiallyCovered),
        "NOT_COVERED" => Some(CoverageStatus::NotCovered),
        _ => None,
    }
}

fn parse_action(s: &str, category: OrphanCategory) -> OrphanAction {
    match s.trim().to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
        "none" => OrphanAction::None,
        "add_scenario" => OrphanAction::AddScenario,
        "investigate" => OrphanAction::Investigate,
        // Missing/unknown action: technical tests need nothing, business
        // tests go to human review rather than straight to a scenario ask.
        _ => match category {
            OrphanCategory::Technical => OrphanAction::None,
            OrphanCategory::Business => OrphanAction::Investigate,
        },
    }
}

/// Unwrap a fenced code block and trim to the outermost JSON bracket pair.
fn extract_json(text: &str) -> &str {
    let mut s = text.trim();
    if let Some(start) = s.find("```") {
        let after = &s[start + 3..];
        let after = after.strip_prefix("json").unwrap_or(after);
        if let Some(end) = after.find("```") {
            s = after[..end].trim();
        }
    }
    let start = s.find(['[', '{']);
    let end = s.rfind([']', '}']);
    match (start, end) {
        (Some(a), Some(b)) if b >= a => &s[a..=b],
        _ => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_response_roundtrip() {
        let text = r#"Here you go:
```json
[{"scenario_index": 0, "status": "FULLY_COVERED", "matched_test_ids": ["t1"], "explanation": "direct match", "confidence": 1.4},
 {"scenario_index": 5, "status": "NOT_COVERED"},
 {"scenario_index": 1, "status": "MAYBE"}]
```"#;
        let verdicts = parse_coverage_response(text, 2).unwrap();
        assert_eq!(verdicts.len(), 1);
        assert_eq!(verdicts[0].scenario_index, 0);
        assert_eq!(verdicts[0].status, CoverageStatus::FullyCovered);
        assert_eq!(verdicts[0].matched_tests, vec![TestId("t1".into())]);
        assert_eq!(verdicts[0].confidence, 1.0);
    }

    #[test]
    fn coverage_response_rejects_garbage() {
        assert!(parse_coverage_response("sorry, I cannot", 2).is_err());
    }

    #[test]
    fn orphan_response_truncates_and_fails_closed() {
        let text = r#"[
            {"category": "TECHNICAL", "subtype": "dto", "priority": "P3", "action": "none"},
            {"category": "BUSINESS", "subtype": "flow", "priority": "p99", "action": "add scenario"},
            {"category": "BUSINESS"}
        ]"#;
        let classifications = parse_orphan_response(text, 2).unwrap();
        assert_eq!(classifications.len(), 2);
        assert_eq!(classifications[0].category, OrphanCategory::Technical);
        assert_eq!(classifications[0].action, OrphanAction::None);
        assert_eq!(classifications[1].priority, Priority::P3);
        assert_eq!(classifications[1].action, OrphanAction::AddScenario);
    }

    #[test]
    fn priority_response_fails_closed_to_p3() {
        assert_eq!(parse_priority_response("P1"), Priority::P1);
        assert_eq!(parse_priority_response("The answer is P0."), Priority::P0);
        assert_eq!(parse_priority_response("unsure"), Priority::P3);
        assert_eq!(parse_priority_response(""), Priority::P3);
    }
}
