//! End-to-end analyzer tests: three-layer algorithm, orphan precedence,
//! degraded reporting, cache interaction, and cancellation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use covlens_core::errors::{AnalysisError, MatcherError};
use covlens_core::events::NoopEventHandler;
use covlens_core::traits::cancellation::CancellationToken;
use covlens_core::traits::matcher::{ScenarioVerdict, SemanticMatcher};
use covlens_core::types::api::{ApiDefinition, ApiKey, HttpMethod};
use covlens_core::types::collections::FxHashMap;
use covlens_core::types::coverage::CoverageStatus;
use covlens_core::types::gap::GapSource;
use covlens_core::types::orphan::OrphanClassification;
use covlens_core::types::scenario::{BaselineScenario, Priority, ScenarioCategory};
use covlens_core::types::test::{TestId, UnitTest};
use covlens_engine::{AnalysisInput, AnalyzerOptions, CoverageAnalyzer, MatcherCache};

/// Matcher that replays fixed verdicts per endpoint and counts calls.
/// Orphan categorization is left to the fallback table so tests stay
/// deterministic about classification.
struct StaticMatcher {
    verdicts: FxHashMap<String, Vec<ScenarioVerdict>>,
    coverage_calls: AtomicUsize,
}

impl StaticMatcher {
    fn new(verdicts: FxHashMap<String, Vec<ScenarioVerdict>>) -> Self {
        Self {
            verdicts,
            coverage_calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.coverage_calls.load(Ordering::SeqCst)
    }
}

impl SemanticMatcher for StaticMatcher {
    fn name(&self) -> &str {
        "static"
    }

    fn match_coverage(
        &self,
        api: &ApiDefinition,
        _scenarios: &[BaselineScenario],
        _tests: &[UnitTest],
    ) -> Result<Vec<ScenarioVerdict>, MatcherError> {
        self.coverage_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .verdicts
            .get(&api.key.to_string())
            .cloned()
            .unwrap_or_default())
    }

    fn categorize_orphans(
        &self,
        _tests: &[UnitTest],
    ) -> Result<Vec<OrphanClassification>, MatcherError> {
        Err(MatcherError::Unavailable {
            message: "categorization disabled in this stub".to_string(),
        })
    }

    fn infer_priority(&self, _scenario_text: &str) -> Result<Priority, MatcherError> {
        Ok(Priority::P3)
    }
}

/// Matcher that fails every call.
struct FailingMatcher;

impl SemanticMatcher for FailingMatcher {
    fn name(&self) -> &str {
        "failing"
    }

    fn match_coverage(
        &self,
        _api: &ApiDefinition,
        _scenarios: &[BaselineScenario],
        _tests: &[UnitTest],
    ) -> Result<Vec<ScenarioVerdict>, MatcherError> {
        Err(MatcherError::Unavailable {
            message: "provider down".to_string(),
        })
    }

    fn categorize_orphans(
        &self,
        _tests: &[UnitTest],
    ) -> Result<Vec<OrphanClassification>, MatcherError> {
        Err(MatcherError::Unavailable {
            message: "provider down".to_string(),
        })
    }

    fn infer_priority(&self, _scenario_text: &str) -> Result<Priority, MatcherError> {
        Err(MatcherError::Unavailable {
            message: "provider down".to_string(),
        })
    }
}

fn verdict(index: usize, status: CoverageStatus, ids: &[&str]) -> ScenarioVerdict {
    ScenarioVerdict {
        scenario_index: index,
        status,
        matched_tests: ids.iter().map(|id| TestId((*id).to_string())).collect(),
        explanation: "judged".to_string(),
        confidence: 0.9,
    }
}

fn scenario(api: &ApiKey, text: &str, category: ScenarioCategory, priority: Priority) -> BaselineScenario {
    BaselineScenario::new(api.clone(), text, category, priority)
}

fn fresh_cache() -> Arc<MatcherCache> {
    Arc::new(MatcherCache::new(128, Duration::from_secs(3600)))
}

fn analyzer(matcher: Arc<dyn SemanticMatcher>, cache: Arc<MatcherCache>) -> CoverageAnalyzer {
    CoverageAnalyzer::new(matcher, cache, AnalyzerOptions::default())
}

// End-to-end scenario A: POST /users, 2 scenarios the matcher fully
// matches, plus one unrelated extra test. The extra test triggers the
// Layer 3 downgrade and surfaces as an orphan.
#[test]
fn scenario_a_extra_test_downgrades_and_orphans() {
    let api_key = ApiKey::new(HttpMethod::Post, "/users");
    let mut verdicts = FxHashMap::default();
    verdicts.insert(
        api_key.to_string(),
        vec![
            verdict(0, CoverageStatus::FullyCovered, &["t1"]),
            verdict(1, CoverageStatus::FullyCovered, &["t2"]),
        ],
    );
    let matcher = Arc::new(StaticMatcher::new(verdicts));

    let tests = vec![
        UnitTest::new("t1", "creates a user", "user_controller_test.java", "users"),
        UnitTest::new("t2", "rejects duplicate email", "user_controller_test.java", "users"),
        UnitTest::new("t3", "archives stale sessions", "session_cleanup_test.java", "users"),
    ];
    let mut attribution = FxHashMap::default();
    for t in &tests {
        attribution.insert(t.id.clone(), api_key.clone());
    }

    let input = AnalysisInput {
        service: "users".to_string(),
        apis: vec![ApiDefinition::new(HttpMethod::Post, "/users")],
        scenarios: vec![
            scenario(&api_key, "creates a user", ScenarioCategory::HappyCase, Priority::P1),
            scenario(&api_key, "rejects duplicate email", ScenarioCategory::ErrorCase, Priority::P1),
        ],
        tests,
        attribution,
        ai_suggestions: Vec::new(),
    };

    let report = analyzer(matcher.clone(), fresh_cache())
        .analyze(&input, &NoopEventHandler)
        .unwrap();

    assert_eq!(report.matches.len(), 2);
    for m in &report.matches {
        assert_eq!(m.status, CoverageStatus::PartiallyCovered, "{}", m.scenario.scenario);
        assert!(!m.degraded);
    }
    assert_eq!(report.orphan_tests.len(), 1);
    assert_eq!(report.orphan_tests[0].test.id, TestId("t3".into()));
    assert!(report.orphan_apis.is_empty());
    assert!(!report.degraded);
    assert_eq!(matcher.calls(), 1);

    // Orphan exclusivity: no claimed test is also an orphan.
    let claimed: Vec<&TestId> = report
        .matches
        .iter()
        .flat_map(|m| m.matched_tests.iter())
        .collect();
    for orphan in &report.orphan_tests {
        assert!(!claimed.contains(&&orphan.test.id));
    }

    // Downgraded scenarios classify as completeness gaps; the orphan (a
    // non-infrastructure file) classifies as a business orphan-test gap.
    let sources: Vec<GapSource> = report.gaps.iter().map(|g| g.source).collect();
    assert_eq!(sources.iter().filter(|s| **s == GapSource::CompletenessGap).count(), 2);
    assert_eq!(sources.iter().filter(|s| **s == GapSource::OrphanTest).count(), 1);
}

// End-to-end scenario B: DELETE /users/{id} with nothing documented and
// nothing tested → exactly one OrphanApi, no matches, no gaps, no matcher
// call.
#[test]
fn scenario_b_orphan_api_precedence() {
    let matcher = Arc::new(StaticMatcher::new(FxHashMap::default()));
    let input = AnalysisInput {
        service: "users".to_string(),
        apis: vec![ApiDefinition::new(HttpMethod::Delete, "/users/{id}")],
        ..AnalysisInput::default()
    };

    let report = analyzer(matcher.clone(), fresh_cache())
        .analyze(&input, &NoopEventHandler)
        .unwrap();

    assert!(report.matches.is_empty());
    assert!(report.gaps.is_empty());
    assert!(report.orphan_tests.is_empty());
    assert_eq!(report.orphan_apis.len(), 1);
    assert_eq!(report.orphan_apis[0].api, ApiKey::new(HttpMethod::Delete, "/users/{id}"));
    assert_eq!(matcher.calls(), 0, "orphan-API check precedes any matcher call");
    assert!(!report.degraded);
}

// End-to-end scenario C: GET /users/{id} with 3 scenarios and 0 tests →
// 3 NOT_COVERED matches, 3 gaps at the scenarios' own priorities, no
// downgrade logic, no matcher call.
#[test]
fn scenario_c_no_tests_means_not_covered_gaps() {
    let api_key = ApiKey::new(HttpMethod::Get, "/users/{id}");
    let matcher = Arc::new(StaticMatcher::new(FxHashMap::default()));
    let input = AnalysisInput {
        service: "users".to_string(),
        apis: vec![ApiDefinition::new(HttpMethod::Get, "/users/{id}")],
        scenarios: vec![
            scenario(&api_key, "returns the user", ScenarioCategory::HappyCase, Priority::P0),
            scenario(&api_key, "404 on unknown id", ScenarioCategory::ErrorCase, Priority::P1),
            scenario(&api_key, "handles numeric overflow ids", ScenarioCategory::EdgeCase, Priority::P2),
        ],
        ..AnalysisInput::default()
    };

    let report = analyzer(matcher.clone(), fresh_cache())
        .analyze(&input, &NoopEventHandler)
        .unwrap();

    assert_eq!(report.matches.len(), 3);
    for m in &report.matches {
        assert_eq!(m.status, CoverageStatus::NotCovered);
        assert_eq!(m.explanation, "no unit tests discovered for this endpoint");
    }
    assert_eq!(report.gaps.len(), 3);
    let priorities: Vec<Priority> = report.gaps.iter().map(|g| g.priority).collect();
    assert_eq!(priorities, vec![Priority::P0, Priority::P1, Priority::P2]);
    for g in &report.gaps {
        assert_eq!(g.source, GapSource::UnitTestGap);
    }
    assert_eq!(matcher.calls(), 0, "no semantic judgment needed without tests");
    assert_eq!(report.summary.not_covered, 3);
    assert_eq!(report.summary.gaps_by_priority, [1, 1, 1, 0]);
}

// Degraded reporting: the matcher always fails, every scenario of the
// affected API ends NOT_COVERED + degraded, and no error escapes.
#[test]
fn always_failing_matcher_degrades_but_never_aborts() {
    let api_key = ApiKey::new(HttpMethod::Post, "/orders");
    let tests = vec![UnitTest::new("t1", "creates an order", "order_test.java", "orders")];
    let mut attribution = FxHashMap::default();
    attribution.insert(TestId("t1".into()), api_key.clone());

    let input = AnalysisInput {
        service: "orders".to_string(),
        apis: vec![ApiDefinition::new(HttpMethod::Post, "/orders")],
        scenarios: vec![
            scenario(&api_key, "creates an order", ScenarioCategory::HappyCase, Priority::P0),
            scenario(&api_key, "rejects empty cart", ScenarioCategory::ErrorCase, Priority::P1),
        ],
        tests,
        attribution,
        ai_suggestions: Vec::new(),
    };

    let report = analyzer(Arc::new(FailingMatcher), fresh_cache())
        .analyze(&input, &NoopEventHandler)
        .unwrap();

    assert!(report.degraded);
    assert_eq!(report.failure_notes.len(), 1);
    assert_eq!(report.failure_notes[0].api, api_key);
    assert_eq!(report.matches.len(), 2);
    for m in &report.matches {
        assert_eq!(m.status, CoverageStatus::NotCovered);
        assert_eq!(m.explanation, "analysis unavailable");
        assert!(m.degraded);
    }
    // Claim status is unknown under failure — no orphans are fabricated.
    assert!(report.orphan_tests.is_empty());
}

// Tie-break: a cached success is reused (no second call), and a later
// failure cannot overwrite it.
#[test]
fn cached_success_survives_later_failures() {
    let api_key = ApiKey::new(HttpMethod::Put, "/users/{id}");
    let mut verdicts = FxHashMap::default();
    verdicts.insert(
        api_key.to_string(),
        vec![verdict(0, CoverageStatus::FullyCovered, &["t1"])],
    );
    let matcher = Arc::new(StaticMatcher::new(verdicts));
    let cache = fresh_cache();

    let tests = vec![UnitTest::new("t1", "updates the user", "user_test.java", "users")];
    let mut attribution = FxHashMap::default();
    attribution.insert(TestId("t1".into()), api_key.clone());
    let input = AnalysisInput {
        service: "users".to_string(),
        apis: vec![ApiDefinition::new(HttpMethod::Put, "/users/{id}")],
        scenarios: vec![scenario(&api_key, "updates the user", ScenarioCategory::HappyCase, Priority::P1)],
        tests,
        attribution,
        ai_suggestions: Vec::new(),
    };

    let first = analyzer(matcher.clone(), cache.clone())
        .analyze(&input, &NoopEventHandler)
        .unwrap();
    assert_eq!(first.matches[0].status, CoverageStatus::FullyCovered);
    assert_eq!(matcher.calls(), 1);

    // Same input again: served from cache, the matcher is not re-invoked.
    let second = analyzer(matcher.clone(), cache.clone())
        .analyze(&input, &NoopEventHandler)
        .unwrap();
    assert_eq!(second.matches[0].status, CoverageStatus::FullyCovered);
    assert_eq!(matcher.calls(), 1);

    // A failing provider with the same cache still sees the cached success.
    let third = analyzer(Arc::new(FailingMatcher), cache)
        .analyze(&input, &NoopEventHandler)
        .unwrap();
    assert_eq!(third.matches[0].status, CoverageStatus::FullyCovered);
    assert!(!third.degraded);
}

// An expired cache entry is not served: the next run calls the matcher
// again and a failure then degrades normally.
#[test]
fn expired_cache_entry_is_not_served() {
    let api_key = ApiKey::new(HttpMethod::Get, "/reports");
    let mut verdicts = FxHashMap::default();
    verdicts.insert(
        api_key.to_string(),
        vec![verdict(0, CoverageStatus::FullyCovered, &["t1"])],
    );
    let matcher = Arc::new(StaticMatcher::new(verdicts));
    // Zero max age: every entry is expired on arrival.
    let cache = Arc::new(MatcherCache::new(128, Duration::ZERO));

    let tests = vec![UnitTest::new("t1", "lists reports", "report_test.java", "reports")];
    let mut attribution = FxHashMap::default();
    attribution.insert(TestId("t1".into()), api_key.clone());
    let input = AnalysisInput {
        service: "reports".to_string(),
        apis: vec![ApiDefinition::new(HttpMethod::Get, "/reports")],
        scenarios: vec![scenario(&api_key, "lists reports", ScenarioCategory::HappyCase, Priority::P1)],
        tests,
        attribution,
        ai_suggestions: Vec::new(),
    };

    let a = analyzer(matcher.clone(), cache.clone());
    a.analyze(&input, &NoopEventHandler).unwrap();
    a.analyze(&input, &NoopEventHandler).unwrap();
    assert_eq!(matcher.calls(), 2, "expired entries force a fresh call");
}

// Cancellation between API iterations: a pre-cancelled token aborts before
// the first API and no partial analysis leaks out.
#[test]
fn cancelled_token_aborts_cleanly() {
    let matcher = Arc::new(StaticMatcher::new(FxHashMap::default()));
    let token = CancellationToken::new();
    token.cancel();

    let input = AnalysisInput {
        service: "users".to_string(),
        apis: vec![ApiDefinition::new(HttpMethod::Get, "/users")],
        ..AnalysisInput::default()
    };

    let result = analyzer(matcher.clone(), fresh_cache())
        .with_cancellation(token)
        .analyze(&input, &NoopEventHandler);
    assert!(matches!(result, Err(AnalysisError::Cancelled)));
    assert_eq!(matcher.calls(), 0);
}

// Scenarios keyed to an endpoint the API catalog does not know still get
// exactly one match each.
#[test]
fn baseline_only_endpoint_still_analyzed() {
    let api_key = ApiKey::new(HttpMethod::Patch, "/users/{id}/email");
    let matcher = Arc::new(StaticMatcher::new(FxHashMap::default()));
    let input = AnalysisInput {
        service: "users".to_string(),
        apis: Vec::new(),
        scenarios: vec![scenario(&api_key, "updates the email", ScenarioCategory::HappyCase, Priority::P1)],
        ..AnalysisInput::default()
    };

    let report = analyzer(matcher, fresh_cache())
        .analyze(&input, &NoopEventHandler)
        .unwrap();
    assert_eq!(report.matches.len(), 1);
    assert_eq!(report.matches[0].scenario.api, api_key);
    assert_eq!(report.matches[0].status, CoverageStatus::NotCovered);
}

// Unattributed tests cannot be claimed by any scenario and surface as
// orphans with no API.
#[test]
fn unattributed_tests_become_apiless_orphans() {
    let matcher = Arc::new(StaticMatcher::new(FxHashMap::default()));
    let input = AnalysisInput {
        service: "users".to_string(),
        apis: Vec::new(),
        tests: vec![UnitTest::new("t9", "validates audit trail", "audit_test.java", "users")],
        ..AnalysisInput::default()
    };

    let report = analyzer(matcher, fresh_cache())
        .analyze(&input, &NoopEventHandler)
        .unwrap();
    assert_eq!(report.orphan_tests.len(), 1);
    assert!(report.orphan_tests[0].api.is_none());
}
