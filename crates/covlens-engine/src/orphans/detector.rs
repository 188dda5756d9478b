//! Orphan-test assembly: classification + suggestion lookup.

use std::sync::Arc;
use std::time::Duration;

use covlens_core::errors::ErrorCode;
use covlens_core::traits::matcher::SemanticMatcher;
use covlens_core::types::api::ApiKey;
use covlens_core::types::orphan::OrphanTest;
use covlens_core::types::test::UnitTest;

use crate::gaps::fallback::classify_by_file;
use crate::matcher::call_with_timeout;

use super::suggestions::find_suggestion;

/// Turns unclaimed tests into classified [`OrphanTest`] records.
///
/// Classification prefers one batched matcher call; tests the matcher did
/// not cover (failure, timeout, or a short result) fall back to the
/// conservative file-name table.
pub struct OrphanDetector {
    matcher: Arc<dyn SemanticMatcher>,
    timeout: Duration,
    suggestion_threshold: f64,
}

impl OrphanDetector {
    pub fn new(
        matcher: Arc<dyn SemanticMatcher>,
        timeout: Duration,
        suggestion_threshold: f64,
    ) -> Self {
        Self {
            matcher,
            timeout,
            suggestion_threshold,
        }
    }

    /// Classify unclaimed tests and attach scenario suggestions.
    ///
    /// `unclaimed` pairs each test with the API the scanner attributed it
    /// to, `None` for unattributable tests.
    pub fn detect(
        &self,
        unclaimed: Vec<(UnitTest, Option<ApiKey>)>,
        ai_suggestions: &[String],
    ) -> Vec<OrphanTest> {
        if unclaimed.is_empty() {
            return Vec::new();
        }

        let tests: Vec<UnitTest> = unclaimed.iter().map(|(t, _)| t.clone()).collect();
        let matcher = self.matcher.clone();
        let batch = {
            let tests = tests.clone();
            call_with_timeout(self.timeout, move || matcher.categorize_orphans(&tests))
        };

        let mut classifications = match batch {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(
                    code = e.error_code(),
                    "orphan categorization unavailable, using fallback table: {e}"
                );
                Vec::new()
            }
        };
        // A short result leaves the tail to the fallback table.
        while classifications.len() < tests.len() {
            classifications.push(classify_by_file(&tests[classifications.len()]));
        }

        unclaimed
            .into_iter()
            .zip(classifications)
            .map(|((test, api), classification)| {
                let suggested_scenario =
                    find_suggestion(&test.description, ai_suggestions, self.suggestion_threshold);
                OrphanTest {
                    test,
                    api,
                    classification,
                    suggested_scenario,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covlens_core::errors::MatcherError;
    use covlens_core::traits::matcher::ScenarioVerdict;
    use covlens_core::types::api::{ApiDefinition, HttpMethod};
    use covlens_core::types::orphan::{OrphanAction, OrphanCategory, OrphanClassification};
    use covlens_core::types::scenario::{BaselineScenario, Priority};

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
                message: "down".into(),
            })
        }
        fn categorize_orphans(
            &self,
            _tests: &[UnitTest],
        ) -> Result<Vec<OrphanClassification>, MatcherError> {
            Err(MatcherError::Unavailable {
                message: "down".into(),
            })
        }
        fn infer_priority(&self, _scenario_text: &str) -> Result<Priority, MatcherError> {
            Err(MatcherError::Unavailable {
                message: "down".into(),
            })
        }
    }

    #[test]
    fn fallback_table_applies_when_matcher_is_down() {
        let detector = OrphanDetector::new(Arc::new(FailingMatcher), Duration::from_secs(1), 0.4);
        let api = ApiKey::new(HttpMethod::Post, "/users");
        let orphans = detector.detect(
            vec![
                (
                    UnitTest::new("t1", "maps user entity", "user_entity_test.java", "users"),
                    Some(api.clone()),
                ),
                (
                    UnitTest::new("t2", "rejects blank name", "user_controller_test.java", "users"),
                    Some(api),
                ),
            ],
            &[],
        );

        assert_eq!(orphans.len(), 2);
        assert_eq!(orphans[0].classification.category, OrphanCategory::Technical);
        assert_eq!(orphans[0].classification.action, OrphanAction::None);
        assert_eq!(orphans[1].classification.category, OrphanCategory::Business);
        assert_eq!(orphans[1].classification.priority, Priority::P2);
        assert_eq!(orphans[1].classification.action, OrphanAction::AddScenario);
    }

    #[test]
    fn suggestions_come_only_from_the_pool() {
        let detector = OrphanDetector::new(Arc::new(FailingMatcher), Duration::from_secs(1), 0.4);
        let pool = vec!["rejects a blank user name".to_string()];
        let orphans = detector.detect(
            vec![(
                UnitTest::new("t2", "rejects blank name for user", "user_controller_test.java", "users"),
                None,
            )],
            &pool,
        );
        assert_eq!(orphans[0].suggested_scenario.as_deref(), Some("rejects a blank user name"));

        let orphans = detector.detect(
            vec![(
                UnitTest::new("t2", "rejects blank name for user", "user_controller_test.java", "users"),
                None,
            )],
            &[],
        );
        assert_eq!(orphans[0].suggested_scenario, None);
    }

    #[test]
    fn empty_input_makes_no_matcher_call() {
        let detector = OrphanDetector::new(Arc::new(FailingMatcher), Duration::from_secs(1), 0.4);
        assert!(detector.detect(Vec::new(), &[]).is_empty());
    }
}
