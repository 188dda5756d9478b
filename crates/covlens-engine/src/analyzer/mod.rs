//! The coverage analyzer: per-API three-layer completeness pipeline.
//!
//! Per API, atomically: orphan-API precedence check, Layer 2 matching
//! through the matcher-response cache, Layer 1b unclaimed-test derivation,
//! Layer 3 downgrade-only adjustment. APIs are independent, so the host may
//! opt into analyzing them in parallel. Cancellation is honored between API
//! iterations only — one API's analysis completes or is skipped whole.

pub mod completeness;

use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use covlens_core::config::CovlensConfig;
use covlens_core::errors::{AnalysisError, ErrorCode, MatcherError};
use covlens_core::events::types::*;
use covlens_core::events::AnalysisEventHandler;
use covlens_core::traits::cancellation::CancellationToken;
use covlens_core::traits::matcher::{ScenarioVerdict, SemanticMatcher};
use covlens_core::types::api::{ApiDefinition, ApiKey};
use covlens_core::types::collections::FxHashMap;
use covlens_core::types::coverage::{CoverageMatch, CoverageStatus};
use covlens_core::types::orphan::OrphanApi;
use covlens_core::types::report::{ApiFailureNote, CoverageReport};
use covlens_core::types::scenario::BaselineScenario;
use covlens_core::types::test::{TestId, UnitTest};

use crate::cache::{matcher_request_key, MatcherCache};
use crate::gaps::classify_gaps;
use crate::matcher::call_with_timeout;
use crate::orphans::OrphanDetector;
use crate::report;

/// Everything one service's analysis consumes. Catalogs and the test→API
/// attribution are produced by external collaborators and read-only here.
#[derive(Debug, Clone, Default)]
pub struct AnalysisInput {
    pub service: String,
    pub apis: Vec<ApiDefinition>,
    pub scenarios: Vec<BaselineScenario>,
    pub tests: Vec<UnitTest>,
    pub attribution: FxHashMap<TestId, ApiKey>,
    /// Optional AI-generated scenario pool for orphan suggestions.
    pub ai_suggestions: Vec<String>,
}

/// Analyzer scheduling knobs, resolved from config once.
#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    pub timeout: Duration,
    pub parallel_apis: bool,
    pub suggestion_threshold: f64,
}

impl AnalyzerOptions {
    pub fn from_config(config: &CovlensConfig) -> Self {
        Self {
            timeout: config.matcher.effective_timeout(),
            parallel_apis: config.analysis.effective_parallel_apis(),
            suggestion_threshold: config.analysis.effective_suggestion_threshold(),
        }
    }
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self::from_config(&CovlensConfig::default())
    }
}

/// Result of one API's atomic analysis step.
struct ApiOutcome {
    matches: Vec<CoverageMatch>,
    orphan_api: Option<OrphanApi>,
    unclaimed: Vec<(UnitTest, Option<ApiKey>)>,
    failure: Option<ApiFailureNote>,
}

/// The coverage completeness engine for one service at a time.
///
/// Matcher and caches are injected; the analyzer owns no global state and a
/// fresh instance per test case is cheap.
pub struct CoverageAnalyzer {
    matcher: Arc<dyn SemanticMatcher>,
    matcher_cache: Arc<MatcherCache>,
    options: AnalyzerOptions,
    cancellation: CancellationToken,
}

impl CoverageAnalyzer {
    pub fn new(
        matcher: Arc<dyn SemanticMatcher>,
        matcher_cache: Arc<MatcherCache>,
        options: AnalyzerOptions,
    ) -> Self {
        Self {
            matcher,
            matcher_cache,
            options,
            cancellation: CancellationToken::new(),
        }
    }

    /// Share an externally owned cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Handle for external cancellation between API iterations.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Run the full pipeline for one service and assemble its report.
    pub fn analyze(
        &self,
        input: &AnalysisInput,
        events: &dyn AnalysisEventHandler,
    ) -> Result<CoverageReport, AnalysisError> {
        let start = Instant::now();
        events.on_service_started(&ServiceStartedEvent {
            service: input.service.clone(),
            api_count: input.apis.len(),
        });

        let mut scenarios_by_api: FxHashMap<ApiKey, Vec<BaselineScenario>> = FxHashMap::default();
        for scenario in &input.scenarios {
            scenarios_by_api
                .entry(scenario.api.clone())
                .or_default()
                .push(scenario.clone());
        }

        let mut tests_by_api: FxHashMap<ApiKey, Vec<UnitTest>> = FxHashMap::default();
        let mut unattributed: Vec<UnitTest> = Vec::new();
        for test in &input.tests {
            match input.attribution.get(&test.id) {
                Some(api) => tests_by_api.entry(api.clone()).or_default().push(test.clone()),
                None => unattributed.push(test.clone()),
            }
        }

        // The baseline or attribution may reference endpoints the API catalog
        // does not know yet; analyze those under a synthesized definition so
        // every scenario still gets exactly one match.
        let apis = effective_apis(&input.apis, &scenarios_by_api, &tests_by_api);

        let empty_scenarios: Vec<BaselineScenario> = Vec::new();
        let empty_tests: Vec<UnitTest> = Vec::new();
        let analyze_one = |api: &ApiDefinition| -> Result<ApiOutcome, AnalysisError> {
            if self.cancellation.is_cancelled() {
                return Err(AnalysisError::Cancelled);
            }
            let scenarios = scenarios_by_api.get(&api.key).unwrap_or(&empty_scenarios);
            let tests = tests_by_api.get(&api.key).unwrap_or(&empty_tests);
            Ok(self.analyze_api(api, scenarios, tests, events))
        };

        let outcomes: Vec<ApiOutcome> = if self.options.parallel_apis {
            apis.par_iter().map(analyze_one).collect::<Result<_, _>>()?
        } else {
            apis.iter().map(analyze_one).collect::<Result<_, _>>()?
        };

        let mut matches = Vec::new();
        let mut orphan_apis = Vec::new();
        let mut failure_notes = Vec::new();
        let mut unclaimed: Vec<(UnitTest, Option<ApiKey>)> = Vec::new();
        for outcome in outcomes {
            matches.extend(outcome.matches);
            orphan_apis.extend(outcome.orphan_api);
            failure_notes.extend(outcome.failure);
            unclaimed.extend(outcome.unclaimed);
        }
        unclaimed.extend(unattributed.into_iter().map(|t| (t, None)));

        let detector = OrphanDetector::new(
            self.matcher.clone(),
            self.options.timeout,
            self.options.suggestion_threshold,
        );
        let orphan_tests = detector.detect(unclaimed, &input.ai_suggestions);

        let gaps = classify_gaps(&matches, &orphan_tests);
        let report = report::assemble(
            input.service.clone(),
            matches,
            gaps,
            orphan_tests,
            orphan_apis,
            failure_notes,
            start.elapsed(),
        );

        events.on_analysis_complete(&AnalysisCompleteEvent {
            service: input.service.clone(),
            total_scenarios: report.summary.total_scenarios,
            degraded: report.degraded,
            duration_ms: report.analysis_time_ms,
        });
        Ok(report)
    }

    /// Analyze one API atomically. Never fails: matcher trouble degrades the
    /// API's scenarios and the run continues.
    fn analyze_api(
        &self,
        api: &ApiDefinition,
        scenarios: &[BaselineScenario],
        tests: &[UnitTest],
        events: &dyn AnalysisEventHandler,
    ) -> ApiOutcome {
        // Orphan-API precedence: nothing to match, no matcher call.
        if scenarios.is_empty() && tests.is_empty() {
            return ApiOutcome {
                matches: Vec::new(),
                orphan_api: Some(OrphanApi {
                    api: api.key.clone(),
                    description: api.description.clone(),
                }),
                unclaimed: Vec::new(),
                failure: None,
            };
        }

        // Forward check: undocumented API — every test is an orphan candidate.
        if scenarios.is_empty() {
            return ApiOutcome {
                matches: Vec::new(),
                orphan_api: None,
                unclaimed: tests
                    .iter()
                    .map(|t| (t.clone(), Some(api.key.clone())))
                    .collect(),
                failure: None,
            };
        }

        // No tests at all: the verdict needs no semantic judgment.
        if tests.is_empty() {
            let matches = scenarios
                .iter()
                .map(|scenario| CoverageMatch {
                    scenario: scenario.clone(),
                    status: CoverageStatus::NotCovered,
                    matched_tests: Vec::new(),
                    explanation: "no unit tests discovered for this endpoint".to_string(),
                    confidence: 1.0,
                    degraded: false,
                })
                .collect();
            events.on_api_analyzed(&ApiAnalyzedEvent {
                api: api.key.clone(),
                scenario_count: scenarios.len(),
                orphan_test_count: 0,
            });
            return ApiOutcome {
                matches,
                orphan_api: None,
                unclaimed: Vec::new(),
                failure: None,
            };
        }

        match self.layer2_verdicts(api, scenarios, tests) {
            Ok(verdicts) => {
                let (mut matches, unclaimed_tests) =
                    completeness::apply_verdicts(scenarios, &verdicts, tests);
                completeness::downgrade_for_unclaimed(&mut matches, unclaimed_tests.len());
                events.on_api_analyzed(&ApiAnalyzedEvent {
                    api: api.key.clone(),
                    scenario_count: scenarios.len(),
                    orphan_test_count: unclaimed_tests.len(),
                });
                ApiOutcome {
                    matches,
                    orphan_api: None,
                    unclaimed: unclaimed_tests
                        .into_iter()
                        .map(|t| (t, Some(api.key.clone())))
                        .collect(),
                    failure: None,
                }
            }
            Err(e) => {
                tracing::warn!(
                    api = %api.key,
                    code = e.error_code(),
                    "matcher failed, degrading scenarios: {e}"
                );
                events.on_matcher_degraded(&MatcherDegradedEvent {
                    api: api.key.clone(),
                    reason: e.to_string(),
                });
                let matches = scenarios
                    .iter()
                    .map(|scenario| CoverageMatch {
                        scenario: scenario.clone(),
                        status: CoverageStatus::NotCovered,
                        matched_tests: Vec::new(),
                        explanation: "analysis unavailable".to_string(),
                        confidence: 0.0,
                        degraded: true,
                    })
                    .collect();
                ApiOutcome {
                    matches,
                    orphan_api: None,
                    // Claim status is unknown under failure; reporting these
                    // tests as orphans would fabricate a finding.
                    unclaimed: Vec::new(),
                    failure: Some(ApiFailureNote {
                        api: api.key.clone(),
                        reason: e.to_string(),
                    }),
                }
            }
        }
    }

    /// Layer 2 through the matcher-response cache. Only successes are
    /// inserted, so a failed call can never evict or overwrite a prior
    /// cached success.
    fn layer2_verdicts(
        &self,
        api: &ApiDefinition,
        scenarios: &[BaselineScenario],
        tests: &[UnitTest],
    ) -> Result<Arc<Vec<ScenarioVerdict>>, MatcherError> {
        let key = matcher_request_key(&api.key, scenarios, tests);
        if let Some(cached) = self.matcher_cache.get(key) {
            tracing::debug!(api = %api.key, "matcher cache hit");
            return Ok(cached);
        }

        let matcher = self.matcher.clone();
        let api_owned = api.clone();
        let scenarios_owned = scenarios.to_vec();
        let tests_owned = tests.to_vec();
        let verdicts = call_with_timeout(self.options.timeout, move || {
            matcher.match_coverage(&api_owned, &scenarios_owned, &tests_owned)
        })?;
        self.matcher_cache.insert(key, verdicts.clone());
        Ok(Arc::new(verdicts))
    }
}

/// Input APIs plus synthesized definitions for endpoints only the baseline
/// or attribution knows about.
fn effective_apis(
    apis: &[ApiDefinition],
    scenarios_by_api: &FxHashMap<ApiKey, Vec<BaselineScenario>>,
    tests_by_api: &FxHashMap<ApiKey, Vec<UnitTest>>,
) -> Vec<ApiDefinition> {
    let mut effective: Vec<ApiDefinition> = apis.to_vec();
    let known: std::collections::HashSet<&ApiKey> = apis.iter().map(|a| &a.key).collect();

    let mut extra_keys: Vec<&ApiKey> = scenarios_by_api
        .keys()
        .chain(tests_by_api.keys())
        .filter(|k| !known.contains(k))
        .collect();
    extra_keys.sort_unstable();
    extra_keys.dedup();

    for key in extra_keys {
        tracing::debug!(api = %key, "endpoint absent from API catalog, synthesizing");
        effective.push(ApiDefinition {
            key: key.clone(),
            description: None,
            parameters: Vec::new(),
            request_body: None,
            responses: FxHashMap::default(),
        });
    }
    effective
}
