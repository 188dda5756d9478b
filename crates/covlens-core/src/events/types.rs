//! Event payloads emitted during analysis.

use crate::types::api::ApiKey;

#[derive(Debug, Clone)]
pub struct ServiceStartedEvent {
    pub service: String,
    pub api_count: usize,
}

#[derive(Debug, Clone)]
pub struct ApiAnalyzedEvent {
    pub api: ApiKey,
    pub scenario_count: usize,
    pub orphan_test_count: usize,
}

#[derive(Debug, Clone)]
pub struct MatcherDegradedEvent {
    pub api: ApiKey,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct AnalysisCompleteEvent {
    pub service: String,
    pub total_scenarios: usize,
    pub degraded: bool,
    pub duration_ms: u64,
}
