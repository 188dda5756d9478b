//! Event handler trait with no-op defaults.

use super::types::*;

/// Host-facing observer of analysis progress. All methods default to no-ops
/// so handlers implement only what they care about.
pub trait AnalysisEventHandler: Send + Sync {
    fn on_service_started(&self, _event: &ServiceStartedEvent) {}
    fn on_api_analyzed(&self, _event: &ApiAnalyzedEvent) {}
    fn on_matcher_degraded(&self, _event: &MatcherDegradedEvent) {}
    fn on_analysis_complete(&self, _event: &AnalysisCompleteEvent) {}
}

/// Handler that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventHandler;

impl AnalysisEventHandler for NoopEventHandler {}
