//! Data model shared across the workspace.

pub mod api;
pub mod collections;
pub mod coverage;
pub mod gap;
pub mod orphan;
pub mod report;
pub mod scenario;

pub use api::{ApiDefinition, ApiKey, ApiParameter, HttpMethod};
pub use coverage::{CoverageMatch, CoverageStatus};
pub use gap::{Gap, GapSource};
pub use orphan::{OrphanAction, OrphanApi, OrphanCategory, OrphanClassification, OrphanTest};
pub use report::{ApiFailureNote, CoverageReport, CoverageSummary};
pub use scenario::{BaselineScenario, Priority, RiskLevel, ScenarioCategory};
pub use test::{TestId, UnitTest};
