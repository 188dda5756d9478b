//! # covlens-core
//!
//! Foundation crate for the Covlens coverage completeness engine.
//! Defines all types, traits, errors, config, events, and telemetry.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod events;
pub mod telemetry;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::CovlensConfig;
pub use errors::error_code::ErrorCode;
pub use events::handler::AnalysisEventHandler;
pub use traits::cancellation::CancellationToken;
pub use traits::matcher::{ScenarioVerdict, SemanticMatcher};
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::coverage::{CoverageMatch, CoverageStatus};
pub use types::report::CoverageReport;
