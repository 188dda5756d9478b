//! Shared traits used across Covlens crates.

pub mod cancellation;
pub mod catalog_builder;
pub mod matcher;

pub use cancellation::CancellationToken;
pub use catalog_builder::TestCatalogBuilder;
pub use matcher::{ScenarioVerdict, SemanticMatcher};
