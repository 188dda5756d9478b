//! Analysis lifecycle events.

pub mod handler;
pub mod types;

pub use handler::{AnalysisEventHandler, NoopEventHandler};
