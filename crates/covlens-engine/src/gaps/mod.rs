//! Gap classification and prioritization.

pub mod classifier;
pub mod fallback;

pub use classifier::classify_gaps;
pub use fallback::classify_by_file;
