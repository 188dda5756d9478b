//! Semantic-matcher providers and call discipline.
//!
//! The analyzer is provider-agnostic: a concrete provider is selected once
//! at startup via [`factory::create_matcher`] and consumed only through the
//! `SemanticMatcher` trait. Every engine-side call goes through
//! [`timeout::call_with_timeout`]; a timed-out call behaves exactly like a
//! failed one.

pub mod anthropic;
pub mod factory;
pub mod heuristic;
pub mod openai;
pub mod protocol;
pub mod timeout;

pub use factory::create_matcher;
pub use heuristic::HeuristicMatcher;
pub use timeout::call_with_timeout;
