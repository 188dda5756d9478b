//! Provider selection.

use std::sync::Arc;

use covlens_core::config::MatcherConfig;
use covlens_core::errors::MatcherError;
use covlens_core::traits::matcher::SemanticMatcher;

use super::anthropic::AnthropicMatcher;
use super::heuristic::HeuristicMatcher;
use super::openai::OpenAiMatcher;

/// Create the configured matcher provider. Called once at startup; the
/// analyzer only ever sees the trait object.
pub fn create_matcher(config: &MatcherConfig) -> Result<Arc<dyn SemanticMatcher>, MatcherError> {
    match config.effective_provider() {
        "heuristic" => Ok(Arc::new(HeuristicMatcher::new())),
        "anthropic" => Ok(Arc::new(AnthropicMatcher::from_config(config)?)),
        "openai" => Ok(Arc::new(OpenAiMatcher::from_config(config)?)),
        other => Err(MatcherError::UnknownProvider {
            provider: other.to_string(),
        }),
    }
}
