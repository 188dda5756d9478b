//! Anthropic Messages API provider.

use covlens_core::config::MatcherConfig;
use covlens_core::errors::MatcherError;
use covlens_core::traits::matcher::{ScenarioVerdict, SemanticMatcher};
use covlens_core::types::api::ApiDefinition;
use covlens_core::types::orphan::OrphanClassification;
use covlens_core::types::scenario::{BaselineScenario, Priority};
use covlens_core::types::test::UnitTest;

use super::protocol;

const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_MODEL: &str = "claude-sonnet-4-5";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 2048;

/// Matcher backed by the Anthropic Messages API.
pub struct AnthropicMatcher {
    agent: ureq::Agent,
    endpoint: String,
    api_key: String,
    model: String,
}

impl AnthropicMatcher {
    /// Build from config. The API key comes from the configured environment
    /// variable (default `ANTHROPIC_API_KEY`); a missing key fails here, at
    /// startup, not on the first analysis call.
    pub fn from_config(config: &MatcherConfig) -> Result<Self, MatcherError> {
        let env = config.api_key_env.as_deref().unwrap_or("ANTHROPIC_API_KEY");
        let api_key = std::env::var(env).map_err(|_| MatcherError::Auth {
            message: format!("environment variable {env} is not set"),
        })?;
        let agent = ureq::AgentBuilder::new()
            .timeout(config.effective_timeout())
            .build();
        Ok(Self {
            agent,
            endpoint: config
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            api_key,
            model: config.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }

    fn complete(&self, prompt: &str) -> Result<String, MatcherError> {
        let response = self
            .agent
            .post(&self.endpoint)
            .set("x-api-key", &self.api_key)
            .set("anthropic-version", ANTHROPIC_VERSION)
            .set("content-type", "application/json")
            .send_json(serde_json::json!({
                "model": self.model,
                "max_tokens": MAX_TOKENS,
                "messages": [{"role": "user", "content": prompt}],
            }))
            .map_err(map_http_error)?;

        let body: serde_json::Value =
            response
                .into_json()
                .map_err(|e| MatcherError::MalformedResponse {
                    message: e.to_string(),
                })?;
        body["content"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| MatcherError::MalformedResponse {
                message: "response has no content text".to_string(),
            })
    }
}

impl SemanticMatcher for AnthropicMatcher {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn match_coverage(
        &self,
        api: &ApiDefinition,
        scenarios: &[BaselineScenario],
        tests: &[UnitTest],
    ) -> Result<Vec<ScenarioVerdict>, MatcherError> {
        let prompt = protocol::build_coverage_prompt(api, scenarios, tests);
        let text = self.complete(&prompt)?;
        protocol::parse_coverage_response(&text, scenarios.len())
    }

    fn categorize_orphans(
        &self,
        tests: &[UnitTest],
    ) -> Result<Vec<OrphanClassification>, MatcherError> {
        let prompt = protocol::build_orphan_prompt(tests);
        let text = self.complete(&prompt)?;
        protocol::parse_orphan_response(&text, tests.len())
    }

    fn infer_priority(&self, scenario_text: &str) -> Result<Priority, MatcherError> {
        let prompt = protocol::build_priority_prompt(scenario_text);
        let text = self.complete(&prompt)?;
        Ok(protocol::parse_priority_response(&text))
    }
}

/// Map transport and HTTP-status failures onto the matcher taxonomy.
pub(crate) fn map_http_error(e: ureq::Error) -> MatcherError {
    match e {
        ureq::Error::Status(code @ (401 | 403), _) => MatcherError::Auth {
            message: format!("http status {code}"),
        },
        ureq::Error::Status(code, _) => MatcherError::Unavailable {
            message: format!("http status {code}"),
        },
        ureq::Error::Transport(t) => MatcherError::Unavailable {
            message: t.to_string(),
        },
    }
}
