//! OpenAI chat-completions provider.

use covlens_core::config::MatcherConfig;
use covlens_core::errors::MatcherError;
use covlens_core::traits::matcher::{ScenarioVerdict, SemanticMatcher};
use covlens_core::types::api::ApiDefinition;
use covlens_core::types::orphan::OrphanClassification;
use covlens_core::types::scenario::{BaselineScenario, Priority};
use covlens_core::types::test::UnitTest;

use super::anthropic::map_http_error;
use super::protocol;

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Matcher backed by the OpenAI chat-completions API.
pub struct OpenAiMatcher {
    agent: ureq::Agent,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenAiMatcher {
    /// Build from config; key env var defaults to `OPENAI_API_KEY`.
    pub fn from_config(config: &MatcherConfig) -> Result<Self, MatcherError> {
        let env = config.api_key_env.as_deref().unwrap_or("OPENAI_API_KEY");
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
            .set("authorization", &format!("Bearer {}", self.api_key))
            .set("content-type", "application/json")
            .send_json(serde_json::json!({
                "model": self.model,
                "temperature": 0,
                "messages": [{"role": "user", "content": prompt}],
            }))
            .map_err(map_http_error)?;

        let body: serde_json::Value =
            response
                .into_json()
                .map_err(|e| MatcherError::MalformedResponse {
                    message: e.to_string(),
                })?;
        body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| MatcherError::MalformedResponse {
                message: "response has no message content".to_string(),
            })
    }
}

impl SemanticMatcher for OpenAiMatcher {
    fn name(&self) -> &str {
        "openai"
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
