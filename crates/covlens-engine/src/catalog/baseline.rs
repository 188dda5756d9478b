//! Baseline document parsing.
//!
//! The document is a JSON object keyed `"<METHOD> <endpoint>"`, mapping
//! category names to arrays of one-line scenario strings. A scenario may
//! carry an explicit leading `[P0]`..`[P3]` tag; without one the category's
//! default priority applies.

use serde_json::Value;

use covlens_core::errors::AnalysisError;
use covlens_core::types::api::ApiKey;
use covlens_core::types::scenario::{BaselineScenario, Priority, ScenarioCategory};

/// Parse a baseline document. Unparseable structure is `MalformedInput`,
/// fatal for the owning service only.
pub fn parse_baseline_document(
    path: &str,
    content: &str,
) -> Result<Vec<BaselineScenario>, AnalysisError> {
    let root: Value = serde_json::from_str(content).map_err(|e| malformed(path, e.to_string()))?;
    let map = root
        .as_object()
        .ok_or_else(|| malformed(path, "expected a top-level object".to_string()))?;

    let mut scenarios = Vec::new();
    for (api_text, categories) in map {
        let api = ApiKey::parse(api_text)
            .map_err(|e| malformed(path, format!("bad API key '{api_text}': {e}")))?;
        let categories = categories.as_object().ok_or_else(|| {
            malformed(path, format!("'{api_text}': expected category object"))
        })?;

        for (category_name, lines) in categories {
            let category = ScenarioCategory::parse_name(category_name).ok_or_else(|| {
                malformed(
                    path,
                    format!("'{api_text}': unknown category '{category_name}'"),
                )
            })?;
            let lines = lines.as_array().ok_or_else(|| {
                malformed(
                    path,
                    format!("'{api_text}'/{category_name}: expected an array"),
                )
            })?;

            for line in lines {
                let text = line.as_str().ok_or_else(|| {
                    malformed(
                        path,
                        format!("'{api_text}'/{category_name}: expected string entries"),
                    )
                })?;
                let (priority, scenario_text) = split_priority_tag(text, category);
                if scenario_text.is_empty() {
                    continue;
                }
                scenarios.push(BaselineScenario::new(
                    api.clone(),
                    scenario_text,
                    category,
                    priority,
                ));
            }
        }
    }
    Ok(scenarios)
}

/// Strip a leading `[Pn]` tag. A bracketed prefix that is not a priority
/// label is left in place and the category default applies.
fn split_priority_tag(text: &str, category: ScenarioCategory) -> (Priority, String) {
    let trimmed = text.trim();
    if let Some(rest) = trimmed.strip_prefix('[') {
        if let Some((label, tail)) = rest.split_once(']') {
            if let Some(priority) = Priority::parse_label(label) {
                return (priority, tail.trim().to_string());
            }
        }
    }
    (Priority::default_for(category), trimmed.to_string())
}

fn malformed(path: &str, message: String) -> AnalysisError {
    AnalysisError::MalformedInput {
        path: path.to_string(),
        message,
    }
}
