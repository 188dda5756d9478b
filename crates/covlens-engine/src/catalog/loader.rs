//! JSON catalog loaders.

use std::path::Path;

use covlens_core::errors::AnalysisError;
use covlens_core::types::api::{ApiDefinition, ApiKey};
use covlens_core::types::collections::FxHashMap;
use covlens_core::types::scenario::BaselineScenario;
use covlens_core::types::test::{TestId, UnitTest};

use crate::cache::FileCache;

use super::baseline;

/// Load the API catalog: a JSON array of [`ApiDefinition`].
pub fn load_api_catalog(
    cache: &FileCache,
    path: &Path,
) -> Result<Vec<ApiDefinition>, AnalysisError> {
    let content = cache.read(path)?;
    serde_json::from_str(&content).map_err(|e| malformed(path, e))
}

/// Load the unit-test catalog: a JSON array of [`UnitTest`].
pub fn load_test_catalog(cache: &FileCache, path: &Path) -> Result<Vec<UnitTest>, AnalysisError> {
    let content = cache.read(path)?;
    serde_json::from_str(&content).map_err(|e| malformed(path, e))
}

/// Load the baseline scenario document. See [`baseline`] for the format.
pub fn load_baseline(
    cache: &FileCache,
    path: &Path,
) -> Result<Vec<BaselineScenario>, AnalysisError> {
    let content = cache.read(path)?;
    baseline::parse_baseline_document(&path.display().to_string(), &content)
}

/// Load the scanner-produced test→API attribution map: a JSON object from
/// test id to `"<METHOD> <endpoint>"`.
pub fn load_attribution(
    cache: &FileCache,
    path: &Path,
) -> Result<FxHashMap<TestId, ApiKey>, AnalysisError> {
    let content = cache.read(path)?;
    let raw: FxHashMap<String, String> =
        serde_json::from_str(&content).map_err(|e| malformed(path, e))?;

    let mut attribution = FxHashMap::default();
    for (test_id, api) in raw {
        let key = ApiKey::parse(&api).map_err(|message| AnalysisError::MalformedInput {
            path: path.display().to_string(),
            message: format!("attribution for '{test_id}': {message}"),
        })?;
        attribution.insert(TestId(test_id), key);
    }
    Ok(attribution)
}

fn malformed(path: &Path, e: serde_json::Error) -> AnalysisError {
    AnalysisError::MalformedInput {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}
