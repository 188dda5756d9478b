//! Stable cache keys for matcher request payloads.

use xxhash_rust::xxh3::xxh3_64;

use covlens_core::types::api::ApiKey;
use covlens_core::types::scenario::BaselineScenario;
use covlens_core::types::test::UnitTest;

/// Hash the exact matcher request payload deterministically.
///
/// Scenario and test sets are sorted before hashing so the key is
/// insensitive to input ordering; the payload itself captures every content
/// change, which is why the matcher cache only needs age-based staleness.
pub fn matcher_request_key(
    api: &ApiKey,
    scenarios: &[BaselineScenario],
    tests: &[UnitTest],
) -> u64 {
    let mut scenario_lines: Vec<String> = scenarios
        .iter()
        .map(|s| {
            format!(
                "s\x1f{}\x1f{}\x1f{}",
                s.category.name(),
                s.priority.name(),
                s.scenario
            )
        })
        .collect();
    scenario_lines.sort_unstable();

    let mut test_lines: Vec<String> = tests
        .iter()
        .map(|t| format!("t\x1f{}\x1f{}\x1f{}", t.id, t.description, t.file))
        .collect();
    test_lines.sort_unstable();

    let mut payload = format!("api\x1f{api}\x1e");
    for line in scenario_lines.iter().chain(test_lines.iter()) {
        payload.push_str(line);
        payload.push('\x1e');
    }
    xxh3_64(payload.as_bytes())
}
