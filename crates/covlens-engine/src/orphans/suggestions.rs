//! Orphan-test scenario suggestions from an AI-generated pool.

use crate::similarity::coverage_score;

/// Pick the closest suggestion for an orphan test's description.
///
/// Returns `None` when nothing in the pool clears the threshold — a missing
/// suggestion is never fabricated.
pub fn find_suggestion(
    test_description: &str,
    pool: &[String],
    threshold: f64,
) -> Option<String> {
    let mut best: Option<(f64, &String)> = None;
    for candidate in pool {
        let score = coverage_score(test_description, candidate);
        if score >= threshold && best.map_or(true, |(b, _)| score > b) {
            best = Some((score, candidate));
        }
    }
    best.map(|(_, s)| s.clone())
}
