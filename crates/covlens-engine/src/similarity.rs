//! Token-overlap text similarity.
//!
//! Deterministic scoring shared by the heuristic matcher and the
//! orphan-suggestion search. Not NLP: a cheap, explainable baseline.

use covlens_core::types::collections::FxHashSet;

const STOPWORDS: &[&str] = &[
    "the", "and", "with", "for", "should", "when", "that", "then", "returns",
    "return", "test", "tests",
];

/// Lowercased alphanumeric tokens, stopwords and short tokens removed.
pub fn tokenize(text: &str) -> FxHashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .map(|t| t.to_lowercase())
        .filter(|t| t.len() >= 3 && !STOPWORDS.contains(&t.as_str()))
        .collect()
}

/// Fraction of `reference` tokens present in `candidate`, in [0, 1].
///
/// Asymmetric on purpose: a scenario is covered when its own vocabulary is
/// accounted for, regardless of how much else the test mentions.
pub fn coverage_score(reference: &str, candidate: &str) -> f64 {
    let ref_tokens = tokenize(reference);
    if ref_tokens.is_empty() {
        return 0.0;
    }
    let cand_tokens = tokenize(candidate);
    let overlap = ref_tokens.intersection(&cand_tokens).count();
    overlap as f64 / ref_tokens.len() as f64
}
