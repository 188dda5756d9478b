//! Conservative fallback classification for orphan tests.
//!
//! Used when the matcher is unavailable. File-name heuristics only — a
//! best-effort default subject to false negatives (a controller test whose
//! name happens to contain an infrastructure keyword lands in TECHNICAL),
//! deliberately kept weak: nothing here ever produces P0 or P1.

use std::sync::OnceLock;

use regex::RegexSet;

use covlens_core::types::orphan::{OrphanAction, OrphanCategory, OrphanClassification};
use covlens_core::types::scenario::Priority;
use covlens_core::types::test::UnitTest;

const INFRA_PATTERNS: &[(&str, &str)] = &[
    (r"(?i)entity", "entity"),
    (r"(?i)dto", "dto"),
    (r"(?i)mapper", "mapper"),
    (r"(?i)exception", "exception-message"),
    (r"(?i)index", "index"),
    (r"(?i)connection", "connection-lifecycle"),
    (r"(?i)lifecycle", "connection-lifecycle"),
];

fn infra_set() -> &'static RegexSet {
    static SET: OnceLock<RegexSet> = OnceLock::new();
    SET.get_or_init(|| {
        RegexSet::new(INFRA_PATTERNS.iter().map(|(pattern, _)| *pattern))
            .expect("infrastructure patterns are valid regexes")
    })
}

/// Classify an orphan test by file name alone.
///
/// Infrastructure-looking files: TECHNICAL, P3, no action. Everything else:
/// BUSINESS, P2, "add scenario" — conservative, since human judgment is
/// required before anything stronger.
pub fn classify_by_file(test: &UnitTest) -> OrphanClassification {
    let matches = infra_set().matches(&test.file);
    if let Some(first) = matches.iter().next() {
        OrphanClassification {
            category: OrphanCategory::Technical,
            subtype: INFRA_PATTERNS[first].1.to_string(),
            priority: Priority::P3,
            action: OrphanAction::None,
        }
    } else {
        OrphanClassification {
            category: OrphanCategory::Business,
            subtype: "undocumented-behavior".to_string(),
            priority: Priority::P2,
            action: OrphanAction::AddScenario,
        }
    }
}
