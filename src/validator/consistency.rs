//! Optional cross-check between the two canonical documents.
//!
//! The entry-point document and the checklist document each produce an
//! independent reference set; this check reports paths mentioned by one
//! but not the other. It is pluggable so reconciliation does not change
//! when the check is disabled.

use std::collections::BTreeSet;

use super::result::{Inconsistency, InconsistencyKind};
use crate::config::ConsistencyMode;

/// A capability that compares the per-document reference sets.
pub trait DocConsistencyChecker {
    /// Inspect `(document name, references)` pairs and report mismatches.
    fn check(&self, docs: &[(String, Vec<String>)]) -> Vec<Inconsistency>;
}

/// Compares the first two documents' reference sets in both directions.
pub struct PairwiseChecker;

impl DocConsistencyChecker for PairwiseChecker {
    fn check(&self, docs: &[(String, Vec<String>)]) -> Vec<Inconsistency> {
        let [(first_name, first_refs), (second_name, second_refs)] = docs else {
            return Vec::new();
        };

        let first: BTreeSet<&String> = first_refs.iter().collect();
        let second: BTreeSet<&String> = second_refs.iter().collect();

        let mut mismatches = Vec::new();
        for path in first.difference(&second) {
            mismatches.push(mismatch(path, first_name, second_name));
        }
        for path in second.difference(&first) {
            mismatches.push(mismatch(path, second_name, first_name));
        }
        mismatches
    }
}

fn mismatch(path: &str, present_in: &str, absent_from: &str) -> Inconsistency {
    Inconsistency {
        kind: InconsistencyKind::DocMismatch,
        file: path.to_string(),
        description: format!("Referenced in {present_in} but not in {absent_from}"),
        location: Some(format!("Referenced in: {present_in}")),
    }
}

/// Build the checker selected by the configured mode, or `None` when the
/// check is disabled.
pub fn checker_for_mode(mode: ConsistencyMode) -> Option<Box<dyn DocConsistencyChecker>> {
    match mode {
        ConsistencyMode::Off => None,
        ConsistencyMode::Warn | ConsistencyMode::Fail => Some(Box::new(PairwiseChecker)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(
        first: &[&str],
        second: &[&str],
    ) -> Vec<(String, Vec<String>)> {
        vec![
            (
                "START-HERE.md".to_string(),
                first.iter().map(|s| s.to_string()).collect(),
            ),
            (
                "00-AI-MUST-READ-FIRST.md".to_string(),
                second.iter().map(|s| s.to_string()).collect(),
            ),
        ]
    }

    #[test]
    fn test_matching_sets_produce_no_mismatches() {
        let docs = docs(
            &["templates/a-template.js"],
            &["templates/a-template.js"],
        );
        assert!(PairwiseChecker.check(&docs).is_empty());
    }

    #[test]
    fn test_mismatches_reported_in_both_directions() {
        let docs = docs(
            &["templates/a-template.js", "templates/b-template.js"],
            &["templates/a-template.js", "templates/c-template.js"],
        );
        let mismatches = PairwiseChecker.check(&docs);
        assert_eq!(mismatches.len(), 2);
        assert!(mismatches
            .iter()
            .all(|m| m.kind == InconsistencyKind::DocMismatch));
        assert!(mismatches.iter().any(|m| m.file == "templates/b-template.js"
            && m.description.contains("not in 00-AI-MUST-READ-FIRST.md")));
        assert!(mismatches.iter().any(|m| m.file == "templates/c-template.js"
            && m.description.contains("not in START-HERE.md")));
    }

    #[test]
    fn test_checker_for_mode() {
        assert!(checker_for_mode(ConsistencyMode::Off).is_none());
        assert!(checker_for_mode(ConsistencyMode::Warn).is_some());
        assert!(checker_for_mode(ConsistencyMode::Fail).is_some());
    }
}
