use serde::Serialize;
use std::collections::BTreeMap;

use crate::links::BrokenLink;

/// Category of a recorded inconsistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InconsistencyKind {
    OrphanedFile,
    MissingFile,
    BrokenLink,
    DocMismatch,
}

impl std::fmt::Display for InconsistencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            InconsistencyKind::OrphanedFile => "orphaned_file",
            InconsistencyKind::MissingFile => "missing_file",
            InconsistencyKind::BrokenLink => "broken_link",
            InconsistencyKind::DocMismatch => "doc_mismatch",
        };
        write!(f, "{tag}")
    }
}

/// A discrepancy between the template tree and the documentation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inconsistency {
    pub kind: InconsistencyKind,
    pub file: String,
    pub description: String,
    /// Optional `file:line` or referencing-document location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// The aggregate result of one validation run.
///
/// Constructed fresh per run and owned by the caller; domain findings are
/// collected exhaustively rather than failing fast.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// All template files found on disk, relative to the genesis root.
    pub template_files: Vec<String>,
    /// Referenced path -> documents that reference it.
    pub referenced_files: BTreeMap<String, Vec<String>>,
    /// Templates never mentioned by any tracked document.
    pub orphaned_files: Vec<String>,
    /// Referenced paths with no file on disk.
    pub missing_files: Vec<String>,
    pub broken_links: Vec<BrokenLink>,
    pub inconsistencies: Vec<Inconsistency>,
    /// Hard errors encountered while still producing partial results.
    pub errors: Vec<String>,
    /// Whether doc-mismatch inconsistencies count as hard failures
    /// (copied from the configured consistency mode).
    #[serde(skip)]
    pub(crate) mismatches_are_hard: bool,
}

impl ValidationResult {
    /// True when validation passed with no critical issues.
    pub fn is_valid(&self) -> bool {
        self.orphaned_files.is_empty()
            && self.missing_files.is_empty()
            && self.broken_links.is_empty()
            && self.errors.is_empty()
            && (!self.mismatches_are_hard || self.doc_mismatches().count() == 0)
    }

    /// True when there are non-critical issues.
    pub fn has_warnings(&self) -> bool {
        if self.mismatches_are_hard {
            return false;
        }
        self.doc_mismatches().count() > 0
    }

    fn doc_mismatches(&self) -> impl Iterator<Item = &Inconsistency> {
        self.inconsistencies
            .iter()
            .filter(|i| i.kind == InconsistencyKind::DocMismatch)
    }

    /// Human-readable summary of the run.
    pub fn summary(&self) -> String {
        if self.is_valid() && !self.has_warnings() {
            return format!(
                "All checks passed! Found {} template files, all referenced correctly.",
                self.template_files.len()
            );
        }

        let mut summary = String::from("Validation summary:\n");
        summary.push_str(&format!(
            "  Template files found: {}\n",
            self.template_files.len()
        ));
        summary.push_str(&format!("  Orphaned files: {}\n", self.orphaned_files.len()));
        summary.push_str(&format!("  Missing files: {}\n", self.missing_files.len()));
        summary.push_str(&format!("  Broken links: {}\n", self.broken_links.len()));
        summary.push_str(&format!(
            "  Inconsistencies: {}\n",
            self.inconsistencies.len()
        ));
        summary.push_str(&format!("  Errors: {}\n", self.errors.len()));
        summary
    }
}
