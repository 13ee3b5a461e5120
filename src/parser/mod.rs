//! Documentation reference collection.

mod extract;

pub use extract::{extract_references, RuleMatch};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

use crate::config::ValidatorConfig;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read document {path}: {source}")]
    DocumentUnreadable {
        path: String,
        source: std::io::Error,
    },
}

/// Parses documentation files to extract template references.
pub struct Parser {
    config: ValidatorConfig,
}

impl Parser {
    pub fn new(config: &ValidatorConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Extract all template references from one document.
    ///
    /// References keep first-occurrence order; later duplicates within the
    /// same document are suppressed.
    pub fn parse_references(&self, doc_file: &Path) -> Result<Vec<String>, ParseError> {
        let file = File::open(doc_file).map_err(|source| ParseError::DocumentUnreadable {
            path: doc_file.display().to_string(),
            source,
        })?;

        let mut references = Vec::new();
        let reader = BufReader::new(file);

        for (index, line) in reader.lines().enumerate() {
            // Line numbers are 1-based, kept for diagnostics.
            let _line_num = index + 1;
            let line = line.map_err(|source| ParseError::DocumentUnreadable {
                path: doc_file.display().to_string(),
                source,
            })?;

            for reference in extract_references(&line) {
                if !references.contains(&reference) {
                    references.push(reference);
                }
            }
        }

        Ok(references)
    }

    /// Parse both canonical documents, in fixed order.
    ///
    /// Returns `(document file name, references)` pairs, one per document,
    /// entry point first. Each document's reference list is independent so
    /// the consistency check can compare them.
    pub fn parse_all_docs(&self) -> Result<Vec<(String, Vec<String>)>, ParseError> {
        let mut result = Vec::new();

        for doc in [self.config.entry_point_file(), self.config.checklist_file()] {
            let name = doc
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| doc.display().to_string());
            let refs = self.parse_references(&doc)?;
            result.push((name, refs));
        }

        Ok(result)
    }
}
