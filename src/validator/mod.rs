//! Reconciliation of templates, references, and links.

mod consistency;
mod result;

pub use consistency::{checker_for_mode, DocConsistencyChecker, PairwiseChecker};
pub use result::{Inconsistency, InconsistencyKind, ValidationResult};

use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{ConsistencyMode, ValidatorConfig};
use crate::links::LinkChecker;
use crate::parser::{ParseError, Parser};
use crate::scanner::{ScanError, Scanner};

#[derive(Error, Debug)]
pub enum ValidateError {
    #[error("Failed to scan templates: {0}")]
    ScanFailed(#[from] ScanError),

    #[error("Failed to parse documentation: {0}")]
    ParseFailed(#[from] ParseError),
}

/// Orchestrates the full consistency check.
pub struct Validator {
    config: ValidatorConfig,
    scanner: Scanner,
    parser: Parser,
    link_checker: LinkChecker,
    consistency: Option<Box<dyn DocConsistencyChecker>>,
}

impl Validator {
    pub fn new(config: &ValidatorConfig) -> Self {
        Self {
            config: config.clone(),
            scanner: Scanner::new(config),
            parser: Parser::new(config),
            link_checker: LinkChecker::new(config),
            consistency: checker_for_mode(config.consistency),
        }
    }

    /// Run the full validation and reconcile the findings.
    ///
    /// Only unrecoverable setup failures surface as an error; everything
    /// found on a completed run lives in the returned result.
    pub fn validate(&self) -> Result<ValidationResult, ValidateError> {
        let mut result = ValidationResult {
            mismatches_are_hard: self.config.consistency == ConsistencyMode::Fail,
            ..Default::default()
        };

        // An absent templates directory means "no templates to check";
        // the link sweep still runs.
        let templates = match self.scanner.scan_templates() {
            Ok(templates) => templates,
            Err(ScanError::RootNotFound(path)) => {
                info!("Templates directory {path} not found, skipping template validation");
                Vec::new()
            }
            Err(err) => return Err(err.into()),
        };
        debug!("Found {} template files", templates.len());
        result.template_files = templates;

        let docs = self.parser.parse_all_docs()?;

        for (doc, refs) in &docs {
            for reference in refs {
                result
                    .referenced_files
                    .entry(reference.clone())
                    .or_default()
                    .push(doc.clone());
            }
        }
        debug!(
            "Found {} unique references across documentation",
            result.referenced_files.len()
        );

        // orphaned = templates \ referenced
        for template in &result.template_files {
            if !result.referenced_files.contains_key(template) {
                result.orphaned_files.push(template.clone());
                result.inconsistencies.push(Inconsistency {
                    kind: InconsistencyKind::OrphanedFile,
                    file: template.clone(),
                    description:
                        "Template file exists but is not referenced in any documentation"
                            .to_string(),
                    location: None,
                });
            }
        }

        // missing = referenced \ templates
        let template_set: BTreeSet<&String> = result.template_files.iter().collect();
        for (reference, referencing_docs) in &result.referenced_files {
            if !template_set.contains(reference) {
                result.missing_files.push(reference.clone());
                result.inconsistencies.push(Inconsistency {
                    kind: InconsistencyKind::MissingFile,
                    file: reference.clone(),
                    description: "Referenced in documentation but file does not exist"
                        .to_string(),
                    location: Some(format!("Referenced in: {}", referencing_docs.join(", "))),
                });
            }
        }

        if let Some(checker) = &self.consistency {
            let mismatches = checker.check(&docs);
            debug!("Found {} doc mismatches", mismatches.len());
            result.inconsistencies.extend(mismatches);
        }

        match self.link_checker.check_all() {
            Ok(broken_links) => {
                debug!("Found {} broken links", broken_links.len());
                for link in &broken_links {
                    result.inconsistencies.push(Inconsistency {
                        kind: InconsistencyKind::BrokenLink,
                        file: link.source_file.clone(),
                        description: link.reason.clone(),
                        location: Some(format!("{}:{}", link.source_file, link.line)),
                    });
                }
                result.broken_links = broken_links;
            }
            Err(err) => {
                result.errors.push(format!("Failed to validate links: {err}"));
            }
        }

        Ok(result)
    }
}
