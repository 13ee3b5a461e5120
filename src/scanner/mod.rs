//! Template file discovery.
//!
//! Walks the templates directory and collects every file matching the
//! template naming convention, as paths relative to the genesis root.

use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::ValidatorConfig;

#[derive(Error, Debug)]
pub enum ScanError {
    /// The templates directory does not exist. Recoverable: the caller
    /// continues with link checking only.
    #[error("Templates directory not found: {0}")]
    RootNotFound(String),

    #[error("Walk error: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Path {0} is not under the genesis root")]
    OutsideRoot(String),
}

/// Scans the templates directory for template files.
pub struct Scanner {
    config: ValidatorConfig,
}

impl Scanner {
    pub fn new(config: &ValidatorConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Find all template files under the templates directory.
    ///
    /// Returned paths are relative to the genesis root (e.g.
    /// `templates/web-app/index-template.html`). Excluded directory names
    /// are skipped with their entire subtree. Entries are sorted by file
    /// name so repeated runs over an unchanged tree yield identical output.
    pub fn scan_templates(&self) -> Result<Vec<String>, ScanError> {
        let templates_dir = self.config.templates_dir();
        if !templates_dir.exists() {
            return Err(ScanError::RootNotFound(
                templates_dir.display().to_string(),
            ));
        }

        let mut templates = Vec::new();
        let config = self.config.clone();

        let walker = WalkDir::new(&templates_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| {
                if entry.file_type().is_dir() {
                    let name = entry.file_name().to_string_lossy();
                    !config.is_excluded_dir(&name)
                } else {
                    true
                }
            });

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if !is_template_file(&name) {
                continue;
            }

            let rel = entry
                .path()
                .strip_prefix(&self.config.genesis_root)
                .map_err(|_| ScanError::OutsideRoot(entry.path().display().to_string()))?;
            templates.push(rel.to_string_lossy().into_owned());
        }

        Ok(templates)
    }
}

/// Check if a filename matches the template naming convention.
///
/// A name qualifies when it contains `-template` anywhere (e.g.
/// `index-template.html`) or ends with `.template` (e.g.
/// `deploy-web.sh.template`). This is a naming check only, not a content
/// check.
pub fn is_template_file(filename: &str) -> bool {
    filename.contains("-template") || filename.ends_with(".template")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_template_file() {
        assert!(is_template_file("index-template.html"));
        assert!(is_template_file("deploy-web.sh.template"));
        assert!(is_template_file("app-template.js"));
        assert!(!is_template_file("README.md"));
        assert!(!is_template_file("app.js"));
        assert!(!is_template_file("implementation.md"));
    }

    #[test]
    fn test_scan_missing_root() {
        let mut config = ValidatorConfig::default();
        config.genesis_root = "/nonexistent/genesis".into();
        let scanner = Scanner::new(&config);

        let err = scanner.scan_templates().expect_err("Should fail");
        assert!(matches!(err, ScanError::RootNotFound(_)));
    }
}
