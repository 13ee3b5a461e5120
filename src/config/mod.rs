use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// How mismatches between the entry-point and checklist documents are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsistencyMode {
    /// Do not compare the two documents' reference sets.
    #[default]
    Off,
    /// Record mismatches as soft inconsistencies.
    Warn,
    /// Record mismatches and treat them as a hard failure.
    Fail,
}

fn default_genesis_root() -> PathBuf {
    PathBuf::from("genesis")
}

fn default_repo_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_exclude_dirs() -> Vec<String> {
    vec![
        ".git".to_string(),
        "node_modules".to_string(),
        "_archive".to_string(),
        "coverage".to_string(),
    ]
}

fn default_github_repo() -> Option<String> {
    Some("bordenet/genesis".to_string())
}

fn default_true() -> bool {
    true
}

/// Validator configuration
///
/// Passed immutably into each component constructor; there is no shared
/// mutable configuration state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorConfig {
    /// Repository root under which markup files are swept for links.
    #[serde(default = "default_repo_root")]
    pub repo_root: PathBuf,
    /// Root of the template repository subtree (default `genesis`).
    #[serde(default = "default_genesis_root")]
    pub genesis_root: PathBuf,
    /// Directory names skipped entirely during traversal.
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,
    /// GitHub `owner/repo` slug whose blob/tree URLs are checked as local
    /// paths. `None` treats such URLs as ordinary external links.
    #[serde(default = "default_github_repo")]
    pub github_repo: Option<String>,
    /// How entry-point vs. checklist reference mismatches are treated.
    #[serde(default)]
    pub consistency: ConsistencyMode,
    #[serde(default)]
    pub verbose: bool,
    /// Generate a remediation prompt when the result is not clean.
    #[serde(default = "default_true")]
    pub generate_prompt: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            repo_root: default_repo_root(),
            genesis_root: default_genesis_root(),
            exclude_dirs: default_exclude_dirs(),
            github_repo: default_github_repo(),
            consistency: ConsistencyMode::default(),
            verbose: false,
            generate_prompt: true,
        }
    }
}

impl ValidatorConfig {
    /// Templates directory under the genesis root.
    pub fn templates_dir(&self) -> PathBuf {
        self.genesis_root.join("templates")
    }

    /// The primary entry-point document.
    pub fn entry_point_file(&self) -> PathBuf {
        self.genesis_root.join("START-HERE.md")
    }

    /// The secondary checklist document.
    pub fn checklist_file(&self) -> PathBuf {
        self.genesis_root.join("00-AI-MUST-READ-FIRST.md")
    }

    /// Returns true when `name` is one of the excluded directory names.
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude_dirs.iter().any(|d| d == name)
    }
}

/// Read a configuration file, returning `None` when it does not exist.
pub fn read_config(path: &Path) -> Result<Option<ValidatorConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    let config: ValidatorConfig = serde_json::from_str(&content)?;
    Ok(Some(config))
}
