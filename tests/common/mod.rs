//! Shared fixture helpers for integration tests.

use genesis_validator::ValidatorConfig;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Should create temp dir")
}

/// Write a file under `root`, creating parent directories as needed.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Should create parent dirs");
    }
    fs::write(&path, content).expect("Should write file");
}

/// Lay out a genesis repo with both canonical documents.
pub fn init_genesis_repo(root: &Path, entry_point: &str, checklist: &str) {
    write_file(root, "genesis/START-HERE.md", entry_point);
    write_file(root, "genesis/00-AI-MUST-READ-FIRST.md", checklist);
}

/// A config pointing both roots at the fixture directory.
pub fn config_for(root: &Path) -> ValidatorConfig {
    let mut config = ValidatorConfig::default();
    config.repo_root = root.to_path_buf();
    config.genesis_root = root.join("genesis");
    config
}
