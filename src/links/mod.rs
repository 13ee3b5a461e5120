//! Markdown link validation.
//!
//! Sweeps every markdown file under the repository root, extracts
//! `[text](url)` links outside code, and verifies that intra-repository
//! targets exist on disk. External URLs cannot be verified offline and are
//! skipped, except GitHub blob/tree URLs for the configured repository,
//! which are resolved as local paths.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::ValidatorConfig;

#[derive(Error, Debug)]
pub enum LinkError {
    #[error("Walk error: {0}")]
    WalkError(#[from] walkdir::Error),
}

/// A markdown link whose target does not exist.
///
/// One instance per offending occurrence; links are not de-duplicated by
/// target.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokenLink {
    /// The markdown file containing the link.
    pub source_file: String,
    /// 1-based line number where the link appears.
    pub line: usize,
    /// The display text of the link.
    pub link_text: String,
    /// The URL/path that is broken.
    pub link_url: String,
    /// Which resolution rule failed.
    pub reason: String,
}

/// An extracted link occurrence, before classification.
#[derive(Debug, Clone)]
struct LinkInfo {
    text: String,
    url: String,
    line: usize,
}

/// Markdown link: `[text](url)`.
static LINK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]+)\)").unwrap());

/// Fenced code block delimiter (three-or-more backticks or tildes).
static FENCE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(`{3,}|~{3,})").unwrap());

/// Inline code span, stripped before link extraction.
static INLINE_CODE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new("`[^`]+`").unwrap());

/// Validates intra-repository markdown links.
pub struct LinkChecker {
    config: ValidatorConfig,
}

impl LinkChecker {
    pub fn new(config: &ValidatorConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Scan all markdown files under the repository root and validate
    /// their internal links.
    ///
    /// Individual unreadable files are skipped; only a traversal failure
    /// is fatal.
    pub fn check_all(&self) -> Result<Vec<BrokenLink>, LinkError> {
        let mut broken = Vec::new();

        for md_file in self.find_markdown_files()? {
            let links = match self.extract_links(&md_file) {
                Ok(links) => links,
                Err(_) => continue,
            };

            for link in links {
                if let Some(broken_link) = self.validate_link(&md_file, &link) {
                    broken.push(broken_link);
                }
            }
        }

        Ok(broken)
    }

    /// Find all `.md` files under the repository root, skipping excluded
    /// directory subtrees. Sorted by file name for deterministic reports.
    fn find_markdown_files(&self) -> Result<Vec<PathBuf>, LinkError> {
        let config = self.config.clone();
        let walker = WalkDir::new(&self.config.repo_root)
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

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "md")
            {
                files.push(entry.path().to_path_buf());
            }
        }

        Ok(files)
    }

    /// Extract all links from a markdown file, skipping fenced code blocks
    /// and inline code spans.
    fn extract_links(&self, path: &Path) -> Result<Vec<LinkInfo>, std::io::Error> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut links = Vec::new();
        let mut in_code_block = false;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_num = index + 1;

            if FENCE_PATTERN.is_match(&line) {
                in_code_block = !in_code_block;
                continue;
            }
            if in_code_block {
                continue;
            }

            // Inline code can contain link-shaped literals.
            let stripped = INLINE_CODE_PATTERN.replace_all(&line, "");

            for caps in LINK_PATTERN.captures_iter(&stripped) {
                links.push(LinkInfo {
                    text: caps[1].to_string(),
                    url: caps[2].to_string(),
                    line: line_num,
                });
            }
        }

        Ok(links)
    }

    /// Classify and verify a single link, returning the failure if broken.
    fn validate_link(&self, source_file: &Path, link: &LinkInfo) -> Option<BrokenLink> {
        let url = link.url.as_str();

        if url.starts_with("http://") || url.starts_with("https://") {
            // GitHub URLs for this repository are local-path proxies; any
            // other external URL cannot be verified offline.
            if let Some(repo) = &self.config.github_repo {
                let blob = format!("github.com/{repo}/blob/main/");
                let tree = format!("github.com/{repo}/tree/main/");
                if url.contains(&blob) || url.contains(&tree) {
                    return self.validate_github_link(source_file, link, &blob, &tree);
                }
            }
            return None;
        }

        if url.starts_with("mailto:") || url.starts_with('#') || url.starts_with("javascript:") {
            return None;
        }

        self.validate_relative_path(source_file, link)
    }

    /// Verify a GitHub blob/tree URL by resolving the embedded path locally.
    fn validate_github_link(
        &self,
        source_file: &Path,
        link: &LinkInfo,
        blob_prefix: &str,
        tree_prefix: &str,
    ) -> Option<BrokenLink> {
        let url = link.url.as_str();
        let local_path = url
            .split_once(blob_prefix)
            .or_else(|| url.split_once(tree_prefix))
            .map(|(_, rest)| rest)?;

        // Strip anchor and trailing stray punctuation.
        let local_path = local_path.split('#').next().unwrap_or("");
        let local_path = local_path.trim_end_matches(['"', '>']);
        if local_path.is_empty() {
            return None;
        }

        if self.config.repo_root.join(local_path).exists() {
            return None;
        }

        Some(BrokenLink {
            source_file: source_file.display().to_string(),
            line: link.line,
            link_text: link.text.clone(),
            link_url: link.url.clone(),
            reason: format!("GitHub URL points to non-existent path: {local_path}"),
        })
    }

    /// Verify a relative path against the source file's directory, then
    /// against the repository root.
    fn validate_relative_path(&self, source_file: &Path, link: &LinkInfo) -> Option<BrokenLink> {
        let path = link.url.split('#').next().unwrap_or("");

        // Anchor-only after stripping.
        if path.is_empty() {
            return None;
        }

        let source_dir = source_file.parent().unwrap_or_else(|| Path::new("."));
        if source_dir.join(path).exists() {
            return None;
        }
        if self.config.repo_root.join(path).exists() {
            return None;
        }

        Some(BrokenLink {
            source_file: source_file.display().to_string(),
            line: link.line,
            link_text: link.text.clone(),
            link_url: link.url.clone(),
            reason: format!("Relative path not found: {path}"),
        })
    }
}
