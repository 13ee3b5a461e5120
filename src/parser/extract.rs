//! Reference extraction rules.
//!
//! Turns a single line of documentation into the set of template paths it
//! references. Four syntactic rules apply in strict precedence order: a
//! copy command, a backtick-quoted path, and a parenthetical `(from ...)`
//! annotation each fully explain a line and short-circuit; only when none
//! of them matches does the bare-substring fallback collect every
//! `templates/...` token on the line.

use once_cell::sync::Lazy;
use regex::Regex;

/// Outcome of applying one extraction rule to a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleMatch {
    /// The rule does not apply to this line.
    NoMatch,
    /// The rule explains the line with a single authoritative reference.
    Single(String),
    /// The fallback rule found one or more bare references.
    Multiple(Vec<String>),
}

/// Known non-template placeholder paths that documentation legitimately
/// mentions: an external-repo pointer, a user-fill-in placeholder, and a
/// library file that carries no template suffix.
const EXCLUSIONS: &[&str] = &[
    "templates/prd-template.md",
    "templates/{document-type}-template.md",
    "templates/scripts/lib/compact.sh",
];

/// Copy command naming a genesis-rooted template path.
/// Example: `cp genesis/templates/web-app/index-template.html index.html`
static COPY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"cp\s+\S*genesis/(templates/\S+)").unwrap());

/// Backtick-quoted template path.
/// Example: ``- [ ] `templates/web-app/index-template.html` ``
static BACKTICK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new("`(templates/[^`]+)`").unwrap());

/// Parenthetical source annotation.
/// Example: ``- [ ] `index.html` (from `web-app/index-template.html`)``
static FROM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(from\s+`([^)]+)`\)").unwrap());

/// Bare template path token, the low-confidence fallback.
/// Example: `See templates/CLAUDE.md.template for details`
static BARE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"templates/[a-zA-Z0-9/_.-]+").unwrap());

fn match_copy_command(line: &str) -> RuleMatch {
    match COPY_PATTERN.captures(line) {
        Some(caps) => RuleMatch::Single(caps[1].to_string()),
        None => RuleMatch::NoMatch,
    }
}

fn match_backtick(line: &str) -> RuleMatch {
    match BACKTICK_PATTERN.captures(line) {
        Some(caps) => RuleMatch::Single(caps[1].to_string()),
        None => RuleMatch::NoMatch,
    }
}

fn match_from_annotation(line: &str) -> RuleMatch {
    match FROM_PATTERN.captures(line) {
        Some(caps) => {
            let path = &caps[1];
            if path.starts_with("templates/") {
                RuleMatch::Single(path.to_string())
            } else {
                RuleMatch::Single(format!("templates/{path}"))
            }
        }
        None => RuleMatch::NoMatch,
    }
}

fn match_bare_paths(line: &str) -> RuleMatch {
    if !line.contains("templates/") {
        return RuleMatch::NoMatch;
    }
    let paths: Vec<String> = BARE_PATTERN
        .find_iter(line)
        .map(|m| m.as_str().to_string())
        .collect();
    if paths.is_empty() {
        RuleMatch::NoMatch
    } else {
        RuleMatch::Multiple(paths)
    }
}

/// Extract all template references from one line of documentation.
///
/// The first rule that matches wins; its captures are normalized (trimmed,
/// unquoted) and filtered against the exclusion list and per-line
/// duplicates. A line with no matching rule yields an empty vector, never
/// an error.
pub fn extract_references(line: &str) -> Vec<String> {
    let rules = [
        match_copy_command,
        match_backtick,
        match_from_annotation,
        match_bare_paths,
    ];

    for rule in rules {
        match rule(line) {
            RuleMatch::NoMatch => continue,
            RuleMatch::Single(path) => return normalize([path]),
            RuleMatch::Multiple(paths) => return normalize(paths),
        }
    }

    Vec::new()
}

/// Trim, unquote, and de-duplicate captured references, dropping entries
/// on the exclusion list.
fn normalize<I: IntoIterator<Item = String>>(candidates: I) -> Vec<String> {
    let mut refs = Vec::new();

    for candidate in candidates {
        let cleaned = candidate
            .trim()
            .trim_matches(|c| c == '`' || c == '"' || c == '\'');

        if cleaned.is_empty()
            || EXCLUSIONS.contains(&cleaned)
            || refs.iter().any(|r| r == cleaned)
        {
            continue;
        }

        refs.push(cleaned.to_string());
    }

    refs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_command() {
        let refs =
            extract_references("cp genesis/templates/web-app/index-template.html index.html");
        assert_eq!(refs, vec!["templates/web-app/index-template.html"]);
    }

    #[test]
    fn test_copy_command_with_leading_path() {
        let refs = extract_references("cp ./genesis/templates/scripts/deploy.sh.template out.sh");
        assert_eq!(refs, vec!["templates/scripts/deploy.sh.template"]);
    }

    #[test]
    fn test_backtick_reference() {
        let refs = extract_references("- [ ] `templates/web-app/index-template.html`");
        assert_eq!(refs, vec!["templates/web-app/index-template.html"]);
    }

    #[test]
    fn test_from_annotation() {
        let refs = extract_references("- [ ] `index.html` (from `web-app/index-template.html`)");
        assert_eq!(refs, vec!["templates/web-app/index-template.html"]);
    }

    #[test]
    fn test_from_annotation_keeps_existing_prefix() {
        let refs = extract_references("- [ ] `x` (from `templates/web-app/index-template.html`)");
        assert_eq!(refs, vec!["templates/web-app/index-template.html"]);
    }

    #[test]
    fn test_bare_reference() {
        let refs = extract_references("See templates/CLAUDE.md.template for details");
        assert_eq!(refs, vec!["templates/CLAUDE.md.template"]);
    }

    #[test]
    fn test_bare_reference_multiple() {
        let refs = extract_references(
            "See templates/web-app/index-template.html and templates/web-app/js/app-template.js",
        );
        assert_eq!(
            refs,
            vec![
                "templates/web-app/index-template.html",
                "templates/web-app/js/app-template.js"
            ]
        );
    }

    #[test]
    fn test_no_reference() {
        let refs = extract_references("This is a regular line with no templates");
        assert!(refs.is_empty());
    }

    #[test]
    fn test_copy_command_wins_over_bare_scan() {
        // The cp destination must not produce a second, spurious reference.
        let refs = extract_references(
            "cp genesis/templates/a-template.js templates/should-not-count.js",
        );
        assert_eq!(refs, vec!["templates/a-template.js"]);
    }

    #[test]
    fn test_backtick_wins_over_bare_scan() {
        let refs = extract_references(
            "`templates/a-template.js` sits next to templates/b-template.js",
        );
        assert_eq!(refs, vec!["templates/a-template.js"]);
    }

    #[test]
    fn test_exclusion_list() {
        assert!(extract_references("`templates/prd-template.md`").is_empty());
        assert!(extract_references("Create templates/{document-type}-template.md").is_empty());
        assert!(extract_references("uses templates/scripts/lib/compact.sh").is_empty());
    }

    #[test]
    fn test_excluded_match_does_not_fall_through() {
        // An excluded capture from a high-precedence rule still explains the
        // line; the bare scan must not fire afterwards.
        let refs = extract_references(
            "cp genesis/templates/prd-template.md somewhere, see templates/other-template.md",
        );
        assert!(refs.is_empty());
    }

    #[test]
    fn test_duplicates_within_line() {
        let refs = extract_references(
            "templates/a-template.js then templates/a-template.js again",
        );
        assert_eq!(refs, vec!["templates/a-template.js"]);
    }
}
