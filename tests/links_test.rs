mod common;

use common::{config_for, create_test_dir, init_genesis_repo, write_file};
use genesis_validator::{InconsistencyKind, Validator};

#[test]
fn test_broken_relative_link_is_reported_with_location() {
    let dir = create_test_dir();
    let root = dir.path();
    init_genesis_repo(root, "# Start\n", "# Checklist\n");
    write_file(root, "docs/guide.md", "# Guide\n\n[text](./nope.md)\n");

    let result = Validator::new(&config_for(root))
        .validate()
        .expect("Should validate");

    assert_eq!(result.broken_links.len(), 1);
    let broken = &result.broken_links[0];
    assert_eq!(broken.link_url, "./nope.md");
    assert_eq!(broken.line, 3);
    assert!(broken.reason.contains("Relative path not found"));
    assert!(!result.is_valid());

    let inconsistency = result
        .inconsistencies
        .iter()
        .find(|i| i.kind == InconsistencyKind::BrokenLink)
        .expect("Should fold broken link into inconsistencies");
    assert!(inconsistency
        .location
        .as_deref()
        .expect("Should carry file:line location")
        .ends_with(":3"));
}

#[test]
fn test_working_links_keep_result_clean() {
    let dir = create_test_dir();
    let root = dir.path();
    init_genesis_repo(root, "# Start\n\n[guide](../docs/guide.md)\n", "# Checklist\n");
    write_file(root, "docs/guide.md", "# Guide\n\n[back](../genesis/START-HERE.md)\n");

    let result = Validator::new(&config_for(root))
        .validate()
        .expect("Should validate");

    assert!(result.broken_links.is_empty());
    assert!(result.is_valid());
}

#[test]
fn test_fenced_code_links_are_not_validated() {
    let dir = create_test_dir();
    let root = dir.path();
    init_genesis_repo(root, "# Start\n", "# Checklist\n");
    write_file(
        root,
        "docs/examples.md",
        "# Examples\n\n```markdown\n[broken](./does-not-exist.md)\n```\n",
    );

    let result = Validator::new(&config_for(root))
        .validate()
        .expect("Should validate");

    assert!(result.broken_links.is_empty());
    assert!(result.is_valid());
}

#[test]
fn test_repo_hosted_github_link_is_resolved_locally() {
    let dir = create_test_dir();
    let root = dir.path();
    init_genesis_repo(
        root,
        "# Start\n\n[gone](https://github.com/bordenet/genesis/blob/main/missing/file.md)\n",
        "# Checklist\n",
    );

    let result = Validator::new(&config_for(root))
        .validate()
        .expect("Should validate");

    assert_eq!(result.broken_links.len(), 1);
    assert!(result.broken_links[0]
        .reason
        .contains("GitHub URL points to non-existent path: missing/file.md"));
}

#[test]
fn test_github_check_disabled_without_repo_slug() {
    let dir = create_test_dir();
    let root = dir.path();
    init_genesis_repo(
        root,
        "# Start\n\n[gone](https://github.com/bordenet/genesis/blob/main/missing/file.md)\n",
        "# Checklist\n",
    );

    let mut config = config_for(root);
    config.github_repo = None;

    let result = Validator::new(&config).validate().expect("Should validate");

    assert!(result.broken_links.is_empty());
    assert!(result.is_valid());
}
