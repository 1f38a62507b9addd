//! Integration tests for the scaffold command

use fluid_builder::cli::ExitStatus;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::integration::Site;

const AUTHOR: &str = "Jane Doe <jane@example.com>, Acme Ltd";

fn tree(root: &Path) -> BTreeSet<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
        .collect()
}

/// Paths named in verbose scaffold output, with the verb stripped.
fn reported_paths(out: &str) -> Vec<String> {
    out.lines()
        .filter_map(|line| {
            ["Would create directory ", "Would write file ", "Created directory ", "Wrote file "]
                .iter()
                .find_map(|verb| line.strip_prefix(verb))
                .map(String::from)
        })
        .collect()
}

#[test]
fn test_dry_run_reports_what_a_real_run_writes() {
    let site = Site::new();
    let before = tree(site.root());

    let (status, dry_out) = site.run(&["scaffold", "Acme.site", "--author", AUTHOR, "--dry-run"]);
    assert_eq!(status, ExitStatus::Success);
    assert_eq!(tree(site.root()), before, "dry run must not touch the filesystem");
    assert!(dry_out.contains("nothing was written"));

    let (status, real_out) = site.run(&["scaffold", "Acme.site", "--author", AUTHOR]);
    assert_eq!(status, ExitStatus::Success);

    let dry_paths = reported_paths(&dry_out);
    assert!(!dry_paths.is_empty());
    assert_eq!(dry_paths, reported_paths(&real_out));
    for path in &dry_paths {
        assert!(site.root().join(path).exists(), "{} was not created", path);
    }
}

#[test]
fn test_existing_extension_is_rejected_without_writes() {
    let site = Site::new();
    site.add_extension("typo3/ext", "site", None);
    let before = tree(site.root());

    for extra in [Some("--dry-run"), None] {
        let mut args = vec!["scaffold", "Acme.site", "--author", AUTHOR];
        args.extend(extra);
        let (status, out) = site.run(&args);
        assert_eq!(status, ExitStatus::Failures);
        assert_eq!(out, "Extension already exists: site\n");
        assert_eq!(tree(site.root()), before);
    }
}

#[test]
fn test_scaffolded_extension_lints_clean_and_is_listed() {
    let site = Site::new();
    let (status, _) = site.run(&["scaffold", "Acme.site", "--author", AUTHOR, "--verbose", "false"]);
    assert_eq!(status, ExitStatus::Success);

    let (status, out) = site.run(&["template-lint", "--extension", "site", "--verbose"]);
    assert_eq!(status, ExitStatus::Success, "{}", out);
    assert!(!out.contains("NO (WARNING)"));
    assert!(out.contains("File has layout (Page)"));
    assert!(out.ends_with("No errors encountered - 6 file(s) are all okay\n"));

    let (_, json) = site.run(&["list", "--json", "--detail"]);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let site_info = &value.as_array().unwrap()[0];
    assert_eq!(site_info["key"], "site");
    assert_eq!(site_info["title"], "Provider extension for pages, content, controllers");
    assert_eq!(site_info["author_company"], "Acme Ltd");
    assert_eq!(site_info["installed"], false);
}

#[test]
fn test_toggles_shape_the_tree() {
    let site = Site::new();
    let (status, out) = site.run(&[
        "scaffold",
        "Acme.site",
        "--author",
        "Jane Doe",
        "--title",
        "Acme pages",
        "--content",
        "false",
        "--controllers",
        "false",
        "--use-companion-library",
        "false",
    ]);
    assert_eq!(status, ExitStatus::Success);
    assert!(out.ends_with("Provider extension Acme.site written to typo3conf/ext/site (10 file(s))\n"));

    let ext = site.root().join("typo3conf/ext/site");
    assert!(ext.join("Resources/Private/Templates/Page/Standard.html").is_file());
    assert!(!ext.join("Resources/Private/Templates/Content").exists());
    assert!(!ext.join("Classes").exists());

    let manifest = std::fs::read_to_string(ext.join("ext_emconf.toml")).unwrap();
    assert!(manifest.contains("title = \"Acme pages\""));
    assert!(!manifest.contains("vhs"));
}

#[test]
fn test_invalid_key_is_rejected() {
    let site = Site::new();
    let (status, out) = site.run(&["scaffold", "Acme.my-site", "--author", "Jane"]);
    assert_eq!(status, ExitStatus::Failures);
    assert!(out.starts_with("Invalid extension key 'Acme.my-site'"));
    assert!(!site.root().join("typo3conf").exists());
}

#[test]
fn test_malformed_author_exits_1() {
    let site = Site::new();
    let (status, out) = site.run(&["scaffold", "Acme.site", "--author", "Jane <jane@example.com"]);
    assert_eq!(status, ExitStatus::Failures);
    assert!(out.starts_with("Invalid author"));
    assert!(!site.root().join("typo3conf").exists());
}
