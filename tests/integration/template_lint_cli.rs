//! Integration tests for the template-lint command

use fluid_builder::cli::ExitStatus;
use fluid_builder::config::BuilderConfig;

use crate::integration::{run_with, Site, BROKEN_TEMPLATE, GOOD_TEMPLATE};

fn site_with_templates() -> Site {
    let site = Site::new();
    site.add_local("news");
    site.write(
        "typo3conf/ext/news/Resources/Private/Templates/Good.html",
        GOOD_TEMPLATE,
    );
    site.write(
        "typo3conf/ext/news/Resources/Private/Templates/Broken.html",
        BROKEN_TEMPLATE,
    );
    site.write("typo3conf/ext/news/Resources/Public/app.js", "<f:if>");
    site.activate(&["news"]);
    site
}

#[test]
fn test_missing_extension_and_path_exits_128() {
    let site = site_with_templates();
    let (status, out) = site.run(&["template-lint", "--verbose"]);
    assert_eq!(status.code(), 128);
    assert_eq!(out, "Either \"extension\" or \"path\" or both must be specified\n");
}

#[test]
fn test_verbose_run_reports_error_and_ok() {
    let site = site_with_templates();
    let (status, out) = site.run(&["template-lint", "--extension", "news", "--verbose"]);

    assert_eq!(status, ExitStatus::Failures);
    assert!(out.starts_with(
        "Performing a syntax check on fluid templates (types: html,xml,txt; path: typo3conf/ext/news)\n"
    ));
    assert_eq!(out.matches("[ERROR]").count(), 1);
    assert_eq!(out.matches("[OK]").count(), 1);
    assert!(out.contains(
        "[ERROR] File typo3conf/ext/news/Resources/Private/Templates/Broken.html has an error:\n"
    ));
    assert!(out.contains("(1224485838)"));
    assert!(out.contains("File is compilable: YES\nFile has layout (Default)\n"));
    assert!(out.contains("[OK] File typo3conf/ext/news/Resources/Private/Templates/Good.html is valid."));
    assert!(out.ends_with("Errors were detected - review the summary above\n"));
}

#[test]
fn test_non_verbose_failures_exit_zero_unless_strict() {
    let site = site_with_templates();

    let (status, out) = site.run(&["template-lint", "--extension", "news"]);
    assert_eq!(status, ExitStatus::Success);
    assert!(out.contains("[ERROR]"));
    assert!(!out.contains("[OK]"));
    assert!(!out.contains("Errors were detected"));

    let (status, out) = site.run(&["template-lint", "--extension", "news", "--strict"]);
    assert_eq!(status, ExitStatus::Failures);
    assert!(out.ends_with("Errors were detected - review the summary above\n"));

    let mut config = BuilderConfig::default();
    config.lint.strict = true;
    let (status, _) = run_with(&site.context_with(config), &["template-lint", "--extension", "news"]);
    assert_eq!(status, ExitStatus::Failures);
}

#[test]
fn test_path_relative_to_install_root_and_suffix_override() {
    let site = Site::new();
    site.write("fileadmin/templates/Page.HTML", GOOD_TEMPLATE);
    site.write("fileadmin/templates/feed.xml", BROKEN_TEMPLATE);

    let (status, out) = site.run(&[
        "template-lint",
        "--path",
        "fileadmin/templates",
        "--extensions",
        "html",
        "--verbose",
    ]);
    assert_eq!(status, ExitStatus::Success);
    assert!(out.contains("(types: html; path: fileadmin/templates)"));
    assert!(out.ends_with("No errors encountered - 1 file(s) are all okay\n"));
}

#[test]
fn test_extension_with_relative_path_and_single_file() {
    let site = site_with_templates();
    let (status, out) = site.run(&[
        "template-lint",
        "--extension",
        "news",
        "--path",
        "Resources/Private/Templates/Good.html",
        "--verbose",
    ]);
    assert_eq!(status, ExitStatus::Success);
    assert!(out.ends_with("No errors encountered - 1 file(s) are all okay\n"));
}

#[test]
fn test_all_sweeps_active_non_system_extensions() {
    let site = Site::new();
    for (source, key) in [
        ("typo3/sysext", "core"),
        ("typo3/ext", "global_news"),
        ("typo3conf/ext", "site"),
        ("typo3conf/ext", "disabled"),
    ] {
        site.add_extension(source, key, None);
        site.write(&format!("{}/{}/Templates/Broken.html", source, key), BROKEN_TEMPLATE);
    }
    site.activate(&["core", "global_news", "site"]);

    let (status, out) = site.run(&["template-lint", "--all", "--verbose"]);
    assert_eq!(status, ExitStatus::Failures);
    assert!(out.contains("path: all active extensions"));
    assert_eq!(out.matches("[ERROR]").count(), 2);
    assert!(out.contains("typo3/ext/global_news/Templates/Broken.html"));
    assert!(out.contains("typo3conf/ext/site/Templates/Broken.html"));
    assert!(!out.contains("core/"));
    assert!(!out.contains("disabled/"));
}

#[test]
fn test_unknown_extension_fails() {
    let site = Site::new();
    let (status, out) = site.run(&["template-lint", "--extension", "ghost"]);
    assert_eq!(status, ExitStatus::Failures);
    assert_eq!(out, "Extension not found: ghost\n");
}

#[test]
fn test_missing_path_processes_no_files() {
    let site = Site::new();
    let (status, out) = site.run(&["template-lint", "--path", "nowhere", "--verbose"]);
    assert_eq!(status, ExitStatus::Success);
    assert!(out.ends_with("No errors encountered - 0 file(s) are all okay\n"));
}

#[test]
fn test_absolute_path_with_extension_is_rejected() {
    let site = site_with_templates();
    let outside = site.write("outside/x.html", BROKEN_TEMPLATE);
    let outside_dir = outside.parent().unwrap().to_string_lossy().to_string();

    let (status, out) = site.run(&[
        "template-lint",
        "--extension",
        "news",
        "--path",
        &outside_dir,
        "--verbose",
    ]);
    assert_eq!(status, ExitStatus::Failures);
    assert!(out.starts_with("Path '"), "{}", out);
    assert!(out.contains("must be relative to extension 'news'"));
    assert!(!out.contains("[ERROR] File"));
}

#[test]
fn test_empty_suffix_list_is_rejected() {
    let site = site_with_templates();
    for suffixes in ["", " , "] {
        let (status, out) = site.run(&[
            "template-lint",
            "--extension",
            "news",
            "--extensions",
            suffixes,
            "--verbose",
        ]);
        assert_eq!(status, ExitStatus::Failures);
        assert!(out.starts_with("--extensions must name at least one suffix"), "{}", out);
        assert!(!out.contains("file(s) are all okay"));
    }
}
