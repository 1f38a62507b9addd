//! Integration tests for the list command

use fluid_builder::cli::ExitStatus;
use fluid_builder::extension::{ExtensionCatalog, FilesystemCatalog, StateFilter};
use serde_json::Value;

use crate::integration::Site;

fn site() -> Site {
    let site = Site::new();
    site.add_extension(
        "typo3conf/ext",
        "news",
        Some("title = \"News system\"\nversion = \"11.0.0\"\nstate = \"stable\"\nauthor = \"Georg\"\ndepends = [\"extbase\"]\n"),
    );
    site.add_extension("typo3/ext", "blog", Some("title = \"Blog\"\nversion = \"2.1.0\"\n"));
    site.add_extension("typo3conf/ext", "legacy", None);
    site.activate(&["news", "blog"]);
    site
}

fn json(out: &str) -> Value {
    serde_json::from_str(out).unwrap()
}

#[test]
fn test_json_active_lists_two_of_three() {
    let site = site();
    let (status, out) = site.run(&["list", "--json", "--active"]);
    assert_eq!(status, ExitStatus::Success);

    let value = json(&out);
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["key"], "blog");
    assert_eq!(rows[0]["type"], "Global");
    assert_eq!(rows[1]["key"], "news");
    assert!(rows.iter().all(|r| r["installed"] == true));
}

#[test]
fn test_state_filters() {
    let site = site();
    assert_eq!(site.run(&["list"]).1, "blog\nlegacy\nnews\n");
    assert_eq!(site.run(&["list", "--active"]).1, "blog\nnews\n");
    assert_eq!(site.run(&["list", "--inactive"]).1, "legacy\n");
    assert_eq!(site.run(&["list", "--active", "--inactive"]).1, "legacy\n");
}

#[test]
fn test_inactive_never_lists_installed() {
    let site = site();
    let catalog = FilesystemCatalog::new(site.root().to_path_buf(), Default::default());
    for info in catalog.list(StateFilter::InactiveOnly).unwrap() {
        assert!(!info.installed, "{} is installed", info.key);
    }
    for info in catalog.list(StateFilter::ActiveOnly).unwrap() {
        assert!(info.installed, "{} is not installed", info.key);
    }
    assert_eq!(catalog.list(StateFilter::All).unwrap().len(), 3);
}

#[test]
fn test_detail_json_carries_metadata() {
    let site = site();
    let (_, out) = site.run(&["list", "--json", "--detail"]);
    let value = json(&out);
    let news = value
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["key"] == "news")
        .unwrap();
    assert_eq!(news["title"], "News system");
    assert_eq!(news["version"], "11.0.0");
    assert_eq!(news["depends"][0], "extbase");
    assert_eq!(news["type"], "Local");
}

#[test]
fn test_detail_table() {
    let site = site();
    let (status, out) = site.run(&["list", "--detail"]);
    assert_eq!(status, ExitStatus::Success);
    assert!(out.contains("Version"));
    assert!(out.contains("News system"));
    assert!(out.contains("2.1.0"));
}

#[test]
fn test_empty_install_root() {
    let site = Site::new();
    assert_eq!(site.run(&["list"]), (ExitStatus::Success, String::new()));
    assert_eq!(site.run(&["list", "--json"]).1, "[]\n");
}
