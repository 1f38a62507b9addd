//! Integration tests for layered configuration through RunContext::new

use fluid_builder::cli::{ExitStatus, RunContext};
use fluid_builder::error::BuilderError;
use std::fs;
use tempfile::TempDir;

use crate::integration::{run_with, with_xdg_env, Site, BROKEN_TEMPLATE};

#[test]
fn test_install_root_file_overrides_user_file() {
    let test_dir = TempDir::new().unwrap();
    let site = Site::new();
    site.write("config/builder.toml", "[lint]\ntemplate_extensions = \"html\"\n");

    with_xdg_env(&test_dir, || {
        let user_dir = test_dir.path().join("config").join("builder");
        fs::create_dir_all(&user_dir).unwrap();
        fs::write(
            user_dir.join("config.toml"),
            "[lint]\ntemplate_extensions = \"xml\"\nphp_binary = \"php8.2\"\n",
        )
        .unwrap();

        let ctx = RunContext::new(site.root().to_path_buf(), None).unwrap();
        assert_eq!(ctx.config().lint.template_extensions, "html");
        assert_eq!(ctx.config().lint.php_binary, "php8.2");
    });
}

#[test]
fn test_custom_catalog_layout() {
    let test_dir = TempDir::new().unwrap();
    let site = Site::new();
    site.write(
        "config/builder.toml",
        "[catalog]\nlocal_dir = \"packages\"\npackage_states = \"states.toml\"\n",
    );
    site.add_extension("packages", "news", None);
    site.write("states.toml", "active = [\"news\"]\n");

    with_xdg_env(&test_dir, || {
        let ctx = RunContext::new(site.root().to_path_buf(), None).unwrap();
        let (status, out) = run_with(&ctx, &["list", "--active"]);
        assert_eq!(status, ExitStatus::Success);
        assert_eq!(out, "news\n");
    });
}

#[test]
fn test_strict_from_environment() {
    let test_dir = TempDir::new().unwrap();
    let site = Site::new();
    site.write("fileadmin/Broken.html", BROKEN_TEMPLATE);

    with_xdg_env(&test_dir, || {
        std::env::set_var("BUILDER__LINT__STRICT", "true");
        let ctx = RunContext::new(site.root().to_path_buf(), None);
        std::env::remove_var("BUILDER__LINT__STRICT");

        let ctx = ctx.unwrap();
        assert!(ctx.config().lint.strict);
        let (status, _) = run_with(&ctx, &["template-lint", "--path", "fileadmin"]);
        assert_eq!(status, ExitStatus::Failures);
    });
}

#[test]
fn test_explicit_config_file() {
    let site = Site::new();
    let file = site.write("custom.toml", "[lint]\nsource_extensions = \"php,inc\"\n");

    let ctx = RunContext::new(site.root().to_path_buf(), Some(file)).unwrap();
    assert_eq!(ctx.config().lint.source_extensions, "php,inc");

    let missing = RunContext::new(site.root().to_path_buf(), Some(site.root().join("nope.toml")));
    assert!(matches!(missing, Err(BuilderError::ConfigError(_))));
}

#[test]
fn test_invalid_config_is_rejected() {
    let test_dir = TempDir::new().unwrap();
    let site = Site::new();
    site.write("config/builder.toml", "[lint]\ntemplate_extensions = \"\"\n");

    with_xdg_env(&test_dir, || {
        let result = RunContext::new(site.root().to_path_buf(), None);
        match result {
            Err(BuilderError::ConfigError(msg)) => assert!(msg.contains("template_extensions")),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("empty template_extensions should be rejected"),
        }
    });
}
