//! Integration tests for the source-lint command

use fluid_builder::cli::ExitStatus;

use crate::integration::Site;

#[test]
fn test_missing_extension_and_path_exits_128() {
    let site = Site::new();
    let (status, out) = site.run(&["source-lint", "--verbose"]);
    assert_eq!(status, ExitStatus::Precondition);
    assert_eq!(out, "Either \"extension\" or \"path\" or both must be specified\n");
}

#[test]
fn test_missing_binary_is_a_per_file_failure() {
    let site = Site::new();
    site.write("Classes/Foo.php", "<?php\n");
    let mut config = fluid_builder::config::BuilderConfig::default();
    config.lint.php_binary = "/nonexistent/php".to_string();

    let (status, out) = crate::integration::run_with(
        &site.context_with(config),
        &["source-lint", "--path", "Classes", "--verbose"],
    );
    assert_eq!(status, ExitStatus::Failures);
    assert!(out.contains("[ERROR] File Classes/Foo.php has an error:\nUnable to run /nonexistent/php"));
}

#[cfg(unix)]
mod with_fake_php {
    use super::*;
    use crate::integration::run_with;
    use fluid_builder::config::BuilderConfig;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn config(site: &Site) -> BuilderConfig {
        let script = site.write(
            "bin/php",
            "#!/bin/sh\nif grep -q broken \"$2\"; then\n  echo \"PHP Parse error: syntax error in $2 on line 1\"\n  exit 255\nfi\necho \"No syntax errors detected in $2\"\n",
        );
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        let mut config = BuilderConfig::default();
        config.lint.php_binary = script.to_string_lossy().to_string();
        config
    }

    fn site() -> Site {
        let site = Site::new();
        site.add_local("news");
        site.write("typo3conf/ext/news/Classes/Domain/Model/News.php", "<?php class News {}\n");
        site.write("typo3conf/ext/news/Classes/Controller/NewsController.php", "<?php broken\n");
        site.write("typo3conf/ext/news/Resources/Private/Templates/List.html", "<f:if>");
        site
    }

    #[test]
    fn test_extension_scan_reports_broken_file() {
        let site = site();
        let ctx = site.context_with(config(&site));
        let (status, out) = run_with(&ctx, &["source-lint", "--extension", "news", "--verbose"]);

        assert_eq!(status, ExitStatus::Failures);
        assert_eq!(out.matches("[ERROR]").count(), 1);
        assert!(out.contains(
            "[ERROR] File typo3conf/ext/news/Classes/Controller/NewsController.php has an error:\nPHP Parse error"
        ));
        assert!(out.contains("(255)"));
        assert!(out.contains("[OK] File typo3conf/ext/news/Classes/Domain/Model/News.php is valid."));
        assert!(!out.contains("List.html"));
    }

    #[test]
    fn test_extension_with_relative_path_narrows_scan() {
        let site = site();
        let ctx = site.context_with(config(&site));
        let (status, out) = run_with(
            &ctx,
            &["source-lint", "--extension", "news", "--path", "Classes/Domain", "--verbose"],
        );
        assert_eq!(status, ExitStatus::Success);
        assert!(out.ends_with("No errors encountered - 1 file(s) are all okay\n"));
    }

    #[test]
    fn test_non_verbose_failure_exit_code() {
        let site = site();
        let ctx = site.context_with(config(&site));
        let (status, out) = run_with(&ctx, &["source-lint", "--extension", "news"]);
        assert_eq!(status, ExitStatus::Success);
        assert!(out.contains("[ERROR]"));

        let (status, _) = run_with(&ctx, &["source-lint", "--extension", "news", "--strict"]);
        assert_eq!(status, ExitStatus::Failures);
    }
}
