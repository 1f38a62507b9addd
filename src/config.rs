//! Configuration System
//!
//! Layered configuration for the builder: built-in defaults, a user-level file,
//! install-root files and `BUILDER__*` environment overrides. CLI flags are
//! applied on top by the binary.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Where extensions live below the install root
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Lint command settings
    #[serde(default)]
    pub lint: LintConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Extension catalog layout, relative to the install root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Extensions shipped with the core (type `System`)
    #[serde(default = "default_system_dir")]
    pub system_dir: PathBuf,

    /// Globally installed extensions (type `Global`)
    #[serde(default = "default_global_dir")]
    pub global_dir: PathBuf,

    /// Locally installed extensions (type `Local`); scaffold writes here
    #[serde(default = "default_local_dir")]
    pub local_dir: PathBuf,

    /// TOML file listing the active extension keys
    #[serde(default = "default_package_states")]
    pub package_states: PathBuf,

    /// Manifest file name inside each extension directory
    #[serde(default = "default_manifest")]
    pub manifest: String,
}

fn default_system_dir() -> PathBuf {
    PathBuf::from("typo3/sysext")
}

fn default_global_dir() -> PathBuf {
    PathBuf::from("typo3/ext")
}

fn default_local_dir() -> PathBuf {
    PathBuf::from("typo3conf/ext")
}

fn default_package_states() -> PathBuf {
    PathBuf::from("typo3conf/PackageStates.toml")
}

fn default_manifest() -> String {
    "ext_emconf.toml".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            system_dir: default_system_dir(),
            global_dir: default_global_dir(),
            local_dir: default_local_dir(),
            package_states: default_package_states(),
            manifest: default_manifest(),
        }
    }
}

/// Lint settings shared by template-lint and source-lint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintConfig {
    /// CSV of template file suffixes used when `--extensions` is not given
    #[serde(default = "default_template_extensions")]
    pub template_extensions: String,

    /// CSV of source file suffixes handed to the source checker
    #[serde(default = "default_source_extensions")]
    pub source_extensions: String,

    /// Binary used by the source checker (`<php_binary> -l <file>`)
    #[serde(default = "default_php_binary")]
    pub php_binary: String,

    /// Exit 1 on failures even when not verbose
    #[serde(default)]
    pub strict: bool,

    /// Directory names skipped during enumeration
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,
}

fn default_template_extensions() -> String {
    "html,xml,txt".to_string()
}

fn default_source_extensions() -> String {
    "php".to_string()
}

fn default_php_binary() -> String {
    "php".to_string()
}

fn default_ignore_patterns() -> Vec<String> {
    vec![".git".to_string(), "node_modules".to_string()]
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            template_extensions: default_template_extensions(),
            source_extensions: default_source_extensions(),
            php_binary: default_php_binary(),
            strict: false,
            ignore_patterns: default_ignore_patterns(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Catalog(String),
    Lint(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Catalog(msg) => write!(f, "Catalog: {}", msg),
            ValidationError::Lint(msg) => write!(f, "Lint: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl BuilderConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let dirs = [
            ("system_dir", &self.catalog.system_dir),
            ("global_dir", &self.catalog.global_dir),
            ("local_dir", &self.catalog.local_dir),
            ("package_states", &self.catalog.package_states),
        ];
        for (name, dir) in dirs {
            if dir.as_os_str().is_empty() {
                errors.push(ValidationError::Catalog(format!("{} cannot be empty", name)));
            }
        }
        if self.catalog.manifest.trim().is_empty() {
            errors.push(ValidationError::Catalog(
                "manifest cannot be empty".to_string(),
            ));
        }

        if self
            .lint
            .template_extensions
            .split(',')
            .all(|s| s.trim().is_empty())
        {
            errors.push(ValidationError::Lint(
                "template_extensions must name at least one suffix".to_string(),
            ));
        }
        if self.lint.php_binary.trim().is_empty() {
            errors.push(ValidationError::Lint(
                "php_binary cannot be empty".to_string(),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
