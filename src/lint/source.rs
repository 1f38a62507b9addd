//! Source checking: the checker port and a `php -l` adapter.

use crate::config::LintConfig;
use crate::error::{BuilderError, CheckError};
use crate::files::{EnumeratorConfig, FileEnumerator, SuffixFilter};
use crate::lint::result::CheckResult;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// The checker binary could not be started.
pub const SPAWN_FAILURE_CODE: i64 = 127;
/// The checker was terminated without an exit code.
pub const NO_EXIT_CODE: i64 = -1;

pub trait SourceChecker: Send + Sync {
    /// Source files below `root` this checker handles, sorted.
    fn discover(&self, root: &Path) -> Result<Vec<PathBuf>, BuilderError>;

    fn check(&self, path: &Path) -> CheckResult;
}

/// Runs `<binary> -l <file>` per file.
pub struct PhpLintChecker {
    binary: String,
    suffixes: SuffixFilter,
    enumerator: FileEnumerator,
}

impl PhpLintChecker {
    pub fn new(binary: impl Into<String>, suffixes_csv: &str) -> Self {
        Self {
            binary: binary.into(),
            suffixes: SuffixFilter::from_csv(suffixes_csv),
            enumerator: FileEnumerator::new(),
        }
    }

    pub fn from_config(config: &LintConfig) -> Self {
        Self {
            binary: config.php_binary.clone(),
            suffixes: SuffixFilter::from_csv(&config.source_extensions),
            enumerator: FileEnumerator::with_config(EnumeratorConfig {
                ignore_patterns: config.ignore_patterns.clone(),
                ..EnumeratorConfig::default()
            }),
        }
    }
}

impl SourceChecker for PhpLintChecker {
    fn discover(&self, root: &Path) -> Result<Vec<PathBuf>, BuilderError> {
        Ok(self.enumerator.list_matching(root, &self.suffixes))
    }

    fn check(&self, path: &Path) -> CheckResult {
        let output = match Command::new(&self.binary).arg("-l").arg(path).output() {
            Ok(output) => output,
            Err(e) => {
                return CheckResult::failed(CheckError::new(
                    format!("Unable to run {}: {}", self.binary, e),
                    SPAWN_FAILURE_CODE,
                ))
            }
        };

        if output.status.success() {
            return CheckResult::ok();
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let code = output.status.code().map_or(NO_EXIT_CODE, i64::from);
        debug!(file = %path.display(), code, "Source check failed");

        CheckResult::failed(CheckError::new(
            failure_message(&stdout, &stderr),
            code,
        ))
    }
}

/// First line mentioning an error, else the first non-empty line.
fn failure_message(stdout: &str, stderr: &str) -> String {
    let lines: Vec<&str> = stdout
        .lines()
        .chain(stderr.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    lines
        .iter()
        .find(|line| line.to_lowercase().contains("error"))
        .or_else(|| lines.first())
        .map(|line| line.to_string())
        .unwrap_or_else(|| "Syntax check failed".to_string())
}
