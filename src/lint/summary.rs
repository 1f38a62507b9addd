//! End-of-run verdict for the lint commands.

use crate::lint::result::CheckResult;

pub const ALL_OK_PREFIX: &str = "No errors encountered";
pub const ERRORS_DETECTED: &str = "Errors were detected - review the summary above";

/// Closing message and whether the run counts as failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub message: Option<String>,
    pub failed: bool,
}

/// Running tally of checked files.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    files: usize,
    had_errors: bool,
    verbose: bool,
    strict: bool,
}

impl RunSummary {
    pub fn new(verbose: bool, strict: bool) -> Self {
        Self {
            verbose,
            strict,
            ..Self::default()
        }
    }

    pub fn record(&mut self, result: &CheckResult) {
        self.files += 1;
        self.had_errors |= !result.is_ok();
    }

    pub fn files(&self) -> usize {
        self.files
    }

    pub fn had_errors(&self) -> bool {
        self.had_errors
    }

    pub fn verdict(&self) -> Verdict {
        summarize(self.files, self.had_errors, self.verbose, self.strict)
    }
}

/// Without `verbose` the run stays silent and succeeds unless `strict` is set.
pub fn summarize(files: usize, had_errors: bool, verbose: bool, strict: bool) -> Verdict {
    match (had_errors, verbose) {
        (false, true) => Verdict {
            message: Some(format!(
                "{} - {} file(s) are all okay",
                ALL_OK_PREFIX, files
            )),
            failed: false,
        },
        (false, false) => Verdict {
            message: None,
            failed: false,
        },
        (true, true) => Verdict {
            message: Some(ERRORS_DETECTED.to_string()),
            failed: true,
        },
        (true, false) => Verdict {
            message: strict.then(|| ERRORS_DETECTED.to_string()),
            failed: strict,
        },
    }
}
