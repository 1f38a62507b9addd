//! CLI output: error mapping and exit codes.

use crate::error::BuilderError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &BuilderError) -> String {
    e.to_string()
}

/// Process exit status of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// Checked files failed, or the command failed
    Failures,
    /// Required identifying input was missing
    Precondition,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failures => 1,
            ExitStatus::Precondition => 128,
        }
    }

    pub fn for_error(e: &BuilderError) -> Self {
        match e {
            BuilderError::InvalidArgument(_) => ExitStatus::Precondition,
            _ => ExitStatus::Failures,
        }
    }
}
