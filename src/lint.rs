//! Lint checkers and run summaries for template-lint and source-lint.

pub mod result;
pub mod source;
pub mod summary;
pub mod template;

pub use result::{CheckResult, NamespaceAlias};
pub use source::{PhpLintChecker, SourceChecker};
pub use summary::{summarize, RunSummary, Verdict};
pub use template::{FluidTemplateChecker, TemplateChecker};
