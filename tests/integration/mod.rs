//! Integration tests for the builder commands

mod config_loading;
mod list_cli;
mod scaffold_cli;
mod source_lint_cli;
mod template_lint_cli;

pub use test_utils::{run_with, with_xdg_env, Site, BROKEN_TEMPLATE, GOOD_TEMPLATE};
