//! Command line surface: argument parsing, dispatch and text rendering.
//! Checking, cataloguing and generation live in their own modules.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::{map_error, ExitStatus};
pub use parse::{Cli, Commands};
pub use presentation::{
    format_check_failure, format_extension_list_json, format_extension_list_table,
    format_extension_list_text, format_file_ok, format_generation_report, format_lint_header,
    format_source_lint_header, format_template_details,
};
pub use route::RunContext;
