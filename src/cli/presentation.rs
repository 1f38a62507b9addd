//! CLI presentation: text and json formatters per command family.

mod lint;
mod list;
mod scaffold;

pub use lint::{
    format_check_failure, format_file_ok, format_lint_header, format_source_lint_header,
    format_template_details,
};
pub use list::{
    format_extension_list_json, format_extension_list_table, format_extension_list_text,
};
pub use scaffold::format_generation_report;
