//! Lint presentation: header, per-file failure and detail blocks.

use crate::error::CheckError;
use crate::lint::CheckResult;

pub fn format_lint_header(suffixes: &str, scanned: &str) -> String {
    format!(
        "Performing a syntax check on fluid templates (types: {}; path: {})",
        suffixes, scanned
    )
}

pub fn format_source_lint_header(scanned: &str) -> String {
    format!("Performing a syntax check on source files (path: {})", scanned)
}

pub fn format_check_failure(file: &str, error: &CheckError) -> String {
    format!("[ERROR] File {} has an error:\n{}\n", file, error)
}

/// Verbose block for a template that passed.
pub fn format_template_details(file: &str, result: &CheckResult) -> String {
    let mut out = format!(
        "File is compilable: {}\n",
        if result.compilable() { "YES" } else { "NO (WARNING)" }
    );
    match result.layout_name() {
        Some(layout) => out.push_str(&format!("File has layout ({})\n", layout)),
        None => out.push_str("File DOES NOT reference a Layout\n"),
    }
    let count = result.namespaces().len();
    if count > 0 {
        out.push_str(&format!(
            "File has {} namespace(s): {}\n",
            count,
            result.namespaces_flattened()
        ));
    } else {
        out.push_str("File has 0 namespace(s)\n");
    }
    out.push_str(&format_file_ok(file));
    out
}

pub fn format_file_ok(file: &str) -> String {
    format!("[OK] File {} is valid.\n", file)
}
