//! Scaffold presentation: file operations and the closing line.

use crate::scaffold::{FileOperation, GenerationReport};
use std::path::Path;

pub fn format_generation_report(
    report: &GenerationReport,
    key: &str,
    verbose: bool,
    install_root: &Path,
) -> String {
    let relative = |p: &Path| -> String {
        p.strip_prefix(install_root)
            .unwrap_or(p)
            .display()
            .to_string()
    };

    let mut out = String::new();
    if verbose {
        for op in &report.operations {
            let verb = match (op, report.dry_run) {
                (FileOperation::CreateDirectory(_), true) => "Would create directory",
                (FileOperation::CreateDirectory(_), false) => "Created directory",
                (FileOperation::WriteFile(_), true) => "Would write file",
                (FileOperation::WriteFile(_), false) => "Wrote file",
            };
            out.push_str(&format!("{} {}\n", verb, relative(op.path())));
        }
    }

    let files = report.written_files().count();
    if report.dry_run {
        out.push_str(&format!(
            "Dry run: provider extension {} would be written to {} ({} file(s)); nothing was written\n",
            key,
            relative(&report.root),
            files
        ));
    } else {
        out.push_str(&format!(
            "Provider extension {} written to {} ({} file(s))\n",
            key,
            relative(&report.root),
            files
        ));
    }
    out
}
