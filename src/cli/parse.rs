//! CLI parse: clap types for the builder. No behavior; definitions only.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Builder CLI - lint, list and scaffold CMS extensions
#[derive(Parser, Debug)]
#[command(name = "builder")]
#[command(about = "Lint templates and sources, list extensions and scaffold provider extensions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Install root directory
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable logging
    #[arg(long)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Syntax check Fluid template files
    TemplateLint {
        /// Extension key; the path is then relative to the extension
        #[arg(long)]
        extension: Option<String>,
        /// File or folder to check
        #[arg(long)]
        path: Option<PathBuf>,
        /// CSV of file suffixes considered templates (default from config: html,xml,txt)
        #[arg(long)]
        extensions: Option<String>,
        /// Report details for every valid file
        #[arg(long)]
        verbose: bool,
        /// With no extension or path, check every active non-system extension
        #[arg(long)]
        all: bool,
        /// Exit 1 on errors even without --verbose
        #[arg(long)]
        strict: bool,
    },
    /// Syntax check PHP source files
    SourceLint {
        /// Extension key; the path is then relative to the extension
        #[arg(long)]
        extension: Option<String>,
        /// File or folder to check
        #[arg(long)]
        path: Option<PathBuf>,
        /// Report every valid file
        #[arg(long)]
        verbose: bool,
        /// Exit 1 on errors even without --verbose
        #[arg(long)]
        strict: bool,
    },
    /// List installed extensions
    List {
        /// Show version, state, type and author
        #[arg(long)]
        detail: bool,
        /// Only active extensions
        #[arg(long)]
        active: bool,
        /// Only inactive extensions (wins over --active)
        #[arg(long)]
        inactive: bool,
        /// Emit a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Generate a provider extension
    Scaffold {
        /// Key of the extension to create, e.g. Vendor.my_provider. Must not exist.
        extension_key: String,
        /// "Name <email>, Company"; email and company are optional
        #[arg(long)]
        author: String,
        /// Title (default: "Provider extension for <features>")
        #[arg(long)]
        title: Option<String>,
        /// Description (default: same as the title)
        #[arg(long)]
        description: Option<String>,
        /// Depend on the VHS ViewHelper library
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        use_companion_library: bool,
        /// Generate page templates
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        pages: bool,
        /// Generate content templates
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        content: bool,
        /// Generate a controller per enabled feature
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        controllers: bool,
        /// Report the files without writing them
        #[arg(long)]
        dry_run: bool,
        /// List every file operation
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        verbose: bool,
    },
}
