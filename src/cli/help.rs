//! CLI help and command-name contract for logging.

use crate::cli::parse::Commands;

/// Command name as typed on the command line (e.g. "template-lint").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::TemplateLint { .. } => "template-lint",
        Commands::SourceLint { .. } => "source-lint",
        Commands::List { .. } => "list",
        Commands::Scaffold { .. } => "scaffold",
    }
}
