//! Command dispatch and the run context holding the install root, config and collaborators.

use crate::cli::help::command_name;
use crate::cli::output::{map_error, ExitStatus};
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_check_failure, format_extension_list_json, format_extension_list_table,
    format_extension_list_text, format_file_ok, format_generation_report, format_lint_header,
    format_source_lint_header, format_template_details,
};
use crate::config::{BuilderConfig, ConfigLoader};
use crate::error::BuilderError;
use crate::extension::{ExtensionCatalog, ExtensionKey, FilesystemCatalog, PathResolver, StateFilter};
use crate::files::{EnumeratorConfig, FileEnumerator, SuffixFilter};
use crate::lint::{
    CheckResult, FluidTemplateChecker, PhpLintChecker, RunSummary, SourceChecker, TemplateChecker,
};
use crate::scaffold::{
    Author, ExtensionGenerator, FeatureToggles, GenerateOptions, ProviderExtensionGenerator,
    ProviderExtensionRequest,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Header label when sweeping every active extension.
const SWEEP_LABEL: &str = "all active extensions";

/// Runtime context for CLI execution: install root, config and collaborators.
pub struct RunContext {
    install_root: PathBuf,
    config: BuilderConfig,
    catalog: Arc<dyn ExtensionCatalog>,
    resolver: PathResolver,
    enumerator: FileEnumerator,
    template_checker: Arc<dyn TemplateChecker>,
    source_checker: Arc<dyn SourceChecker>,
    generator: Arc<dyn ExtensionGenerator>,
}

impl RunContext {
    /// Load configuration for `install_root`, or from `config_path` when given.
    pub fn new(install_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, BuilderError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&install_root)?
        };
        Ok(Self::from_config(install_root, config))
    }

    /// Default collaborators: filesystem catalog, Fluid checker, `php -l`, file generator.
    pub fn from_config(install_root: PathBuf, config: BuilderConfig) -> Self {
        let catalog = Arc::new(FilesystemCatalog::new(
            install_root.clone(),
            config.catalog.clone(),
        ));
        let generator = Arc::new(ProviderExtensionGenerator::new(catalog.local_dir()));
        let source_checker = Arc::new(PhpLintChecker::from_config(&config.lint));
        Self::with_collaborators(
            install_root,
            config,
            catalog,
            Arc::new(FluidTemplateChecker::new()),
            source_checker,
            generator,
        )
    }

    pub fn with_collaborators(
        install_root: PathBuf,
        config: BuilderConfig,
        catalog: Arc<dyn ExtensionCatalog>,
        template_checker: Arc<dyn TemplateChecker>,
        source_checker: Arc<dyn SourceChecker>,
        generator: Arc<dyn ExtensionGenerator>,
    ) -> Self {
        let resolver = PathResolver::new(install_root.clone(), Arc::clone(&catalog));
        let enumerator = FileEnumerator::with_config(EnumeratorConfig {
            ignore_patterns: config.lint.ignore_patterns.clone(),
            ..EnumeratorConfig::default()
        });
        Self {
            install_root,
            config,
            catalog,
            resolver,
            enumerator,
            template_checker,
            source_checker,
            generator,
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Execute and turn a command error into its printed message and exit status.
    pub fn run(&self, command: &Commands, out: &mut dyn Write) -> ExitStatus {
        match self.execute(command, out) {
            Ok(status) => status,
            Err(e) => {
                warn!(command = command_name(command), error = %e, "Command failed");
                // Nothing else to report if stdout itself is gone.
                let _ = writeln!(out, "{}", map_error(&e));
                let _ = out.flush();
                ExitStatus::for_error(&e)
            }
        }
    }

    /// Dispatch one parsed command.
    pub fn execute(&self, command: &Commands, out: &mut dyn Write) -> Result<ExitStatus, BuilderError> {
        debug!(command = command_name(command), root = %self.install_root.display(), "Executing");
        match command {
            Commands::TemplateLint {
                extension,
                path,
                extensions,
                verbose,
                all,
                strict,
            } => {
                let suffixes = extensions
                    .clone()
                    .unwrap_or_else(|| self.config.lint.template_extensions.clone());
                self.template_lint(
                    extension.as_deref(),
                    path.as_deref(),
                    &suffixes,
                    *verbose,
                    *all,
                    *strict,
                    out,
                )
            }
            Commands::SourceLint {
                extension,
                path,
                verbose,
                strict,
            } => self.source_lint(extension.as_deref(), path.as_deref(), *verbose, *strict, out),
            Commands::List {
                detail,
                active,
                inactive,
                json,
            } => self.list(*detail, StateFilter::from_flags(*active, *inactive), *json, out),
            Commands::Scaffold {
                extension_key,
                author,
                title,
                description,
                use_companion_library,
                pages,
                content,
                controllers,
                dry_run,
                verbose,
            } => {
                let toggles = FeatureToggles {
                    use_companion_library: *use_companion_library,
                    pages: *pages,
                    content: *content,
                    controllers: *controllers,
                };
                self.scaffold(
                    extension_key,
                    author,
                    title.clone(),
                    description.clone(),
                    toggles,
                    *dry_run,
                    *verbose,
                    out,
                )
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn template_lint(
        &self,
        extension: Option<&str>,
        path: Option<&Path>,
        suffixes: &str,
        verbose: bool,
        all: bool,
        strict: bool,
        out: &mut dyn Write,
    ) -> Result<ExitStatus, BuilderError> {
        if extension.is_none() && path.is_none() && !all {
            return Err(BuilderError::missing_extension_or_path());
        }
        let key = extension.map(ExtensionKey::parse).transpose()?;
        let filter = SuffixFilter::from_csv(suffixes);
        if filter.is_empty() {
            return Err(BuilderError::InvalidInput(format!(
                "--extensions must name at least one suffix (got '{}')",
                suffixes
            )));
        }

        let (scanned, files) = match (&key, path) {
            (None, None) => {
                let mut files = Vec::new();
                for info in self.catalog.sweepable()? {
                    debug!(key = %info.key, "Sweeping extension");
                    files.extend(self.enumerator.list_matching(&info.root, &filter));
                }
                (SWEEP_LABEL.to_string(), files)
            }
            _ => {
                let root = self.resolver.resolve(key.as_ref(), path)?;
                let files = self.enumerator.list_matching(&root, &filter);
                (self.resolver.display_path(&root), files)
            }
        };

        writeln!(out, "{}", format_lint_header(suffixes, &scanned))?;
        out.flush()?;

        let mut summary = RunSummary::new(verbose, strict || self.config.lint.strict);
        for file in &files {
            let result = self.template_checker.check(file);
            let shown = self.resolver.display_path(file);
            if result.is_ok() && verbose {
                write!(out, "{}", format_template_details(&shown, &result))?;
            }
            self.report_file(&shown, &result, &mut summary, out)?;
        }
        self.finish(&summary, out)
    }

    fn source_lint(
        &self,
        extension: Option<&str>,
        path: Option<&Path>,
        verbose: bool,
        strict: bool,
        out: &mut dyn Write,
    ) -> Result<ExitStatus, BuilderError> {
        let key = extension.map(ExtensionKey::parse).transpose()?;
        let root = self.resolver.resolve(key.as_ref(), path)?;
        let files = self.source_checker.discover(&root)?;

        writeln!(out, "{}", format_source_lint_header(&self.resolver.display_path(&root)))?;
        out.flush()?;

        let mut summary = RunSummary::new(verbose, strict || self.config.lint.strict);
        for file in &files {
            let result = self.source_checker.check(file);
            let shown = self.resolver.display_path(file);
            if result.is_ok() && verbose {
                write!(out, "{}", format_file_ok(&shown))?;
            }
            self.report_file(&shown, &result, &mut summary, out)?;
        }
        self.finish(&summary, out)
    }

    fn report_file(
        &self,
        shown: &str,
        result: &CheckResult,
        summary: &mut RunSummary,
        out: &mut dyn Write,
    ) -> Result<(), BuilderError> {
        if let Some(error) = result.error() {
            debug!(file = shown, code = error.code, "Check failed");
            write!(out, "{}", format_check_failure(shown, error))?;
        }
        summary.record(result);
        out.flush()?;
        Ok(())
    }

    fn finish(&self, summary: &RunSummary, out: &mut dyn Write) -> Result<ExitStatus, BuilderError> {
        let verdict = summary.verdict();
        info!(
            files = summary.files(),
            had_errors = summary.had_errors(),
            failed = verdict.failed,
            "Lint finished"
        );
        if let Some(message) = verdict.message {
            writeln!(out, "{}", message)?;
        }
        out.flush()?;
        Ok(if verdict.failed {
            ExitStatus::Failures
        } else {
            ExitStatus::Success
        })
    }

    fn list(
        &self,
        detail: bool,
        filter: StateFilter,
        json: bool,
        out: &mut dyn Write,
    ) -> Result<ExitStatus, BuilderError> {
        let extensions = self.catalog.list(filter)?;
        debug!(count = extensions.len(), ?filter, "Listing extensions");
        let rendered = if json {
            format_extension_list_json(&extensions, detail)?
        } else if detail {
            format_extension_list_table(&extensions)
        } else {
            format_extension_list_text(&extensions)
        };
        if !rendered.is_empty() {
            writeln!(out, "{}", rendered)?;
        }
        out.flush()?;
        Ok(ExitStatus::Success)
    }

    #[allow(clippy::too_many_arguments)]
    fn scaffold(
        &self,
        extension_key: &str,
        author: &str,
        title: Option<String>,
        description: Option<String>,
        toggles: FeatureToggles,
        dry_run: bool,
        verbose: bool,
        out: &mut dyn Write,
    ) -> Result<ExitStatus, BuilderError> {
        let key = ExtensionKey::parse(extension_key)?;
        if self.catalog.contains(&key)? {
            return Err(BuilderError::AlreadyExists(key.name().to_string()));
        }
        let author = Author::parse(author)?;

        let request = ProviderExtensionRequest::new(key, author)
            .with_title(title)
            .with_description(description)
            .configure(toggles);
        let report = self
            .generator
            .generate(&request, GenerateOptions { dry_run })?;

        write!(
            out,
            "{}",
            format_generation_report(&report, &request.key.to_string(), verbose, &self.install_root)
        )?;
        out.flush()?;
        Ok(ExitStatus::Success)
    }
}
