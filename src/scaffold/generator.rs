//! Extension generation: the generator port and a filesystem implementation.

use crate::error::BuilderError;
use crate::scaffold::plan::{build_plan, FilePlan};
use crate::scaffold::request::ProviderExtensionRequest;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Report operations without writing
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOperation {
    CreateDirectory(PathBuf),
    WriteFile(PathBuf),
}

impl FileOperation {
    pub fn path(&self) -> &Path {
        match self {
            FileOperation::CreateDirectory(p) | FileOperation::WriteFile(p) => p,
        }
    }
}

impl fmt::Display for FileOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOperation::CreateDirectory(p) => write!(f, "Create directory {}", p.display()),
            FileOperation::WriteFile(p) => write!(f, "Write file {}", p.display()),
        }
    }
}

/// Ordered operations of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub root: PathBuf,
    pub operations: Vec<FileOperation>,
    pub dry_run: bool,
}

impl GenerationReport {
    pub fn written_files(&self) -> impl Iterator<Item = &Path> {
        self.operations.iter().filter_map(|op| match op {
            FileOperation::WriteFile(p) => Some(p.as_path()),
            FileOperation::CreateDirectory(_) => None,
        })
    }
}

pub trait ExtensionGenerator: Send + Sync {
    fn generate(
        &self,
        request: &ProviderExtensionRequest,
        options: GenerateOptions,
    ) -> Result<GenerationReport, BuilderError>;
}

/// Writes provider extensions below an extensions directory.
pub struct ProviderExtensionGenerator {
    extensions_dir: PathBuf,
}

impl ProviderExtensionGenerator {
    pub fn new(extensions_dir: PathBuf) -> Self {
        Self { extensions_dir }
    }

    pub fn target_dir(&self, request: &ProviderExtensionRequest) -> PathBuf {
        self.extensions_dir.join(request.key.name())
    }
}

impl ExtensionGenerator for ProviderExtensionGenerator {
    fn generate(
        &self,
        request: &ProviderExtensionRequest,
        options: GenerateOptions,
    ) -> Result<GenerationReport, BuilderError> {
        let root = self.target_dir(request);
        if root.exists() {
            return Err(BuilderError::AlreadyExists(request.key.name().to_string()));
        }

        let plan = build_plan(request)?;

        let mut operations = vec![FileOperation::CreateDirectory(root.clone())];
        operations.extend(
            plan.directories()
                .into_iter()
                .map(|dir| FileOperation::CreateDirectory(root.join(dir))),
        );
        operations.extend(
            plan.files()
                .iter()
                .map(|file| FileOperation::WriteFile(root.join(&file.path))),
        );

        if options.dry_run {
            debug!(root = %root.display(), operations = operations.len(), "Dry run; nothing written");
        } else {
            write_plan(&root, &plan)?;
            info!(
                key = %request.key,
                root = %root.display(),
                files = plan.files().len(),
                "Provider extension generated"
            );
        }

        Ok(GenerationReport {
            root,
            operations,
            dry_run: options.dry_run,
        })
    }
}

/// Write `plan` below a `root` that does not exist yet. On failure the
/// partial tree is removed so a retry does not hit `AlreadyExists`.
fn write_plan(root: &Path, plan: &FilePlan) -> Result<(), BuilderError> {
    let written = fs::create_dir_all(root)
        .and_then(|_| {
            plan.directories()
                .iter()
                .try_for_each(|dir| fs::create_dir_all(root.join(dir)))
        })
        .and_then(|_| {
            plan.files()
                .iter()
                .try_for_each(|file| fs::write(root.join(&file.path), &file.contents))
        });

    if let Err(e) = written {
        if let Err(cleanup) = fs::remove_dir_all(root) {
            warn!(root = %root.display(), error = %cleanup, "Could not remove partial extension");
        }
        return Err(e.into());
    }
    Ok(())
}
