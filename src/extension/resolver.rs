//! Path resolution from an extension key and/or a relative path.

use crate::error::BuilderError;
use crate::extension::catalog::ExtensionCatalog;
use crate::extension::key::ExtensionKey;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

pub struct PathResolver {
    install_root: PathBuf,
    catalog: Arc<dyn ExtensionCatalog>,
}

impl PathResolver {
    pub fn new(install_root: PathBuf, catalog: Arc<dyn ExtensionCatalog>) -> Self {
        Self {
            install_root,
            catalog,
        }
    }

    pub fn install_root(&self) -> &Path {
        &self.install_root
    }

    /// Resolve to an absolute path.
    ///
    /// With a key the path is relative to the extension root and must stay
    /// inside it; without one it is relative to the install root. Both absent
    /// is `InvalidArgument`.
    pub fn resolve(
        &self,
        key: Option<&ExtensionKey>,
        path: Option<&Path>,
    ) -> Result<PathBuf, BuilderError> {
        match (key, path) {
            (None, None) => Err(BuilderError::missing_extension_or_path()),
            (Some(key), path) => {
                let root = self.catalog.resolve_root(key)?;
                match path {
                    Some(p) if !stays_inside(p) => Err(BuilderError::InvalidInput(format!(
                        "Path '{}' must be relative to extension '{}'",
                        p.display(),
                        key.name()
                    ))),
                    Some(p) => Ok(root.join(p)),
                    None => Ok(root),
                }
            }
            (None, Some(p)) if p.is_absolute() => Ok(p.to_path_buf()),
            (None, Some(p)) => Ok(self.install_root.join(p)),
        }
    }

    /// `path` relative to the install root for display; unchanged when outside it.
    pub fn display_path(&self, path: &Path) -> String {
        match path.strip_prefix(&self.install_root) {
            Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
            Ok(rel) => rel.display().to_string(),
            Err(_) => path.display().to_string(),
        }
    }
}

/// Only plain segments, so joining cannot leave the base directory.
fn stays_inside(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
