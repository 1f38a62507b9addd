//! Extension catalog: queryable snapshot of installed extensions.
//!
//! The catalog is a port; `FilesystemCatalog` reads the conventional install
//! layout (one directory per extension below the system, global and local
//! extension directories) plus the package states file.

use crate::config::CatalogConfig;
use crate::error::BuilderError;
use crate::extension::info::{ExtensionInfo, ExtensionManifest, ExtensionType, StateFilter};
use crate::extension::key::ExtensionKey;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Read access to installed extensions.
pub trait ExtensionCatalog: Send + Sync {
    /// Extensions matching `filter`, sorted by key.
    fn list(&self, filter: StateFilter) -> Result<Vec<ExtensionInfo>, BuilderError>;

    /// Look up one extension by key name.
    fn get(&self, key: &ExtensionKey) -> Result<Option<ExtensionInfo>, BuilderError> {
        Ok(self
            .list(StateFilter::All)?
            .into_iter()
            .find(|info| info.key == key.name()))
    }

    fn contains(&self, key: &ExtensionKey) -> Result<bool, BuilderError> {
        Ok(self.get(key)?.is_some())
    }

    /// Root directory of an installed extension.
    fn resolve_root(&self, key: &ExtensionKey) -> Result<PathBuf, BuilderError> {
        self.get(key)?
            .map(|info| info.root)
            .ok_or_else(|| BuilderError::NotFound(key.name().to_string()))
    }

    /// Extensions included in whole-catalog sweeps: active and not `System`.
    fn sweepable(&self) -> Result<Vec<ExtensionInfo>, BuilderError> {
        Ok(self
            .list(StateFilter::ActiveOnly)?
            .into_iter()
            .filter(|info| info.extension_type != ExtensionType::System)
            .collect())
    }
}

/// Package states file: the keys of active extensions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageStates {
    #[serde(default)]
    pub active: Vec<String>,
}

impl PackageStates {
    pub fn load(path: &Path) -> Result<Self, BuilderError> {
        if !path.is_file() {
            debug!(path = %path.display(), "No package states file; nothing is active");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            BuilderError::ConfigError(format!(
                "Failed to parse package states {}: {}",
                path.display(),
                e
            ))
        })
    }
}

/// Catalog backed by the install root's directory layout.
pub struct FilesystemCatalog {
    install_root: PathBuf,
    config: CatalogConfig,
}

impl FilesystemCatalog {
    pub fn new(install_root: PathBuf, config: CatalogConfig) -> Self {
        Self {
            install_root,
            config,
        }
    }

    pub fn install_root(&self) -> &Path {
        &self.install_root
    }

    /// Directory scaffolded extensions are written to.
    pub fn local_dir(&self) -> PathBuf {
        self.install_root.join(&self.config.local_dir)
    }

    fn sources(&self) -> [(ExtensionType, PathBuf); 3] {
        [
            (
                ExtensionType::System,
                self.install_root.join(&self.config.system_dir),
            ),
            (
                ExtensionType::Global,
                self.install_root.join(&self.config.global_dir),
            ),
            (ExtensionType::Local, self.local_dir()),
        ]
    }

    /// Scan every source directory; later sources override earlier ones.
    fn snapshot(&self) -> Result<BTreeMap<String, ExtensionInfo>, BuilderError> {
        let states = PackageStates::load(&self.install_root.join(&self.config.package_states))?;
        let active: BTreeSet<String> = states.active.into_iter().collect();

        let mut extensions = BTreeMap::new();
        for (extension_type, dir) in self.sources() {
            for (key, root) in extension_dirs(&dir)? {
                let manifest = self.read_manifest(&root);
                let info = ExtensionInfo {
                    installed: active.contains(&key),
                    key: key.clone(),
                    extension_type,
                    root,
                    manifest,
                };
                if let Some(previous) = extensions.insert(key, info) {
                    debug!(
                        key = %previous.key,
                        overridden = %previous.extension_type,
                        "Extension overridden by a later source"
                    );
                }
            }
        }
        Ok(extensions)
    }

    fn read_manifest(&self, root: &Path) -> ExtensionManifest {
        let path = root.join(&self.config.manifest);
        if !path.is_file() {
            return ExtensionManifest::default();
        }
        let parsed = fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|content| toml::from_str(&content).map_err(|e| e.to_string()));
        match parsed {
            Ok(manifest) => manifest,
            Err(e) => {
                warn!(manifest = %path.display(), error = %e, "Ignoring unreadable manifest");
                ExtensionManifest::default()
            }
        }
    }
}

impl ExtensionCatalog for FilesystemCatalog {
    fn list(&self, filter: StateFilter) -> Result<Vec<ExtensionInfo>, BuilderError> {
        Ok(self
            .snapshot()?
            .into_values()
            .filter(|info| filter.accepts(info))
            .collect())
    }
}

/// Sub-directories of `dir` as (key, path), skipping hidden entries. Missing `dir` is empty.
fn extension_dirs(dir: &Path) -> Result<Vec<(String, PathBuf)>, BuilderError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut out = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }
        out.push((name, entry.path()));
    }
    out.sort();
    Ok(out)
}
