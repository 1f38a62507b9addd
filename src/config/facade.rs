//! Config loader: assembles sources in precedence order and validates the result.

use super::merge::builder_with_defaults;
use super::sources::{global_file, workspace_file};
use super::BuilderConfig;
use crate::error::BuilderError;
use config::{Environment, File};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for an install root.
    ///
    /// Precedence (lowest to highest): defaults, global file,
    /// `config/builder.toml`, `config/builder.<BUILDER_ENV>.toml`, `BUILDER__*` env.
    pub fn load(install_root: &Path) -> Result<BuilderConfig, BuilderError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, install_root)?;
        let builder = builder.add_source(environment());

        let config: BuilderConfig = builder.build()?.try_deserialize()?;
        Self::validated(config)
    }

    /// Load a single explicit file on top of the defaults.
    pub fn load_from_file(path: &Path) -> Result<BuilderConfig, BuilderError> {
        if !path.is_file() {
            return Err(BuilderError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        debug!(config_path = %path.display(), "Loading explicit configuration file");
        let config: BuilderConfig = builder_with_defaults()?
            .add_source(File::from(path))
            .add_source(environment())
            .build()?
            .try_deserialize()?;
        Self::validated(config)
    }

    /// Path of the user-level configuration file, if a home can be determined.
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    fn validated(config: BuilderConfig) -> Result<BuilderConfig, BuilderError> {
        config.validate().map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            BuilderError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("BUILDER")
        .separator("__")
        .try_parsing(true)
}
