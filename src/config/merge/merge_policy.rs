//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
/// Later sources replace scalar keys; lists are replaced whole, never appended.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("catalog.system_dir", "typo3/sysext")?
        .set_default("catalog.global_dir", "typo3/ext")?
        .set_default("catalog.local_dir", "typo3conf/ext")?
        .set_default("catalog.package_states", "typo3conf/PackageStates.toml")?
        .set_default("catalog.manifest", "ext_emconf.toml")?
        .set_default("lint.template_extensions", "html,xml,txt")?
        .set_default("lint.source_extensions", "php")?
        .set_default("lint.php_binary", "php")?
        .set_default("lint.strict", false)
}
