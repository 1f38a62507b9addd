//! Extension metadata snapshots and listing filters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Where an extension is installed. Order is override precedence (later wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExtensionType {
    System,
    Global,
    Local,
}

impl fmt::Display for ExtensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExtensionType::System => "System",
            ExtensionType::Global => "Global",
            ExtensionType::Local => "Local",
        };
        f.write_str(s)
    }
}

/// Which extensions a listing includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateFilter {
    All,
    ActiveOnly,
    InactiveOnly,
}

impl StateFilter {
    /// `inactive` wins over `active`; neither flag means everything.
    pub fn from_flags(active: bool, inactive: bool) -> Self {
        if inactive {
            StateFilter::InactiveOnly
        } else if active {
            StateFilter::ActiveOnly
        } else {
            StateFilter::All
        }
    }

    pub fn accepts(&self, info: &ExtensionInfo) -> bool {
        match self {
            StateFilter::All => true,
            StateFilter::ActiveOnly => info.installed,
            StateFilter::InactiveOnly => !info.installed,
        }
    }
}

/// Contents of an extension's `ext_emconf.toml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionManifest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub author: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author_email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author_company: String,
    #[serde(default)]
    pub depends: Vec<String>,
}

/// Read-only snapshot of one installed extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionInfo {
    pub key: String,
    /// Active in the package states
    pub installed: bool,
    #[serde(rename = "type")]
    pub extension_type: ExtensionType,
    #[serde(skip)]
    pub root: PathBuf,
    #[serde(flatten)]
    pub manifest: ExtensionManifest,
}

impl ExtensionInfo {
    /// Title from the manifest, falling back to the key.
    pub fn display_title(&self) -> &str {
        if self.manifest.title.is_empty() {
            &self.key
        } else {
            &self.manifest.title
        }
    }
}
