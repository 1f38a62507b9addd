//! Extension key parsing: `name` or `Vendor.name`.

use crate::error::BuilderError;
use std::fmt;
use std::str::FromStr;

/// Vendor segment that maps to a two-level namespace.
const CORE_VENDOR: &str = "TYPO3";
const CORE_NAMESPACE: &str = "TYPO3\\CMS";

/// A parsed extension identifier.
///
/// The name is always lower case and non-empty; a vendor, when present, is
/// non-empty and keeps its original case because it becomes a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExtensionKey {
    Vendored { vendor: String, name: String },
    Unvendored(String),
}

impl ExtensionKey {
    pub fn parse(input: &str) -> Result<Self, BuilderError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(BuilderError::InvalidInput(
                "Extension key cannot be empty".to_string(),
            ));
        }

        match input.split_once('.') {
            Some((vendor, name)) => {
                if vendor.is_empty() || name.is_empty() {
                    return Err(BuilderError::InvalidInput(format!(
                        "Invalid extension key '{}': vendor and name must both be non-empty",
                        input
                    )));
                }
                if !vendor.chars().all(|c| c.is_ascii_alphanumeric()) {
                    return Err(BuilderError::InvalidInput(format!(
                        "Invalid vendor '{}' in extension key '{}'",
                        vendor, input
                    )));
                }
                Ok(ExtensionKey::Vendored {
                    vendor: vendor.to_string(),
                    name: normalize_name(name, input)?,
                })
            }
            None => Ok(ExtensionKey::Unvendored(normalize_name(input, input)?)),
        }
    }

    /// Lower-case extension name, also the directory name.
    pub fn name(&self) -> &str {
        match self {
            ExtensionKey::Vendored { name, .. } | ExtensionKey::Unvendored(name) => name,
        }
    }

    pub fn vendor(&self) -> Option<&str> {
        match self {
            ExtensionKey::Vendored { vendor, .. } => Some(vendor),
            ExtensionKey::Unvendored(_) => None,
        }
    }

    /// PHP namespace prefix, e.g. `FluidTYPO3\MyProvider` or `TYPO3\CMS\Fluid`.
    pub fn namespace_prefix(&self) -> String {
        let ext = upper_camel_case(self.name());
        match self.vendor() {
            Some(CORE_VENDOR) => format!("{}\\{}", CORE_NAMESPACE, ext),
            Some(vendor) => format!("{}\\{}", vendor, ext),
            None => ext,
        }
    }

    /// Composer package name, e.g. `fluidtypo3/my-provider`.
    pub fn composer_name(&self) -> String {
        let package = self.name().replace('_', "-");
        match self.vendor() {
            Some(vendor) => format!("{}/{}", vendor.to_lowercase(), package),
            None => format!("typo3-ter/{}", package),
        }
    }
}

impl FromStr for ExtensionKey {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExtensionKey::parse(s)
    }
}

impl fmt::Display for ExtensionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtensionKey::Vendored { vendor, name } => write!(f, "{}.{}", vendor, name),
            ExtensionKey::Unvendored(name) => write!(f, "{}", name),
        }
    }
}

fn normalize_name(name: &str, input: &str) -> Result<String, BuilderError> {
    let name = name.to_lowercase();
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(BuilderError::InvalidInput(format!(
            "Invalid extension key '{}': only letters, digits and '_' are allowed in the name",
            input
        )));
    }
    Ok(name)
}

/// `my_provider` -> `MyProvider`
pub fn upper_camel_case(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}
