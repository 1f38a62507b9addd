//! Extension domain: keys, catalog snapshots and path resolution.

pub mod catalog;
pub mod info;
pub mod key;
pub mod resolver;

pub use catalog::{ExtensionCatalog, FilesystemCatalog, PackageStates};
pub use info::{ExtensionInfo, ExtensionManifest, ExtensionType, StateFilter};
pub use key::ExtensionKey;
pub use resolver::PathResolver;
