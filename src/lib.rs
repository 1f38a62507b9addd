//! Fluid Builder: command-line tooling for CMS extensions
//!
//! Lints Fluid templates and PHP sources, lists installed extensions and
//! scaffolds provider extensions. Checkers and the generator sit behind
//! traits and are injected into the command router.

pub mod cli;
pub mod config;
pub mod error;
pub mod extension;
pub mod files;
pub mod lint;
pub mod logging;
pub mod scaffold;
