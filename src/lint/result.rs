//! Per-file check outcome.

use crate::error::CheckError;

/// One declared namespace alias, e.g. `v=FluidTYPO3\Vhs\ViewHelpers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceAlias {
    pub alias: String,
    pub namespace: String,
}

/// Outcome of checking one file. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    error: Option<CheckError>,
    compilable: bool,
    layout_name: Option<String>,
    namespaces: Vec<NamespaceAlias>,
}

impl CheckResult {
    /// A clean result with no template details (source checks).
    pub fn ok() -> Self {
        Self {
            error: None,
            compilable: true,
            layout_name: None,
            namespaces: Vec::new(),
        }
    }

    pub fn failed(error: CheckError) -> Self {
        Self {
            error: Some(error),
            compilable: false,
            layout_name: None,
            namespaces: Vec::new(),
        }
    }

    /// A clean template result.
    pub fn template(
        compilable: bool,
        layout_name: Option<String>,
        namespaces: Vec<NamespaceAlias>,
    ) -> Self {
        Self {
            error: None,
            compilable,
            layout_name,
            namespaces,
        }
    }

    pub fn error(&self) -> Option<&CheckError> {
        self.error.as_ref()
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn compilable(&self) -> bool {
        self.compilable
    }

    pub fn layout_name(&self) -> Option<&str> {
        self.layout_name.as_deref()
    }

    pub fn namespaces(&self) -> &[NamespaceAlias] {
        &self.namespaces
    }

    /// `alias=namespace` pairs joined with `, `, in declaration order.
    pub fn namespaces_flattened(&self) -> String {
        self.namespaces
            .iter()
            .map(|ns| format!("{}={}", ns.alias, ns.namespace))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
