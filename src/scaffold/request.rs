//! What to scaffold: the key, the author and the enabled features.

use crate::extension::ExtensionKey;
use crate::scaffold::author::Author;

const DEFAULT_TITLE: &str = "Provider extension";

/// Feature toggles for a provider extension. All default to enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureToggles {
    /// Depend on the VHS ViewHelper library and declare its `v` namespace
    pub use_companion_library: bool,
    pub pages: bool,
    pub content: bool,
    /// Emit a controller for each enabled feature
    pub controllers: bool,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self {
            use_companion_library: true,
            pages: true,
            content: true,
            controllers: true,
        }
    }
}

impl FeatureToggles {
    /// Enabled features among pages, content and controllers, in that order.
    pub fn enabled_features(&self) -> Vec<&'static str> {
        [
            (self.pages, "pages"),
            (self.content, "content"),
            (self.controllers, "controllers"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect()
    }

    pub fn page_controller(&self) -> bool {
        self.controllers && self.pages
    }

    pub fn content_controller(&self) -> bool {
        self.controllers && self.content
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderExtensionRequest {
    pub key: ExtensionKey,
    pub author: Author,
    title: Option<String>,
    description: Option<String>,
    toggles: FeatureToggles,
}

impl ProviderExtensionRequest {
    pub fn new(key: ExtensionKey, author: Author) -> Self {
        Self {
            key,
            author,
            title: None,
            description: None,
            toggles: FeatureToggles::default(),
        }
    }

    pub fn configure(mut self, toggles: FeatureToggles) -> Self {
        self.toggles = toggles;
        self
    }

    /// Blank values fall back to the generated default.
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.trim().is_empty());
        self
    }

    pub fn toggles(&self) -> &FeatureToggles {
        &self.toggles
    }

    pub fn title(&self) -> String {
        self.title.clone().unwrap_or_else(|| self.default_text())
    }

    pub fn description(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| self.default_text())
    }

    fn default_text(&self) -> String {
        let features = self.toggles.enabled_features();
        if features.is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            format!("{} for {}", DEFAULT_TITLE, features.join(", "))
        }
    }
}
