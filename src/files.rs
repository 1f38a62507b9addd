//! File enumeration for the lint commands.
//!
//! Walks a root recursively and keeps files whose suffix (after the final `.`)
//! is in a case-insensitive allow-list. Results are sorted by path.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

/// Allow-list of file suffixes, parsed from CSV such as `html,XML, txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixFilter {
    suffixes: BTreeSet<String>,
}

impl SuffixFilter {
    pub fn from_csv(csv: &str) -> Self {
        let suffixes = csv
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { suffixes }
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }

    pub fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
            return false;
        };
        match name.rsplit_once('.') {
            Some((_, suffix)) => self.suffixes.contains(&suffix.to_lowercase()),
            None => false,
        }
    }
}

/// Enumerator configuration
#[derive(Debug, Clone)]
pub struct EnumeratorConfig {
    /// Whether to follow symbolic links (default: false)
    pub follow_symlinks: bool,
    /// Directory or file names whose subtree is skipped
    pub ignore_patterns: Vec<String>,
}

impl Default for EnumeratorConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            ignore_patterns: vec![".git".to_string(), "node_modules".to_string()],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FileEnumerator {
    config: EnumeratorConfig,
}

impl FileEnumerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EnumeratorConfig) -> Self {
        Self { config }
    }

    /// Files below `root` matching `allowed_csv`, sorted.
    ///
    /// A missing root yields nothing; a root that is itself a matching file
    /// yields that file. Unreadable entries are skipped with a warning.
    pub fn list_files(&self, root: &Path, allowed_csv: &str) -> Vec<PathBuf> {
        self.list_matching(root, &SuffixFilter::from_csv(allowed_csv))
    }

    pub fn list_matching(&self, root: &Path, filter: &SuffixFilter) -> Vec<PathBuf> {
        if !root.exists() {
            return Vec::new();
        }

        let walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.should_ignore(entry));

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(root = %root.display(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            if entry.file_type().is_file() && filter.matches(entry.path()) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        files
    }

    fn should_ignore(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        self.config
            .ignore_patterns
            .iter()
            .any(|pattern| name == pattern.as_str())
    }
}
