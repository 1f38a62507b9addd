//! Template checking: the checker port and a Fluid tag-balance checker.
//!
//! `FluidTemplateChecker` is not a template engine. It tracks ViewHelper tag
//! nesting for known namespaces, the referenced layout, and declared
//! namespace aliases, which is what the lint report needs.

use crate::error::CheckError;
use crate::lint::result::{CheckResult, NamespaceAlias};
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Tags left open at the end of the template.
pub const UNCLOSED_TAGS_CODE: i64 = 1238169398;
/// A closing tag that does not match the innermost open tag.
pub const NESTING_CODE: i64 = 1224485838;
/// The file could not be read.
pub const READ_FAILURE_CODE: i64 = 1;

/// Namespace every Fluid template can use without declaring it.
const DEFAULT_ALIAS: &str = "f";
/// Prefixes that belong to XML itself rather than to ViewHelpers.
const XML_PREFIXES: &[&str] = &["xml", "xmlns", "xlink", "xsi", "svg"];
const NAMESPACE_URI_PREFIXES: &[&str] = &["http://typo3.org/ns/", "https://typo3.org/ns/"];

pub trait TemplateChecker: Send + Sync {
    fn check(&self, path: &Path) -> CheckResult;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FluidTemplateChecker;

impl FluidTemplateChecker {
    pub fn new() -> Self {
        Self
    }

    /// Check template source text.
    pub fn check_source(&self, source: &str) -> CheckResult {
        let source = strip_cdata(source);
        let namespaces = declared_namespaces(&source);

        let mut known: Vec<&str> = vec![DEFAULT_ALIAS];
        known.extend(namespaces.iter().map(|ns| ns.alias.as_str()));

        let mut compilable = true;
        let mut open: Vec<(String, usize)> = Vec::new();

        for caps in TAG_RE.captures_iter(&source) {
            let closing = !caps[1].is_empty();
            let prefix = &caps[2];
            let name = format!("{}:{}", prefix, &caps[3]);
            let self_closing = caps[4].trim_end().ends_with('/');

            if !known.contains(&prefix) {
                if !XML_PREFIXES.contains(&prefix) {
                    compilable = false;
                }
                continue;
            }

            let line = line_of(&source, caps.get(0).map_or(0, |m| m.start()));
            if closing {
                match open.pop() {
                    Some((expected, _)) if expected == name => {}
                    Some((expected, opened)) => {
                        return CheckResult::failed(CheckError::new(
                            format!(
                                "Templating tags not properly nested. Looking for \"{}\" (opened on line {}), found \"{}\" on line {}",
                                expected, opened, name, line
                            ),
                            NESTING_CODE,
                        ));
                    }
                    None => {
                        return CheckResult::failed(CheckError::new(
                            format!(
                                "Closing tag </{}> on line {} has no matching opening tag",
                                name, line
                            ),
                            NESTING_CODE,
                        ));
                    }
                }
            } else if !self_closing {
                open.push((name, line));
            }
        }

        if !open.is_empty() {
            let unclosed: Vec<String> = open
                .iter()
                .map(|(name, line)| format!("<{}> opened on line {}", name, line))
                .collect();
            return CheckResult::failed(CheckError::new(
                format!("Not all tags were closed! Unclosed: {}", unclosed.join(", ")),
                UNCLOSED_TAGS_CODE,
            ));
        }

        CheckResult::template(compilable, layout_name(&source), namespaces)
    }
}

impl TemplateChecker for FluidTemplateChecker {
    fn check(&self, path: &Path) -> CheckResult {
        match fs::read_to_string(path) {
            Ok(source) => self.check_source(&source),
            Err(e) => CheckResult::failed(CheckError::new(
                format!("Unable to read template: {}", e),
                READ_FAILURE_CODE,
            )),
        }
    }
}

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<(/?)([A-Za-z][A-Za-z0-9_]*):([A-Za-z][A-Za-z0-9_.\-]*)((?:[^>"']|"[^"]*"|'[^']*')*)>"#,
    )
    .expect("tag regex is valid")
});

static CDATA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!\[CDATA\[.*?\]\]>").expect("cdata regex is valid"));

static INLINE_NAMESPACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{namespace\s+([A-Za-z][A-Za-z0-9_]*)\s*=\s*([A-Za-z0-9_\\]+)\s*\}")
        .expect("namespace regex is valid")
});

static XMLNS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"xmlns:([A-Za-z][A-Za-z0-9_]*)\s*=\s*"([^"]*)""#).expect("xmlns regex is valid")
});

/// `<f:layout name="X" />` and `{f:layout(name: 'X')}`
static LAYOUT_RES: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r#"<f:layout\s[^>]*name\s*=\s*"([^"]+)""#).expect("layout regex is valid"),
        Regex::new(r#"\{f:layout\s*\(\s*name\s*:\s*['"]([^'"]+)['"]"#)
            .expect("inline layout regex is valid"),
    ]
});

/// Replace CDATA sections with their newlines so line numbers stay accurate.
fn strip_cdata(source: &str) -> String {
    CDATA_RE
        .replace_all(source, |caps: &Captures| {
            caps[0].chars().filter(|c| *c == '\n').collect::<String>()
        })
        .into_owned()
}

fn line_of(source: &str, offset: usize) -> usize {
    source[..offset].matches('\n').count() + 1
}

/// Inline `{namespace x=...}` and `xmlns:x="..."` declarations in document order.
/// A re-declared alias keeps its first position and takes the later namespace.
fn declared_namespaces(source: &str) -> Vec<NamespaceAlias> {
    let mut found: Vec<(usize, String, String)> = Vec::new();
    for caps in INLINE_NAMESPACE_RE.captures_iter(source) {
        let start = caps.get(0).map_or(0, |m| m.start());
        found.push((start, caps[1].to_string(), caps[2].to_string()));
    }
    for caps in XMLNS_RE.captures_iter(source) {
        let start = caps.get(0).map_or(0, |m| m.start());
        found.push((start, caps[1].to_string(), namespace_from_uri(&caps[2])));
    }
    found.sort_by_key(|(start, _, _)| *start);

    let mut namespaces: Vec<NamespaceAlias> = Vec::new();
    for (_, alias, namespace) in found {
        match namespaces.iter_mut().find(|ns| ns.alias == alias) {
            Some(existing) => existing.namespace = namespace,
            None => namespaces.push(NamespaceAlias { alias, namespace }),
        }
    }
    namespaces
}

/// `http://typo3.org/ns/FluidTYPO3/Vhs/ViewHelpers` -> `FluidTYPO3\Vhs\ViewHelpers`
fn namespace_from_uri(uri: &str) -> String {
    for prefix in NAMESPACE_URI_PREFIXES {
        if let Some(rest) = uri.strip_prefix(prefix) {
            return rest.trim_end_matches('/').replace('/', "\\");
        }
    }
    uri.to_string()
}

fn layout_name(source: &str) -> Option<String> {
    LAYOUT_RES
        .iter()
        .find_map(|re| re.captures(source).map(|caps| caps[1].to_string()))
}
