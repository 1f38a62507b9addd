//! The file tree of a provider extension, computed without touching disk.
//!
//! Paths are relative to the extension root. The plan is deterministic: the
//! same request always yields the same directories, files and contents.

use crate::error::BuilderError;
use crate::extension::ExtensionManifest;
use crate::scaffold::request::ProviderExtensionRequest;
use serde_json::json;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

const MANIFEST_FILE: &str = "ext_emconf.toml";
const FLUID_NS: &str = "http://typo3.org/ns/TYPO3/CMS/Fluid/ViewHelpers";
const FLUX_NS: &str = "http://typo3.org/ns/FluidTYPO3/Flux/ViewHelpers";
const VHS_NS: &str = "http://typo3.org/ns/FluidTYPO3/Vhs/ViewHelpers";
const INITIAL_VERSION: &str = "0.0.1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub path: PathBuf,
    pub contents: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePlan {
    files: Vec<PlannedFile>,
}

impl FilePlan {
    pub fn files(&self) -> &[PlannedFile] {
        &self.files
    }

    /// Every directory that must exist below the root, parents first.
    pub fn directories(&self) -> Vec<PathBuf> {
        let mut dirs = BTreeSet::new();
        for file in &self.files {
            let mut parent = file.path.parent();
            while let Some(dir) = parent {
                if dir.as_os_str().is_empty() {
                    break;
                }
                dirs.insert(dir.to_path_buf());
                parent = dir.parent();
            }
        }
        dirs.into_iter().collect()
    }

    pub(crate) fn add(&mut self, path: impl AsRef<Path>, contents: String) {
        self.files.push(PlannedFile {
            path: path.as_ref().to_path_buf(),
            contents,
        });
    }
}

pub fn build_plan(request: &ProviderExtensionRequest) -> Result<FilePlan, BuilderError> {
    let toggles = request.toggles();
    let mut plan = FilePlan::default();

    plan.add(MANIFEST_FILE, manifest(request)?);
    plan.add("composer.json", composer_json(request)?);
    plan.add("ext_localconf.php", ext_localconf(request));
    plan.add("ext_tables.php", ext_tables(request));
    plan.add("Configuration/TypoScript/constants.txt", typoscript_constants(request));
    plan.add("Configuration/TypoScript/setup.txt", typoscript_setup(request));
    plan.add("Resources/Private/Language/locallang.xlf", locallang(request));
    plan.add("Resources/Public/Icons/Extension.svg", icon());

    if toggles.pages {
        plan.add("Resources/Private/Layouts/Page.html", layout());
        plan.add("Resources/Private/Templates/Page/Standard.html", page_template(request));
    }
    if toggles.content {
        plan.add("Resources/Private/Layouts/Content.html", layout());
        plan.add("Resources/Private/Templates/Content/Example.html", content_template(request));
    }
    if toggles.page_controller() {
        plan.add(
            "Classes/Controller/PageController.php",
            controller(request, "Page", "FluidTYPO3\\Fluidpages\\Controller\\AbstractPageController"),
        );
    }
    if toggles.content_controller() {
        plan.add(
            "Classes/Controller/ContentController.php",
            controller(
                request,
                "Content",
                "FluidTYPO3\\Fluidcontent\\Controller\\AbstractContentController",
            ),
        );
    }

    Ok(plan)
}

fn dependencies(request: &ProviderExtensionRequest) -> Vec<&'static str> {
    let toggles = request.toggles();
    let mut deps = vec!["flux"];
    if toggles.pages {
        deps.push("fluidpages");
    }
    if toggles.content {
        deps.push("fluidcontent");
    }
    if toggles.use_companion_library {
        deps.push("vhs");
    }
    deps
}

fn manifest(request: &ProviderExtensionRequest) -> Result<String, BuilderError> {
    let author = &request.author;
    let manifest = ExtensionManifest {
        title: request.title(),
        description: request.description(),
        category: "misc".to_string(),
        version: INITIAL_VERSION.to_string(),
        state: "experimental".to_string(),
        author: author.name.clone(),
        author_email: author.email.clone().unwrap_or_default(),
        author_company: author.company.clone().unwrap_or_default(),
        depends: dependencies(request).into_iter().map(String::from).collect(),
    };
    Ok(toml::to_string_pretty(&manifest)?)
}

fn composer_json(request: &ProviderExtensionRequest) -> Result<String, BuilderError> {
    let mut author = json!({ "name": request.author.name });
    if let Some(email) = &request.author.email {
        author["email"] = json!(email);
    }

    let mut require = serde_json::Map::new();
    for dep in dependencies(request) {
        require.insert(format!("fluidtypo3/{}", dep), json!("*"));
    }

    let mut psr4 = serde_json::Map::new();
    psr4.insert(
        format!("{}\\", request.key.namespace_prefix()),
        json!("Classes/"),
    );

    let composer = json!({
        "name": request.key.composer_name(),
        "type": "typo3-cms-extension",
        "description": request.description(),
        "version": INITIAL_VERSION,
        "authors": [author],
        "require": require,
        "autoload": { "psr-4": psr4 }
    });
    let mut out = serde_json::to_string_pretty(&composer)?;
    out.push('\n');
    Ok(out)
}

fn ext_localconf(request: &ProviderExtensionRequest) -> String {
    let toggles = request.toggles();
    let mut out = String::from("<?php\ndefined('TYPO3_MODE') or die('Access denied.');\n\n");
    for (enabled, scope) in [(toggles.pages, "Page"), (toggles.content, "Content")] {
        if enabled {
            out.push_str(&format!(
                "\\FluidTYPO3\\Flux\\Core::registerProviderExtensionKey('{}', '{}');\n",
                php_quote(&request.key.to_string()),
                scope
            ));
        }
    }
    out
}

fn ext_tables(request: &ProviderExtensionRequest) -> String {
    format!(
        "<?php\ndefined('TYPO3_MODE') or die('Access denied.');\n\n\
         \\TYPO3\\CMS\\Core\\Utility\\ExtensionManagementUtility::addStaticFile('{}', 'Configuration/TypoScript', '{}');\n",
        request.key.name(),
        php_quote(&request.title())
    )
}

fn typoscript_constants(request: &ProviderExtensionRequest) -> String {
    let name = request.key.name();
    format!(
        "plugin.tx_{name}.view {{\n\
         \t# cat=plugin.tx_{name}/file; type=string; label=Path to template root (FE)\n\
         \ttemplateRootPath = EXT:{name}/Resources/Private/Templates/\n\
         \t# cat=plugin.tx_{name}/file; type=string; label=Path to template partials (FE)\n\
         \tpartialRootPath = EXT:{name}/Resources/Private/Partials/\n\
         \t# cat=plugin.tx_{name}/file; type=string; label=Path to template layouts (FE)\n\
         \tlayoutRootPath = EXT:{name}/Resources/Private/Layouts/\n\
         }}\n"
    )
}

fn typoscript_setup(request: &ProviderExtensionRequest) -> String {
    let name = request.key.name();
    format!(
        "plugin.tx_{name}.view {{\n\
         \ttemplateRootPaths.0 = {{$plugin.tx_{name}.view.templateRootPath}}\n\
         \tpartialRootPaths.0 = {{$plugin.tx_{name}.view.partialRootPath}}\n\
         \tlayoutRootPaths.0 = {{$plugin.tx_{name}.view.layoutRootPath}}\n\
         }}\n"
    )
}

fn locallang(request: &ProviderExtensionRequest) -> String {
    let toggles = request.toggles();
    let mut units = String::new();
    if toggles.pages {
        units.push_str(&trans_unit("flux.standard", "Standard page"));
    }
    if toggles.content {
        units.push_str(&trans_unit("flux.example", "Example content element"));
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\" standalone=\"yes\" ?>\n\
         <xliff version=\"1.0\">\n\
         \t<file source-language=\"en\" datatype=\"plaintext\" original=\"messages\" product-name=\"{}\">\n\
         \t\t<header/>\n\
         \t\t<body>\n{}\t\t</body>\n\
         \t</file>\n\
         </xliff>\n",
        request.key.name(),
        units
    )
}

fn trans_unit(id: &str, source: &str) -> String {
    format!(
        "\t\t\t<trans-unit id=\"{}\">\n\t\t\t\t<source>{}</source>\n\t\t\t</trans-unit>\n",
        id,
        xml_escape(source)
    )
}

fn icon() -> String {
    "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"64\" height=\"64\" viewBox=\"0 0 64 64\">\n\
     \t<rect width=\"64\" height=\"64\" fill=\"#ff8700\"/>\n\
     \t<path d=\"M16 16h32v8H24v8h20v8H24v8h24v8H16z\" fill=\"#fff\"/>\n\
     </svg>\n"
        .to_string()
}

fn namespace_attributes(request: &ProviderExtensionRequest) -> String {
    let mut attrs = format!("\n     xmlns:f=\"{}\"\n     xmlns:flux=\"{}\"", FLUID_NS, FLUX_NS);
    if request.toggles().use_companion_library {
        attrs.push_str(&format!("\n     xmlns:v=\"{}\"", VHS_NS));
    }
    attrs
}

fn layout() -> String {
    format!(
        "<div xmlns:f=\"{}\" data-namespace-typo3-fluid=\"true\">\n\
         <f:render section=\"Main\" />\n\
         </div>\n",
        FLUID_NS
    )
}

fn page_template(request: &ProviderExtensionRequest) -> String {
    let render = if request.toggles().use_companion_library {
        "<v:content.render column=\"0\" />"
    } else {
        "<f:cObject typoscriptObjectPath=\"lib.dynamicContent\" data=\"{colPos: 0}\" />"
    };
    format!(
        "<div xmlns=\"http://www.w3.org/1999/xhtml\" lang=\"en\"{}\n     data-namespace-typo3-fluid=\"true\">\n\
         <f:layout name=\"Page\" />\n\
         \n\
         <f:section name=\"Configuration\">\n\
         \t<flux:form id=\"standard\" label=\"LLL:EXT:{}/Resources/Private/Language/locallang.xlf:flux.standard\">\n\
         \t\t<flux:grid>\n\
         \t\t\t<flux:grid.row>\n\
         \t\t\t\t<flux:grid.column colPos=\"0\" name=\"main\" label=\"Main content\" />\n\
         \t\t\t</flux:grid.row>\n\
         \t\t</flux:grid>\n\
         \t</flux:form>\n\
         </f:section>\n\
         \n\
         <f:section name=\"Main\">\n\
         \t{}\n\
         </f:section>\n\
         </div>\n",
        namespace_attributes(request),
        request.key.name(),
        render
    )
}

fn content_template(request: &ProviderExtensionRequest) -> String {
    let headline = if request.toggles().use_companion_library {
        "<v:format.trim>{headline}</v:format.trim>"
    } else {
        "{headline}"
    };
    format!(
        "<div xmlns=\"http://www.w3.org/1999/xhtml\" lang=\"en\"{}\n     data-namespace-typo3-fluid=\"true\">\n\
         <f:layout name=\"Content\" />\n\
         \n\
         <f:section name=\"Configuration\">\n\
         \t<flux:form id=\"example\" label=\"LLL:EXT:{}/Resources/Private/Language/locallang.xlf:flux.example\">\n\
         \t\t<flux:field.input name=\"headline\" label=\"Headline\" />\n\
         \t</flux:form>\n\
         </f:section>\n\
         \n\
         <f:section name=\"Preview\">\n\
         \t<strong>{{headline}}</strong>\n\
         </f:section>\n\
         \n\
         <f:section name=\"Main\">\n\
         \t<h2>{}</h2>\n\
         </f:section>\n\
         </div>\n",
        namespace_attributes(request),
        request.key.name(),
        headline
    )
}

fn controller(request: &ProviderExtensionRequest, scope: &str, parent: &str) -> String {
    let parent_name = parent.rsplit('\\').next().unwrap_or(parent);
    format!(
        "<?php\nnamespace {}\\Controller;\n\n\
         use {};\n\n\
         class {}Controller extends {}\n{{\n}}\n",
        request.key.namespace_prefix(),
        parent,
        scope,
        parent_name
    )
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn php_quote(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}
