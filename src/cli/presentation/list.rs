//! Extension list presentation: plain keys, detail table and JSON.

use crate::error::BuilderError;
use crate::extension::ExtensionInfo;
use comfy_table::Table;
use serde_json::json;

pub fn format_extension_list_text(extensions: &[ExtensionInfo]) -> String {
    extensions
        .iter()
        .map(|info| info.key.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_extension_list_table(extensions: &[ExtensionInfo]) -> String {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec![
        "Key", "Title", "Version", "State", "Type", "Installed", "Author",
    ]);
    for info in extensions {
        let installed = if info.installed { "yes" } else { "no" };
        table.add_row(vec![
            info.key.clone(),
            info.display_title().to_string(),
            info.manifest.version.clone(),
            info.manifest.state.clone(),
            info.extension_type.to_string(),
            installed.to_string(),
            info.manifest.author.clone(),
        ]);
    }
    table.to_string()
}

/// Full metadata with `detail`; key, title, installed and type otherwise.
pub fn format_extension_list_json(
    extensions: &[ExtensionInfo],
    detail: bool,
) -> Result<String, BuilderError> {
    let out = if detail {
        serde_json::to_string_pretty(extensions)?
    } else {
        let rows: Vec<serde_json::Value> = extensions
            .iter()
            .map(|info| {
                json!({
                    "key": info.key,
                    "title": info.display_title(),
                    "installed": info.installed,
                    "type": info.extension_type,
                })
            })
            .collect();
        serde_json::to_string_pretty(&rows)?
    };
    Ok(out)
}
