//! Catalog discovery: every `texts_<locale>.json` file in the translations directory.
//!
//! Files may be flat (`{"home.set": "..."}`) or nested (`{"home": {"set": "..."}}`); nested
//! objects flatten to dotted keys. Non-string leaves are ignored.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::{debug, info, warn};
use serde_json::Value;

use super::bundled::{bundled_en, BUNDLED_LOCALE};
use super::Catalog;

const FILE_PREFIX: &str = "texts_";
const FILE_SUFFIX: &str = ".json";

pub fn catalog_file_name(locale: &str) -> String {
    format!("{}{}{}", FILE_PREFIX, locale, FILE_SUFFIX)
}

fn locale_from_file_name(name: &str) -> Option<String> {
    let locale = name.strip_prefix(FILE_PREFIX)?.strip_suffix(FILE_SUFFIX)?;
    if locale.is_empty() {
        return None;
    }
    Some(locale.to_lowercase())
}

fn flatten_into(prefix: &str, value: &Value, out: &mut Catalog) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let full = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_into(&full, child, out);
            }
        }
        Value::String(text) if !prefix.is_empty() => {
            out.insert(prefix.to_string(), text.clone());
        }
        _ => {}
    }
}

/// Parse one catalog document.
pub fn parse_catalog(content: &str) -> Result<Catalog, serde_json::Error> {
    let value: Value = serde_json::from_str(content.trim_start_matches('\0'))?;
    let mut catalog = Catalog::new();
    flatten_into("", &value, &mut catalog);
    Ok(catalog)
}

/// Load every catalog in `dir`. A missing directory yields an empty map; unreadable or
/// invalid files are logged and skipped.
pub fn load_catalog_dir(dir: &Path) -> HashMap<String, Catalog> {
    let mut catalogs = HashMap::new();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Translations directory {} not found", dir.display());
            return catalogs;
        }
        Err(e) => {
            warn!("Failed to read translations directory {}: {}", dir.display(), e);
            return catalogs;
        }
    };

    for entry in entries.flatten() {
        let file_name = entry.file_name();
        let Some(locale) = file_name.to_str().and_then(locale_from_file_name) else {
            continue;
        };
        let path = entry.path();
        let parsed = fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|content| parse_catalog(&content).map_err(|e| e.to_string()));
        match parsed {
            Ok(catalog) => {
                info!("Loaded translation: {} ({} keys)", locale, catalog.len());
                catalogs.insert(locale, catalog);
            }
            Err(e) => warn!("Error loading translation file {}: {}", path.display(), e),
        }
    }
    catalogs
}

/// Write the bundled English catalog to `dir` unless a file is already there.
/// Returns true when a file was written.
pub fn write_bundled_catalog(dir: &Path) -> std::io::Result<bool> {
    fs::create_dir_all(dir)?;
    let path = dir.join(catalog_file_name(BUNDLED_LOCALE));
    if path.exists() {
        return Ok(false);
    }
    let mut entries: Vec<(String, String)> = bundled_en().into_iter().collect();
    entries.sort();
    let map: serde_json::Map<String, Value> = entries
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect();
    let content = serde_json::to_string_pretty(&Value::Object(map))?;
    fs::write(&path, content)?;
    Ok(true)
}
