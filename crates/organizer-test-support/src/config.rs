//! Configuration documents for loader and dispatcher tests.

use std::path::Path;

use serde_json::{Map, Value, json};

/// Build a `paths` section watching `watch` and writing into `output`.
#[must_use]
pub fn paths_section(watch: &[&Path], output: &Path) -> Value {
    json!({
        "watch_folders": watch
            .iter()
            .map(|path| path.to_string_lossy().into_owned())
            .collect::<Vec<_>>(),
        "output_folder": output.to_string_lossy(),
    })
}

/// Build a full document with the given `paths` section and `mode_default`.
#[must_use]
pub fn document(watch: &[&Path], output: &Path, mode: &str) -> Value {
    json!({
        "paths": paths_section(watch, output),
        "behavior": { "mode_default": mode },
    })
}

/// Render a document as YAML text.
///
/// JSON is a subset of YAML, so the compact JSON rendering parses as-is.
#[must_use]
pub fn to_yaml_text(document: &Value) -> String {
    document.to_string()
}

/// Merge `overrides` into the `behavior` section of `document`.
#[must_use]
pub fn with_behavior(mut document: Value, overrides: &Value) -> Value {
    if let (Some(root), Some(extra)) = (document.as_object_mut(), overrides.as_object()) {
        let behavior = root
            .entry("behavior")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Some(section) = behavior.as_object_mut() {
            for (key, value) in extra {
                section.insert(key.clone(), value.clone());
            }
        }
    }
    document
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_contains_paths_and_mode() {
        let doc = document(&[Path::new("/data/in")], Path::new("/data/out"), "dry");
        assert_eq!(doc["paths"]["watch_folders"], json!(["/data/in"]));
        assert_eq!(doc["paths"]["output_folder"], json!("/data/out"));
        assert_eq!(doc["behavior"]["mode_default"], json!("dry"));
    }

    #[test]
    fn behavior_overrides_merge_into_existing_section() {
        let doc = document(&[Path::new("/in")], Path::new("/out"), "dry");
        let merged = with_behavior(doc, &json!({ "verbose_cli": true }));
        assert_eq!(merged["behavior"]["mode_default"], json!("dry"));
        assert_eq!(merged["behavior"]["verbose_cli"], json!(true));
    }

    #[test]
    fn yaml_text_is_json_rendering() {
        let doc = json!({ "paths": { "output_folder": "/out" } });
        assert_eq!(to_yaml_text(&doc), r#"{"paths":{"output_folder":"/out"}}"#);
    }
}
