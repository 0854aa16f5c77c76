//! Reading items and parameters from files or stdin.

use std::io::Read;
use std::path::Path;
use std::{fs, io};

use anyhow::{Context, Result};
use genum_engine::NodeParameters;
use genum_types::InputItem;
use serde_json::Value;

/// Read a JSON document from `path`, or from stdin when `path` is `-`.
pub fn read_json(path: &Path) -> Result<Value> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).context("read stdin")?;
        buffer
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&content).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Interpret a JSON document as input items.
///
/// Arrays yield one item per element; elements shaped like `{ "json": ... }`
/// are taken as items, anything else becomes an item's payload. A non-array
/// document is a single item.
pub fn items_from_value(value: Value) -> Vec<InputItem> {
    match value {
        Value::Array(elements) => elements.into_iter().map(item_from_element).collect(),
        other => vec![item_from_element(other)],
    }
}

fn item_from_element(element: Value) -> InputItem {
    match element {
        Value::Object(mut map) if map.len() == 1 && map.contains_key("json") => InputItem::new(map.remove("json").unwrap_or_default()),
        other => InputItem::new(other),
    }
}

pub fn parameters_from_value(value: Value) -> Result<NodeParameters> {
    serde_json::from_value(value).context("parameters must look like {\"batch\": {...}, \"items\": [{...}]}")
}

/// A `--prompt-id` value: a JSON locator object when it parses as one,
/// otherwise the literal text.
pub fn prompt_id_value(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ Value::Object(_)) => value,
        _ => Value::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wraps_bare_values_and_unwraps_items() {
        let items = items_from_value(json!([{"json": {"q": 1}}, {"q": 2}, 3]));
        assert_eq!(
            items,
            vec![
                InputItem::new(json!({"q": 1})),
                InputItem::new(json!({"q": 2})),
                InputItem::new(json!(3)),
            ]
        );
        assert_eq!(items_from_value(json!({"q": 1})).len(), 1);
    }

    #[test]
    fn reads_items_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        fs::write(&path, r#"[{"json": {"question": "Hi"}}]"#).unwrap();
        let items = items_from_value(read_json(&path).unwrap());
        assert_eq!(items[0].json["question"], "Hi");
    }

    #[test]
    fn invalid_json_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();
        let error = read_json(&path).unwrap_err();
        assert!(error.to_string().contains("broken.json"));
    }

    #[test]
    fn prompt_id_accepts_locator_json() {
        assert_eq!(prompt_id_value("150"), json!("150"));
        assert_eq!(prompt_id_value(r#"{"__rl":true,"value":"7"}"#), json!({"__rl": true, "value": "7"}));
    }

    #[test]
    fn parameters_require_known_shape() {
        assert!(parameters_from_value(json!({"batch": {"operation": "run"}})).is_ok());
        assert!(parameters_from_value(json!({"batch": []})).is_err());
    }
}
