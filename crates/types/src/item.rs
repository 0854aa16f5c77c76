use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One record flowing into the node from the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputItem {
    #[serde(default)]
    pub json: Value,
}

impl InputItem {
    pub fn new(json: Value) -> Self {
        Self { json }
    }
}

/// One record emitted by the node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputItem {
    pub json: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ItemError>,
    /// Index of the input item this output stands in for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paired_item: Option<usize>,
}

impl OutputItem {
    pub fn new(json: Value) -> Self {
        Self {
            json,
            error: None,
            paired_item: None,
        }
    }

    /// Output emitted in place of an input item that failed in continue-on-fail mode.
    pub fn failed(input: &InputItem, error: ItemError, item_index: usize) -> Self {
        Self {
            json: input.json.clone(),
            error: Some(error),
            paired_item: Some(item_index),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Serializable error attached to an [`OutputItem`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Structured context such as `itemIndex` or `httpCode`.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub context: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failed_item_carries_input_and_index() {
        let input = InputItem::new(json!({"question": "Hi"}));
        let error = ItemError {
            message: "boom".into(),
            ..Default::default()
        };
        let output = OutputItem::failed(&input, error, 3);
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({"json": {"question": "Hi"}, "error": {"message": "boom"}, "pairedItem": 3})
        );
        assert!(output.is_error());
    }

    #[test]
    fn plain_output_has_no_metadata() {
        assert_eq!(serde_json::to_value(OutputItem::new(json!({"id": 1}))).unwrap(), json!({"json": {"id": 1}}));
    }
}
