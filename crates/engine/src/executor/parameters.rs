//! Node parameter access.
//!
//! The host hands parameters over already type-coerced; this module reads them
//! by name and item index, applies the node's declared defaults, and reports
//! values of the wrong type.

use genum_types::ResourceReference;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ExecutionError;

pub const RESOURCE: &str = "resource";
pub const OPERATION: &str = "operation";
pub const PROMPT_ID: &str = "promptId";
pub const QUESTION: &str = "question";
pub const MEMORY_KEY: &str = "memoryKey";
pub const PRODUCTIVE: &str = "productive";

/// Source of node parameter values, addressed by item index so values may
/// vary per item.
pub trait ParameterSource: Send + Sync {
    /// Raw value of `name` for the item at `item_index`, if set.
    fn parameter(&self, name: &str, item_index: usize) -> Option<Value>;

    fn string_parameter(&self, name: &str, item_index: usize, default: &str) -> Result<String, ExecutionError> {
        match self.parameter(name, item_index) {
            None | Some(Value::Null) => Ok(default.to_string()),
            Some(Value::String(value)) => Ok(value),
            Some(_) => Err(ExecutionError::invalid_parameter(name, "string")),
        }
    }

    fn bool_parameter(&self, name: &str, item_index: usize, default: bool) -> Result<bool, ExecutionError> {
        match self.parameter(name, item_index) {
            None | Some(Value::Null) => Ok(default),
            Some(Value::Bool(value)) => Ok(value),
            Some(_) => Err(ExecutionError::invalid_parameter(name, "boolean")),
        }
    }

    /// Resource-locator parameter; it has no default and must be present.
    fn reference_parameter(&self, name: &str, item_index: usize) -> Result<ResourceReference, ExecutionError> {
        self.parameter(name, item_index)
            .map(ResourceReference::from_value)
            .ok_or_else(|| ExecutionError::MissingParameter { name: name.to_string() })
    }
}

/// Parameters as a batch-level map plus optional per-item overrides.
///
/// ```json
/// { "batch": { "operation": "run", "promptId": "150" },
///   "items": [ { "question": "Hi" }, { "question": "Bye" } ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeParameters {
    #[serde(default)]
    pub batch: Map<String, Value>,
    #[serde(default)]
    pub items: Vec<Map<String, Value>>,
}

impl NodeParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a batch-level value.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.batch.insert(name.to_string(), value.into());
        self
    }

    /// Set a value for one item, overriding the batch-level value.
    pub fn with_item(mut self, item_index: usize, name: &str, value: impl Into<Value>) -> Self {
        if self.items.len() <= item_index {
            self.items.resize_with(item_index + 1, Map::new);
        }
        self.items[item_index].insert(name.to_string(), value.into());
        self
    }
}

impl ParameterSource for NodeParameters {
    fn parameter(&self, name: &str, item_index: usize) -> Option<Value> {
        self.items
            .get(item_index)
            .and_then(|overrides| overrides.get(name))
            .or_else(|| self.batch.get(name))
            .cloned()
    }
}
