use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A prompt as listed by the remote API.
///
/// Only `id` and `name` are interpreted; every other field is carried along
/// untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptRecord {
    /// Numeric in practice, but the API is free to send a string.
    pub id: Value,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PromptRecord {
    pub fn new(id: impl Into<Value>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }

    /// Whether `id` holds a usable identifier (a number or a string).
    pub fn has_identifier(&self) -> bool {
        matches!(self.id, Value::Number(_) | Value::String(_))
    }

    /// The identifier without JSON quoting.
    pub fn id_string(&self) -> String {
        match &self.id {
            Value::String(id) => id.clone(),
            other => other.to_string(),
        }
    }

    /// Name/value pair shown in option pickers.
    pub fn to_option(&self) -> ListOption {
        let id = self.id_string();
        ListOption {
            name: format!("{} (ID: {})", self.name, id),
            value: id,
        }
    }
}

/// Body of `POST /api/v1/prompts/run`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequestBody {
    pub id: i64,
    pub question: String,
    pub productive: bool,
    #[serde(rename = "memoryKey", default, skip_serializing_if = "Option::is_none")]
    pub memory_key: Option<String>,
}

impl RunRequestBody {
    /// Build a run body; an empty memory key is left out of the request entirely.
    pub fn new(id: i64, question: impl Into<String>, productive: bool, memory_key: &str) -> Self {
        Self {
            id,
            question: question.into(),
            productive,
            memory_key: (!memory_key.is_empty()).then(|| memory_key.to_string()),
        }
    }
}

/// Option entry returned to the host's option loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOption {
    pub name: String,
    pub value: String,
}

/// Envelope returned to the host's searchable list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSearchResult {
    pub results: Vec<ListOption>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn run_body_omits_empty_memory_key() {
        let body = RunRequestBody::new(150, "Hi", true, "");
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({"id": 150, "question": "Hi", "productive": true}));
    }

    #[test]
    fn run_body_includes_memory_key() {
        let body = RunRequestBody::new(150, "Hi", true, "ctx1");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"id": 150, "question": "Hi", "productive": true, "memoryKey": "ctx1"})
        );
    }

    #[test]
    fn record_keeps_opaque_fields() {
        let record: PromptRecord = serde_json::from_value(json!({"id": 3, "name": "Summary", "version": 2})).unwrap();
        assert_eq!(record.extra.get("version"), Some(&json!(2)));
        assert_eq!(serde_json::to_value(&record).unwrap(), json!({"id": 3, "name": "Summary", "version": 2}));
    }

    #[test]
    fn option_label_includes_identifier() {
        assert_eq!(
            PromptRecord::new(150, "Greeting").to_option(),
            ListOption {
                name: "Greeting (ID: 150)".into(),
                value: "150".into()
            }
        );
        assert_eq!(PromptRecord::new("abc", "Text").to_option().value, "abc");
    }

    #[test]
    fn missing_name_fails_to_decode() {
        assert!(serde_json::from_value::<PromptRecord>(json!({"id": 1})).is_err());
        assert!(!PromptRecord::new(Value::Null, "x").has_identifier());
    }
}
