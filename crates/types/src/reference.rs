use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Discriminator key marking a value picked through a resource locator.
pub const RESOURCE_LOCATOR_TAG: &str = "__rl";

/// A prompt identifier as supplied by the user.
///
/// The host either passes the literal value typed into the "ID" mode, or a
/// tagged locator structure when the user picked an entry from the searchable
/// list. The two shapes are told apart solely by the [`RESOURCE_LOCATOR_TAG`]
/// key.
#[derive(Clone, Debug, PartialEq)]
pub enum ResourceReference {
    /// Raw value, already stringified (`null` becomes the empty string).
    Plain(String),
    /// Structure produced by the list/search picker.
    Selected(ResourceLocator),
}

/// Selection produced by the host's resource locator widget.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResourceLocator {
    /// Picker mode the value came from (`id` or `list`).
    pub mode: Option<String>,
    pub value: Value,
    /// Display label cached by the host for list selections.
    pub cached_result_name: Option<String>,
}

impl ResourceReference {
    /// Classify a raw parameter value.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) if map.contains_key(RESOURCE_LOCATOR_TAG) => Self::Selected(ResourceLocator::from_map(map)),
            other => Self::Plain(json_to_plain_string(&other)),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Plain(raw) => Value::String(raw.clone()),
            Self::Selected(locator) => locator.to_value(),
        }
    }
}

impl Default for ResourceReference {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

impl From<&str> for ResourceReference {
    fn from(value: &str) -> Self {
        Self::Plain(value.to_string())
    }
}

impl ResourceLocator {
    pub fn new(mode: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            mode: Some(mode.into()),
            value: value.into(),
            cached_result_name: None,
        }
    }

    fn from_map(mut map: Map<String, Value>) -> Self {
        Self {
            mode: map.get("mode").and_then(Value::as_str).map(str::to_string),
            cached_result_name: map.get("cachedResultName").and_then(Value::as_str).map(str::to_string),
            value: map.remove("value").unwrap_or(Value::Null),
        }
    }

    /// The selected value in its plain string form.
    pub fn value_string(&self) -> String {
        json_to_plain_string(&self.value)
    }

    fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert(RESOURCE_LOCATOR_TAG.into(), Value::Bool(true));
        if let Some(mode) = &self.mode {
            map.insert("mode".into(), Value::String(mode.clone()));
        }
        map.insert("value".into(), self.value.clone());
        if let Some(name) = &self.cached_result_name {
            map.insert("cachedResultName".into(), Value::String(name.clone()));
        }
        Value::Object(map)
    }
}

/// Strings are taken verbatim, `null` is empty, everything else uses its JSON text.
fn json_to_plain_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

impl<'de> Deserialize<'de> for ResourceReference {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

impl Serialize for ResourceReference {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}
