use genum_types::PromptRecord;
use serde_json::Value;
use tracing::warn;

/// Shape of a prompt listing response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResponseShape<'a> {
    /// `{ "prompts": [...] }`
    Wrapped(&'a [Value]),
    /// `[...]`
    Bare(&'a [Value]),
    /// Anything else; treated as an empty listing.
    Unrecognized,
}

impl<'a> ResponseShape<'a> {
    pub fn records(self) -> &'a [Value] {
        match self {
            Self::Wrapped(records) | Self::Bare(records) => records,
            Self::Unrecognized => &[],
        }
    }
}

/// Classify a raw listing response. The `prompts` wrapper wins over a bare array.
pub fn classify_response(raw: &Value) -> ResponseShape<'_> {
    if let Some(Value::Array(records)) = raw.get("prompts") {
        return ResponseShape::Wrapped(records);
    }
    match raw {
        Value::Array(records) => ResponseShape::Bare(records),
        _ => ResponseShape::Unrecognized,
    }
}

/// Decode a listing into prompt records in API order, optionally keeping only
/// records whose name or ID contains `filter` (case-insensitive).
///
/// Elements without a usable `id` or `name` are skipped.
pub fn normalize_response(raw: &Value, filter: Option<&str>) -> Vec<PromptRecord> {
    let needle = filter.filter(|term| !term.is_empty()).map(str::to_lowercase);

    classify_response(raw)
        .records()
        .iter()
        .enumerate()
        .filter_map(|(position, element)| decode_record(position, element))
        .filter(|record| needle.as_deref().is_none_or(|needle| matches_filter(record, needle)))
        .collect()
}

fn decode_record(position: usize, element: &Value) -> Option<PromptRecord> {
    match serde_json::from_value::<PromptRecord>(element.clone()) {
        Ok(record) if record.has_identifier() => Some(record),
        Ok(_) => {
            warn!(position, "skipping prompt record without a usable id");
            None
        }
        Err(error) => {
            warn!(position, %error, "skipping malformed prompt record");
            None
        }
    }
}

fn matches_filter(record: &PromptRecord, needle: &str) -> bool {
    record.name.to_lowercase().contains(needle) || record.id_string().to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wrapped_and_bare_listings_normalize_identically() {
        let wrapped = normalize_response(&json!({"prompts": [{"id": 1, "name": "A"}]}), None);
        let bare = normalize_response(&json!([{"id": 1, "name": "A"}]), None);
        assert_eq!(wrapped, bare);
        assert_eq!(wrapped, vec![PromptRecord::new(1, "A")]);
    }

    #[test]
    fn unrecognized_shapes_yield_nothing() {
        assert_eq!(classify_response(&json!({"items": []})), ResponseShape::Unrecognized);
        assert_eq!(classify_response(&json!({"prompts": "nope"})), ResponseShape::Unrecognized);
        assert_eq!(classify_response(&Value::Null), ResponseShape::Unrecognized);
        assert!(normalize_response(&json!("text"), None).is_empty());
    }

    #[test]
    fn filters_by_id_substring() {
        let raw = json!([{"id": 150, "name": "Greeting"}, {"id": 7, "name": "Other"}]);
        assert_eq!(normalize_response(&raw, Some("15")), vec![PromptRecord::new(150, "Greeting")]);
    }

    #[test]
    fn filters_by_case_insensitive_name() {
        let raw = json!([{"id": 150, "name": "Greeting"}, {"id": 7, "name": "Other"}]);
        assert_eq!(normalize_response(&raw, Some("other")), vec![PromptRecord::new(7, "Other")]);
        assert_eq!(normalize_response(&raw, Some("GREET")).len(), 1);
    }

    #[test]
    fn empty_filter_keeps_everything_in_order() {
        let raw = json!({"prompts": [{"id": 9, "name": "Z"}, {"id": 2, "name": "A"}]});
        let ids: Vec<String> = normalize_response(&raw, Some("")).iter().map(PromptRecord::id_string).collect();
        assert_eq!(ids, vec!["9", "2"]);
    }

    #[test]
    fn string_ids_match_case_insensitively() {
        let raw = json!([{"id": "AbC-1", "name": "x"}]);
        assert_eq!(normalize_response(&raw, Some("abc")).len(), 1);
    }

    #[test]
    fn malformed_records_are_skipped() {
        let raw = json!([{"id": 1}, {"name": "no id"}, {"id": null, "name": "null id"}, {"id": 2, "name": "ok"}]);
        assert_eq!(normalize_response(&raw, None), vec![PromptRecord::new(2, "ok")]);
    }
}
