//! Prompt reference resolution.
//!
//! A prompt parameter arrives either as the raw identifier typed by the user or
//! as a locator produced by the searchable list. Both collapse to one
//! identifier string here; turning that string into the numeric ID the run
//! endpoint expects is a separate step so callers can choose when to validate.

use genum_types::ResourceReference;

use crate::error::ExecutionError;

/// Collapse a reference to its identifier string (possibly empty).
pub fn resolve_reference(reference: &ResourceReference) -> String {
    match reference {
        ResourceReference::Plain(raw) => raw.clone(),
        ResourceReference::Selected(locator) => locator.value_string(),
    }
}

/// Parse a resolved identifier as a base-10 prompt ID.
///
/// Surrounding whitespace is ignored. Empty or non-numeric identifiers fail
/// here so that no request is sent with an unusable ID.
pub fn parse_prompt_id(identifier: &str) -> Result<i64, ExecutionError> {
    identifier
        .trim()
        .parse::<i64>()
        .map_err(|_| ExecutionError::InvalidPromptId {
            value: identifier.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use genum_types::ResourceLocator;
    use serde_json::json;

    #[test]
    fn resolves_selection_and_plain_values() {
        let selected = ResourceReference::from_value(json!({"__rl": true, "value": "42"}));
        assert_eq!(resolve_reference(&selected), "42");
        assert_eq!(resolve_reference(&ResourceReference::from_value(json!("42"))), "42");
        assert_eq!(resolve_reference(&ResourceReference::from_value(json!(42))), "42");
    }

    #[test]
    fn numeric_locator_value_is_stringified() {
        let selected = ResourceReference::Selected(ResourceLocator::new("list", 150));
        assert_eq!(resolve_reference(&selected), "150");
        let empty = ResourceReference::from_value(json!({"__rl": true, "mode": "id", "value": null}));
        assert_eq!(resolve_reference(&empty), "");
    }

    #[test]
    fn parses_numeric_identifiers() {
        assert_eq!(parse_prompt_id("150").unwrap(), 150);
        assert_eq!(parse_prompt_id(" 7 ").unwrap(), 7);
    }

    #[test]
    fn rejects_empty_and_non_numeric_identifiers() {
        assert!(matches!(parse_prompt_id(""), Err(ExecutionError::InvalidPromptId { .. })));
        assert!(matches!(parse_prompt_id("abc"), Err(ExecutionError::InvalidPromptId { value }) if value == "abc"));
        assert!(parse_prompt_id("15x").is_err());
    }
}
