use manual_core::ManualStructure;
use serde_json::Value;

use crate::{FailureKind, StructuringError};

/// Parses the model's reply into a `ManualStructure`.
///
/// Absent or blank text is treated as `{}`, which then fails the required
/// field check.
pub fn parse_structure(text: Option<&str>) -> Result<ManualStructure, StructuringError> {
    let raw = text.map(str::trim).filter(|t| !t.is_empty()).unwrap_or("{}");

    let value: Value = serde_json::from_str(raw)
        .map_err(|err| StructuringError::new(FailureKind::MalformedResponse, err.to_string()))?;

    let structure: ManualStructure = serde_json::from_value(value)
        .map_err(|err| StructuringError::new(FailureKind::IncompleteStructure, err.to_string()))?;

    if let Some(id) = structure.duplicate_chapter_id() {
        return Err(StructuringError::new(
            FailureKind::IncompleteStructure,
            format!("duplicate chapter id `{id}`"),
        ));
    }
    Ok(structure)
}

/// Joins the non-thought text parts of the first candidate.
pub fn extract_response_text(value: &Value) -> Option<String> {
    let parts = value
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let mut text = String::new();
    for part in parts {
        if part.get("thought").and_then(Value::as_bool) == Some(true) {
            continue;
        }
        if let Some(part_text) = part.get("text").and_then(Value::as_str) {
            text.push_str(part_text);
        }
    }
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// `error.message` from a service error body.
pub fn parse_service_error(raw_json: &str) -> Option<String> {
    let value: Value = serde_json::from_str(raw_json).ok()?;
    let message = value.get("error")?.get("message")?.as_str()?.to_owned();
    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MINIMAL: &str = r#"{"siteTitle":"S","scrapingStrategy":[],"chapters":[]}"#;

    #[test]
    fn minimal_structure_gets_defaults() {
        let structure = parse_structure(Some(MINIMAL)).unwrap();
        assert_eq!(structure.site_title, "S");
        assert_eq!(structure.total_estimated_pages, 0);
        assert!(structure.chapters.is_empty());
    }

    #[test]
    fn absent_text_is_an_incomplete_structure() {
        let err = parse_structure(None).unwrap_err();
        assert_eq!(err.kind, FailureKind::IncompleteStructure);
        let err = parse_structure(Some("  ")).unwrap_err();
        assert_eq!(err.kind, FailureKind::IncompleteStructure);
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = parse_structure(Some("{\"siteTitle\": ")).unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
    }

    #[test]
    fn missing_page_url_is_incomplete() {
        let text = r#"{"siteTitle":"S","scrapingStrategy":[],
            "chapters":[{"id":"a","title":"A","pages":[{"title":"p"}]}]}"#;
        let err = parse_structure(Some(text)).unwrap_err();
        assert_eq!(err.kind, FailureKind::IncompleteStructure);
    }

    #[test]
    fn mistyped_field_is_incomplete() {
        let text = r#"{"siteTitle":"S","scrapingStrategy":"one","chapters":[]}"#;
        let err = parse_structure(Some(text)).unwrap_err();
        assert_eq!(err.kind, FailureKind::IncompleteStructure);
    }

    #[test]
    fn null_summary_and_whole_float_estimate_are_accepted() {
        let text = r#"{"siteTitle":"S","totalEstimatedPages":12.0,"scrapingStrategy":[],
            "chapters":[{"id":"a","title":"A","summary":null,"pages":[]}]}"#;
        let structure = parse_structure(Some(text)).unwrap();
        assert_eq!(structure.total_estimated_pages, 12);
        assert_eq!(structure.chapters[0].summary, "");
    }

    #[test]
    fn fractional_or_negative_estimate_is_incomplete() {
        for estimate in ["12.5", "-3"] {
            let text = format!(
                r#"{{"siteTitle":"S","totalEstimatedPages":{estimate},"scrapingStrategy":[],"chapters":[]}}"#
            );
            let err = parse_structure(Some(&text)).unwrap_err();
            assert_eq!(err.kind, FailureKind::IncompleteStructure);
        }
    }

    #[test]
    fn duplicate_chapter_ids_are_rejected() {
        let text = r#"{"siteTitle":"S","scrapingStrategy":[],"chapters":[
            {"id":"a","title":"A","pages":[]},{"id":"a","title":"B","pages":[]}]}"#;
        let err = parse_structure(Some(text)).unwrap_err();
        assert_eq!(err.kind, FailureKind::IncompleteStructure);
        assert!(err.message.contains("`a`"));
    }

    #[test]
    fn thought_parts_are_skipped() {
        let value = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "thinking...", "thought": true},
                        {"text": "{\"a\":"},
                        {"text": "1}"}
                    ]
                }
            }]
        });
        assert_eq!(extract_response_text(&value).as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn missing_candidates_yield_no_text() {
        assert_eq!(extract_response_text(&json!({})), None);
        assert_eq!(extract_response_text(&json!({"candidates": []})), None);
    }

    #[test]
    fn service_error_message_is_extracted() {
        let raw = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(parse_service_error(raw).as_deref(), Some("API key not valid"));
        assert_eq!(parse_service_error("not json"), None);
    }
}
