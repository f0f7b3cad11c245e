//! Reply normalization
//!
//! Turns the raw text of a reasoning reply into a complete [`Verdict`].
//! The reply is untrusted: it may be wrapped in prose or code fences,
//! truncated, missing fields, or not JSON at all.
//!
//! Extraction strategies are pure functions tried in a fixed order; the
//! first one yielding a JSON object wins:
//! 1. strict parse of the whole reply
//! 2. parse of the body of the first code fence
//! 3. parse of the span from the first `{` to the last `}`
//! 4. parse of the first brace-balanced object (handles several fragments)

use serde_json::{Map, Value};

use crate::model::Verdict;
use crate::model::extracted::{ExtractedVerdict, REQUIRED_FIELDS};
use crate::service::verdict::converters::convert_verdict;
use crate::service::verdict::error::ParseError;
use crate::service::verdict::validation::validate_extracted_verdict;

/// Text to "JSON object or no match"
pub type Strategy = fn(&str) -> Option<Map<String, Value>>;

/// Extraction strategies in the order they are attempted
pub const STRATEGIES: [(&str, Strategy); 4] = [
    ("strict", parse_strict),
    ("fenced", parse_fenced),
    ("embedded", parse_embedded),
    ("first_balanced", parse_first_balanced),
];

/// Normalize a raw reply into a verdict
pub fn normalize_reply(raw: &str) -> Result<Verdict, ParseError> {
    let (strategy, object) = locate_object(raw)?;

    tracing::debug!(
        strategy = strategy,
        reply_length = raw.len(),
        "Located JSON object in reasoning reply"
    );

    if let Some(missing) = REQUIRED_FIELDS
        .into_iter()
        .find(|field| !object.contains_key(*field))
    {
        return Err(ParseError::MissingField(missing));
    }

    let extracted: ExtractedVerdict = serde_json::from_value(Value::Object(object))
        .map_err(|e| ParseError::Schema(e.to_string()))?;

    let validation = validate_extracted_verdict(&extracted);
    for warning in &validation.warnings {
        tracing::warn!(warning = %warning, "Reasoning reply validation warning");
    }

    Ok(convert_verdict(extracted))
}

/// Run the strategies in order, or explain why none matched
fn locate_object(raw: &str) -> Result<(&'static str, Map<String, Value>), ParseError> {
    if let Some(found) = STRATEGIES
        .iter()
        .find_map(|(name, strategy)| strategy(raw).map(|object| (*name, object)))
    {
        return Ok(found);
    }

    if let Some(candidate) = embedded_span(raw) {
        return Err(match serde_json::from_str::<Value>(candidate) {
            Err(e) => ParseError::InvalidJson(e),
            Ok(_) => ParseError::NotAnObject,
        });
    }

    match serde_json::from_str::<Value>(raw.trim()) {
        Ok(_) => Err(ParseError::NotAnObject),
        Err(_) => Err(ParseError::NoJson),
    }
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str(text.trim()) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}

/// Whole reply as JSON
pub fn parse_strict(text: &str) -> Option<Map<String, Value>> {
    parse_object(text)
}

/// Body of the first code fence as JSON
pub fn parse_fenced(text: &str) -> Option<Map<String, Value>> {
    strip_code_fence(text).and_then(parse_object)
}

/// Span from the first `{` to the last `}` as JSON
pub fn parse_embedded(text: &str) -> Option<Map<String, Value>> {
    embedded_span(text).and_then(parse_object)
}

/// First brace-balanced object as JSON
pub fn parse_first_balanced(text: &str) -> Option<Map<String, Value>> {
    first_balanced_span(text).and_then(parse_object)
}

/// Inner body of a code fence, language tag removed
///
/// An unterminated fence (truncated reply) yields everything after the opener.
fn strip_code_fence(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after_open = &text[start + 3..];
    let tag_len = after_open
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(after_open.len());
    let body = &after_open[tag_len..];

    let body = match body.find("```") {
        Some(end) => &body[..end],
        None => body,
    };

    Some(body.trim())
}

fn embedded_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn first_balanced_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProofStep, VerdictStatus};

    const SOCRATES: &str = r#"{"valid":true,"proof":[{"step":1,"statement":"All M are P","rule":"Premise"}],"mood":"AAA-1","error":null}"#;

    fn socrates_verdict() -> Verdict {
        Verdict {
            valid: Some(true),
            proof: vec![ProofStep {
                step: 1,
                statement: "All M are P".to_string(),
                rule: "Premise".to_string(),
            }],
            mood: Some("AAA-1".to_string()),
            error: None,
            explanation: String::new(),
            status: VerdictStatus::Valid,
        }
    }

    #[test]
    fn test_clean_json_round_trips() {
        assert_eq!(normalize_reply(SOCRATES).unwrap(), socrates_verdict());
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let first = normalize_reply(SOCRATES).unwrap();
        let second = normalize_reply(SOCRATES).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_fenced_reply_matches_unfenced() {
        let inline = format!("```json{SOCRATES}```");
        let multiline = format!("```json\n{SOCRATES}\n```");
        let untagged = format!("```\n{SOCRATES}\n```");

        for reply in [inline, multiline, untagged] {
            assert_eq!(normalize_reply(&reply).unwrap(), socrates_verdict());
        }
    }

    #[test]
    fn test_prose_wrapped_reply() {
        let reply = format!("Here is my analysis:\n{SOCRATES}\nLet me know if you need more.");
        assert_eq!(normalize_reply(&reply).unwrap(), socrates_verdict());
    }

    #[test]
    fn test_multiple_fragments_take_first_object() {
        let reply = format!(
            "{SOCRATES}\n\nAlternatively: {{\"valid\":false,\"proof\":[],\"error\":\"x\"}}"
        );
        assert_eq!(parse_embedded(&reply), None);
        assert_eq!(normalize_reply(&reply).unwrap(), socrates_verdict());
    }

    #[test]
    fn test_balanced_scan_ignores_braces_in_strings() {
        let text = r#"note {"a":"}{","b":{"c":1}} trailing }"#;
        assert_eq!(
            first_balanced_span(text),
            Some(r#"{"a":"}{","b":{"c":1}}"#)
        );
    }

    #[test]
    fn test_prose_reply_is_no_json() {
        let err = normalize_reply("I cannot answer that").unwrap_err();
        assert!(matches!(err, ParseError::NoJson));
    }

    #[test]
    fn test_truncated_reply_is_invalid_json() {
        let err = normalize_reply(r#"{"valid": true, "proof": [{"step": 1, "statement": "All M"#)
            .unwrap_err();
        assert!(matches!(err, ParseError::NoJson | ParseError::InvalidJson(_)));

        let err = normalize_reply(r#"{"valid": true, "proof": [} }"#).unwrap_err();
        assert!(matches!(err, ParseError::InvalidJson(_)));
    }

    #[test]
    fn test_non_object_json() {
        let err = normalize_reply("[true, false]").unwrap_err();
        assert!(matches!(err, ParseError::NotAnObject));
    }

    #[test]
    fn test_missing_required_field_is_not_defaulted() {
        let err = normalize_reply(r#"{"proof": [], "error": null}"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingField("valid")));

        let err = normalize_reply(r#"{"valid": true, "error": null}"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingField("proof")));

        let err = normalize_reply(r#"{"valid": false, "proof": []}"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingField("error")));
    }

    #[test]
    fn test_wrong_types_are_schema_errors() {
        let err = normalize_reply(r#"{"valid": "yes", "proof": [], "error": null}"#).unwrap_err();
        assert!(matches!(err, ParseError::Schema(_)));

        let err =
            normalize_reply(r#"{"valid": true, "proof": [{"step": 1}], "error": null}"#).unwrap_err();
        assert!(matches!(err, ParseError::Schema(_)));
    }

    #[test]
    fn test_optional_fields_backfilled() {
        let verdict = normalize_reply(
            r#"{"valid": false, "proof": null, "error": "Undistributed Middle"}"#,
        )
        .unwrap();

        assert_eq!(verdict.valid, Some(false));
        assert!(verdict.proof.is_empty());
        assert_eq!(verdict.mood, None);
        assert_eq!(verdict.explanation, "");
        assert_eq!(verdict.error.as_deref(), Some("Undistributed Middle"));
        assert_eq!(verdict.status, VerdictStatus::Invalid);
    }

    #[test]
    fn test_explicit_null_validity_is_undetermined() {
        let verdict =
            normalize_reply(r#"{"valid": null, "proof": [], "mood": null, "error": null}"#).unwrap();
        assert_eq!(verdict.valid, None);
        assert_eq!(verdict.status, VerdictStatus::Undetermined);
    }

    #[test]
    fn test_valid_reply_with_placeholder_error_is_kept() {
        let reply = r#"{"valid":true,"proof":[{"step":1,"statement":"All M are P","rule":"Premise"}],"mood":"AAA-1","error":"None"}"#;
        let verdict = normalize_reply(reply).unwrap();

        assert_eq!(verdict.valid, Some(true));
        assert_eq!(verdict.status, VerdictStatus::Valid);
        assert_eq!(verdict.proof, socrates_verdict().proof);
        assert_eq!(verdict.mood.as_deref(), Some("AAA-1"));
        assert_eq!(verdict.error.as_deref(), Some("None"));
    }

    #[test]
    fn test_loose_step_indexes_are_accepted() {
        let quoted = SOCRATES.replace(r#""step":1"#, r#""step":"1""#);
        let float = SOCRATES.replace(r#""step":1"#, r#""step":1.0"#);

        for reply in [quoted, float] {
            assert_eq!(normalize_reply(&reply).unwrap(), socrates_verdict());
        }

        let unusable = SOCRATES.replace(r#""step":1"#, r#""step":"first""#);
        assert_eq!(normalize_reply(&unusable).unwrap().proof[0].step, 1);
    }

    #[test]
    fn test_malformed_argument_notice_passes_through() {
        let verdict = normalize_reply(
            r#"{"valid": false, "proof": [], "mood": null, "error": "Malformed or incomplete argument"}"#,
        )
        .unwrap();
        assert_eq!(verdict.status, VerdictStatus::Invalid);
        assert_eq!(
            verdict.error.as_deref(),
            Some("Malformed or incomplete argument")
        );
    }
}
