use super::types::AnalysisResponse;

/// Why a raw model response could not be turned into an [`AnalysisResponse`].
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("no JSON object in model output")]
    NoJson,
    #[error("model output does not match the response schema: {0}")]
    Schema(#[from] serde_json::Error),
}

/// Parse raw model output strictly against the response schema.
///
/// Tolerates markdown fences and prose around the JSON object by locating the
/// outermost `{..}` span, nothing more. Missing required fields, mistyped
/// fields, or the absence of any JSON object are all errors; no repair of
/// malformed output is attempted.
pub fn parse_response(raw: &str) -> Result<AnalysisResponse, ParseError> {
    let trimmed = raw.trim();

    let start = trimmed.find('{').ok_or(ParseError::NoJson)?;
    let end = trimmed.rfind('}').ok_or(ParseError::NoJson)?;
    if end < start {
        return Err(ParseError::NoJson);
    }

    Ok(serde_json::from_str(&trimmed[start..=end])?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_json_passes_through() {
        let raw = r#"{"suggestion": "Use a for loop", "edited_code": "for i in range(10): pass"}"#;
        let response = parse_response(raw).unwrap();
        assert_eq!(response.suggestion, "Use a for loop");
        assert_eq!(
            response.edited_code.as_deref(),
            Some("for i in range(10): pass")
        );
    }

    #[test]
    fn test_json_wrapped_in_fence() {
        let raw = "```json\n{\"suggestion\": \"Rename the variable\", \"edited_code\": null}\n```";
        let response = parse_response(raw).unwrap();
        assert_eq!(response.suggestion, "Rename the variable");
        assert_eq!(response.edited_code, None);
    }

    #[test]
    fn test_json_with_leading_commentary() {
        let raw = "Here is my analysis:\n{\"suggestion\": \"Looks fine, no changes needed.\"}";
        let response = parse_response(raw).unwrap();
        assert_eq!(response.suggestion, "Looks fine, no changes needed.");
        assert_eq!(response.edited_code, None);
    }

    #[test]
    fn test_null_edited_code_is_none() {
        let raw = r#"{"suggestion": "Looks fine, no changes needed.", "edited_code": null}"#;
        let response = parse_response(raw).unwrap();
        assert_eq!(response.edited_code, None);
    }

    #[test]
    fn test_escaped_newlines_in_edited_code() {
        let raw = r#"{"suggestion": "Split into two lines", "edited_code": "line one\nline two"}"#;
        let response = parse_response(raw).unwrap();
        assert_eq!(response.edited_code.as_deref(), Some("line one\nline two"));
    }

    #[test]
    fn test_missing_suggestion_is_an_error() {
        let raw = r#"{"edited_code": "for i in range(10): pass"}"#;
        assert!(matches!(parse_response(raw), Err(ParseError::Schema(_))));
    }

    #[test]
    fn test_mistyped_suggestion_is_an_error() {
        let raw = r#"{"suggestion": 42, "edited_code": null}"#;
        assert!(matches!(parse_response(raw), Err(ParseError::Schema(_))));
    }

    #[test]
    fn test_plain_prose_is_an_error() {
        let raw = "I think you should use a for loop here.";
        assert!(matches!(parse_response(raw), Err(ParseError::NoJson)));
    }

    #[test]
    fn test_empty_output_is_an_error() {
        assert!(matches!(parse_response(""), Err(ParseError::NoJson)));
        assert!(matches!(parse_response("   "), Err(ParseError::NoJson)));
    }

    #[test]
    fn test_truncated_json_is_an_error() {
        let raw = r#"{"suggestion": "Use a for loop", "edited_code": "for i in"#;
        assert!(matches!(parse_response(raw), Err(ParseError::NoJson)));
    }
}
