use super::types::AnalysisRequest;

/// Build the user-turn prompt for an analysis request.
///
/// Embeds the literal query, the file name, the full file content between
/// explicit start/end markers, and the format instructions describing the
/// required response shape.
pub fn build_user_prompt(request: &AnalysisRequest) -> String {
    format!(
        "User Query: {}\n\n\
         --- START OF CODE FILE ({}) ---\n\
         {}\n\
         --- END OF CODE FILE ---\n\n\
         {}",
        request.message,
        request.context.file_name,
        request.context.code,
        format_instructions()
    )
}

/// Instructions appended to every prompt describing the JSON shape the model
/// must return, as a JSON schema with field descriptions.
pub fn format_instructions() -> String {
    let schema = serde_json::json!({
        "type": "object",
        "properties": {
            "suggestion": {
                "type": "string",
                "description": "A clear, concise explanation of the changes made or suggestions for the code."
            },
            "edited_code": {
                "type": ["string", "null"],
                "description": "The complete, modified code with the suggestions applied."
            }
        },
        "required": ["suggestion"]
    });

    format!(
        "The output should be formatted as a single JSON instance that conforms to the JSON \
         schema below. Do not add markdown fences or any text around it.\n\n{}",
        serde_json::to_string_pretty(&schema).unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::types::CodeContext;

    fn request() -> AnalysisRequest {
        AnalysisRequest {
            message: "Can you make this faster?".to_string(),
            context: CodeContext {
                file_name: "sort.py".to_string(),
                code: "def s(a):\n  return sorted(a)".to_string(),
                language: "python".to_string(),
            },
        }
    }

    #[test]
    fn test_prompt_embeds_query_and_file() {
        let prompt = build_user_prompt(&request());

        assert!(prompt.starts_with("User Query: Can you make this faster?"));
        assert!(prompt.contains("--- START OF CODE FILE (sort.py) ---"));
        assert!(prompt.contains("def s(a):\n  return sorted(a)"));
        assert!(prompt.contains("--- END OF CODE FILE ---"));
    }

    #[test]
    fn test_prompt_ends_with_format_instructions() {
        let prompt = build_user_prompt(&request());
        assert!(prompt.ends_with(&format_instructions()));
    }

    #[test]
    fn test_code_markers_delimit_content() {
        let prompt = build_user_prompt(&request());
        let start = prompt.find("--- START OF CODE FILE (sort.py) ---").unwrap();
        let end = prompt.find("--- END OF CODE FILE ---").unwrap();
        let between = &prompt[start..end];
        assert!(between.contains("def s(a):"));
    }

    #[test]
    fn test_special_characters_in_code_pass_through() {
        let mut fixture = request();
        fixture.context.code = r#"let re = Regex::new(r"(\d+)\s*");"#.to_string();

        let prompt = build_user_prompt(&fixture);
        assert!(prompt.contains(r#"let re = Regex::new(r"(\d+)\s*");"#));
    }

    #[test]
    fn test_format_instructions_name_both_fields() {
        let instructions = format_instructions();
        assert!(instructions.contains("\"suggestion\""));
        assert!(instructions.contains("\"edited_code\""));
        assert!(instructions.contains("JSON"));
    }
}
