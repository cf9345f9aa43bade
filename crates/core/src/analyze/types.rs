use serde::{Deserialize, Serialize};

/// The source file under discussion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeContext {
    /// Name of the file, as the caller refers to it. `fileName` on the wire.
    #[serde(rename = "fileName")]
    pub file_name: String,
    /// Full text content of the file.
    pub code: String,
    /// Language of the file (e.g. "python", "rust").
    pub language: String,
}

/// An inbound analysis request: a natural-language query about a code file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// The user's question or instruction about the code.
    pub message: String,
    /// The code file the question is about.
    pub context: CodeContext,
}

/// The structured verdict returned to the caller.
///
/// `edited_code` is the only nullable field: `None` means the model proposed
/// no code change. It is always serialized, as `null` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Explanation of the changes made or suggestions for the code.
    pub suggestion: String,
    /// The complete modified code, or `None` when no edit is proposed.
    #[serde(default)]
    pub edited_code: Option<String>,
}

impl AnalysisResponse {
    /// Fixed response substituted when the completion call or its output
    /// fails. Every failure mode past input validation collapses to this.
    pub fn fallback() -> Self {
        Self {
            suggestion: "Sorry, I had trouble processing that request. Please try again."
                .to_string(),
            edited_code: None,
        }
    }
}
