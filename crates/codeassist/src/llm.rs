use crate::prelude::*;
use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::openai;

const SYSTEM_PREAMBLE: &str = "\
You are an expert code analysis and refactoring assistant.
Your task is to receive a user's query about a piece of code, analyze it,
and provide a suggestion along with the edited code if applicable.
You MUST respond in the JSON format specified. Do not add any extra text or
explanations outside of the JSON structure.
The value for \"edited_code\" MUST be a valid JSON string, with all newlines
and special characters properly escaped (e.g., using \\n for newlines).
If no code edits are necessary (e.g., the user is just asking a question),
the value for \"edited_code\" should be null.";

/// Connection settings for the completion endpoint. Read once at startup and
/// handed to the backend constructor; never consulted again afterwards.
#[derive(Debug, Clone, clap::Args)]
pub struct LlmOptions {
    /// Model identifier for completion calls
    #[clap(
        long,
        env = "CODEASSIST_MODEL",
        default_value = "meta/llama3-70b-instruct"
    )]
    pub model: String,

    /// Base URL of the OpenAI-compatible completion API
    #[clap(
        long,
        env = "CODEASSIST_BASE_URL",
        default_value = "https://integrate.api.nvidia.com/v1"
    )]
    pub base_url: String,

    /// API key for the completion API
    #[clap(long, env = "CODEASSIST_API_KEY")]
    pub api_key: Option<String>,
}

/// One completion round-trip against the configured model.
///
/// Implementations make exactly one attempt, no retries; the caller decides
/// what a failure means.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Backend that talks to an OpenAI-compatible endpoint through rig.
pub struct OpenAiBackend {
    client: openai::Client,
    model: String,
}

impl OpenAiBackend {
    pub fn new(options: &LlmOptions) -> Result<Self> {
        Ok(Self {
            client: create_client(options)?,
            model: options.model.clone(),
        })
    }
}

fn create_client(options: &LlmOptions) -> Result<openai::Client> {
    // An absent key becomes an empty credential so the failure surfaces on
    // the first completion call rather than at startup.
    let api_key = options.api_key.clone().unwrap_or_default();

    openai::Client::builder()
        .api_key(api_key.as_str())
        .base_url(&options.base_url)
        .build()
        .map_err(|e| eyre!("Failed to create completion client: {}", e))
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let agent = self
            .client
            .agent(&self.model)
            .preamble(SYSTEM_PREAMBLE)
            .temperature(0.2)
            .build();

        agent
            .prompt(prompt)
            .await
            .map_err(|e| eyre!("Model completion failed: {}", e))
    }
}
