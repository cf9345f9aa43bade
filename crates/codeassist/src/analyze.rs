use crate::llm::{CompletionBackend, LlmOptions, OpenAiBackend};
use crate::prelude::{eprintln, println, *};
use codeassist_core::analyze::{
    build_user_prompt, parse_response, AnalysisRequest, AnalysisResponse, CodeContext,
};
use std::sync::Arc;

#[derive(Debug, clap::Parser)]
#[command(name = "analyze")]
#[command(about = "Code analysis operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Ask the model about a code file
    #[clap(name = "ask")]
    Ask(AskOptions),
}

#[derive(Debug, clap::Args)]
pub struct AskOptions {
    /// The question or instruction about the code
    pub message: String,

    /// Path of the code file to analyze
    #[clap(long)]
    pub file: String,

    /// Language of the code file (e.g. "python", "rust")
    #[clap(long, default_value = "plaintext")]
    pub language: String,

    #[clap(flatten)]
    pub llm: LlmOptions,
}

/// Drives one analysis round-trip: prompt construction, a single completion
/// call, and a strict parse of the output.
pub struct Analyzer {
    backend: Arc<dyn CompletionBackend>,
}

impl Analyzer {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    /// Analyze a request. Never fails: a completion error or an output that
    /// does not match the response schema collapses into the fixed fallback.
    pub async fn analyze(&self, request: &AnalysisRequest) -> AnalysisResponse {
        let prompt = build_user_prompt(request);

        let raw = match self.backend.complete(&prompt).await {
            Ok(raw) => raw,
            Err(err) => {
                eprintln!("Completion call failed: {err}");
                return AnalysisResponse::fallback();
            }
        };

        match parse_response(&raw) {
            Ok(response) => response,
            Err(err) => {
                eprintln!("Discarding model output: {err}");
                AnalysisResponse::fallback()
            }
        }
    }
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Ask(options) => ask(options, global).await,
    }
}

async fn ask(options: AskOptions, global: crate::Global) -> Result<()> {
    let code = tokio::fs::read_to_string(&options.file)
        .await
        .map_err(|e| eyre!("Failed to read file '{}': {}", options.file, e))?;

    let request = AnalysisRequest {
        message: options.message,
        context: CodeContext {
            file_name: options.file.clone(),
            code,
            language: options.language,
        },
    };

    if global.verbose {
        eprintln!("Model: {}", options.llm.model);
        eprintln!("Endpoint: {}", options.llm.base_url);
    }

    let backend = OpenAiBackend::new(&options.llm)?;
    let analyzer = Analyzer::new(Arc::new(backend));
    let response = analyzer.analyze(&request).await;

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
