use crate::analyze::Analyzer;
use crate::llm::{LlmOptions, OpenAiBackend};
use crate::prelude::{eprintln, *};
use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::{HeaderValue, StatusCode},
    routing::post,
    Json, Router,
};
use codeassist_core::analyze::{AnalysisRequest, AnalysisResponse};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};

#[derive(Debug, clap::Parser)]
#[command(name = "serve")]
#[command(about = "HTTP server exposing the code analysis endpoint")]
pub struct App {
    /// Port to listen on
    #[arg(short, long, env = "CODEASSIST_PORT", default_value = "3001")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Browser origin allowed to call the service
    #[arg(
        long,
        env = "CODEASSIST_ALLOWED_ORIGIN",
        default_value = "http://localhost:3000"
    )]
    pub allowed_origin: String,

    #[clap(flatten)]
    pub llm: LlmOptions,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if app.llm.api_key.is_none() {
        eprintln!(
            "Warning: no API key configured; completion calls will fail until CODEASSIST_API_KEY is set"
        );
    }

    if global.verbose {
        eprintln!("Starting analysis server on {}:{}...", app.host, app.port);
        eprintln!("Model: {}", app.llm.model);
        eprintln!("Endpoint: {}", app.llm.base_url);
        eprintln!("Allowed origin: {}", app.allowed_origin);
    }

    let addr = format!("{}:{}", app.host, app.port);

    let backend = OpenAiBackend::new(&app.llm)?;
    let analyzer = Arc::new(Analyzer::new(Arc::new(backend)));
    let app_router = router(analyzer, &app.allowed_origin)?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    if global.verbose {
        eprintln!("Analysis endpoint: http://{}/analyze-code", addr);
    }

    axum::serve(listener, app_router)
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

fn router(analyzer: Arc<Analyzer>, allowed_origin: &str) -> Result<Router> {
    let origin = allowed_origin
        .parse::<HeaderValue>()
        .map_err(|e| eyre!("Invalid allowed origin '{}': {}", allowed_origin, e))?;

    // Credentials are allowed, so methods and headers mirror the request
    // instead of using the wildcard.
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Ok(Router::new()
        .route("/analyze-code", post(analyze_handler))
        .layer(cors)
        .with_state(analyzer))
}

#[derive(Debug, serde::Serialize)]
struct ValidationError {
    error: String,
}

async fn analyze_handler(
    State(analyzer): State<Arc<Analyzer>>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, (StatusCode, Json<ValidationError>)> {
    let Json(request) = payload.map_err(|rejection| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ValidationError {
                error: rejection.body_text(),
            }),
        )
    })?;

    Ok(Json(analyzer.analyze(&request).await))
}
