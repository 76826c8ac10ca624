use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_analyzer::config::Config;
use resume_analyzer::jobs::JobCatalog;
use resume_analyzer::llm_client::{self, LlmClient};
use resume_analyzer::narrative::generator::{LlmNarrator, NarrativeGenerator, TemplateNarrator};
use resume_analyzer::narrative::templates::TemplateBank;
use resume_analyzer::routes::build_router;
use resume_analyzer::scoring::weights::KeywordWeights;
use resume_analyzer::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume analyzer v{}", env!("CARGO_PKG_VERSION"));

    let weights = Arc::new(KeywordWeights::default());

    let jobs = match &config.jobs_seed_path {
        Some(path) => JobCatalog::from_path(path)?,
        None => JobCatalog::standard()?,
    };
    info!("Job catalog loaded ({} jobs)", jobs.len());

    // Template bank is validated once here; a malformed bank aborts startup.
    let bank = Arc::new(TemplateBank::standard()?);
    let templates = TemplateNarrator::new(bank);

    // Template narratives by default; swap via ENABLE_LLM_NARRATIVE + ANTHROPIC_API_KEY
    let narrator: Arc<dyn NarrativeGenerator> = match config.llm_narrative_key() {
        Some(key) => {
            let llm = LlmClient::new(key.to_string())?;
            info!("LLM narrative enabled (model: {})", llm_client::MODEL);
            Arc::new(LlmNarrator::new(llm, templates))
        }
        None => {
            info!("Using template narratives");
            Arc::new(templates)
        }
    };

    let state = AppState {
        config: config.clone(),
        weights,
        jobs: Arc::new(jobs),
        narrator,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
