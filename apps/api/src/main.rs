mod config;
mod document;
mod errors;
mod generation;
mod layout;
mod llm_client;
mod models;
mod routes;
mod runs;
mod scrape;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::layout::{PageLayout, PdfRenderer};
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::runs::ProgressStore;
use crate::scrape::HttpPageLoader;
use crate::state::AppState;

/// How often stale run progress is swept.
const PROGRESS_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Failed to create output dir {}", config.output_dir.display()))?;

    // Initialize generation client, probing candidate models in order
    let first_model = config
        .gemini_models
        .first()
        .cloned()
        .context("GEMINI_MODELS must name at least one model")?;
    let mut gemini = GeminiClient::new(config.google_api_key.clone(), first_model)?;
    if let Some(base_url) = &config.gemini_base_url {
        gemini = gemini.with_base_url(base_url.as_str());
    }
    let gemini = match gemini.select_model(&config.gemini_models).await {
        Ok(selected) => selected,
        Err(e) => {
            warn!("{e}; keeping {} and relying on the fallback resume", gemini.model());
            gemini
        }
    };
    info!("LLM client initialized (model: {})", gemini.model());

    let page_loader = HttpPageLoader::new(&config.user_agent)?;

    // Sweep stale run progress in the background
    let progress = ProgressStore::new();
    {
        let progress = progress.clone();
        let ttl = config.progress_ttl;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(PROGRESS_SWEEP_INTERVAL);
            loop {
                ticker.tick().await;
                let removed = progress.expire(ttl);
                if removed > 0 {
                    info!("Expired {removed} stale run(s); {} still tracked", progress.len());
                }
            }
        });
    }

    // Build app state
    let state = AppState {
        generator: Arc::new(gemini),
        page_loader: Arc::new(page_loader),
        renderer: Arc::new(PdfRenderer),
        progress,
        config: config.clone(),
        page_layout: PageLayout::default(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS origins once the front-end host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
