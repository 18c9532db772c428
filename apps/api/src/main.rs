mod analysis;
mod config;
mod embedding;
mod errors;
mod extraction;
mod routes;
mod skills;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::SkillAnalyzer;
use crate::config::Config;
use crate::embedding::{Embedder, OllamaEmbedder};
use crate::routes::build_router;
use crate::skills::SkillVocabulary;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Skillgap API v{}", env!("CARGO_PKG_VERSION"));

    // Skill vocabulary: loaded once, read-only thereafter
    let vocabulary = match &config.skills_file {
        Some(path) => SkillVocabulary::from_file(path)
            .with_context(|| format!("Failed to load skills file {}", path.display()))?,
        None => SkillVocabulary::builtin().context("Failed to build default vocabulary")?,
    };
    info!("Skill vocabulary loaded ({} phrases)", vocabulary.len());

    let embedder = build_embedder(&config)?;

    let analyzer = SkillAnalyzer::new(
        Arc::new(vocabulary),
        embedder,
        config.semantic_threshold,
    );

    let state = AppState {
        config: config.clone(),
        analyzer: Arc::new(analyzer),
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

/// Constructs the embedding backend, or `None` when semantic matching is disabled.
fn build_embedder(config: &Config) -> Result<Option<Arc<dyn Embedder>>> {
    let Some(url) = &config.embedding_url else {
        warn!("EMBEDDING_URL not set; semantic skill matching disabled");
        return Ok(None);
    };

    let embedder = OllamaEmbedder::new(
        url.clone(),
        config.embedding_model.clone(),
        Duration::from_secs(config.embedding_timeout_secs),
    )
    .context("Failed to build embedding client")?;

    info!(
        "Embedder initialized (url: {url}, model: {}, threshold: {})",
        config.embedding_model, config.semantic_threshold
    );
    Ok(Some(Arc::new(embedder)))
}
