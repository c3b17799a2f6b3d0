mod applications;
mod assistant;
mod candidates;
mod config;
mod db;
mod errors;
mod interviews;
mod jobs;
mod llm_client;
mod matching;
mod models;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::{CompletionClient, LlmClient};
use crate::matching::qualitative::{LlmMatchScorer, MatchScorer};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{HiringStore, PgStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting hiring API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let pool = create_pool(&config.database_url).await?;
    let store: Arc<dyn HiringStore> = Arc::new(PgStore::new(pool));

    // Initialize LLM client
    let llm: Arc<dyn CompletionClient> = Arc::new(LlmClient::new(
        config.anthropic_api_key.clone(),
        config.retry_policy(),
        config.llm_timeout(),
    )?);
    info!(
        "LLM client initialized (model: {}, max retries: {}, timeout: {}s)",
        llm_client::MODEL,
        config.llm_max_retries,
        config.llm_timeout_secs
    );

    let scorer: Arc<dyn MatchScorer> = Arc::new(LlmMatchScorer::new(llm.clone()));

    // Build app state
    let state = AppState::new(
        store,
        llm,
        scorer,
        config.match_max_concurrency,
        config.translation_cache_capacity,
    );
    info!(
        "Matching concurrency: {}, translation cache capacity: {}",
        config.match_max_concurrency, config.translation_cache_capacity
    );

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client's domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
