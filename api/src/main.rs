//! Domain Scorer API Server
//!
//! Scores domain names for the marketplace on brandability, memorability,
//! linguistic quality and market fit, with a single-flight score cache.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::InMemoryMarketData;
use app::{CacheConfig, ScoreCache, ScoreService, ScoringEngine};
use config::Config;

/// How often expired scores are swept out of the cache
const CACHE_PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub score_service: Arc<ScoreService<InMemoryMarketData>>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the HTTP router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Scoring
        .route("/domains/score", post(handlers::score_batch))
        .route("/domains/:domain", get(handlers::get_domain_score))
        .route("/domains/:domain/explain", get(handlers::explain_domain_score))
        .route("/domains/:domain/features", get(handlers::get_domain_features))
        .route(
            "/domains/:domain/invalidate",
            post(handlers::invalidate_domain),
        )
        // Market context collaborator
        .route(
            "/market-context",
            get(handlers::get_market_context).put(handlers::put_market_context),
        )
        .route("/cache/stats", get(handlers::get_cache_stats))
        .route("/cache/clear", post(handlers::clear_cache))
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,domain_scorer_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Domain Scorer API...");

    // Load configuration
    let config = Config::from_env()?;

    // Market context: file if configured, built-in tables otherwise
    let market = match &config.market_context_path {
        Some(path) => InMemoryMarketData::from_file(path)?,
        None => {
            tracing::info!("No MARKET_CONTEXT_PATH set, using built-in market tables");
            InMemoryMarketData::default()
        }
    };
    let market = Arc::new(market);

    // Scoring engine and cache
    let mut engine = ScoringEngine::default();
    if let Some(weights) = config.score_weights {
        engine = engine.with_weights(weights)?;
        tracing::info!(weights = ?engine.weights(), "Using custom score weights");
    }

    let cache = Arc::new(ScoreCache::with_config(
        Arc::new(engine),
        CacheConfig {
            ttl: chrono::Duration::seconds(config.cache_ttl_secs),
            strict_context_version: config.strict_context_version,
        },
    ));
    cache.spawn_purger(CACHE_PURGE_INTERVAL);
    tracing::info!(
        ttl_secs = config.cache_ttl_secs,
        strict = config.strict_context_version,
        purge_every_secs = CACHE_PURGE_INTERVAL.as_secs(),
        "Score cache ready"
    );

    let score_service = Arc::new(ScoreService::new(market, cache));

    // Create app state
    let app = router(AppState { score_service });

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
