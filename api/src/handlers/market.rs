//! Market context and cache handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::app::CacheStats;
use crate::domain::entities::MarketContext;
use crate::error::AppError;
use crate::AppState;

/// GET /market-context
pub async fn get_market_context(
    State(state): State<AppState>,
) -> Result<Json<MarketContext>, AppError> {
    let context = state.score_service.market_context().await?;
    Ok(Json(context.as_ref().clone()))
}

/// PUT /market-context
///
/// Install a newer market context. The version must increase.
pub async fn put_market_context(
    State(state): State<AppState>,
    Json(context): Json<MarketContext>,
) -> Result<Json<MarketContext>, AppError> {
    let replaced = state.score_service.replace_market_context(context).await?;
    Ok(Json(replaced.as_ref().clone()))
}

/// POST /cache/clear
pub async fn clear_cache(State(state): State<AppState>) -> StatusCode {
    state.score_service.clear_cache();
    StatusCode::NO_CONTENT
}

/// GET /cache/stats
pub async fn get_cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.score_service.cache_stats())
}
