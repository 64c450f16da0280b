//! Domain scoring handlers
//!
//! Endpoints the marketplace front-end and the on-chain watcher call.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::app::{analyze, Analysis, BatchItem};
use crate::domain::entities::{CompositeScore, DomainRecord};
use crate::error::AppError;
use crate::AppState;

/// Request body for batch scoring
#[derive(Debug, Deserialize)]
pub struct BatchScoreRequest {
    pub domains: Vec<String>,
}

/// Response body for batch scoring
#[derive(Debug, Serialize)]
pub struct BatchScoreResponse {
    pub results: Vec<BatchItem>,
    pub scored: usize,
    pub failed: usize,
}

/// GET /domains/:domain
///
/// Score a domain and return the persisted record shape.
pub async fn get_domain_score(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Json<DomainRecord>, AppError> {
    let record = state.score_service.record(&domain).await?;
    Ok(Json(record))
}

/// GET /domains/:domain/explain
///
/// Full composite score with every contributing factor.
pub async fn explain_domain_score(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Json<CompositeScore>, AppError> {
    let score = state.score_service.score(&domain).await?;
    Ok(Json(score.as_ref().clone()))
}

/// GET /domains/:domain/features
///
/// Lexical features only, no market data involved.
pub async fn get_domain_features(Path(domain): Path<String>) -> Result<Json<Analysis>, AppError> {
    Ok(Json(analyze(&domain)?))
}

/// POST /domains/score
pub async fn score_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchScoreRequest>,
) -> Result<Json<BatchScoreResponse>, AppError> {
    let results = state.score_service.score_batch(&request.domains).await?;
    let scored = results.iter().filter(|r| r.record.is_some()).count();

    Ok(Json(BatchScoreResponse {
        failed: results.len() - scored,
        scored,
        results,
    }))
}

/// POST /domains/:domain/invalidate
///
/// Called when ownership, listing price or transaction count changes.
pub async fn invalidate_domain(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<StatusCode, AppError> {
    state.score_service.invalidate(&domain)?;
    Ok(StatusCode::NO_CONTENT)
}
