//! Unified error types for the domain scorer
//!
//! This module defines error types for each layer:
//! - `ScoringError`: Engine errors, local to a single scoring request
//! - `MarketDataError`: Market context collaborator errors
//! - `AppError`: Application layer errors (wraps scoring errors for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Scoring engine errors.
///
/// `Clone` so one failed single-flight computation can be handed to every
/// caller that was waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("Incomplete score: {0}")]
    IncompleteScore(String),

    #[error("Stale market context: version {requested} is older than {current}")]
    StaleContext { requested: u64, current: u64 },

    #[error("Invalid weights: {0}")]
    InvalidWeights(String),
}

/// Market data source errors
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("Market data unavailable: {0}")]
    Unavailable(String),

    #[error("Context version {offered} must be newer than {current}")]
    VersionRegression { offered: u64, current: u64 },
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Scoring(#[from] ScoringError),

    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, Option<String>) {
        match self {
            AppError::Scoring(ScoringError::InvalidDomain(msg)) => {
                (StatusCode::BAD_REQUEST, "Invalid domain", Some(msg.clone()))
            }
            AppError::Scoring(ScoringError::InvalidWeights(msg)) => {
                (StatusCode::BAD_REQUEST, "Invalid weights", Some(msg.clone()))
            }
            AppError::Scoring(e @ ScoringError::StaleContext { .. }) => (
                StatusCode::CONFLICT,
                "Stale market context",
                Some(e.to_string()),
            ),
            AppError::Scoring(ScoringError::IncompleteScore(msg)) => {
                tracing::error!("Incomplete score: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::MarketData(e) => match e {
                MarketDataError::VersionRegression { .. } => (
                    StatusCode::CONFLICT,
                    "Stale market context",
                    Some(e.to_string()),
                ),
                MarketDataError::Unavailable(msg) => {
                    tracing::error!("Market data unavailable: {}", msg);
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "Market data unavailable",
                        None,
                    )
                }
            },
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = self.parts();

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
