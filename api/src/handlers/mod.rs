//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod domains;
pub mod market;

pub use domains::{
    explain_domain_score, get_domain_features, get_domain_score, invalidate_domain, score_batch,
};
pub use market::{clear_cache, get_cache_stats, get_market_context, put_market_context};
