//! Application layer
//!
//! The scoring engine and the services that orchestrate it.
//! Everything below `score_cache` is pure and stateless.

pub mod aggregator;
pub mod calculators;
pub mod engine;
pub mod lexical;
pub mod score_cache;
pub mod score_service;
pub mod scoring_config;

pub use engine::ScoringEngine;
pub use lexical::{analyze, Analysis};
pub use score_cache::{CacheConfig, CacheStats, ScoreCache};
pub use score_service::{BatchItem, ScoreService};
