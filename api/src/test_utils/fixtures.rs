//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::adapters::InMemoryMarketData;
use crate::app::scoring_config::Lexicon;
use crate::app::{ScoreCache, ScoreService, ScoringEngine};
use crate::domain::entities::MarketContext;

fn set(words: &[&str]) -> BTreeSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Market context with a small, stable set of tables (version 1)
pub fn test_context() -> MarketContext {
    MarketContext {
        version: 1,
        tld_premiums: BTreeMap::from([
            (".com".to_string(), 20),
            (".ai".to_string(), 15),
            (".io".to_string(), 12),
            (".xyz".to_string(), -5),
        ]),
        trending_keywords: set(&["ai", "dao", "defi", "gpt", "meta", "nft", "web3"]),
        commercial_keywords: set(&["buy", "deal", "market", "pay", "shop", "store", "trade"]),
    }
}

pub fn test_lexicon() -> Lexicon {
    Lexicon::default()
}

/// Engine with the default lexicon and equal weights
pub fn test_engine() -> ScoringEngine {
    ScoringEngine::new(test_lexicon())
}

/// Score service over an in-memory market seeded with [`test_context`]
pub fn test_service() -> ScoreService<InMemoryMarketData> {
    let market = Arc::new(InMemoryMarketData::new(test_context()));
    let cache = Arc::new(ScoreCache::new(Arc::new(test_engine())));
    ScoreService::new(market, cache)
}
