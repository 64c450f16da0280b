//! In-memory market data adapter
//!
//! Holds the current market context behind a lock. The context can be seeded
//! from a JSON file at startup and replaced by the market collaborator at
//! runtime.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::{Arc, RwLock};

use anyhow::Context;
use async_trait::async_trait;

use crate::domain::entities::MarketContext;
use crate::domain::ports::MarketDataSource;
use crate::error::MarketDataError;

/// Built-in market tables used when no context file is configured (version 1)
pub fn default_market_context() -> MarketContext {
    let set = |words: &[&str]| words.iter().map(|w| w.to_string()).collect::<BTreeSet<_>>();

    MarketContext {
        version: 1,
        tld_premiums: BTreeMap::from([
            (".com".to_string(), 20),
            (".eth".to_string(), 18),
            (".ai".to_string(), 15),
            (".crypto".to_string(), 15),
            (".io".to_string(), 12),
            (".nft".to_string(), 12),
            (".dao".to_string(), 12),
            (".app".to_string(), 10),
            (".org".to_string(), 10),
            (".net".to_string(), 8),
            (".xyz".to_string(), 6),
        ]),
        trending_keywords: set(&[
            "ai", "agent", "crypto", "dao", "defi", "gpt", "green", "meta", "nft", "quantum",
            "web3",
        ]),
        commercial_keywords: set(&[
            "bank", "buy", "cash", "crypto", "deal", "finance", "loan", "market", "pay", "sell",
            "shop", "store", "trade",
        ]),
    }
}

pub struct InMemoryMarketData {
    context: RwLock<Arc<MarketContext>>,
}

impl Default for InMemoryMarketData {
    fn default() -> Self {
        Self::new(default_market_context())
    }
}

impl InMemoryMarketData {
    pub fn new(context: MarketContext) -> Self {
        Self {
            context: RwLock::new(Arc::new(context.normalized())),
        }
    }

    /// Seed the context from a JSON file shaped like [`MarketContext`].
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read market context from {}", path.display()))?;
        let context: MarketContext = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid market context JSON in {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            version = context.version,
            tlds = context.tld_premiums.len(),
            "Market context loaded"
        );
        Ok(Self::new(context))
    }
}

#[async_trait]
impl MarketDataSource for InMemoryMarketData {
    async fn current(&self) -> Result<Arc<MarketContext>, MarketDataError> {
        let context = self
            .context
            .read()
            .map_err(|_| MarketDataError::Unavailable("market context lock poisoned".into()))?;
        Ok(context.clone())
    }

    async fn replace(
        &self,
        context: MarketContext,
    ) -> Result<Arc<MarketContext>, MarketDataError> {
        let mut current = self
            .context
            .write()
            .map_err(|_| MarketDataError::Unavailable("market context lock poisoned".into()))?;

        if context.version <= current.version {
            tracing::warn!(
                offered = context.version,
                current = current.version,
                "Rejected market context that is not newer"
            );
            return Err(MarketDataError::VersionRegression {
                offered: context.version,
                current: current.version,
            });
        }

        let replacement = Arc::new(context.normalized());
        *current = replacement.clone();
        tracing::info!(version = replacement.version, "Market context replaced");
        Ok(replacement)
    }
}
