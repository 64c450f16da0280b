//! Market data port trait
//!
//! The engine's view of the on-chain/market data collaborator: it hands out
//! already-resolved, versioned market context and accepts replacements.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::MarketContext;
use crate::error::MarketDataError;

#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Current market context
    async fn current(&self) -> Result<Arc<MarketContext>, MarketDataError>;

    /// Install a new context. Its version must be strictly newer than the
    /// current one.
    async fn replace(&self, context: MarketContext)
        -> Result<Arc<MarketContext>, MarketDataError>;
}
