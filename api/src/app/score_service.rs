//! Score service
//!
//! Orchestrates a scoring request: parse the domain, fetch the current market
//! context from the collaborator, and go through the score cache.

use std::sync::Arc;

use serde::Serialize;

use crate::app::score_cache::{CacheStats, ScoreCache};
use crate::domain::entities::{CompositeScore, DomainName, DomainRecord, MarketContext};
use crate::domain::ports::MarketDataSource;
use crate::error::AppError;

/// Maximum domains accepted in one batch request
pub const MAX_BATCH_SIZE: usize = 100;

/// Outcome for one domain of a batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchItem {
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<DomainRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Service for scoring domains against the live market context
pub struct ScoreService<M>
where
    M: MarketDataSource,
{
    market: Arc<M>,
    cache: Arc<ScoreCache>,
}

impl<M> ScoreService<M>
where
    M: MarketDataSource,
{
    pub fn new(market: Arc<M>, cache: Arc<ScoreCache>) -> Self {
        Self { market, cache }
    }

    /// Full composite score, including every contributing factor.
    pub async fn score(&self, raw: &str) -> Result<Arc<CompositeScore>, AppError> {
        let domain: DomainName = raw.parse()?;
        let context = self.market.current().await?;
        Ok(self.cache.get_or_compute(&domain, &context).await?)
    }

    /// Flat record projection of the composite score.
    pub async fn record(&self, raw: &str) -> Result<DomainRecord, AppError> {
        let score = self.score(raw).await?;
        Ok(DomainRecord::from(score.as_ref()))
    }

    /// Score several domains. One bad domain does not fail the batch.
    pub async fn score_batch(&self, domains: &[String]) -> Result<Vec<BatchItem>, AppError> {
        if domains.len() > MAX_BATCH_SIZE {
            return Err(AppError::BadRequest(format!(
                "batch of {} domains exceeds the limit of {}",
                domains.len(),
                MAX_BATCH_SIZE
            )));
        }

        let mut items = Vec::with_capacity(domains.len());
        for raw in domains {
            let item = match self.record(raw).await {
                Ok(record) => BatchItem {
                    domain: raw.clone(),
                    record: Some(record),
                    error: None,
                },
                // Market outages affect every domain alike, so they fail the batch
                Err(e @ AppError::MarketData(_)) => return Err(e),
                Err(e) => BatchItem {
                    domain: raw.clone(),
                    record: None,
                    error: Some(e.to_string()),
                },
            };
            items.push(item);
        }
        Ok(items)
    }

    /// Drop the cached score of a domain after an ownership, price or
    /// transaction change. Returns whether a cached score existed.
    pub fn invalidate(&self, raw: &str) -> Result<bool, AppError> {
        let domain: DomainName = raw.parse()?;
        Ok(self.cache.invalidate(&domain))
    }

    /// Drop every cached score.
    pub fn clear_cache(&self) {
        self.cache.invalidate_all();
    }

    pub async fn market_context(&self) -> Result<Arc<MarketContext>, AppError> {
        Ok(self.market.current().await?)
    }

    /// Install a newer market context. Cached scores keyed by older versions
    /// stop matching and are recomputed on their next request.
    pub async fn replace_market_context(
        &self,
        context: MarketContext,
    ) -> Result<Arc<MarketContext>, AppError> {
        let replaced = self.market.replace(context).await?;
        let purged = self.cache.purge_expired();
        tracing::info!(version = replaced.version, purged, "Market context updated");
        Ok(replaced)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Trend;
    use crate::error::{MarketDataError, ScoringError};
    use crate::test_utils::{test_context, test_service};

    #[tokio::test]
    async fn record_projects_the_composite_score() {
        let service = test_service();

        let record = service.record("AIShop.com").await.unwrap();
        let score = service.score("aishop.com").await.unwrap();

        assert_eq!(record.name, "aishop.com");
        assert_eq!(record.tld, ".com");
        assert_eq!(record.score, score.overall_score);
        assert_eq!(record.market, 100);
        assert_eq!(record.trend, Trend::Rising);
        assert!(record.price > 0);
    }

    #[tokio::test]
    async fn repeated_requests_are_identical() {
        let service = test_service();

        let first = service.score("tiger.com").await.unwrap();
        let second = service.score("tiger.com").await.unwrap();

        assert_eq!(*first, *second);
        assert_eq!(first.computed_at, second.computed_at);
        assert_eq!(service.cache_stats().computations, 1);
    }

    #[tokio::test]
    async fn invalid_domain_surfaces_as_scoring_error() {
        let service = test_service();
        let err = service.score("nodot").await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Scoring(ScoringError::InvalidDomain(_))
        ));
    }

    #[tokio::test]
    async fn batch_keeps_going_past_bad_domains() {
        let service = test_service();
        let domains = vec!["crypto.ai".to_string(), "bad domain".to_string()];

        let items = service.score_batch(&domains).await.unwrap();

        assert_eq!(items.len(), 2);
        assert!(items[0].record.is_some());
        assert!(items[0].error.is_none());
        assert!(items[1].record.is_none());
        assert!(items[1].error.as_deref().unwrap().contains("Invalid domain"));
    }

    #[tokio::test]
    async fn batch_rejects_oversized_requests() {
        let service = test_service();
        let domains: Vec<String> = (0..=MAX_BATCH_SIZE).map(|i| format!("d{}.com", i)).collect();
        let err = service.score_batch(&domains).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn invalidate_then_score_recomputes() {
        let service = test_service();

        let before = service.score("rocket.io").await.unwrap();
        assert!(service.invalidate("rocket.io").unwrap());
        let after = service.score("rocket.io").await.unwrap();

        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(service.cache_stats().computations, 2);
    }

    #[tokio::test]
    async fn new_market_context_changes_market_score() {
        let service = test_service();
        let before = service.record("garden.io").await.unwrap();

        let mut context = test_context().with_version(2);
        context.trending_keywords.insert("garden".to_string());
        service.replace_market_context(context).await.unwrap();
        let after = service.record("garden.io").await.unwrap();

        assert_eq!(before.trend, Trend::Steady);
        assert_eq!(after.trend, Trend::Rising);
        assert_eq!(after.market, before.market + 20);
    }

    #[tokio::test]
    async fn replacing_with_an_older_context_is_rejected() {
        let service = test_service();
        let err = service
            .replace_market_context(test_context().with_version(0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::MarketData(MarketDataError::VersionRegression { .. })
        ));
        assert_eq!(service.market_context().await.unwrap().version, 1);
    }
}
