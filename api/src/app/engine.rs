//! Scoring engine
//!
//! Runs a domain through the lexical analyzer, the four calculators and the
//! aggregator. Holds only immutable configuration, so one instance can be
//! shared across request handlers without locking.

use crate::app::aggregator::aggregate;
use crate::app::calculators::{brandability, linguistic, market, memorability};
use crate::app::lexical::extract_features;
use crate::app::scoring_config::Lexicon;
use crate::domain::entities::{CompositeScore, DomainName, MarketContext, ScoreWeights};
use crate::error::ScoringError;

/// Anything that can turn a parsed domain plus market context into a
/// composite score. The cache is generic over this so tests can observe
/// computations.
pub trait DomainScorer: Send + Sync {
    fn score_domain(
        &self,
        domain: &DomainName,
        context: &MarketContext,
    ) -> Result<CompositeScore, ScoringError>;
}

#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    lexicon: Lexicon,
    weights: ScoreWeights,
}

impl ScoringEngine {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
            weights: ScoreWeights::default(),
        }
    }

    /// Use custom composite weights. Rejects weights that cannot be normalized.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Result<Self, ScoringError> {
        self.weights = weights
            .normalized()
            .ok_or_else(|| ScoringError::InvalidWeights(format!("cannot normalize {:?}", weights)))?;
        Ok(self)
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Parse and score a raw domain string.
    pub fn score(
        &self,
        raw: &str,
        context: &MarketContext,
    ) -> Result<CompositeScore, ScoringError> {
        let domain = raw.parse::<DomainName>()?;
        self.score_domain(&domain, context)
    }
}

impl DomainScorer for ScoringEngine {
    fn score_domain(
        &self,
        domain: &DomainName,
        context: &MarketContext,
    ) -> Result<CompositeScore, ScoringError> {
        let label = domain.label();
        let features = extract_features(label);

        let sub_scores = vec![
            brandability(label, &features, &self.lexicon),
            memorability(label, &features, &self.lexicon),
            linguistic(label, &features, &self.lexicon),
            market(domain, context),
        ];

        aggregate(
            domain.clone(),
            sub_scores,
            Some(&self.weights),
            context.version,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Dimension;
    use crate::test_utils::{test_context, test_engine};

    #[test]
    fn score_produces_all_four_dimensions() {
        let engine = test_engine();
        let score = engine.score("crypto.ai", &test_context()).unwrap();

        assert_eq!(score.domain.to_string(), "crypto.ai");
        assert_eq!(score.sub_scores.len(), 4);
        for dimension in Dimension::ALL {
            assert!(score.sub_score(dimension).is_some());
        }
        assert_eq!(score.value(Dimension::Brandability), 100);
    }

    #[test]
    fn overall_is_the_mean_with_default_weights() {
        let engine = test_engine();
        let score = engine.score("tiger.com", &test_context()).unwrap();
        let sum: u32 = Dimension::ALL
            .iter()
            .map(|d| u32::from(score.value(*d)))
            .sum();
        let expected = (f64::from(sum) / 4.0).round() as u8;
        assert_eq!(score.overall_score, expected);
    }

    #[test]
    fn score_carries_context_version() {
        let engine = test_engine();
        let context = test_context().with_version(42);
        let score = engine.score("tiger.com", &context).unwrap();
        assert_eq!(score.context_version, 42);
    }

    #[test]
    fn extreme_tld_premiums_clamp_instead_of_overflowing() {
        let engine = test_engine();
        let mut context = test_context();
        context.tld_premiums.insert(".com".to_string(), i32::MAX);
        context.tld_premiums.insert(".xyz".to_string(), i32::MIN);

        let high = engine.score("aishop.com", &context).unwrap();
        assert_eq!(high.value(Dimension::Market), 100);

        let low = engine.score("aishop.xyz", &context).unwrap();
        assert_eq!(low.value(Dimension::Market), 0);
    }

    #[test]
    fn invalid_domain_is_rejected_before_scoring() {
        let engine = test_engine();
        let err = engine.score("not a domain", &test_context()).unwrap_err();
        assert!(matches!(err, ScoringError::InvalidDomain(_)));
    }

    #[test]
    fn custom_weights_shift_the_overall_score() {
        let context = test_context();
        let market_only = test_engine()
            .with_weights(ScoreWeights::new(0.0, 0.0, 0.0, 1.0))
            .unwrap();
        let score = market_only.score("aishop.com", &context).unwrap();
        assert_eq!(score.overall_score, score.value(Dimension::Market));
    }

    #[test]
    fn with_weights_rejects_negative_weights() {
        let result = test_engine().with_weights(ScoreWeights::new(1.0, -1.0, 0.0, 0.0));
        assert!(matches!(result, Err(ScoringError::InvalidWeights(_))));
    }

    #[test]
    fn scoring_is_deterministic_apart_from_timestamp() {
        let engine = test_engine();
        let context = test_context();
        let first = engine.score("rocketpay.io", &context).unwrap();
        let second = engine.score("rocketpay.io", &context).unwrap();
        assert_eq!(first.overall_score, second.overall_score);
        assert_eq!(first.sub_scores, second.sub_scores);
    }
}
