//! Domain record projection
//!
//! The flat shape the persistence and display layers store for a scored
//! domain.

use serde::{Deserialize, Serialize};

use super::score::{CompositeScore, Dimension};

/// Factor name the Market calculator records for a trending-term match
pub const TRENDING_FACTOR: &str = "trending_term";

/// Market momentum of a name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Steady,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Rising => write!(f, "rising"),
            Trend::Steady => write!(f, "steady"),
        }
    }
}

/// Indicative price band derived from the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    Basic,
    Standard,
    Notable,
    Premium,
    Elite,
    Legendary,
}

impl PriceTier {
    /// Get tier from overall score
    pub fn from_score(score: u8) -> Self {
        match score {
            ..=49 => PriceTier::Basic,
            50..=59 => PriceTier::Standard,
            60..=69 => PriceTier::Notable,
            70..=79 => PriceTier::Premium,
            80..=89 => PriceTier::Elite,
            _ => PriceTier::Legendary,
        }
    }

    /// Indicative listing price in USD
    pub fn price_usd(self) -> u64 {
        match self {
            PriceTier::Basic => 50,
            PriceTier::Standard => 250,
            PriceTier::Notable => 1_000,
            PriceTier::Premium => 2_500,
            PriceTier::Elite => 10_000,
            PriceTier::Legendary => 25_000,
        }
    }
}

/// Persisted domain record shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    /// Full normalized domain, e.g. `crypto.ai`
    pub name: String,
    pub tld: String,
    pub score: u8,
    pub brandability: u8,
    pub memorability: u8,
    pub linguistic: u8,
    pub market: u8,
    pub trend: Trend,
    pub price: u64,
}

impl From<&CompositeScore> for DomainRecord {
    fn from(score: &CompositeScore) -> Self {
        let trend = match score.sub_score(Dimension::Market) {
            Some(market) if market.has_factor(TRENDING_FACTOR) => Trend::Rising,
            _ => Trend::Steady,
        };

        Self {
            name: score.domain.to_string(),
            tld: score.domain.tld().to_string(),
            score: score.overall_score,
            brandability: score.value(Dimension::Brandability),
            memorability: score.value(Dimension::Memorability),
            linguistic: score.value(Dimension::Linguistic),
            market: score.value(Dimension::Market),
            trend,
            price: PriceTier::from_score(score.overall_score).price_usd(),
        }
    }
}
