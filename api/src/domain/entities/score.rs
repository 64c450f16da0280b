//! Score entities
//!
//! Sub-scores with their explanation trail, the weights used to combine them,
//! and the composite score handed to callers.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain_name::DomainName;

/// Lowest score any dimension or composite can take
pub const MIN_SCORE: i32 = 0;

/// Highest score any dimension or composite can take
pub const MAX_SCORE: i32 = 100;

/// Clamp a raw score into `[MIN_SCORE, MAX_SCORE]`.
pub fn clamp_score(raw: i32) -> u8 {
    raw.clamp(MIN_SCORE, MAX_SCORE) as u8
}

/// Scoring dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Brandability,
    Memorability,
    Linguistic,
    Market,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Brandability,
        Dimension::Memorability,
        Dimension::Linguistic,
        Dimension::Market,
    ];
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::Brandability => write!(f, "brandability"),
            Dimension::Memorability => write!(f, "memorability"),
            Dimension::Linguistic => write!(f, "linguistic"),
            Dimension::Market => write!(f, "market"),
        }
    }
}

impl std::str::FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "brandability" => Ok(Dimension::Brandability),
            "memorability" => Ok(Dimension::Memorability),
            "linguistic" => Ok(Dimension::Linguistic),
            "market" => Ok(Dimension::Market),
            _ => Err(format!("Unknown dimension: {}", s)),
        }
    }
}

/// One adjustment applied on top of the base score
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Factor {
    pub factor: String,
    pub delta: i32,
}

impl Factor {
    pub fn new(factor: impl Into<String>, delta: i32) -> Self {
        Self {
            factor: factor.into(),
            delta,
        }
    }
}

/// Result of a single calculator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubScore {
    pub dimension: Dimension,
    pub value: u8,
    /// Adjustments in the order they were applied
    pub contributing_factors: Vec<Factor>,
}

impl SubScore {
    /// Sum the base and every factor, then clamp once.
    pub fn from_factors(dimension: Dimension, base: i32, factors: Vec<Factor>) -> Self {
        let raw = factors.iter().fold(base, |acc, f| acc.saturating_add(f.delta));
        Self {
            dimension,
            value: clamp_score(raw),
            contributing_factors: factors,
        }
    }

    pub fn has_factor(&self, name: &str) -> bool {
        self.contributing_factors
            .iter()
            .any(|f| f.factor == name || f.factor.starts_with(&format!("{}(", name)))
    }
}

/// Relative weight of each dimension in the composite.
///
/// Weights need not sum to 1.0; [`ScoreWeights::normalized`] rescales them
/// proportionally before they are applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub brandability: f64,
    pub memorability: f64,
    pub linguistic: f64,
    pub market: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            brandability: 0.25,
            memorability: 0.25,
            linguistic: 0.25,
            market: 0.25,
        }
    }
}

impl ScoreWeights {
    pub fn new(brandability: f64, memorability: f64, linguistic: f64, market: f64) -> Self {
        Self {
            brandability,
            memorability,
            linguistic,
            market,
        }
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Brandability => self.brandability,
            Dimension::Memorability => self.memorability,
            Dimension::Linguistic => self.linguistic,
            Dimension::Market => self.market,
        }
    }

    pub fn set(&mut self, dimension: Dimension, weight: f64) {
        match dimension {
            Dimension::Brandability => self.brandability = weight,
            Dimension::Memorability => self.memorability = weight,
            Dimension::Linguistic => self.linguistic = weight,
            Dimension::Market => self.market = weight,
        }
    }

    pub fn sum(&self) -> f64 {
        Dimension::ALL.iter().map(|d| self.get(*d)).sum()
    }

    /// Rescale so the weights sum to 1.0.
    ///
    /// Returns `None` when any weight is negative or non-finite, or when they
    /// sum to zero.
    pub fn normalized(&self) -> Option<Self> {
        if Dimension::ALL
            .iter()
            .any(|d| !self.get(*d).is_finite() || self.get(*d) < 0.0)
        {
            return None;
        }
        let sum = self.sum();
        if sum <= 0.0 {
            return None;
        }
        Some(Self {
            brandability: self.brandability / sum,
            memorability: self.memorability / sum,
            linguistic: self.linguistic / sum,
            market: self.market / sum,
        })
    }
}

/// Weighted combination of all four sub-scores
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeScore {
    pub domain: DomainName,
    pub sub_scores: BTreeMap<Dimension, SubScore>,
    pub overall_score: u8,
    /// Normalized weights actually applied
    pub weights: ScoreWeights,
    /// Version of the market context the Market sub-score was computed with
    pub context_version: u64,
    pub computed_at: DateTime<Utc>,
}

impl CompositeScore {
    /// Value of one dimension. Every composite carries all four.
    pub fn value(&self, dimension: Dimension) -> u8 {
        self.sub_scores
            .get(&dimension)
            .map(|s| s.value)
            .unwrap_or_default()
    }

    pub fn sub_score(&self, dimension: Dimension) -> Option<&SubScore> {
        self.sub_scores.get(&dimension)
    }
}
