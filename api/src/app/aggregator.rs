//! Score aggregation
//!
//! Combines the four sub-scores into the composite score.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::domain::entities::{
    clamp_score, CompositeScore, Dimension, DomainName, ScoreWeights, SubScore,
};
use crate::error::ScoringError;

/// Combine sub-scores with the given weights (equal weights when `None`).
///
/// Weights are normalized proportionally before use. Every dimension must be
/// present exactly once.
pub fn aggregate(
    domain: DomainName,
    sub_scores: Vec<SubScore>,
    weights: Option<&ScoreWeights>,
    context_version: u64,
) -> Result<CompositeScore, ScoringError> {
    let weights = weights.copied().unwrap_or_default();
    let weights = weights.normalized().ok_or_else(|| {
        ScoringError::InvalidWeights(format!(
            "weights must be finite, non-negative and not all zero: {:?}",
            weights
        ))
    })?;

    let mut by_dimension = BTreeMap::new();
    for score in sub_scores {
        let dimension = score.dimension;
        if by_dimension.insert(dimension, score).is_some() {
            return Err(ScoringError::IncompleteScore(format!(
                "{} scored more than once for {}",
                dimension, domain
            )));
        }
    }

    let missing: Vec<String> = Dimension::ALL
        .iter()
        .filter(|d| !by_dimension.contains_key(d))
        .map(|d| d.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ScoringError::IncompleteScore(format!(
            "missing {} for {}",
            missing.join(", "),
            domain
        )));
    }

    let weighted: f64 = by_dimension
        .values()
        .map(|s| weights.get(s.dimension) * f64::from(s.value))
        .sum();

    Ok(CompositeScore {
        domain,
        sub_scores: by_dimension,
        overall_score: clamp_score(weighted.round() as i32),
        weights,
        context_version,
        computed_at: Utc::now(),
    })
}
