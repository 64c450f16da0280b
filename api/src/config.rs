use std::env;

use crate::app::score_cache::{DEFAULT_TTL_SECS, MAX_TTL_SECS};
use crate::domain::entities::{Dimension, ScoreWeights};

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    /// Seconds a computed score stays fresh
    pub cache_ttl_secs: i64,
    /// Reject requests carrying an older market context version instead of
    /// serving the newer cached score
    pub strict_context_version: bool,
    /// JSON file seeding the market context; built-in tables when unset
    pub market_context_path: Option<String>,
    /// Composite weights; equal weights when unset
    pub score_weights: Option<ScoreWeights>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let score_weights = match env::var("SCORE_WEIGHTS") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                parse_weights(&raw)
                    .map_err(|e| anyhow::anyhow!("SCORE_WEIGHTS is invalid: {}", e))?,
            ),
            _ => None,
        };

        Ok(Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            cache_ttl_secs: parse_ttl(env::var("SCORE_CACHE_TTL_SECS").ok().as_deref()),
            strict_context_version: env::var("STRICT_CONTEXT_VERSION")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            market_context_path: env::var("MARKET_CONTEXT_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty()),
            score_weights,
        })
    }
}

/// Cache TTL in seconds. Unset, negative or garbage falls back to the
/// default; anything above [`MAX_TTL_SECS`] is capped.
pub fn parse_ttl(raw: Option<&str>) -> i64 {
    raw.and_then(|t| t.trim().parse::<i64>().ok())
        .filter(|t| *t >= 0)
        .map(|t| t.min(MAX_TTL_SECS))
        .unwrap_or(DEFAULT_TTL_SECS)
}

/// Parse `brandability=2,market=1,...`. Dimensions left out get weight 0.
pub fn parse_weights(raw: &str) -> Result<ScoreWeights, String> {
    let mut weights = ScoreWeights::new(0.0, 0.0, 0.0, 0.0);
    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected dimension=weight, got '{}'", pair))?;
        let dimension: Dimension = name.parse()?;
        let weight: f64 = value
            .trim()
            .parse()
            .map_err(|_| format!("weight for {} is not a number: '{}'", dimension, value))?;
        weights.set(dimension, weight);
    }
    if weights.normalized().is_none() {
        return Err("weights must be non-negative and not all zero".to_string());
    }
    Ok(weights)
}
