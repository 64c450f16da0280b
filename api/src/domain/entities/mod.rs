//! Domain entities
//!
//! Pure value types for the scoring engine. Nothing here performs I/O.

pub mod domain_name;
pub mod features;
pub mod market_context;
pub mod record;
pub mod score;

pub use domain_name::DomainName;
pub use features::FeatureSet;
pub use market_context::MarketContext;
pub use record::{DomainRecord, PriceTier, Trend, TRENDING_FACTOR};
pub use score::{
    clamp_score, CompositeScore, Dimension, Factor, ScoreWeights, SubScore, MAX_SCORE, MIN_SCORE,
};
