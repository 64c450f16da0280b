//! Market context
//!
//! Time-varying market data supplied by the on-chain/market collaborator.
//! The engine only ever reads it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Market tables plus the collaborator's version token.
///
/// Sorted collections keep keyword matching order (and therefore the factor
/// that wins a "first match" rule) stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MarketContext {
    /// Monotonic version token, used as the cache key discriminator
    #[serde(default)]
    pub version: u64,
    /// TLD (with leading `.`) to additive premium
    #[serde(default)]
    pub tld_premiums: BTreeMap<String, i32>,
    #[serde(default)]
    pub trending_keywords: BTreeSet<String>,
    #[serde(default)]
    pub commercial_keywords: BTreeSet<String>,
}

impl MarketContext {
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    /// Premium for a TLD, if the table knows it
    pub fn tld_premium(&self, tld: &str) -> Option<i32> {
        self.tld_premiums.get(tld).copied()
    }

    /// Lowercase keywords and make sure every TLD key carries its leading dot.
    pub fn normalized(self) -> Self {
        let tld_premiums = self
            .tld_premiums
            .into_iter()
            .map(|(tld, premium)| {
                let tld = tld.trim().to_lowercase();
                if tld.starts_with('.') {
                    (tld, premium)
                } else {
                    (format!(".{}", tld), premium)
                }
            })
            .collect();
        let lower = |set: BTreeSet<String>| {
            set.into_iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect()
        };
        Self {
            version: self.version,
            tld_premiums,
            trending_keywords: lower(self.trending_keywords),
            commercial_keywords: lower(self.commercial_keywords),
        }
    }
}
