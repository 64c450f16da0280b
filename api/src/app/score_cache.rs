//! Score cache
//!
//! Write-through cache in front of the scoring engine, keyed by domain and
//! market context version. Concurrent misses for the same key share one
//! computation through a per-key in-flight registry.
//!
//! The cache state mutex only guards map bookkeeping and is never held while
//! a score is computed or awaited.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::OnceCell;
use tokio::task::JoinHandle;

use crate::app::engine::{DomainScorer, ScoringEngine};
use crate::domain::entities::{CompositeScore, DomainName, MarketContext};
use crate::error::ScoringError;

/// Default time-to-live of a cached score
pub const DEFAULT_TTL_SECS: i64 = 300;

/// Longest accepted time-to-live (one year)
pub const MAX_TTL_SECS: i64 = 365 * 24 * 60 * 60;

type FlightResult = Result<Arc<CompositeScore>, ScoringError>;
type Flight = Arc<OnceCell<FlightResult>>;
type FlightKey = (DomainName, u64);

/// Cache behaviour settings
#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    pub ttl: Duration,
    /// Fail with `StaleContext` instead of serving the newer cached score when
    /// a request carries an older context version
    pub strict_context_version: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::seconds(DEFAULT_TTL_SECS),
            strict_context_version: false,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    version: u64,
    score: Arc<CompositeScore>,
    expires_at: DateTime<Utc>,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<DomainName, CacheEntry>,
    in_flight: HashMap<FlightKey, Flight>,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    computations: AtomicU64,
    coalesced: AtomicU64,
    invalidations: AtomicU64,
}

/// Point-in-time cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Engine invocations; at most one per key while a computation is in flight
    pub computations: u64,
    /// Misses that joined a computation already in flight
    pub coalesced: u64,
    pub invalidations: u64,
    pub entries: usize,
}

/// Cache of composite scores. The only shared mutable state in the engine.
pub struct ScoreCache<S = ScoringEngine>
where
    S: DomainScorer,
{
    scorer: Arc<S>,
    config: CacheConfig,
    state: Mutex<CacheState>,
    counters: Counters,
}

impl<S> ScoreCache<S>
where
    S: DomainScorer,
{
    pub fn new(scorer: Arc<S>) -> Self {
        Self::with_config(scorer, CacheConfig::default())
    }

    pub fn with_config(scorer: Arc<S>, config: CacheConfig) -> Self {
        Self {
            scorer,
            config,
            state: Mutex::new(CacheState::default()),
            counters: Counters::default(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        // Bookkeeping stays consistent even if a holder panicked
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached score for `(domain, context.version)`, computing and
    /// storing it on a miss.
    pub async fn get_or_compute(
        &self,
        domain: &DomainName,
        context: &MarketContext,
    ) -> Result<Arc<CompositeScore>, ScoringError> {
        let version = context.version;
        let key = (domain.clone(), version);

        let flight = {
            let mut state = self.lock();
            if let Some(score) = self.lookup(&mut state, domain, version)? {
                return Ok(score);
            }

            self.counters.misses.fetch_add(1, Ordering::Relaxed);
            match state.in_flight.get(&key) {
                Some(flight) => {
                    self.counters.coalesced.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(domain = %domain, version, "Joining in-flight computation");
                    flight.clone()
                }
                None => {
                    let flight = Flight::default();
                    state.in_flight.insert(key.clone(), flight.clone());
                    flight
                }
            }
        };

        let result = flight
            .get_or_init(|| async {
                self.counters.computations.fetch_add(1, Ordering::Relaxed);
                let result = self.scorer.score_domain(domain, context).map(Arc::new);
                match &result {
                    Ok(score) => tracing::info!(
                        domain = %domain,
                        version,
                        overall = score.overall_score,
                        "Domain scored"
                    ),
                    Err(e) => {
                        tracing::error!(domain = %domain, version, error = %e, "Scoring failed")
                    }
                }
                result
            })
            .await
            .clone();

        self.settle(&key, &flight, &result);
        result
    }

    /// Serve a live entry if it answers this request.
    fn lookup(
        &self,
        state: &mut CacheState,
        domain: &DomainName,
        version: u64,
    ) -> Result<Option<Arc<CompositeScore>>, ScoringError> {
        let Some(entry) = state.entries.get(domain) else {
            return Ok(None);
        };

        if entry.expires_at <= Utc::now() {
            tracing::debug!(domain = %domain, "Cached score expired");
            state.entries.remove(domain);
            return Ok(None);
        }

        if entry.version == version {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(domain = %domain, version, "Score cache hit");
            return Ok(Some(entry.score.clone()));
        }

        if entry.version > version {
            if self.config.strict_context_version {
                return Err(ScoringError::StaleContext {
                    requested: version,
                    current: entry.version,
                });
            }
            tracing::warn!(
                domain = %domain,
                requested = version,
                current = entry.version,
                "Stale market context; serving score from newer context"
            );
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Some(entry.score.clone()));
        }

        Ok(None)
    }

    /// Retire a finished flight and store its result if it is still wanted.
    ///
    /// Only the caller that finds its own flight registered does anything, so
    /// a flight cancelled by `invalidate` never writes an entry.
    fn settle(&self, key: &FlightKey, flight: &Flight, result: &FlightResult) {
        let mut state = self.lock();
        let registered = state
            .in_flight
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, flight));
        if !registered {
            return;
        }
        state.in_flight.remove(key);

        let Ok(score) = result else {
            return;
        };
        let (domain, version) = key;
        let newer_cached = state
            .entries
            .get(domain)
            .is_some_and(|entry| entry.version > *version);
        if newer_cached {
            return;
        }
        state.entries.insert(
            domain.clone(),
            CacheEntry {
                version: *version,
                score: score.clone(),
                expires_at: Utc::now()
                    .checked_add_signed(self.config.ttl)
                    .unwrap_or(DateTime::<Utc>::MAX_UTC),
            },
        );
    }

    /// Drop the cached score for a domain and cancel any in-flight write-back.
    ///
    /// Returns whether anything was removed.
    pub fn invalidate(&self, domain: &DomainName) -> bool {
        let mut state = self.lock();
        let removed_entry = state.entries.remove(domain).is_some();
        let flights_before = state.in_flight.len();
        state.in_flight.retain(|(d, _), _| d != domain);
        let removed = removed_entry || state.in_flight.len() != flights_before;

        self.counters.invalidations.fetch_add(1, Ordering::Relaxed);
        tracing::info!(domain = %domain, removed, "Score invalidated");
        removed
    }

    /// Drop every cached score.
    pub fn invalidate_all(&self) {
        let mut state = self.lock();
        let count = state.entries.len();
        state.entries.clear();
        state.in_flight.clear();

        self.counters.invalidations.fetch_add(1, Ordering::Relaxed);
        tracing::info!(count, "Score cache cleared");
    }

    /// Evict expired entries. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut state = self.lock();
        let before = state.entries.len();
        state.entries.retain(|_, entry| entry.expires_at > now);
        let purged = before - state.entries.len();
        if purged > 0 {
            tracing::debug!(purged, "Purged expired scores");
        }
        purged
    }

    /// Purge expired entries every `every` until the cache is dropped.
    pub fn spawn_purger(self: &Arc<Self>, every: StdDuration) -> JoinHandle<()>
    where
        S: 'static,
    {
        let cache = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let Some(cache) = cache.upgrade() else {
                    break;
                };
                cache.purge_expired();
            }
        })
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            computations: self.counters.computations.load(Ordering::Relaxed),
            coalesced: self.counters.coalesced.load(Ordering::Relaxed),
            invalidations: self.counters.invalidations.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}
