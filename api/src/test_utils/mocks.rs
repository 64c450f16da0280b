//! Mock implementations of engine seams
//!
//! These wrap the real engine so tests can count, slow down or fail
//! computations.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::app::engine::{DomainScorer, ScoringEngine};
use crate::domain::entities::{CompositeScore, DomainName, MarketContext};
use crate::error::ScoringError;

// ============================================================================
// Counting Scorer
// ============================================================================

/// Real engine behind a call counter, with optional delay and failures
#[derive(Default)]
pub struct CountingScorer {
    engine: ScoringEngine,
    calls: AtomicUsize,
    delay: Option<Duration>,
    fail_first: usize,
}

impl CountingScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block the computing thread this long on every call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail the first `n` calls with `IncompleteScore`
    pub fn failing_first(mut self, n: usize) -> Self {
        self.fail_first = n;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DomainScorer for CountingScorer {
    fn score_domain(
        &self,
        domain: &DomainName,
        context: &MarketContext,
    ) -> Result<CompositeScore, ScoringError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        if call < self.fail_first {
            return Err(ScoringError::IncompleteScore(format!(
                "simulated failure #{} for {}",
                call + 1,
                domain
            )));
        }
        self.engine.score_domain(domain, context)
    }
}
