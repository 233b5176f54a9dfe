//! Counters describing pricing activity.
//!
//! Useful for dashboards and for asserting cache behaviour in tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Pricing statistics shared by every clone.
///
/// All counters use relaxed atomics; they are monotonic tallies with no
/// ordering relationship to each other.
#[derive(Debug, Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug)]
struct MetricsInner {
    /// Quotes that produced a price (including free ones)
    quotes_priced: AtomicU64,
    /// Quotes waived by the threshold or the switch
    quotes_free: AtomicU64,
    /// Quotes rejected as unavailable
    quotes_unavailable: AtomicU64,
    /// Times the price table was read from storage
    price_table_builds: AtomicU64,
}

impl Metrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                quotes_priced: AtomicU64::new(0),
                quotes_free: AtomicU64::new(0),
                quotes_unavailable: AtomicU64::new(0),
                price_table_builds: AtomicU64::new(0),
            }),
        }
    }

    pub(crate) fn record_priced(&self, free: bool) {
        self.inner.quotes_priced.fetch_add(1, Ordering::Relaxed);
        if free {
            self.inner.quotes_free.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_unavailable(&self) {
        self.inner.quotes_unavailable.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_price_table_build(&self) {
        self.inner
            .price_table_builds
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Get the number of quotes answered with a price, free ones included.
    pub fn quotes_priced(&self) -> u64 {
        self.inner.quotes_priced.load(Ordering::Relaxed)
    }

    /// Get the number of quotes waived by the switch or the threshold.
    pub fn quotes_free(&self) -> u64 {
        self.inner.quotes_free.load(Ordering::Relaxed)
    }

    /// Get the number of quotes rejected as unavailable.
    pub fn quotes_unavailable(&self) -> u64 {
        self.inner.quotes_unavailable.load(Ordering::Relaxed)
    }

    /// Get the number of times the price index was built.
    pub fn price_table_builds(&self) -> u64 {
        self.inner.price_table_builds.load(Ordering::Relaxed)
    }

    /// Get a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            quotes_priced: self.quotes_priced(),
            quotes_free: self.quotes_free(),
            quotes_unavailable: self.quotes_unavailable(),
            price_table_builds: self.price_table_builds(),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.inner.quotes_priced.store(0, Ordering::Relaxed);
        self.inner.quotes_free.store(0, Ordering::Relaxed);
        self.inner.quotes_unavailable.store(0, Ordering::Relaxed);
        self.inner.price_table_builds.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub quotes_priced: u64,
    pub quotes_free: u64,
    pub quotes_unavailable: u64,
    pub price_table_builds: u64,
}

impl MetricsSnapshot {
    /// Total number of quote requests answered.
    pub fn total_quotes(&self) -> u64 {
        self.quotes_priced.saturating_add(self.quotes_unavailable)
    }

    /// Share of quote requests rejected as unavailable (0.0 to 1.0).
    pub fn unavailable_rate(&self) -> f64 {
        let total = self.total_quotes();
        if total == 0 {
            0.0
        } else {
            self.quotes_unavailable as f64 / total as f64
        }
    }
}
