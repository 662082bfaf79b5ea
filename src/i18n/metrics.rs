//! Translation lookup metrics.
//!
//! Counts how often `t()` hit the requested locale directly, had to walk the
//! fallback chain, or found nothing and returned the raw key.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

/// Lookup counters. Each `Translator` owns one; the global translator
/// records into `TranslationMetrics::global()`.
pub struct TranslationMetrics {
    /// Number of lookups performed
    lookups: AtomicUsize,

    /// Number of lookups resolved in the requested locale
    exact_hits: AtomicUsize,

    /// Number of lookups resolved further down the fallback chain
    fallback_hits: AtomicUsize,

    /// Number of lookups that degraded to the raw key
    misses: AtomicUsize,
}

/// Global metrics instance (initialized lazily)
static METRICS: OnceLock<Arc<TranslationMetrics>> = OnceLock::new();

impl TranslationMetrics {
    pub fn new() -> Self {
        Self {
            lookups: AtomicUsize::new(0),
            exact_hits: AtomicUsize::new(0),
            fallback_hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Get the global translation metrics instance.
    pub fn global() -> &'static TranslationMetrics {
        Self::global_handle()
    }

    /// Shared handle to the global instance, for attaching to a translator.
    pub fn global_handle() -> &'static Arc<TranslationMetrics> {
        METRICS.get_or_init(|| Arc::new(TranslationMetrics::new()))
    }

    pub fn record_exact_hit(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.exact_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback_hit(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.fallback_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    pub fn exact_hits(&self) -> usize {
        self.exact_hits.load(Ordering::Relaxed)
    }

    pub fn fallback_hits(&self) -> usize {
        self.fallback_hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let lookups = self.lookups();
        let exact_hits = self.exact_hits();
        let fallback_hits = self.fallback_hits();
        let misses = self.misses();

        let rate = |count: usize| {
            if lookups > 0 {
                (count as f64 / lookups as f64) * 100.0
            } else {
                0.0
            }
        };

        MetricsReport {
            lookups,
            exact_hits,
            fallback_hits,
            misses,
            exact_hit_rate: rate(exact_hits),
            miss_rate: rate(misses),
        }
    }

    /// Reset all metrics to zero.
    pub fn reset(&self) {
        self.lookups.store(0, Ordering::Relaxed);
        self.exact_hits.store(0, Ordering::Relaxed);
        self.fallback_hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

impl Default for TranslationMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of the translation counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub lookups: usize,
    pub exact_hits: usize,
    pub fallback_hits: usize,
    pub misses: usize,

    /// Exact hit rate as a percentage (0-100)
    pub exact_hit_rate: f64,

    /// Miss rate as a percentage (0-100)
    pub miss_rate: f64,
}
