//! Observability metrics for the rule registry.
//!
//! Counts registrations and lookups for monitoring and debugging.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics tracking registry activity.
///
/// All metrics use atomic operations for thread-safe updates and reads.
/// Clones share the same counters.
#[derive(Debug, Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug)]
struct MetricsInner {
    /// Successful registrations, overwrites included
    rules_registered: AtomicU64,
    /// Registrations that replaced an existing rule
    rules_overwritten: AtomicU64,
    /// Registrations that failed validation
    registrations_rejected: AtomicU64,
    /// Lookups that found a rule
    lookup_hits: AtomicU64,
    /// Lookups that found nothing
    lookup_misses: AtomicU64,
}

impl Metrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                rules_registered: AtomicU64::new(0),
                rules_overwritten: AtomicU64::new(0),
                registrations_rejected: AtomicU64::new(0),
                lookup_hits: AtomicU64::new(0),
                lookup_misses: AtomicU64::new(0),
            }),
        }
    }

    pub(crate) fn record_registered(&self) {
        self.inner.rules_registered.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_overwritten(&self) {
        self.inner.rules_overwritten.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected(&self) {
        self.inner
            .registrations_rejected
            .fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_lookup(&self, hit: bool) {
        if hit {
            self.inner.lookup_hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.inner.lookup_misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get the total number of successful registrations.
    pub fn rules_registered(&self) -> u64 {
        self.inner.rules_registered.load(Ordering::Relaxed)
    }

    /// Get the number of registrations that replaced an existing rule.
    pub fn rules_overwritten(&self) -> u64 {
        self.inner.rules_overwritten.load(Ordering::Relaxed)
    }

    /// Get the number of registrations that failed validation.
    pub fn registrations_rejected(&self) -> u64 {
        self.inner.registrations_rejected.load(Ordering::Relaxed)
    }

    pub fn lookup_hits(&self) -> u64 {
        self.inner.lookup_hits.load(Ordering::Relaxed)
    }

    pub fn lookup_misses(&self) -> u64 {
        self.inner.lookup_misses.load(Ordering::Relaxed)
    }

    /// Get a snapshot of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            rules_registered: self.rules_registered(),
            rules_overwritten: self.rules_overwritten(),
            registrations_rejected: self.registrations_rejected(),
            lookup_hits: self.lookup_hits(),
            lookup_misses: self.lookup_misses(),
        }
    }

    /// Reset all metrics to zero.
    ///
    /// Useful for testing or when starting a new monitoring period.
    pub fn reset(&self) {
        self.inner.rules_registered.store(0, Ordering::Relaxed);
        self.inner.rules_overwritten.store(0, Ordering::Relaxed);
        self.inner.registrations_rejected.store(0, Ordering::Relaxed);
        self.inner.lookup_hits.store(0, Ordering::Relaxed);
        self.inner.lookup_misses.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time snapshot of registry metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub rules_registered: u64,
    pub rules_overwritten: u64,
    pub registrations_rejected: u64,
    pub lookup_hits: u64,
    pub lookup_misses: u64,
}

impl MetricsSnapshot {
    /// Total lookups performed.
    pub fn total_lookups(&self) -> u64 {
        self.lookup_hits + self.lookup_misses
    }

    /// Fraction of lookups that found a rule (0.0 to 1.0).
    ///
    /// Returns 0.0 when no lookups were made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_lookups();
        if total == 0 {
            0.0
        } else {
            self.lookup_hits as f64 / total as f64
        }
    }
}
