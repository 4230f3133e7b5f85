//! Observability metrics for call gating.
//!
//! Each throttled or debounced wrapper owns a `LimiterMetrics`. Clones of
//! the wrapper share it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counters describing what a rate-limited wrapper did with its calls.
///
/// All metrics use relaxed atomics and may be read at any time.
#[derive(Debug, Clone)]
pub struct LimiterMetrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug)]
struct MetricsInner {
    /// Every invocation of the wrapper
    calls: AtomicU64,
    /// Times the wrapped callback actually ran
    executions: AtomicU64,
    /// Calls ignored because a throttle window was open
    dropped: AtomicU64,
    /// Pending debounce executions replaced by a newer call
    superseded: AtomicU64,
    /// Pending executions removed by an explicit cancel
    cancelled: AtomicU64,
}

impl LimiterMetrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                calls: AtomicU64::new(0),
                executions: AtomicU64::new(0),
                dropped: AtomicU64::new(0),
                superseded: AtomicU64::new(0),
                cancelled: AtomicU64::new(0),
            }),
        }
    }

    pub(crate) fn record_call(&self) {
        self.inner.calls.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_execution(&self) {
        self.inner.executions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dropped(&self) {
        self.inner.dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_superseded(&self) {
        self.inner.superseded.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_cancelled(&self) {
        self.inner.cancelled.fetch_add(1, Ordering::Relaxed);
    }

    /// Total invocations of the wrapper.
    pub fn calls(&self) -> u64 {
        self.inner.calls.load(Ordering::Relaxed)
    }

    /// Times the wrapped callback ran.
    pub fn executions(&self) -> u64 {
        self.inner.executions.load(Ordering::Relaxed)
    }

    /// Calls dropped inside an open throttle window.
    pub fn dropped(&self) -> u64 {
        self.inner.dropped.load(Ordering::Relaxed)
    }

    /// Debounced calls replaced before they ran.
    pub fn superseded(&self) -> u64 {
        self.inner.superseded.load(Ordering::Relaxed)
    }

    /// Pending executions removed by `cancel`.
    pub fn cancelled(&self) -> u64 {
        self.inner.cancelled.load(Ordering::Relaxed)
    }

    /// Get a snapshot of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            calls: self.calls(),
            executions: self.executions(),
            dropped: self.dropped(),
            superseded: self.superseded(),
            cancelled: self.cancelled(),
        }
    }

    /// Reset all metrics to zero.
    pub fn reset(&self) {
        self.inner.calls.store(0, Ordering::Relaxed);
        self.inner.executions.store(0, Ordering::Relaxed);
        self.inner.dropped.store(0, Ordering::Relaxed);
        self.inner.superseded.store(0, Ordering::Relaxed);
        self.inner.cancelled.store(0, Ordering::Relaxed);
    }
}

impl Default for LimiterMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of limiter metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub calls: u64,
    pub executions: u64,
    pub dropped: u64,
    pub superseded: u64,
    pub cancelled: u64,
}

impl MetricsSnapshot {
    /// Fraction of calls that never produced an execution of their own
    /// (0.0 to 1.0). Returns 0.0 when there were no calls.
    pub fn coalescing_rate(&self) -> f64 {
        if self.calls == 0 {
            return 0.0;
        }
        let coalesced = self.dropped.saturating_add(self.superseded);
        coalesced as f64 / self.calls as f64
    }
}
