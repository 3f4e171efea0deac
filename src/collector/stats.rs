use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Point-in-time copy of a collector's delivery counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeliverySnapshot {
    pub dispatched: u64,
    pub delivered: u64,
    pub failed: u64,
    pub average_latency: Duration,
}

impl DeliverySnapshot {
    /// Sends started but not yet finished.
    pub fn in_flight(&self) -> u64 {
        self.dispatched
            .saturating_sub(self.delivered)
            .saturating_sub(self.failed)
    }
}

#[derive(Debug, Default)]
pub struct DeliveryStats {
    dispatched: AtomicU64,
    delivered: AtomicU64,
    failed: AtomicU64,
    total_latency_ms: AtomicU64,
}

impl DeliveryStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_dispatch(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delivery(&self, latency: Duration) {
        self.total_latency_ms
            .fetch_add(latency.as_millis() as u64, Ordering::Relaxed);
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> DeliverySnapshot {
        let delivered = self.delivered.load(Ordering::Relaxed);
        let total_latency_ms = self.total_latency_ms.load(Ordering::Relaxed);

        let average_latency = if delivered > 0 {
            Duration::from_millis(total_latency_ms / delivered)
        } else {
            Duration::ZERO
        };

        DeliverySnapshot {
            dispatched: self.dispatched.load(Ordering::Relaxed),
            delivered,
            failed: self.failed.load(Ordering::Relaxed),
            average_latency,
        }
    }
}
