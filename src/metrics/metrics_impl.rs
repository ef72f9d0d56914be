use std::sync::atomic::{AtomicU64, Ordering};

use crate::metrics::traits::{HeapMetricsRecorder, ReadMetricsRecorder};

/// Write-path counters, owned by the heap and only touched through `&mut`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HeapMapMetrics {
    pub insert_calls: u64,
    pub insert_new: u64,
    pub insert_updates: u64,
    pub insert_rejected: u64,
    pub pops: u64,
    pub sift_up_steps: u64,
    pub sift_down_steps: u64,
    pub top_nodes_calls: u64,
    pub top_nodes_returned: u64,
}

impl HeapMapMetrics {
    pub fn new() -> HeapMapMetrics {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl HeapMetricsRecorder for HeapMapMetrics {
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_insert_rejected(&mut self) {
        self.insert_rejected += 1;
    }

    fn record_pop(&mut self) {
        self.pops += 1;
    }

    fn record_sift_up_step(&mut self) {
        self.sift_up_steps += 1;
    }

    fn record_sift_down_step(&mut self) {
        self.sift_down_steps += 1;
    }

    fn record_top_nodes_call(&mut self) {
        self.top_nodes_calls += 1;
    }

    fn record_top_nodes_returned(&mut self, count: usize) {
        self.top_nodes_returned += count as u64;
    }
}

/// Read-path counters.
///
/// Lookups hold only the shared lock, so these are atomics rather than plain
/// fields on [`HeapMapMetrics`].
#[derive(Debug, Default)]
pub struct ReadMetrics {
    pub priority_hits: AtomicU64,
    pub priority_misses: AtomicU64,
    pub top_calls: AtomicU64,
    pub top_empty: AtomicU64,
}

impl ReadMetrics {
    pub fn new() -> ReadMetrics {
        Self::default()
    }

    pub fn reset(&self) {
        self.priority_hits.store(0, Ordering::Relaxed);
        self.priority_misses.store(0, Ordering::Relaxed);
        self.top_calls.store(0, Ordering::Relaxed);
        self.top_empty.store(0, Ordering::Relaxed);
    }
}

impl ReadMetricsRecorder for ReadMetrics {
    fn record_priority_hit(&self) {
        self.priority_hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_priority_miss(&self) {
        self.priority_misses.fetch_add(1, Ordering::Relaxed);
    }

    fn record_top_call(&self) {
        self.top_calls.fetch_add(1, Ordering::Relaxed);
    }

    fn record_top_empty(&self) {
        self.top_empty.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_metrics_count_and_reset() {
        let mut metrics = HeapMapMetrics::new();
        metrics.record_insert_call();
        metrics.record_insert_new();
        metrics.record_top_nodes_returned(3);
        metrics.record_top_nodes_returned(2);
        assert_eq!(metrics.insert_calls, 1);
        assert_eq!(metrics.insert_new, 1);
        assert_eq!(metrics.top_nodes_returned, 5);

        metrics.reset();
        assert_eq!(metrics, HeapMapMetrics::default());
    }

    #[test]
    fn read_metrics_count_through_shared_reference() {
        let metrics = ReadMetrics::new();
        let shared = &metrics;
        shared.record_priority_hit();
        shared.record_priority_hit();
        shared.record_priority_miss();
        shared.record_top_call();
        assert_eq!(metrics.priority_hits.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.priority_misses.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.top_calls.load(Ordering::Relaxed), 1);

        metrics.reset();
        assert_eq!(metrics.priority_hits.load(Ordering::Relaxed), 0);
    }
}
