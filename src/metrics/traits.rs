//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting, and export are split into small traits so the
//! heap only ever writes counters and consumers only ever read them.
//!
//! ```text
//!   ┌──────────────────────────────┐      ┌──────────────────────────────┐
//!   │     HeapMetricsRecorder      │      │       ReadMetricsRecorder    │
//!   │  (&mut, under write lock)    │      │  (&self, under read lock)    │
//!   │  insert_call/new/update      │      │  priority hit/miss           │
//!   │  insert_rejected, pop        │      │  top call/empty              │
//!   │  sift_up/down steps, top-K   │      │                              │
//!   └──────────────┬───────────────┘      └──────────────┬───────────────┘
//!                  │                                     │
//!                  └─────────────────┬───────────────────┘
//!                                    ▼
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters written by mutating heap operations.
pub trait HeapMetricsRecorder {
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_insert_rejected(&mut self);
    fn record_pop(&mut self);
    fn record_sift_up_step(&mut self);
    fn record_sift_down_step(&mut self);
    fn record_top_nodes_call(&mut self);
    fn record_top_nodes_returned(&mut self, count: usize);
}

/// Counters written by shared-access lookups.
///
/// Takes `&self` because many readers record concurrently.
pub trait ReadMetricsRecorder {
    fn record_priority_hit(&self);
    fn record_priority_miss(&self);
    fn record_top_call(&self);
    fn record_top_empty(&self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&self);
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
