//! heapmap: fixed-capacity, key-indexed max-heap with concurrent top-K queries.
//!
//! - [`IndexedMaxHeap`]: single-threaded core (array heap + key index).
//! - [`HeapMap`]: the core behind a read-write lock, shareable across threads.
//! - [`builder::HeapMapBuilder`]: validated configuration.

pub mod builder;
pub mod ds;
pub mod error;
pub mod heap_map;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;

pub use crate::ds::{Entry, IndexedMaxHeap, TieBreak};
pub use crate::error::HeapMapError;
pub use crate::heap_map::HeapMap;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::HeapMapMetricsSnapshot;
