pub use crate::builder::HeapMapBuilder;
pub use crate::ds::{Entry, IndexedMaxHeap, TieBreak};
pub use crate::error::{ConfigError, HeapMapError, InvariantError};
pub use crate::heap_map::HeapMap;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{MetricsExporter, MetricsReset, MetricsSnapshotProvider};
pub use crate::traits::{Priority, PriorityIndex};
