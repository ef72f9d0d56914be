//! Thread-safe key-indexed max-heap.
//!
//! [`HeapMap`] wraps an [`IndexedMaxHeap`] in a `parking_lot::RwLock`:
//!
//! | Operation                                   | Lock   |
//! |---------------------------------------------|--------|
//! | `insert`, `top_nodes`                       | write  |
//! | `priority`, `top`, `len`, `contains`, ...   | read   |
//!
//! `top_nodes` pops and re-pushes records, so the heap is out of order while
//! it runs; holding the write lock for the whole call keeps readers from ever
//! seeing that state. The core's sift and pop routines are private and need
//! `&mut`, which only the write guard hands out.
//!
//! ## Example
//!
//! ```
//! use std::thread;
//!
//! use heapmap::HeapMap;
//!
//! let heap: HeapMap<String, u64> = HeapMap::new(64);
//!
//! let workers: Vec<_> = (0..4)
//!     .map(|_| {
//!         let heap = heap.clone();
//!         thread::spawn(move || {
//!             for term in ["rust", "heap", "rust"] {
//!                 heap.insert(term.to_string(), 1).unwrap();
//!             }
//!         })
//!     })
//!     .collect();
//! for worker in workers {
//!     worker.join().unwrap();
//! }
//!
//! assert_eq!(heap.priority("rust"), Ok(8));
//! assert_eq!(heap.top().unwrap().to_string(), "(rust, 8)");
//! ```

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::builder::HeapMapBuilder;
use crate::ds::{Entry, IndexedMaxHeap, TieBreak};
use crate::error::{HeapMapError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::ReadMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::HeapMapMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{MetricsReset, MetricsSnapshotProvider, ReadMetricsRecorder};
use crate::traits::{Priority, PriorityIndex};

/// Fixed-capacity, key-indexed max-heap safe for concurrent use.
///
/// Cloning is cheap and yields a handle to the same heap.
///
/// # Example
///
/// ```
/// use heapmap::HeapMap;
/// use heapmap::error::HeapMapError;
///
/// let heap: HeapMap = HeapMap::new(5);
/// heap.insert("a".to_string(), 3).unwrap();
/// heap.insert("b".to_string(), 5).unwrap();
/// heap.insert("a".to_string(), 2).unwrap();
///
/// assert_eq!(heap.priority("a"), Ok(5));
/// assert_eq!(heap.top().unwrap().to_string(), "(b, 5)");
///
/// let top: Vec<String> = heap.top_nodes(2).iter().map(|e| e.to_string()).collect();
/// assert_eq!(top, ["(b, 5)", "(a, 5)"]);
///
/// heap.insert("c".to_string(), 1).unwrap();
/// heap.insert("d".to_string(), 1).unwrap();
/// assert_eq!(
///     heap.insert("e".to_string(), 1),
///     Err(HeapMapError::HeapFull { capacity: 5 })
/// );
/// ```
#[derive(Debug)]
pub struct HeapMap<K = String, P = i64> {
    inner: Arc<RwLock<IndexedMaxHeap<K, P>>>,

    /// Counters for read-lock paths (not visible to the inner heap).
    #[cfg(feature = "metrics")]
    reads: Arc<ReadMetrics>,
}

impl<K, P> Clone for HeapMap<K, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            #[cfg(feature = "metrics")]
            reads: Arc::clone(&self.reads),
        }
    }
}

impl<K, P> HeapMap<K, P>
where
    K: Eq + Hash + Clone,
    P: Priority,
{
    /// Creates an empty heap holding up to `capacity - 1` keys.
    pub fn new(capacity: usize) -> Self {
        Self::with_tie_break(capacity, TieBreak::default())
    }

    /// Creates an empty heap with an explicit tie-break rule.
    pub fn with_tie_break(capacity: usize, tie_break: TieBreak) -> Self {
        Self::from_heap(IndexedMaxHeap::with_tie_break(capacity, tie_break))
    }

    /// Wraps an existing single-threaded heap.
    pub fn from_heap(heap: IndexedMaxHeap<K, P>) -> Self {
        debug!(
            capacity = heap.capacity(),
            len = heap.len(),
            tie_break = ?heap.tie_break(),
            "heap map created"
        );
        Self {
            inner: Arc::new(RwLock::new(heap)),
            #[cfg(feature = "metrics")]
            reads: Arc::new(ReadMetrics::new()),
        }
    }

    /// Returns a builder for configuring heap parameters.
    pub fn builder(capacity: usize) -> HeapMapBuilder {
        HeapMapBuilder::new(capacity)
    }

    /// Adds `delta` to `key`'s priority, creating the key if it is new.
    ///
    /// # Errors
    ///
    /// [`HeapMapError::HeapFull`] when `key` is new and no slot is free; the
    /// heap is unchanged.
    pub fn insert(&self, key: K, delta: P) -> Result<(), HeapMapError> {
        let mut heap = self.inner.write();
        let result = heap.insert(key, delta);
        if let Err(err) = &result {
            trace!(len = heap.len(), capacity = heap.capacity(), %err, "insert rejected");
        }
        result
    }

    /// Returns the accumulated priority of `key`.
    ///
    /// # Errors
    ///
    /// [`HeapMapError::KeyNotFound`] when `key` was never inserted.
    pub fn priority<Q>(&self, key: &Q) -> Result<P, HeapMapError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let result = self.inner.read().priority(key);

        #[cfg(feature = "metrics")]
        {
            if result.is_ok() {
                self.reads.record_priority_hit();
            } else {
                self.reads.record_priority_miss();
            }
        }

        result
    }

    /// Returns a copy of the highest-ranked entry.
    ///
    /// # Errors
    ///
    /// [`HeapMapError::Empty`] when no keys are stored.
    pub fn top(&self) -> Result<Entry<K, P>, HeapMapError> {
        let result = self.inner.read().top().cloned();

        #[cfg(feature = "metrics")]
        {
            self.reads.record_top_call();
            if result.is_err() {
                self.reads.record_top_empty();
            }
        }

        result
    }

    /// Returns up to `n` entries in descending priority order.
    ///
    /// Holds the write lock for the whole call; contents are restored before
    /// it is released.
    pub fn top_nodes(&self, n: usize) -> Vec<Entry<K, P>> {
        let mut heap = self.inner.write();
        let result = heap.top_nodes(n);
        trace!(requested = n, returned = result.len(), len = heap.len(), "top nodes");
        result
    }

    /// Returns `true` if `key` has been inserted.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().contains(key)
    }

    /// Returns the number of live keys.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Returns `true` if a new key would be rejected.
    pub fn is_full(&self) -> bool {
        self.inner.read().is_full()
    }

    /// Returns the configured capacity (array length).
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Returns the maximum number of live keys, `capacity - 1`.
    pub fn max_len(&self) -> usize {
        self.inner.read().max_len()
    }

    /// Returns copies of all live entries in heap-array order.
    pub fn entries(&self) -> Vec<Entry<K, P>> {
        self.inner.read().iter().cloned().collect()
    }

    /// Validates heap order and index consistency under the read lock.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.read().check_invariants()
    }
}

impl<K, P> PriorityIndex<K, P> for HeapMap<K, P>
where
    K: Eq + Hash + Clone,
    P: Priority,
{
    fn insert(&self, key: K, delta: P) -> Result<(), HeapMapError> {
        HeapMap::insert(self, key, delta)
    }

    fn priority(&self, key: &K) -> Result<P, HeapMapError> {
        HeapMap::priority(self, key)
    }

    fn top(&self) -> Result<Entry<K, P>, HeapMapError> {
        HeapMap::top(self)
    }

    fn top_nodes(&self, n: usize) -> Vec<Entry<K, P>> {
        HeapMap::top_nodes(self, n)
    }

    fn len(&self) -> usize {
        HeapMap::len(self)
    }

    fn is_empty(&self) -> bool {
        HeapMap::is_empty(self)
    }

    fn capacity(&self) -> usize {
        HeapMap::capacity(self)
    }
}

#[cfg(feature = "metrics")]
impl<K, P> MetricsSnapshotProvider<HeapMapMetricsSnapshot> for HeapMap<K, P>
where
    K: Eq + Hash + Clone,
    P: Priority,
{
    fn snapshot(&self) -> HeapMapMetricsSnapshot {
        use std::sync::atomic::Ordering;

        let heap = self.inner.read();
        let core = heap.metrics();
        let priority_hits = self.reads.priority_hits.load(Ordering::Relaxed);
        let priority_misses = self.reads.priority_misses.load(Ordering::Relaxed);
        HeapMapMetricsSnapshot {
            insert_calls: core.insert_calls,
            insert_new: core.insert_new,
            insert_updates: core.insert_updates,
            insert_rejected: core.insert_rejected,
            pops: core.pops,
            sift_up_steps: core.sift_up_steps,
            sift_down_steps: core.sift_down_steps,
            top_nodes_calls: core.top_nodes_calls,
            top_nodes_returned: core.top_nodes_returned,
            priority_calls: priority_hits + priority_misses,
            priority_hits,
            priority_misses,
            top_calls: self.reads.top_calls.load(Ordering::Relaxed),
            top_empty: self.reads.top_empty.load(Ordering::Relaxed),
            len: heap.len(),
            capacity: heap.capacity(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, P> MetricsReset for HeapMap<K, P>
where
    K: Eq + Hash + Clone,
    P: Priority,
{
    fn reset_metrics(&self) {
        self.inner.write().reset_metrics();
        self.reads.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_map_basic_ops() {
        let heap: HeapMap = HeapMap::new(5);
        assert!(heap.is_empty());
        assert_eq!(heap.top(), Err(HeapMapError::Empty));

        heap.insert("a".to_string(), 3).unwrap();
        heap.insert("b".to_string(), 5).unwrap();
        heap.insert("a".to_string(), 2).unwrap();

        assert_eq!(heap.len(), 2);
        assert!(heap.contains("a"));
        assert_eq!(heap.priority("a"), Ok(5));
        assert_eq!(heap.priority("z"), Err(HeapMapError::KeyNotFound));
        assert_eq!(heap.top(), Ok(Entry::new("b".to_string(), 5)));
        heap.check_invariants().unwrap();
    }

    #[test]
    fn heap_map_clones_share_state() {
        let heap: HeapMap<u32, u32> = HeapMap::new(4);
        let other = heap.clone();
        other.insert(1, 10).unwrap();
        assert_eq!(heap.priority(&1), Ok(10));
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn heap_map_top_nodes_restores_contents() {
        let heap: HeapMap<u32, i64> = HeapMap::new(32);
        for key in 0..20u32 {
            heap.insert(key, i64::from(key) * 3 - 20).unwrap();
        }
        let first = heap.top_nodes(5);
        let second = heap.top_nodes(5);
        assert_eq!(first, second);
        let keys: Vec<u32> = first.iter().map(|e| *e.key()).collect();
        assert_eq!(keys, vec![19, 18, 17, 16, 15]);
        assert_eq!(heap.len(), 20);
        heap.check_invariants().unwrap();
    }

    #[test]
    fn heap_map_full_reports_capacity_and_stays_unchanged() {
        let heap: HeapMap<&str, i64> = HeapMap::new(3);
        heap.insert("a", 1).unwrap();
        heap.insert("b", 2).unwrap();
        assert!(heap.is_full());
        let before = heap.entries();

        assert_eq!(heap.insert("c", 9), Err(HeapMapError::HeapFull { capacity: 3 }));
        assert_eq!(heap.entries(), before);
        assert_eq!(heap.max_len(), 2);
    }

    #[test]
    fn heap_map_with_tie_break_oldest_first() {
        let heap: HeapMap<&str, i64> = HeapMap::with_tie_break(5, TieBreak::OldestFirst);
        heap.insert("a", 3).unwrap();
        heap.insert("b", 5).unwrap();
        heap.insert("a", 2).unwrap();
        assert_eq!(heap.top().unwrap().key(), &"a");
    }

    #[test]
    fn heap_map_through_trait_object() {
        let heap: Arc<dyn PriorityIndex<String, i64> + Send + Sync> =
            Arc::new(HeapMap::<String, i64>::new(4));
        heap.insert("k".to_string(), 2).unwrap();
        heap.insert("k".to_string(), -5).unwrap();
        assert_eq!(heap.priority(&"k".to_string()), Ok(-3));
        assert_eq!(heap.top_nodes(3).len(), 1);
        assert_eq!(heap.capacity(), 4);
        assert!(!heap.is_empty());
    }

    #[test]
    fn heap_map_from_heap_keeps_contents() {
        let mut core: IndexedMaxHeap<&str, u8> = IndexedMaxHeap::new(4);
        core.insert("seed", 3).unwrap();
        let heap = HeapMap::from_heap(core);
        assert_eq!(heap.priority("seed"), Ok(3));
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn heap_map_snapshot_combines_read_and_write_counters() {
        let heap: HeapMap<&str, i64> = HeapMap::new(3);
        let _ = heap.top();
        heap.insert("a", 1).unwrap();
        heap.insert("b", 1).unwrap();
        let _ = heap.insert("c", 1);
        let _ = heap.priority("a");
        let _ = heap.priority("c");
        let _ = heap.top();
        let _ = heap.top_nodes(10);

        let snapshot = heap.snapshot();
        assert_eq!(snapshot.insert_calls, 3);
        assert_eq!(snapshot.insert_rejected, 1);
        assert_eq!(snapshot.priority_calls, 2);
        assert_eq!(snapshot.priority_hits, 1);
        assert_eq!(snapshot.priority_misses, 1);
        assert_eq!(snapshot.top_calls, 2);
        assert_eq!(snapshot.top_empty, 1);
        assert_eq!(snapshot.top_nodes_returned, 2);
        assert_eq!(snapshot.len, 2);
        assert_eq!(snapshot.capacity, 3);

        heap.reset_metrics();
        let cleared = heap.snapshot();
        assert_eq!(cleared.insert_calls, 0);
        assert_eq!(cleared.priority_calls, 0);
        assert_eq!(cleared.len, 2);
    }
}
