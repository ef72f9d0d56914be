//! Fixed-capacity max-heap with direct key lookup.
//!
//! An array-backed binary max-heap whose entries can be found by key in O(1)
//! and re-prioritized in place. Priorities accumulate: inserting an existing
//! key adds the delta to its stored priority instead of replacing it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                        IndexedMaxHeap Layout                                │
//! │                                                                             │
//! │   ┌───────────────────────────────────────────────────────────────────┐    │
//! │   │  nodes: Vec<Node>   (record arena, one record per key, by NodeId) │    │
//! │   │                                                                   │    │
//! │   │    id │ key │ priority │ pos                                     │    │
//! │   │    ───┼─────┼──────────┼────                                     │    │
//! │   │     0 │ "a" │    5     │  1                                      │    │
//! │   │     1 │ "b" │    5     │  0                                      │    │
//! │   │     2 │ "c" │    1     │  2                                      │    │
//! │   └───────────────────────────────────────────────────────────────────┘    │
//! │              ▲                                  ▲                          │
//! │              │ NodeId                           │ NodeId                   │
//! │   ┌──────────┴─────────────────┐     ┌──────────┴────────────────────┐    │
//! │   │ index: FxHashMap<K, NodeId>│     │ heap: Vec<NodeId> (max-heap)  │    │
//! │   │                            │     │                               │    │
//! │   │   "a" → 0                  │     │   [1, 0, 2]                   │    │
//! │   │   "b" → 1                  │     │     b                         │    │
//! │   │   "c" → 2                  │     │    / \                        │    │
//! │   │                            │     │   a   c                       │    │
//! │   └────────────────────────────┘     └───────────────────────────────┘    │
//! │                                                                             │
//! │   capacity: 5  →  at most 4 live keys (one slot reserved)                  │
//! └─────────────────────────────────────────────────────────────────────────────┘
//!
//! Insert Flow
//! ───────────
//!   insert("a", 2) with "a" present:
//!     1. nodes[index["a"]].priority += 2     (one record, both views see it)
//!     2. sift up from nodes[..].pos if the rank rose, else sift down
//!
//!   insert("d", 7) with "d" absent:
//!     1. len == capacity - 1 → Err(HeapFull), nothing changes
//!     2. push record, register index["d"], append NodeId, sift up
//!
//! Top-K Flow
//! ──────────
//!   top_nodes(k):
//!     pop root k times (or until empty), collecting NodeIds
//!     clone the collected entries into the result
//!     push the NodeIds back in reverse order, sifting each up
//! ```
//!
//! ## Ordering
//!
//! Records are ranked by priority, then by [`TieBreak`]. Because the record id
//! is the creation order, the rank is a total order: heap shape aside,
//! [`top_nodes`](IndexedMaxHeap::top_nodes) is fully determined by the stored
//! priorities, so repeated calls with no mutation in between agree.
//!
//! ## Operations
//!
//! | Operation      | Description                              | Complexity   |
//! |----------------|------------------------------------------|--------------|
//! | `insert`       | Accumulate or create, then re-sift       | O(log n)     |
//! | `priority`     | Stored priority for key                  | O(1)         |
//! | `top`          | Highest-ranked entry                     | O(1)         |
//! | `top_nodes`    | Top `k` entries, heap restored after     | O(k log n)   |
//! | `contains`     | Key membership                           | O(1)         |
//!
//! ## Thread Safety
//!
//! `IndexedMaxHeap` is not thread-safe; mutation needs `&mut self`. Use
//! [`HeapMap`](crate::HeapMap) for shared access behind a read-write lock.
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::entry::Entry;
use crate::error::{HeapMapError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::HeapMapMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::traits::HeapMetricsRecorder;
use crate::traits::Priority;

/// Upper bound on slots reserved up front; larger heaps grow on demand.
const PREALLOC_LIMIT: usize = 1 << 16;

/// Rank of records whose priorities are equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TieBreak {
    /// The most recently created key ranks higher.
    #[default]
    NewestFirst,
    /// The earliest created key ranks higher.
    OldestFirst,
}

/// Position of a record in the arena; also its creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NodeId(usize);

#[derive(Debug)]
struct Node<K, P> {
    entry: Entry<K, P>,
    /// Current index in `heap`. Only meaningful while the record is live.
    pos: usize,
}

/// Fixed-capacity max-heap with O(1) key lookup and in-place accumulation.
///
/// # Type Parameters
///
/// - `K`: Key type (must be `Eq + Hash + Clone`)
/// - `P`: Priority type (see [`Priority`])
///
/// # Example
///
/// ```
/// use heapmap::IndexedMaxHeap;
///
/// let mut heap: IndexedMaxHeap<&str, i64> = IndexedMaxHeap::new(5);
/// heap.insert("a", 3).unwrap();
/// heap.insert("b", 5).unwrap();
/// heap.insert("a", 2).unwrap(); // accumulates: a = 5
///
/// assert_eq!(heap.priority("a"), Ok(5));
/// assert_eq!(heap.top().unwrap().to_string(), "(b, 5)");
///
/// let top: Vec<_> = heap.top_nodes(2).into_iter().map(|e| e.into_parts()).collect();
/// assert_eq!(top, vec![("b", 5), ("a", 5)]);
/// assert_eq!(heap.len(), 2);
/// ```
#[derive(Debug)]
pub struct IndexedMaxHeap<K, P> {
    nodes: Vec<Node<K, P>>,
    heap: Vec<NodeId>,
    index: FxHashMap<K, NodeId>,
    capacity: usize,
    tie_break: TieBreak,
    #[cfg(feature = "metrics")]
    metrics: HeapMapMetrics,
}

impl<K, P> IndexedMaxHeap<K, P>
where
    K: Eq + Hash + Clone,
    P: Priority,
{
    /// Creates an empty heap holding up to `capacity - 1` keys.
    ///
    /// Capacities 0 and 1 are accepted; such a heap rejects every new key.
    ///
    /// # Example
    ///
    /// ```
    /// use heapmap::IndexedMaxHeap;
    ///
    /// let heap: IndexedMaxHeap<String, i64> = IndexedMaxHeap::new(8);
    /// assert_eq!(heap.capacity(), 8);
    /// assert_eq!(heap.max_len(), 7);
    /// assert!(heap.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self::with_tie_break(capacity, TieBreak::default())
    }

    /// Creates an empty heap with an explicit tie-break rule.
    ///
    /// # Example
    ///
    /// ```
    /// use heapmap::{IndexedMaxHeap, TieBreak};
    ///
    /// let mut heap: IndexedMaxHeap<&str, i64> =
    ///     IndexedMaxHeap::with_tie_break(4, TieBreak::OldestFirst);
    /// heap.insert("first", 1).unwrap();
    /// heap.insert("second", 1).unwrap();
    /// assert_eq!(heap.top().unwrap().key(), &"first");
    /// ```
    pub fn with_tie_break(capacity: usize, tie_break: TieBreak) -> Self {
        let slots = capacity.saturating_sub(1).min(PREALLOC_LIMIT);
        Self {
            nodes: Vec::with_capacity(slots),
            heap: Vec::with_capacity(slots),
            index: FxHashMap::with_capacity_and_hasher(slots, Default::default()),
            capacity,
            tie_break,
            #[cfg(feature = "metrics")]
            metrics: HeapMapMetrics::default(),
        }
    }

    /// Returns the configured capacity (array length).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the maximum number of live keys, `capacity - 1`.
    pub fn max_len(&self) -> usize {
        self.capacity.saturating_sub(1)
    }

    /// Returns the number of live keys.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns `true` if a new key would be rejected.
    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.max_len()
    }

    /// Returns the configured tie-break rule.
    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Returns `true` if `key` has been inserted.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Adds `delta` to `key`'s priority, creating the key if it is new.
    ///
    /// An existing key keeps its identity; its priority accumulates
    /// (wrapping) and it moves up or down to restore heap order. A new key
    /// starts at `delta`.
    ///
    /// # Errors
    ///
    /// [`HeapMapError::HeapFull`] when `key` is new and `len() == max_len()`.
    /// The heap is unchanged in that case.
    ///
    /// # Example
    ///
    /// ```
    /// use heapmap::IndexedMaxHeap;
    /// use heapmap::error::HeapMapError;
    ///
    /// let mut heap: IndexedMaxHeap<&str, i64> = IndexedMaxHeap::new(3);
    /// heap.insert("a", 1).unwrap();
    /// heap.insert("b", 1).unwrap();
    ///
    /// // Existing keys still accumulate when full
    /// heap.insert("a", 10).unwrap();
    /// assert_eq!(heap.priority("a"), Ok(11));
    ///
    /// assert_eq!(heap.insert("c", 1), Err(HeapMapError::HeapFull { capacity: 3 }));
    /// assert_eq!(heap.len(), 2);
    /// ```
    pub fn insert(&mut self, key: K, delta: P) -> Result<(), HeapMapError> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let node = &mut self.nodes[id.0];
            let before = node.entry.priority;
            let after = before.accumulate(delta);
            node.entry.priority = after;
            let pos = node.pos;
            match after.cmp(&before) {
                Ordering::Greater => self.sift_up(pos),
                Ordering::Less => self.sift_down(pos, self.heap.len()),
                Ordering::Equal => {},
            }
            return Ok(());
        }

        if self.is_full() {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_rejected();
            return Err(HeapMapError::HeapFull {
                capacity: self.capacity,
            });
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            entry: Entry::new(key.clone(), delta),
            pos: 0,
        });
        self.index.insert(key, id);
        self.push_node(id);
        Ok(())
    }

    /// Returns the accumulated priority of `key`.
    ///
    /// # Errors
    ///
    /// [`HeapMapError::KeyNotFound`] when `key` was never inserted.
    ///
    /// # Example
    ///
    /// ```
    /// use heapmap::IndexedMaxHeap;
    /// use heapmap::error::HeapMapError;
    ///
    /// let mut heap: IndexedMaxHeap<String, i64> = IndexedMaxHeap::new(4);
    /// heap.insert("task".to_string(), 5).unwrap();
    ///
    /// assert_eq!(heap.priority("task"), Ok(5));
    /// assert_eq!(heap.priority("missing"), Err(HeapMapError::KeyNotFound));
    /// ```
    pub fn priority<Q>(&self, key: &Q) -> Result<P, HeapMapError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index
            .get(key)
            .map(|id| self.nodes[id.0].entry.priority)
            .ok_or(HeapMapError::KeyNotFound)
    }

    /// Returns the highest-ranked entry without removing it.
    ///
    /// # Errors
    ///
    /// [`HeapMapError::Empty`] when the heap holds no keys.
    pub fn top(&self) -> Result<&Entry<K, P>, HeapMapError> {
        self.heap
            .first()
            .map(|id| &self.nodes[id.0].entry)
            .ok_or(HeapMapError::Empty)
    }

    /// Returns up to `n` entries in descending rank order.
    ///
    /// The heap is popped `n` times and the popped records are pushed back
    /// before returning, so contents and `len()` are unchanged. Fewer than `n`
    /// live keys yields a shorter result.
    ///
    /// # Example
    ///
    /// ```
    /// use heapmap::IndexedMaxHeap;
    ///
    /// let mut heap: IndexedMaxHeap<&str, u32> = IndexedMaxHeap::new(10);
    /// heap.insert("low", 1).unwrap();
    /// heap.insert("high", 9).unwrap();
    /// heap.insert("mid", 4).unwrap();
    ///
    /// let keys: Vec<_> = heap.top_nodes(5).iter().map(|e| *e.key()).collect();
    /// assert_eq!(keys, vec!["high", "mid", "low"]);
    /// assert_eq!(heap.len(), 3);
    /// ```
    pub fn top_nodes(&mut self, n: usize) -> Vec<Entry<K, P>> {
        #[cfg(feature = "metrics")]
        self.metrics.record_top_nodes_call();

        let mut popped = Vec::with_capacity(n.min(self.heap.len()));
        while popped.len() < n {
            match self.pop_node() {
                Ok(id) => popped.push(id),
                Err(_) => break,
            }
        }

        let result: Vec<Entry<K, P>> = popped
            .iter()
            .map(|id| self.nodes[id.0].entry.clone())
            .collect();

        for &id in popped.iter().rev() {
            self.push_node(id);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_top_nodes_returned(result.len());

        result
    }

    /// Iterates live entries in heap-array order.
    ///
    /// Only the root position is meaningful; the rest follows heap shape.
    pub fn iter(&self) -> impl Iterator<Item = &Entry<K, P>> + '_ {
        self.heap.iter().map(|id| &self.nodes[id.0].entry)
    }

    /// Validates heap order, stored positions, and index consistency.
    ///
    /// # Errors
    ///
    /// Returns an [`InvariantError`] describing the first violation found.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.heap.len() > self.max_len() {
            return Err(InvariantError::new(format!(
                "len {} exceeds max_len {}",
                self.heap.len(),
                self.max_len()
            )));
        }
        if self.index.len() != self.heap.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but heap holds {}",
                self.index.len(),
                self.heap.len()
            )));
        }
        if self.nodes.len() != self.index.len() {
            return Err(InvariantError::new(format!(
                "arena holds {} records but index holds {} keys",
                self.nodes.len(),
                self.index.len()
            )));
        }

        for (pos, &id) in self.heap.iter().enumerate() {
            let node = self
                .nodes
                .get(id.0)
                .ok_or_else(|| InvariantError::new(format!("heap slot {} is dangling", pos)))?;
            if node.pos != pos {
                return Err(InvariantError::new(format!(
                    "record {} stores position {} but sits at {}",
                    id.0, node.pos, pos
                )));
            }
            if self.index.get(&node.entry.key) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "index does not map record {} back to itself",
                    id.0
                )));
            }
            if pos > 0 {
                let parent = self.heap[(pos - 1) / 2];
                if self.outranks(id, parent) {
                    return Err(InvariantError::new(format!(
                        "record at {} outranks its parent at {}",
                        pos,
                        (pos - 1) / 2
                    )));
                }
            }
        }
        Ok(())
    }

    #[cfg(feature = "metrics")]
    /// Returns the in-place counters recorded by mutating operations.
    pub fn metrics(&self) -> &HeapMapMetrics {
        &self.metrics
    }

    #[cfg(feature = "metrics")]
    pub(crate) fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// `true` when record `a` must sit above record `b`.
    fn outranks(&self, a: NodeId, b: NodeId) -> bool {
        let pa = self.nodes[a.0].entry.priority;
        let pb = self.nodes[b.0].entry.priority;
        match pa.cmp(&pb) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => match self.tie_break {
                TieBreak::NewestFirst => a.0 > b.0,
                TieBreak::OldestFirst => a.0 < b.0,
            },
        }
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.nodes[self.heap[i].0].pos = i;
        self.nodes[self.heap[j].0].pos = j;
    }

    fn push_node(&mut self, id: NodeId) {
        let pos = self.heap.len();
        self.heap.push(id);
        self.nodes[id.0].pos = pos;
        self.sift_up(pos);
    }

    fn pop_node(&mut self) -> Result<NodeId, HeapMapError> {
        if self.heap.is_empty() {
            return Err(HeapMapError::Empty);
        }
        #[cfg(feature = "metrics")]
        self.metrics.record_pop();

        let top = self.heap.swap_remove(0);
        if let Some(&moved) = self.heap.first() {
            self.nodes[moved.0].pos = 0;
            self.sift_down(0, self.heap.len());
        }
        Ok(top)
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.outranks(self.heap[pos], self.heap[parent]) {
                break;
            }
            #[cfg(feature = "metrics")]
            self.metrics.record_sift_up_step();
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize, boundary: usize) {
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            // Right child wins unless the left strictly outranks it.
            let child = if right < boundary {
                if self.outranks(self.heap[left], self.heap[right]) {
                    left
                } else {
                    right
                }
            } else if left < boundary {
                left
            } else {
                break;
            };
            if !self.outranks(self.heap[child], self.heap[pos]) {
                break;
            }
            #[cfg(feature = "metrics")]
            self.metrics.record_sift_down_step();
            self.swap(pos, child);
            pos = child;
        }
    }
}
