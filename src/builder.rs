//! Validating builder for [`HeapMap`] and [`IndexedMaxHeap`].
//!
//! The direct constructors accept any capacity, including ones that leave no
//! usable slot. The builder is the configuration entry point for callers that
//! take capacities from user input and want those rejected up front.
//!
//! ## Example
//!
//! ```rust
//! use heapmap::builder::HeapMapBuilder;
//! use heapmap::{HeapMap, TieBreak};
//!
//! let heap: HeapMap<String, u64> = HeapMapBuilder::new(1024)
//!     .tie_break(TieBreak::OldestFirst)
//!     .build();
//! assert_eq!(heap.max_len(), 1023);
//!
//! assert!(HeapMapBuilder::new(0).try_build::<String, u64>().is_err());
//! ```

use std::hash::Hash;

use tracing::debug;

use crate::HeapMap;
use crate::ds::{IndexedMaxHeap, TieBreak};
use crate::error::ConfigError;
use crate::traits::Priority;

/// Smallest capacity with at least one usable slot.
pub const MIN_CAPACITY: usize = 2;

/// Builder for heaps with validated parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapMapBuilder {
    capacity: usize,
    tie_break: TieBreak,
}

impl HeapMapBuilder {
    /// Creates a builder for a heap of `capacity` slots (`capacity - 1` keys).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            tie_break: TieBreak::default(),
        }
    }

    /// Sets how equal priorities are ranked.
    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Builds the concurrent heap with the configured parameters.
    ///
    /// # Panics
    ///
    /// Panics if the configured capacity is invalid. For a non-panicking
    /// alternative, use [`try_build`](Self::try_build).
    pub fn build<K, P>(self) -> HeapMap<K, P>
    where
        K: Eq + Hash + Clone,
        P: Priority,
    {
        match self.try_build() {
            Ok(heap) => heap,
            Err(e) => panic!("{}", e),
        }
    }

    /// Builds the concurrent heap, returning an error on invalid parameters
    /// instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is below [`MIN_CAPACITY`].
    pub fn try_build<K, P>(self) -> Result<HeapMap<K, P>, ConfigError>
    where
        K: Eq + Hash + Clone,
        P: Priority,
    {
        self.try_build_heap().map(HeapMap::from_heap)
    }

    /// Builds the single-threaded core heap.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is below [`MIN_CAPACITY`].
    pub fn try_build_heap<K, P>(self) -> Result<IndexedMaxHeap<K, P>, ConfigError>
    where
        K: Eq + Hash + Clone,
        P: Priority,
    {
        self.validate()?;
        Ok(IndexedMaxHeap::with_tie_break(self.capacity, self.tie_break))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity < MIN_CAPACITY {
            debug!(capacity = self.capacity, "rejected heap capacity");
            return Err(ConfigError::new(format!(
                "heap capacity must be at least {} (one slot is reserved), got {}",
                MIN_CAPACITY, self.capacity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_rejects_capacities_without_a_usable_slot() {
        for capacity in [0, 1] {
            let err = HeapMapBuilder::new(capacity)
                .try_build::<String, i64>()
                .unwrap_err();
            assert!(err.message().contains("capacity"));
            assert!(err.message().contains(&capacity.to_string()));
        }
    }

    #[test]
    fn builder_accepts_minimum_capacity() {
        let heap: HeapMap<u32, i64> = HeapMapBuilder::new(MIN_CAPACITY).build();
        assert_eq!(heap.max_len(), 1);
        heap.insert(1, 1).unwrap();
        assert!(heap.insert(2, 1).is_err());
    }

    #[test]
    fn builder_applies_tie_break() {
        let heap: IndexedMaxHeap<&str, i64> = HeapMapBuilder::new(4)
            .tie_break(TieBreak::OldestFirst)
            .try_build_heap()
            .unwrap();
        assert_eq!(heap.tie_break(), TieBreak::OldestFirst);
        assert_eq!(heap.capacity(), 4);
    }

    #[test]
    #[should_panic(expected = "heap capacity must be at least 2")]
    fn builder_build_panics_on_invalid_capacity() {
        let _heap: HeapMap = HeapMapBuilder::new(0).build();
    }

    #[test]
    fn heap_map_builder_shortcut() {
        let heap: HeapMap = HeapMap::<String, i64>::builder(16).build();
        assert_eq!(heap.capacity(), 16);
    }
}
