//! # Heap Trait Seams
//!
//! Two small traits sit at the boundaries of the crate:
//!
//! ```text
//!   ┌────────────────────────────────────┐     ┌────────────────────────────────┐
//!   │            Priority                │     │      PriorityIndex<K, P>       │
//!   │                                    │     │                                │
//!   │  Copy + Ord                        │     │  insert(&, K, P) → Result<()>  │
//!   │  accumulate(self, delta) → Self    │     │  priority(&, &K) → Result<P>   │
//!   │                                    │     │  top(&) → Result<Entry>        │
//!   │  impl for i8..i128, u8..u128,      │     │  top_nodes(&, n) → Vec<Entry>  │
//!   │  isize, usize (wrapping)           │     │  len / is_empty / capacity     │
//!   └────────────────────────────────────┘     └────────────────────────────────┘
//!              used by IndexedMaxHeap                  implemented by HeapMap
//! ```
//!
//! [`Priority`] abstracts over the integer type that is accumulated per key.
//! [`PriorityIndex`] is the object-safe, shared-reference interface of a
//! thread-safe store, so callers can hold an `Arc<dyn PriorityIndex<K, P>>`
//! without naming the concrete type.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use heapmap::HeapMap;
//! use heapmap::traits::PriorityIndex;
//!
//! fn record_hits(index: &dyn PriorityIndex<String, u32>, term: &str) {
//!     let _ = index.insert(term.to_string(), 1);
//! }
//!
//! let index: Arc<dyn PriorityIndex<String, u32>> = Arc::new(HeapMap::<String, u32>::new(16));
//! record_hits(index.as_ref(), "rust");
//! record_hits(index.as_ref(), "rust");
//! assert_eq!(index.priority(&"rust".to_string()), Ok(2));
//! ```

use std::fmt::Debug;

use crate::ds::Entry;
use crate::error::HeapMapError;

/// Integer-like priority that can be accumulated in place.
///
/// `accumulate` must be total: it never panics. The provided integer
/// implementations use two's-complement wrapping addition, so the stored
/// value is the exact sum of every delta whenever that sum fits in the type,
/// even if a running total overflowed along the way.
pub trait Priority: Copy + Ord + Debug {
    /// Returns `self` increased by `delta` (decreased for negative deltas).
    fn accumulate(self, delta: Self) -> Self;
}

macro_rules! impl_priority_wrapping {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Priority for $ty {
                #[inline]
                fn accumulate(self, delta: Self) -> Self {
                    self.wrapping_add(delta)
                }
            }
        )*
    };
}

impl_priority_wrapping!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize
);

/// Shared-reference interface of a thread-safe key-indexed max-heap.
///
/// Every method takes `&self`; implementations synchronize internally.
pub trait PriorityIndex<K, P> {
    /// Adds `delta` to `key`'s priority, creating the key if it is new.
    ///
    /// # Errors
    ///
    /// [`HeapMapError::HeapFull`] when `key` is new and no slot is free.
    fn insert(&self, key: K, delta: P) -> Result<(), HeapMapError>;

    /// Returns the accumulated priority of `key`.
    ///
    /// # Errors
    ///
    /// [`HeapMapError::KeyNotFound`] when `key` was never inserted.
    fn priority(&self, key: &K) -> Result<P, HeapMapError>;

    /// Returns the highest-ranked entry without removing it.
    ///
    /// # Errors
    ///
    /// [`HeapMapError::Empty`] when no entries are stored.
    fn top(&self) -> Result<Entry<K, P>, HeapMapError>;

    /// Returns up to `n` entries in descending priority order.
    fn top_nodes(&self, n: usize) -> Vec<Entry<K, P>>;

    /// Returns the number of live keys.
    fn len(&self) -> usize;

    /// Returns `true` if no keys are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the configured capacity (one more than the usable key count).
    fn capacity(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulate_adds_signed_deltas() {
        assert_eq!(3i64.accumulate(2), 5);
        assert_eq!(3i64.accumulate(-5), -2);
        assert_eq!(0i32.accumulate(0), 0);
    }

    #[test]
    fn accumulate_wraps_on_overflow() {
        assert_eq!(i64::MAX.accumulate(1), i64::MIN);
        assert_eq!(i64::MIN.accumulate(-1), i64::MAX);
        assert_eq!(u8::MAX.accumulate(10), 9);
        assert_eq!(250u8.accumulate(3), 253);
    }

    #[test]
    fn accumulate_recovers_exact_sum_after_transient_overflow() {
        let total = i64::MAX.accumulate(1).accumulate(-1);
        assert_eq!(total, i64::MAX);

        // Unsigned "negative" deltas are two's-complement, i.e. wrapping_neg
        let total = 200u8.accumulate(100).accumulate(100u8.wrapping_neg());
        assert_eq!(total, 200);
    }

    #[test]
    fn priority_index_is_object_safe() {
        fn assert_object_safe(_: Option<&dyn PriorityIndex<String, i64>>) {}
        assert_object_safe(None);
    }
}
