//! Error types for the heapmap library.
//!
//! ## Key Components
//!
//! - [`HeapMapError`]: Outcome of a failed heap operation (full structure,
//!   missing key, empty structure). Always recoverable; the structure is left
//!   unchanged.
//! - [`ConfigError`]: Returned when builder parameters are invalid
//!   (e.g. a capacity with no usable slot).
//! - [`InvariantError`]: Returned by `check_invariants` when the heap property
//!   or index consistency is violated.
//!
//! ## Example Usage
//!
//! ```
//! use heapmap::HeapMap;
//! use heapmap::error::HeapMapError;
//!
//! let heap: HeapMap = HeapMap::new(2);
//! heap.insert("a".to_string(), 1).unwrap();
//!
//! // Only one usable slot
//! let err = heap.insert("b".to_string(), 1).unwrap_err();
//! assert_eq!(err, HeapMapError::HeapFull { capacity: 2 });
//! assert_eq!(heap.priority("b"), Err(HeapMapError::KeyNotFound));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// HeapMapError
// ---------------------------------------------------------------------------

/// Error returned by heap operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeapMapError {
    /// A new key was inserted while every usable slot was occupied.
    ///
    /// `capacity` is the configured array length; `capacity - 1` keys fit.
    HeapFull { capacity: usize },
    /// The key was never inserted.
    KeyNotFound,
    /// The structure holds no entries.
    Empty,
}

impl fmt::Display for HeapMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapMapError::HeapFull { capacity } => {
                write!(f, "heap full (capacity {})", capacity)
            },
            HeapMapError::KeyNotFound => f.write_str("key not in heap"),
            HeapMapError::Empty => f.write_str("heap empty"),
        }
    }
}

impl std::error::Error for HeapMapError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal heap invariants are violated.
///
/// Produced by [`IndexedMaxHeap::check_invariants`](crate::ds::IndexedMaxHeap::check_invariants)
/// and [`HeapMap::check_invariants`](crate::HeapMap::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when heap configuration parameters are invalid.
///
/// Produced by [`HeapMapBuilder::try_build`](crate::builder::HeapMapBuilder::try_build).
///
/// # Example
///
/// ```
/// use heapmap::builder::HeapMapBuilder;
///
/// let err = HeapMapBuilder::new(1).try_build::<String, i64>().unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
