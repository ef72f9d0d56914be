pub mod entry;
pub mod indexed_heap;

pub use entry::Entry;
pub use indexed_heap::{IndexedMaxHeap, TieBreak};
