//! Hand-built containers backing the mailbox engine.
//!
//! Provides:
//! - [`IndexedStore`] - ordered binary search tree keyed by identifier
//! - [`PriorityHeap`] / [`PriorityQueue`] - array-backed binary max-heap
//! - [`Queue`] / [`Stack`] - FIFO and LIFO sequences
//! - [`BoundedLog`] - fixed-capacity list that evicts its oldest entry

mod bounded;
mod error;
mod heap;
mod indexed_store;
mod sequence;

pub use bounded::BoundedLog;
pub use error::CollectionError;
pub use heap::{Prioritized, PriorityHeap, PriorityQueue};
pub use indexed_store::IndexedStore;
pub use sequence::{Queue, Stack};
