//! Container-level errors.

use thiserror::Error;

/// Errors reported by the containers in this module.
///
/// All of these are recoverable: callers decide whether an empty stack or a
/// missing key is a failure or just a normal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// The requested key or identifier is absent.
    #[error("entry not found")]
    NotFound,

    /// Pop, peek or extract on an empty container.
    #[error("container is empty")]
    EmptyContainer,

    /// Insert into a fixed-capacity container that is already full.
    #[error("capacity of {capacity} exceeded")]
    CapacityExceeded {
        /// The fixed capacity of the container.
        capacity: usize,
    },
}
