//! Per-account address book.
//!
//! Each account owns a [`ContactBook`], an [`IndexedStore`](crate::collections::IndexedStore)
//! keyed by contact email.

mod model;

pub use model::{Contact, ContactBook};
