//! Social trust graph between account addresses.
//!
//! Connections are undirected and weighted. The graph feeds a tunable spam
//! score: senders the receiver knows directly, or through mutual
//! connections, score lower than strangers.

mod graph;

pub use graph::{Peer, TrustEdge, TrustGraph, TrustNode};
