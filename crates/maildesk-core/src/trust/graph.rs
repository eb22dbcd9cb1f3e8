//! Adjacency-list trust graph.

use serde::{Deserialize, Serialize};

use crate::collections::IndexedStore;

/// Spam score for a sender with no link at all to the receiver.
const UNCONNECTED_SCORE: u32 = 80;
/// Base score when the pair shares mutual connections.
const MUTUAL_BASE_SCORE: u32 = 50;
/// Score reduction per mutual connection.
const MUTUAL_STEP: u32 = 10;
/// Base score for directly connected pairs.
const DIRECT_BASE_SCORE: u32 = 100;
/// Score reduction per unit of connection strength.
const DIRECT_STEP: u32 = 20;

/// One adjacency entry: a neighbouring address and the connection strength.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Peer {
    /// Neighbour address.
    pub address: String,
    /// Connection strength.
    pub strength: u32,
}

/// A node in the graph, one per known account address.
#[derive(Debug, Clone, Default)]
pub struct TrustNode {
    peers: Vec<Peer>,
}

impl TrustNode {
    /// Adjacency list in insertion order.
    #[must_use]
    pub fn peers(&self) -> &[Peer] {
        &self.peers
    }

    fn find(&self, address: &str) -> Option<&Peer> {
        self.peers.iter().find(|p| p.address == address)
    }

    fn link(&mut self, address: &str, strength: u32) {
        match self.peers.iter_mut().find(|p| p.address == address) {
            Some(peer) => peer.strength = strength,
            None => self.peers.push(Peer {
                address: address.to_string(),
                strength,
            }),
        }
    }

    fn unlink(&mut self, address: &str) -> bool {
        let before = self.peers.len();
        self.peers.retain(|p| p.address != address);
        self.peers.len() != before
    }
}

/// A persisted undirected edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustEdge {
    /// One endpoint.
    pub a: String,
    /// The other endpoint.
    pub b: String,
    /// Connection strength.
    pub strength: u32,
}

impl TrustEdge {
    /// Creates an edge.
    #[must_use]
    pub fn new(a: impl Into<String>, b: impl Into<String>, strength: u32) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            strength,
        }
    }
}

/// Undirected weighted graph over account addresses.
#[derive(Debug, Clone, Default)]
pub struct TrustGraph {
    nodes: IndexedStore<String, TrustNode>,
}

impl TrustGraph {
    /// Creates an empty graph.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: IndexedStore::new(),
        }
    }

    /// Number of known addresses.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no address is known.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if `address` has a node.
    #[must_use]
    pub fn contains(&self, address: &str) -> bool {
        self.nodes.contains(&address.to_string())
    }

    /// Registers an address. Does nothing if it is already known.
    pub fn add_account(&mut self, address: &str) {
        let key = address.to_string();
        if !self.nodes.contains(&key) {
            self.nodes.insert(key, TrustNode::default());
        }
    }

    /// Connects two known addresses in both directions.
    ///
    /// Re-adding an existing connection updates its strength instead of
    /// appending a duplicate. Returns false (and changes nothing) if either
    /// endpoint is unknown or both endpoints are the same address.
    pub fn add_connection(&mut self, a: &str, b: &str, strength: u32) -> bool {
        if a == b || !self.contains(a) || !self.contains(b) {
            return false;
        }
        for (from, to) in [(a, b), (b, a)] {
            if let Ok(node) = self.nodes.search_mut(&from.to_string()) {
                node.link(to, strength);
            }
        }
        true
    }

    /// Removes the connection between two addresses on both sides.
    ///
    /// Returns true if an edge was removed.
    pub fn remove_connection(&mut self, a: &str, b: &str) -> bool {
        let mut removed = false;
        for (from, to) in [(a, b), (b, a)] {
            if let Ok(node) = self.nodes.search_mut(&from.to_string()) {
                removed |= node.unlink(to);
            }
        }
        removed
    }

    /// Adjacency list of `address`, empty if unknown.
    #[must_use]
    pub fn peers(&self, address: &str) -> &[Peer] {
        self.node(address)
            .map(TrustNode::peers)
            .unwrap_or_default()
    }

    /// Returns true if `a` lists `b` as a neighbour.
    #[must_use]
    pub fn are_connected(&self, a: &str, b: &str) -> bool {
        self.node(a).is_some_and(|n| n.find(b).is_some())
    }

    /// Strength of the connection from `a` to `b`, or 0 if not connected.
    #[must_use]
    pub fn connection_strength(&self, a: &str, b: &str) -> u32 {
        self.node(a)
            .and_then(|n| n.find(b))
            .map_or(0, |p| p.strength)
    }

    /// Neighbours shared by `a` and `b`, in `a`'s adjacency order.
    #[must_use]
    pub fn mutual_connections(&self, a: &str, b: &str) -> Vec<String> {
        let (Some(node_a), Some(node_b)) = (self.node(a), self.node(b)) else {
            return Vec::new();
        };
        node_a
            .peers
            .iter()
            .filter(|p| node_b.find(&p.address).is_some())
            .map(|p| p.address.clone())
            .collect()
    }

    /// Heuristic spam likelihood (0-100) for mail from `sender` to `receiver`.
    ///
    /// - directly connected: `100 - strength * 20`, floored at 0
    /// - sharing mutual connections: `50 - mutuals * 10`, floored at 0
    /// - otherwise: 80
    ///
    /// A strength-1 link therefore scores the same as a stranger; only
    /// repeated contact lowers the score below 80.
    ///
    /// This is a tunable scoring function, not a calibrated model.
    #[must_use]
    pub fn spam_probability(&self, sender: &str, receiver: &str) -> u8 {
        let score = if self.are_connected(sender, receiver) {
            let strength = self.connection_strength(sender, receiver);
            DIRECT_BASE_SCORE.saturating_sub(strength.saturating_mul(DIRECT_STEP))
        } else {
            let mutuals = u32::try_from(self.mutual_connections(sender, receiver).len())
                .unwrap_or(u32::MAX);
            if mutuals > 0 {
                MUTUAL_BASE_SCORE.saturating_sub(mutuals.saturating_mul(MUTUAL_STEP))
            } else {
                UNCONNECTED_SCORE
            }
        };
        u8::try_from(score.min(100)).unwrap_or(100)
    }

    /// Every undirected edge exactly once, for persistence.
    #[must_use]
    pub fn edges(&self) -> Vec<TrustEdge> {
        self.nodes
            .iter()
            .flat_map(|(address, node)| {
                node.peers
                    .iter()
                    .filter(move |p| address.as_str() < p.address.as_str())
                    .map(move |p| TrustEdge::new(address.clone(), p.address.clone(), p.strength))
            })
            .collect()
    }

    fn node(&self, address: &str) -> Option<&TrustNode> {
        self.nodes.search(&address.to_string()).ok()
    }
}
