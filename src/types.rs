use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Identifier of a node. Allocated in increasing order and never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u64);

/// Identifier of an edge. Allocated independently from [`NodeId`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EdgeId(pub u64);

impl NodeId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl EdgeId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(value: u64) -> Self {
        NodeId(value)
    }
}

impl From<u64> for EdgeId {
    fn from(value: u64) -> Self {
        EdgeId(value)
    }
}

/// Adjacency of a single node, keyed by neighbor.
///
/// In an undirected graph both directions of a relation live in `outgoing`
/// and `incoming` stays empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeRecord {
    pub outgoing: BTreeMap<NodeId, EdgeId>,
    pub incoming: BTreeMap<NodeId, EdgeId>,
}

impl NodeRecord {
    pub fn degree(&self) -> usize {
        self.outgoing.len() + self.incoming.len()
    }

    pub(crate) fn clear(&mut self) {
        self.outgoing.clear();
        self.incoming.clear();
    }
}

/// Endpoints of an edge, in the orientation it was linked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: NodeId,
    pub target: NodeId,
}

impl EdgeRecord {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }

    /// Endpoints ordered as `(min, max)`, identifying the unordered pair.
    pub fn canonical(&self) -> (NodeId, NodeId) {
        canonical_pair(self.source, self.target)
    }
}

pub fn canonical_pair(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    (a.min(b), a.max(b))
}
