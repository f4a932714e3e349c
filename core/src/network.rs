//! Immutable capacitated network representation
//!
//! This module implements the directed flow network consumed by every
//! downstream component. Node labels are interned into dense identifiers at
//! construction time, adjacency is recorded in construction order to keep
//! traversal deterministic, and the network is immutable once built.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dense node identifier assigned in construction order.
///
/// Prevents accidental mixing with other numeric types; the label it stands
/// for is recoverable through [`FlowNetwork::label`].
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

/// Non-negative integral edge capacity.
pub type Capacity = u64;

/// Network construction errors with the offending labels attached.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NetworkError {
    #[error("duplicate node label `{0}`")]
    DuplicateNode(String),

    #[error("duplicate edge `{from}-{to}`")]
    DuplicateEdge { from: String, to: String },

    #[error("edge `{from}-{to}` references unknown node `{unknown}`")]
    UnknownNode {
        from: String,
        to: String,
        unknown: String,
    },

    #[error("edge `{from}-{to}` has negative capacity {capacity}")]
    NegativeCapacity {
        from: String,
        to: String,
        capacity: i64,
    },

    #[error("node list is empty")]
    EmptyNodeList,
}

/// Edge description handed to [`FlowNetwork::build`].
///
/// Capacity is signed here so that negative inputs are rejected with a
/// diagnostic instead of failing at the parse boundary only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    pub capacity: i64,
}

impl EdgeSpec {
    pub fn new(from: impl Into<String>, to: impl Into<String>, capacity: i64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            capacity,
        }
    }
}

/// Resolved directed edge with validated capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub capacity: Capacity,
}

/// Immutable directed capacitated graph.
///
/// # Invariants
/// - Every edge endpoint is a member of the node set.
/// - At most one edge exists per ordered node pair; the reverse pair may
///   exist independently with its own capacity.
/// - Edge and adjacency order is construction order, so repeated runs over
///   identical input visit arcs identically.
#[derive(Debug, Clone)]
pub struct FlowNetwork {
    labels: Vec<String>,
    index: HashMap<String, NodeId>,
    edges: Vec<Edge>,
    /// Outgoing edge indices per node, construction order.
    outgoing: Vec<Vec<usize>>,
    /// Incoming edge indices per node, construction order. Needed by the
    /// residual walk: positive flow on a real edge opens a reverse arc.
    incoming: Vec<Vec<usize>>,
    lookup: HashMap<(NodeId, NodeId), usize>,
}

impl FlowNetwork {
    /// Builds a validated network from ordered labels and edge descriptions.
    ///
    /// Fails on duplicate labels, duplicate ordered pairs, unknown endpoint
    /// labels, and negative capacities. The successful value is immutable.
    pub fn build(
        labels: impl IntoIterator<Item = String>,
        edges: impl IntoIterator<Item = EdgeSpec>,
    ) -> Result<Self, NetworkError> {
        let labels: Vec<String> = labels.into_iter().collect();
        if labels.is_empty() {
            return Err(NetworkError::EmptyNodeList);
        }

        let mut index = HashMap::with_capacity(labels.len());
        for (position, label) in labels.iter().enumerate() {
            if index.insert(label.clone(), NodeId(position)).is_some() {
                return Err(NetworkError::DuplicateNode(label.clone()));
            }
        }

        let mut resolved = Vec::new();
        let mut outgoing = vec![Vec::new(); labels.len()];
        let mut incoming = vec![Vec::new(); labels.len()];
        let mut lookup = HashMap::new();

        for spec in edges {
            let resolve = |label: &str| {
                index
                    .get(label)
                    .copied()
                    .ok_or_else(|| NetworkError::UnknownNode {
                        from: spec.from.clone(),
                        to: spec.to.clone(),
                        unknown: label.to_owned(),
                    })
            };
            let from = resolve(&spec.from)?;
            let to = resolve(&spec.to)?;

            if spec.capacity < 0 {
                return Err(NetworkError::NegativeCapacity {
                    from: spec.from,
                    to: spec.to,
                    capacity: spec.capacity,
                });
            }

            let edge_index = resolved.len();
            if lookup.insert((from, to), edge_index).is_some() {
                return Err(NetworkError::DuplicateEdge {
                    from: spec.from,
                    to: spec.to,
                });
            }

            resolved.push(Edge {
                from,
                to,
                capacity: spec.capacity as Capacity,
            });
            outgoing[from.as_usize()].push(edge_index);
            incoming[to.as_usize()].push(edge_index);
        }

        Ok(Self {
            labels,
            index,
            edges: resolved,
            outgoing,
            incoming,
            lookup,
        })
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Resolves a label to its identifier, if present.
    pub fn node_id(&self, label: &str) -> Option<NodeId> {
        self.index.get(label).copied()
    }

    /// Label of a node known to belong to this network.
    #[inline]
    pub fn label(&self, node: NodeId) -> &str {
        &self.labels[node.as_usize()]
    }

    /// All node identifiers in construction order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.labels.len()).map(NodeId)
    }

    /// All edges in construction order.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn edge(&self, index: usize) -> &Edge {
        &self.edges[index]
    }

    /// Index of the real edge on the ordered pair, if one exists.
    #[inline]
    pub fn edge_index(&self, from: NodeId, to: NodeId) -> Option<usize> {
        self.lookup.get(&(from, to)).copied()
    }

    /// Capacity of the real edge on the ordered pair, if one exists.
    pub fn capacity(&self, from: NodeId, to: NodeId) -> Option<Capacity> {
        self.edge_index(from, to).map(|i| self.edges[i].capacity)
    }

    /// Outgoing real edges of a node, construction order.
    pub fn outgoing(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.outgoing[node.as_usize()].iter().map(|&i| &self.edges[i])
    }

    /// Incoming real edges of a node, construction order.
    pub fn incoming(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.incoming[node.as_usize()].iter().map(|&i| &self.edges[i])
    }
}
