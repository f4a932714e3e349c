//! Augmenting-path search over the residual graph
//!
//! One contract, two interchangeable strategies. Breadth-first exploration
//! yields the Edmonds-Karp refinement (fewest-arc paths, O(|V|*|E|)
//! augmentations); depth-first follows the most recently discovered frontier
//! node and relies on integral capacities for termination. Both visit each
//! node at most once per search and walk a node's residual arcs in
//! construction order, so identical input always produces the identical
//! snapshot sequence.

use std::collections::{HashMap, HashSet, VecDeque};

use log::trace;
use serde::{Deserialize, Serialize};

use crate::ledger::FlowLedger;
use crate::network::{FlowNetwork, NodeId};

/// Strategy selector for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchStrategy {
    /// Fewest-arc augmenting paths (Edmonds-Karp).
    BreadthFirst,
    /// Most-recent-frontier-first exploration.
    DepthFirst,
}

impl SearchStrategy {
    pub fn name(self) -> &'static str {
        match self {
            SearchStrategy::BreadthFirst => "breadth-first",
            SearchStrategy::DepthFirst => "depth-first",
        }
    }
}

/// Shared search contract: a predecessor map over residual arcs, or `None`
/// when the sink is unreachable (the engine's termination signal).
pub trait PathSearch {
    fn find(
        &self,
        network: &FlowNetwork,
        ledger: &FlowLedger,
        source: NodeId,
        sink: NodeId,
    ) -> Option<HashMap<NodeId, NodeId>>;
}

/// Breadth-first strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirst;

/// Depth-first strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirst;

/// Residual neighbors of `node` in deterministic order: targets of outgoing
/// real edges with forward slack first, then sources of incoming real edges
/// holding cancellable flow, each group in construction order. A neighbor
/// reachable both ways appears twice; the visited set makes that harmless.
fn residual_neighbors<'a>(
    network: &'a FlowNetwork,
    ledger: &'a FlowLedger,
    node: NodeId,
) -> impl Iterator<Item = NodeId> + 'a {
    let forward = network
        .outgoing(node)
        .filter(move |edge| ledger.residual(network, node, edge.to) > 0)
        .map(|edge| edge.to);
    let reverse = network
        .incoming(node)
        .filter(move |edge| ledger.flow(network, edge.from, edge.to) > 0)
        .map(|edge| edge.from);
    forward.chain(reverse)
}

impl PathSearch for BreadthFirst {
    fn find(
        &self,
        network: &FlowNetwork,
        ledger: &FlowLedger,
        source: NodeId,
        sink: NodeId,
    ) -> Option<HashMap<NodeId, NodeId>> {
        let mut parents = HashMap::new();
        let mut visited = vec![false; network.node_count()];
        visited[source.as_usize()] = true;

        let mut queue = VecDeque::from([source]);
        while let Some(node) = queue.pop_front() {
            if node == sink {
                trace!("breadth-first search reached sink {:?}", sink);
                return Some(parents);
            }
            for neighbor in residual_neighbors(network, ledger, node) {
                if !visited[neighbor.as_usize()] {
                    visited[neighbor.as_usize()] = true;
                    parents.insert(neighbor, node);
                    queue.push_back(neighbor);
                }
            }
        }

        trace!("breadth-first search exhausted without reaching the sink");
        None
    }
}

impl PathSearch for DepthFirst {
    fn find(
        &self,
        network: &FlowNetwork,
        ledger: &FlowLedger,
        source: NodeId,
        sink: NodeId,
    ) -> Option<HashMap<NodeId, NodeId>> {
        let mut parents = HashMap::new();
        let mut visited = vec![false; network.node_count()];
        visited[source.as_usize()] = true;

        let mut stack = vec![source];
        while let Some(node) = stack.pop() {
            if node == sink {
                trace!("depth-first search reached sink {:?}", sink);
                return Some(parents);
            }
            for neighbor in residual_neighbors(network, ledger, node) {
                if !visited[neighbor.as_usize()] {
                    visited[neighbor.as_usize()] = true;
                    parents.insert(neighbor, node);
                    stack.push(neighbor);
                }
            }
        }

        trace!("depth-first search exhausted without reaching the sink");
        None
    }
}

impl PathSearch for SearchStrategy {
    fn find(
        &self,
        network: &FlowNetwork,
        ledger: &FlowLedger,
        source: NodeId,
        sink: NodeId,
    ) -> Option<HashMap<NodeId, NodeId>> {
        match self {
            SearchStrategy::BreadthFirst => BreadthFirst.find(network, ledger, source, sink),
            SearchStrategy::DepthFirst => DepthFirst.find(network, ledger, source, sink),
        }
    }
}

/// Reconstructs the source-to-sink node sequence from a predecessor map.
///
/// The visited-once discipline of both strategies guarantees the result is a
/// simple path; a repeated node would mean a broken searcher.
pub fn trace_path(
    parents: &HashMap<NodeId, NodeId>,
    source: NodeId,
    sink: NodeId,
) -> Vec<NodeId> {
    let mut path = vec![sink];
    let mut node = sink;
    while node != source {
        node = parents[&node];
        path.push(node);
    }
    path.reverse();

    debug_assert!(
        {
            let unique: HashSet<_> = path.iter().copied().collect();
            unique.len() == path.len()
        },
        "augmenting path revisits a node"
    );
    path
}

/// Every node reachable from `source` through arcs of strictly positive
/// residual capacity. The same walk the searchers perform, run exhaustively
/// with no sink; this is the S side of the minimum cut once the augment loop
/// has terminated.
pub fn residual_reachable(
    network: &FlowNetwork,
    ledger: &FlowLedger,
    source: NodeId,
) -> HashSet<NodeId> {
    let mut visited = vec![false; network.node_count()];
    visited[source.as_usize()] = true;

    let mut queue = VecDeque::from([source]);
    let mut reachable = HashSet::from([source]);
    while let Some(node) = queue.pop_front() {
        for neighbor in residual_neighbors(network, ledger, node) {
            if !visited[neighbor.as_usize()] {
                visited[neighbor.as_usize()] = true;
                reachable.insert(neighbor);
                queue.push_back(neighbor);
            }
        }
    }
    reachable
}
