//! Flow bookkeeping separated from capacities
//!
//! The ledger records net flow per real edge and answers residual-capacity
//! queries derived from it. Keeping flows apart from the network's capacities
//! is what makes anti-parallel real edges well defined: pushing along (u, v)
//! first cancels flow already on the real edge (v, u) before creating forward
//! flow, so the per-edge bound `0 <= flow <= capacity` always holds and no
//! synthetic reverse edge ever aliases a real one.

use serde::{Deserialize, Serialize};

use crate::network::{Capacity, FlowNetwork, NodeId};

/// Flow on one real edge, reported in edge construction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEntry {
    pub from: NodeId,
    pub to: NodeId,
    pub capacity: Capacity,
    pub flow: u64,
}

/// Mutable net-flow state for one in-flight computation.
///
/// Exclusively owned by a single solver run; the network it was created
/// against must be the one passed to every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowLedger {
    /// Net flow per real edge, parallel to `FlowNetwork::edges`.
    flows: Vec<u64>,
    total: u64,
}

impl FlowLedger {
    /// Fresh ledger with every flow at zero.
    pub fn new(network: &FlowNetwork) -> Self {
        Self {
            flows: vec![0; network.edge_count()],
            total: 0,
        }
    }

    /// Net flow currently on the real edge (from, to); zero if no such edge.
    pub fn flow(&self, network: &FlowNetwork, from: NodeId, to: NodeId) -> u64 {
        network
            .edge_index(from, to)
            .map_or(0, |index| self.flows[index])
    }

    /// Total network flow accumulated by `push` calls so far.
    #[inline]
    pub fn total_flow(&self) -> u64 {
        self.total
    }

    /// Residual capacity of the directed arc (from, to).
    ///
    /// Forward slack of a real (from, to) edge plus the cancellable flow on
    /// a real (to, from) edge, when either exists.
    pub fn residual(&self, network: &FlowNetwork, from: NodeId, to: NodeId) -> u64 {
        let forward = network
            .edge_index(from, to)
            .map_or(0, |index| network.edge(index).capacity - self.flows[index]);
        let cancellable = self.flow(network, to, from);
        forward + cancellable
    }

    /// Applies `amount` of flow along every arc of `path` (a node sequence
    /// from source to sink) and grows the total by `amount`.
    ///
    /// `amount` must not exceed the residual capacity of any arc on the
    /// path; a violation means the caller computed the bottleneck wrong and
    /// is a programming error, not a recoverable condition.
    pub fn push(&mut self, network: &FlowNetwork, path: &[NodeId], amount: u64) {
        assert!(amount > 0, "push amount must be positive");

        for arc in path.windows(2) {
            let (from, to) = (arc[0], arc[1]);
            assert!(
                amount <= self.residual(network, from, to),
                "push of {amount} exceeds residual capacity on arc {from:?} -> {to:?}",
            );

            // Cancel opposing flow first so the forward edge never exceeds
            // its capacity.
            let mut remaining = amount;
            if let Some(reverse) = network.edge_index(to, from) {
                let cancelled = remaining.min(self.flows[reverse]);
                self.flows[reverse] -= cancelled;
                remaining -= cancelled;
            }
            if remaining > 0 {
                let forward = network
                    .edge_index(from, to)
                    .expect("residual check guarantees a forward edge here");
                self.flows[forward] += remaining;
                debug_assert!(self.flows[forward] <= network.edge(forward).capacity);
            }
        }

        self.total += amount;
    }

    /// Sum of flow on real edges into `node`.
    pub fn inflow(&self, network: &FlowNetwork, node: NodeId) -> u64 {
        network
            .incoming(node)
            .map(|edge| self.flow(network, edge.from, edge.to))
            .sum()
    }

    /// Sum of flow on real edges out of `node`.
    pub fn outflow(&self, network: &FlowNetwork, node: NodeId) -> u64 {
        network
            .outgoing(node)
            .map(|edge| self.flow(network, edge.from, edge.to))
            .sum()
    }

    /// Per-edge flow values in edge construction order, for snapshots and
    /// renderers.
    pub fn entries(&self, network: &FlowNetwork) -> Vec<FlowEntry> {
        network
            .edges()
            .iter()
            .enumerate()
            .map(|(index, edge)| FlowEntry {
                from: edge.from,
                to: edge.to,
                capacity: edge.capacity,
                flow: self.flows[index],
            })
            .collect()
    }
}
