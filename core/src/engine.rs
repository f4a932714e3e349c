//! Maximum-flow engine and minimum-cut extraction
//!
//! The solver owns one ledger and one snapshot log per run: search the
//! residual graph, push the bottleneck along the discovered path, append a
//! snapshot, repeat until no augmenting path remains, then extract the
//! minimum cut from the terminal residual state. All arithmetic is exact
//! integer arithmetic; given a fixed strategy and input order the entire
//! outcome is deterministic.

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ledger::FlowLedger;
use crate::network::{Capacity, FlowNetwork, NodeId};
use crate::search::{residual_reachable, trace_path, PathSearch, SearchStrategy};
use crate::snapshot::{Snapshot, SnapshotLog};

/// Endpoint validation errors raised before any computation starts.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("source and sink must be distinct, both are `{0}`")]
    IdenticalEndpoints(String),

    #[error("{role} node `{label}` is not present in the network")]
    UnknownEndpoint { role: &'static str, label: String },
}

/// One edge of the minimum cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub capacity: Capacity,
}

/// Minimum cut of the network under the terminal ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinCut {
    /// Nodes residually reachable from the source, ascending by id.
    pub source_side: Vec<NodeId>,
    /// Real edges crossing from the source side out, construction order.
    pub edges: Vec<CutEdge>,
    /// Total capacity of the crossing edges; equals the maximum flow.
    pub capacity: Capacity,
}

/// Everything one `run` produces, handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowOutcome {
    pub total_flow: u64,
    pub log: SnapshotLog,
    pub ledger: FlowLedger,
    pub min_cut: MinCut,
}

/// Augmenting-path maximum-flow solver.
///
/// The strategy only decides which of the currently valid augmenting paths
/// is found at each step; `total_flow` and the min-cut value are the same
/// for every strategy.
#[derive(Debug, Clone, Copy)]
pub struct FlowSolver {
    strategy: SearchStrategy,
}

impl FlowSolver {
    pub fn new(strategy: SearchStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    /// Runs the augment loop to completion.
    ///
    /// Terminates for every valid finite network: each augmentation raises
    /// the total by at least 1, and the total is bounded by the sum of
    /// source-outgoing capacities.
    pub fn run(
        &self,
        network: &FlowNetwork,
        source: &str,
        sink: &str,
    ) -> Result<FlowOutcome, FlowError> {
        let source_id = resolve_endpoint(network, "source", source)?;
        let sink_id = resolve_endpoint(network, "sink", sink)?;
        if source_id == sink_id {
            return Err(FlowError::IdenticalEndpoints(source.to_owned()));
        }

        let mut ledger = FlowLedger::new(network);
        let mut log = SnapshotLog::new();

        while let Some(parents) = self.strategy.find(network, &ledger, source_id, sink_id) {
            let path = trace_path(&parents, source_id, sink_id);
            let arcs: Vec<(NodeId, NodeId)> =
                path.windows(2).map(|arc| (arc[0], arc[1])).collect();
            let bottleneck = arcs
                .iter()
                .map(|&(from, to)| ledger.residual(network, from, to))
                .min()
                .unwrap_or(0);
            debug_assert!(bottleneck > 0, "search returned a saturated path");

            ledger.push(network, &path, bottleneck);

            let step = log.len() + 1;
            debug!(
                "step {step} ({}): pushed {bottleneck} along {:?}, total {}",
                self.strategy.name(),
                path.iter().map(|&n| network.label(n)).collect::<Vec<_>>(),
                ledger.total_flow(),
            );
            log.append(Snapshot {
                step,
                path,
                arcs,
                bottleneck,
                flows: ledger.entries(network),
            });
        }

        let min_cut = extract_min_cut(network, &ledger, source_id);
        debug_assert_eq!(
            min_cut.capacity,
            ledger.total_flow(),
            "max-flow/min-cut equality violated"
        );
        debug!(
            "terminated after {} steps: total flow {}, cut of {} edge(s)",
            log.len(),
            ledger.total_flow(),
            min_cut.edges.len(),
        );

        Ok(FlowOutcome {
            total_flow: ledger.total_flow(),
            log,
            ledger,
            min_cut,
        })
    }
}

fn resolve_endpoint(
    network: &FlowNetwork,
    role: &'static str,
    label: &str,
) -> Result<NodeId, FlowError> {
    network
        .node_id(label)
        .ok_or_else(|| FlowError::UnknownEndpoint {
            role,
            label: label.to_owned(),
        })
}

/// Computes the minimum cut from a terminal residual state.
///
/// S is every node residually reachable from the source; the cut is every
/// real edge leaving S. By max-flow/min-cut duality the crossing capacities
/// sum exactly to the flow the engine accumulated.
pub fn extract_min_cut(network: &FlowNetwork, ledger: &FlowLedger, source: NodeId) -> MinCut {
    let reachable = residual_reachable(network, ledger, source);

    let mut source_side: Vec<NodeId> = reachable.iter().copied().collect();
    source_side.sort_unstable();

    let edges: Vec<CutEdge> = network
        .edges()
        .iter()
        .filter(|edge| reachable.contains(&edge.from) && !reachable.contains(&edge.to))
        .map(|edge| CutEdge {
            from: edge.from,
            to: edge.to,
            capacity: edge.capacity,
        })
        .collect();
    let capacity = edges.iter().map(|edge| edge.capacity).sum();

    MinCut {
        source_side,
        edges,
        capacity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::EdgeSpec;

    fn network(labels: &[&str], edges: Vec<EdgeSpec>) -> FlowNetwork {
        FlowNetwork::build(labels.iter().map(|s| s.to_string()), edges).unwrap()
    }

    #[test]
    fn rejects_identical_endpoints() {
        let net = network(&["A", "B"], vec![EdgeSpec::new("A", "B", 1)]);
        let err = FlowSolver::new(SearchStrategy::BreadthFirst)
            .run(&net, "A", "A")
            .unwrap_err();
        assert_eq!(err, FlowError::IdenticalEndpoints("A".into()));
    }

    #[test]
    fn rejects_unknown_endpoint() {
        let net = network(&["A", "B"], vec![EdgeSpec::new("A", "B", 1)]);
        let err = FlowSolver::new(SearchStrategy::BreadthFirst)
            .run(&net, "A", "Z")
            .unwrap_err();
        assert_eq!(
            err,
            FlowError::UnknownEndpoint {
                role: "sink",
                label: "Z".into()
            }
        );
        assert_eq!(err.to_string(), "sink node `Z` is not present in the network");
    }

    #[test]
    fn straight_line_bottleneck() {
        let net = network(
            &["A", "B", "C", "D"],
            vec![
                EdgeSpec::new("A", "B", 10),
                EdgeSpec::new("B", "C", 5),
                EdgeSpec::new("C", "D", 10),
            ],
        );
        let outcome = FlowSolver::new(SearchStrategy::BreadthFirst)
            .run(&net, "A", "D")
            .unwrap();

        assert_eq!(outcome.total_flow, 5);
        assert_eq!(outcome.log.len(), 1);
        let snapshot = outcome.log.at(0).unwrap();
        assert_eq!(snapshot.step, 1);
        assert_eq!(snapshot.bottleneck, 5);
        assert_eq!(
            snapshot.path,
            vec![NodeId(0), NodeId(1), NodeId(2), NodeId(3)]
        );

        // Cut is exactly the B->C bottleneck edge.
        assert_eq!(outcome.min_cut.capacity, 5);
        assert_eq!(outcome.min_cut.edges.len(), 1);
        assert_eq!(outcome.min_cut.edges[0].from, NodeId(1));
        assert_eq!(outcome.min_cut.edges[0].to, NodeId(2));
        assert_eq!(outcome.min_cut.source_side, vec![NodeId(0), NodeId(1)]);
    }

    #[test]
    fn disconnected_endpoints_yield_zero_flow() {
        let net = network(&["A", "B"], vec![]);
        let outcome = FlowSolver::new(SearchStrategy::DepthFirst)
            .run(&net, "A", "B")
            .unwrap();
        assert_eq!(outcome.total_flow, 0);
        assert!(outcome.log.is_empty());
        assert!(outcome.min_cut.edges.is_empty());
        assert_eq!(outcome.min_cut.capacity, 0);
        assert_eq!(outcome.min_cut.source_side, vec![NodeId(0)]);
    }

    #[test]
    fn both_strategies_agree_on_flow_and_cut_value() {
        let net = || {
            network(
                &["A", "B", "C", "D"],
                vec![
                    EdgeSpec::new("A", "B", 3),
                    EdgeSpec::new("A", "C", 2),
                    EdgeSpec::new("B", "D", 2),
                    EdgeSpec::new("C", "D", 3),
                    EdgeSpec::new("B", "C", 1),
                ],
            )
        };
        let bfs = FlowSolver::new(SearchStrategy::BreadthFirst)
            .run(&net(), "A", "D")
            .unwrap();
        let dfs = FlowSolver::new(SearchStrategy::DepthFirst)
            .run(&net(), "A", "D")
            .unwrap();

        assert_eq!(bfs.total_flow, 5);
        assert_eq!(dfs.total_flow, 5);
        assert_eq!(bfs.min_cut.capacity, 5);
        assert_eq!(dfs.min_cut.capacity, 5);
    }

    #[test]
    fn flow_requiring_cancellation_is_found() {
        // The classic trap: a greedy first path through the middle edge
        // must be partially undone through a reverse arc.
        let net = network(
            &["S", "A", "B", "T"],
            vec![
                EdgeSpec::new("S", "A", 1),
                EdgeSpec::new("S", "B", 1),
                EdgeSpec::new("A", "B", 1),
                EdgeSpec::new("A", "T", 1),
                EdgeSpec::new("B", "T", 1),
            ],
        );
        for strategy in [SearchStrategy::BreadthFirst, SearchStrategy::DepthFirst] {
            let outcome = FlowSolver::new(strategy).run(&net, "S", "T").unwrap();
            assert_eq!(outcome.total_flow, 2, "{} failed", strategy.name());
        }
    }

    #[test]
    fn sink_is_unreachable_from_cut_source_side() {
        let net = network(
            &["A", "B", "C", "D"],
            vec![
                EdgeSpec::new("A", "B", 10),
                EdgeSpec::new("B", "C", 5),
                EdgeSpec::new("C", "D", 10),
            ],
        );
        let outcome = FlowSolver::new(SearchStrategy::BreadthFirst)
            .run(&net, "A", "D")
            .unwrap();
        let sink = net.node_id("D").unwrap();
        assert!(!outcome.min_cut.source_side.contains(&sink));
    }
}
