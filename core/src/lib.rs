//! flowlab core: a replayable maximum-flow engine
//!
//! This crate implements the flow-computation core behind the flowlab
//! observatory: an immutable capacitated network, a flow ledger with derived
//! residual queries, interchangeable augmenting-path strategies, the augment
//! loop itself, minimum-cut extraction, and the ordered snapshot log a
//! renderer replays step by step.
//!
//! The presentation surfaces (input prompts, drawing, windowing) live
//! outside this crate; their entire contract is the text accepted by
//! [`input`] and the [`FlowOutcome`] returned by [`FlowSolver::run`].
//!
//! ```
//! use flowlab_core::{compute, SearchStrategy};
//!
//! let outcome = compute(
//!     "A,B,C,D",
//!     "A-B-10, B-C-5, C-D-10",
//!     "A",
//!     "D",
//!     SearchStrategy::BreadthFirst,
//! )
//! .unwrap();
//! assert_eq!(outcome.total_flow, 5);
//! assert_eq!(outcome.log.len(), 1);
//! ```

pub mod engine;
pub mod input;
pub mod ledger;
pub mod network;
pub mod search;
pub mod snapshot;

pub use engine::{extract_min_cut, CutEdge, FlowError, FlowOutcome, FlowSolver, MinCut};
pub use input::{parse_edge_list, parse_node_list, ParseError};
pub use ledger::{FlowEntry, FlowLedger};
pub use network::{Capacity, Edge, EdgeSpec, FlowNetwork, NetworkError, NodeId};
pub use search::{BreadthFirst, DepthFirst, PathSearch, SearchStrategy};
pub use snapshot::{Replay, Snapshot, SnapshotLog};

use thiserror::Error;

/// Any failure the collection layer can provoke, in the order the pipeline
/// detects them: text parsing, network construction, endpoint validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Flow(#[from] FlowError),
}

/// End-to-end entry point for the collection layer: parse, build, run.
pub fn compute(
    nodes: &str,
    edges: &str,
    source: &str,
    sink: &str,
    strategy: SearchStrategy,
) -> Result<FlowOutcome, Error> {
    let labels = parse_node_list(nodes)?;
    let specs = parse_edge_list(edges)?;
    let network = FlowNetwork::build(labels, specs)?;
    let outcome = FlowSolver::new(strategy).run(&network, source, sink)?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_surfaces_parse_errors_before_any_snapshot() {
        let err = compute("A,B", "A-B", "A", "B", SearchStrategy::BreadthFirst).unwrap_err();
        assert_eq!(
            err,
            Error::Parse(ParseError::MalformedEdgeToken("A-B".into()))
        );
    }

    #[test]
    fn compute_surfaces_construction_errors() {
        let err = compute(
            "A,B",
            "A-B-1, A-B-2",
            "A",
            "B",
            SearchStrategy::BreadthFirst,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Network(NetworkError::DuplicateEdge { .. })));
    }

    #[test]
    fn compute_surfaces_endpoint_errors() {
        let err = compute("A,B", "A-B-1", "A", "A", SearchStrategy::DepthFirst).unwrap_err();
        assert!(matches!(err, Error::Flow(FlowError::IdenticalEndpoints(_))));
    }
}
