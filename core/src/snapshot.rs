//! Replayable record of the computation
//!
//! Every successful augmentation appends one immutable [`Snapshot`] to the
//! [`SnapshotLog`]. The log is the entire surface the rendering layer needs
//! to draw "current graph state with path highlighted, step N of M", and the
//! [`Replay`] cursor is the explicit stepped-playback index the renderer
//! owns; the engine never reaches back into a finished log.

use serde::{Deserialize, Serialize};

use crate::ledger::FlowEntry;
use crate::network::NodeId;

/// State captured at the end of one augmentation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// 1-based step index, so a renderer can title "step N of M" directly.
    pub step: usize,
    /// Node sequence of the augmenting path, source first.
    pub path: Vec<NodeId>,
    /// Arcs of the path, for highlighting.
    pub arcs: Vec<(NodeId, NodeId)>,
    /// Flow pushed in this step.
    pub bottleneck: u64,
    /// Per-edge flow values after the push, edge construction order.
    pub flows: Vec<FlowEntry>,
}

/// Ordered, append-only record of every augmentation step.
///
/// Appending is crate-internal; once the engine returns, the log is
/// immutable and safely shareable with the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotLog {
    entries: Vec<Snapshot>,
}

impl SnapshotLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, snapshot: Snapshot) {
        debug_assert_eq!(snapshot.step, self.entries.len() + 1);
        self.entries.push(snapshot);
    }

    /// Snapshot at `index` (0-based), or `None` out of range.
    pub fn at(&self, index: usize) -> Option<&Snapshot> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.entries.last()
    }

    /// Stepped-playback cursor over this log.
    pub fn replay(&self) -> Replay<'_> {
        Replay {
            log: self,
            position: 0,
        }
    }
}

/// Explicit cursor for stepped playback.
///
/// The caller owns the cursor; the log itself never mutates. `next` is the
/// "advance one step" button of a renderer.
#[derive(Debug, Clone)]
pub struct Replay<'a> {
    log: &'a SnapshotLog,
    position: usize,
}

impl<'a> Replay<'a> {
    /// Number of snapshots already yielded.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.log.len() - self.position
    }

    /// Rewinds to the start of the log.
    pub fn reset(&mut self) {
        self.position = 0;
    }
}

impl<'a> Iterator for Replay<'a> {
    type Item = &'a Snapshot;

    fn next(&mut self) -> Option<Self::Item> {
        let snapshot = self.log.at(self.position)?;
        self.position += 1;
        Some(snapshot)
    }
}
