use thiserror::Error;

use tr_core::{AgentId, SegmentId};
use tr_graph::GraphError;
use tr_weight::WeightError;

#[derive(Debug, Error, PartialEq)]
pub enum SearchError {
    #[error("no route from {from} to {to}")]
    Unreachable { from: SegmentId, to: SegmentId },

    #[error("agent {0} has no deadline")]
    MissingDeadline(AgentId),

    /// Walking the successor table from `from` toward `to` hit a gap or
    /// revisited a segment.  Indicates a bug in the table build.
    #[error("successor table is inconsistent between {from} and {to}")]
    InconsistentPredecessorTable { from: SegmentId, to: SegmentId },

    #[error("route steps from {from} to {to}, which are not adjacent")]
    BrokenWalk { from: SegmentId, to: SegmentId },

    #[error("all-pairs table covers {table} segments, graph has {graph}")]
    TableMismatch { table: usize, graph: usize },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Weight(#[from] WeightError),
}

impl SearchError {
    /// `true` for failures that only affect the agent being routed.  The
    /// engine turns these into an empty decision list and carries on with
    /// the epoch.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SearchError::Unreachable { .. } | SearchError::MissingDeadline(_))
    }
}

pub type SearchResult<T> = Result<T, SearchError>;
