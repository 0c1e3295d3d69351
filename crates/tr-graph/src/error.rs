//! Graph-subsystem error type.

use thiserror::Error;

use tr_core::{Direction, SegmentId};

/// Errors produced by `tr-graph`.
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    /// Query on a segment that is not a member of the graph.  Always a caller
    /// bug.
    #[error("segment {0} not found in graph")]
    UnknownSegment(SegmentId),

    #[error("segment {name:?} has invalid length {value}")]
    InvalidLength { name: String, value: f64 },

    #[error("segment {name:?} has invalid max speed {value}")]
    InvalidSpeed { name: String, value: f64 },

    #[error("segment name {0:?} is used more than once")]
    DuplicateName(String),

    #[error("segment {from} already has an exit for direction {direction}")]
    DuplicateDirection { from: SegmentId, direction: Direction },

    #[error("segment {from} already reaches {to} through another direction")]
    DuplicateNeighbour { from: SegmentId, to: SegmentId },
}

pub type GraphResult<T> = Result<T, GraphError>;
