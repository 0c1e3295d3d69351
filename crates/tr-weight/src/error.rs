use thiserror::Error;

use tr_core::SegmentId;
use tr_graph::GraphError;

#[derive(Debug, Error, PartialEq)]
pub enum WeightError {
    /// A weight formula hit a zero/near-zero divisor or produced a
    /// non-finite or negative cost.
    #[error("{model} weight of segment {segment} is degenerate: {detail}")]
    NumericDegeneracy {
        segment: SegmentId,
        model:   &'static str,
        detail:  String,
    },

    #[error("weight snapshot covers {got} segments, graph has {expected}")]
    SizeMismatch { expected: usize, got: usize },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type WeightResult<T> = Result<T, WeightError>;
