use thiserror::Error;

use tr_core::{AgentId, CoreError, SegmentId};
use tr_search::SearchError;
use tr_weight::WeightError;

use crate::TranslateError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("routing configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("agent {0} appears more than once in the epoch")]
    DuplicateAgent(AgentId),

    /// Building the epoch's all-pairs table failed.
    #[error("epoch precomputation failed: {0}")]
    Precompute(#[from] SearchError),

    #[error("search for agent {agent} failed: {source}")]
    Search {
        agent:  AgentId,
        #[source]
        source: SearchError,
    },

    #[error("agent {agent} decisions do not resolve from {from}: {source}")]
    Translate {
        agent:  AgentId,
        from:   SegmentId,
        #[source]
        source: TranslateError,
    },

    #[error("weight snapshot failed: {0}")]
    Weight(#[from] WeightError),

    #[error("epoch cancelled")]
    Cancelled,

    #[error("could not build the worker pool: {0}")]
    ThreadPool(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
