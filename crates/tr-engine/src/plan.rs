//! The per-epoch result handed back to the caller.

use std::collections::BTreeMap;

use tr_core::{AgentId, SegmentId, SimTime, Strategy};
use tr_search::{Route, SearchError};

/// What the engine decided for one agent.
#[derive(Debug, PartialEq)]
pub struct AgentDecision {
    /// Segment the actuation layer should steer the agent toward.
    pub target: SegmentId,

    /// The full route, `None` if the search failed.
    pub route: Option<Route>,

    /// Why the agent was left on its current segment, if it was.  Only
    /// recoverable search failures end up here.
    pub failure: Option<SearchError>,
}

impl AgentDecision {
    /// `true` if the search produced a route.
    pub fn is_routed(&self) -> bool {
        self.route.is_some()
    }
}

/// All decisions of one epoch, keyed and iterated in ascending `AgentId`
/// order.
#[derive(Debug, PartialEq)]
pub struct EpochPlan {
    pub time:     SimTime,
    pub strategy: Strategy,
    decisions:    BTreeMap<AgentId, AgentDecision>,
}

impl EpochPlan {
    pub(crate) fn new(time: SimTime, strategy: Strategy, decisions: BTreeMap<AgentId, AgentDecision>) -> Self {
        Self { time, strategy, decisions }
    }

    pub fn get(&self, agent: AgentId) -> Option<&AgentDecision> {
        self.decisions.get(&agent)
    }

    pub fn target(&self, agent: AgentId) -> Option<SegmentId> {
        self.get(agent).map(|d| d.target)
    }

    /// The `AgentId → target segment` mapping the actuation layer consumes.
    pub fn targets(&self) -> BTreeMap<AgentId, SegmentId> {
        self.decisions.iter().map(|(&id, d)| (id, d.target)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &AgentDecision)> + '_ {
        self.decisions.iter().map(|(&id, d)| (id, d))
    }

    /// Agents whose search failed recoverably this epoch.
    pub fn failures(&self) -> impl Iterator<Item = (AgentId, &SearchError)> + '_ {
        self.decisions
            .iter()
            .filter_map(|(&id, d)| d.failure.as_ref().map(|e| (id, e)))
    }

    pub fn routed_count(&self) -> usize {
        self.decisions.values().filter(|d| d.is_routed()).count()
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
}
