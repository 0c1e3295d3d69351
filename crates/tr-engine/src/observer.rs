//! Epoch observer trait for progress reporting and data collection.

use tr_core::{AgentId, SimTime, Strategy};

use crate::{AgentDecision, EpochPlan};

/// Callbacks invoked by [`RoutingEngine::route_observed`][crate::RoutingEngine::route_observed]
/// at key points of an epoch.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — failure counter
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct Stranded(usize);
///
/// impl EpochObserver for Stranded {
///     fn on_agent_routed(&mut self, _agent: AgentId, decision: &AgentDecision) {
///         if decision.failure.is_some() {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait EpochObserver {
    /// Called before any precomputation, with the number of agents to route.
    fn on_epoch_start(&mut self, _now: SimTime, _strategy: Strategy, _agents: usize) {}

    /// Called once the epoch's snapshot and/or all-pairs table exist.
    fn on_context_built(&mut self, _strategy: Strategy) {}

    /// Called for every agent in ascending `AgentId` order, after all
    /// searches finished.
    fn on_agent_routed(&mut self, _agent: AgentId, _decision: &AgentDecision) {}

    /// Called once with the finished plan.
    fn on_epoch_end(&mut self, _plan: &EpochPlan) {}
}

/// An [`EpochObserver`] that does nothing.  Used by
/// [`RoutingEngine::route`][crate::RoutingEngine::route].
pub struct NoopObserver;

impl EpochObserver for NoopObserver {}
