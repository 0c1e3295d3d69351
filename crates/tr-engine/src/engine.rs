//! The `RoutingEngine` and its two-phase epoch.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, trace, warn};

use tr_core::{Agent, AgentId, RoutingConfig, Strategy};
use tr_graph::SegmentGraph;
use tr_search::{
    AllPairsRouter, AllPairsTable, DeadlineAStar, DeadlineHeuristic, IncrementalDijkstra, RouteSearch,
};
use tr_weight::{LogCongestion, TrafficSource, TravelTime, WeightSnapshot};

use crate::{
    AgentDecision, EngineError, EngineResult, EpochObserver, EpochPlan, LookaheadResolver, NoopObserver,
    TargetResolver,
};

// ── CancelFlag ────────────────────────────────────────────────────────────────

/// Shared flag that stops an epoch between agents.
///
/// Clones share the same flag.  Once set, every epoch returns
/// [`EngineError::Cancelled`] until [`reset`](Self::reset) is called.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

// ── Epoch context ─────────────────────────────────────────────────────────────

/// Whatever a strategy precomputes once per epoch and shares with every
/// search of that epoch.
enum EpochContext {
    Plain,
    Density,
    Table(AllPairsTable),
    Heuristic { weights: WeightSnapshot, table: AllPairsTable },
}

// ── RoutingEngine ─────────────────────────────────────────────────────────────

/// Routes a batch of agents once per decision epoch.
///
/// Every call to [`route`](Self::route) runs two phases:
///
/// 1. **Precompute** (sequential): validate the batch and build the epoch
///    context the configured [`Strategy`] needs (nothing, an all-pairs
///    table, or a snapshot plus table).
/// 2. **Search** (parallel with the `parallel` feature): one independent
///    search per agent against the shared context, then translation of the
///    decision list to a target segment.
///
/// Results are collected in ascending `AgentId` order, so the plan and the
/// observer callbacks are identical with or without the `parallel` feature.
pub struct RoutingEngine<T: TargetResolver = LookaheadResolver> {
    config:   RoutingConfig,
    resolver: T,
    cancel:   CancelFlag,

    #[cfg(feature = "parallel")]
    pool: Option<rayon::ThreadPool>,
}

impl RoutingEngine<LookaheadResolver> {
    /// An engine with the lookahead translator configured from `config`.
    pub fn new(config: RoutingConfig) -> EngineResult<Self> {
        let resolver = LookaheadResolver::new(config.lookahead_min_m);
        Self::with_resolver(config, resolver)
    }
}

impl<T: TargetResolver> RoutingEngine<T> {
    pub fn with_resolver(config: RoutingConfig, resolver: T) -> EngineResult<Self> {
        config.validate()?;

        #[cfg(feature = "parallel")]
        let pool = match config.num_threads {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| EngineError::ThreadPool(e.to_string()))?,
            ),
            None => None,
        };

        #[cfg(not(feature = "parallel"))]
        {
            if let Some(n) = config.num_threads {
                warn!("num_threads = {n} ignored: built without the `parallel` feature");
            }
        }

        Ok(Self {
            config,
            resolver,
            cancel: CancelFlag::new(),
            #[cfg(feature = "parallel")]
            pool,
        })
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    pub fn strategy(&self) -> Strategy {
        self.config.strategy
    }

    pub fn resolver(&self) -> &T {
        &self.resolver
    }

    /// A handle that cancels this engine's epochs from another thread.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Route every agent against `graph` and the traffic in `live`.
    pub fn route(
        &self,
        agents: &[Agent],
        graph:  &SegmentGraph,
        live:   &dyn TrafficSource,
    ) -> EngineResult<EpochPlan> {
        self.route_observed(agents, graph, live, &mut NoopObserver)
    }

    /// [`route`](Self::route), reporting progress to `observer`.
    pub fn route_observed<O: EpochObserver>(
        &self,
        agents:   &[Agent],
        graph:    &SegmentGraph,
        live:     &dyn TrafficSource,
        observer: &mut O,
    ) -> EngineResult<EpochPlan> {
        let strategy = self.config.strategy;
        let now = live.now();
        debug!("epoch {now}: routing {} agents with {strategy}", agents.len());
        observer.on_epoch_start(now, strategy, agents.len());

        let mut seen = BTreeSet::new();
        if let Some(dup) = agents.iter().find(|a| !seen.insert(a.id)) {
            return Err(EngineError::DuplicateAgent(dup.id));
        }
        self.check_cancelled()?;

        // ── Phase 1: precompute ───────────────────────────────────────────
        let context = self.in_pool(|| self.build_context(graph, live)).inspect_err(|e| {
            warn!("epoch {now}: precomputation failed: {e}");
        })?;
        observer.on_context_built(strategy);
        self.check_cancelled()?;

        // ── Phase 2: search ───────────────────────────────────────────────
        //
        // Earlier-started agents first; only matters for the sequential
        // build, where a cancellation leaves the latest starters unrouted.
        let mut order: Vec<&Agent> = agents.iter().collect();
        order.sort_by(|a, b| a.start_time.total_cmp(&b.start_time).then(a.id.cmp(&b.id)));

        let search = self.searcher(&context, live);
        let decided = self
            .in_pool(|| self.decide_all(search.as_ref(), graph, &order))
            .inspect_err(|e| warn!("epoch {now}: aborted: {e}"))?;

        let decisions: BTreeMap<AgentId, AgentDecision> = decided.into_iter().collect();
        for (&agent, decision) in &decisions {
            observer.on_agent_routed(agent, decision);
        }

        let plan = EpochPlan::new(now, strategy, decisions);
        debug!(
            "epoch {now}: {} of {} agents routed, {} left in place",
            plan.routed_count(),
            plan.len(),
            plan.failures().count()
        );
        observer.on_epoch_end(&plan);
        Ok(plan)
    }

    // ── Phases ────────────────────────────────────────────────────────────

    fn build_context(&self, graph: &SegmentGraph, live: &dyn TrafficSource) -> EngineResult<EpochContext> {
        Ok(match self.config.strategy {
            Strategy::PlainDijkstra => EpochContext::Plain,
            Strategy::DensityDijkstra => EpochContext::Density,
            Strategy::FloydWarshall => {
                let weights = WeightSnapshot::build(graph, &TravelTime, live)?;
                EpochContext::Table(AllPairsTable::build(graph, &weights)?)
            }
            Strategy::DeadlineAStar => {
                let model = LogCongestion::from_config(&self.config);
                let weights = WeightSnapshot::build(graph, &model, live)?;
                let table = AllPairsTable::build(graph, &weights)?;
                EpochContext::Heuristic { weights, table }
            }
        })
    }

    fn searcher<'a>(&'a self, context: &'a EpochContext, live: &'a dyn TrafficSource) -> Box<dyn RouteSearch + 'a> {
        match context {
            EpochContext::Plain => Box::new(IncrementalDijkstra::plain(live)),
            EpochContext::Density => Box::new(IncrementalDijkstra::density(&self.config, live)),
            EpochContext::Table(table) => Box::new(AllPairsRouter::new(table)),
            EpochContext::Heuristic { weights, table } => Box::new(DeadlineAStar::new(
                weights,
                table,
                DeadlineHeuristic::from_config(&self.config),
                live.now(),
            )),
        }
    }

    fn decide_all(
        &self,
        search: &dyn RouteSearch,
        graph:  &SegmentGraph,
        order:  &[&Agent],
    ) -> EngineResult<Vec<(AgentId, AgentDecision)>> {
        #[cfg(not(feature = "parallel"))]
        {
            order
                .iter()
                .map(|&agent| -> EngineResult<_> {
                    self.check_cancelled()?;
                    Ok((agent.id, self.decide(search, graph, agent)?))
                })
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            order
                .par_iter()
                .map(|&agent| -> EngineResult<_> {
                    self.check_cancelled()?;
                    Ok((agent.id, self.decide(search, graph, agent)?))
                })
                .collect()
        }
    }

    /// Search and translate for one agent.  Recoverable search failures
    /// leave the agent on its current segment; anything else aborts the
    /// epoch.
    fn decide(&self, search: &dyn RouteSearch, graph: &SegmentGraph, agent: &Agent) -> EngineResult<AgentDecision> {
        match search.search(graph, agent) {
            Ok(route) => {
                let target = self
                    .resolver
                    .resolve(graph, agent, route.decisions())
                    .map_err(|source| EngineError::Translate { agent: agent.id, from: agent.current, source })?;
                trace!(
                    "{}: {} -> {} via {} segments, target {target}",
                    agent.id,
                    agent.current,
                    agent.destination,
                    route.segments.len()
                );
                Ok(AgentDecision { target, route: Some(route), failure: None })
            }
            Err(e) if e.is_recoverable() => {
                debug!("{}: staying on {}: {e}", agent.id, agent.current);
                Ok(AgentDecision { target: agent.current, route: None, failure: Some(e) })
            }
            Err(source) => Err(EngineError::Search { agent: agent.id, source }),
        }
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    #[inline]
    fn check_cancelled(&self) -> EngineResult<()> {
        if self.cancel.is_cancelled() { Err(EngineError::Cancelled) } else { Ok(()) }
    }

    /// Run `op` on the configured worker pool, or on the caller's thread
    /// (and Rayon's global pool) if there is none.
    fn in_pool<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        #[cfg(feature = "parallel")]
        {
            if let Some(pool) = &self.pool {
                return pool.install(op);
            }
        }
        op()
    }
}
