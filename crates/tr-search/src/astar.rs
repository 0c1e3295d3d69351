//! Deadline-aware A*.
//!
//! Edge cost is the epoch snapshot's weight of the segment being entered.
//! The heuristic reads the all-pairs table for the remaining travel time and
//! turns the predicted lateness against the agent's deadline into a
//! standardized score:
//!
//! ```text
//! h(n) = ((table[n][dest] + now) - deadline - mu) / sigma
//! ```
//!
//! `h` can be negative (an agent well ahead of its deadline) and is not
//! admissible in general, so the route is not guaranteed to be the cheapest.
//! Agents with slack explore like Dijkstra; late agents lean harder on the
//! table.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tr_core::{Agent, RoutingConfig, SegmentId, SimTime};
use tr_graph::SegmentGraph;
use tr_weight::WeightSnapshot;

use crate::queue::Scored;
use crate::route::walk_back;
use crate::{AllPairsTable, Route, RouteSearch, SearchError, SearchResult};

// ── DeadlineHeuristic ─────────────────────────────────────────────────────────

/// Standardized predicted lateness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeadlineHeuristic {
    pub mu:    f64,
    pub sigma: f64,
}

impl Default for DeadlineHeuristic {
    fn default() -> Self {
        Self { mu: 0.0, sigma: 50.0 }
    }
}

impl DeadlineHeuristic {
    pub fn from_config(config: &RoutingConfig) -> Self {
        Self { mu: config.deadline_mu, sigma: config.deadline_sigma }
    }

    /// Score for a node `remaining` seconds from the destination.  An
    /// unreachable node (`remaining = +∞`) scores `+∞`; a NaN result does too.
    #[inline]
    pub fn estimate(&self, remaining: f64, now: SimTime, deadline: SimTime) -> f64 {
        let lateness = (remaining + now.0) - deadline.0;
        let h = (lateness - self.mu) / self.sigma;
        if h.is_nan() { f64::INFINITY } else { h }
    }
}

// ── DeadlineAStar ─────────────────────────────────────────────────────────────

pub struct DeadlineAStar<'a> {
    weights:   &'a WeightSnapshot,
    table:     &'a AllPairsTable,
    heuristic: DeadlineHeuristic,
    now:       SimTime,
}

impl<'a> DeadlineAStar<'a> {
    pub fn new(
        weights:   &'a WeightSnapshot,
        table:     &'a AllPairsTable,
        heuristic: DeadlineHeuristic,
        now:       SimTime,
    ) -> Self {
        Self { weights, table, heuristic, now }
    }
}

impl RouteSearch for DeadlineAStar<'_> {
    fn search(&self, graph: &SegmentGraph, agent: &Agent) -> SearchResult<Route> {
        let (from, to) = (agent.current, agent.destination);
        graph.check(from)?;
        graph.check(to)?;

        let n = graph.segment_count();
        for len in [self.weights.len(), self.table.segment_count()] {
            if len != n {
                return Err(SearchError::TableMismatch { table: len, graph: n });
            }
        }
        if from == to {
            return Ok(Route::trivial(from));
        }
        let deadline = agent.deadline.ok_or(SearchError::MissingDeadline(agent.id))?;

        let mut best   = vec![f64::INFINITY; n];
        let mut parent = vec![SegmentId::INVALID; n];
        let mut seq: u64 = 0;

        let mut open: BinaryHeap<Reverse<Scored>> = BinaryHeap::new();
        best[from.index()] = 0.0;
        open.push(Reverse(Scored { priority: 0.0, tiebreak: seq, cost: 0.0, segment: from }));

        while let Some(Reverse(entry)) = open.pop() {
            let cur = entry.segment;
            if cur == to {
                return walk_back(graph, &parent, from, to, best[to.index()]);
            }
            if entry.cost > best[cur.index()] {
                continue;
            }

            for (_, out) in graph.outgoing(cur)? {
                let cost = entry.cost + self.weights.cost(out);
                if cost < best[out.index()] {
                    best[out.index()]   = cost;
                    parent[out.index()] = cur;
                    let h = self.heuristic.estimate(self.table.distance(out, to), self.now, deadline);
                    seq += 1;
                    open.push(Reverse(Scored { priority: cost + h, tiebreak: seq, cost, segment: out }));
                }
            }
        }

        Err(SearchError::Unreachable { from, to })
    }
}
