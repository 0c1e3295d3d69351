//! Incremental single-source search with live re-weighting.
//!
//! # Two ledgers
//!
//! The search compares candidates with the model's *penalized* cost but
//! stores the *physical length* as the running distance:
//!
//! ```text
//! if dist[cur] + penalized[out] < dist[out]:
//!     dist[out] = dist[cur] + length[out]
//! ```
//!
//! The next segment to expand is the unvisited one with the smallest
//! physical distance, ties going to the lower `SegmentId`.  Congestion
//! therefore decides *whether* an edge is taken, never how far the route is
//! said to be.
//!
//! # Freshness
//!
//! With `refresh_each_expansion` (the default) the penalized weights of every
//! segment are re-read from the traffic source at every expansion, into a
//! buffer private to the search.  Concurrent searches never share it.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tr_core::{Agent, RoutingConfig, SegmentId};
use tr_graph::SegmentGraph;
use tr_weight::{DensityPenalized, EdgeWeight, Length, TrafficSource, evaluate_into};

use crate::queue::Scored;
use crate::route::walk_back;
use crate::{Route, RouteSearch, SearchError, SearchResult};

/// Dijkstra variant over segments whose comparison weights come from `W`.
///
/// With [`Length`] the two ledgers coincide and this is plain Dijkstra.
pub struct IncrementalDijkstra<'a, W: EdgeWeight> {
    model:   W,
    traffic: &'a dyn TrafficSource,
    refresh_each_expansion: bool,
}

impl<'a, W: EdgeWeight> IncrementalDijkstra<'a, W> {
    pub fn new(model: W, traffic: &'a dyn TrafficSource) -> Self {
        Self { model, traffic, refresh_each_expansion: true }
    }

    /// Build the penalized weights once per search instead of once per
    /// expansion.
    pub fn refresh_each_expansion(mut self, refresh: bool) -> Self {
        self.refresh_each_expansion = refresh;
        self
    }
}

impl<'a> IncrementalDijkstra<'a, Length> {
    pub fn plain(traffic: &'a dyn TrafficSource) -> Self {
        Self::new(Length, traffic)
    }
}

impl<'a> IncrementalDijkstra<'a, DensityPenalized> {
    pub fn density(config: &RoutingConfig, traffic: &'a dyn TrafficSource) -> Self {
        Self::new(DensityPenalized::from_config(config), traffic)
            .refresh_each_expansion(config.refresh_each_expansion)
    }
}

impl<W: EdgeWeight> RouteSearch for IncrementalDijkstra<'_, W> {
    fn search(&self, graph: &SegmentGraph, agent: &Agent) -> SearchResult<Route> {
        let (from, to) = (agent.current, agent.destination);
        graph.check(from)?;
        graph.check(to)?;
        if from == to {
            return Ok(Route::trivial(from));
        }

        let n = graph.segment_count();
        let mut dist    = vec![f64::INFINITY; n];
        let mut visited = vec![false; n];
        let mut parent  = vec![SegmentId::INVALID; n];
        let mut penalized: Vec<f64> = Vec::with_capacity(n);

        if !self.refresh_each_expansion {
            evaluate_into(graph, &self.model, self.traffic, &mut penalized)?;
        }

        // The origin is charged its own length.
        dist[from.index()] = graph.length(from);

        // Lazy-deletion frontier keyed by (distance, segment index).
        let mut frontier: BinaryHeap<Reverse<Scored>> = BinaryHeap::new();
        let mut current = from;

        loop {
            if self.refresh_each_expansion {
                evaluate_into(graph, &self.model, self.traffic, &mut penalized)?;
            }

            let here = dist[current.index()];
            for (_, out) in graph.outgoing(current)? {
                if visited[out.index()] {
                    continue;
                }
                if here + penalized[out.index()] < dist[out.index()] {
                    let true_dist = here + graph.length(out);
                    dist[out.index()]   = true_dist;
                    parent[out.index()] = current;
                    frontier.push(Reverse(Scored {
                        priority: true_dist,
                        tiebreak: out.0 as u64,
                        cost:     true_dist,
                        segment:  out,
                    }));
                }
            }

            visited[current.index()] = true;
            if current == to {
                break;
            }

            // Next: closest unvisited segment.  Anything left in the frontier
            // is finite, so an empty frontier means the rest is unreachable.
            let mut next = None;
            while let Some(Reverse(entry)) = frontier.pop() {
                let s = entry.segment.index();
                if !visited[s] && entry.cost == dist[s] {
                    next = Some(entry.segment);
                    break;
                }
            }
            match next {
                Some(s) => current = s,
                None    => break,
            }
        }

        if !visited[to.index()] {
            return Err(SearchError::Unreachable { from, to });
        }
        walk_back(graph, &parent, from, to, dist[to.index()])
    }
}
