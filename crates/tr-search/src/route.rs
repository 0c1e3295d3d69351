//! The result of a search and the trait every search implements.

use tr_core::{Agent, Direction, SegmentId};
use tr_graph::SegmentGraph;
use tr_weight::WeightSnapshot;

use crate::{SearchError, SearchResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// A walk through the segment graph and the decision list that drives it.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Segments in travel order, origin first, destination last.
    pub segments: Vec<SegmentId>,
    /// Turn taken at the end of each segment but the last.
    /// `directions.len() == segments.len() - 1`.
    pub directions: Vec<Direction>,
    /// Accumulated cost in the unit of the search that produced the route.
    pub cost: f64,
}

impl Route {
    /// The zero-length route of an agent already on its destination.
    pub fn trivial(at: SegmentId) -> Self {
        Self { segments: vec![at], directions: Vec::new(), cost: 0.0 }
    }

    /// Build a route from a segment walk, resolving the direction of every
    /// step.  Fails with `BrokenWalk` if two consecutive segments are not
    /// adjacent.
    pub fn from_segments(graph: &SegmentGraph, segments: Vec<SegmentId>, cost: f64) -> SearchResult<Self> {
        let directions = segments
            .windows(2)
            .map(|w| {
                graph
                    .direction_between(w[0], w[1])?
                    .ok_or(SearchError::BrokenWalk { from: w[0], to: w[1] })
            })
            .collect::<SearchResult<Vec<_>>>()?;
        Ok(Self { segments, directions, cost })
    }

    /// `true` if origin and destination are the same segment.
    pub fn is_trivial(&self) -> bool {
        self.directions.is_empty()
    }

    pub fn origin(&self) -> SegmentId {
        self.segments.first().copied().unwrap_or(SegmentId::INVALID)
    }

    pub fn destination(&self) -> SegmentId {
        self.segments.last().copied().unwrap_or(SegmentId::INVALID)
    }

    /// The decision list handed to the translator.
    pub fn decisions(&self) -> &[Direction] {
        &self.directions
    }

    /// Physical length of the segments entered after the origin.
    pub fn length_m(&self, graph: &SegmentGraph) -> f64 {
        self.segments.iter().skip(1).map(|&s| graph.length(s)).sum()
    }

    /// Cost of the segments entered after the origin under `weights`.
    pub fn cost_under(&self, weights: &WeightSnapshot) -> f64 {
        self.segments.iter().skip(1).map(|&s| weights.cost(s)).sum()
    }
}

// ── RouteSearch trait ─────────────────────────────────────────────────────────

/// One epoch's configured search.
///
/// An implementation borrows whatever the epoch precomputed (snapshot,
/// all-pairs table) and routes one agent per call without mutating shared
/// state, so a single instance is shared by every worker thread.
pub trait RouteSearch: Send + Sync {
    /// Route `agent` from its current segment to its destination.
    ///
    /// Origin equal to destination yields [`Route::trivial`]; no path yields
    /// [`SearchError::Unreachable`].
    fn search(&self, graph: &SegmentGraph, agent: &Agent) -> SearchResult<Route>;
}

/// Follow a per-search predecessor array back from `to` to `from`.
///
/// Bounded by the segment count so a corrupt array cannot loop.
pub(crate) fn walk_back(
    graph:  &SegmentGraph,
    parent: &[SegmentId],
    from:   SegmentId,
    to:     SegmentId,
    cost:   f64,
) -> SearchResult<Route> {
    let mut segments = vec![to];
    let mut cur = to;
    while cur != from {
        cur = parent[cur.index()];
        if !cur.is_valid() || segments.len() > parent.len() {
            return Err(SearchError::InconsistentPredecessorTable { from, to });
        }
        segments.push(cur);
    }
    segments.reverse();
    Route::from_segments(graph, segments, cost)
}
