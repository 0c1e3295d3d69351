//! All-pairs travel costs (Floyd–Warshall), built once per epoch.
//!
//! # Layout
//!
//! Two dense row-major `N × N` matrices indexed by `SegmentId`:
//!
//! - `dist[i][j]`: cheapest cost from `i` to `j`, `+∞` if unreachable.
//! - `next[i][j]`: first segment after `i` on that route,
//!   `SegmentId::INVALID` if unreachable.
//!
//! Moving from `i` onto an adjacent `j` costs the weight of `i` (the time
//! spent traversing `i` before the turn), so `dist[i][j]` covers every
//! segment of the route except `j` itself.
//!
//! # Cost
//!
//! O(N³) time and O(N²) memory.  Built once per epoch and shared by every
//! agent, never per agent.  With the `parallel` feature the rows of each
//! pass are relaxed on Rayon's thread pool.

use log::debug;

use tr_core::{Agent, SegmentId};
use tr_graph::{GraphError, SegmentGraph};
use tr_weight::WeightSnapshot;

use crate::{Route, RouteSearch, SearchError, SearchResult};

#[derive(Debug, Clone)]
pub struct AllPairsTable {
    n:    usize,
    dist: Vec<f64>,
    next: Vec<SegmentId>,
}

impl AllPairsTable {
    /// Run Floyd–Warshall over `graph` with segment costs from `weights`.
    pub fn build(graph: &SegmentGraph, weights: &WeightSnapshot) -> SearchResult<Self> {
        let n = graph.segment_count();
        if weights.len() != n {
            return Err(SearchError::TableMismatch { table: weights.len(), graph: n });
        }

        let mut dist = vec![f64::INFINITY; n * n];
        let mut next = vec![SegmentId::INVALID; n * n];

        for i in graph.segments() {
            let row = i.index() * n;
            dist[row + i.index()] = 0.0;
            next[row + i.index()] = i;
            for (_, j) in graph.outgoing(i)? {
                // A self-loop never beats staying put.
                if j != i {
                    dist[row + j.index()] = weights.cost(i);
                    next[row + j.index()] = j;
                }
            }
        }

        relax(n, &mut dist, &mut next);

        let table = Self { n, dist, next };
        table.verify_successors(graph)?;
        debug!("built {n}x{n} all-pairs table from {} weights", weights.model());
        Ok(table)
    }

    pub fn segment_count(&self) -> usize {
        self.n
    }

    /// Cheapest cost from `from` to `to`; `+∞` if unreachable.  Both must be
    /// members of the graph the table was built from.
    #[inline]
    pub fn distance(&self, from: SegmentId, to: SegmentId) -> f64 {
        self.dist[from.index() * self.n + to.index()]
    }

    /// First segment after `from` on the way to `to`, `INVALID` if
    /// unreachable.
    #[inline]
    pub fn successor(&self, from: SegmentId, to: SegmentId) -> SegmentId {
        self.next[from.index() * self.n + to.index()]
    }

    pub fn is_reachable(&self, from: SegmentId, to: SegmentId) -> bool {
        self.successor(from, to).is_valid()
    }

    /// The segment walk from `from` to `to`, both inclusive.
    pub fn path(&self, from: SegmentId, to: SegmentId) -> SearchResult<Vec<SegmentId>> {
        for s in [from, to] {
            if s.index() >= self.n {
                return Err(GraphError::UnknownSegment(s).into());
            }
        }
        if !self.is_reachable(from, to) {
            return Err(SearchError::Unreachable { from, to });
        }

        let mut path = vec![from];
        let mut cur = from;
        while cur != to {
            cur = self.successor(cur, to);
            path.push(cur);
            if !cur.is_valid() || path.len() > self.n {
                return Err(SearchError::InconsistentPredecessorTable { from, to });
            }
        }
        Ok(path)
    }

    /// [`path`](Self::path) with its decision list.
    pub fn route(&self, graph: &SegmentGraph, from: SegmentId, to: SegmentId) -> SearchResult<Route> {
        let segments = self.path(from, to)?;
        Route::from_segments(graph, segments, self.distance(from, to))
    }

    /// Every recorded successor must be a direct exit of its row's segment.
    /// Together with the bounded walk in `path`, this rules out a table that
    /// sends a reconstruction around in circles.
    fn verify_successors(&self, graph: &SegmentGraph) -> SearchResult<()> {
        for i in graph.segments() {
            for j in graph.segments() {
                let s = self.successor(i, j);
                if i == j || !s.is_valid() {
                    continue;
                }
                if graph.direction_between(i, s)?.is_none() {
                    return Err(SearchError::InconsistentPredecessorTable { from: i, to: j });
                }
            }
        }
        Ok(())
    }
}

// ── Relaxation ────────────────────────────────────────────────────────────────

/// Classic k/i/j relaxation.  Row `k` is copied before each pass so the rows
/// can be updated independently; row `k` itself cannot improve during pass
/// `k` since `dist[k][k] == 0`.
fn relax(n: usize, dist: &mut [f64], next: &mut [SegmentId]) {
    if n == 0 {
        return;
    }
    let mut row_k = vec![0.0; n];

    for k in 0..n {
        row_k.copy_from_slice(&dist[k * n..(k + 1) * n]);

        #[cfg(not(feature = "parallel"))]
        {
            dist.chunks_mut(n)
                .zip(next.chunks_mut(n))
                .enumerate()
                .for_each(|(i, (d, s))| relax_row(i, k, d, s, &row_k));
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            dist.par_chunks_mut(n)
                .zip(next.par_chunks_mut(n))
                .enumerate()
                .for_each(|(i, (d, s))| relax_row(i, k, d, s, &row_k));
        }
    }
}

#[inline]
fn relax_row(i: usize, k: usize, dist_i: &mut [f64], next_i: &mut [SegmentId], dist_k: &[f64]) {
    let d_ik = dist_i[k];
    if i == k || d_ik == f64::INFINITY {
        return;
    }
    let via = next_i[k];
    for (j, &d_kj) in dist_k.iter().enumerate() {
        if d_kj == f64::INFINITY {
            continue;
        }
        let candidate = d_ik + d_kj;
        if candidate < dist_i[j] {
            dist_i[j] = candidate;
            next_i[j] = via;
        }
    }
}

// ── AllPairsRouter ────────────────────────────────────────────────────────────

/// Routes every agent by table lookup.
pub struct AllPairsRouter<'a> {
    table: &'a AllPairsTable,
}

impl<'a> AllPairsRouter<'a> {
    pub fn new(table: &'a AllPairsTable) -> Self {
        Self { table }
    }
}

impl RouteSearch for AllPairsRouter<'_> {
    fn search(&self, graph: &SegmentGraph, agent: &Agent) -> SearchResult<Route> {
        let (from, to) = (agent.current, agent.destination);
        graph.check(from)?;
        graph.check(to)?;
        if self.table.segment_count() != graph.segment_count() {
            return Err(SearchError::TableMismatch {
                table: self.table.segment_count(),
                graph: graph.segment_count(),
            });
        }
        if from == to {
            return Ok(Route::trivial(from));
        }
        self.table.route(graph, from, to)
    }
}
