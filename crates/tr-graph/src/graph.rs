//! Segment graph representation and builder.
//!
//! # Data layout
//!
//! Segments are the vertices of the routing graph; a *connection* is the
//! turn from the end of one segment onto the start of the next, labelled by
//! the [`Direction`] that selects it.  Connections are stored in
//! **Compressed Sparse Row (CSR)** format.  Given a `SegmentId s`, its exits
//! occupy the slice:
//!
//! ```text
//! conn_to[ seg_out_start[s] .. seg_out_start[s+1] ]
//! ```
//!
//! Connections keep their insertion order within a segment, so iteration
//! over `outgoing(s)` is deterministic and matches the order the network
//! description listed them in.
//!
//! # Index bijection
//!
//! `SegmentId`s are assigned sequentially from 0 by the builder and never
//! change, so `index(s)` / `from_index(i)` are total bijections over
//! `0..segment_count()`.  The all-pairs tables rely on this.

use rustc_hash::FxHashMap;

use tr_core::{Direction, SegmentId};

use crate::{GraphError, GraphResult};

// ── SegmentGraph ──────────────────────────────────────────────────────────────

/// Directed segment graph in CSR format.
///
/// All fields except the name index are `pub` for direct indexed access on
/// hot paths.  Do not construct directly; use [`SegmentGraphBuilder`].
#[derive(Debug, Clone)]
pub struct SegmentGraph {
    // ── Segment data (indexed by SegmentId) ───────────────────────────────
    /// Stable external identifier of each segment.
    pub segment_name: Vec<String>,

    /// Physical length of each segment in metres.
    pub segment_length_m: Vec<f64>,

    /// Maximum legal speed in m/s (fastest lane).
    pub segment_max_speed: Vec<f64>,

    // ── CSR connection adjacency ──────────────────────────────────────────
    /// CSR row pointer.  Exits of segment `s` are connections
    /// `seg_out_start[s] .. seg_out_start[s+1]`.
    /// Length = `segment_count + 1`.
    pub seg_out_start: Vec<u32>,

    /// Segment entered by each connection.
    pub conn_to: Vec<SegmentId>,

    /// Turn choice that selects each connection.
    pub conn_direction: Vec<Direction>,

    name_index: FxHashMap<String, SegmentId>,
}

impl SegmentGraph {
    /// Construct an empty graph with no segments.
    pub fn empty() -> Self {
        SegmentGraph {
            segment_name:      Vec::new(),
            segment_length_m:  Vec::new(),
            segment_max_speed: Vec::new(),
            seg_out_start:     vec![0],
            conn_to:           Vec::new(),
            conn_direction:    Vec::new(),
            name_index:        FxHashMap::default(),
        }
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn segment_count(&self) -> usize {
        self.segment_length_m.len()
    }

    pub fn connection_count(&self) -> usize {
        self.conn_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segment_length_m.is_empty()
    }

    /// All segments in index order.
    pub fn segments(&self) -> impl Iterator<Item = SegmentId> + '_ {
        (0..self.segment_count()).map(|i| SegmentId(i as u32))
    }

    // ── Membership and indexing ───────────────────────────────────────────

    #[inline]
    pub fn contains(&self, segment: SegmentId) -> bool {
        segment.index() < self.segment_count()
    }

    /// `Ok(())` if `segment` is a member, `UnknownSegment` otherwise.
    #[inline]
    pub fn check(&self, segment: SegmentId) -> GraphResult<()> {
        if self.contains(segment) {
            Ok(())
        } else {
            Err(GraphError::UnknownSegment(segment))
        }
    }

    /// Dense position of `segment` in `0..segment_count()`.
    #[inline]
    pub fn index(&self, segment: SegmentId) -> GraphResult<usize> {
        self.check(segment)?;
        Ok(segment.index())
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn from_index(&self, index: usize) -> GraphResult<SegmentId> {
        let segment = SegmentId::try_from(index).unwrap_or(SegmentId::INVALID);
        self.check(segment)?;
        Ok(segment)
    }

    // ── Segment attributes ────────────────────────────────────────────────

    /// Length in metres.  `segment` must be a member.
    #[inline]
    pub fn length(&self, segment: SegmentId) -> f64 {
        self.segment_length_m[segment.index()]
    }

    /// Maximum legal speed in m/s.  `segment` must be a member.
    #[inline]
    pub fn max_speed(&self, segment: SegmentId) -> f64 {
        self.segment_max_speed[segment.index()]
    }

    /// External name.  `segment` must be a member.
    pub fn name(&self, segment: SegmentId) -> &str {
        &self.segment_name[segment.index()]
    }

    pub fn segment_by_name(&self, name: &str) -> Option<SegmentId> {
        self.name_index.get(name).copied()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Exits of `segment` as `(direction, next_segment)` pairs.
    ///
    /// A dead end yields an empty iterator; a non-member is
    /// [`GraphError::UnknownSegment`].
    #[inline]
    pub fn outgoing(
        &self,
        segment: SegmentId,
    ) -> GraphResult<impl Iterator<Item = (Direction, SegmentId)> + '_> {
        self.check(segment)?;
        let start = self.seg_out_start[segment.index()] as usize;
        let end   = self.seg_out_start[segment.index() + 1] as usize;
        Ok((start..end).map(|c| (self.conn_direction[c], self.conn_to[c])))
    }

    /// Segment reached by taking `direction` at the end of `segment`, if that
    /// turn exists.
    pub fn next(&self, segment: SegmentId, direction: Direction) -> GraphResult<Option<SegmentId>> {
        Ok(self
            .outgoing(segment)?
            .find(|&(d, _)| d == direction)
            .map(|(_, to)| to))
    }

    /// The unique direction leading from `from` directly onto `to`, if the
    /// two are adjacent.
    pub fn direction_between(&self, from: SegmentId, to: SegmentId) -> GraphResult<Option<Direction>> {
        self.check(to)?;
        Ok(self
            .outgoing(from)?
            .find(|&(_, next)| next == to)
            .map(|(d, _)| d))
    }
}

// ── SegmentGraphBuilder ───────────────────────────────────────────────────────

/// Construct a [`SegmentGraph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use tr_core::Direction;
/// use tr_graph::SegmentGraphBuilder;
///
/// let mut b = SegmentGraphBuilder::new();
/// let a = b.add_segment("a", 100.0, 13.9);
/// let c = b.add_segment("c", 250.0, 13.9);
/// b.connect(a, Direction::Straight, c);
/// let graph = b.build().unwrap();
/// assert_eq!(graph.segment_count(), 2);
/// assert_eq!(graph.next(a, Direction::Straight).unwrap(), Some(c));
/// ```
#[derive(Default)]
pub struct SegmentGraphBuilder {
    segments:    Vec<RawSegment>,
    connections: Vec<RawConnection>,
}

struct RawSegment {
    name:      String,
    length_m:  f64,
    max_speed: f64,
}

struct RawConnection {
    from:      SegmentId,
    direction: Direction,
    to:        SegmentId,
}

impl SegmentGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for the expected number of segments and connections.
    pub fn with_capacity(segments: usize, connections: usize) -> Self {
        Self {
            segments:    Vec::with_capacity(segments),
            connections: Vec::with_capacity(connections),
        }
    }

    /// Add a segment and return its `SegmentId` (sequential from 0).
    pub fn add_segment(&mut self, name: impl Into<String>, length_m: f64, max_speed_mps: f64) -> SegmentId {
        let id = SegmentId(self.segments.len() as u32);
        self.segments.push(RawSegment {
            name: name.into(),
            length_m,
            max_speed: max_speed_mps,
        });
        id
    }

    /// Add a segment whose max speed is the fastest of its lanes.
    ///
    /// A segment with no lanes gets speed 0 and is rejected by `build`.
    pub fn add_segment_with_lanes(
        &mut self,
        name:        impl Into<String>,
        length_m:    f64,
        lane_speeds: &[f64],
    ) -> SegmentId {
        let max_speed = lane_speeds.iter().copied().fold(0.0_f64, f64::max);
        self.add_segment(name, length_m, max_speed)
    }

    /// Add the turn `from --direction--> to`.
    pub fn connect(&mut self, from: SegmentId, direction: Direction, to: SegmentId) {
        self.connections.push(RawConnection { from, direction, to });
    }

    /// Look up a segment added earlier by name.
    pub fn segment_by_name(&self, name: &str) -> Option<SegmentId> {
        self.segments
            .iter()
            .position(|s| s.name == name)
            .map(|i| SegmentId(i as u32))
    }

    pub fn segment_count(&self) -> usize { self.segments.len() }
    pub fn connection_count(&self) -> usize { self.connections.len() }

    /// Validate and consume the builder, producing a [`SegmentGraph`].
    ///
    /// Time complexity: O(C log C) for the connection sort, where C is the
    /// number of connections.
    pub fn build(self) -> GraphResult<SegmentGraph> {
        let segment_count = self.segments.len();

        // ── Validate segments ─────────────────────────────────────────────
        let mut name_index: FxHashMap<String, SegmentId> =
            FxHashMap::with_capacity_and_hasher(segment_count, Default::default());
        for (i, s) in self.segments.iter().enumerate() {
            if !(s.length_m.is_finite() && s.length_m > 0.0) {
                return Err(GraphError::InvalidLength { name: s.name.clone(), value: s.length_m });
            }
            if !(s.max_speed.is_finite() && s.max_speed > 0.0) {
                return Err(GraphError::InvalidSpeed { name: s.name.clone(), value: s.max_speed });
            }
            if name_index.insert(s.name.clone(), SegmentId(i as u32)).is_some() {
                return Err(GraphError::DuplicateName(s.name.clone()));
            }
        }

        // ── Validate connections ──────────────────────────────────────────
        let mut raw = self.connections;
        for c in &raw {
            for id in [c.from, c.to] {
                if id.index() >= segment_count {
                    return Err(GraphError::UnknownSegment(id));
                }
            }
        }

        // Stable sort keeps per-segment insertion order.
        raw.sort_by_key(|c| c.from.0);

        let mut start = 0;
        while start < raw.len() {
            let from = raw[start].from;
            let end = raw[start..]
                .iter()
                .position(|c| c.from != from)
                .map_or(raw.len(), |p| start + p);
            let exits = &raw[start..end];
            for (i, a) in exits.iter().enumerate() {
                for b in &exits[i + 1..] {
                    if a.direction == b.direction {
                        return Err(GraphError::DuplicateDirection { from, direction: a.direction });
                    }
                    if a.to == b.to {
                        return Err(GraphError::DuplicateNeighbour { from, to: a.to });
                    }
                }
            }
            start = end;
        }

        // ── Build CSR row pointer ─────────────────────────────────────────
        let mut seg_out_start = vec![0u32; segment_count + 1];
        for c in &raw {
            seg_out_start[c.from.index() + 1] += 1;
        }
        for i in 1..=segment_count {
            seg_out_start[i] += seg_out_start[i - 1];
        }
        debug_assert_eq!(seg_out_start[segment_count] as usize, raw.len());

        let conn_to:        Vec<SegmentId> = raw.iter().map(|c| c.to).collect();
        let conn_direction: Vec<Direction> = raw.iter().map(|c| c.direction).collect();

        let (segment_name, (segment_length_m, segment_max_speed)):
            (Vec<String>, (Vec<f64>, Vec<f64>)) = self
            .segments
            .into_iter()
            .map(|s| (s.name, (s.length_m, s.max_speed)))
            .unzip();

        Ok(SegmentGraph {
            segment_name,
            segment_length_m,
            segment_max_speed,
            seg_out_start,
            conn_to,
            conn_direction,
            name_index,
        })
    }
}
