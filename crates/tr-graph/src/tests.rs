//! Unit tests for tr-graph.
//!
//! All tests use hand-crafted graphs so they run without a network file.

#[cfg(test)]
mod helpers {
    use tr_core::{Direction, SegmentId};
    use crate::{SegmentGraph, SegmentGraphBuilder};

    /// Four segments in a one-way ring plus an isolated fifth:
    ///
    /// ```text
    ///   a ─s→ b ─s→ c ─s→ d ─s→ a        e (no connections)
    /// ```
    ///
    /// `b` can also turn around onto `a`.
    pub fn ring_with_island() -> (SegmentGraph, [SegmentId; 5]) {
        let mut b = SegmentGraphBuilder::new();
        let sa = b.add_segment("a", 100.0, 13.9);
        let sb = b.add_segment("b", 100.0, 13.9);
        let sc = b.add_segment("c", 100.0, 13.9);
        let sd = b.add_segment("d", 100.0, 13.9);
        let se = b.add_segment("e", 100.0, 13.9);
        b.connect(sa, Direction::Straight, sb);
        b.connect(sb, Direction::Straight, sc);
        b.connect(sb, Direction::TurnAround, sa);
        b.connect(sc, Direction::Straight, sd);
        b.connect(sd, Direction::Straight, sa);
        (b.build().unwrap(), [sa, sb, sc, sd, se])
    }
}

// ── Builder & structure ───────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use tr_core::{Direction, SegmentId};
    use crate::{GraphError, SegmentGraphBuilder};

    #[test]
    fn empty_build() {
        let g = SegmentGraphBuilder::new().build().unwrap();
        assert_eq!(g.segment_count(), 0);
        assert_eq!(g.connection_count(), 0);
        assert!(g.is_empty());
    }

    #[test]
    fn lane_speeds_take_maximum() {
        let mut b = SegmentGraphBuilder::new();
        let s = b.add_segment_with_lanes("multi", 80.0, &[8.3, 13.9, 11.1]);
        let g = b.build().unwrap();
        assert_eq!(g.max_speed(s), 13.9);
        assert_eq!(g.length(s), 80.0);
    }

    #[test]
    fn laneless_segment_rejected() {
        let mut b = SegmentGraphBuilder::new();
        b.add_segment_with_lanes("bare", 80.0, &[]);
        assert!(matches!(b.build(), Err(GraphError::InvalidSpeed { .. })));
    }

    #[test]
    fn non_positive_length_rejected() {
        let mut b = SegmentGraphBuilder::new();
        b.add_segment("zero", 0.0, 10.0);
        assert!(matches!(b.build(), Err(GraphError::InvalidLength { .. })));

        let mut b = SegmentGraphBuilder::new();
        b.add_segment("nan", f64::NAN, 10.0);
        assert!(matches!(b.build(), Err(GraphError::InvalidLength { .. })));
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut b = SegmentGraphBuilder::new();
        b.add_segment("x", 10.0, 10.0);
        b.add_segment("x", 20.0, 10.0);
        assert_eq!(b.build().unwrap_err(), GraphError::DuplicateName("x".into()));
    }

    #[test]
    fn duplicate_direction_rejected() {
        let mut b = SegmentGraphBuilder::new();
        let s0 = b.add_segment("0", 10.0, 10.0);
        let s1 = b.add_segment("1", 10.0, 10.0);
        let s2 = b.add_segment("2", 10.0, 10.0);
        b.connect(s0, Direction::Left, s1);
        b.connect(s0, Direction::Left, s2);
        assert!(matches!(b.build(), Err(GraphError::DuplicateDirection { .. })));
    }

    #[test]
    fn duplicate_neighbour_rejected() {
        let mut b = SegmentGraphBuilder::new();
        let s0 = b.add_segment("0", 10.0, 10.0);
        let s1 = b.add_segment("1", 10.0, 10.0);
        b.connect(s0, Direction::Left, s1);
        b.connect(s0, Direction::PartLeft, s1);
        assert!(matches!(b.build(), Err(GraphError::DuplicateNeighbour { .. })));
    }

    #[test]
    fn connection_to_unknown_segment_rejected() {
        let mut b = SegmentGraphBuilder::new();
        let s0 = b.add_segment("0", 10.0, 10.0);
        b.connect(s0, Direction::Straight, SegmentId(9));
        assert_eq!(b.build().unwrap_err(), GraphError::UnknownSegment(SegmentId(9)));
    }

    #[test]
    fn builder_name_lookup() {
        let mut b = SegmentGraphBuilder::with_capacity(2, 1);
        b.add_segment("first", 10.0, 10.0);
        let second = b.add_segment("second", 10.0, 10.0);
        assert_eq!(b.segment_by_name("second"), Some(second));
        assert_eq!(b.segment_by_name("third"), None);
        assert_eq!(b.segment_count(), 2);
    }
}

// ── Traversal ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod traversal {
    use tr_core::{Direction, SegmentId};
    use crate::GraphError;

    #[test]
    fn outgoing_keeps_insertion_order() {
        let (g, [sa, sb, sc, ..]) = super::helpers::ring_with_island();
        let exits: Vec<_> = g.outgoing(sb).unwrap().collect();
        assert_eq!(exits, vec![(Direction::Straight, sc), (Direction::TurnAround, sa)]);
    }

    #[test]
    fn dead_end_is_empty_not_error() {
        let (g, [.., se]) = super::helpers::ring_with_island();
        assert_eq!(g.outgoing(se).unwrap().count(), 0);
    }

    #[test]
    fn unknown_segment_is_error() {
        let (g, _) = super::helpers::ring_with_island();
        assert!(matches!(g.outgoing(SegmentId(99)), Err(GraphError::UnknownSegment(SegmentId(99)))));
        assert!(g.outgoing(SegmentId::INVALID).is_err());
    }

    #[test]
    fn next_and_direction_between() {
        let (g, [sa, sb, sc, sd, _]) = super::helpers::ring_with_island();
        assert_eq!(g.next(sb, Direction::TurnAround).unwrap(), Some(sa));
        assert_eq!(g.next(sb, Direction::Left).unwrap(), None);
        assert_eq!(g.direction_between(sc, sd).unwrap(), Some(Direction::Straight));
        assert_eq!(g.direction_between(sa, sc).unwrap(), None);
    }

    #[test]
    fn index_bijection() {
        let (g, segs) = super::helpers::ring_with_island();
        for s in segs {
            let i = g.index(s).unwrap();
            assert_eq!(g.from_index(i).unwrap(), s);
        }
        assert!(g.from_index(5).is_err());
        assert!(g.index(SegmentId(5)).is_err());
        assert_eq!(g.segments().collect::<Vec<_>>(), segs.to_vec());
    }

    #[test]
    fn names_resolve() {
        let (g, [_, sb, ..]) = super::helpers::ring_with_island();
        assert_eq!(g.segment_by_name("b"), Some(sb));
        assert_eq!(g.name(sb), "b");
        assert_eq!(g.segment_by_name("zz"), None);
    }

    #[test]
    fn csr_consistency() {
        let (g, segs) = super::helpers::ring_with_island();
        for s in segs {
            let start = g.seg_out_start[s.index()] as usize;
            let end   = g.seg_out_start[s.index() + 1] as usize;
            let exits: Vec<_> = g.outgoing(s).unwrap().collect();
            assert_eq!(exits.len(), end - start);
            for (c, &(direction, to)) in (start..end).zip(&exits) {
                assert_eq!((g.conn_direction[c], g.conn_to[c]), (direction, to));
            }
        }
        assert_eq!(g.connection_count(), 5);
    }
}
