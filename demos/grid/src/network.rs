//! Synthetic lattice road network.
//!
//! `side × side` intersections joined by two-way streets, one segment per
//! direction of travel.  Every segment can continue straight, turn left or
//! right, or U-turn at the intersection it ends on, where the street layout
//! allows.

use anyhow::Result;

use tr_core::{Direction, SegmentId};
use tr_graph::{SegmentGraph, SegmentGraphBuilder};

/// Compass heading of a segment, counter-clockwise from east.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Heading {
    East,
    North,
    West,
    South,
}

impl Heading {
    fn quarter_turns(self) -> u8 {
        match self {
            Heading::East  => 0,
            Heading::North => 1,
            Heading::West  => 2,
            Heading::South => 3,
        }
    }

    /// The turn that takes a vehicle heading `self` onto `next`.
    fn turn_onto(self, next: Heading) -> Direction {
        match (next.quarter_turns() + 4 - self.quarter_turns()) % 4 {
            0 => Direction::Straight,
            1 => Direction::Left,
            2 => Direction::TurnAround,
            _ => Direction::Right,
        }
    }
}

struct Street {
    start:   usize,
    end:     usize,
    heading: Heading,
    id:      SegmentId,
}

/// Build the lattice.  Avenues (east–west) are faster than the cross
/// streets.
pub fn build_lattice(side: usize, block_m: f64) -> Result<SegmentGraph> {
    let mut b = SegmentGraphBuilder::new();
    let node = |x: usize, y: usize| y * side + x;
    let mut streets = Vec::new();

    let mut add = |b: &mut SegmentGraphBuilder, start: usize, end: usize, heading: Heading, speed: f64| {
        let id = b.add_segment(format!("{start}-{end}"), block_m, speed);
        streets.push(Street { start, end, heading, id });
    };

    for y in 0..side {
        for x in 0..side {
            if x + 1 < side {
                add(&mut b, node(x, y), node(x + 1, y), Heading::East, 13.9);
                add(&mut b, node(x + 1, y), node(x, y), Heading::West, 13.9);
            }
            if y + 1 < side {
                add(&mut b, node(x, y), node(x, y + 1), Heading::North, 8.3);
                add(&mut b, node(x, y + 1), node(x, y), Heading::South, 8.3);
            }
        }
    }

    for from in &streets {
        for onto in streets.iter().filter(|s| s.start == from.end) {
            b.connect(from.id, from.heading.turn_onto(onto.heading), onto.id);
        }
    }
    Ok(b.build()?)
}
