//! Min-heap entry with a float priority and a deterministic tiebreak.

use std::cmp::Ordering;

use tr_core::SegmentId;

/// A frontier entry.  Ordered by `(priority, tiebreak)` only; wrap in
/// `std::cmp::Reverse` to pop the lowest first from a `BinaryHeap`.
///
/// `cost` is the accumulated cost when the entry was pushed, kept to
/// recognise stale entries.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Scored {
    pub priority: f64,
    pub tiebreak: u64,
    pub cost:     f64,
    pub segment:  SegmentId,
}

impl PartialEq for Scored {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scored {}

impl PartialOrd for Scored {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scored {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then(self.tiebreak.cmp(&other.tiebreak))
    }
}
