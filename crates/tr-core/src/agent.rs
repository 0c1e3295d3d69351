//! The per-agent routing request.

use crate::{AgentId, SegmentId, SimTime};

/// One vehicle to be routed this epoch.
///
/// Owned by the caller (the simulation harness refreshes `current` and
/// `speed_mps` every step); the routing engine only reads it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub id: AgentId,

    /// Segment the agent currently occupies.
    pub current: SegmentId,

    /// Segment the agent must reach.
    pub destination: SegmentId,

    /// Latest acceptable arrival time.  Only the deadline-aware strategy
    /// reads it.
    pub deadline: Option<SimTime>,

    /// Time the agent entered the network.
    pub start_time: SimTime,

    /// Current speed in m/s.  The lookahead translator aims at least this far
    /// ahead so the agent cannot overshoot its local target in one step.
    pub speed_mps: f64,
}

impl Agent {
    /// An agent at rest with no deadline, created at time zero.
    pub fn new(id: AgentId, current: SegmentId, destination: SegmentId) -> Self {
        Self {
            id,
            current,
            destination,
            deadline:   None,
            start_time: SimTime::ZERO,
            speed_mps:  0.0,
        }
    }

    pub fn with_deadline(mut self, deadline: SimTime) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_start_time(mut self, start_time: SimTime) -> Self {
        self.start_time = start_time;
        self
    }

    pub fn with_speed(mut self, speed_mps: f64) -> Self {
        self.speed_mps = speed_mps;
        self
    }

    /// `true` if the agent is already on its destination segment.
    #[inline]
    pub fn has_arrived(&self) -> bool {
        self.current == self.destination
    }
}
