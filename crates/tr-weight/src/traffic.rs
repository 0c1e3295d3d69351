//! Live traffic data consumed by the weight models.
//!
//! The routing core never measures traffic itself.  The simulation harness
//! implements [`TrafficSource`] (or fills a [`TrafficSample`]) with whatever
//! its engine reports at the moment of the call.

use tr_core::{SegmentId, SimTime};
use tr_graph::SegmentGraph;

/// Per-segment occupancy and speed readings plus the current clock.
///
/// Implementations must be `Send + Sync` so one source can be read by every
/// search of an epoch from Rayon worker threads.  Readings for a segment the
/// source knows nothing about should be `0.0`.
pub trait TrafficSource: Send + Sync {
    /// Vehicles on `segment` during the last simulation step.
    fn vehicle_count(&self, segment: SegmentId) -> f64;

    /// Mean speed (m/s) on `segment` during the last step; `0.0` if empty.
    fn mean_speed(&self, segment: SegmentId) -> f64;

    /// Mean length (m) of the vehicles on `segment`; `0.0` if empty.
    fn mean_vehicle_length(&self, segment: SegmentId) -> f64;

    /// Simulation time of the readings.
    fn now(&self) -> SimTime;
}

// ── TrafficSample ─────────────────────────────────────────────────────────────

/// Column-per-measurement snapshot of live readings, indexed by `SegmentId`.
///
/// The standard `TrafficSource`: the harness refills the columns at the start
/// of every epoch and hands the sample to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficSample {
    pub time:                SimTime,
    pub vehicle_count:       Vec<f64>,
    pub mean_speed:          Vec<f64>,
    pub mean_vehicle_length: Vec<f64>,
}

impl TrafficSample {
    /// Zero occupancy on every segment of `graph` at `time`.
    pub fn empty(graph: &SegmentGraph, time: SimTime) -> Self {
        Self::with_len(graph.segment_count(), time)
    }

    pub fn with_len(segment_count: usize, time: SimTime) -> Self {
        Self {
            time,
            vehicle_count:       vec![0.0; segment_count],
            mean_speed:          vec![0.0; segment_count],
            mean_vehicle_length: vec![0.0; segment_count],
        }
    }

    /// Record the readings for one segment.  Out-of-range segments are
    /// ignored.
    pub fn record(&mut self, segment: SegmentId, vehicles: f64, mean_speed: f64, mean_length: f64) {
        let i = segment.index();
        if i < self.vehicle_count.len() {
            self.vehicle_count[i]       = vehicles;
            self.mean_speed[i]          = mean_speed;
            self.mean_vehicle_length[i] = mean_length;
        }
    }

    /// Builder-style [`record`](Self::record).
    pub fn with(mut self, segment: SegmentId, vehicles: f64, mean_speed: f64, mean_length: f64) -> Self {
        self.record(segment, vehicles, mean_speed, mean_length);
        self
    }

    pub fn at(mut self, time: SimTime) -> Self {
        self.time = time;
        self
    }

    #[inline]
    fn column(col: &[f64], segment: SegmentId) -> f64 {
        col.get(segment.index()).copied().unwrap_or(0.0)
    }
}

impl TrafficSource for TrafficSample {
    fn vehicle_count(&self, segment: SegmentId) -> f64 {
        Self::column(&self.vehicle_count, segment)
    }

    fn mean_speed(&self, segment: SegmentId) -> f64 {
        Self::column(&self.mean_speed, segment)
    }

    fn mean_vehicle_length(&self, segment: SegmentId) -> f64 {
        Self::column(&self.mean_vehicle_length, segment)
    }

    fn now(&self) -> SimTime {
        self.time
    }
}
