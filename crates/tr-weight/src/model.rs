//! Weight models: per-segment scalar costs from live traffic readings.
//!
//! # Pluggability
//!
//! The searches are generic over [`EdgeWeight`], so a new cost model only
//! needs this trait.  The four shipped models:
//!
//! | Model              | Cost                                          | Unit |
//! |--------------------|-----------------------------------------------|------|
//! | [`Length`]         | `length`                                      | m    |
//! | [`DensityPenalized`] | `max(length, length * factor * count / length)` | m  |
//! | [`TravelTime`]     | `length / (mean speed, else max speed)`       | s    |
//! | [`LogCongestion`]  | `length / (max speed * ln(capacity / count))` | s    |
//!
//! # Degeneracy
//!
//! Readings are sanitized first: negative or non-finite values count as zero.
//! Every model then either returns a finite non-negative cost or
//! [`WeightError::NumericDegeneracy`]; `NaN` never escapes.

use tr_core::{RoutingConfig, SegmentId};
use tr_graph::SegmentGraph;

use crate::{TrafficSource, WeightError, WeightResult};

/// Pluggable per-segment cost function.
///
/// `segment` must be a member of `graph`; the snapshot builder only calls
/// this for graph members.
pub trait EdgeWeight: Send + Sync {
    /// Short label used in logs and errors.
    fn name(&self) -> &'static str;

    fn cost(&self, graph: &SegmentGraph, segment: SegmentId, traffic: &dyn TrafficSource) -> WeightResult<f64>;
}

/// Negative and non-finite readings count as "nothing observed".
#[inline]
fn sanitize(reading: f64) -> f64 {
    if reading.is_finite() && reading > 0.0 { reading } else { 0.0 }
}

fn degenerate(segment: SegmentId, model: &'static str, detail: String) -> WeightError {
    WeightError::NumericDegeneracy { segment, model, detail }
}

#[inline]
fn checked(cost: f64, segment: SegmentId, model: &'static str) -> WeightResult<f64> {
    if cost.is_finite() && cost >= 0.0 {
        Ok(cost)
    } else {
        Err(degenerate(segment, model, format!("cost evaluated to {cost}")))
    }
}

// ── Length ────────────────────────────────────────────────────────────────────

/// Physical length.  Also the "true distance" ledger of the density search.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Length;

impl EdgeWeight for Length {
    fn name(&self) -> &'static str {
        "length"
    }

    fn cost(&self, graph: &SegmentGraph, segment: SegmentId, _traffic: &dyn TrafficSource) -> WeightResult<f64> {
        checked(graph.length(segment), segment, self.name())
    }
}

// ── DensityPenalized ──────────────────────────────────────────────────────────

/// Length inflated by vehicle density; equal to the length on an empty
/// segment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DensityPenalized {
    pub factor: f64,
}

impl Default for DensityPenalized {
    fn default() -> Self {
        Self { factor: 100.0 }
    }
}

impl DensityPenalized {
    pub fn from_config(config: &RoutingConfig) -> Self {
        Self { factor: config.density_penalty }
    }
}

impl EdgeWeight for DensityPenalized {
    fn name(&self) -> &'static str {
        "density"
    }

    fn cost(&self, graph: &SegmentGraph, segment: SegmentId, traffic: &dyn TrafficSource) -> WeightResult<f64> {
        let length  = graph.length(segment);
        let density = sanitize(traffic.vehicle_count(segment)) / length;
        checked(length.max(length * self.factor * density), segment, self.name())
    }
}

// ── TravelTime ────────────────────────────────────────────────────────────────

/// Seconds to traverse the segment at the observed mean speed, or at the
/// speed limit when nobody is on it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TravelTime;

impl EdgeWeight for TravelTime {
    fn name(&self) -> &'static str {
        "travel_time"
    }

    fn cost(&self, graph: &SegmentGraph, segment: SegmentId, traffic: &dyn TrafficSource) -> WeightResult<f64> {
        let observed = sanitize(traffic.mean_speed(segment));
        let speed = if observed > 0.0 { observed } else { graph.max_speed(segment) };
        if !(speed.is_finite() && speed > 0.0) {
            return Err(degenerate(segment, self.name(), format!("speed {speed}")));
        }
        checked(graph.length(segment) / speed, segment, self.name())
    }
}

// ── LogCongestion ─────────────────────────────────────────────────────────────

/// Travel time under a logarithmic speed–occupancy model.
///
/// ```text
/// count    = max(observed count, min_vehicle_count)
/// avg_len  = max(observed mean length, fallback_vehicle_length)
/// capacity = max(count, length / (headroom * avg_len))   (+1 when equal)
/// speed    = max_speed * ln(capacity / count)
/// cost     = length / speed
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LogCongestion {
    pub min_vehicle_count:       f64,
    pub fallback_vehicle_length: f64,
    pub headroom:                f64,
}

impl Default for LogCongestion {
    fn default() -> Self {
        Self {
            min_vehicle_count:       0.01,
            fallback_vehicle_length: 5.0,
            headroom:                1.3,
        }
    }
}

impl LogCongestion {
    pub fn from_config(config: &RoutingConfig) -> Self {
        Self {
            min_vehicle_count:       config.min_vehicle_count,
            fallback_vehicle_length: config.fallback_vehicle_length_m,
            headroom:                config.capacity_headroom,
        }
    }
}

impl EdgeWeight for LogCongestion {
    fn name(&self) -> &'static str {
        "log_congestion"
    }

    fn cost(&self, graph: &SegmentGraph, segment: SegmentId, traffic: &dyn TrafficSource) -> WeightResult<f64> {
        let length  = graph.length(segment);
        let count   = sanitize(traffic.vehicle_count(segment)).max(self.min_vehicle_count);
        let avg_len = sanitize(traffic.mean_vehicle_length(segment)).max(self.fallback_vehicle_length);

        let mut capacity = count.max(length / (self.headroom * avg_len));
        // A full segment would give ln(1) = 0.
        if capacity == count {
            capacity += 1.0;
        }
        if !(capacity > count) {
            return Err(degenerate(
                segment,
                self.name(),
                format!("capacity {capacity} does not exceed vehicle count {count}"),
            ));
        }

        let speed = graph.max_speed(segment) * (capacity / count).ln();
        if !(speed.is_finite() && speed > 0.0) {
            return Err(degenerate(segment, self.name(), format!("estimated speed {speed}")));
        }
        checked(length / speed, segment, self.name())
    }
}
