//! One epoch's worth of segment costs.

use log::debug;

use tr_core::SegmentId;
use tr_graph::SegmentGraph;

use crate::{EdgeWeight, TrafficSource, WeightError, WeightResult};

/// Costs of every segment under one [`EdgeWeight`] model, indexed by
/// `SegmentId`.
///
/// Immutable once built: an epoch builds a fresh snapshot and every search of
/// that epoch reads the same one.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightSnapshot {
    model: &'static str,
    costs: Vec<f64>,
}

impl WeightSnapshot {
    /// Evaluate `model` on every segment of `graph`.
    pub fn build<W: EdgeWeight + ?Sized>(
        graph:   &SegmentGraph,
        model:   &W,
        traffic: &dyn TrafficSource,
    ) -> WeightResult<Self> {
        let mut costs = Vec::with_capacity(graph.segment_count());
        evaluate_into(graph, model, traffic, &mut costs)?;
        debug!(
            "built {} weight snapshot over {} segments at {}",
            model.name(),
            costs.len(),
            traffic.now()
        );
        Ok(Self { model: model.name(), costs })
    }

    /// Wrap precomputed costs.  Every cost must be finite and non-negative.
    pub fn from_costs(graph: &SegmentGraph, costs: Vec<f64>) -> WeightResult<Self> {
        if costs.len() != graph.segment_count() {
            return Err(WeightError::SizeMismatch { expected: graph.segment_count(), got: costs.len() });
        }
        if let Some(i) = costs.iter().position(|c| !(c.is_finite() && *c >= 0.0)) {
            return Err(WeightError::NumericDegeneracy {
                segment: SegmentId(i as u32),
                model:   "precomputed",
                detail:  format!("cost {}", costs[i]),
            });
        }
        Ok(Self { model: "precomputed", costs })
    }

    /// Cost of `segment`.  `segment` must be a member of the graph the
    /// snapshot was built from.
    #[inline]
    pub fn cost(&self, segment: SegmentId) -> f64 {
        self.costs[segment.index()]
    }

    pub fn model(&self) -> &'static str {
        self.model
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.costs
    }
}

/// Evaluate `model` on every segment of `graph` into `out`, reusing its
/// allocation.
///
/// Searches that need fresher weights than the epoch snapshot keep their own
/// private buffer and refill it with this.
pub fn evaluate_into<W: EdgeWeight + ?Sized>(
    graph:   &SegmentGraph,
    model:   &W,
    traffic: &dyn TrafficSource,
    out:     &mut Vec<f64>,
) -> WeightResult<()> {
    out.clear();
    out.reserve(graph.segment_count());
    for segment in graph.segments() {
        out.push(model.cost(graph, segment, traffic)?);
    }
    Ok(())
}
