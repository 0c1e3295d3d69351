//! Decision translation: from a decision list to one lookahead target.
//!
//! The external actuation layer moves an agent toward a single target
//! segment.  Aim too close and the simulator may consider the agent arrived
//! before it reaches its real destination; aim past the destination and the
//! agent overshoots.  The [`TargetResolver`] decides how much of the decision
//! list to consume.

use thiserror::Error;

use tr_core::{Agent, Direction, SegmentId};
use tr_graph::{GraphError, SegmentGraph};

#[derive(Debug, Error, PartialEq)]
pub enum TranslateError {
    #[error("segment {segment} has no '{direction}' exit")]
    InvalidDirection { segment: SegmentId, direction: Direction },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type TranslateResult<T> = Result<T, TranslateError>;

// ── TargetResolver trait ──────────────────────────────────────────────────────

/// Resolves an agent's decision list to the segment handed to the actuation
/// layer.
///
/// An empty decision list must resolve to `agent.current`.
pub trait TargetResolver: Send + Sync {
    fn resolve(
        &self,
        graph:     &SegmentGraph,
        agent:     &Agent,
        decisions: &[Direction],
    ) -> TranslateResult<SegmentId>;
}

// ── LookaheadResolver ─────────────────────────────────────────────────────────

/// Walks the decision list from the agent's current segment while the
/// distance from the end of the current segment to the start of the target
/// stays within `max(agent speed, min_distance_m)` metres.
///
/// The segment right after the current one is always passed through, so
/// with a long enough list the target is at least two segments ahead.  The
/// walk also stops on the destination, at the end of the list, and on the
/// second of two U-turns in a row (the agent would only bounce back and
/// forth).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookaheadResolver {
    pub min_distance_m: f64,
}

impl Default for LookaheadResolver {
    fn default() -> Self {
        Self { min_distance_m: 20.0 }
    }
}

impl LookaheadResolver {
    pub fn new(min_distance_m: f64) -> Self {
        Self { min_distance_m }
    }

    fn window(&self, agent: &Agent) -> f64 {
        let speed = if agent.speed_mps.is_finite() { agent.speed_mps } else { 0.0 };
        speed.max(self.min_distance_m)
    }
}

impl TargetResolver for LookaheadResolver {
    fn resolve(
        &self,
        graph:     &SegmentGraph,
        agent:     &Agent,
        decisions: &[Direction],
    ) -> TranslateResult<SegmentId> {
        graph.check(agent.current)?;

        let window = self.window(agent);
        let mut target = agent.current;
        // Distance from the end of `agent.current` to the start of `target`.
        let mut reach = 0.0;
        let mut previous: Option<Direction> = None;

        for (step, &direction) in decisions.iter().enumerate() {
            if target == agent.destination || reach > window {
                break;
            }
            let next = graph
                .next(target, direction)?
                .ok_or(TranslateError::InvalidDirection { segment: target, direction })?;
            if step > 0 {
                reach += graph.length(target);
            }
            let bounce = direction == Direction::TurnAround && previous == Some(Direction::TurnAround);
            target = next;
            previous = Some(direction);
            if bounce {
                break;
            }
        }
        Ok(target)
    }
}
