//! `tr-engine` — per-epoch routing orchestration.
//!
//! # Epoch
//!
//! ```text
//! route(agents, graph, live):
//!   ① Precompute — reject duplicate agent ids; build the epoch context:
//!                   PlainDijkstra / DensityDijkstra → nothing
//!                   FloydWarshall  → travel-time all-pairs table
//!                   DeadlineAStar  → log-congestion snapshot + all-pairs table
//!   ② Search     — one search per agent (parallel with the `parallel`
//!                  feature), then decision list → lookahead target.
//!   ③ Collect    — decisions keyed by ascending AgentId.
//! ```
//!
//! Unreachable destinations and missing deadlines leave the agent on its
//! current segment.  Any other failure aborts the epoch.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Runs the search phase and the all-pairs build on Rayon.   |
//! | `serde`    | Forwards `serde` to `tr-core`.                            |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tr_core::{RoutingConfig, Strategy};
//! use tr_engine::RoutingEngine;
//! use tr_weight::TrafficSample;
//!
//! let engine = RoutingEngine::new(RoutingConfig::for_strategy(Strategy::FloydWarshall))?;
//! let live = TrafficSample::empty(&graph, now);
//! let plan = engine.route(&agents, &graph, &live)?;
//! for (agent, target) in plan.targets() {
//!     actuate(agent, target);
//! }
//! ```

pub mod engine;
pub mod error;
pub mod observer;
pub mod plan;
pub mod translate;


pub use engine::{CancelFlag, RoutingEngine};
pub use error::{EngineError, EngineResult};
pub use observer::{EpochObserver, NoopObserver};
pub use plan::{AgentDecision, EpochPlan};
pub use translate::{LookaheadResolver, TargetResolver, TranslateError, TranslateResult};
