//! grid — epoch routing on a synthetic lattice.
//!
//! Places a fleet of vehicles on a lattice of two-way streets and runs
//! decision epochs until every vehicle reaches its destination or the epoch
//! limit is hit.  Between epochs each vehicle jumps straight to the
//! lookahead target it was given, and the live traffic sample is rebuilt
//! from the new positions.
//!
//! Usage:
//!
//! ```text
//! grid [config.json]
//! ```
//!
//! Without a config file every strategy is run in turn with default
//! settings.  Set `RUST_LOG=debug` for per-epoch detail.

mod network;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{info, warn};

use tr_core::{Agent, AgentId, RoutingConfig, SegmentId, SimTime, Strategy};
use tr_engine::{AgentDecision, EpochObserver, RoutingEngine};
use tr_graph::SegmentGraph;
use tr_weight::TrafficSample;

use network::build_lattice;

// ── Constants ─────────────────────────────────────────────────────────────────

const SIDE:             usize = 6;
const BLOCK_M:          f64   = 120.0;
const VEHICLE_COUNT:    u32   = 40;
const VEHICLE_SPEED:    f64   = 10.0;
const VEHICLE_LENGTH_M: f64   = 4.5;
const EPOCH_SECS:       f64   = 15.0;
const MAX_EPOCHS:       usize = 60;
const DEADLINE_SECS:    f64   = 400.0;

// ── Observer ──────────────────────────────────────────────────────────────────

/// Counts vehicles the engine could not route.
#[derive(Default)]
struct StrandedCounter {
    stranded: usize,
}

impl EpochObserver for StrandedCounter {
    fn on_agent_routed(&mut self, agent: AgentId, decision: &AgentDecision) {
        if let Some(e) = &decision.failure {
            warn!("{agent}: {e}");
            self.stranded += 1;
        }
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_config(path: &Path) -> Result<RoutingConfig> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file)).with_context(|| format!("parsing {}", path.display()))
}

/// Spread vehicles over the lattice with fixed strides so every run is
/// identical.
fn build_fleet(graph: &SegmentGraph) -> Result<Vec<Agent>> {
    let n = graph.segment_count();
    (0..VEHICLE_COUNT)
        .map(|i| -> Result<Agent> {
            let from = graph.from_index((i as usize * 7) % n)?;
            let to = graph.from_index((i as usize * 13 + n / 2) % n)?;
            let start = SimTime(f64::from(i % 4) * EPOCH_SECS);
            Ok(Agent::new(AgentId(i), from, to)
                .with_start_time(start)
                .with_deadline(start.offset(DEADLINE_SECS))
                .with_speed(VEHICLE_SPEED))
        })
        .collect()
}

/// Occupancy sample from the vehicles' current positions.
fn sample(graph: &SegmentGraph, fleet: &[Agent], now: SimTime) -> TrafficSample {
    let mut counts = vec![0.0; graph.segment_count()];
    for a in fleet {
        counts[a.current.index()] += 1.0;
    }
    let mut s = TrafficSample::empty(graph, now);
    for (i, &c) in counts.iter().enumerate() {
        if c > 0.0 {
            s.record(SegmentId(i as u32), c, VEHICLE_SPEED, VEHICLE_LENGTH_M);
        }
    }
    s
}

// ── Run ───────────────────────────────────────────────────────────────────────

struct Outcome {
    arrived:  usize,
    epochs:   usize,
    stranded: usize,
}

fn run(config: RoutingConfig, graph: &SegmentGraph, fleet: &[Agent]) -> Result<Outcome> {
    let engine = RoutingEngine::new(config)?;
    let mut active: Vec<Agent> = fleet.to_vec();
    let mut arrived = 0;
    let mut observer = StrandedCounter::default();
    let mut epochs = 0;

    while epochs < MAX_EPOCHS && !active.is_empty() {
        let now = SimTime(epochs as f64 * EPOCH_SECS);
        epochs += 1;

        let started: Vec<Agent> = active.iter().filter(|a| a.start_time <= now).cloned().collect();
        let live = sample(graph, &started, now);
        let plan = engine.route_observed(&started, graph, &live, &mut observer)?;

        for a in &mut active {
            if let Some(target) = plan.target(a.id) {
                a.current = target;
            }
        }
        let before = active.len();
        active.retain(|a| !a.has_arrived());
        arrived += before - active.len();
    }

    Ok(Outcome { arrived, epochs, stranded: observer.stranded })
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let base = match std::env::args().nth(1) {
        Some(path) => Some(load_config(Path::new(&path))?),
        None => None,
    };
    let strategies: Vec<Strategy> = match &base {
        Some(config) => vec![config.strategy],
        None => Strategy::ALL.to_vec(),
    };
    let base = base.unwrap_or_default();

    let graph = build_lattice(SIDE, BLOCK_M)?;
    info!(
        "lattice {SIDE}x{SIDE}: {} segments, {} connections",
        graph.segment_count(),
        graph.connection_count()
    );
    let fleet = build_fleet(&graph)?;

    for strategy in strategies {
        let config = RoutingConfig { strategy, ..base.clone() };
        let t0 = Instant::now();
        let out = run(config, &graph, &fleet)?;
        info!(
            "{:>16}: {}/{} arrived in {} epochs ({} stranded decisions) [{:.2?}]",
            strategy.as_str(),
            out.arrived,
            fleet.len(),
            out.epochs,
            out.stranded,
            t0.elapsed()
        );
    }
    Ok(())
}
