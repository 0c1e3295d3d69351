//! Routing engine configuration.
//!
//! Typically loaded from a JSON file by the application crate (with the
//! `serde` feature) and passed to the engine.  Every field has a default, so
//! a config file only needs to name what it overrides.

use crate::{CoreError, CoreResult, Strategy};

/// Top-level routing configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RoutingConfig {
    /// Which search + weight pairing to run every epoch.
    pub strategy: Strategy,

    /// Multiplier on `length * density` in the density-penalized weight.
    /// Default: 100.
    pub density_penalty: f64,

    /// Rebuild the density-penalized weights for every segment at every node
    /// expansion of the incremental search.  When `false` the weights are
    /// built once per search.  Default: `true`.
    pub refresh_each_expansion: bool,

    /// Floor applied to the observed vehicle count in the log-congestion
    /// weight so an empty segment never divides by zero.  Default: 0.01.
    pub min_vehicle_count: f64,

    /// Average vehicle length (m) assumed when a segment reports a smaller
    /// one, usually because it is empty.  Default: 5.
    pub fallback_vehicle_length_m: f64,

    /// Spacing factor between queued vehicles when estimating capacity.
    /// Default: 1.3.
    pub capacity_headroom: f64,

    /// Mean of the lateness z-score used by the deadline heuristic.
    /// Default: 0.
    pub deadline_mu: f64,

    /// Standard deviation of the lateness z-score.  Must be positive.
    /// Default: 50.
    pub deadline_sigma: f64,

    /// Minimum lookahead window (m): how far past the end of the current
    /// segment the target segment may start.
    /// Default: 20.
    pub lookahead_min_m: f64,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    pub num_threads: Option<usize>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            strategy:                  Strategy::default(),
            density_penalty:           100.0,
            refresh_each_expansion:    true,
            min_vehicle_count:         0.01,
            fallback_vehicle_length_m: 5.0,
            capacity_headroom:         1.3,
            deadline_mu:               0.0,
            deadline_sigma:            50.0,
            lookahead_min_m:           20.0,
            num_threads:               None,
        }
    }
}

impl RoutingConfig {
    /// Default configuration running `strategy`.
    pub fn for_strategy(strategy: Strategy) -> Self {
        Self { strategy, ..Self::default() }
    }

    /// Reject values that would make a weight formula or the heuristic
    /// degenerate.
    pub fn validate(&self) -> CoreResult<()> {
        fn check(ok: bool, what: &str, value: f64) -> CoreResult<()> {
            if ok {
                Ok(())
            } else {
                Err(CoreError::Config(format!("{what} has invalid value {value}")))
            }
        }

        check(self.density_penalty.is_finite() && self.density_penalty >= 0.0,
              "density_penalty", self.density_penalty)?;
        check(self.min_vehicle_count.is_finite() && self.min_vehicle_count > 0.0,
              "min_vehicle_count", self.min_vehicle_count)?;
        check(self.fallback_vehicle_length_m.is_finite() && self.fallback_vehicle_length_m > 0.0,
              "fallback_vehicle_length_m", self.fallback_vehicle_length_m)?;
        check(self.capacity_headroom.is_finite() && self.capacity_headroom > 0.0,
              "capacity_headroom", self.capacity_headroom)?;
        check(self.deadline_mu.is_finite(), "deadline_mu", self.deadline_mu)?;
        check(self.deadline_sigma.is_finite() && self.deadline_sigma > 0.0,
              "deadline_sigma", self.deadline_sigma)?;
        check(self.lookahead_min_m.is_finite() && self.lookahead_min_m >= 0.0,
              "lookahead_min_m", self.lookahead_min_m)?;

        if self.num_threads == Some(0) {
            return Err(CoreError::Config("num_threads must be at least 1".into()));
        }
        Ok(())
    }
}
