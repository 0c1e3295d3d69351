//! Unit tests for tr-weight.

#[cfg(test)]
mod helpers {
    use tr_core::{Direction, SegmentId};
    use tr_graph::{SegmentGraph, SegmentGraphBuilder};

    /// Two segments, 100 m at 10 m/s and 400 m at 20 m/s, `a → b`.
    pub fn pair() -> (SegmentGraph, [SegmentId; 2]) {
        let mut b = SegmentGraphBuilder::new();
        let sa = b.add_segment("a", 100.0, 10.0);
        let sb = b.add_segment("b", 400.0, 20.0);
        b.connect(sa, Direction::Straight, sb);
        (b.build().unwrap(), [sa, sb])
    }
}

// ── TrafficSample ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod sample {
    use tr_core::{SegmentId, SimTime};
    use crate::{TrafficSample, TrafficSource};

    #[test]
    fn empty_sample_reads_zero() {
        let (g, [sa, _]) = super::helpers::pair();
        let s = TrafficSample::empty(&g, SimTime(3.0));
        assert_eq!(s.vehicle_count(sa), 0.0);
        assert_eq!(s.mean_speed(sa), 0.0);
        assert_eq!(s.now(), SimTime(3.0));
    }

    #[test]
    fn record_and_out_of_range() {
        let (g, [_, sb]) = super::helpers::pair();
        let s = TrafficSample::empty(&g, SimTime::ZERO)
            .with(sb, 4.0, 7.5, 4.2)
            .with(SegmentId(50), 9.0, 9.0, 9.0)
            .at(SimTime(60.0));
        assert_eq!(s.vehicle_count(sb), 4.0);
        assert_eq!(s.mean_speed(sb), 7.5);
        assert_eq!(s.mean_vehicle_length(sb), 4.2);
        assert_eq!(s.vehicle_count(SegmentId(50)), 0.0);
        assert_eq!(s.now(), SimTime(60.0));
    }
}

// ── Models ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod models {
    use tr_core::{RoutingConfig, SimTime};
    use crate::{DensityPenalized, EdgeWeight, Length, LogCongestion, TrafficSample, TravelTime, WeightError};

    #[test]
    fn length_ignores_traffic() {
        let (g, [sa, sb]) = super::helpers::pair();
        let busy = TrafficSample::empty(&g, SimTime::ZERO).with(sa, 30.0, 1.0, 5.0);
        assert_eq!(Length.cost(&g, sa, &busy).unwrap(), 100.0);
        assert_eq!(Length.cost(&g, sb, &busy).unwrap(), 400.0);
    }

    #[test]
    fn density_degenerates_to_length_when_empty() {
        let (g, [sa, _]) = super::helpers::pair();
        let empty = TrafficSample::empty(&g, SimTime::ZERO);
        assert_eq!(DensityPenalized::default().cost(&g, sa, &empty).unwrap(), 100.0);
    }

    #[test]
    fn density_penalty_scales_with_count() {
        let (g, [sa, _]) = super::helpers::pair();
        let model = DensityPenalized::default();
        // One vehicle on 100 m: 100 * 100 * 0.01 = 100, tied with length.
        let one = TrafficSample::empty(&g, SimTime::ZERO).with(sa, 1.0, 0.0, 0.0);
        assert_eq!(model.cost(&g, sa, &one).unwrap(), 100.0);
        // Three vehicles: 100 * 100 * 0.03 = 300.
        let three = TrafficSample::empty(&g, SimTime::ZERO).with(sa, 3.0, 0.0, 0.0);
        assert!((model.cost(&g, sa, &three).unwrap() - 300.0).abs() < 1e-9);
    }

    #[test]
    fn density_never_below_length() {
        let (g, [sa, sb]) = super::helpers::pair();
        let model = DensityPenalized { factor: 0.5 };
        let t = TrafficSample::empty(&g, SimTime::ZERO).with(sa, 2.0, 0.0, 0.0);
        for s in [sa, sb] {
            assert!(model.cost(&g, s, &t).unwrap() >= g.length(s));
        }
    }

    #[test]
    fn negative_count_is_sanitized() {
        let (g, [sa, _]) = super::helpers::pair();
        let t = TrafficSample::empty(&g, SimTime::ZERO).with(sa, -5.0, f64::NAN, f64::INFINITY);
        assert_eq!(DensityPenalized::default().cost(&g, sa, &t).unwrap(), 100.0);
        assert_eq!(TravelTime.cost(&g, sa, &t).unwrap(), 10.0);
    }

    #[test]
    fn travel_time_uses_observed_speed() {
        let (g, [sa, sb]) = super::helpers::pair();
        let t = TrafficSample::empty(&g, SimTime::ZERO).with(sa, 3.0, 5.0, 4.5);
        assert_eq!(TravelTime.cost(&g, sa, &t).unwrap(), 20.0);
        // Empty segment falls back to the limit: 400 m / 20 m/s.
        assert_eq!(TravelTime.cost(&g, sb, &t).unwrap(), 20.0);
    }

    #[test]
    fn log_congestion_empty_segment() {
        let (g, [sa, _]) = super::helpers::pair();
        let t = TrafficSample::empty(&g, SimTime::ZERO);
        let capacity = 100.0 / (1.3 * 5.0);
        let expected = 100.0 / (10.0 * (capacity / 0.01_f64).ln());
        let got = LogCongestion::default().cost(&g, sa, &t).unwrap();
        assert!((got - expected).abs() < 1e-9, "got {got}, expected {expected}");
    }

    #[test]
    fn log_congestion_grows_with_occupancy() {
        let (g, [sa, _]) = super::helpers::pair();
        let model = LogCongestion::default();
        let mut last = 0.0;
        for count in [0.0, 2.0, 6.0, 12.0] {
            let t = TrafficSample::empty(&g, SimTime::ZERO).with(sa, count, 0.0, 5.0);
            let cost = model.cost(&g, sa, &t).unwrap();
            assert!(cost > last, "count {count}: {cost} <= {last}");
            last = cost;
        }
    }

    #[test]
    fn log_congestion_saturated_segment_stays_finite() {
        let (g, [sa, _]) = super::helpers::pair();
        // 20 vehicles exceed the ~15.4 estimated capacity: capacity = 20 + 1.
        let t = TrafficSample::empty(&g, SimTime::ZERO).with(sa, 20.0, 0.0, 5.0);
        let cost = LogCongestion::default().cost(&g, sa, &t).unwrap();
        let expected = 100.0 / (10.0 * (21.0_f64 / 20.0).ln());
        assert!((cost - expected).abs() < 1e-9);
    }

    #[test]
    fn log_congestion_reports_degeneracy() {
        let (g, [sa, _]) = super::helpers::pair();
        // capacity + 1 is indistinguishable from capacity at this magnitude.
        let t = TrafficSample::empty(&g, SimTime::ZERO).with(sa, 1e17, 0.0, 5.0);
        let err = LogCongestion::default().cost(&g, sa, &t).unwrap_err();
        assert!(matches!(err, WeightError::NumericDegeneracy { model: "log_congestion", .. }));
    }

    #[test]
    fn from_config_reads_constants() {
        let c = RoutingConfig {
            density_penalty: 7.0,
            min_vehicle_count: 0.5,
            fallback_vehicle_length_m: 4.0,
            capacity_headroom: 2.0,
            ..RoutingConfig::default()
        };
        assert_eq!(DensityPenalized::from_config(&c).factor, 7.0);
        let lc = LogCongestion::from_config(&c);
        assert_eq!(lc.min_vehicle_count, 0.5);
        assert_eq!(lc.fallback_vehicle_length, 4.0);
        assert_eq!(lc.headroom, 2.0);
    }
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod snapshot {
    use tr_core::{SegmentId, SimTime};
    use crate::{TrafficSample, TravelTime, WeightError, WeightSnapshot, evaluate_into};

    #[test]
    fn build_covers_every_segment() {
        let (g, [sa, sb]) = super::helpers::pair();
        let t = TrafficSample::empty(&g, SimTime::ZERO);
        let snap = WeightSnapshot::build(&g, &TravelTime, &t).unwrap();
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.cost(sa), 10.0);
        assert_eq!(snap.cost(sb), 20.0);
        assert_eq!(snap.model(), "travel_time");
    }

    #[test]
    fn evaluate_into_reuses_buffer() {
        let (g, _) = super::helpers::pair();
        let t = TrafficSample::empty(&g, SimTime::ZERO);
        let mut buf = vec![99.0; 7];
        evaluate_into(&g, &TravelTime, &t, &mut buf).unwrap();
        assert_eq!(buf, vec![10.0, 20.0]);
    }

    #[test]
    fn from_costs_validates() {
        let (g, _) = super::helpers::pair();
        assert!(WeightSnapshot::from_costs(&g, vec![1.0, 2.0]).is_ok());
        assert!(matches!(
            WeightSnapshot::from_costs(&g, vec![1.0]),
            Err(WeightError::SizeMismatch { expected: 2, got: 1 })
        ));
        assert!(matches!(
            WeightSnapshot::from_costs(&g, vec![1.0, f64::NAN]),
            Err(WeightError::NumericDegeneracy { segment: SegmentId(1), .. })
        ));
        assert!(WeightSnapshot::from_costs(&g, vec![-1.0, 2.0]).is_err());
    }
}
