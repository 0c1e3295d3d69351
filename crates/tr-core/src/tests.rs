//! Unit tests for tr-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, SegmentId};

    #[test]
    fn index_roundtrip() {
        let id = SegmentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(SegmentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(SegmentId::INVALID.0, u32::MAX);
        assert!(!SegmentId::INVALID.is_valid());
        assert!(SegmentId(0).is_valid());
        assert_eq!(SegmentId::default(), SegmentId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
        assert_eq!(SegmentId(3).to_string(), "SegmentId(3)");
    }
}

#[cfg(test)]
mod direction {
    use crate::Direction;

    #[test]
    fn char_codes_roundtrip() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_char(d.as_char()), Some(d));
        }
        assert_eq!(Direction::from_char('x'), None);
    }

    #[test]
    fn codes_are_case_sensitive() {
        assert_eq!("l".parse::<Direction>().unwrap(), Direction::Left);
        assert_eq!("L".parse::<Direction>().unwrap(), Direction::PartLeft);
        assert_eq!(" t ".parse::<Direction>().unwrap(), Direction::TurnAround);
    }

    #[test]
    fn parse_rejects_multi_char() {
        assert!("sl".parse::<Direction>().is_err());
        assert!("".parse::<Direction>().is_err());
    }
}

#[cfg(test)]
mod time {
    use crate::SimTime;

    #[test]
    fn arithmetic() {
        let t = SimTime(10.0);
        assert_eq!(t + 5.0, SimTime(15.0));
        assert_eq!(SimTime(15.0) - t, 5.0);
        assert_eq!(t.offset(2.5).secs(), 12.5);
        assert_eq!(SimTime(3.0).since(SimTime(5.0)), -2.0);
    }

    #[test]
    fn display() {
        assert_eq!(SimTime(12.0).to_string(), "t=12.0s");
    }
}

#[cfg(test)]
mod agent {
    use crate::{Agent, AgentId, SegmentId, SimTime};

    #[test]
    fn builder_methods() {
        let a = Agent::new(AgentId(1), SegmentId(0), SegmentId(2))
            .with_deadline(SimTime(300.0))
            .with_start_time(SimTime(5.0))
            .with_speed(13.9);
        assert_eq!(a.deadline, Some(SimTime(300.0)));
        assert_eq!(a.start_time, SimTime(5.0));
        assert_eq!(a.speed_mps, 13.9);
        assert!(!a.has_arrived());
    }

    #[test]
    fn arrived_when_on_destination() {
        let a = Agent::new(AgentId(1), SegmentId(4), SegmentId(4));
        assert!(a.has_arrived());
        assert_eq!(a.deadline, None);
    }
}

#[cfg(test)]
mod strategy {
    use crate::Strategy;

    #[test]
    fn labels_roundtrip() {
        for s in Strategy::ALL {
            assert_eq!(s.as_str().parse::<Strategy>().unwrap(), s);
        }
        assert!("dijkstra".parse::<Strategy>().is_err());
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, RoutingConfig, Strategy};

    #[test]
    fn defaults_are_valid() {
        let c = RoutingConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.density_penalty, 100.0);
        assert_eq!(c.deadline_sigma, 50.0);
        assert_eq!(c.deadline_mu, 0.0);
        assert_eq!(c.fallback_vehicle_length_m, 5.0);
        assert!(c.refresh_each_expansion);
    }

    #[test]
    fn for_strategy_keeps_defaults() {
        let c = RoutingConfig::for_strategy(Strategy::FloydWarshall);
        assert_eq!(c.strategy, Strategy::FloydWarshall);
        assert_eq!(c.lookahead_min_m, 20.0);
    }

    #[test]
    fn zero_sigma_rejected() {
        let c = RoutingConfig { deadline_sigma: 0.0, ..RoutingConfig::default() };
        assert!(matches!(c.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn nan_penalty_rejected() {
        let c = RoutingConfig { density_penalty: f64::NAN, ..RoutingConfig::default() };
        assert!(c.validate().is_err());
    }

    #[test]
    fn zero_threads_rejected() {
        let c = RoutingConfig { num_threads: Some(0), ..RoutingConfig::default() };
        assert!(c.validate().is_err());
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_config {
    use crate::{RoutingConfig, Strategy};

    #[test]
    fn partial_json_fills_defaults() {
        let c: RoutingConfig =
            serde_json::from_str(r#"{ "strategy": "deadline_a_star", "deadline_sigma": 25.0 }"#)
                .unwrap();
        assert_eq!(c.strategy, Strategy::DeadlineAStar);
        assert_eq!(c.deadline_sigma, 25.0);
        assert_eq!(c.density_penalty, 100.0);
        assert!(c.validate().is_ok());
    }
}
