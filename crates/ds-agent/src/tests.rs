//! Unit tests for ds-agent.

#[cfg(test)]
mod builder {
    use ds_core::{AgentId, AgentKind, Tick, Vec2};

    use crate::{AgentStoreBuilder, KinematicState, VehicleParams};

    #[test]
    fn initial_agents_are_live_from_tick_zero() {
        let store = AgentStoreBuilder::new()
            .agent(AgentKind::Car, VehicleParams::passenger_car(), KinematicState::default())
            .agent(AgentKind::Truck, VehicleParams::truck(), KinematicState::default())
            .build();
        assert_eq!(store.count, 2);
        assert!(store.is_live(AgentId(0)));
        assert!(store.is_live(AgentId(1)));
        assert_eq!(store.active_from[1], Tick::ZERO);
        assert_eq!(store.kind[1], AgentKind::Truck);
    }

    #[test]
    fn zero_agents() {
        let store = AgentStoreBuilder::new().build();
        assert!(store.is_empty());
        assert_eq!(store.live_ids().count(), 0);
    }

    #[test]
    fn initial_state_is_kept() {
        let state = KinematicState::at(Vec2::new(3.0, 4.0), 0.5, 12.0);
        let store = AgentStoreBuilder::new()
            .agent(AgentKind::Car, VehicleParams::default(), state)
            .build();
        assert_eq!(*store.state(AgentId(0)), state);
    }
}

#[cfg(test)]
mod store {
    use ds_core::{AgentId, AgentKind, Tick};

    use crate::{AgentStore, KinematicState, VehicleParams};

    #[test]
    fn push_assigns_dense_ids_and_starts_inactive() {
        let mut store = AgentStore::new();
        let a = store.push_agent(AgentKind::Car, VehicleParams::default(), KinematicState::default(), Tick(0));
        let b = store.push_agent(AgentKind::Car, VehicleParams::default(), KinematicState::default(), Tick(51));
        assert_eq!((a, b), (AgentId(0), AgentId(1)));
        assert!(!store.is_live(b));
        assert_eq!(store.active_from[b.index()], Tick(51));
    }

    #[test]
    fn live_ids_skip_inactive() {
        let mut store = AgentStore::new();
        for _ in 0..4 {
            let id = store.push_agent(AgentKind::Car, VehicleParams::default(), KinematicState::default(), Tick(0));
            store.activate(id);
        }
        store.deactivate(AgentId(1));
        let live: Vec<AgentId> = store.live_ids().collect();
        assert_eq!(live, vec![AgentId(0), AgentId(2), AgentId(3)]);
        assert_eq!(store.live_count(), 3);
    }

    #[test]
    fn unknown_agent_is_not_live() {
        let store = AgentStore::new();
        assert!(!store.is_live(AgentId(9)));
        assert!(!store.contains(AgentId(0)));
    }
}

#[cfg(test)]
mod vehicle {
    use ds_core::{AgentKind, Vec2};

    use crate::{KinematicState, VehicleParams};

    #[test]
    fn velocity_vector_follows_yaw() {
        let s = KinematicState::at(Vec2::ZERO, std::f64::consts::FRAC_PI_2, 10.0);
        let v = s.velocity_vector();
        assert!(v.x.abs() < 1e-9);
        assert!((v.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn defaults_validate() {
        assert!(VehicleParams::passenger_car().validate().is_ok());
        assert!(VehicleParams::truck().validate().is_ok());
        assert!(VehicleParams::for_kind(AgentKind::Pedestrian).validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_width() {
        let p = VehicleParams { width: 0.0, ..VehicleParams::default() };
        let err = p.validate().unwrap_err();
        assert!(err.contains("width"), "{err}");
    }

    #[test]
    fn rejects_nan_length() {
        let p = VehicleParams { length: f64::NAN, ..VehicleParams::default() };
        assert!(p.validate().is_err());
    }
}
