//! Unit tests for chase-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, Role, TrajectoryId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
        assert_eq!(TrajectoryId(3).to_string(), "TrajectoryId(3)");
    }

    #[test]
    fn standard_layout() {
        let roles = Role::standard_layout(4);
        assert_eq!(roles, [Role::Sheep, Role::Wolf, Role::Distractor, Role::Distractor]);
        assert!(Role::standard_layout(0).is_empty());
    }

    #[test]
    fn role_display() {
        assert_eq!(Role::Wolf.to_string(), "wolf");
    }
}

#[cfg(test)]
mod geo {
    use std::f64::consts::{FRAC_PI_2, PI};

    use crate::{Polar, Vec2, cartesian_to_polar, polar_to_cartesian};

    const EPS: f64 = 1e-9;

    #[test]
    fn distance_is_euclidean() {
        let a = Vec2::new(100.0, 100.0);
        assert!((a.distance(Vec2::new(120.0, 100.0)) - 20.0).abs() < EPS);
        assert!((a.distance(Vec2::new(103.0, 104.0)) - 5.0).abs() < EPS);
    }

    #[test]
    fn polar_of_axis_vectors() {
        let p = cartesian_to_polar(Vec2::new(0.0, 2.0));
        assert!((p.angle - FRAC_PI_2).abs() < EPS);
        assert!((p.radius - 2.0).abs() < EPS);

        let p = cartesian_to_polar(Vec2::new(-1.0, 0.0));
        assert!((p.angle - PI).abs() < EPS);
    }

    #[test]
    fn polar_roundtrip() {
        let v = Vec2::new(-3.5, 7.25);
        let back = polar_to_cartesian(cartesian_to_polar(v));
        assert!((back.x - v.x).abs() < EPS);
        assert!((back.y - v.y).abs() < EPS);
    }

    #[test]
    fn polar_to_cartesian_scales_unit_heading() {
        let v = polar_to_cartesian(Polar::new(0.0, 20.0));
        assert!((v.x - 20.0).abs() < EPS);
        assert!(v.y.abs() < EPS);
    }

    #[test]
    fn arithmetic() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -1.0);
        assert_eq!(a + b, Vec2::new(4.0, 1.0));
        assert_eq!(a - b, Vec2::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));
    }
}

#[cfg(test)]
mod time {
    use crate::{CoreError, Step, StepTiming};

    #[test]
    fn default_interpolates_five_frames() {
        let t = StepTiming::default();
        assert_eq!(t.frames_to_interpolate(), 5);
        assert_eq!(t.steps_for_secs(25), 125);
        assert_eq!(t.steps_for_secs(10), 50);
    }

    #[test]
    fn equal_rates_interpolate_nothing() {
        let t = StepTiming { mdp_steps_per_sec: 10, frames_per_sec: 10 };
        assert_eq!(t.frames_to_interpolate(), 0);
    }

    #[test]
    fn validation() {
        assert!(StepTiming::default().validated().is_ok());
        let zero = StepTiming { mdp_steps_per_sec: 0, frames_per_sec: 30 };
        assert!(matches!(zero.validated(), Err(CoreError::Config(_))));
        let slow = StepTiming { mdp_steps_per_sec: 5, frames_per_sec: 4 };
        assert!(matches!(slow.validated(), Err(CoreError::InvalidRange { .. })));
    }

    #[test]
    fn warm_up_window() {
        assert!(Step(0).in_warm_up(50));
        assert!(Step(49).in_warm_up(50));
        assert!(!Step(50).in_warm_up(50));
        assert!(!Step(0).in_warm_up(0));
        assert_eq!(Step(3).next(), Step(4));
    }
}

#[cfg(test)]
mod rng {
    use crate::{SimRng, TrajectoryId};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn trajectory_streams_differ() {
        let mut r0 = SimRng::for_trajectory(1, TrajectoryId(0));
        let mut r1 = SimRng::for_trajectory(1, TrajectoryId(1));
        let a: u64 = r0.random();
        let b: u64 = r1.random();
        assert_ne!(a, b, "seeds for adjacent trajectories should diverge");
    }

    #[test]
    fn trajectory_stream_matches_mixed_seed() {
        let mut a = SimRng::for_trajectory(99, TrajectoryId(4));
        let mut b = SimRng::new(SimRng::mix(99, 4));
        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }

    #[test]
    fn angle_in_range() {
        let mut rng = SimRng::new(0);
        for _ in 0..1000 {
            let a = rng.angle();
            assert!((-std::f64::consts::PI..std::f64::consts::PI).contains(&a));
        }
    }

    #[test]
    fn degenerate_normal_returns_mean() {
        let mut rng = SimRng::new(0);
        assert_eq!(rng.normal(1.5, 0.0), 1.5);
        assert_eq!(rng.normal(1.5, -2.0), 1.5);
        assert_eq!(rng.normal(1.5, f64::NAN), 1.5);
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = SimRng::new(0);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert_eq!(rng.choose(&[9]), Some(&9));
    }
}

#[cfg(test)]
mod state {
    use crate::{Action, AgentId, CoreError, Outcome, State, TimeStep, Trajectory, TrajectoryId, Vec2};

    #[test]
    fn shape_mismatch_rejected() {
        let err = State::new(vec![Vec2::ZERO; 2], vec![Vec2::ZERO; 3]).unwrap_err();
        assert_eq!(err, CoreError::ShapeMismatch { positions: 2, velocities: 3 });
    }

    #[test]
    fn at_rest_has_zero_velocities() {
        let s = State::at_rest(vec![Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)]);
        assert_eq!(s.agent_count(), 2);
        assert!(s.velocities().iter().all(|v| *v == Vec2::ZERO));
    }

    #[test]
    fn unknown_agent_errors() {
        let s = State::at_rest(vec![Vec2::ZERO]);
        assert_eq!(s.position(AgentId(1)), Err(CoreError::AgentNotFound(AgentId(1))));
    }

    #[test]
    fn distance_between_agents() {
        let s = State::at_rest(vec![Vec2::new(100.0, 100.0), Vec2::new(200.0, 100.0)]);
        assert_eq!(s.distance(AgentId(0), AgentId(1)).unwrap(), 100.0);
    }

    #[test]
    fn trajectory_accessors() {
        let s0 = State::at_rest(vec![Vec2::ZERO]);
        let s1 = State::at_rest(vec![Vec2::new(1.0, 0.0)]);
        let steps = vec![
            TimeStep { state: s0.clone(), action: Action::default(), next_state: s1.clone(), reward: Some(0.01) },
            TimeStep { state: s1.clone(), action: Action::default(), next_state: s0.clone(), reward: Some(-1.0) },
        ];
        let traj = Trajectory::new(TrajectoryId(0), 7, 3.3, Outcome::Captured, steps);
        assert_eq!(traj.len(), 2);
        assert_eq!(traj.final_state(), Some(&s0));
        assert!((traj.total_reward() + 0.99).abs() < 1e-12);
    }
}
