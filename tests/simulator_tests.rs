use drape::{
    AirFriction, ClothConfig, ClothSimulator, LogStepObserver, NoOpStepObserver, SolverConfig,
    Vec, Vec3,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn hanging_square() -> ClothSimulator<f32> {
    let cloth = ClothConfig::new()
        .with_resolution(3, 3)
        .with_extents(2.0, 2.0)
        .with_pin_count(0);
    let mut sim = ClothSimulator::new(cloth, SolverConfig::new()).unwrap();
    sim.pin(0, 0).unwrap();
    sim
}

fn mean_y(sim: &ClothSimulator<f32>) -> f32 {
    sim.grid().center_of_mass().unwrap().y
}

#[test]
fn pinned_particles_never_move() {
    let mut sim: ClothSimulator<f32> = ClothSimulator::new(
        ClothConfig::new().with_shear(true).with_bend(true),
        SolverConfig::new(),
    )
    .unwrap();
    let pinned: std::vec::Vec<(usize, Vec3<f32>)> = sim
        .grid()
        .particles()
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.movable)
        .map(|(i, p)| (i, p.pos))
        .collect();
    assert_eq!(pinned.len(), 6);

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let gravity = Vec3::new(0.0, -0.5, 0.0);
    let wind = Vec3::new(0.3, 0.0, 0.8);
    for _ in 0..200 {
        sim.step(gravity, wind, &mut rng, &mut NoOpStepObserver);
    }

    for (i, pos) in pinned {
        assert_eq!(sim.grid().particle(i).pos, pos, "pinned particle {} moved", i);
    }
}

#[test]
fn resting_cloth_without_forces_does_not_drift() {
    let mut sim: ClothSimulator<f32> = ClothSimulator::new(
        ClothConfig::new().with_resolution(6, 6).with_shear(true),
        SolverConfig::new().with_damping(0.0),
    )
    .unwrap();
    let start = sim.grid().center_of_mass().unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for _ in 0..50 {
        sim.step(Vec3::zero(), Vec3::zero(), &mut rng, &mut NoOpStepObserver);
    }

    let end = sim.grid().center_of_mass().unwrap();
    assert!(start.distance(end) < 1e-5, "center of mass drifted from {:?} to {:?}", start, end);
}

#[test]
fn stretched_free_cloth_keeps_its_center_of_mass() {
    let mut sim: ClothSimulator<f32> = ClothSimulator::new(
        ClothConfig::new().with_resolution(6, 6).with_extents(5.0, 5.0).with_pin_count(0).with_shear(true),
        SolverConfig::new().with_damping(0.0),
    )
    .unwrap();

    // Stretch row 2 to the right without giving it velocity.
    for x in 0..6 {
        let idx = sim.grid().index(x, 2);
        let p = sim.grid_mut().particle_mut(idx);
        let offset = Vec3::new(0.4 * x as f32, 0.3, 0.2);
        p.pos = p.pos + offset;
        p.prev_pos = p.prev_pos + offset;
    }
    let start = sim.grid().center_of_mass().unwrap();
    let stretched: std::vec::Vec<Vec3<f32>> = sim.particle_positions().collect();

    let mut rng = ChaCha8Rng::seed_from_u64(21);
    for _ in 0..50 {
        sim.step(Vec3::zero(), Vec3::zero(), &mut rng, &mut NoOpStepObserver);
    }

    let moved = sim
        .particle_positions()
        .zip(stretched.iter())
        .map(|(a, b)| a.distance(*b))
        .fold(0.0f32, f32::max);
    assert!(moved > 0.05, "relaxation should have moved the stretched row");

    let end = sim.grid().center_of_mass().unwrap();
    assert!(start.distance(end) < 1e-3, "center of mass drifted from {:?} to {:?}", start, end);
    assert!(!sim.grid().has_non_finite());
}

#[test]
fn square_hanging_from_one_corner_falls_without_blowing_up() {
    let mut sim = hanging_square();
    let start_y = mean_y(&sim);
    let gravity = Vec3::new(0.0, -1.0, 0.0);
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let mut late_sum = 0.0;
    for step in 0..100 {
        sim.step(gravity, Vec3::zero(), &mut rng, &mut NoOpStepObserver);
        assert!(!sim.grid().has_non_finite(), "non-finite position at step {}", step);
        if step >= 50 {
            late_sum += mean_y(&sim);
        }
    }

    let late_mean = late_sum / 50.0;
    assert!(late_mean < start_y, "cloth should hang below its start: {} vs {}", late_mean, start_y);
    assert!(mean_y(&sim) < start_y);
    assert_eq!(sim.grid().position_at(0, 0), Ok(Vec3::new(0.0, 0.0, 0.0)));
    for pos in sim.particle_positions() {
        assert!(pos.is_finite());
    }
}

#[test]
fn negated_air_friction_reverses_gravity() {
    let cloth = ClothConfig::new().with_resolution(3, 3).with_extents(2.0, 2.0).with_pin_count(0);
    let solver = SolverConfig::new().with_air_friction(0.99, AirFriction::Negate);
    let mut sim: ClothSimulator<f32> = ClothSimulator::new(cloth, solver).unwrap();
    sim.pin(0, 0).unwrap();
    let start_y = mean_y(&sim);

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..20 {
        sim.step(Vec3::new(0.0, -1.0, 0.0), Vec3::zero(), &mut rng, &mut NoOpStepObserver);
    }
    assert!(mean_y(&sim) > start_y);
}

#[test]
fn tearing_removes_exactly_one_constraint() {
    let mut sim: ClothSimulator<f32> =
        ClothSimulator::new(ClothConfig::new().with_shear(true), SolverConfig::new()).unwrap();
    let particles = sim.particle_count();
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    for _ in 0..25 {
        let before = sim.constraint_count();
        let mut probe = rng.clone();
        let expected_index = probe.gen_range(0..before);
        let expected = sim.grid().constraints()[expected_index].clone();

        let torn = sim.tear_random_constraint(&mut rng, &mut NoOpStepObserver).unwrap();
        assert_eq!(torn, expected);
        assert_eq!(sim.constraint_count(), before - 1);
        assert_eq!(sim.particle_count(), particles);
    }
}

#[test]
fn torn_constraints_stay_gone_across_steps() {
    let mut sim: ClothSimulator<f32> = ClothSimulator::new(ClothConfig::new(), SolverConfig::new()).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    assert_eq!(sim.tear_at(5, 5).unwrap(), 4);
    sim.tear_random_constraint(&mut rng, &mut NoOpStepObserver);
    let remaining = sim.constraint_count();
    assert_eq!(remaining, 180 - 1 - 4);

    for _ in 0..30 {
        sim.step(Vec3::new(0.0, -0.1, 0.0), Vec3::new(0.0, 0.0, 0.2), &mut rng, &mut NoOpStepObserver);
    }
    assert_eq!(sim.constraint_count(), remaining);
    assert_eq!(sim.constraint_endpoints().count(), remaining);
}

#[test]
fn reset_rebuilds_rest_configuration() {
    let mut sim: ClothSimulator<f32> = ClothSimulator::new(ClothConfig::new(), SolverConfig::new()).unwrap();
    let rest: std::vec::Vec<Vec3<f32>> = sim.particle_positions().collect();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for _ in 0..10 {
        sim.step(Vec3::new(0.0, -1.0, 0.0), Vec3::zero(), &mut rng, &mut NoOpStepObserver);
        sim.tear_random_constraint(&mut rng, &mut NoOpStepObserver);
    }

    sim.reset();
    assert_eq!(sim.constraint_count(), 180);
    assert!(sim.particle_positions().eq(rest.iter().copied()));

    sim.reset_with(ClothConfig::new().with_resolution(4, 2).with_pin_count(1)).unwrap();
    assert_eq!(sim.particle_count(), 8);
    assert_eq!(sim.constraint_count(), 3 * 2 + 4);
}

#[test]
fn views_are_restartable() {
    let mut sim: ClothSimulator<f64> = ClothSimulator::new(ClothConfig::new(), SolverConfig::new()).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    sim.step(Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), &mut rng, &mut NoOpStepObserver);

    let first: std::vec::Vec<_> = sim.particle_positions().collect();
    let second: std::vec::Vec<_> = sim.particle_positions().collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 100);

    let edges: std::vec::Vec<_> = sim.constraint_endpoints().collect();
    assert_eq!(edges.len(), sim.constraint_count());
}

#[test]
fn log_observer_counts_steps() {
    let mut sim: ClothSimulator<f32> = ClothSimulator::new(ClothConfig::new(), SolverConfig::new()).unwrap();
    let mut observer = LogStepObserver::new();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    for _ in 0..4 {
        sim.step(Vec3::zero(), Vec3::zero(), &mut rng, &mut observer);
    }
    assert_eq!(observer.steps(), 4);
}

#[test]
fn invalid_solver_config_is_rejected() {
    let result = ClothSimulator::<f32>::new(ClothConfig::new(), SolverConfig::new().with_damping(-0.5));
    assert!(result.is_err());

    let mut sim: ClothSimulator<f32> = ClothSimulator::new(ClothConfig::new(), SolverConfig::new()).unwrap();
    assert!(sim.set_solver_config(SolverConfig::new().with_time_step(f32::INFINITY)).is_err());
    assert_eq!(sim.solver_config().time_step, 0.5);
}
