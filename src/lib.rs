//! Verlet cloth simulation with iterative constraint relaxation.
//!
//! `drape` simulates a rectangular cloth as a grid of point masses joined by
//! distance constraints. Each tick accumulates gravity, a randomized wind gust
//! and air friction, relaxes the constraints for a fixed number of
//! Gauss-Seidel sweeps, and advances every particle with explicit Verlet
//! integration at a fixed time step.
//!
//! # Features
//!
//! - **Verlet integration**: implicit velocity, fixed step, per-step damping
//! - **Bounded relaxation**: fixed sweep count instead of a global solve
//! - **Topology options**: structural, shear and bend links
//! - **Tearing**: remove random constraints or everything around a particle
//! - **Deterministic**: randomness comes from a caller-supplied `rand::Rng`
//! - **Observable**: monitor steps via the `StepObserver` trait
//! - **`no_std` compatible**: only needs `alloc`
//!
//! ```
//! use drape::{ClothConfig, ClothSimulator, NoOpStepObserver, SolverConfig, Vec3};
//! use rand::rngs::mock::StepRng;
//!
//! let mut sim: ClothSimulator<f32> =
//!     ClothSimulator::new(ClothConfig::new(), SolverConfig::new()).unwrap();
//! let mut rng = StepRng::new(0, 1 << 40);
//! let gravity = Vec3::new(0.0, -0.2, 0.0);
//! let wind = Vec3::new(0.0, 0.0, 0.05);
//! for _ in 0..10 {
//!     sim.step(gravity, wind, &mut rng, &mut NoOpStepObserver);
//! }
//! assert_eq!(sim.particle_positions().count(), 100);
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod constraint;
pub mod grid;
pub mod simulator;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec, Vec3};
pub use particle::Particle;
pub use constraint::DistanceConstraint;
pub use grid::ClothGrid;
pub use simulator::ClothSimulator;
pub use config::{AirFriction, ClothConfig, SolverConfig, StepOrder};
pub use observer::{LogStepObserver, NoOpStepObserver, StepObserver};
pub use error::ClothError;
