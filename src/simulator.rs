//! Per-frame cloth simulation: forces, relaxation and Verlet integration.

use crate::config::{ClothConfig, SolverConfig, StepOrder};
use crate::constraint::DistanceConstraint;
use crate::error::ClothError;
use crate::float::Float;
use crate::grid::ClothGrid;
use crate::observer::StepObserver;
use crate::vec::{Vec, Vec3};
use rand::Rng;

/// A cloth plus the parameters it was built and is stepped with.
///
/// Relaxation is a fixed number of Gauss-Seidel sweeps rather than a global
/// solve: more iterations give a stiffer cloth, and stretched configurations
/// may not reach their rest lengths within a step.
pub struct ClothSimulator<F: Float> {
    grid: ClothGrid<F>,
    cloth: ClothConfig<F>,
    solver: SolverConfig<F>,
}

impl<F: Float> ClothSimulator<F> {
    /// Validates both configs and builds the grid.
    pub fn new(cloth: ClothConfig<F>, solver: SolverConfig<F>) -> Result<Self, ClothError> {
        solver.validate()?;
        let grid = ClothGrid::new(&cloth)?;
        Ok(ClothSimulator { grid, cloth, solver })
    }

    /// Builds a cloth from grid parameters with default stepping parameters.
    pub fn init(cols: usize, rows: usize, width: F, height: F, pin_count: usize) -> Result<Self, ClothError> {
        let cloth = ClothConfig::new()
            .with_resolution(cols, rows)
            .with_extents(width, height)
            .with_pin_count(pin_count);
        Self::new(cloth, SolverConfig::new())
    }

    /// Advances one fixed tick.
    ///
    /// Gravity and a wind impulse scaled by a fresh `[0, 1)` sample are
    /// accumulated and damped by air friction first. Relaxation and
    /// integration then run in the configured [`StepOrder`]; the default
    /// relaxes last tick's positions before folding in this tick's forces.
    pub fn step<R, O>(&mut self, gravity: Vec3<F>, wind: Vec3<F>, rng: &mut R, observer: &mut O)
    where
        R: Rng + ?Sized,
        O: StepObserver,
    {
        let gust = F::from_f32(rng.gen::<f32>());

        self.grid.apply_force(gravity);
        self.grid.apply_force(wind.scale(gust));
        self.grid.apply_air_friction(self.solver.friction_factor());
        observer.on_forces_applied();

        match self.solver.order {
            StepOrder::RelaxThenIntegrate => {
                self.relax(observer);
                self.integrate(observer);
            }
            StepOrder::IntegrateThenRelax => {
                self.integrate(observer);
                self.relax(observer);
            }
        }

        observer.on_step_complete();
    }

    /// Steps once if `elapsed` is positive and finite. Elapsed time only
    /// gates the tick; it never scales integration.
    pub fn advance<R, O>(
        &mut self,
        elapsed: F,
        gravity: Vec3<F>,
        wind: Vec3<F>,
        rng: &mut R,
        observer: &mut O,
    ) -> bool
    where
        R: Rng + ?Sized,
        O: StepObserver,
    {
        if !elapsed.is_finite() || elapsed <= F::zero() {
            return false;
        }
        self.step(gravity, wind, rng, observer);
        true
    }

    fn relax<O: StepObserver>(&mut self, observer: &mut O) {
        for i in 0..self.solver.iterations {
            self.grid.satisfy_constraints();
            observer.on_constraint_iteration(i);
        }
    }

    fn integrate<O: StepObserver>(&mut self, observer: &mut O) {
        self.grid.integrate(self.solver.damping, self.solver.time_step_sq());
        observer.on_integrate();
        if self.grid.has_non_finite() {
            log::warn!("cloth step produced a non-finite particle position");
        }
    }

    /// Removes one uniformly chosen constraint. Returns `None` when nothing
    /// is left to tear.
    pub fn tear_random_constraint<R, O>(
        &mut self,
        rng: &mut R,
        observer: &mut O,
    ) -> Option<DistanceConstraint<Vec3<F>>>
    where
        R: Rng + ?Sized,
        O: StepObserver,
    {
        let count = self.grid.constraint_count();
        if count == 0 {
            return None;
        }
        let index = rng.gen_range(0..count);
        let torn = self.grid.tear_constraint(index)?;
        log::debug!("tore constraint {} ({} -> {}), {} left", index, torn.a, torn.b, count - 1);
        observer.on_constraint_torn(index);
        Some(torn)
    }

    /// Removes every constraint attached to the particle at `(x, y)`.
    pub fn tear_at(&mut self, x: usize, y: usize) -> Result<usize, ClothError> {
        let removed = self.grid.tear_at(x, y)?;
        log::debug!("tore {} constraints at ({}, {})", removed, x, y);
        Ok(removed)
    }

    pub fn pin(&mut self, x: usize, y: usize) -> Result<(), ClothError> {
        self.grid.pin(x, y)
    }

    /// Rebuilds the cloth from the current parameters.
    pub fn reset(&mut self) {
        // `cloth` was validated when it was stored.
        if let Ok(grid) = ClothGrid::new(&self.cloth) {
            self.grid = grid;
        }
        log::debug!("cloth reset");
    }

    /// Rebuilds the cloth with new grid parameters. On error the current
    /// cloth is left untouched.
    pub fn reset_with(&mut self, cloth: ClothConfig<F>) -> Result<(), ClothError> {
        self.grid = ClothGrid::new(&cloth)?;
        self.cloth = cloth;
        log::debug!("cloth reset to {}x{}", self.cloth.cols, self.cloth.rows);
        Ok(())
    }

    /// Replaces the stepping parameters; takes effect on the next step.
    pub fn set_solver_config(&mut self, solver: SolverConfig<F>) -> Result<(), ClothError> {
        solver.validate()?;
        self.solver = solver;
        Ok(())
    }

    /// Current particle positions in grid order. Call again for a fresh pass.
    pub fn particle_positions(&self) -> impl Iterator<Item = Vec3<F>> + '_ {
        self.grid.positions()
    }

    /// Endpoint positions of every live constraint, for line rendering.
    pub fn constraint_endpoints(&self) -> impl Iterator<Item = (Vec3<F>, Vec3<F>)> + '_ {
        self.grid.constraint_endpoints()
    }

    pub fn grid(&self) -> &ClothGrid<F> { &self.grid }
    pub fn grid_mut(&mut self) -> &mut ClothGrid<F> { &mut self.grid }
    pub fn cloth_config(&self) -> &ClothConfig<F> { &self.cloth }
    pub fn solver_config(&self) -> &SolverConfig<F> { &self.solver }
    pub fn particle_count(&self) -> usize { self.grid.particle_count() }
    pub fn constraint_count(&self) -> usize { self.grid.constraint_count() }
}
