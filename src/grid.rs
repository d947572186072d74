//! Cloth grid: particles laid out on a rectangle, linked by distance constraints.

use crate::config::ClothConfig;
use crate::constraint::DistanceConstraint;
use crate::error::ClothError;
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::{Vec, Vec3};
use alloc::vec::Vec as AllocVec;

/// Owns every particle and constraint of one cloth.
///
/// Particle at grid coordinate `(x, y)` has index `y * cols + x`. Row 0 is the
/// top row, where the pins go.
pub struct ClothGrid<F: Float> {
    particles: AllocVec<Particle<Vec3<F>>>,
    constraints: AllocVec<DistanceConstraint<Vec3<F>>>,
    cols: usize,
    rows: usize,
}

impl<F: Float> ClothGrid<F> {
    /// Builds the rest configuration described by `config`.
    ///
    /// Particle `(x, y)` starts at `(width * x / cols, height * y / rows, 0)`.
    /// Rows grow along +y, so the pinned row 0 has the lowest y. With gravity
    /// along -y the cloth swings down past its pins; flip gravity to +y (or
    /// negate y when rendering) for a curtain hanging from its top edge.
    /// Constraint creation order, which is also relaxation order:
    /// - per cell (x-major): right neighbour, lower neighbour, then both cell
    ///   diagonals when `shear` is set
    /// - when `bend` is set, a second pass linking grid distance 2: right,
    ///   down, and the two distance-2 diagonals
    ///
    /// The first and last `pin_count` particles of the top row are immovable.
    pub fn new(config: &ClothConfig<F>) -> Result<Self, ClothError> {
        config.validate()?;
        let (cols, rows) = (config.cols, config.rows);

        let mut particles = AllocVec::with_capacity(cols * rows);
        for y in 0..rows {
            for x in 0..cols {
                let px = config.width * F::from_f32(x as f32) / F::from_f32(cols as f32);
                let py = config.height * F::from_f32(y as f32) / F::from_f32(rows as f32);
                particles.push(Particle::new(Vec3::new(px, py, F::zero())));
            }
        }

        let mut grid = ClothGrid { particles, constraints: AllocVec::new(), cols, rows };

        for x in 0..cols {
            for y in 0..rows {
                if x + 1 < cols {
                    grid.link((x, y), (x + 1, y));
                }
                if y + 1 < rows {
                    grid.link((x, y), (x, y + 1));
                }
                if config.shear && x + 1 < cols && y + 1 < rows {
                    grid.link((x, y), (x + 1, y + 1));
                    grid.link((x + 1, y), (x, y + 1));
                }
            }
        }

        if config.bend {
            for x in 0..cols {
                for y in 0..rows {
                    if x + 2 < cols {
                        grid.link((x, y), (x + 2, y));
                    }
                    if y + 2 < rows {
                        grid.link((x, y), (x, y + 2));
                    }
                    if x + 2 < cols && y + 2 < rows {
                        grid.link((x, y), (x + 2, y + 2));
                        grid.link((x + 2, y), (x, y + 2));
                    }
                }
            }
        }

        for i in 0..config.pin_count {
            grid.particles[i].make_unmovable();
            grid.particles[cols - 1 - i].make_unmovable();
        }

        log::debug!(
            "built {}x{} cloth: {} particles, {} constraints",
            cols,
            rows,
            grid.particles.len(),
            grid.constraints.len()
        );
        Ok(grid)
    }

    fn link(&mut self, a: (usize, usize), b: (usize, usize)) {
        let (a, b) = (self.index(a.0, a.1), self.index(b.0, b.1));
        self.constraints.push(DistanceConstraint::from_particles(a, b, &self.particles));
    }

    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.cols + x
    }

    fn checked_index(&self, x: usize, y: usize) -> Result<usize, ClothError> {
        if x >= self.cols || y >= self.rows {
            return Err(ClothError::ParticleOutOfBounds { x, y, cols: self.cols, rows: self.rows });
        }
        Ok(self.index(x, y))
    }

    /// Makes the particle at `(x, y)` immovable.
    pub fn pin(&mut self, x: usize, y: usize) -> Result<(), ClothError> {
        let idx = self.checked_index(x, y)?;
        self.particles[idx].make_unmovable();
        Ok(())
    }

    /// Adds `force / mass` to every movable particle's accumulator.
    pub fn apply_force(&mut self, force: Vec3<F>) {
        for p in self.particles.iter_mut() {
            p.add_force(force);
        }
    }

    /// Multiplies every particle's accumulated velocity by `factor`.
    pub fn apply_air_friction(&mut self, factor: F) {
        for p in self.particles.iter_mut() {
            p.scale_accumulated(factor);
        }
    }

    /// One Gauss-Seidel sweep over all constraints in creation order.
    pub fn satisfy_constraints(&mut self) {
        for c in self.constraints.iter() {
            c.satisfy(&mut self.particles);
        }
    }

    pub fn integrate(&mut self, damping: F, time_step_sq: F) {
        for p in self.particles.iter_mut() {
            p.integrate(damping, time_step_sq);
        }
    }

    /// Removes the constraint at `index`, keeping the order of the rest.
    pub fn tear_constraint(&mut self, index: usize) -> Option<DistanceConstraint<Vec3<F>>> {
        if index >= self.constraints.len() {
            return None;
        }
        Some(self.constraints.remove(index))
    }

    /// Removes every constraint touching `(x, y)`; returns how many went.
    pub fn tear_at(&mut self, x: usize, y: usize) -> Result<usize, ClothError> {
        let idx = self.checked_index(x, y)?;
        let before = self.constraints.len();
        self.constraints.retain(|c| c.a != idx && c.b != idx);
        Ok(before - self.constraints.len())
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3<F>> + '_ {
        self.particles.iter().map(|p| p.pos)
    }

    pub fn constraint_endpoints(&self) -> impl Iterator<Item = (Vec3<F>, Vec3<F>)> + '_ {
        self.constraints.iter().map(move |c| c.endpoints(&self.particles))
    }

    pub fn position_at(&self, x: usize, y: usize) -> Result<Vec3<F>, ClothError> {
        let idx = self.checked_index(x, y)?;
        Ok(self.particles[idx].pos)
    }

    /// Mean position of the movable particles, `None` if all are pinned.
    pub fn center_of_mass(&self) -> Option<Vec3<F>> {
        let mut sum = Vec3::zero();
        let mut count = 0usize;
        for p in self.particles.iter().filter(|p| p.movable) {
            sum = sum + p.pos;
            count += 1;
        }
        if count == 0 {
            return None;
        }
        Some(sum.scale(F::one() / F::from_f32(count as f32)))
    }

    pub fn has_non_finite(&self) -> bool {
        self.particles.iter().any(|p| !p.pos.is_finite())
    }

    pub fn particles(&self) -> &[Particle<Vec3<F>>] { &self.particles }
    pub fn constraints(&self) -> &[DistanceConstraint<Vec3<F>>] { &self.constraints }
    /// # Panics
    /// If `index >= particle_count()`.
    pub fn particle(&self, index: usize) -> &Particle<Vec3<F>> { &self.particles[index] }

    /// Mutable access for hosts that drag or displace particles.
    ///
    /// # Panics
    /// If `index >= particle_count()`.
    pub fn particle_mut(&mut self, index: usize) -> &mut Particle<Vec3<F>> { &mut self.particles[index] }
    pub fn cols(&self) -> usize { self.cols }
    pub fn rows(&self) -> usize { self.rows }
    pub fn particle_count(&self) -> usize { self.particles.len() }
    pub fn constraint_count(&self) -> usize { self.constraints.len() }
}
