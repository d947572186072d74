//! Cloth point masses with Verlet integration.

use crate::float::Float;
use crate::vec::Vec;

/// One mass point of the cloth.
///
/// Velocity is implicit in `pos - prev_pos`. External forces are folded
/// into `accumulated_velocity` during a step and cleared by [`integrate`].
///
/// [`integrate`]: Particle::integrate
#[derive(Clone, Debug)]
pub struct Particle<V: Vec> {
    pub pos: V,
    pub prev_pos: V,
    pub accumulated_velocity: V,
    pub mass: V::Scalar,
    pub movable: bool,
}

impl<V: Vec> Particle<V> {
    /// A movable particle at rest with unit mass.
    pub fn new(pos: V) -> Self {
        Particle {
            pos,
            prev_pos: pos,
            accumulated_velocity: V::zero(),
            mass: V::Scalar::one(),
            movable: true,
        }
    }

    /// An immovable (pinned) particle.
    pub fn pinned(pos: V) -> Self {
        Particle { movable: false, ..Particle::new(pos) }
    }

    /// Adds `force / mass` to the accumulated velocity.
    pub fn add_force(&mut self, force: V) {
        if self.movable {
            self.accumulated_velocity =
                self.accumulated_velocity + force.scale(V::Scalar::one() / self.mass);
        }
    }

    /// Multiplies the accumulated velocity by `factor`.
    pub fn scale_accumulated(&mut self, factor: V::Scalar) {
        self.accumulated_velocity = self.accumulated_velocity.scale(factor);
    }

    /// Moves the particle by `offset`; no-op when immovable.
    pub fn offset_pos(&mut self, offset: V) {
        if self.movable {
            self.pos = self.pos + offset;
        }
    }

    pub fn make_unmovable(&mut self) {
        self.movable = false;
    }

    pub fn reset_acceleration(&mut self) {
        self.accumulated_velocity = V::zero();
    }

    /// One explicit Verlet step:
    /// `pos += (pos - prev_pos) * (1 - damping) + accumulated * time_step_sq`.
    pub fn integrate(&mut self, damping: V::Scalar, time_step_sq: V::Scalar) {
        if !self.movable {
            return;
        }
        let temp = self.pos;
        let inertia = (self.pos - self.prev_pos).scale(V::Scalar::one() - damping);
        self.pos = self.pos + inertia + self.accumulated_velocity.scale(time_step_sq);
        self.prev_pos = temp;
        self.reset_acceleration();
    }

    /// Per-step displacement, the implicit velocity.
    pub fn velocity_raw(&self) -> V {
        self.pos - self.prev_pos
    }
}
