//! Distance constraints between cloth particles.

use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec;

/// Keeps two particles at the separation they had when the constraint was
/// created.
///
/// Endpoints are indices into the owning particle slice; the constraint never
/// owns the particles it links.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceConstraint<V: Vec> {
    pub a: usize,
    pub b: usize,
    rest_length: V::Scalar,
}

impl<V: Vec> DistanceConstraint<V> {
    pub fn new(a: usize, b: usize, rest_length: V::Scalar) -> Self {
        DistanceConstraint { a, b, rest_length }
    }

    /// Captures the current distance between `a` and `b` as the rest length.
    pub fn from_particles(a: usize, b: usize, particles: &[Particle<V>]) -> Self {
        let rest_length = particles[a].pos.distance(particles[b].pos);
        DistanceConstraint { a, b, rest_length }
    }

    pub fn rest_length(&self) -> V::Scalar {
        self.rest_length
    }

    /// Absolute deviation from the rest length.
    pub fn error(&self, particles: &[Particle<V>]) -> V::Scalar {
        let dist = particles[self.a].pos.distance(particles[self.b].pos);
        (dist - self.rest_length).abs()
    }

    pub fn endpoints(&self, particles: &[Particle<V>]) -> (V, V) {
        (particles[self.a].pos, particles[self.b].pos)
    }

    /// Moves both endpoints half of the way toward the rest length.
    ///
    /// Masses are ignored. Immovable endpoints stay put and their share of
    /// the correction is dropped. Coincident endpoints have no direction to
    /// correct along and are skipped.
    pub fn satisfy(&self, particles: &mut [Particle<V>]) {
        let delta = particles[self.b].pos - particles[self.a].pos;
        let current = delta.length();
        if current.is_near_zero(V::Scalar::from_f32(1e-10)) {
            return;
        }

        let correction = delta.scale(V::Scalar::one() - self.rest_length / current);
        let half = correction.scale(V::Scalar::half());

        particles[self.a].offset_pos(half);
        particles[self.b].offset_pos(-half);
    }
}
