//! Configuration types for cloth construction and stepping.

use crate::error::ClothError;
use crate::float::Float;

/// Grid layout of a cloth.
///
/// # Builder Pattern
/// ```
/// use drape::config::ClothConfig;
///
/// let config: ClothConfig<f32> = ClothConfig::new()
///     .with_resolution(20, 15)
///     .with_extents(4.0, 3.0)
///     .with_pin_count(2)
///     .with_shear(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClothConfig<F: Float> {
    /// Particles per row. Default: 10.
    pub cols: usize,
    /// Particles per column. Default: 10.
    pub rows: usize,
    /// Physical extent along x. Default: 10.
    pub width: F,
    /// Physical extent along y. Default: 10.
    pub height: F,
    /// Immovable particles at each end of the top row. Default: 3.
    pub pin_count: usize,
    /// Add both diagonals of every cell. Default: false.
    pub shear: bool,
    /// Add links at grid distance 2, straight and diagonal. Default: false.
    pub bend: bool,
}

impl<F: Float> ClothConfig<F> {
    pub fn new() -> Self {
        ClothConfig {
            cols: 10,
            rows: 10,
            width: F::from_f32(10.0),
            height: F::from_f32(10.0),
            pin_count: 3,
            shear: false,
            bend: false,
        }
    }

    pub fn with_resolution(mut self, cols: usize, rows: usize) -> Self {
        self.cols = cols;
        self.rows = rows;
        self
    }

    pub fn with_extents(mut self, width: F, height: F) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_pin_count(mut self, pin_count: usize) -> Self {
        self.pin_count = pin_count;
        self
    }

    pub fn with_shear(mut self, shear: bool) -> Self {
        self.shear = shear;
        self
    }

    pub fn with_bend(mut self, bend: bool) -> Self {
        self.bend = bend;
        self
    }

    /// Rejects degenerate grids before any particle is allocated.
    pub fn validate(&self) -> Result<(), ClothError> {
        if self.cols == 0 || self.rows == 0 {
            return Err(ClothError::InvalidGridDimensions { cols: self.cols, rows: self.rows });
        }
        let positive = |v: F| v.is_finite() && v > F::zero();
        if !positive(self.width) || !positive(self.height) {
            return Err(ClothError::InvalidExtents);
        }
        if self.pin_count > self.cols {
            return Err(ClothError::PinCountExceedsWidth { pin_count: self.pin_count, cols: self.cols });
        }
        Ok(())
    }
}

impl<F: Float> Default for ClothConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// How air friction treats the forces accumulated this step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AirFriction {
    /// Multiply by `coefficient`.
    Drag,
    /// Multiply by `-coefficient`. Flips the force direction every step,
    /// which makes the cloth oscillate instead of settle.
    Negate,
}

/// Whether relaxation runs on last tick's positions or on freshly
/// integrated ones.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepOrder {
    RelaxThenIntegrate,
    IntegrateThenRelax,
}

/// Stepping parameters.
///
/// # Builder Pattern
/// ```
/// use drape::config::{AirFriction, SolverConfig};
///
/// let config: SolverConfig<f32> = SolverConfig::new()
///     .with_iterations(8)
///     .with_damping(0.02)
///     .with_air_friction(0.9, AirFriction::Drag);
/// assert!((config.time_step_sq() - 0.25).abs() < 1e-6);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig<F: Float> {
    /// Relaxation sweeps over all constraints per step. Default: 15.
    pub iterations: usize,
    /// Fraction of implicit velocity removed per step, in [0, 1]. Default: 0.01.
    pub damping: F,
    /// Fixed integration step; never derived from frame time. Default: 0.5.
    pub time_step: F,
    /// Air friction coefficient. Default: 0.99.
    pub air_friction: F,
    /// Default: [`AirFriction::Drag`].
    pub air_friction_mode: AirFriction,
    /// Default: [`StepOrder::RelaxThenIntegrate`].
    pub order: StepOrder,
}

impl<F: Float> SolverConfig<F> {
    pub fn new() -> Self {
        SolverConfig {
            iterations: 15,
            damping: F::from_f32(0.01),
            time_step: F::half(),
            air_friction: F::from_f32(0.99),
            air_friction_mode: AirFriction::Drag,
            order: StepOrder::RelaxThenIntegrate,
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_time_step(mut self, time_step: F) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_air_friction(mut self, coefficient: F, mode: AirFriction) -> Self {
        self.air_friction = coefficient;
        self.air_friction_mode = mode;
        self
    }

    pub fn with_order(mut self, order: StepOrder) -> Self {
        self.order = order;
        self
    }

    pub fn time_step_sq(&self) -> F {
        self.time_step * self.time_step
    }

    /// Factor applied to every particle's accumulated velocity.
    pub fn friction_factor(&self) -> F {
        match self.air_friction_mode {
            AirFriction::Drag => self.air_friction,
            AirFriction::Negate => -self.air_friction,
        }
    }

    pub fn validate(&self) -> Result<(), ClothError> {
        if !self.damping.is_finite() || self.damping < F::zero() || self.damping > F::one() {
            return Err(ClothError::InvalidDamping);
        }
        if !self.time_step.is_finite() || self.time_step <= F::zero() {
            return Err(ClothError::InvalidTimeStep);
        }
        if !self.air_friction.is_finite() || self.air_friction < F::zero() {
            return Err(ClothError::InvalidAirFriction);
        }
        Ok(())
    }
}

impl<F: Float> Default for SolverConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
