//! Error types for cloth construction.

use core::fmt;

/// Errors raised when building or reconfiguring a cloth.
///
/// Stepping never fails; only configuration is validated.
#[derive(Debug, Clone, PartialEq)]
pub enum ClothError {
    /// Both grid dimensions must be at least 1.
    InvalidGridDimensions { cols: usize, rows: usize },
    /// Physical width and height must be positive and finite.
    InvalidExtents,
    /// Pins per top-row side cannot exceed the column count.
    PinCountExceedsWidth { pin_count: usize, cols: usize },
    /// Damping must be in [0, 1].
    InvalidDamping,
    /// Fixed time step must be positive and finite.
    InvalidTimeStep,
    /// Air friction coefficient must be non-negative and finite.
    InvalidAirFriction,
    /// Grid coordinate is outside the cloth.
    ParticleOutOfBounds { x: usize, y: usize, cols: usize, rows: usize },
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClothError::InvalidGridDimensions { cols, rows } => {
                write!(f, "grid must be at least 1x1 (got {}x{})", cols, rows)
            }
            ClothError::InvalidExtents => write!(f, "cloth width and height must be positive and finite"),
            ClothError::PinCountExceedsWidth { pin_count, cols } => {
                write!(f, "cannot pin {} particles per side on a {}-column cloth", pin_count, cols)
            }
            ClothError::InvalidDamping => write!(f, "damping must be in [0, 1]"),
            ClothError::InvalidTimeStep => write!(f, "time step must be positive and finite"),
            ClothError::InvalidAirFriction => write!(f, "air friction must be non-negative and finite"),
            ClothError::ParticleOutOfBounds { x, y, cols, rows } => {
                write!(f, "particle ({}, {}) out of bounds (grid: {}x{})", x, y, cols, rows)
            }
        }
    }
}

impl core::error::Error for ClothError {}
