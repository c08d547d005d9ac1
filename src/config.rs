//! World configuration, fixed when the world is created.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Fp, error::PhysicsError};

/// Simulation bounds, gravity and the resolver's tuning constants.
///
/// ```
/// use tumble::WorldConfig;
///
/// let config = WorldConfig::new()
///     .with_bounds(1280.0, 720.0)
///     .with_gravity(0.6)
///     .with_iterations(8, 4);
/// assert_eq!(config.static_iterations, 8);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldConfig {
    /// Right edge of the world. Default: 800.
    pub width: Fp,
    /// Bottom edge of the world (y grows downward). Default: 600.
    pub height: Fp,
    /// Added to every dynamic body's `vel.y` each step. Default: 0.5.
    pub gravity: Fp,
    /// Resolution passes against static bodies. Default: 5.
    pub static_iterations: usize,
    /// Resolution passes against other dynamic bodies. Default: 5.
    pub dynamic_iterations: usize,
    /// Contacts with a shorter MTV are ignored. Default: 0.01.
    pub min_correction: Fp,
    /// Extra push along the MTV after a static contact, as a fraction of it. Default: 0.1.
    pub correction_bias: Fp,
    /// `vel.x` multiplier while grounded. Default: 0.8.
    pub ground_friction: Fp,
    /// Grounded `vel.x` below this snaps to zero. Default: 0.05.
    pub friction_cutoff: Fp,
    /// Angular velocity multiplier per step. Default: 0.98.
    pub angular_damping: Fp,
    /// Angular velocity below this snaps to zero. Default: 0.001.
    pub angular_cutoff: Fp,
    /// Contact torque per unit of horizontal MTV. Default: 0.02.
    pub torque_factor: Fp,
}

impl WorldConfig {
    pub fn new() -> Self {
        WorldConfig {
            width: 800.0,
            height: 600.0,
            gravity: 0.5,
            static_iterations: 5,
            dynamic_iterations: 5,
            min_correction: 0.01,
            correction_bias: 0.1,
            ground_friction: 0.8,
            friction_cutoff: 0.05,
            angular_damping: 0.98,
            angular_cutoff: 0.001,
            torque_factor: 0.02,
        }
    }

    pub fn with_bounds(mut self, width: Fp, height: Fp) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_gravity(mut self, gravity: Fp) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_iterations(mut self, static_iterations: usize, dynamic_iterations: usize) -> Self {
        self.static_iterations = static_iterations;
        self.dynamic_iterations = dynamic_iterations;
        self
    }

    pub fn with_friction(mut self, ground_friction: Fp, friction_cutoff: Fp) -> Self {
        self.ground_friction = ground_friction;
        self.friction_cutoff = friction_cutoff;
        self
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        //! Bounds must be positive and finite; every other field is taken as given.
        if !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0) {
            return Err(PhysicsError::InvalidWorld { width: self.width, height: self.height });
        }
        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = WorldConfig::default();
        assert_eq!(config.gravity, 0.5);
        assert_eq!(config.static_iterations, 5);
        assert_eq!(config.dynamic_iterations, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_empty_world() {
        let config = WorldConfig::new().with_bounds(0.0, 600.0);
        assert_eq!(config.validate(), Err(PhysicsError::InvalidWorld { width: 0.0, height: 600.0 }));
        assert!(WorldConfig::new().with_bounds(Fp::NAN, 1.0).validate().is_err());
    }
}
