//! Error types for world and body setup.

use std::fmt;

use crate::{Fp, body::BodyHandle};

/// Errors from creating, editing or removing bodies and from configuring a world.
///
/// Stepping never fails; these only come back from setup calls made between steps.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Body extents must be positive and finite.
    InvalidSize { width: Fp, height: Fp },
    /// Circle radius must be positive and finite.
    InvalidRadius(Fp),
    /// Inertia override must be positive and finite.
    InvalidInertia(Fp),
    /// Position, velocity, angle or a vertex was NaN or infinite.
    NonFinite,
    /// World bounds must be positive and finite.
    InvalidWorld { width: Fp, height: Fp },
    /// The handle is not registered, or was already removed.
    UnknownBody(BodyHandle),
    /// Vertex index is out of bounds.
    VertexOutOfBounds { index: usize, count: usize },
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::InvalidSize { width, height } => {
                write!(f, "body size {}x{} must be positive and finite", width, height)
            }
            PhysicsError::InvalidRadius(r) => write!(f, "radius {} must be positive and finite", r),
            PhysicsError::InvalidInertia(i) => write!(f, "inertia {} must be positive and finite", i),
            PhysicsError::NonFinite => write!(f, "body state must be finite"),
            PhysicsError::InvalidWorld { width, height } => {
                write!(f, "world size {}x{} must be positive and finite", width, height)
            }
            PhysicsError::UnknownBody(handle) => write!(f, "no body registered for {:?}", handle),
            PhysicsError::VertexOutOfBounds { index, count } => {
                write!(f, "vertex index {} out of bounds (count: {})", index, count)
            }
        }
    }
}

impl std::error::Error for PhysicsError {}
