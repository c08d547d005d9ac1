//! A small 2D rigid-body step for platformer-style games.
//!
//! Bodies live in a [`World`]. Each call to [`World::step`] applies gravity, resolves
//! contacts against static and then dynamic bodies, clamps everything to the world
//! rectangle, applies ground friction and rolling, and finally reports trigger overlaps.
//!
//! Units are per step: velocities are added to positions once per step, and gravity is
//! added to `vel.y` once per step. The y axis points down, as on a canvas.

pub mod narrow;
pub mod broad;
pub mod body;
pub mod config;
pub mod error;
pub mod edit;

#[cfg(not(feature = "f64"))]
pub type Fp = f32;
#[cfg(not(feature = "f64"))]
pub type Vec2 = glam::Vec2;

#[cfg(feature = "f64")]
pub type Fp = f64;
#[cfg(feature = "f64")]
pub type Vec2 = glam::DVec2;

pub use body::{BodyDesc, BodyHandle, CollisionType, RigidBody, TriggerEvent, TriggerListener};
pub use broad::{Commands, World};
pub use config::WorldConfig;
pub use error::PhysicsError;
