use std::fmt::{Debug, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Fp, Vec2, broad::Commands, error::PhysicsError, narrow::{self, Aabb, Circle, Collider}};

/// Stable key of a registered body. Never reused within a `World`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) u64);

/// Which narrowphase a body takes part in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CollisionType {
    Rect,
    /// Uses the body's vertices, falling back to `Rect` with fewer than three.
    Polygon,
    /// Centred on the body's box centre.
    Circle,
}

/// Delivered to a trigger's listener once per overlapping pair per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEvent {
    /// The trigger that owns the listener.
    pub this: BodyHandle,
    /// The overlapping body.
    pub other: BodyHandle,
}

/// Overlap callback attached to a trigger body.
///
/// Called synchronously inside `World::step`. Listeners only see handles; registry changes go
/// through `commands` and are applied once the step has finished.
pub trait TriggerListener {
    fn on_trigger(&mut self, event: TriggerEvent, commands: &mut Commands);
}

impl<F: FnMut(TriggerEvent, &mut Commands)> TriggerListener for F {
    fn on_trigger(&mut self, event: TriggerEvent, commands: &mut Commands) {
        self(event, commands)
    }
}

pub struct RigidBody {
    /// Top-left corner of the box.
    pub pos: Vec2,
    /// Box extents.
    pub size: Vec2,
    /// Displacement per step.
    pub vel: Vec2,
    /// Rotation in radians about the box centre.
    pub angle: Fp,
    pub angular_vel: Fp,
    /// Accumulated over a step, consumed by the next integration.
    pub angular_acc: Fp,
    /// Set by the last step if the body rests on something.
    pub on_ground: bool,

    vertices: Vec<Vec2>,
    collision_type: CollisionType,
    radius: Option<Fp>,
    is_static: bool,
    is_trigger: bool,
    angle_physics: bool,
    inertia: Fp,
    pub(crate) listener: Option<Box<dyn TriggerListener>>,
}

impl RigidBody {
    #[inline]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }
    #[inline]
    pub(crate) fn vertices_mut(&mut self) -> &mut Vec<Vec2> {
        &mut self.vertices
    }
    #[inline]
    pub fn collision_type(&self) -> CollisionType {
        self.collision_type
    }
    #[inline]
    pub fn radius(&self) -> Option<Fp> {
        self.radius
    }
    #[inline]
    pub fn is_static(&self) -> bool {
        self.is_static
    }
    #[inline]
    pub fn is_trigger(&self) -> bool {
        self.is_trigger
    }
    #[inline]
    pub fn is_dynamic(&self) -> bool {
        //! Integrated and resolved: neither static nor a trigger.
        !self.is_static && !self.is_trigger
    }
    #[inline]
    pub fn angle_physics(&self) -> bool {
        self.angle_physics
    }
    #[inline]
    pub fn inertia(&self) -> Fp {
        self.inertia
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_rect(self.pos, self.size)
    }
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    #[inline]
    pub fn translate(&mut self, offset: Vec2) {
        //! Teleports the body.
        self.pos += offset;
    }

    pub fn world_vertices(&self) -> Vec<Vec2> {
        //! Local vertices moved to the body's position and rotated about its centre.
        narrow::world_vertices(&self.vertices, self.pos, self.size, self.angle)
    }

    pub fn collider(&self) -> Collider {
        //! Polygons with fewer than three vertices fall back to their box.
        match self.collision_type {
            CollisionType::Circle => Collider::Circle(Circle {
                rad: self.radius.unwrap_or(0.5 * self.size.min_element()),
                pos: self.center(),
            }),
            CollisionType::Polygon if self.vertices.len() >= 3 => Collider::Poly(self.world_vertices()),
            _ => Collider::Rect(self.aabb()),
        }
    }

    #[inline]
    pub fn rolling_radius(&self) -> Fp {
        //! Circles roll on their radius, everything else on half its width.
        match (self.collision_type, self.radius) {
            (CollisionType::Circle, Some(r)) => r,
            _ => self.size.x * 0.5,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.pos.is_finite()
            && self.vel.is_finite()
            && self.angle.is_finite()
            && self.angular_vel.is_finite()
            && self.angular_acc.is_finite()
    }
}

impl Debug for RigidBody {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.debug_struct("RigidBody")
            .field("pos", &self.pos)
            .field("size", &self.size)
            .field("vel", &self.vel)
            .field("angle", &self.angle)
            .field("angular_vel", &self.angular_vel)
            .field("on_ground", &self.on_ground)
            .field("collision_type", &self.collision_type)
            .field("is_static", &self.is_static)
            .field("is_trigger", &self.is_trigger)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

// ---------- Description ---------- //

/// Every recognised body option. Unset options take their documented default when the body
/// is created.
pub struct BodyDesc {
    pub pos: Vec2,
    pub size: Vec2,
    /// Default: zero.
    pub vel: Vec2,
    /// Local offsets within `(0, 0)..size`. Default: empty.
    pub vertices: Vec<Vec2>,
    /// Default: none. Required for circles, otherwise derived as `min(w, h) / 2`.
    pub radius: Option<Fp>,
    /// Default: derived from `vertices` and `radius`.
    pub collision_type: Option<CollisionType>,
    pub is_static: bool,
    pub is_trigger: bool,
    pub angle: Fp,
    pub angular_vel: Fp,
    /// Enables rotation from contacts and rolling. Default: false.
    pub angle_physics: bool,
    /// Default: `width * height * 0.1`.
    pub inertia: Option<Fp>,
    /// Only set through [`BodyDesc::trigger`], so a listener always belongs to a trigger.
    listener: Option<Box<dyn TriggerListener>>,
}

impl BodyDesc {
    pub fn rect(x: Fp, y: Fp, width: Fp, height: Fp) -> BodyDesc {
        BodyDesc {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
            vel: Vec2::ZERO,
            vertices: Vec::new(),
            radius: None,
            collision_type: None,
            is_static: false,
            is_trigger: false,
            angle: 0.0,
            angular_vel: 0.0,
            angle_physics: false,
            inertia: None,
            listener: None,
        }
    }
    pub fn circle(x: Fp, y: Fp, radius: Fp) -> BodyDesc {
        //! `(x, y)` is the top-left of the circle's bounding box.
        let mut desc = BodyDesc::rect(x, y, radius * 2.0, radius * 2.0);
        desc.radius = Some(radius);
        desc
    }
    pub fn polygon(x: Fp, y: Fp, width: Fp, height: Fp, vertices: Vec<Vec2>) -> BodyDesc {
        let mut desc = BodyDesc::rect(x, y, width, height);
        desc.vertices = vertices;
        desc
    }

    pub fn with_rect_vertices(mut self) -> Self {
        //! Uses the box's four corners as polygon vertices.
        self.vertices = Aabb::from_rect(Vec2::ZERO, self.size).corners().to_vec();
        self
    }
    pub fn with_velocity(mut self, vx: Fp, vy: Fp) -> Self {
        self.vel = Vec2::new(vx, vy);
        self
    }
    pub fn with_collision_type(mut self, collision_type: CollisionType) -> Self {
        self.collision_type = Some(collision_type);
        self
    }
    pub fn fixed(mut self) -> Self {
        //! Makes the body static.
        self.is_static = true;
        self
    }
    pub fn trigger(mut self, listener: impl TriggerListener + 'static) -> Self {
        self.is_trigger = true;
        self.listener = Some(Box::new(listener));
        self
    }
    pub fn sensor(mut self) -> Self {
        //! A trigger without a listener of its own.
        self.is_trigger = true;
        self
    }
    pub fn with_angle(mut self, angle: Fp, angular_vel: Fp) -> Self {
        self.angle = angle;
        self.angular_vel = angular_vel;
        self
    }
    pub fn with_angle_physics(mut self) -> Self {
        self.angle_physics = true;
        self
    }
    pub fn with_inertia(mut self, inertia: Fp) -> Self {
        self.inertia = Some(inertia);
        self
    }

    pub(crate) fn build(self) -> Result<RigidBody, PhysicsError> {
        //! Validates the description and resolves every default.
        let (w, h) = (self.size.x, self.size.y);
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(PhysicsError::InvalidSize { width: w, height: h });
        }
        if !(self.pos.is_finite()
            && self.vel.is_finite()
            && self.angle.is_finite()
            && self.angular_vel.is_finite()
            && self.vertices.iter().all(|v| v.is_finite()))
        {
            return Err(PhysicsError::NonFinite);
        }
        if let Some(r) = self.radius {
            if !(r.is_finite() && r > 0.0) {
                return Err(PhysicsError::InvalidRadius(r));
            }
        }
        let inertia = self.inertia.unwrap_or(w * h * 0.1);
        if !(inertia.is_finite() && inertia > 0.0) {
            return Err(PhysicsError::InvalidInertia(inertia));
        }

        let collision_type = self.collision_type.unwrap_or(if !self.vertices.is_empty() {
            CollisionType::Polygon
        } else if self.radius.is_some() {
            CollisionType::Circle
        } else {
            CollisionType::Rect
        });
        let radius = match collision_type {
            CollisionType::Circle => Some(self.radius.unwrap_or(0.5 * w.min(h))),
            _ => None,
        };

        Ok(RigidBody {
            pos: self.pos,
            size: self.size,
            vel: self.vel,
            angle: self.angle,
            angular_vel: self.angular_vel,
            angular_acc: 0.0,
            on_ground: false,
            vertices: self.vertices,
            collision_type,
            radius,
            is_static: self.is_static,
            is_trigger: self.is_trigger,
            angle_physics: self.angle_physics,
            inertia,
            listener: self.listener,
        })
    }
}

impl Debug for BodyDesc {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.debug_struct("BodyDesc")
            .field("pos", &self.pos)
            .field("size", &self.size)
            .field("vel", &self.vel)
            .field("vertices", &self.vertices)
            .field("radius", &self.radius)
            .field("collision_type", &self.collision_type)
            .field("is_static", &self.is_static)
            .field("is_trigger", &self.is_trigger)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_collision_type() {
        assert_eq!(BodyDesc::rect(0.0, 0.0, 4.0, 4.0).build().unwrap().collision_type(), CollisionType::Rect);
        assert_eq!(BodyDesc::circle(0.0, 0.0, 2.0).build().unwrap().collision_type(), CollisionType::Circle);

        let poly = BodyDesc::rect(0.0, 0.0, 4.0, 4.0).with_rect_vertices().build().unwrap();
        assert_eq!(poly.collision_type(), CollisionType::Polygon);
        assert_eq!(poly.vertices().len(), 4);

        // an override wins, and only circles keep a radius
        let forced = BodyDesc::circle(0.0, 0.0, 2.0).with_collision_type(CollisionType::Rect).build().unwrap();
        assert_eq!(forced.collision_type(), CollisionType::Rect);
        assert_eq!(forced.radius(), None);
        let round = BodyDesc::rect(0.0, 0.0, 4.0, 6.0).with_collision_type(CollisionType::Circle).build().unwrap();
        assert_eq!(round.radius(), Some(2.0));
    }

    #[test]
    fn listener_marks_trigger() {
        let desc = BodyDesc::rect(0.0, 0.0, 4.0, 4.0).fixed().trigger(|_: TriggerEvent, _: &mut Commands| {});
        let body = desc.build().unwrap();
        assert!(body.is_trigger());
        assert!(body.listener.is_some());
        assert!(!body.is_dynamic());

        let plain = BodyDesc::rect(0.0, 0.0, 4.0, 4.0).build().unwrap();
        assert!(plain.is_dynamic());
        assert!(plain.listener.is_none());
    }

    #[test]
    fn default_inertia() {
        let body = BodyDesc::rect(0.0, 0.0, 10.0, 20.0).build().unwrap();
        assert_eq!(body.inertia(), 20.0);
        let body = BodyDesc::rect(0.0, 0.0, 10.0, 20.0).with_inertia(3.0).build().unwrap();
        assert_eq!(body.inertia(), 3.0);
    }

    #[test]
    fn rejects_bad_options() {
        assert_eq!(
            BodyDesc::rect(0.0, 0.0, 0.0, 1.0).build().unwrap_err(),
            PhysicsError::InvalidSize { width: 0.0, height: 1.0 }
        );
        assert_eq!(BodyDesc::circle(0.0, 0.0, -1.0).build().unwrap_err(), PhysicsError::InvalidSize { width: -2.0, height: -2.0 });
        let mut desc = BodyDesc::rect(0.0, 0.0, 1.0, 1.0);
        desc.radius = Some(0.0);
        assert_eq!(desc.build().unwrap_err(), PhysicsError::InvalidRadius(0.0));
        assert_eq!(BodyDesc::rect(Fp::NAN, 0.0, 1.0, 1.0).build().unwrap_err(), PhysicsError::NonFinite);
        assert_eq!(
            BodyDesc::rect(0.0, 0.0, 1.0, 1.0).with_inertia(0.0).build().unwrap_err(),
            PhysicsError::InvalidInertia(0.0)
        );
    }

    #[test]
    fn short_polygon_falls_back_to_box() {
        let body = BodyDesc::polygon(1.0, 2.0, 4.0, 4.0, vec![Vec2::ZERO, Vec2::new(4.0, 0.0)]).build().unwrap();
        assert_eq!(body.collision_type(), CollisionType::Polygon);
        assert_eq!(body.collider(), Collider::Rect(Aabb::new(1.0, 2.0, 5.0, 6.0)));
    }

    #[test]
    fn circle_collider_is_centred() {
        let body = BodyDesc::circle(10.0, 20.0, 5.0).build().unwrap();
        assert_eq!(body.collider(), Collider::Circle(Circle::new(5.0, 15.0, 25.0)));
        assert_eq!(body.rolling_radius(), 5.0);
        assert_eq!(BodyDesc::rect(0.0, 0.0, 8.0, 2.0).build().unwrap().rolling_radius(), 4.0);
    }
}
