//! Picking and editing polygon vertices between steps.

use tracing::{debug, warn};

use crate::{Fp, Vec2, body::BodyHandle, broad::World, error::PhysicsError, narrow::Intersect};

impl World {
    pub fn body_at(&self, point: Vec2) -> Option<BodyHandle> {
        //! First body, in registry order, whose box contains `point`.
        self.bodies().find(|(_, b)| b.aabb().point_test(point)).map(|(h, _)| h)
    }

    pub fn pick_vertex(&self, point: Vec2, tolerance: Fp) -> Option<(BodyHandle, usize)> {
        //! First vertex within `tolerance` of `point`, measured at its unrotated world position.
        let tol2 = tolerance * tolerance;
        self.bodies().find_map(|(h, b)| {
            b.vertices()
                .iter()
                .position(|v| (b.pos + *v - point).length_squared() < tol2)
                .map(|i| (h, i))
        })
    }

    pub fn move_vertex(&mut self, handle: BodyHandle, index: usize, point: Vec2) -> Result<(), PhysicsError> {
        //! Moves vertex `index` so its unrotated world position is `point`.
        if !point.is_finite() {
            return Err(PhysicsError::NonFinite);
        }
        let body = self.body_mut(handle).ok_or(PhysicsError::UnknownBody(handle))?;
        let local = point - body.pos;
        let verts = body.vertices_mut();
        let count = verts.len();
        match verts.get_mut(index) {
            Some(v) => {
                *v = local;
                Ok(())
            }
            None => {
                warn!(?handle, index, count, "vertex edit out of bounds");
                Err(PhysicsError::VertexOutOfBounds { index, count })
            }
        }
    }

    pub fn insert_vertex(&mut self, point: Vec2) -> Option<(BodyHandle, usize)> {
        //! Appends a vertex at `point` to the first body whose box contains it. The body's
        //! collision type is left as it was.
        let handle = self.body_at(point)?;
        let body = self.body_mut(handle)?;
        let local = point - body.pos;
        let verts = body.vertices_mut();
        verts.push(local);
        debug!(?handle, count = verts.len(), "vertex inserted");
        Some((handle, verts.len() - 1))
    }
}
