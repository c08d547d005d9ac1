//! Iterative positional and velocity correction.
//!
//! Each pass re-runs the narrowphase against every candidate, applies only the shallowest
//! contact, and repeats until nothing overlaps or the iteration budget runs out.

use tracing::trace;

use super::Bodies;
use crate::{Fp, Vec2, body::RigidBody, config::WorldConfig, narrow::{contact, Collider}};

#[inline]
fn l1(v: Vec2) -> Fp {
    v.x.abs() + v.y.abs()
}

#[inline]
fn lands_on(mtv: Vec2) -> bool {
    //! The MTV pushes the body up more than sideways.
    mtv.y < 0.0 && -mtv.y > mtv.x.abs()
}

fn shallowest(bodies: &Bodies, collider: &Collider, candidates: impl Iterator<Item = usize>) -> Option<(usize, Vec2)> {
    let mut best: Option<(usize, Vec2)> = None;
    for j in candidates {
        if let Some(mtv) = contact(collider, &bodies[j].collider()) {
            if best.map_or(true, |(_, b)| l1(mtv) < l1(b)) {
                best = Some((j, mtv));
            }
        }
    }
    best
}

pub(crate) fn resolve_static(bodies: &mut Bodies, i: usize, statics: &[usize], config: &WorldConfig) {
    //! Pass A: push body `i` out of the static bodies. A negligible shallowest hit ends the
    //! pass, even when a deeper contact with another static body remains.
    for _ in 0..config.static_iterations {
        let collider = bodies[i].collider();
        let Some((j, mtv)) = shallowest(bodies, &collider, statics.iter().copied()) else {
            break;
        };
        if mtv.length() <= config.min_correction {
            break;
        }
        trace!(body = i, obstacle = j, ?mtv, "static contact");
        apply_static_contact(&mut bodies[i], mtv, config);
    }
}

fn apply_static_contact(body: &mut RigidBody, mtv: Vec2, config: &WorldConfig) {
    body.translate(mtv);

    // drop the velocity component heading into the obstacle
    let into = -mtv.normalize();
    let vn = body.vel.dot(into);
    if vn > 0.0 {
        body.vel -= into * vn;
    }

    if lands_on(mtv) && body.vel.y >= 0.0 {
        body.vel.y = 0.0;
        body.on_ground = true;
    }
    if mtv.x.abs() > mtv.y.abs() {
        body.vel.x = 0.0;
        if body.vel.y.abs() < 1.0 {
            body.vel.y = 0.0;
        }
    }
    if mtv.y > mtv.x.abs() && body.vel.y < 0.0 {
        body.vel.y = 0.0; // ceiling
    }

    body.translate(mtv * config.correction_bias);

    if body.angle_physics() {
        body.angular_acc += mtv.x * config.torque_factor / body.inertia();
    }
}

pub(crate) fn resolve_dynamic(bodies: &mut Bodies, i: usize, dynamics: &[usize], config: &WorldConfig) {
    //! Pass B: separate body `i` from the other dynamic bodies, sharing the correction equally.
    for _ in 0..config.dynamic_iterations {
        let collider = bodies[i].collider();
        let Some((j, mtv)) = shallowest(bodies, &collider, dynamics.iter().copied().filter(|&j| j != i)) else {
            break;
        };
        if mtv.length() <= config.min_correction {
            break;
        }
        trace!(body = i, other = j, ?mtv, "dynamic contact");

        // equal masses: meet at the average normal velocity
        let n = mtv.normalize();
        let va = bodies[i].vel.dot(n);
        let vb = bodies[j].vel.dot(n);
        let avg = (va + vb) * 0.5;
        let half = mtv * 0.5;

        let a = &mut bodies[i];
        a.translate(half);
        a.vel += n * (avg - va);
        if lands_on(mtv) {
            a.on_ground = true;
        }

        let b = &mut bodies[j];
        b.translate(-half);
        b.vel += n * (avg - vb);
        if lands_on(-mtv) {
            b.on_ground = true;
        }
    }
}
