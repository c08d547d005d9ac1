use crate::{body::RigidBody, config::WorldConfig};

pub(crate) fn contain(body: &mut RigidBody, config: &WorldConfig) {
    //! Clamps the body into the world rectangle, then applies ground friction and rolling.
    let (w, h) = (config.width, config.height);

    if body.pos.x <= 0.0 {
        body.pos.x = 0.0;
        body.vel.x = 0.0;
    } else if body.pos.x + body.size.x >= w {
        body.pos.x = w - body.size.x;
        body.vel.x = 0.0;
    }

    if body.pos.y + body.size.y >= h {
        body.pos.y = h - body.size.y;
        body.vel.y = 0.0;
        body.on_ground = true;
    } else if body.pos.y < 0.0 {
        body.pos.y = 0.0;
        body.vel.y = 0.0;
    }

    if !body.on_ground {
        return;
    }

    body.vel.x *= config.ground_friction;
    if body.vel.x.abs() < config.friction_cutoff {
        body.vel.x = 0.0;
    }

    if body.angle_physics() {
        // spin drives the body along the ground, and ground speed winds the spin back
        let r = body.rolling_radius();
        body.vel.x += body.angular_vel * r;
        body.angular_acc += -body.vel.x / r;
    }
}
