use crate::{body::RigidBody, config::WorldConfig};

pub(crate) fn integrate(body: &mut RigidBody, config: &WorldConfig) {
    //! Gravity, then velocity into position. Clears `on_ground` for the resolver to recompute.
    body.on_ground = false;
    body.vel.y += config.gravity;
    body.pos += body.vel;

    if body.angle_physics() {
        body.angular_vel += body.angular_acc;
        body.angle += body.angular_vel;
        body.angular_vel *= config.angular_damping;
        if body.angular_vel.abs() < config.angular_cutoff {
            body.angular_vel = 0.0;
        }
        body.angular_acc = 0.0; // accumulated fresh by the resolver
    }
}
