//! Body registry and the per-step pipeline.

mod bounds;
mod integrate;
mod resolve;
mod trigger;

use fnv::FnvHashSet;
use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::{body::{BodyDesc, BodyHandle, RigidBody}, config::WorldConfig, error::PhysicsError};

pub(crate) type Bodies = IndexMap<BodyHandle, RigidBody>;

/// Registry changes requested from inside a step, applied once it finishes.
#[derive(Debug, Default)]
pub struct Commands {
    removals: Vec<BodyHandle>,
}
impl Commands {
    pub fn remove(&mut self, handle: BodyHandle) {
        self.removals.push(handle);
    }
}

/// Registry indices of each body class, taken at the start of a step.
#[derive(Debug, Default)]
struct Partition {
    statics: Vec<usize>,
    dynamics: Vec<usize>,
    triggers: Vec<usize>,
}
impl Partition {
    fn of(bodies: &Bodies) -> Partition {
        let mut part = Partition::default();
        for (i, body) in bodies.values().enumerate() {
            if body.is_dynamic() {
                part.dynamics.push(i);
            } else if body.is_trigger() {
                part.triggers.push(i);
            } else {
                part.statics.push(i);
            }
        }
        part
    }
}

/// An ordered collection of bodies and the rectangle they live in.
pub struct World {
    config: WorldConfig,
    bodies: Bodies,
    next_handle: u64,
    pending_removals: FnvHashSet<BodyHandle>,
}

impl World {
    pub fn new(config: WorldConfig) -> Result<World, PhysicsError> {
        config.validate()?;
        debug!(width = config.width, height = config.height, gravity = config.gravity, "world created");
        Ok(World {
            config,
            bodies: IndexMap::new(),
            next_handle: 0,
            pending_removals: FnvHashSet::default(),
        })
    }

    #[inline]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn create(&mut self, desc: BodyDesc) -> Result<BodyHandle, PhysicsError> {
        //! Registers a new body at the end of the registry.
        let body = desc.build()?;
        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;
        debug!(?handle, collision_type = ?body.collision_type(), is_static = body.is_static(), is_trigger = body.is_trigger(), "body created");
        self.bodies.insert(handle, body);
        Ok(handle)
    }

    pub fn remove(&mut self, handle: BodyHandle) -> Result<(), PhysicsError> {
        //! Queues `handle` for removal at the next step boundary.
        if !self.bodies.contains_key(&handle) {
            return Err(PhysicsError::UnknownBody(handle));
        }
        self.pending_removals.insert(handle);
        Ok(())
    }

    pub fn flush_removals(&mut self) {
        //! Applies queued removals now, keeping the order of the remaining bodies.
        if self.pending_removals.is_empty() {
            return;
        }
        let pending = std::mem::take(&mut self.pending_removals);
        self.bodies.retain(|handle, _| !pending.contains(handle));
        debug!(count = pending.len(), "bodies removed");
    }

    #[inline]
    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(&handle)
    }
    #[inline]
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(&handle)
    }
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> + '_ {
        //! Bodies in registry order.
        self.bodies.iter().map(|(h, b)| (*h, b))
    }
    #[inline]
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains_key(&handle)
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn step(&mut self) {
        //! Advances the simulation by one step.
        //!
        //! Integrates every dynamic body, then for each in registry order resolves it against
        //! the static bodies, against the other dynamic bodies, and against the world bounds.
        //! Triggers are evaluated last.
        self.flush_removals();

        let part = Partition::of(&self.bodies);
        trace!(statics = part.statics.len(), dynamics = part.dynamics.len(), triggers = part.triggers.len(), "step");

        for &i in &part.dynamics {
            integrate::integrate(&mut self.bodies[i], &self.config);
        }
        for &i in &part.dynamics {
            resolve::resolve_static(&mut self.bodies, i, &part.statics, &self.config);
            resolve::resolve_dynamic(&mut self.bodies, i, &part.dynamics, &self.config);
            bounds::contain(&mut self.bodies[i], &self.config);
            debug_assert!(self.bodies[i].is_finite(), "non-finite body state: {:?}", self.bodies[i]);
        }

        let commands = trigger::evaluate(&mut self.bodies, &part.triggers);
        for handle in commands.removals {
            if self.bodies.contains_key(&handle) {
                self.pending_removals.insert(handle);
            }
        }
        self.flush_removals();
    }
}
