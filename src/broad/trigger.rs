use fnv::FnvHashSet;
use tracing::trace;

use super::{Bodies, Commands};
use crate::body::TriggerEvent;

pub(crate) fn evaluate(bodies: &mut Bodies, triggers: &[usize]) -> Commands {
    //! Box-overlap test of every trigger against every other body. Each overlapping pair is
    //! reported once per step: to the trigger's listener, and to the other body's listener
    //! when it is also a trigger.
    let mut seen = FnvHashSet::<(usize, usize)>::default();
    let mut pairs = Vec::new();
    for &t in triggers {
        let Some((&this, zone)) = bodies.get_index(t) else {
            continue;
        };
        let zone = zone.aabb();
        for (o, (&other, body)) in bodies.iter().enumerate() {
            if o == t || !zone.overlap_test(&body.aabb()) {
                continue;
            }
            if seen.insert((t.min(o), t.max(o))) {
                pairs.push((t, o, this, other));
            }
        }
    }

    let mut commands = Commands::default();
    for (t, o, this, other) in pairs {
        trace!(?this, ?other, "trigger overlap");
        fire(bodies, t, TriggerEvent { this, other }, &mut commands);
        if bodies[o].is_trigger() {
            fire(bodies, o, TriggerEvent { this: other, other: this }, &mut commands);
        }
    }
    commands
}

fn fire(bodies: &mut Bodies, i: usize, event: TriggerEvent, commands: &mut Commands) {
    if let Some(listener) = bodies[i].listener.as_mut() {
        listener.on_trigger(event, commands);
    }
}
