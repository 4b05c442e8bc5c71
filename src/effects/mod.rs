//! Effects domain: transient entities spawned by boss attacks.
//!
//! Two invariants hold across the domain: spawning is deferred through the
//! [`SpawnOutbox`], and deletion is flag-only with a single sweep at the end
//! of the tick.

mod collision_anim;
mod components;
mod outbox;
mod systems;

pub use collision_anim::{ExplosionBurst, chains_explosion};
pub use components::{
    EffectLifetime, FadeOut, FlipWithVelocity, FollowTarget, GravityAuraField, GroundDespawn,
    MarkedForDeletion, OffscreenDespawn, ScaleGrow, Spin,
};
pub use outbox::{ELECTRIC_LOOP, EffectSpawn, FOLLOW_SPEED, GRAVITY_LOOP, SpawnKind, SpawnOutbox};
pub use systems::follow_step;

use bevy::prelude::*;

use crate::core::TickSet;

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpawnOutbox>()
            .add_systems(
                Update,
                (
                    outbox::drain_outbox,
                    systems::apply_gravity_pull,
                    systems::tick_lifetimes,
                    systems::despawn_offscreen,
                    systems::ground_contact,
                    systems::follow_targets,
                    systems::aura_pushback,
                    systems::tick_embellishments,
                    systems::flip_with_velocity,
                    collision_anim::handle_explosion_contacts,
                    systems::flag_exhausted,
                )
                    .chain()
                    .in_set(TickSet::Effects),
            )
            .add_systems(Update, systems::sweep_deleted.in_set(TickSet::Sweep));
    }
}
