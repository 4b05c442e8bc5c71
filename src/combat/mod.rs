//! Combat domain: health, damage events, and contact-hit plumbing.

mod components;
mod events;
mod systems;

pub use components::{ContactDamage, Health, Invulnerable, Minion, MinionKind, Team};
pub use events::{BossDefeatedEvent, BossFledEvent, DamageEvent};

use bevy::prelude::*;

use crate::combat::systems::{
    apply_damage, apply_knockback, detect_contact_hits, tick_invulnerability,
};
use crate::core::TickSet;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<DamageEvent>()
            .add_message::<BossDefeatedEvent>()
            .add_message::<BossFledEvent>()
            .add_systems(
                Update,
                (
                    tick_invulnerability,
                    detect_contact_hits,
                    apply_damage,
                    apply_knockback,
                )
                    .chain()
                    .in_set(TickSet::Effects),
            );
    }
}
