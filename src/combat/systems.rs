//! Combat domain: contact-hit detection and damage application.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::{ContactDamage, Health, Invulnerable, Team};
use crate::combat::events::DamageEvent;
use crate::movement::Player;

const IFRAMES_SECS: f32 = 0.5;

pub(crate) fn tick_invulnerability(time: Res<Time>, mut query: Query<&mut Invulnerable>) {
    let dt = time.delta_secs();
    for mut invuln in &mut query {
        if invuln.timer > 0.0 {
            invuln.timer -= dt;
        }
    }
}

/// Boss-spawned effects touching the player become damage events. Collision
/// shapes come from avian sensors; this system only pairs them up.
pub(crate) fn detect_contact_hits(
    mut collisions: MessageReader<CollisionStart>,
    mut damage: MessageWriter<DamageEvent>,
    contact_query: Query<(&ContactDamage, &Transform)>,
    player_query: Query<(Entity, &Invulnerable, &Transform), With<Player>>,
) {
    for event in collisions.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (effect_entity, target_entity) in pairs {
            let Ok((contact, effect_transform)) = contact_query.get(effect_entity) else {
                continue;
            };
            let Ok((player, invuln, player_transform)) = player_query.get(target_entity) else {
                continue;
            };
            if invuln.is_invulnerable() {
                continue;
            }

            let dir = (player_transform.translation.truncate()
                - effect_transform.translation.truncate())
            .normalize_or_zero();
            let dir = if dir == Vec2::ZERO { Vec2::X } else { dir };

            damage.write(DamageEvent {
                source: effect_entity,
                target: player,
                amount: contact.amount,
                knockback: dir * contact.knockback,
            });
        }
    }
}

/// Applies damage to entities carrying [`Health`]. Bosses track hit points in
/// `BossCore` and are handled by the boss domain instead.
pub(crate) fn apply_damage(
    mut damage: MessageReader<DamageEvent>,
    mut query: Query<(&mut Health, &mut Invulnerable, Option<&Team>)>,
) {
    for event in damage.read() {
        if let Ok((mut health, mut invuln, team)) = query.get_mut(event.target) {
            health.take_damage(event.amount);
            invuln.timer = IFRAMES_SECS;
            debug!(
                "damage: {:?} hit {:?} ({:?}) for {}",
                event.source, event.target, team, event.amount
            );
        }
    }
}

pub(crate) fn apply_knockback(
    mut damage: MessageReader<DamageEvent>,
    mut query: Query<&mut LinearVelocity, With<Player>>,
) {
    for event in damage.read() {
        if let Ok(mut velocity) = query.get_mut(event.target) {
            velocity.x += event.knockback.x;
            velocity.y += event.knockback.y.max(80.0);
        }
    }
}
