//! Effects domain: lifecycle ticking, motion embellishments, and the sweep.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::anim::{DespawnOnExhaust, SpriteAnimator};
use crate::core::StageBounds;
use crate::effects::components::{
    EffectLifetime, FadeOut, FlipWithVelocity, FollowTarget, GravityAuraField, GroundDespawn,
    MarkedForDeletion, OffscreenDespawn, ScaleGrow, Spin,
};
use crate::effects::outbox::{EffectSpawn, GravityPull, SpawnKind, SpawnOutbox};
use crate::movement::{Facing, Player};

const EFFECT_GRAVITY: f32 = 980.0;

/// One damped pursuit step. Applied once per tick, so the follower's lag is a
/// function of frame count rather than wall time.
pub fn follow_step(pos: Vec2, target: Vec2, speed: f32) -> Vec2 {
    pos + (target - pos) * speed
}

pub(crate) fn tick_lifetimes(
    time: Res<Time>,
    mut commands: Commands,
    mut query: Query<(Entity, &mut EffectLifetime), Without<MarkedForDeletion>>,
) {
    let delta_ms = time.delta_secs() * 1000.0;
    for (entity, mut lifetime) in &mut query {
        lifetime.remaining_ms -= delta_ms;
        if lifetime.remaining_ms <= 0.0 {
            commands.entity(entity).insert(MarkedForDeletion);
        }
    }
}

pub(crate) fn despawn_offscreen(
    stage: Res<StageBounds>,
    mut commands: Commands,
    query: Query<(Entity, &Transform, &OffscreenDespawn), Without<MarkedForDeletion>>,
) {
    for (entity, transform, despawn) in &query {
        let pos = stage.to_stage(transform.translation.truncate());
        let out = pos.x < -despawn.margin
            || pos.x > stage.width + despawn.margin
            || pos.y < -despawn.margin
            || pos.y > stage.height + despawn.margin;
        if out {
            commands.entity(entity).insert(MarkedForDeletion);
        }
    }
}

/// Manual gravity for kinematic lobbed effects.
pub(crate) fn apply_gravity_pull(
    time: Res<Time>,
    mut query: Query<&mut LinearVelocity, With<GravityPull>>,
) {
    let dt = time.delta_secs();
    for mut velocity in &mut query {
        velocity.y -= EFFECT_GRAVITY * dt;
    }
}

/// Deletes falling effects at the ground line and leaves their burst (splat,
/// shatter, explosion) at the point of impact.
pub(crate) fn ground_contact(
    stage: Res<StageBounds>,
    mut outbox: ResMut<SpawnOutbox>,
    mut commands: Commands,
    query: Query<(Entity, &Transform, &GroundDespawn), Without<MarkedForDeletion>>,
) {
    for (entity, transform, despawn) in &query {
        let pos = stage.to_stage(transform.translation.truncate());
        if pos.y <= 0.0 {
            commands.entity(entity).insert(MarkedForDeletion);
            if let Some(kind) = despawn.burst {
                let origin = Vec2::new(pos.x, 0.0);
                outbox.push(EffectSpawn {
                    kind,
                    origin,
                    facing: Facing::Right,
                    target: origin,
                    owner: None,
                });
            }
        }
    }
}

pub(crate) fn follow_targets(
    targets: Query<&Transform, Without<FollowTarget>>,
    mut followers: Query<(&FollowTarget, &mut Transform)>,
) {
    for (follow, mut transform) in &mut followers {
        let Ok(target) = targets.get(follow.target) else {
            continue;
        };
        let next = follow_step(
            transform.translation.truncate(),
            target.translation.truncate(),
            follow.speed,
        );
        transform.translation.x = next.x;
        transform.translation.y = next.y;
    }
}

/// Shoves the player outward while inside an aura's radius.
pub(crate) fn aura_pushback(
    time: Res<Time>,
    auras: Query<(&GravityAuraField, &Transform)>,
    mut player: Query<(&Transform, &mut LinearVelocity), With<Player>>,
) {
    let Ok((player_transform, mut velocity)) = player.single_mut() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();
    let dt = time.delta_secs();

    for (field, transform) in &auras {
        let offset = player_pos - transform.translation.truncate();
        let distance = offset.length();
        if distance < field.radius {
            let dir = if distance > f32::EPSILON {
                offset / distance
            } else {
                Vec2::X
            };
            velocity.x += dir.x * field.push * dt;
            velocity.y += dir.y * field.push * dt;
        }
    }
}

pub(crate) fn tick_embellishments(
    time: Res<Time>,
    mut commands: Commands,
    mut grow: Query<(&ScaleGrow, &mut Transform), Without<Spin>>,
    mut spin: Query<(&Spin, &mut Transform)>,
    mut fade: Query<(Entity, &FadeOut, &mut Sprite), Without<MarkedForDeletion>>,
) {
    let dt = time.delta_secs();

    for (g, mut transform) in &mut grow {
        let next = (transform.scale.x + g.per_sec * dt).min(g.max_scale);
        transform.scale = Vec3::new(next, next, 1.0);
    }

    for (s, mut transform) in &mut spin {
        transform.rotate_z(s.rad_per_sec * dt);
    }

    for (entity, f, mut sprite) in &mut fade {
        let alpha = (sprite.color.alpha() - f.per_sec * dt).max(0.0);
        sprite.color.set_alpha(alpha);
        if alpha <= 0.0 {
            commands.entity(entity).insert(MarkedForDeletion);
        }
    }
}

pub(crate) fn flip_with_velocity(
    mut query: Query<(&LinearVelocity, &mut Sprite), With<FlipWithVelocity>>,
) {
    for (velocity, mut sprite) in &mut query {
        if velocity.x.abs() > f32::EPSILON {
            sprite.flip_x = velocity.x < 0.0;
        }
    }
}

/// Flags finished one-shot animations for the sweep.
pub(crate) fn flag_exhausted(
    mut commands: Commands,
    query: Query<(Entity, &SpriteAnimator), (With<DespawnOnExhaust>, Without<MarkedForDeletion>)>,
) {
    for (entity, animator) in &query {
        if animator.exhausted {
            commands.entity(entity).insert(MarkedForDeletion);
        }
    }
}

/// The only system that despawns. Everything upstream flags.
pub(crate) fn sweep_deleted(mut commands: Commands, query: Query<Entity, With<MarkedForDeletion>>) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_step_closes_a_fixed_fraction_per_tick() {
        let pos = follow_step(Vec2::ZERO, Vec2::new(100.0, 0.0), 0.1);
        assert!((pos.x - 10.0).abs() < 1e-4);
        let pos = follow_step(pos, Vec2::new(100.0, 0.0), 0.1);
        assert!((pos.x - 19.0).abs() < 1e-4);
    }

    #[test]
    fn follow_step_converges_without_overshoot() {
        let target = Vec2::new(50.0, -30.0);
        let mut pos = Vec2::new(-200.0, 400.0);
        let mut last_dist = (target - pos).length();
        for _ in 0..200 {
            pos = follow_step(pos, target, 0.1);
            let dist = (target - pos).length();
            assert!(dist <= last_dist);
            last_dist = dist;
        }
        assert!(last_dist < 1.0);
    }
}
