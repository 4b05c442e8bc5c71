//! Effects domain: the deferred spawn outbox.
//!
//! Boss logic never spawns entities mid-iteration; it pushes descriptors here
//! and a single drain system materializes them after all boss updates. Tests
//! assert on outbox contents without a full game-loop fixture.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use rand::Rng;

use crate::anim::{DespawnOnExhaust, SheetLibrary, SpriteAnimator};
use crate::boss::{ElectricWheel, GravitySpinner};
use crate::combat::ContactDamage;
use crate::core::{CombatRng, StageBounds};
use crate::effects::collision_anim::ExplosionBurst;
use crate::effects::components::{
    EffectLifetime, FadeOut, FlipWithVelocity, FollowTarget, GravityAuraField, GroundDespawn,
    OffscreenDespawn, ScaleGrow, Spin,
};
use crate::movement::{Facing, GameLayer, Player};
use crate::services::{AudioCommand, ScreenFxCommand, SoundId};

/// Looping hum while a gravity aura chases the player.
pub const GRAVITY_LOOP: SoundId = SoundId("gravity_loop");
/// Looping crackle while the electric wheel orbits the boss.
pub const ELECTRIC_LOOP: SoundId = SoundId("electric_loop");

/// Per-tick damping constant for homing effects (gravity aura, ice balls).
pub const FOLLOW_SPEED: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnKind {
    PistolArrow,
    Fireball,
    LaserBeam,
    Meteor,
    GhostBlast,
    GravityAura,
    ElectricWheel,
    InkBomb,
    PoisonDrop,
    PurpleSlash,
    PurpleThunder,
    IceSlash,
    IcyStormShard,
    TopIcicle,
    UndergroundIcicle,
    SpinningIceBall,
    Explosion { source_id: u32 },
    PoisonSplat,
    InkSplat,
    FrostShatter,
}

/// A deferred spawn request, in stage coordinates.
#[derive(Debug, Clone)]
pub struct EffectSpawn {
    pub kind: SpawnKind,
    pub origin: Vec2,
    pub facing: Facing,
    /// Player center at the moment the request was made.
    pub target: Vec2,
    /// Boss that requested the spawn, for back-references.
    pub owner: Option<Entity>,
}

#[derive(Resource, Debug, Default)]
pub struct SpawnOutbox {
    pending: Vec<EffectSpawn>,
}

impl SpawnOutbox {
    pub fn push(&mut self, spawn: EffectSpawn) {
        self.pending.push(spawn);
    }

    pub fn take(&mut self) -> Vec<EffectSpawn> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending(&self) -> &[EffectSpawn] {
        &self.pending
    }
}

fn boss_effect_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::BossEffect, [GameLayer::Player])
}

/// Materializes all pending spawn requests. Runs after boss logic within the
/// same tick, so trigger-frame spawns land on the tick they fired.
pub(crate) fn drain_outbox(
    mut commands: Commands,
    mut outbox: ResMut<SpawnOutbox>,
    mut rng: ResMut<CombatRng>,
    mut audio: MessageWriter<AudioCommand>,
    mut screenfx: MessageWriter<ScreenFxCommand>,
    sheets: Res<SheetLibrary>,
    stage: Res<StageBounds>,
    player: Query<Entity, With<Player>>,
    mut spinners: Query<&mut GravitySpinner>,
    mut wheels: Query<&mut ElectricWheel>,
) {
    if outbox.is_empty() {
        return;
    }

    for spawn in outbox.take() {
        let world = stage.to_world(spawn.origin);
        let dir = Facing::toward(spawn.target.x - spawn.origin.x).sign();
        let to_target = (spawn.target - spawn.origin).normalize_or_zero();

        match spawn.kind {
            SpawnKind::PistolArrow => {
                let sheet = sheets.sheet("fx.arrow");
                commands.spawn((
                    sheet.sprite(0, Vec2::new(48.0, 16.0)),
                    SpriteAnimator::new(0, 1.0, true).with_sheet(0, sheet.columns),
                    Transform::from_xyz(world.x, world.y, 1.0),
                    LinearVelocity(Vec2::new(dir * 520.0, 0.0)),
                    RigidBody::Kinematic,
                    Collider::rectangle(40.0, 10.0),
                    Sensor,
                    CollisionEventsEnabled,
                    boss_effect_layers(),
                    ContactDamage {
                        amount: 8.0,
                        knockback: 200.0,
                    },
                    OffscreenDespawn::default(),
                    FlipWithVelocity,
                ));
            }
            SpawnKind::Fireball => {
                let sheet = sheets.sheet("fx.fireball");
                commands.spawn((
                    sheet.sprite(0, Vec2::splat(40.0)),
                    SpriteAnimator::new(5, 20.0, true).with_sheet(0, sheet.columns),
                    Transform::from_xyz(world.x, world.y, 1.0),
                    LinearVelocity(to_target * 380.0),
                    RigidBody::Kinematic,
                    Collider::circle(16.0),
                    Sensor,
                    CollisionEventsEnabled,
                    boss_effect_layers(),
                    ContactDamage {
                        amount: 12.0,
                        knockback: 260.0,
                    },
                    OffscreenDespawn::default(),
                    Spin { rad_per_sec: 6.0 },
                ));
            }
            SpawnKind::LaserBeam => {
                let sheet = sheets.sheet("fx.laser");
                let beam_center = world + Vec2::new(dir * 110.0, 8.0);
                let mut sprite = sheet.sprite(0, Vec2::new(220.0, 36.0));
                sprite.flip_x = dir < 0.0;
                commands.spawn((
                    sprite,
                    SpriteAnimator::new(7, 24.0, true).with_sheet(0, sheet.columns),
                    Transform::from_xyz(beam_center.x, beam_center.y, 1.0),
                    RigidBody::Kinematic,
                    Collider::rectangle(220.0, 28.0),
                    Sensor,
                    CollisionEventsEnabled,
                    boss_effect_layers(),
                    ContactDamage {
                        amount: 14.0,
                        knockback: 120.0,
                    },
                    EffectLifetime::new(900.0),
                ));
            }
            SpawnKind::Meteor => {
                let sheet = sheets.sheet("fx.meteor");
                let x_jitter = rng.0.random_range(-120.0..=120.0);
                let drop = stage.to_world(Vec2::new(spawn.target.x + x_jitter, stage.height + 60.0));
                commands.spawn((
                    sheet.sprite(0, Vec2::splat(56.0)),
                    SpriteAnimator::new(5, 18.0, true).with_sheet(0, sheet.columns),
                    Transform::from_xyz(drop.x, drop.y, 1.0),
                    LinearVelocity(Vec2::new(-x_jitter * 0.3, -540.0)),
                    RigidBody::Kinematic,
                    Collider::circle(22.0),
                    Sensor,
                    CollisionEventsEnabled,
                    boss_effect_layers(),
                    ContactDamage {
                        amount: 16.0,
                        knockback: 320.0,
                    },
                    GroundDespawn {
                        burst: Some(SpawnKind::Explosion { source_id: 0 }),
                    },
                ));
                screenfx.write(ScreenFxCommand::StartShake {
                    ms: 250.0,
                    magnitude: 4.0,
                });
            }
            SpawnKind::GhostBlast => {
                let sheet = sheets.sheet("fx.ghost_blast");
                commands.spawn((
                    sheet.sprite(0, Vec2::splat(72.0)),
                    SpriteAnimator::new(7, 16.0, true).with_sheet(0, sheet.columns),
                    Transform::from_xyz(world.x, world.y, 1.0),
                    LinearVelocity(to_target * 300.0),
                    RigidBody::Kinematic,
                    Collider::circle(28.0),
                    Sensor,
                    CollisionEventsEnabled,
                    boss_effect_layers(),
                    ContactDamage {
                        amount: 10.0,
                        knockback: 180.0,
                    },
                    EffectLifetime::new(1200.0),
                    FadeOut { per_sec: 0.8 },
                ));
            }
            SpawnKind::GravityAura => {
                let sheet = sheets.sheet("fx.gravity_aura");
                let aura = commands
                    .spawn((
                        sheet.sprite(0, Vec2::splat(120.0)),
                        SpriteAnimator::new(7, 14.0, true).with_sheet(0, sheet.columns),
                        Transform::from_xyz(world.x, world.y, 0.5),
                        GravityAuraField {
                            radius: 90.0,
                            push: 420.0,
                        },
                        EffectLifetime::new(6000.0),
                        Spin { rad_per_sec: 1.5 },
                    ))
                    .id();
                if let Ok(player_entity) = player.single() {
                    commands.entity(aura).insert(FollowTarget {
                        target: player_entity,
                        speed: FOLLOW_SPEED,
                    });
                }
                if let Some(owner) = spawn.owner {
                    if let Ok(mut spinner) = spinners.get_mut(owner) {
                        spinner.note_aura_spawned(aura);
                    }
                }
                screenfx.write(ScreenFxCommand::Request {
                    tag: "gravity",
                    rgb: [0.35, 0.1, 0.5],
                    fade_in_speed: 0.3,
                });
                audio.write(AudioCommand::Play {
                    id: GRAVITY_LOOP,
                    looped: true,
                    restart: false,
                });
            }
            SpawnKind::ElectricWheel => {
                let sheet = sheets.sheet("fx.electric_wheel");
                let wheel = commands
                    .spawn((
                        sheet.sprite(0, Vec2::splat(130.0)),
                        SpriteAnimator::new(7, 20.0, true).with_sheet(0, sheet.columns),
                        Transform::from_xyz(world.x, world.y, 0.5),
                        RigidBody::Kinematic,
                        Collider::circle(55.0),
                        Sensor,
                        CollisionEventsEnabled,
                        boss_effect_layers(),
                        ContactDamage {
                            amount: 12.0,
                            knockback: 300.0,
                        },
                        Spin { rad_per_sec: 8.0 },
                    ))
                    .id();
                if let Some(owner) = spawn.owner {
                    // Wheel trails the boss; one tick of lag is the contract.
                    commands.entity(wheel).insert(FollowTarget {
                        target: owner,
                        speed: 1.0,
                    });
                    if let Ok(mut state) = wheels.get_mut(owner) {
                        state.note_wheel_spawned(wheel);
                    }
                }
                audio.write(AudioCommand::Play {
                    id: ELECTRIC_LOOP,
                    looped: true,
                    restart: true,
                });
            }
            SpawnKind::InkBomb => {
                let sheet = sheets.sheet("fx.ink_bomb");
                commands.spawn((
                    sheet.sprite(0, Vec2::splat(36.0)),
                    SpriteAnimator::new(3, 12.0, true).with_sheet(0, sheet.columns),
                    Transform::from_xyz(world.x, world.y, 1.0),
                    LinearVelocity(Vec2::new(dir * 260.0, 420.0)),
                    RigidBody::Kinematic,
                    Collider::circle(14.0),
                    Sensor,
                    CollisionEventsEnabled,
                    boss_effect_layers(),
                    ContactDamage {
                        amount: 10.0,
                        knockback: 220.0,
                    },
                    GroundDespawn {
                        burst: Some(SpawnKind::InkSplat),
                    },
                    GravityPull,
                ));
            }
            SpawnKind::PoisonDrop => {
                let sheet = sheets.sheet("fx.poison_drop");
                let x_jitter = rng.0.random_range(-90.0..=90.0);
                let drop = stage.to_world(Vec2::new(spawn.target.x + x_jitter, stage.height + 30.0));
                commands.spawn((
                    sheet.sprite(0, Vec2::new(18.0, 26.0)),
                    SpriteAnimator::new(3, 10.0, true).with_sheet(0, sheet.columns),
                    Transform::from_xyz(drop.x, drop.y, 1.0),
                    LinearVelocity(Vec2::new(0.0, -260.0)),
                    RigidBody::Kinematic,
                    Collider::rectangle(12.0, 20.0),
                    Sensor,
                    CollisionEventsEnabled,
                    boss_effect_layers(),
                    ContactDamage {
                        amount: 6.0,
                        knockback: 120.0,
                    },
                    GroundDespawn {
                        burst: Some(SpawnKind::PoisonSplat),
                    },
                ));
            }
            SpawnKind::PurpleSlash | SpawnKind::IceSlash => {
                let key = if spawn.kind == SpawnKind::PurpleSlash {
                    "fx.purple_slash"
                } else {
                    "fx.ice_slash"
                };
                let sheet = sheets.sheet(key);
                let mut sprite = sheet.sprite(0, Vec2::splat(88.0));
                sprite.flip_x = dir < 0.0;
                commands.spawn((
                    sprite,
                    SpriteAnimator::new(5, 22.0, true).with_sheet(0, sheet.columns),
                    Transform::from_xyz(world.x, world.y, 1.0),
                    LinearVelocity(Vec2::new(dir * 600.0, 0.0)),
                    RigidBody::Kinematic,
                    Collider::rectangle(70.0, 60.0),
                    Sensor,
                    CollisionEventsEnabled,
                    boss_effect_layers(),
                    ContactDamage {
                        amount: 12.0,
                        knockback: 280.0,
                    },
                    EffectLifetime::new(700.0),
                    ScaleGrow {
                        per_sec: 0.8,
                        max_scale: 1.6,
                    },
                ));
            }
            SpawnKind::PurpleThunder => {
                let sheet = sheets.sheet("fx.purple_thunder");
                let column = stage.to_world(Vec2::new(spawn.target.x, 96.0));
                commands.spawn((
                    sheet.sprite(0, Vec2::new(72.0, 210.0)),
                    SpriteAnimator::new(7, 26.0, true).with_sheet(0, sheet.columns),
                    Transform::from_xyz(column.x, column.y, 1.0),
                    RigidBody::Kinematic,
                    Collider::rectangle(50.0, 200.0),
                    Sensor,
                    CollisionEventsEnabled,
                    boss_effect_layers(),
                    ContactDamage {
                        amount: 18.0,
                        knockback: 360.0,
                    },
                    EffectLifetime::new(600.0),
                ));
                screenfx.write(ScreenFxCommand::StartShake {
                    ms: 300.0,
                    magnitude: 5.0,
                });
            }
            SpawnKind::IcyStormShard => {
                let sheet = sheets.sheet("fx.ice_shard");
                let x = rng.0.random_range(0.0..stage.width);
                let shard = stage.to_world(Vec2::new(x, stage.height + 40.0));
                commands.spawn((
                    sheet.sprite(0, Vec2::splat(26.0)),
                    SpriteAnimator::new(3, 14.0, true).with_sheet(0, sheet.columns),
                    Transform::from_xyz(shard.x, shard.y, 1.0),
                    LinearVelocity(Vec2::new(rng.0.random_range(-80.0..=80.0), -420.0)),
                    RigidBody::Kinematic,
                    Collider::circle(10.0),
                    Sensor,
                    CollisionEventsEnabled,
                    boss_effect_layers(),
                    ContactDamage {
                        amount: 7.0,
                        knockback: 150.0,
                    },
                    GroundDespawn {
                        burst: Some(SpawnKind::FrostShatter),
                    },
                ));
            }
            SpawnKind::TopIcicle => {
                let sheet = sheets.sheet("fx.icicle_top");
                let column = stage.to_world(Vec2::new(spawn.target.x, stage.height + 50.0));
                commands.spawn((
                    sheet.sprite(0, Vec2::new(36.0, 104.0)),
                    SpriteAnimator::new(3, 12.0, true).with_sheet(0, sheet.columns),
                    Transform::from_xyz(column.x, column.y, 1.0),
                    LinearVelocity(Vec2::new(0.0, -520.0)),
                    RigidBody::Kinematic,
                    Collider::rectangle(26.0, 96.0),
                    Sensor,
                    CollisionEventsEnabled,
                    boss_effect_layers(),
                    ContactDamage {
                        amount: 14.0,
                        knockback: 260.0,
                    },
                    GroundDespawn {
                        burst: Some(SpawnKind::FrostShatter),
                    },
                ));
            }
            SpawnKind::UndergroundIcicle => {
                let sheet = sheets.sheet("fx.icicle_under");
                let spike = stage.to_world(Vec2::new(spawn.target.x, 48.0));
                commands.spawn((
                    sheet.sprite(0, Vec2::new(36.0, 104.0)),
                    SpriteAnimator::new(5, 16.0, false).with_sheet(0, sheet.columns),
                    DespawnOnExhaust,
                    Transform::from_xyz(spike.x, spike.y, 1.0),
                    RigidBody::Kinematic,
                    Collider::rectangle(26.0, 96.0),
                    Sensor,
                    CollisionEventsEnabled,
                    boss_effect_layers(),
                    ContactDamage {
                        amount: 14.0,
                        knockback: 300.0,
                    },
                ));
            }
            SpawnKind::SpinningIceBall => {
                let sheet = sheets.sheet("fx.ice_ball");
                let ball = commands
                    .spawn((
                        sheet.sprite(0, Vec2::splat(36.0)),
                        SpriteAnimator::new(5, 18.0, true).with_sheet(0, sheet.columns),
                        Transform::from_xyz(world.x, world.y, 1.0),
                        RigidBody::Kinematic,
                        Collider::circle(15.0),
                        Sensor,
                        CollisionEventsEnabled,
                        boss_effect_layers(),
                        ContactDamage {
                            amount: 10.0,
                            knockback: 220.0,
                        },
                        EffectLifetime::new(5000.0),
                        Spin { rad_per_sec: 10.0 },
                    ))
                    .id();
                if let Ok(player_entity) = player.single() {
                    commands.entity(ball).insert(FollowTarget {
                        target: player_entity,
                        speed: FOLLOW_SPEED,
                    });
                }
            }
            SpawnKind::Explosion { source_id } => {
                let sheet = sheets.sheet("fx.explosion");
                commands.spawn((
                    sheet.sprite(0, Vec2::splat(110.0)),
                    SpriteAnimator::new(7, 20.0, false).with_sheet(0, sheet.columns),
                    DespawnOnExhaust,
                    ExplosionBurst { source_id },
                    Transform::from_xyz(world.x, world.y, 1.0),
                    RigidBody::Kinematic,
                    Collider::circle(48.0),
                    Sensor,
                    CollisionEventsEnabled,
                    CollisionLayers::new(GameLayer::BossEffect, LayerMask::ALL),
                    ContactDamage {
                        amount: 20.0,
                        knockback: 380.0,
                    },
                ));
            }
            SpawnKind::PoisonSplat | SpawnKind::InkSplat | SpawnKind::FrostShatter => {
                let key = match spawn.kind {
                    SpawnKind::PoisonSplat => "fx.poison_splat",
                    SpawnKind::InkSplat => "fx.ink_splat",
                    _ => "fx.frost_shatter",
                };
                let sheet = sheets.sheet(key);
                commands.spawn((
                    sheet.sprite(0, Vec2::splat(52.0)),
                    SpriteAnimator::new(5, 18.0, false).with_sheet(0, sheet.columns),
                    DespawnOnExhaust,
                    Transform::from_xyz(world.x, world.y, 1.0),
                ));
            }
        }
    }
}

/// Marker for kinematic effects that fall under manual gravity (avian gravity
/// only applies to dynamic bodies).
#[derive(Component, Debug)]
pub struct GravityPull;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outbox_drains_in_push_order_and_empties() {
        let mut outbox = SpawnOutbox::default();
        for kind in [SpawnKind::Fireball, SpawnKind::Meteor, SpawnKind::InkBomb] {
            outbox.push(EffectSpawn {
                kind,
                origin: Vec2::ZERO,
                facing: Facing::Right,
                target: Vec2::ZERO,
                owner: None,
            });
        }
        assert_eq!(outbox.len(), 3);
        let drained: Vec<_> = outbox.take().into_iter().map(|s| s.kind).collect();
        assert_eq!(drained, vec![SpawnKind::Fireball, SpawnKind::Meteor, SpawnKind::InkBomb]);
        assert!(outbox.is_empty());
    }
}
