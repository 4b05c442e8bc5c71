//! Debug domain: dev hotkeys, behind the `dev-tools` feature.
//!
//! F1/F2 spawn a boss, F3 drops a skulnap cluster, F5 deals test damage to
//! the current boss, F6 toggles game-over, F7 raises the run-away flag.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::anim::SheetLibrary;
use crate::boss::{spawn_elyvorg, spawn_glacikal};
use crate::combat::{DamageEvent, Minion, MinionKind};
use crate::content::GameplayTuning;
use crate::core::{CombatRng, FightDirector, StageBounds};
use crate::movement::GameLayer;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, debug_hotkeys);
    }
}

fn debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut commands: Commands,
    sheets: Res<SheetLibrary>,
    stage: Res<StageBounds>,
    tuning: Res<GameplayTuning>,
    mut rng: ResMut<CombatRng>,
    mut director: ResMut<FightDirector>,
    mut damage: MessageWriter<DamageEvent>,
    mut next_minion_id: Local<u32>,
) {
    if keyboard.just_pressed(KeyCode::F1) && director.current_boss.is_none() {
        spawn_elyvorg(&mut commands, &sheets, &stage, &mut rng, &mut director, &tuning);
    }
    if keyboard.just_pressed(KeyCode::F2) && director.current_boss.is_none() {
        spawn_glacikal(&mut commands, &sheets, &stage, &mut rng, &mut director, &tuning);
    }
    if keyboard.just_pressed(KeyCode::F3) {
        // Cluster close enough for one detonation to chain through.
        for i in 0..3 {
            *next_minion_id += 1;
            let pos = stage.to_world(Vec2::new(stage.width * 0.4 + i as f32 * 60.0, 12.0));
            commands.spawn((
                Minion {
                    kind: MinionKind::Skulnap,
                    id: *next_minion_id,
                },
                Sprite {
                    color: Color::srgb(0.8, 0.6, 0.2),
                    custom_size: Some(Vec2::splat(24.0)),
                    ..default()
                },
                Transform::from_xyz(pos.x, pos.y, 0.6),
                RigidBody::Static,
                Collider::circle(12.0),
                Sensor,
                CollisionEventsEnabled,
                CollisionLayers::new(GameLayer::Default, LayerMask::ALL),
            ));
        }
        info!("spawned skulnap cluster");
    }
    if keyboard.just_pressed(KeyCode::F5) {
        if let Some(boss) = director.current_boss {
            damage.write(DamageEvent {
                source: boss,
                target: boss,
                amount: 15.0,
                knockback: Vec2::ZERO,
            });
        }
    }
    if keyboard.just_pressed(KeyCode::F6) {
        director.game_over = !director.game_over;
        info!("game_over = {}", director.game_over);
    }
    if keyboard.just_pressed(KeyCode::F7) {
        director.run_away = true;
        info!("run_away raised");
    }
}
