//! Movement domain: the player collaborator, physics layers, and the stage
//! floor. Player movement is deliberately minimal; the boss core only needs a
//! target with a position and a velocity it can perturb.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::core::StageBounds;

#[derive(Component, Debug)]
pub struct Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn toward(dx: f32) -> Self {
        if dx < 0.0 { Facing::Left } else { Facing::Right }
    }
}

#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    Ground,
    Player,
    Boss,
    /// Boss-spawned projectiles and bursts.
    BossEffect,
    PlayerHitbox,
}

#[derive(Resource, Debug, Clone)]
pub struct PlayerTuning {
    pub move_speed: f32,
    pub jump_velocity: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: 300.0,
            jump_velocity: 620.0,
        }
    }
}

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerTuning>()
            .add_systems(Startup, (spawn_stage_floor, spawn_player))
            .add_systems(Update, move_player);
    }
}

fn spawn_stage_floor(mut commands: Commands, stage: Res<StageBounds>) {
    let ground_y = stage.ground_world_y();
    commands.spawn((
        RigidBody::Static,
        Collider::rectangle(stage.width * 2.0, 40.0),
        CollisionLayers::new(GameLayer::Ground, LayerMask::ALL),
        Sprite {
            color: Color::srgb(0.16, 0.14, 0.2),
            custom_size: Some(Vec2::new(stage.width * 2.0, 40.0)),
            ..default()
        },
        Transform::from_xyz(0.0, ground_y - 20.0, 0.0),
    ));
}

fn spawn_player(mut commands: Commands, stage: Res<StageBounds>) {
    let start = stage.to_world(Vec2::new(stage.width * 0.25, 24.0));
    commands.spawn((
        Player,
        crate::combat::Health::new(100.0),
        crate::combat::Invulnerable::default(),
        crate::combat::Team::Player,
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(Vec2::new(28.0, 48.0)),
            ..default()
        },
        Transform::from_xyz(start.x, start.y, 0.0),
        RigidBody::Dynamic,
        Collider::rectangle(28.0, 48.0),
        CollisionEventsEnabled,
        CollisionLayers::new(
            GameLayer::Player,
            [GameLayer::Ground, GameLayer::Boss, GameLayer::BossEffect],
        ),
        LinearVelocity::default(),
        LockedAxes::ROTATION_LOCKED,
        GravityScale(1.0),
    ));
}

fn move_player(
    keyboard: Res<ButtonInput<KeyCode>>,
    tuning: Res<PlayerTuning>,
    mut query: Query<&mut LinearVelocity, With<Player>>,
) {
    let Ok(mut velocity) = query.single_mut() else {
        return;
    };

    let mut axis = 0.0;
    if keyboard.pressed(KeyCode::ArrowLeft) || keyboard.pressed(KeyCode::KeyA) {
        axis -= 1.0;
    }
    if keyboard.pressed(KeyCode::ArrowRight) || keyboard.pressed(KeyCode::KeyD) {
        axis += 1.0;
    }
    velocity.x = axis * tuning.move_speed;

    if keyboard.just_pressed(KeyCode::Space) && velocity.y.abs() < 1.0 {
        velocity.y = tuning.jump_velocity;
    }
}
