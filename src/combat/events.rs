//! Combat domain: combat-related events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

#[derive(Debug)]
pub struct DamageEvent {
    pub source: Entity,
    pub target: Entity,
    pub amount: f32,
    pub knockback: Vec2,
}

impl Message for DamageEvent {}

/// Written exactly once per boss when its hit points reach zero; the boss
/// manager's defeat sequence hangs off this.
#[derive(Debug)]
pub struct BossDefeatedEvent {
    pub boss: Entity,
}

impl Message for BossDefeatedEvent {}

/// Written when a fleeing boss leaves the stage bounds.
#[derive(Debug)]
pub struct BossFledEvent {
    pub boss: Entity,
}

impl Message for BossFledEvent {}
