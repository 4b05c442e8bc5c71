//! Combat domain: health, teams, and minion identity.

use bevy::prelude::*;

/// Health component for damageable entities.
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn percent(&self) -> f32 {
        self.current / self.max
    }
}

/// Invulnerability frames after taking a hit.
#[derive(Component, Debug, Default)]
pub struct Invulnerable {
    pub timer: f32,
}

impl Invulnerable {
    pub fn is_invulnerable(&self) -> bool {
        self.timer > 0.0
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    Player,
    Boss,
}

/// Lesser enemies that share the stage with the boss. The combat core only
/// needs enough identity for explosion chaining.
#[derive(Component, Debug, Clone)]
pub struct Minion {
    pub kind: MinionKind,
    pub id: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinionKind {
    /// Dormant bomb enemy; detonates in a chain when caught in an explosion.
    Skulnap,
    Drifter,
}

/// Contact damage carried by boss-spawned projectiles and bursts.
#[derive(Component, Debug, Clone)]
pub struct ContactDamage {
    pub amount: f32,
    pub knockback: f32,
}
