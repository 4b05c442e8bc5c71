//! Effects domain: lifecycle and behavior components for transient entities.
//!
//! Deletion is flag-only everywhere: logic sets [`MarkedForDeletion`] and the
//! sweep system at the end of the tick is the sole owner of despawning.

use bevy::prelude::*;

/// Flag-only deletion marker; swept once per tick.
#[derive(Component, Debug)]
pub struct MarkedForDeletion;

/// Deletes the entity when the timer runs out.
#[derive(Component, Debug)]
pub struct EffectLifetime {
    pub remaining_ms: f32,
}

impl EffectLifetime {
    pub fn new(ms: f32) -> Self {
        Self { remaining_ms: ms }
    }
}

/// Deletes the entity once it is fully outside the stage plus margin.
#[derive(Component, Debug)]
pub struct OffscreenDespawn {
    pub margin: f32,
}

impl Default for OffscreenDespawn {
    fn default() -> Self {
        Self { margin: 160.0 }
    }
}

/// Deletes the entity on ground contact, optionally leaving a burst behind.
#[derive(Component, Debug)]
pub struct GroundDespawn {
    pub burst: Option<super::outbox::SpawnKind>,
}

/// Damped per-tick pursuit: `pos += (target - pos) * speed` each tick.
/// The lag/elastic feel depends on this being per tick, not per second.
#[derive(Component, Debug)]
pub struct FollowTarget {
    pub target: Entity,
    pub speed: f32,
}

/// Radial field around a gravity aura: shoves the player away while inside.
#[derive(Component, Debug)]
pub struct GravityAuraField {
    pub radius: f32,
    pub push: f32,
}

/// Scale-up growth embellishment.
#[derive(Component, Debug)]
pub struct ScaleGrow {
    pub per_sec: f32,
    pub max_scale: f32,
}

/// Alpha fade; the entity is marked deleted when fully transparent.
#[derive(Component, Debug)]
pub struct FadeOut {
    pub per_sec: f32,
}

#[derive(Component, Debug)]
pub struct Spin {
    pub rad_per_sec: f32,
}

/// Mirrors the sprite horizontally to face the direction of travel.
#[derive(Component, Debug)]
pub struct FlipWithVelocity;
