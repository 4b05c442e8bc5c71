//! Core domain: stage geometry, fight sequencing flags, and the run RNG.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Stage geometry in stage coordinates: x grows rightward from 0 at the left
/// edge, y grows upward from 0 at the ground line. Bosses and spawn logic work
/// in stage coordinates; a sync system maps them to world transforms.
#[derive(Resource, Debug, Clone)]
pub struct StageBounds {
    pub width: f32,
    pub height: f32,
    /// Tolerance around stage center for the "in the middle" check.
    pub middle_tolerance: f32,
}

impl Default for StageBounds {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            middle_tolerance: 24.0,
        }
    }
}

impl StageBounds {
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    /// Map a stage-space point to world coordinates (world origin at stage
    /// center, ground line in the lower third of the window).
    pub fn to_world(&self, pos: Vec2) -> Vec2 {
        Vec2::new(pos.x - self.width / 2.0, pos.y - self.height * 0.35)
    }

    /// Inverse of [`Self::to_world`].
    pub fn to_stage(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x + self.width / 2.0, world.y + self.height * 0.35)
    }

    /// World-space y of the ground line.
    pub fn ground_world_y(&self) -> f32 {
        self.to_world(Vec2::ZERO).y
    }
}

/// External sequencing flags the boss reacts to, plus the current-boss handle.
/// The boss clears `current_boss` itself when it leaves the stage.
#[derive(Resource, Debug, Default)]
pub struct FightDirector {
    pub current_boss: Option<Entity>,
    /// Set when the fight has ended; the boss de-escalates to run/idle.
    pub game_over: bool,
    /// One-way exit ramp: the boss flees toward the nearest edge.
    pub run_away: bool,
}

#[derive(Resource, Debug)]
pub struct RunConfig {
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: rand::random(),
        }
    }
}

/// Seeded RNG for all boss decision logic, reproducible per run.
#[derive(Resource, Debug)]
pub struct CombatRng(pub ChaCha8Rng);

impl CombatRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}
