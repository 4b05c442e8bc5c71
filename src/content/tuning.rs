//! Content domain: global tuning knobs.

use bevy::prelude::*;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub elyvorg_hp: f32,
    pub glacikal_hp: f32,
    pub run_speed: f32,
    pub jump_velocity: f32,
    /// Chance the randomiser repeats the previous mode.
    pub repeat_chance: f64,
    pub barrier_lives: i32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            elyvorg_hp: 120.0,
            glacikal_hp: 140.0,
            run_speed: 240.0,
            jump_velocity: 560.0,
            repeat_chance: 0.1,
            barrier_lives: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PoisonTuning {
    pub cooldown_ms: f32,
    pub duration_ms: f32,
}

impl Default for PoisonTuning {
    fn default() -> Self {
        Self {
            cooldown_ms: 12_000.0,
            duration_ms: 8_000.0,
        }
    }
}

#[derive(Resource, Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameplayTuning {
    pub boss: BossTuning,
    pub poison: PoisonTuning,
}
