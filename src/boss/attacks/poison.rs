//! Boss domain: poison rain passive.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use rand::Rng;

use crate::boss::components::BossCore;
use crate::core::{CombatRng, StageBounds};
use crate::effects::{EffectSpawn, SpawnKind, SpawnOutbox};
use crate::movement::Player;
use crate::services::ScreenFxCommand;

const PASSIVE_SLICE_MS: f32 = 1000.0;

#[derive(Component, Debug)]
pub struct PoisonSkill {
    pub is_active: bool,
    pub cooldown_ms: f32,
    pub cooldown_timer_ms: f32,
    /// Accumulated rain time; drained in whole 1 s slices.
    pub passive_timer_ms: f32,
    pub duration_ms: f32,
    pub active_remaining_ms: f32,
}

impl Default for PoisonSkill {
    fn default() -> Self {
        Self {
            is_active: false,
            cooldown_ms: 12_000.0,
            cooldown_timer_ms: 0.0,
            passive_timer_ms: 0.0,
            duration_ms: 8_000.0,
            active_remaining_ms: 0.0,
        }
    }
}

impl PoisonSkill {
    pub fn ready(&self) -> bool {
        !self.is_active && self.cooldown_timer_ms <= 0.0
    }

    pub fn begin(&mut self) {
        self.is_active = true;
        self.active_remaining_ms = self.duration_ms;
        self.passive_timer_ms = 0.0;
    }

    fn end(&mut self) {
        self.is_active = false;
        self.cooldown_timer_ms = self.cooldown_ms;
        self.passive_timer_ms = 0.0;
    }

    /// Accumulates rain time and returns the number of whole 1 s slices that
    /// elapsed. Each slice subtracts exactly 1000 ms; the remainder carries.
    pub fn tick_passive(&mut self, delta_ms: f32) -> u32 {
        if !self.is_active {
            return 0;
        }
        self.passive_timer_ms += delta_ms;
        let mut slices = 0;
        while self.passive_timer_ms >= PASSIVE_SLICE_MS {
            self.passive_timer_ms -= PASSIVE_SLICE_MS;
            slices += 1;
        }
        slices
    }
}

/// While the rain is active, every elapsed second drops 1-3 poison drops
/// above the player. Expiry starts the cooldown and releases the tint.
pub(crate) fn tick_poison(
    time: Res<Time>,
    mut rng: ResMut<CombatRng>,
    mut outbox: ResMut<SpawnOutbox>,
    mut screenfx: MessageWriter<ScreenFxCommand>,
    stage: Res<StageBounds>,
    player: Query<&Transform, With<Player>>,
    mut query: Query<(&BossCore, &mut PoisonSkill)>,
) {
    let delta_ms = time.delta_secs() * 1000.0;
    let player_pos = player
        .single()
        .map(|t| stage.to_stage(t.translation.truncate()))
        .unwrap_or_else(|_| Vec2::new(stage.center_x(), 0.0));

    for (core, mut skill) in &mut query {
        if skill.cooldown_timer_ms > 0.0 {
            skill.cooldown_timer_ms -= delta_ms;
        }
        if !skill.is_active {
            continue;
        }

        skill.active_remaining_ms -= delta_ms;
        if skill.active_remaining_ms <= 0.0 || core.is_defeated() {
            skill.end();
            screenfx.write(ScreenFxCommand::Release { tag: "poison" });
            debug!("poison rain over, cooldown {}ms", skill.cooldown_ms);
            continue;
        }

        for _ in 0..skill.tick_passive(delta_ms) {
            let drops = rng.0.random_range(1..=3);
            for _ in 0..drops {
                outbox.push(EffectSpawn {
                    kind: SpawnKind::PoisonDrop,
                    origin: core.center(),
                    facing: core.facing,
                    target: player_pos,
                    owner: None,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passive_drains_whole_slices_and_keeps_the_remainder() {
        let mut skill = PoisonSkill::default();
        skill.begin();
        assert_eq!(skill.tick_passive(2500.0), 2);
        assert!((skill.passive_timer_ms - 500.0).abs() < 1e-4);
        assert_eq!(skill.tick_passive(499.0), 0);
        assert_eq!(skill.tick_passive(1.0), 1);
        assert!(skill.passive_timer_ms.abs() < 1e-4);
    }

    #[test]
    fn inactive_skill_accumulates_nothing() {
        let mut skill = PoisonSkill::default();
        assert_eq!(skill.tick_passive(5000.0), 0);
        assert_eq!(skill.passive_timer_ms, 0.0);
    }

    #[test]
    fn begin_clears_stale_accumulation() {
        let mut skill = PoisonSkill::default();
        skill.begin();
        skill.tick_passive(700.0);
        skill.end();
        skill.begin();
        assert_eq!(skill.passive_timer_ms, 0.0);
    }
}
