//! Boss domain: gravity aura ownership.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::effects::{GRAVITY_LOOP, GravityAuraField};
use crate::services::{AudioCommand, ScreenFxCommand};

/// Tracks the boss's single gravity aura. The reference is non-owning: the
/// world decides when the aura is gone and this component just observes it.
#[derive(Component, Debug)]
pub struct GravitySpinner {
    pub is_active: bool,
    pub cooldown_ms: f32,
    pub cooldown_timer_ms: f32,
    pub aura: Option<Entity>,
}

impl Default for GravitySpinner {
    fn default() -> Self {
        Self {
            is_active: false,
            cooldown_ms: 10_000.0,
            cooldown_timer_ms: 0.0,
            aura: None,
        }
    }
}

impl GravitySpinner {
    pub fn ready(&self) -> bool {
        !self.is_active && self.cooldown_timer_ms <= 0.0
    }

    pub fn note_aura_spawned(&mut self, aura: Entity) {
        self.aura = Some(aura);
        self.is_active = true;
    }
}

/// Clears the active flag once the aura entity has left the world, wherever
/// the deletion came from (lifetime expiry, sweep, despawn).
pub(crate) fn tick_gravity_spinner(
    time: Res<Time>,
    mut audio: MessageWriter<AudioCommand>,
    mut screenfx: MessageWriter<ScreenFxCommand>,
    auras: Query<(), With<GravityAuraField>>,
    mut query: Query<&mut GravitySpinner>,
) {
    let delta_ms = time.delta_secs() * 1000.0;
    for mut spinner in &mut query {
        if spinner.cooldown_timer_ms > 0.0 {
            spinner.cooldown_timer_ms -= delta_ms;
        }

        let Some(aura) = spinner.aura else {
            continue;
        };
        if auras.get(aura).is_err() {
            spinner.aura = None;
            spinner.is_active = false;
            spinner.cooldown_timer_ms = spinner.cooldown_ms;
            screenfx.write(ScreenFxCommand::Release { tag: "gravity" });
            audio.write(AudioCommand::FadeOutStop {
                id: GRAVITY_LOOP,
                ms: 400.0,
            });
            debug!("gravity aura gone, cooldown {}ms", spinner.cooldown_ms);
        }
    }
}
