//! Boss domain: damage routing and the defeat latch.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::boss::barrier::Barrier;
use crate::boss::components::BossCore;
use crate::combat::{BossDefeatedEvent, DamageEvent};
use crate::services::{AudioCommand, AudioDirector, ScreenFxCommand, ScreenOverlays};

/// Routes damage aimed at a boss: a standing barrier eats the hit whole,
/// otherwise hp drops (clamped at zero).
pub(crate) fn route_boss_damage(
    mut damage: MessageReader<DamageEvent>,
    mut bosses: Query<&mut BossCore>,
    mut barriers: Query<&mut Barrier>,
) {
    for event in damage.read() {
        let Ok(mut core) = bosses.get_mut(event.target) else {
            continue;
        };

        let shielded = barriers
            .iter_mut()
            .find(|b| b.owner == event.target && b.is_up());
        match shielded {
            Some(mut barrier) => {
                barrier.absorb_hit();
                debug!("{}: barrier absorbed a hit, {} lives left", core.name, barrier.lives);
            }
            None => {
                core.take_damage(event.amount);
                debug!("{}: hp {}/{}", core.name, core.hp, core.max_hp);
            }
        }
    }
}

/// First zero-hp observation cuts every looped attack sound, releases all
/// held screen effects, and announces the defeat exactly once.
pub(crate) fn handle_defeat(
    audio_director: Res<AudioDirector>,
    mut overlays: ResMut<ScreenOverlays>,
    mut audio: MessageWriter<AudioCommand>,
    mut screenfx: MessageWriter<ScreenFxCommand>,
    mut defeated: MessageWriter<BossDefeatedEvent>,
    mut bosses: Query<(Entity, &mut BossCore)>,
) {
    for (entity, mut core) in &mut bosses {
        if core.register_defeat() {
            for id in audio_director.looped_ids() {
                audio.write(AudioCommand::Stop(id));
            }
            overlays.release_all();
            screenfx.write(ScreenFxCommand::StopShake);
            defeated.write(BossDefeatedEvent { boss: entity });
            info!("{} defeated", core.name);
        }
    }
}
