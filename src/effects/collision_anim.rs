//! Effects domain: explosion bursts and minion chain reactions.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use std::collections::HashSet;

use crate::combat::{Minion, MinionKind};
use crate::core::StageBounds;
use crate::effects::components::MarkedForDeletion;
use crate::effects::outbox::{EffectSpawn, SpawnKind, SpawnOutbox};
use crate::movement::Facing;
use crate::services::{AudioCommand, SoundId};

/// An active explosion and the minion id that produced it. Carrying the source
/// id is what keeps a burst from re-detonating its own corpse.
#[derive(Component, Debug)]
pub struct ExplosionBurst {
    pub source_id: u32,
}

/// A skulnap caught in someone else's blast detonates in turn; every other
/// minion just dies quietly.
pub fn chains_explosion(burst_source_id: u32, minion: &Minion) -> bool {
    minion.kind == MinionKind::Skulnap && minion.id != burst_source_id
}

/// Pairs explosion bursts with minions they overlap. The minion is always
/// flag-deleted; skulnaps additionally queue a fresh burst (with a cue) so
/// clustered spawns go off like a fuse line.
pub(crate) fn handle_explosion_contacts(
    mut collisions: MessageReader<CollisionStart>,
    mut outbox: ResMut<SpawnOutbox>,
    mut audio: MessageWriter<AudioCommand>,
    stage: Res<StageBounds>,
    bursts: Query<&ExplosionBurst>,
    minions: Query<(&Minion, &Transform), Without<MarkedForDeletion>>,
    mut commands: Commands,
) {
    // The deletion flag lands via Commands, so the query filter cannot see it
    // until next tick; dedupe within the batch by hand.
    let mut handled: HashSet<Entity> = HashSet::new();

    for event in collisions.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (burst_entity, minion_entity) in pairs {
            let Ok(burst) = bursts.get(burst_entity) else {
                continue;
            };
            let Ok((minion, transform)) = minions.get(minion_entity) else {
                continue;
            };
            if !handled.insert(minion_entity) {
                continue;
            }

            commands.entity(minion_entity).insert(MarkedForDeletion);

            if chains_explosion(burst.source_id, minion) {
                let origin = stage.to_stage(transform.translation.truncate());
                outbox.push(EffectSpawn {
                    kind: SpawnKind::Explosion {
                        source_id: minion.id,
                    },
                    origin,
                    facing: Facing::Right,
                    target: origin,
                    owner: None,
                });
                audio.write(AudioCommand::Play {
                    id: SoundId("explosion"),
                    looped: false,
                    restart: true,
                });
                debug!("skulnap {} chained off burst {}", minion.id, burst.source_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::message::Messages;

    fn minion(kind: MinionKind, id: u32) -> Minion {
        Minion { kind, id }
    }

    #[test]
    fn skulnap_chains_off_foreign_burst() {
        assert!(chains_explosion(7, &minion(MinionKind::Skulnap, 3)));
    }

    #[test]
    fn skulnap_never_chains_off_its_own_burst() {
        assert!(!chains_explosion(3, &minion(MinionKind::Skulnap, 3)));
    }

    #[test]
    fn other_minions_die_silently() {
        assert!(!chains_explosion(7, &minion(MinionKind::Drifter, 3)));
    }

    fn burst_app() -> App {
        let mut app = App::new();
        app.insert_resource(StageBounds::default());
        app.init_resource::<SpawnOutbox>();
        app.add_message::<CollisionStart>();
        app.add_message::<AudioCommand>();
        app.add_systems(Update, handle_explosion_contacts);
        app
    }

    fn overlap(a: Entity, b: Entity) -> CollisionStart {
        CollisionStart {
            collider1: a,
            collider2: b,
            body1: None,
            body2: None,
        }
    }

    #[test]
    fn caught_minions_are_flag_deleted_whether_or_not_they_chain() {
        let mut app = burst_app();
        let burst = app.world_mut().spawn(ExplosionBurst { source_id: 7 }).id();
        let skulnap = app
            .world_mut()
            .spawn((minion(MinionKind::Skulnap, 3), Transform::default()))
            .id();
        let drifter = app
            .world_mut()
            .spawn((minion(MinionKind::Drifter, 4), Transform::default()))
            .id();
        // Either collider order must resolve.
        app.world_mut()
            .resource_mut::<Messages<CollisionStart>>()
            .write(overlap(burst, skulnap));
        app.world_mut()
            .resource_mut::<Messages<CollisionStart>>()
            .write(overlap(drifter, burst));
        app.update();

        assert!(app.world().get::<MarkedForDeletion>(skulnap).is_some());
        assert!(app.world().get::<MarkedForDeletion>(drifter).is_some());
        let outbox = app.world().resource::<SpawnOutbox>();
        assert_eq!(outbox.len(), 1, "only the skulnap queues a chained burst");
        assert!(matches!(
            outbox.pending()[0].kind,
            SpawnKind::Explosion { source_id: 3 }
        ));
    }

    #[test]
    fn overlapping_bursts_detonate_a_skulnap_once() {
        let mut app = burst_app();
        let first = app.world_mut().spawn(ExplosionBurst { source_id: 1 }).id();
        let second = app.world_mut().spawn(ExplosionBurst { source_id: 2 }).id();
        let skulnap = app
            .world_mut()
            .spawn((minion(MinionKind::Skulnap, 9), Transform::default()))
            .id();
        app.world_mut()
            .resource_mut::<Messages<CollisionStart>>()
            .write(overlap(first, skulnap));
        app.world_mut()
            .resource_mut::<Messages<CollisionStart>>()
            .write(overlap(second, skulnap));
        app.update();

        let outbox = app.world().resource::<SpawnOutbox>();
        assert_eq!(outbox.len(), 1, "one corpse, one chained burst");
    }
}
