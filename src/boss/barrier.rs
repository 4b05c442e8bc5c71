//! Boss domain: the barrier shield entity.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::boss::components::BossCore;
use crate::core::StageBounds;
use crate::effects::EffectLifetime;
use crate::movement::Facing;
use crate::services::{AudioCommand, ScreenFxCommand, SoundId};

/// Shield owned by a boss. Hits drain lives before the boss takes any hp
/// damage; the crack and break cues each fire once per downward crossing.
#[derive(Component, Debug)]
pub struct Barrier {
    pub owner: Entity,
    pub lives: i32,
    pub offset: Vec2,
    cracked_cue_played: bool,
    broken_cue_played: bool,
}

impl Barrier {
    pub fn new(owner: Entity, lives: i32, offset: Vec2) -> Self {
        Self {
            owner,
            lives,
            offset,
            cracked_cue_played: false,
            broken_cue_played: false,
        }
    }

    pub fn is_up(&self) -> bool {
        self.lives > 0
    }

    pub fn absorb_hit(&mut self) {
        self.lives -= 1;
    }

    pub fn crack_cue_due(&mut self) -> bool {
        if self.lives == 1 && !self.cracked_cue_played {
            self.cracked_cue_played = true;
            true
        } else {
            false
        }
    }

    pub fn break_cue_due(&mut self) -> bool {
        if self.lives <= 0 && !self.broken_cue_played {
            self.broken_cue_played = true;
            true
        } else {
            false
        }
    }
}

/// Sheet column for the barrier's current state: full, cracked, broken.
pub fn barrier_visual_index(lives: i32) -> usize {
    if lives >= 2 {
        0
    } else if lives == 1 {
        1
    } else {
        2
    }
}

pub(crate) fn update_barriers(
    stage: Res<StageBounds>,
    mut audio: MessageWriter<AudioCommand>,
    mut screenfx: MessageWriter<ScreenFxCommand>,
    mut commands: Commands,
    bosses: Query<&BossCore>,
    mut barriers: Query<(Entity, &mut Barrier, &mut Transform, &mut Sprite)>,
) {
    for (entity, mut barrier, mut transform, mut sprite) in &mut barriers {
        let Ok(core) = bosses.get(barrier.owner) else {
            // Orphaned barrier: the owner left the world.
            commands.entity(entity).insert(crate::effects::MarkedForDeletion);
            continue;
        };

        let offset = Vec2::new(barrier.offset.x * core.facing.sign(), barrier.offset.y);
        let world = stage.to_world(core.center() + offset);
        transform.translation.x = world.x;
        transform.translation.y = world.y;
        sprite.flip_x = core.facing == Facing::Left;
        if let Some(atlas) = sprite.texture_atlas.as_mut() {
            atlas.index = barrier_visual_index(barrier.lives);
        }

        if barrier.crack_cue_due() {
            audio.write(AudioCommand::Play {
                id: SoundId("barrier_crack"),
                looped: false,
                restart: true,
            });
        }
        if barrier.break_cue_due() {
            audio.write(AudioCommand::Play {
                id: SoundId("barrier_break"),
                looped: false,
                restart: true,
            });
            screenfx.write(ScreenFxCommand::StartShake {
                ms: 350.0,
                magnitude: 5.0,
            });
            // Broken frame lingers briefly, then the sweep takes it.
            commands.entity(entity).insert(EffectLifetime::new(600.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visual_index_tracks_lives_thresholds() {
        assert_eq!(barrier_visual_index(5), 0);
        assert_eq!(barrier_visual_index(2), 0);
        assert_eq!(barrier_visual_index(1), 1);
        assert_eq!(barrier_visual_index(0), 2);
        assert_eq!(barrier_visual_index(-1), 2);
    }

    #[test]
    fn crack_cue_fires_once_at_one_life() {
        let mut barrier = Barrier::new(Entity::PLACEHOLDER, 2, Vec2::ZERO);
        assert!(!barrier.crack_cue_due());
        barrier.absorb_hit();
        assert!(barrier.crack_cue_due());
        assert!(!barrier.crack_cue_due(), "repeat ticks at one life stay silent");
    }

    #[test]
    fn break_cue_fires_once_at_or_below_zero() {
        let mut barrier = Barrier::new(Entity::PLACEHOLDER, 1, Vec2::ZERO);
        barrier.absorb_hit();
        assert!(barrier.break_cue_due());
        barrier.absorb_hit();
        assert!(!barrier.break_cue_due());
    }

    #[test]
    fn breaking_shakes_the_screen_once() {
        use bevy::ecs::message::Messages;

        let mut app = App::new();
        app.insert_resource(StageBounds::default());
        app.add_message::<AudioCommand>();
        app.add_message::<ScreenFxCommand>();
        app.add_systems(Update, update_barriers);

        let boss = app
            .world_mut()
            .spawn(BossCore::new("test", Vec2::ZERO, Vec2::splat(96.0), 100.0))
            .id();
        let barrier = app
            .world_mut()
            .spawn((Barrier::new(boss, 1, Vec2::ZERO), Transform::default(), Sprite::default()))
            .id();

        app.world_mut()
            .get_mut::<Barrier>(barrier)
            .unwrap()
            .absorb_hit();
        app.update();
        app.update();

        let shakes = app
            .world_mut()
            .resource_mut::<Messages<ScreenFxCommand>>()
            .drain()
            .filter(|cmd| matches!(cmd, ScreenFxCommand::StartShake { .. }))
            .count();
        assert_eq!(shakes, 1, "the break reaction is a one-shot");
    }
}
