//! Boss domain: motion, stage edges, and the run-away exit.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use rand::Rng;

use crate::anim::SpriteAnimator;
use crate::boss::attacks::{ElectricWheel, GravitySpinner, PoisonSkill};
use crate::boss::components::{BossCore, BossMode, BossRepertoire};
use crate::boss::modes::ModeMotion;
use crate::boss::triggers::{AttackFlags, enter_mode, roll_next};
use crate::combat::BossFledEvent;
use crate::core::{CombatRng, FightDirector, StageBounds};
use crate::effects::MarkedForDeletion;
use crate::movement::{Facing, Player};

const BOSS_GRAVITY: f32 = 1500.0;
const OFFSTAGE_MARGIN: f32 = 120.0;

/// Clamps a boss x into `[1, stage_width - boss_width - 1]` and reports which
/// edge, if any, forced the clamp.
pub fn clamp_stage_x(x: f32, boss_width: f32, stage_width: f32) -> (f32, bool, bool) {
    let min = 1.0;
    let max = stage_width - boss_width - 1.0;
    if x < min {
        (min, true, false)
    } else if x > max {
        (max, false, true)
    } else {
        (x, false, false)
    }
}

pub(crate) fn apply_boss_motion(
    time: Res<Time>,
    mut rng: ResMut<CombatRng>,
    director: Res<FightDirector>,
    stage: Res<StageBounds>,
    player: Query<&Transform, With<Player>>,
    mut bosses: Query<(
        &mut BossCore,
        &mut BossMode,
        &BossRepertoire,
        &mut SpriteAnimator,
        Option<&GravitySpinner>,
        Option<&PoisonSkill>,
        Option<&ElectricWheel>,
    )>,
) {
    let dt = time.delta_secs();
    let player_x = player
        .single()
        .map(|t| stage.to_stage(t.translation.truncate()).x)
        .unwrap_or_else(|_| stage.center_x());

    for (mut core, mut mode, repertoire, mut animator, spinner, poison, wheel) in &mut bosses {
        if core.is_defeated() || core.running_away {
            continue;
        }

        let set = repertoire.0;
        let motion = set.spec(mode.current).motion;

        // Edge flags are per-tick clamp reports, not sticky.
        core.reached_left_edge = false;
        core.reached_right_edge = false;

        if motion != ModeMotion::Run {
            core.facing = Facing::toward(player_x - core.center().x);
        }

        match motion {
            ModeMotion::None => {}
            ModeMotion::Run => {
                // A de-escalation run heads for stage center, not the player.
                if director.game_over {
                    core.facing = Facing::toward(stage.center_x() - core.center().x);
                }
                let next_x = core.pos.x + core.facing.sign() * core.run_speed * dt;
                let (clamped, left, right) = clamp_stage_x(next_x, core.size.x, stage.width);
                core.pos.x = clamped;
                core.reached_left_edge = left;
                core.reached_right_edge = right;
                let centered =
                    (core.center().x - stage.center_x()).abs() <= stage.middle_tolerance;
                if director.game_over && centered {
                    enter_mode(&core, &mut mode, &mut animator, set, set.idle);
                } else if left || right {
                    let flags = AttackFlags::gather(spinner, poison, wheel);
                    enter_mode(&core, &mut mode, &mut animator, set, set.idle);
                    let next = roll_next(set, &core, &mut mode, flags, &director, &mut rng);
                    enter_mode(&core, &mut mode, &mut animator, set, next);
                }
            }
            ModeMotion::Jump | ModeMotion::Descend => {
                mode.vertical_velocity -= BOSS_GRAVITY * dt;
                core.pos.y += mode.vertical_velocity * dt;
                let drift = (player_x - core.center().x).signum() * core.run_speed * 0.6 * dt;
                let (clamped, left, right) =
                    clamp_stage_x(core.pos.x + drift, core.size.x, stage.width);
                core.pos.x = clamped;
                core.reached_left_edge = left;
                core.reached_right_edge = right;
                if core.pos.y <= 0.0 {
                    core.pos.y = 0.0;
                    let flags = AttackFlags::gather(spinner, poison, wheel);
                    let next = roll_next(set, &core, &mut mode, flags, &director, &mut rng);
                    enter_mode(&core, &mut mode, &mut animator, set, next);
                }
            }
            ModeMotion::Ascend(next) => {
                mode.vertical_velocity -= BOSS_GRAVITY * dt;
                core.pos.y += mode.vertical_velocity * dt;
                if mode.vertical_velocity <= 0.0 {
                    enter_mode(&core, &mut mode, &mut animator, set, next);
                }
            }
            ModeMotion::Teleport => {
                if !mode.relocated {
                    mode.relocated = true;
                    let max = stage.width - core.size.x - 1.0;
                    let (clamped, _, _) =
                        clamp_stage_x(rng.0.random_range(1.0..max), core.size.x, stage.width);
                    core.pos.x = clamped;
                    core.facing = Facing::toward(player_x - core.center().x);
                }
            }
            ModeMotion::Ghost => {
                let drift = (player_x - core.center().x).signum() * core.run_speed * 0.8 * dt;
                let (clamped, left, right) =
                    clamp_stage_x(core.pos.x + drift, core.size.x, stage.width);
                core.pos.x = clamped;
                core.reached_left_edge = left;
                core.reached_right_edge = right;
            }
        }

        core.is_in_the_middle =
            (core.center().x - stage.center_x()).abs() <= stage.middle_tolerance;
    }
}

/// One-way exit ramp: once the director raises `run_away` the boss heads for
/// the nearest edge and deletes itself when fully off stage.
pub(crate) fn run_away_exit(
    time: Res<Time>,
    mut director: ResMut<FightDirector>,
    stage: Res<StageBounds>,
    mut fled: MessageWriter<BossFledEvent>,
    mut commands: Commands,
    mut bosses: Query<(Entity, &mut BossCore), Without<MarkedForDeletion>>,
) {
    if !director.run_away {
        return;
    }
    let dt = time.delta_secs();

    for (entity, mut core) in &mut bosses {
        if core.is_defeated() {
            continue;
        }
        if !core.running_away {
            core.running_away = true;
            core.facing = if core.center().x < stage.center_x() {
                Facing::Left
            } else {
                Facing::Right
            };
            info!("{} is fleeing", core.name);
        }

        core.pos.x += core.facing.sign() * core.run_speed * 1.2 * dt;

        let fully_off = core.pos.x + core.size.x < -OFFSTAGE_MARGIN
            || core.pos.x > stage.width + OFFSTAGE_MARGIN;
        if fully_off {
            commands.entity(entity).insert(MarkedForDeletion);
            if director.current_boss == Some(entity) {
                director.current_boss = None;
            }
            fled.write(BossFledEvent { boss: entity });
        }
    }
}

/// Writes stage-space boss state into the render transform and sprite.
pub(crate) fn sync_boss_transform(
    stage: Res<StageBounds>,
    mut bosses: Query<(&BossCore, &mut Transform, &mut Sprite)>,
) {
    for (core, mut transform, mut sprite) in &mut bosses {
        let world = stage.to_world(core.center());
        transform.translation.x = world.x;
        transform.translation.y = world.y;
        sprite.flip_x = core.facing == Facing::Left;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_is_inclusive_of_the_legal_band() {
        let (x, left, right) = clamp_stage_x(1.0, 96.0, 1280.0);
        assert_eq!((x, left, right), (1.0, false, false));
        let (x, left, right) = clamp_stage_x(1183.0, 96.0, 1280.0);
        assert_eq!((x, left, right), (1183.0, false, false));
    }

    #[test]
    fn left_overflow_clamps_and_flags_left_only() {
        let (x, left, right) = clamp_stage_x(-5000.0, 96.0, 1280.0);
        assert_eq!(x, 1.0);
        assert!(left);
        assert!(!right);
    }

    #[test]
    fn right_overflow_clamps_and_flags_right_only() {
        let (x, left, right) = clamp_stage_x(f32::MAX, 96.0, 1280.0);
        assert_eq!(x, 1280.0 - 96.0 - 1.0);
        assert!(!left);
        assert!(right);
    }

    #[test]
    fn interior_positions_pass_through_unflagged() {
        for x in [2.0, 100.0, 640.0, 1100.0] {
            let (clamped, left, right) = clamp_stage_x(x, 96.0, 1280.0);
            assert_eq!(clamped, x);
            assert!(!left && !right);
        }
    }

    #[test]
    fn game_over_run_reaches_center_and_settles_into_idle() {
        use crate::boss::elyvorg;
        use std::time::Duration;

        let mut app = App::new();
        app.insert_resource(Time::<()>::default());
        app.insert_resource(StageBounds::default());
        app.insert_resource(CombatRng::from_seed(5));
        app.insert_resource(FightDirector {
            game_over: true,
            ..Default::default()
        });
        app.add_systems(Update, apply_boss_motion);

        let set = &elyvorg::ELYVORG;
        let run = set.spec(elyvorg::RUN);
        // Pinned near the right edge, facing away from center.
        let mut core = BossCore::new("test", Vec2::new(1100.0, 0.0), Vec2::splat(96.0), 100.0);
        core.facing = Facing::Right;
        let boss = app
            .world_mut()
            .spawn((
                core,
                BossMode::new(elyvorg::RUN, Vec::new(), run.triggers.len()),
                BossRepertoire(set),
                SpriteAnimator::new(run.anim.max_frame, run.anim.fps, run.anim.looping),
            ))
            .id();

        // Ten simulated seconds is far more than the center run needs.
        for _ in 0..600 {
            app.world_mut()
                .resource_mut::<Time>()
                .advance_by(Duration::from_millis(16));
            app.update();
        }

        let core = app.world().get::<BossCore>(boss).unwrap();
        let mode = app.world().get::<BossMode>(boss).unwrap();
        assert!(core.is_in_the_middle, "boss never reached center, x={}", core.pos.x);
        assert_eq!(mode.current, set.idle);
    }
}
