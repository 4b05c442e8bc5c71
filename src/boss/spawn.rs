//! Boss domain: boss entity builders.

use avian2d::prelude::*;
use bevy::prelude::*;
use rand::Rng;

use crate::anim::{SheetLibrary, SpriteAnimator};
use crate::boss::attacks::{ElectricWheel, GravitySpinner, PoisonSkill, SlashTally};
use crate::boss::barrier::Barrier;
use crate::boss::components::{BossCore, BossMode, BossRepertoire, ForcedCounter};
use crate::boss::modes::ModeSet;
use crate::boss::{elyvorg, glacikal};
use crate::combat::ContactDamage;
use crate::content::GameplayTuning;
use crate::core::{CombatRng, FightDirector, StageBounds};
use crate::movement::GameLayer;

/// Rolls the initial forced-pick counters, in the repertoire's declaration
/// order.
pub fn forced_counters(set: &ModeSet, rng: &mut impl Rng) -> Vec<ForcedCounter> {
    set.modes
        .iter()
        .filter_map(|spec| {
            spec.forced.map(|forced| ForcedCounter {
                mode: spec.id,
                count: 0,
                limit: rng.random_range(forced.min_limit..=forced.max_limit),
            })
        })
        .collect()
}

fn spawn_boss_body(
    commands: &mut Commands,
    sheets: &SheetLibrary,
    stage: &StageBounds,
    rng: &mut CombatRng,
    tuning: &GameplayTuning,
    set: &'static ModeSet,
    sheet_key: &'static str,
    name: &'static str,
    size: Vec2,
    max_hp: f32,
) -> Entity {
    let pos = Vec2::new(stage.width * 0.7, 0.0);
    let mut core = BossCore::new(name, pos, size, max_hp);
    core.run_speed = tuning.boss.run_speed;
    core.jump_velocity = tuning.boss.jump_velocity;
    let world = stage.to_world(core.center());

    let idle = set.spec(set.idle);
    let animator = SpriteAnimator::new(idle.anim.max_frame, idle.anim.fps, idle.anim.looping)
        .with_sheet(idle.anim.row, sheets.sheet(sheet_key).columns);

    let counters = forced_counters(set, &mut rng.0);
    let mut mode = BossMode::new(set.idle, counters, idle.triggers.len());
    mode.repeat_chance = tuning.boss.repeat_chance;

    commands
        .spawn((
            core,
            mode,
            BossRepertoire(set),
            sheets.sheet(sheet_key).sprite(0, size),
            animator,
            Transform::from_xyz(world.x, world.y, 0.8),
            RigidBody::Kinematic,
            Collider::rectangle(size.x * 0.7, size.y * 0.9),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::Boss, [GameLayer::Player]),
            ContactDamage {
                amount: 10.0,
                knockback: 260.0,
            },
        ))
        .id()
}

pub fn spawn_elyvorg(
    commands: &mut Commands,
    sheets: &SheetLibrary,
    stage: &StageBounds,
    rng: &mut CombatRng,
    director: &mut FightDirector,
    tuning: &GameplayTuning,
) -> Entity {
    let size = Vec2::splat(96.0);
    let boss = spawn_boss_body(
        commands,
        sheets,
        stage,
        rng,
        tuning,
        &elyvorg::ELYVORG,
        "elyvorg",
        "Elyvorg",
        size,
        tuning.boss.elyvorg_hp,
    );
    commands.entity(boss).insert((
        PoisonSkill {
            cooldown_ms: tuning.poison.cooldown_ms,
            duration_ms: tuning.poison.duration_ms,
            ..default()
        },
        GravitySpinner::default(),
        ElectricWheel::default(),
        SlashTally::default(),
    ));

    // Elyvorg opens shielded; the barrier entity tracks its owner.
    let barrier_sheet = sheets.sheet("barrier");
    commands.spawn((
        Barrier::new(boss, tuning.boss.barrier_lives, Vec2::new(36.0, 0.0)),
        barrier_sheet.sprite(0, Vec2::splat(128.0)),
        Transform::from_xyz(0.0, 0.0, 0.9),
    ));

    director.current_boss = Some(boss);
    info!("Elyvorg enters the stage");
    boss
}

pub fn spawn_glacikal(
    commands: &mut Commands,
    sheets: &SheetLibrary,
    stage: &StageBounds,
    rng: &mut CombatRng,
    director: &mut FightDirector,
    tuning: &GameplayTuning,
) -> Entity {
    let boss = spawn_boss_body(
        commands,
        sheets,
        stage,
        rng,
        tuning,
        &glacikal::GLACIKAL,
        "glacikal",
        "Glacikal",
        Vec2::splat(112.0),
        tuning.boss.glacikal_hp,
    );
    director.current_boss = Some(boss);
    info!("Glacikal enters the stage");
    boss
}

/// Default encounter: Elyvorg opens the fight.
pub(crate) fn spawn_initial_boss(
    mut commands: Commands,
    sheets: Res<SheetLibrary>,
    stage: Res<StageBounds>,
    tuning: Res<GameplayTuning>,
    mut rng: ResMut<CombatRng>,
    mut director: ResMut<FightDirector>,
) {
    if director.current_boss.is_none() {
        spawn_elyvorg(&mut commands, &sheets, &stage, &mut rng, &mut director, &tuning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn counters_roll_within_declared_bounds_in_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let counters = forced_counters(&elyvorg::ELYVORG, &mut rng);
        let modes: Vec<_> = counters.iter().map(|c| c.mode).collect();
        assert_eq!(
            modes,
            vec![elyvorg::RUN, elyvorg::PISTOL, elyvorg::ELECTRIC, elyvorg::THUNDER]
        );
        for counter in &counters {
            let forced = elyvorg::ELYVORG.spec(counter.mode).forced.unwrap();
            assert!((forced.min_limit..=forced.max_limit).contains(&counter.limit));
            assert_eq!(counter.count, 0);
        }
    }
}
