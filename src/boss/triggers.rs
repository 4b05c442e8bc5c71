//! Boss domain: the generic frame-choreography driver.
//!
//! One system interprets every boss's trigger tables. Actions fire on exact
//! frame matches through per-trigger gates, so a frame that persists across
//! several ticks still fires each action once per animation pass.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::anim::SpriteAnimator;
use crate::boss::attacks::{ElectricWheel, GravitySpinner, PoisonSkill, SlashTally};
use crate::boss::components::{BossCore, BossMode, BossRepertoire};
use crate::boss::modes::{ModeId, ModeMotion, ModeSet, TriggerAction};
use crate::boss::randomiser::{PickContext, pick_next_mode};
use crate::core::{CombatRng, FightDirector, StageBounds};
use crate::effects::{EffectSpawn, SpawnKind, SpawnOutbox};
use crate::movement::Player;
use crate::services::{AudioCommand, ScreenFxCommand};

/// Attack-state flags the randomiser's exclusion rules test against.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct AttackFlags {
    pub gravity: bool,
    pub poison: bool,
    pub electric: bool,
}

impl AttackFlags {
    pub(crate) fn gather(
        spinner: Option<&GravitySpinner>,
        poison: Option<&PoisonSkill>,
        wheel: Option<&ElectricWheel>,
    ) -> Self {
        Self {
            gravity: spinner.is_some_and(|s| s.is_active),
            poison: poison.is_some_and(|p| p.is_active),
            electric: wheel.is_some_and(|w| w.is_active),
        }
    }
}

/// Switches the boss into `next`: rebinds the animator to the mode's sheet
/// row and re-arms every gate. The jump impulse is seeded here so the motion
/// system stays stateless.
pub(crate) fn enter_mode(
    core: &BossCore,
    mode: &mut BossMode,
    animator: &mut SpriteAnimator,
    set: &ModeSet,
    next: ModeId,
) {
    let spec = set.spec(next);
    animator.rebind(spec.anim.row, spec.anim.max_frame, spec.anim.fps, spec.anim.looping);
    mode.enter(next, spec.triggers.len(), spec.selectable);
    if matches!(spec.motion, ModeMotion::Jump | ModeMotion::Ascend(_)) {
        mode.vertical_velocity = core.jump_velocity;
    }
    debug!("{}: mode -> {}", core.name, next);
}

pub(crate) fn roll_next(
    set: &ModeSet,
    core: &BossCore,
    mode: &mut BossMode,
    flags: AttackFlags,
    director: &FightDirector,
    rng: &mut CombatRng,
) -> ModeId {
    // Rolls happen from recharge or idle; the exclusion has to reach back to
    // the attack before them, not the interstitial mode itself.
    let ctx = PickContext {
        game_over: director.game_over,
        centered: core.is_in_the_middle,
        previous: mode.last_attack,
        gravity_aura_active: flags.gravity,
        poison_active: flags.poison,
        electric_wheel_active: flags.electric,
        repeat_chance: mode.repeat_chance,
    };
    pick_next_mode(set, &mut mode.counters, &ctx, &mut rng.0)
}

/// Every wrapped slash tally earns a heavier follow-up shot.
pub(crate) fn slash_follow_up(kind: SpawnKind) -> Option<SpawnKind> {
    match kind {
        SpawnKind::PurpleSlash => Some(SpawnKind::PurpleThunder),
        SpawnKind::IceSlash => Some(SpawnKind::TopIcicle),
        _ => None,
    }
}

pub(crate) fn drive_mode_triggers(
    time: Res<Time>,
    mut rng: ResMut<CombatRng>,
    mut outbox: ResMut<SpawnOutbox>,
    director: Res<FightDirector>,
    stage: Res<StageBounds>,
    mut audio: MessageWriter<AudioCommand>,
    mut screenfx: MessageWriter<ScreenFxCommand>,
    player: Query<&Transform, With<Player>>,
    mut bosses: Query<(
        Entity,
        &mut BossCore,
        &mut BossMode,
        &BossRepertoire,
        &mut SpriteAnimator,
        Option<&mut PoisonSkill>,
        Option<&mut SlashTally>,
        Option<&GravitySpinner>,
        Option<&ElectricWheel>,
    )>,
) {
    let delta_ms = time.delta_secs() * 1000.0;
    let player_pos = player
        .single()
        .map(|t| stage.to_stage(t.translation.truncate()))
        .unwrap_or_else(|_| Vec2::new(stage.center_x(), 0.0));

    for (entity, core, mut mode, repertoire, mut animator, mut poison, mut tally, spinner, wheel) in
        &mut bosses
    {
        if core.is_defeated() || core.running_away {
            continue;
        }

        let set = repertoire.0;
        mode.elapsed_ms += delta_ms;

        // Dwell expiry first: idle and hover modes leave on a timer.
        let spec = set.spec(mode.current);
        if let Some(duration) = spec.duration_ms {
            if mode.elapsed_ms > duration {
                let flags =
                    AttackFlags::gather(spinner, poison.as_deref(), wheel);
                let next = match spec.after {
                    Some(after) => after,
                    None => roll_next(set, &core, &mut mode, flags, &director, &mut rng),
                };
                enter_mode(&core, &mut mode, &mut animator, set, next);
                continue;
            }
        }

        for index in 0..spec.triggers.len() {
            let trigger = spec.triggers[index];
            let on_frame = animator.frame == trigger.frame;

            match trigger.action {
                TriggerAction::Cue(sound) => {
                    if mode.gates[index].fire(on_frame) {
                        audio.write(AudioCommand::Play {
                            id: sound,
                            looped: false,
                            restart: true,
                        });
                    }
                }
                TriggerAction::Spawn(kind) => {
                    if mode.gates[index].fire(on_frame) {
                        // One aura at a time; a spent spinner swallows the spawn.
                        if kind == SpawnKind::GravityAura
                            && spinner.is_some_and(|s| !s.ready())
                        {
                            continue;
                        }
                        let muzzle =
                            core.center() + Vec2::new(core.facing.sign() * core.size.x * 0.4, 0.0);
                        outbox.push(EffectSpawn {
                            kind,
                            origin: muzzle,
                            facing: core.facing,
                            target: player_pos,
                            owner: Some(entity),
                        });
                        if let Some(follow) = slash_follow_up(kind) {
                            if let Some(tally) = tally.as_deref_mut() {
                                if tally.record() {
                                    outbox.push(EffectSpawn {
                                        kind: follow,
                                        origin: muzzle,
                                        facing: core.facing,
                                        target: player_pos,
                                        owner: Some(entity),
                                    });
                                }
                            }
                        }
                    }
                }
                TriggerAction::BeginPoison => {
                    if mode.gates[index].fire(on_frame) {
                        if let Some(poison) = poison.as_deref_mut() {
                            if poison.ready() {
                                poison.begin();
                                screenfx.write(ScreenFxCommand::Request {
                                    tag: "poison",
                                    rgb: [0.1, 0.45, 0.12],
                                    fade_in_speed: 0.4,
                                });
                            }
                        }
                    }
                }
                TriggerAction::Rearm(indices) => {
                    // Ungated so looping choreography re-arms on every pass.
                    if on_frame {
                        for &target in indices {
                            mode.gates[target].rearm(true);
                        }
                    }
                }
                TriggerAction::Transition(next) => {
                    if mode.gates[index].fire(on_frame) {
                        enter_mode(&core, &mut mode, &mut animator, set, next);
                        break;
                    }
                }
                TriggerAction::PickNext => {
                    if mode.gates[index].fire(on_frame) {
                        let flags =
                            AttackFlags::gather(spinner, poison.as_deref(), wheel);
                        let next = roll_next(set, &core, &mut mode, flags, &director, &mut rng);
                        enter_mode(&core, &mut mode, &mut animator, set, next);
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boss::elyvorg;

    #[test]
    fn only_slashes_earn_a_follow_up() {
        assert_eq!(slash_follow_up(SpawnKind::PurpleSlash), Some(SpawnKind::PurpleThunder));
        assert_eq!(slash_follow_up(SpawnKind::IceSlash), Some(SpawnKind::TopIcicle));
        assert_eq!(slash_follow_up(SpawnKind::Fireball), None);
        assert_eq!(slash_follow_up(SpawnKind::PistolArrow), None);
    }

    #[test]
    fn roll_after_recharge_excludes_the_attack_before_it() {
        let set = &elyvorg::ELYVORG;
        let core = BossCore::new("test", Vec2::new(600.0, 0.0), Vec2::splat(96.0), 100.0);
        let idle = set.spec(set.idle);
        let mut animator =
            SpriteAnimator::new(idle.anim.max_frame, idle.anim.fps, idle.anim.looping);
        let mut mode = BossMode::new(set.idle, Vec::new(), idle.triggers.len());
        mode.repeat_chance = 0.0;
        let mut rng = CombatRng::from_seed(21);
        let director = FightDirector::default();

        enter_mode(&core, &mut mode, &mut animator, set, elyvorg::LASER);
        enter_mode(&core, &mut mode, &mut animator, set, set.recharge);
        for _ in 0..2_000 {
            let pick =
                roll_next(set, &core, &mut mode, AttackFlags::default(), &director, &mut rng);
            assert_ne!(pick, elyvorg::LASER, "the attack before recharge must not re-sample");
        }
    }

    #[test]
    fn repeat_branch_still_reaches_through_the_recharge() {
        let set = &elyvorg::ELYVORG;
        let core = BossCore::new("test", Vec2::new(600.0, 0.0), Vec2::splat(96.0), 100.0);
        let idle = set.spec(set.idle);
        let mut animator =
            SpriteAnimator::new(idle.anim.max_frame, idle.anim.fps, idle.anim.looping);
        let mut mode = BossMode::new(set.idle, Vec::new(), idle.triggers.len());
        mode.repeat_chance = 1.0;
        let mut rng = CombatRng::from_seed(8);
        let director = FightDirector::default();

        enter_mode(&core, &mut mode, &mut animator, set, elyvorg::LASER);
        enter_mode(&core, &mut mode, &mut animator, set, set.recharge);
        let pick = roll_next(set, &core, &mut mode, AttackFlags::default(), &director, &mut rng);
        assert_eq!(pick, elyvorg::LASER);
    }
}
