//! Boss domain: Elyvorg's repertoire.
//!
//! Pure data. Frame numbers index rows of the `elyvorg` sheet; the generic
//! driver does the rest.

use crate::boss::modes::{
    ActiveFlag, AnimSpec, Exclusion, ForcedPick, FrameTrigger, ModeId, ModeMotion, ModeSet,
    ModeSpec, TriggerAction,
};
use crate::effects::SpawnKind;
use crate::services::SoundId;

pub const IDLE: ModeId = ModeId("elyvorg.idle");
pub const RECHARGE: ModeId = ModeId("elyvorg.recharge");
pub const RUN: ModeId = ModeId("elyvorg.run");
pub const JUMP: ModeId = ModeId("elyvorg.jump");
pub const LASER: ModeId = ModeId("elyvorg.laser");
pub const METEOR: ModeId = ModeId("elyvorg.meteor");
pub const PISTOL: ModeId = ModeId("elyvorg.pistol");
pub const GHOST: ModeId = ModeId("elyvorg.ghost");
pub const GRAVITY: ModeId = ModeId("elyvorg.gravity");
pub const INK: ModeId = ModeId("elyvorg.ink");
pub const FIREBALL: ModeId = ModeId("elyvorg.fireball");
pub const POISON: ModeId = ModeId("elyvorg.poison");
pub const ELECTRIC: ModeId = ModeId("elyvorg.electric");
pub const THUNDER: ModeId = ModeId("elyvorg.thunder");
pub const TELEPORT: ModeId = ModeId("elyvorg.teleport");

const fn anim(row: u32, max_frame: u32, fps: f32, looping: bool) -> AnimSpec {
    AnimSpec {
        row,
        max_frame,
        fps,
        looping,
    }
}

const fn at(frame: u32, action: TriggerAction) -> FrameTrigger {
    FrameTrigger { frame, action }
}

const RECHARGE_TRIGGERS: &[FrameTrigger] = &[at(9, TriggerAction::PickNext)];

// Slash while dashing; the rearm keeps it firing once per loop pass.
const RUN_TRIGGERS: &[FrameTrigger] = &[
    at(4, TriggerAction::Spawn(SpawnKind::PurpleSlash)),
    at(7, TriggerAction::Rearm(&[0])),
];

const JUMP_TRIGGERS: &[FrameTrigger] = &[at(0, TriggerAction::Cue(SoundId("elyvorg_jump")))];

const LASER_TRIGGERS: &[FrameTrigger] = &[
    at(2, TriggerAction::Cue(SoundId("laser_charge"))),
    at(6, TriggerAction::Spawn(SpawnKind::LaserBeam)),
    at(13, TriggerAction::Transition(RECHARGE)),
];

const METEOR_TRIGGERS: &[FrameTrigger] = &[
    at(1, TriggerAction::Cue(SoundId("meteor_call"))),
    at(4, TriggerAction::Spawn(SpawnKind::Meteor)),
    at(7, TriggerAction::Spawn(SpawnKind::Meteor)),
    at(10, TriggerAction::Spawn(SpawnKind::Meteor)),
    at(13, TriggerAction::Transition(RECHARGE)),
];

const PISTOL_TRIGGERS: &[FrameTrigger] = &[
    at(2, TriggerAction::Cue(SoundId("pistol_draw"))),
    at(6, TriggerAction::Spawn(SpawnKind::PistolArrow)),
    at(10, TriggerAction::Spawn(SpawnKind::PistolArrow)),
    at(14, TriggerAction::Transition(RECHARGE)),
];

const GHOST_TRIGGERS: &[FrameTrigger] = &[
    at(0, TriggerAction::Cue(SoundId("ghost_phase"))),
    at(5, TriggerAction::Spawn(SpawnKind::GhostBlast)),
    at(7, TriggerAction::Rearm(&[1])),
];

const GRAVITY_TRIGGERS: &[FrameTrigger] = &[
    at(1, TriggerAction::Cue(SoundId("gravity_cast"))),
    at(8, TriggerAction::Spawn(SpawnKind::GravityAura)),
    at(12, TriggerAction::Transition(RECHARGE)),
];

const INK_TRIGGERS: &[FrameTrigger] = &[
    at(1, TriggerAction::Cue(SoundId("ink_throw"))),
    at(5, TriggerAction::Spawn(SpawnKind::InkBomb)),
    at(8, TriggerAction::Spawn(SpawnKind::InkBomb)),
    at(11, TriggerAction::Spawn(SpawnKind::InkBomb)),
    at(14, TriggerAction::Transition(RECHARGE)),
];

const FIREBALL_TRIGGERS: &[FrameTrigger] = &[
    at(1, TriggerAction::Cue(SoundId("fireball_cast"))),
    at(6, TriggerAction::Spawn(SpawnKind::Fireball)),
    at(10, TriggerAction::Spawn(SpawnKind::Fireball)),
    at(13, TriggerAction::Transition(RECHARGE)),
];

const POISON_TRIGGERS: &[FrameTrigger] = &[
    at(1, TriggerAction::Cue(SoundId("poison_cast"))),
    at(7, TriggerAction::BeginPoison),
    at(12, TriggerAction::Transition(RECHARGE)),
];

const ELECTRIC_TRIGGERS: &[FrameTrigger] = &[
    at(1, TriggerAction::Cue(SoundId("electric_spinup"))),
    at(6, TriggerAction::Spawn(SpawnKind::ElectricWheel)),
    at(12, TriggerAction::Transition(RECHARGE)),
];

const THUNDER_TRIGGERS: &[FrameTrigger] = &[
    at(0, TriggerAction::Cue(SoundId("thunder_roar"))),
    at(5, TriggerAction::Spawn(SpawnKind::PurpleThunder)),
    at(9, TriggerAction::Spawn(SpawnKind::PurpleThunder)),
    at(13, TriggerAction::Transition(RECHARGE)),
];

const TELEPORT_TRIGGERS: &[FrameTrigger] = &[
    at(0, TriggerAction::Cue(SoundId("teleport"))),
    at(7, TriggerAction::PickNext),
];

const MODES: &[ModeSpec] = &[
    ModeSpec {
        id: IDLE,
        anim: anim(0, 7, 10.0, true),
        triggers: &[],
        forced: None,
        exclusion: Exclusion::None,
        selectable: false,
        motion: ModeMotion::None,
        duration_ms: Some(900.0),
        after: None,
    },
    ModeSpec {
        id: RECHARGE,
        anim: anim(1, 9, 10.0, false),
        triggers: RECHARGE_TRIGGERS,
        forced: None,
        exclusion: Exclusion::None,
        selectable: false,
        motion: ModeMotion::None,
        duration_ms: None,
        after: None,
    },
    // Forced counters below are checked in this declaration order.
    ModeSpec {
        id: RUN,
        anim: anim(2, 9, 14.0, true),
        triggers: RUN_TRIGGERS,
        forced: Some(ForcedPick { min_limit: 4, max_limit: 6 }),
        exclusion: Exclusion::None,
        selectable: false,
        motion: ModeMotion::Run,
        duration_ms: Some(2600.0),
        after: None,
    },
    ModeSpec {
        id: PISTOL,
        anim: anim(6, 14, 12.0, false),
        triggers: PISTOL_TRIGGERS,
        forced: Some(ForcedPick { min_limit: 3, max_limit: 5 }),
        exclusion: Exclusion::None,
        selectable: true,
        motion: ModeMotion::None,
        duration_ms: None,
        after: None,
    },
    ModeSpec {
        id: ELECTRIC,
        anim: anim(12, 12, 12.0, false),
        triggers: ELECTRIC_TRIGGERS,
        forced: Some(ForcedPick { min_limit: 6, max_limit: 8 }),
        exclusion: Exclusion::NotWhile(ActiveFlag::ElectricWheel),
        selectable: true,
        motion: ModeMotion::None,
        duration_ms: None,
        after: None,
    },
    ModeSpec {
        id: THUNDER,
        anim: anim(13, 13, 12.0, false),
        triggers: THUNDER_TRIGGERS,
        forced: Some(ForcedPick { min_limit: 5, max_limit: 7 }),
        exclusion: Exclusion::SequenceOnly,
        selectable: false,
        motion: ModeMotion::None,
        duration_ms: None,
        after: None,
    },
    ModeSpec {
        id: JUMP,
        anim: anim(3, 11, 12.0, false),
        triggers: JUMP_TRIGGERS,
        forced: None,
        exclusion: Exclusion::None,
        selectable: true,
        motion: ModeMotion::Jump,
        duration_ms: None,
        after: None,
    },
    ModeSpec {
        id: LASER,
        anim: anim(4, 13, 12.0, false),
        triggers: LASER_TRIGGERS,
        forced: None,
        exclusion: Exclusion::None,
        selectable: true,
        motion: ModeMotion::None,
        duration_ms: None,
        after: None,
    },
    ModeSpec {
        id: METEOR,
        anim: anim(5, 13, 12.0, false),
        triggers: METEOR_TRIGGERS,
        forced: None,
        exclusion: Exclusion::None,
        selectable: true,
        motion: ModeMotion::None,
        duration_ms: None,
        after: None,
    },
    ModeSpec {
        id: GHOST,
        anim: anim(7, 9, 14.0, true),
        triggers: GHOST_TRIGGERS,
        forced: None,
        exclusion: Exclusion::None,
        selectable: true,
        motion: ModeMotion::Ghost,
        duration_ms: Some(3000.0),
        after: Some(RECHARGE),
    },
    ModeSpec {
        id: GRAVITY,
        anim: anim(8, 12, 12.0, false),
        triggers: GRAVITY_TRIGGERS,
        forced: None,
        exclusion: Exclusion::NotWhile(ActiveFlag::GravityAura),
        selectable: true,
        motion: ModeMotion::None,
        duration_ms: None,
        after: None,
    },
    ModeSpec {
        id: INK,
        anim: anim(9, 14, 12.0, false),
        triggers: INK_TRIGGERS,
        forced: None,
        exclusion: Exclusion::None,
        selectable: true,
        motion: ModeMotion::None,
        duration_ms: None,
        after: None,
    },
    ModeSpec {
        id: FIREBALL,
        anim: anim(10, 13, 12.0, false),
        triggers: FIREBALL_TRIGGERS,
        forced: None,
        exclusion: Exclusion::None,
        selectable: true,
        motion: ModeMotion::None,
        duration_ms: None,
        after: None,
    },
    ModeSpec {
        id: POISON,
        anim: anim(11, 12, 12.0, false),
        triggers: POISON_TRIGGERS,
        forced: None,
        exclusion: Exclusion::NotWhile(ActiveFlag::Poison),
        selectable: true,
        motion: ModeMotion::None,
        duration_ms: None,
        after: None,
    },
    ModeSpec {
        id: TELEPORT,
        anim: anim(14, 7, 12.0, false),
        triggers: TELEPORT_TRIGGERS,
        forced: None,
        exclusion: Exclusion::None,
        selectable: true,
        motion: ModeMotion::Teleport,
        duration_ms: None,
        after: None,
    },
];

pub static ELYVORG: ModeSet = ModeSet {
    modes: MODES,
    idle: IDLE,
    recharge: RECHARGE,
    run: Some(RUN),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mode_transition_targets_exist() {
        for spec in ELYVORG.modes {
            for trigger in spec.triggers {
                match trigger.action {
                    TriggerAction::Transition(target) => {
                        assert!(ELYVORG.contains(target), "{} -> missing {target}", spec.id);
                    }
                    TriggerAction::Rearm(indices) => {
                        for &i in indices {
                            assert!(i < spec.triggers.len(), "{}: rearm out of range", spec.id);
                        }
                    }
                    _ => {}
                }
            }
            if let Some(after) = spec.after {
                assert!(ELYVORG.contains(after));
            }
        }
    }

    #[test]
    fn trigger_frames_stay_within_the_animation() {
        for spec in ELYVORG.modes {
            for trigger in spec.triggers {
                assert!(
                    trigger.frame <= spec.anim.max_frame,
                    "{}: trigger frame {} past max {}",
                    spec.id,
                    trigger.frame,
                    spec.anim.max_frame
                );
            }
        }
    }

    #[test]
    fn fallback_modes_are_in_the_repertoire() {
        assert!(ELYVORG.contains(ELYVORG.idle));
        assert!(ELYVORG.contains(ELYVORG.recharge));
        assert!(ELYVORG.contains(ELYVORG.run.unwrap()));
    }
}
