//! Boss domain: Glacikal's repertoire.
//!
//! Structurally parallel to Elyvorg's table; nothing outside this file knows
//! which boss it is driving.

use crate::boss::modes::{
    AnimSpec, Exclusion, ForcedPick, FrameTrigger, ModeId, ModeMotion, ModeSet, ModeSpec,
    TriggerAction,
};
use crate::effects::SpawnKind;
use crate::services::SoundId;

pub const IDLE: ModeId = ModeId("glacikal.idle");
pub const RECHARGE: ModeId = ModeId("glacikal.recharge");
pub const ICE_SLASH: ModeId = ModeId("glacikal.ice_slash");
pub const ICY_STORM: ModeId = ModeId("glacikal.icy_storm");
pub const KNEEL_TOP_ICICLES: ModeId = ModeId("glacikal.kneel_top_icicles");
pub const KNEEL_UNDERGROUND_ICICLE: ModeId = ModeId("glacikal.kneel_underground_icicle");
pub const SPINNING_ICE_BALLS: ModeId = ModeId("glacikal.spinning_ice_balls");
pub const JUMP_ASCEND: ModeId = ModeId("glacikal.jump_ascend");
pub const JUMP_AIRBORNE: ModeId = ModeId("glacikal.jump_airborne");
pub const JUMP_DESCEND: ModeId = ModeId("glacikal.jump_descend");

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

const RECHARGE_TRIGGERS: &[FrameTrigger] = &[at(8, TriggerAction::PickNext)];

const ICE_SLASH_TRIGGERS: &[FrameTrigger] = &[
    at(1, TriggerAction::Cue(SoundId("ice_slash"))),
    at(6, TriggerAction::Spawn(SpawnKind::IceSlash)),
    at(12, TriggerAction::Transition(RECHARGE)),
];

// Looping storm: shard waves re-arm on every animation pass until the dwell
// timer hands control to recharge.
const ICY_STORM_TRIGGERS: &[FrameTrigger] = &[
    at(0, TriggerAction::Cue(SoundId("icy_storm"))),
    at(3, TriggerAction::Spawn(SpawnKind::IcyStormShard)),
    at(7, TriggerAction::Spawn(SpawnKind::IcyStormShard)),
    at(11, TriggerAction::Spawn(SpawnKind::IcyStormShard)),
    at(14, TriggerAction::Rearm(&[1, 2, 3])),
];

const KNEEL_TOP_TRIGGERS: &[FrameTrigger] = &[
    at(1, TriggerAction::Cue(SoundId("icicle_call"))),
    at(5, TriggerAction::Spawn(SpawnKind::TopIcicle)),
    at(8, TriggerAction::Spawn(SpawnKind::TopIcicle)),
    at(11, TriggerAction::Spawn(SpawnKind::TopIcicle)),
    at(13, TriggerAction::Transition(RECHARGE)),
];

const KNEEL_UNDER_TRIGGERS: &[FrameTrigger] = &[
    at(1, TriggerAction::Cue(SoundId("ground_rumble"))),
    at(7, TriggerAction::Spawn(SpawnKind::UndergroundIcicle)),
    at(13, TriggerAction::Transition(RECHARGE)),
];

const SPINNING_BALLS_TRIGGERS: &[FrameTrigger] = &[
    at(1, TriggerAction::Cue(SoundId("ice_ball_cast"))),
    at(4, TriggerAction::Spawn(SpawnKind::SpinningIceBall)),
    at(8, TriggerAction::Spawn(SpawnKind::SpinningIceBall)),
    at(12, TriggerAction::Spawn(SpawnKind::SpinningIceBall)),
    at(14, TriggerAction::Transition(RECHARGE)),
];

const JUMP_ASCEND_TRIGGERS: &[FrameTrigger] = &[at(0, TriggerAction::Cue(SoundId("glacikal_jump")))];

// Airborne slam: shards rain while hanging at the apex.
const JUMP_AIRBORNE_TRIGGERS: &[FrameTrigger] = &[
    at(2, TriggerAction::Spawn(SpawnKind::IcyStormShard)),
    at(5, TriggerAction::Spawn(SpawnKind::IcyStormShard)),
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
        duration_ms: Some(1000.0),
        after: None,
    },
    ModeSpec {
        id: RECHARGE,
        anim: anim(1, 8, 10.0, false),
        triggers: RECHARGE_TRIGGERS,
        forced: None,
        exclusion: Exclusion::None,
        selectable: false,
        motion: ModeMotion::None,
        duration_ms: None,
        after: None,
    },
    ModeSpec {
        id: ICE_SLASH,
        anim: anim(2, 12, 12.0, false),
        triggers: ICE_SLASH_TRIGGERS,
        forced: Some(ForcedPick { min_limit: 3, max_limit: 5 }),
        exclusion: Exclusion::None,
        selectable: true,
        motion: ModeMotion::None,
        duration_ms: None,
        after: None,
    },
    ModeSpec {
        id: ICY_STORM,
        anim: anim(3, 14, 14.0, true),
        triggers: ICY_STORM_TRIGGERS,
        forced: None,
        exclusion: Exclusion::None,
        selectable: true,
        motion: ModeMotion::None,
        duration_ms: Some(3500.0),
        after: Some(RECHARGE),
    },
    ModeSpec {
        id: KNEEL_TOP_ICICLES,
        anim: anim(4, 13, 12.0, false),
        triggers: KNEEL_TOP_TRIGGERS,
        forced: None,
        exclusion: Exclusion::None,
        selectable: true,
        motion: ModeMotion::None,
        duration_ms: None,
        after: None,
    },
    ModeSpec {
        id: KNEEL_UNDERGROUND_ICICLE,
        anim: anim(5, 13, 12.0, false),
        triggers: KNEEL_UNDER_TRIGGERS,
        forced: None,
        exclusion: Exclusion::None,
        selectable: true,
        motion: ModeMotion::None,
        duration_ms: None,
        after: None,
    },
    ModeSpec {
        id: SPINNING_ICE_BALLS,
        anim: anim(6, 14, 12.0, false),
        triggers: SPINNING_BALLS_TRIGGERS,
        forced: None,
        exclusion: Exclusion::None,
        selectable: true,
        motion: ModeMotion::None,
        duration_ms: None,
        after: None,
    },
    ModeSpec {
        id: JUMP_ASCEND,
        anim: anim(7, 5, 12.0, false),
        triggers: JUMP_ASCEND_TRIGGERS,
        forced: None,
        exclusion: Exclusion::None,
        selectable: true,
        motion: ModeMotion::Ascend(JUMP_AIRBORNE),
        duration_ms: None,
        after: None,
    },
    // Only reachable from the ascend apex.
    ModeSpec {
        id: JUMP_AIRBORNE,
        anim: anim(8, 7, 10.0, true),
        triggers: JUMP_AIRBORNE_TRIGGERS,
        forced: None,
        exclusion: Exclusion::SequenceOnly,
        selectable: false,
        motion: ModeMotion::None,
        duration_ms: Some(700.0),
        after: Some(JUMP_DESCEND),
    },
    ModeSpec {
        id: JUMP_DESCEND,
        anim: anim(9, 5, 12.0, false),
        triggers: &[],
        forced: None,
        exclusion: Exclusion::SequenceOnly,
        selectable: false,
        motion: ModeMotion::Descend,
        duration_ms: None,
        after: None,
    },
];

pub static GLACIKAL: ModeSet = ModeSet {
    modes: MODES,
    idle: IDLE,
    recharge: RECHARGE,
    run: None,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_sequence_chains_ascend_airborne_descend() {
        let ascend = GLACIKAL.spec(JUMP_ASCEND);
        assert_eq!(ascend.motion, ModeMotion::Ascend(JUMP_AIRBORNE));
        let airborne = GLACIKAL.spec(JUMP_AIRBORNE);
        assert_eq!(airborne.after, Some(JUMP_DESCEND));
        assert_eq!(GLACIKAL.spec(JUMP_DESCEND).motion, ModeMotion::Descend);
    }

    #[test]
    fn sequence_stages_never_enter_the_random_pool() {
        for id in [JUMP_AIRBORNE, JUMP_DESCEND] {
            let spec = GLACIKAL.spec(id);
            assert!(!spec.selectable);
            assert_eq!(spec.exclusion, Exclusion::SequenceOnly);
        }
    }

    #[test]
    fn trigger_frames_stay_within_the_animation() {
        for spec in GLACIKAL.modes {
            for trigger in spec.triggers {
                assert!(trigger.frame <= spec.anim.max_frame, "{}", spec.id);
            }
        }
    }
}
