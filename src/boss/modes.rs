//! Boss domain: declarative mode and trigger-table types.
//!
//! A boss is a [`ModeSet`]: static data describing every mode's animation row,
//! frame choreography, forced-pick cadence, and exclusion rules. The dispatcher,
//! trigger driver, and randomiser interpret this data and are shared by every
//! boss; adding a boss means writing a new table, not new control flow.

use crate::effects::SpawnKind;
use crate::services::SoundId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeId(pub &'static str);

impl std::fmt::Display for ModeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Animation binding for a mode: a row of the boss sheet plus playback params.
#[derive(Debug, Clone, Copy)]
pub struct AnimSpec {
    pub row: u32,
    pub max_frame: u32,
    pub fps: f32,
    pub looping: bool,
}

#[derive(Debug, Clone, Copy)]
pub enum TriggerAction {
    /// Play a sound when the frame is reached.
    Cue(SoundId),
    /// Push an effect spawn to the outbox.
    Spawn(SpawnKind),
    /// Begin the poison rain passive on the boss.
    BeginPoison,
    /// Re-arm the listed trigger indices (for looping choreography).
    Rearm(&'static [usize]),
    /// Switch to another mode.
    Transition(ModeId),
    /// Ask the randomiser for the next mode.
    PickNext,
}

/// One choreography step: when the animator reaches `frame`, `action` fires
/// once (gated), no matter how many ticks the frame persists.
#[derive(Debug, Clone, Copy)]
pub struct FrameTrigger {
    pub frame: u32,
    pub action: TriggerAction,
}

/// Forced-pick cadence: after `limit` non-picks the mode is force-selected and
/// a fresh limit is rolled from the inclusive range.
#[derive(Debug, Clone, Copy)]
pub struct ForcedPick {
    pub min_limit: u32,
    pub max_limit: u32,
}

/// Boss-wide one-instance flags that exclusion rules test against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveFlag {
    GravityAura,
    Poison,
    ElectricWheel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    None,
    /// Never pick while the flag is active (one aura at a time, etc).
    NotWhile(ActiveFlag),
    /// Only reachable through a forced counter or explicit transition.
    SequenceOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeMotion {
    None,
    /// Horizontal run in the facing direction, clamped to stage edges.
    Run,
    /// Full ballistic arc; landing triggers a re-roll.
    Jump,
    /// Rise until apex, then transition to the given mode.
    Ascend(ModeId),
    /// Fall until ground; landing triggers a re-roll.
    Descend,
    /// Relocate once to a random clamped x on entry.
    Teleport,
    /// Drift horizontally through the player.
    Ghost,
}

#[derive(Debug, Clone, Copy)]
pub struct ModeSpec {
    pub id: ModeId,
    pub anim: AnimSpec,
    pub triggers: &'static [FrameTrigger],
    pub forced: Option<ForcedPick>,
    pub exclusion: Exclusion,
    /// Participates in the randomiser's uniform sample.
    pub selectable: bool,
    pub motion: ModeMotion,
    /// Dwell time; on expiry the mode moves to `after` (or re-rolls).
    pub duration_ms: Option<f32>,
    /// Where duration expiry goes. `None` means ask the randomiser.
    pub after: Option<ModeId>,
}

/// A boss's complete repertoire plus its well-known fallback modes.
#[derive(Debug, Clone, Copy)]
pub struct ModeSet {
    pub modes: &'static [ModeSpec],
    pub idle: ModeId,
    pub recharge: ModeId,
    /// De-escalation mode for game-over; not every boss has one.
    pub run: Option<ModeId>,
}

impl ModeSet {
    pub fn spec(&self, id: ModeId) -> &'static ModeSpec {
        self.modes
            .iter()
            .find(|m| m.id == id)
            .unwrap_or_else(|| panic!("mode '{id}' is not in this boss's repertoire"))
    }

    pub fn contains(&self, id: ModeId) -> bool {
        self.modes.iter().any(|m| m.id == id)
    }
}
