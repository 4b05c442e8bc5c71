//! Boss domain: shared runtime state.
//!
//! `BossCore` carries only what every mode needs. Per-attack state lives in
//! the small components under `attacks/`, and per-mode choreography state in
//! [`BossMode`].

use bevy::prelude::*;

use crate::boss::gates::FireGate;
use crate::boss::modes::{ModeId, ModeSet};
use crate::movement::Facing;

/// Static handle to the boss's repertoire table.
#[derive(Component, Debug, Clone, Copy)]
pub struct BossRepertoire(pub &'static ModeSet);

#[derive(Component, Debug)]
pub struct BossCore {
    /// Bottom-left corner in stage coordinates.
    pub pos: Vec2,
    pub size: Vec2,
    pub hp: f32,
    pub max_hp: f32,
    pub facing: Facing,
    pub run_speed: f32,
    pub jump_velocity: f32,
    pub reached_left_edge: bool,
    pub reached_right_edge: bool,
    pub is_in_the_middle: bool,
    defeat_latched: bool,
    pub running_away: bool,
    pub name: &'static str,
}

impl BossCore {
    pub fn new(name: &'static str, pos: Vec2, size: Vec2, max_hp: f32) -> Self {
        Self {
            pos,
            size,
            hp: max_hp,
            max_hp,
            facing: Facing::Left,
            run_speed: 240.0,
            jump_velocity: 560.0,
            reached_left_edge: false,
            reached_right_edge: false,
            is_in_the_middle: false,
            defeat_latched: false,
            running_away: false,
            name,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.hp = (self.hp - amount).max(0.0);
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }

    pub fn hp_percent(&self) -> f32 {
        if self.max_hp <= 0.0 {
            0.0
        } else {
            self.hp / self.max_hp
        }
    }

    /// One-shot defeat latch: returns true exactly once, the first time it is
    /// called with hp at zero.
    pub fn register_defeat(&mut self) -> bool {
        if self.is_dead() && !self.defeat_latched {
            self.defeat_latched = true;
            true
        } else {
            false
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.defeat_latched
    }
}

/// Forced-pick bookkeeping for one mode: counts non-picks against a rolled
/// limit.
#[derive(Debug, Clone)]
pub struct ForcedCounter {
    pub mode: ModeId,
    pub count: u32,
    pub limit: u32,
}

/// Runtime mode-machine state. Gates are rebuilt (all armed) on every mode
/// entry, one per trigger of the new mode.
#[derive(Component, Debug)]
pub struct BossMode {
    pub current: ModeId,
    pub previous: ModeId,
    /// Most recent selectable attack; the uniform sample excludes it even
    /// when a recharge or idle sits in between.
    pub last_attack: ModeId,
    pub gates: Vec<FireGate>,
    pub counters: Vec<ForcedCounter>,
    pub elapsed_ms: f32,
    pub vertical_velocity: f32,
    /// Teleport relocation happens once per mode entry.
    pub relocated: bool,
    pub repeat_chance: f64,
}

impl BossMode {
    pub fn new(initial: ModeId, counters: Vec<ForcedCounter>, trigger_count: usize) -> Self {
        Self {
            current: initial,
            previous: initial,
            last_attack: initial,
            gates: vec![FireGate::new(); trigger_count],
            counters,
            elapsed_ms: 0.0,
            vertical_velocity: 0.0,
            relocated: false,
            repeat_chance: 0.1,
        }
    }

    /// Resets per-mode state for a fresh entry.
    pub fn enter(&mut self, next: ModeId, trigger_count: usize, selectable: bool) {
        self.previous = self.current;
        self.current = next;
        if selectable {
            self.last_attack = next;
        }
        self.gates = vec![FireGate::new(); trigger_count];
        self.elapsed_ms = 0.0;
        self.vertical_velocity = 0.0;
        self.relocated = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core() -> BossCore {
        BossCore::new("test", Vec2::ZERO, Vec2::splat(96.0), 50.0)
    }

    #[test]
    fn damage_clamps_at_zero() {
        let mut boss = core();
        boss.take_damage(80.0);
        assert_eq!(boss.hp, 0.0);
        assert!(boss.is_dead());
    }

    #[test]
    fn defeat_latch_fires_exactly_once() {
        let mut boss = core();
        boss.take_damage(50.0);
        assert!(boss.register_defeat());
        assert!(!boss.register_defeat(), "latch is one-way");
        boss.take_damage(10.0);
        assert!(!boss.register_defeat());
    }

    #[test]
    fn no_defeat_while_alive() {
        let mut boss = core();
        boss.take_damage(49.0);
        assert!(!boss.register_defeat());
    }

    #[test]
    fn mode_entry_rearms_gates_and_clears_timers() {
        let mut mode = BossMode::new(ModeId("a"), Vec::new(), 2);
        mode.gates[0].fire(true);
        mode.elapsed_ms = 500.0;
        mode.enter(ModeId("b"), 3, true);
        assert_eq!(mode.previous, ModeId("a"));
        assert_eq!(mode.current, ModeId("b"));
        assert_eq!(mode.gates.len(), 3);
        assert!(mode.gates.iter().all(FireGate::is_armed));
        assert_eq!(mode.elapsed_ms, 0.0);
    }

    #[test]
    fn last_attack_survives_unselectable_entries() {
        let mut mode = BossMode::new(ModeId("idle"), Vec::new(), 0);
        mode.enter(ModeId("laser"), 2, true);
        mode.enter(ModeId("recharge"), 1, false);
        assert_eq!(mode.current, ModeId("recharge"));
        assert_eq!(mode.previous, ModeId("laser"));
        assert_eq!(mode.last_attack, ModeId("laser"));
    }
}
