//! Boss domain: the mode state machine and both repertoires.
//!
//! The dispatcher is data-driven: `modes.rs` defines the table types,
//! `elyvorg.rs` / `glacikal.rs` fill them in, and `triggers.rs` / `motion.rs`
//! interpret them for whichever boss is on stage.

mod attacks;
mod barrier;
mod components;
pub mod elyvorg;
mod gates;
pub mod glacikal;
mod lifecycle;
mod modes;
mod motion;
mod randomiser;
mod spawn;
mod triggers;

pub use attacks::{ElectricWheel, GravitySpinner, PoisonSkill, SlashTally};
pub use barrier::{Barrier, barrier_visual_index};
pub use components::{BossCore, BossMode, BossRepertoire, ForcedCounter};
pub use gates::FireGate;
pub use modes::{
    ActiveFlag, AnimSpec, Exclusion, ForcedPick, FrameTrigger, ModeId, ModeMotion, ModeSet,
    ModeSpec, TriggerAction,
};
pub use motion::clamp_stage_x;
pub use randomiser::{PickContext, pick_next_mode};
pub use spawn::{forced_counters, spawn_elyvorg, spawn_glacikal};

use bevy::prelude::*;

use crate::core::{GameState, TickSet};

pub struct BossPlugin;

impl Plugin for BossPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Fight), spawn::spawn_initial_boss)
            .add_systems(
                Update,
                (
                    triggers::drive_mode_triggers,
                    motion::apply_boss_motion,
                    motion::run_away_exit,
                    attacks::tick_poison,
                    attacks::tick_gravity_spinner,
                    attacks::tick_electric_wheel,
                    motion::sync_boss_transform,
                )
                    .chain()
                    .in_set(TickSet::BossLogic),
            )
            .add_systems(
                Update,
                (
                    lifecycle::route_boss_damage,
                    lifecycle::handle_defeat,
                    barrier::update_barriers,
                )
                    .chain()
                    .in_set(TickSet::Effects),
            );
    }
}
