//! Core domain: app states, stage geometry, fight director, update ordering.

mod resources;
mod state;

pub use resources::{CombatRng, FightDirector, RunConfig, StageBounds};
pub use state::GameState;

use bevy::prelude::*;

/// Cross-domain ordering for the per-tick simulation: animators advance,
/// boss logic reads the fresh frames, then the outbox drain and effect
/// updates run, then the deletion sweep.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    Animate,
    BossLogic,
    Effects,
    Sweep,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<StageBounds>()
            .init_resource::<FightDirector>()
            .init_resource::<RunConfig>()
            .configure_sets(
                Update,
                (
                    TickSet::Animate,
                    TickSet::BossLogic,
                    TickSet::Effects,
                    TickSet::Sweep,
                )
                    .chain(),
            )
            .add_systems(Startup, (setup_camera, seed_combat_rng, enter_fight));
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn seed_combat_rng(mut commands: Commands, config: Res<RunConfig>) {
    info!("Run seed: {}", config.seed);
    commands.insert_resource(CombatRng::from_seed(config.seed));
}

fn enter_fight(mut next: ResMut<NextState<GameState>>) {
    next.set(GameState::Fight);
}
