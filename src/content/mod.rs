//! Content domain: data-driven tuning loaded at startup.

mod loader;
mod tuning;

pub use loader::{TuningLoadError, load_tuning};
pub use tuning::{BossTuning, GameplayTuning, PoisonTuning};

use bevy::prelude::*;

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, loader::load_tuning_resource);
    }
}
