//! UI domain: HUD widgets that read combat state.

mod hud_abilities;
mod hud_boss;

use bevy::prelude::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (hud_boss::spawn_boss_hud, hud_abilities::spawn_ability_readout),
        )
        .add_systems(
            Update,
            (hud_boss::update_boss_hud, hud_abilities::update_ability_readout),
        );
    }
}
