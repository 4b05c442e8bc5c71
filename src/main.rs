//! Eldervale: a side-scrolling boss combat core.

use avian2d::prelude::*;
use bevy::prelude::*;

mod anim;
mod boss;
mod combat;
mod content;
mod core;
#[cfg(feature = "dev-tools")]
mod debug;
mod effects;
mod movement;
mod services;
mod ui;

fn main() {
    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Eldervale".into(),
                resolution: (1280, 720).into(),
                ..default()
            }),
            ..default()
        }),
    )
    .add_plugins(PhysicsPlugins::default())
    .add_plugins((
        content::ContentPlugin,
        core::CorePlugin,
        services::ServicesPlugin,
        anim::AnimPlugin,
        movement::MovementPlugin,
        combat::CombatPlugin,
        effects::EffectsPlugin,
        boss::BossPlugin,
        ui::UiPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
