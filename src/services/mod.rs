//! Services domain: in-process surfaces for the external audio and
//! screen-effect collaborators.

mod audio;
mod screenfx;

pub use audio::{AudioCommand, AudioDirector, SoundId};
pub use screenfx::{ScreenFxCommand, ScreenOverlays, ScreenShake};

use bevy::prelude::*;

use crate::services::audio::{drain_audio_commands, tick_audio_fades};
use crate::services::screenfx::{
    apply_camera_shake, drain_screenfx_commands, spawn_overlay_node, tick_overlays,
    update_overlay_node,
};

pub struct ServicesPlugin;

impl Plugin for ServicesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AudioDirector>()
            .init_resource::<ScreenShake>()
            .init_resource::<ScreenOverlays>()
            .add_message::<AudioCommand>()
            .add_message::<ScreenFxCommand>()
            .add_systems(Startup, spawn_overlay_node)
            .add_systems(
                Update,
                (
                    drain_audio_commands,
                    tick_audio_fades,
                    drain_screenfx_commands,
                    tick_overlays,
                    apply_camera_shake,
                    update_overlay_node,
                )
                    .chain(),
            );
    }
}
