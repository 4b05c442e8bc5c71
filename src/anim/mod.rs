//! Anim domain: sprite-sheet registry and timed frame playback.

mod animator;
mod sheets;

pub use animator::{DespawnOnExhaust, SpriteAnimator};
pub use sheets::{SheetHandle, SheetLibrary};

use bevy::prelude::*;

use crate::anim::animator::advance_animators;
use crate::anim::sheets::load_sheets;
use crate::core::TickSet;

pub struct AnimPlugin;

impl Plugin for AnimPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SheetLibrary>()
            .add_systems(Startup, load_sheets)
            .add_systems(Update, advance_animators.in_set(TickSet::Animate));
    }
}
