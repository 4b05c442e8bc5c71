//! Services domain: screen shake and tinted overlay requests.

use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;
use rand::Rng;
use std::collections::HashMap;

#[derive(Debug)]
pub enum ScreenFxCommand {
    /// Hold a tinted overlay under `tag` until released.
    Request {
        tag: &'static str,
        rgb: [f32; 3],
        /// Alpha gained per second while fading in.
        fade_in_speed: f32,
    },
    Release {
        tag: &'static str,
    },
    StartShake {
        ms: f32,
        magnitude: f32,
    },
    StopShake,
}

impl Message for ScreenFxCommand {}

#[derive(Resource, Debug, Default)]
pub struct ScreenShake {
    pub remaining_ms: f32,
    pub magnitude: f32,
}

impl ScreenShake {
    pub fn is_active(&self) -> bool {
        self.remaining_ms > 0.0
    }
}

#[derive(Debug, Clone)]
pub struct OverlayFx {
    pub rgb: [f32; 3],
    pub fade_in_speed: f32,
    pub alpha: f32,
}

const OVERLAY_MAX_ALPHA: f32 = 0.45;

/// Held screen tints, keyed by requester tag.
#[derive(Resource, Debug, Default)]
pub struct ScreenOverlays {
    active: HashMap<&'static str, OverlayFx>,
}

impl ScreenOverlays {
    pub fn request(&mut self, tag: &'static str, rgb: [f32; 3], fade_in_speed: f32) {
        self.active.entry(tag).or_insert(OverlayFx {
            rgb,
            fade_in_speed,
            alpha: 0.0,
        });
    }

    pub fn release(&mut self, tag: &'static str) {
        self.active.remove(tag);
    }

    pub fn release_all(&mut self) {
        self.active.clear();
    }

    pub fn is_held(&self, tag: &'static str) -> bool {
        self.active.contains_key(tag)
    }

    pub fn tick(&mut self, delta_secs: f32) {
        for fx in self.active.values_mut() {
            fx.alpha = (fx.alpha + fx.fade_in_speed * delta_secs).min(OVERLAY_MAX_ALPHA);
        }
    }

    /// Strongest active overlay, for the single fullscreen tint node.
    pub fn dominant(&self) -> Option<&OverlayFx> {
        self.active
            .values()
            .max_by(|a, b| a.alpha.total_cmp(&b.alpha))
    }
}

pub(crate) fn drain_screenfx_commands(
    mut commands: MessageReader<ScreenFxCommand>,
    mut shake: ResMut<ScreenShake>,
    mut overlays: ResMut<ScreenOverlays>,
) {
    for cmd in commands.read() {
        match cmd {
            ScreenFxCommand::Request {
                tag,
                rgb,
                fade_in_speed,
            } => overlays.request(tag, *rgb, *fade_in_speed),
            ScreenFxCommand::Release { tag } => overlays.release(tag),
            ScreenFxCommand::StartShake { ms, magnitude } => {
                shake.remaining_ms = *ms;
                shake.magnitude = *magnitude;
            }
            ScreenFxCommand::StopShake => {
                shake.remaining_ms = 0.0;
            }
        }
    }
}

pub(crate) fn tick_overlays(time: Res<Time>, mut overlays: ResMut<ScreenOverlays>) {
    overlays.tick(time.delta_secs());
}

pub(crate) fn apply_camera_shake(
    time: Res<Time>,
    mut shake: ResMut<ScreenShake>,
    mut camera: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(mut transform) = camera.single_mut() else {
        return;
    };

    if shake.is_active() {
        shake.remaining_ms -= time.delta_secs() * 1000.0;
        let mut rng = rand::rng();
        let m = shake.magnitude;
        transform.translation.x = rng.random_range(-m..=m);
        transform.translation.y = rng.random_range(-m..=m);
    } else {
        transform.translation.x = 0.0;
        transform.translation.y = 0.0;
    }
}

/// Marker for the fullscreen tint node.
#[derive(Component)]
pub struct OverlayTint;

pub(crate) fn spawn_overlay_node(mut commands: Commands) {
    commands.spawn((
        OverlayTint,
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(0.0),
            top: Val::Px(0.0),
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(Color::NONE),
        ZIndex(200),
    ));
}

pub(crate) fn update_overlay_node(
    overlays: Res<ScreenOverlays>,
    mut tint: Query<&mut BackgroundColor, With<OverlayTint>>,
) {
    let Ok(mut bg) = tint.single_mut() else {
        return;
    };
    bg.0 = match overlays.dominant() {
        Some(fx) => Color::srgba(fx.rgb[0], fx.rgb[1], fx.rgb[2], fx.alpha),
        None => Color::NONE,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_fades_in_and_caps() {
        let mut overlays = ScreenOverlays::default();
        overlays.request("gravity", [0.5, 0.0, 0.5], 0.3);
        overlays.tick(1.0);
        assert!((overlays.dominant().unwrap().alpha - 0.3).abs() < 1e-6);
        overlays.tick(10.0);
        assert!((overlays.dominant().unwrap().alpha - OVERLAY_MAX_ALPHA).abs() < 1e-6);
    }

    #[test]
    fn release_drops_overlay() {
        let mut overlays = ScreenOverlays::default();
        overlays.request("poison", [0.0, 0.6, 0.0], 1.0);
        assert!(overlays.is_held("poison"));
        overlays.release("poison");
        assert!(!overlays.is_held("poison"));
        assert!(overlays.dominant().is_none());
    }
}
