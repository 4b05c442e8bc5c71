//! Anim domain: sprite-sheet registry.
//!
//! Every drawable entity is built from a sheet registered here. Looking up an
//! unregistered key is a wiring error and fails fast, uniformly, rather than
//! silently skipping draws.

use bevy::prelude::*;
use std::collections::HashMap;

/// One loaded sprite sheet: image plus grid layout.
#[derive(Debug, Clone)]
pub struct SheetHandle {
    pub image: Handle<Image>,
    pub layout: Handle<TextureAtlasLayout>,
    pub columns: u32,
    pub frame_size: Vec2,
}

impl SheetHandle {
    pub fn sprite(&self, atlas_index: usize, display_size: Vec2) -> Sprite {
        let mut sprite = Sprite::from_atlas_image(
            self.image.clone(),
            TextureAtlas {
                layout: self.layout.clone(),
                index: atlas_index,
            },
        );
        sprite.custom_size = Some(display_size);
        sprite
    }
}

#[derive(Resource, Debug, Default)]
pub struct SheetLibrary {
    sheets: HashMap<&'static str, SheetHandle>,
}

impl SheetLibrary {
    pub fn insert(&mut self, key: &'static str, sheet: SheetHandle) {
        self.sheets.insert(key, sheet);
    }

    /// Panics on an unregistered key: constructing a drawable entity without
    /// its sheet is a configuration error, not a runtime condition.
    pub fn sheet(&self, key: &str) -> &SheetHandle {
        self.sheets
            .get(key)
            .unwrap_or_else(|| panic!("sprite sheet '{key}' is not registered"))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.sheets.contains_key(key)
    }
}

struct SheetDef {
    key: &'static str,
    path: &'static str,
    frame: (u32, u32),
    columns: u32,
    rows: u32,
}

const SHEET_MANIFEST: &[SheetDef] = &[
    SheetDef { key: "elyvorg", path: "sprites/elyvorg.png", frame: (96, 96), columns: 16, rows: 15 },
    SheetDef { key: "glacikal", path: "sprites/glacikal.png", frame: (112, 112), columns: 16, rows: 10 },
    SheetDef { key: "barrier", path: "sprites/barrier.png", frame: (128, 128), columns: 3, rows: 1 },
    SheetDef { key: "fx.arrow", path: "sprites/fx/arrow.png", frame: (48, 16), columns: 1, rows: 1 },
    SheetDef { key: "fx.fireball", path: "sprites/fx/fireball.png", frame: (32, 32), columns: 6, rows: 1 },
    SheetDef { key: "fx.laser", path: "sprites/fx/laser.png", frame: (160, 32), columns: 8, rows: 1 },
    SheetDef { key: "fx.meteor", path: "sprites/fx/meteor.png", frame: (48, 48), columns: 6, rows: 1 },
    SheetDef { key: "fx.ghost_blast", path: "sprites/fx/ghost_blast.png", frame: (64, 64), columns: 8, rows: 1 },
    SheetDef { key: "fx.gravity_aura", path: "sprites/fx/gravity_aura.png", frame: (96, 96), columns: 8, rows: 1 },
    SheetDef { key: "fx.electric_wheel", path: "sprites/fx/electric_wheel.png", frame: (96, 96), columns: 8, rows: 1 },
    SheetDef { key: "fx.ink_bomb", path: "sprites/fx/ink_bomb.png", frame: (32, 32), columns: 4, rows: 1 },
    SheetDef { key: "fx.poison_drop", path: "sprites/fx/poison_drop.png", frame: (16, 24), columns: 4, rows: 1 },
    SheetDef { key: "fx.purple_slash", path: "sprites/fx/purple_slash.png", frame: (80, 80), columns: 6, rows: 1 },
    SheetDef { key: "fx.purple_thunder", path: "sprites/fx/purple_thunder.png", frame: (64, 192), columns: 8, rows: 1 },
    SheetDef { key: "fx.ice_slash", path: "sprites/fx/ice_slash.png", frame: (80, 80), columns: 6, rows: 1 },
    SheetDef { key: "fx.ice_shard", path: "sprites/fx/ice_shard.png", frame: (24, 24), columns: 4, rows: 1 },
    SheetDef { key: "fx.icicle_top", path: "sprites/fx/icicle_top.png", frame: (32, 96), columns: 4, rows: 1 },
    SheetDef { key: "fx.icicle_under", path: "sprites/fx/icicle_under.png", frame: (32, 96), columns: 6, rows: 1 },
    SheetDef { key: "fx.ice_ball", path: "sprites/fx/ice_ball.png", frame: (32, 32), columns: 6, rows: 1 },
    SheetDef { key: "fx.explosion", path: "sprites/fx/explosion.png", frame: (96, 96), columns: 8, rows: 1 },
    SheetDef { key: "fx.poison_splat", path: "sprites/fx/poison_splat.png", frame: (48, 48), columns: 6, rows: 1 },
    SheetDef { key: "fx.ink_splat", path: "sprites/fx/ink_splat.png", frame: (48, 48), columns: 6, rows: 1 },
    SheetDef { key: "fx.frost_shatter", path: "sprites/fx/frost_shatter.png", frame: (48, 48), columns: 6, rows: 1 },
];

pub(crate) fn load_sheets(
    mut library: ResMut<SheetLibrary>,
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
) {
    for def in SHEET_MANIFEST {
        let layout = layouts.add(TextureAtlasLayout::from_grid(
            UVec2::new(def.frame.0, def.frame.1),
            def.columns,
            def.rows,
            None,
            None,
        ));
        library.insert(
            def.key,
            SheetHandle {
                image: asset_server.load(def.path),
                layout,
                columns: def.columns,
                frame_size: Vec2::new(def.frame.0 as f32, def.frame.1 as f32),
            },
        );
    }
    info!("Registered {} sprite sheets", SHEET_MANIFEST.len());
}
