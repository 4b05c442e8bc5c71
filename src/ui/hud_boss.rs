//! UI domain: boss name and health bar.

use bevy::prelude::*;

use crate::boss::BossCore;
use crate::core::FightDirector;

#[derive(Component)]
pub(crate) struct BossHudRoot;

#[derive(Component)]
pub(crate) struct BossNameText;

#[derive(Component)]
pub(crate) struct BossHealthFill;

const BAR_WIDTH: f32 = 420.0;

pub(crate) fn spawn_boss_hud(mut commands: Commands) {
    commands
        .spawn((
            BossHudRoot,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(16.0),
                left: Val::Percent(50.0),
                margin: UiRect::left(Val::Px(-BAR_WIDTH / 2.0)),
                width: Val::Px(BAR_WIDTH),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
            Visibility::Hidden,
            ZIndex(100),
        ))
        .with_children(|parent| {
            parent.spawn((
                BossNameText,
                Text::new(""),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.9, 0.8)),
            ));
            parent
                .spawn((
                    Node {
                        width: Val::Px(BAR_WIDTH),
                        height: Val::Px(12.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.12, 0.1, 0.1)),
                ))
                .with_children(|bar| {
                    bar.spawn((
                        BossHealthFill,
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.75, 0.15, 0.2)),
                    ));
                });
        });
}

pub(crate) fn update_boss_hud(
    director: Res<FightDirector>,
    bosses: Query<&BossCore>,
    mut root: Query<&mut Visibility, With<BossHudRoot>>,
    mut name: Query<&mut Text, With<BossNameText>>,
    mut fill: Query<&mut Node, With<BossHealthFill>>,
) {
    let (Ok(mut visibility), Ok(mut name), Ok(mut fill)) =
        (root.single_mut(), name.single_mut(), fill.single_mut())
    else {
        return;
    };

    let core = director.current_boss.and_then(|e| bosses.get(e).ok());
    match core {
        Some(core) => {
            *visibility = Visibility::Visible;
            name.0 = core.name.to_string();
            fill.width = Val::Percent(core.hp_percent() * 100.0);
        }
        None => {
            *visibility = Visibility::Hidden;
        }
    }
}
