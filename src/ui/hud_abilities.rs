//! UI domain: ability and cooldown readout.
//!
//! Pure consumer of the per-attack component fields; no combat logic here.

use bevy::prelude::*;

use crate::boss::{ElectricWheel, GravitySpinner, PoisonSkill, SlashTally};
use crate::core::FightDirector;

#[derive(Component)]
pub(crate) struct AbilityReadout;

pub(crate) fn spawn_ability_readout(mut commands: Commands) {
    commands.spawn((
        AbilityReadout,
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(0.7, 0.75, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
        ZIndex(100),
    ));
}

fn cooldown_line(label: &str, active: bool, cooldown_timer_ms: f32) -> String {
    if active {
        format!("{label}: active")
    } else if cooldown_timer_ms > 0.0 {
        format!("{label}: {:.1}s", cooldown_timer_ms / 1000.0)
    } else {
        format!("{label}: ready")
    }
}

pub(crate) fn update_ability_readout(
    director: Res<FightDirector>,
    bosses: Query<(
        Option<&PoisonSkill>,
        Option<&GravitySpinner>,
        Option<&ElectricWheel>,
        Option<&SlashTally>,
    )>,
    mut readout: Query<&mut Text, With<AbilityReadout>>,
) {
    let Ok(mut text) = readout.single_mut() else {
        return;
    };
    let Some((poison, spinner, wheel, tally)) =
        director.current_boss.and_then(|e| bosses.get(e).ok())
    else {
        text.0.clear();
        return;
    };

    let mut lines = Vec::new();
    if let Some(poison) = poison {
        lines.push(cooldown_line("poison", poison.is_active, poison.cooldown_timer_ms));
    }
    if let Some(spinner) = spinner {
        lines.push(cooldown_line("gravity", spinner.is_active, spinner.cooldown_timer_ms));
    }
    if let Some(wheel) = wheel {
        if wheel.is_active {
            lines.push(format!("wheel: {:.1}s left", wheel.remaining_ms() / 1000.0));
        } else {
            lines.push("wheel: ready".to_string());
        }
    }
    if let Some(tally) = tally {
        lines.push(format!("slashes: {}/{}", tally.counter, tally.counter_limit));
    }
    text.0 = lines.join("\n");
}
