//! Boss domain: electric wheel ownership.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::effects::{ELECTRIC_LOOP, MarkedForDeletion};
use crate::services::AudioCommand;

/// Tracks the orbiting electric wheel. Unlike the aura, the wheel has no
/// lifetime of its own; this component times it out and flags it.
#[derive(Component, Debug)]
pub struct ElectricWheel {
    pub is_active: bool,
    pub duration_ms: f32,
    pub timer_ms: f32,
    pub wheel: Option<Entity>,
}

impl Default for ElectricWheel {
    fn default() -> Self {
        Self {
            is_active: false,
            duration_ms: 5_000.0,
            timer_ms: 0.0,
            wheel: None,
        }
    }
}

impl ElectricWheel {
    pub fn note_wheel_spawned(&mut self, wheel: Entity) {
        self.wheel = Some(wheel);
        self.is_active = true;
        self.timer_ms = 0.0;
    }

    pub fn remaining_ms(&self) -> f32 {
        (self.duration_ms - self.timer_ms).max(0.0)
    }
}

pub(crate) fn tick_electric_wheel(
    time: Res<Time>,
    mut commands: Commands,
    mut audio: MessageWriter<AudioCommand>,
    mut query: Query<&mut ElectricWheel>,
) {
    let delta_ms = time.delta_secs() * 1000.0;
    for mut state in &mut query {
        if !state.is_active {
            continue;
        }
        state.timer_ms += delta_ms;
        if state.timer_ms >= state.duration_ms {
            if let Some(wheel) = state.wheel.take() {
                commands.entity(wheel).insert(MarkedForDeletion);
            }
            state.is_active = false;
            audio.write(AudioCommand::FadeOutStop {
                id: ELECTRIC_LOOP,
                ms: 300.0,
            });
            debug!("electric wheel expired");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::message::Messages;
    use std::time::Duration;

    #[test]
    fn wheel_expiry_flags_the_wheel_and_fades_its_loop() {
        let mut app = App::new();
        app.insert_resource(Time::<()>::default());
        app.add_message::<AudioCommand>();
        app.add_systems(Update, tick_electric_wheel);

        let wheel = app.world_mut().spawn_empty().id();
        let mut state = ElectricWheel::default();
        state.note_wheel_spawned(wheel);
        let owner = app.world_mut().spawn(state).id();

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(5_100));
        app.update();

        assert!(app.world().get::<MarkedForDeletion>(wheel).is_some());
        let state = app.world().get::<ElectricWheel>(owner).unwrap();
        assert!(!state.is_active);
        assert_eq!(state.wheel, None);
        let fades = app
            .world_mut()
            .resource_mut::<Messages<AudioCommand>>()
            .drain()
            .filter(|cmd| matches!(cmd, AudioCommand::FadeOutStop { id, .. } if *id == ELECTRIC_LOOP))
            .count();
        assert_eq!(fades, 1, "exactly one fade per expiry");
    }
}
