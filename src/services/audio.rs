//! Services domain: command surface for the external audio backend.
//!
//! Gameplay logic never touches mixing; it writes [`AudioCommand`] messages
//! and the [`AudioDirector`] tracks what the backend should currently play.

use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;
use std::collections::HashMap;

/// Identifier for a sound asset known to the audio backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundId(pub &'static str);

#[derive(Debug)]
pub enum AudioCommand {
    Play {
        id: SoundId,
        looped: bool,
        /// Restart from the beginning even if already playing.
        restart: bool,
    },
    Stop(SoundId),
    FadeOutStop {
        id: SoundId,
        ms: f32,
    },
}

impl Message for AudioCommand {}

#[derive(Debug, Clone)]
pub struct PlayingSound {
    pub looped: bool,
    pub fade_remaining_ms: Option<f32>,
}

/// What the audio backend should currently be playing.
#[derive(Resource, Debug, Default)]
pub struct AudioDirector {
    playing: HashMap<SoundId, PlayingSound>,
}

impl AudioDirector {
    pub fn is_playing(&self, id: SoundId) -> bool {
        self.playing.contains_key(&id)
    }

    /// Looping sounds still playing, used to cut attack loops on defeat.
    pub fn looped_ids(&self) -> Vec<SoundId> {
        self.playing
            .iter()
            .filter(|(_, s)| s.looped)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn apply(&mut self, cmd: &AudioCommand) {
        match cmd {
            AudioCommand::Play {
                id,
                looped,
                restart,
            } => {
                if !*restart && self.playing.contains_key(id) {
                    return;
                }
                self.playing.insert(
                    *id,
                    PlayingSound {
                        looped: *looped,
                        fade_remaining_ms: None,
                    },
                );
            }
            AudioCommand::Stop(id) => {
                self.playing.remove(id);
            }
            AudioCommand::FadeOutStop { id, ms } => {
                if let Some(sound) = self.playing.get_mut(id) {
                    sound.fade_remaining_ms = Some(*ms);
                }
            }
        }
    }

    pub fn tick_fades(&mut self, delta_ms: f32) {
        self.playing.retain(|_, sound| {
            match sound.fade_remaining_ms.as_mut() {
                Some(remaining) => {
                    *remaining -= delta_ms;
                    *remaining > 0.0
                }
                None => true,
            }
        });
    }
}

pub(crate) fn drain_audio_commands(
    mut commands: MessageReader<AudioCommand>,
    mut director: ResMut<AudioDirector>,
) {
    for cmd in commands.read() {
        debug!("audio: {:?}", cmd);
        director.apply(cmd);
    }
}

pub(crate) fn tick_audio_fades(time: Res<Time>, mut director: ResMut<AudioDirector>) {
    director.tick_fades(time.delta_secs() * 1000.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    const LASER: SoundId = SoundId("laser");

    #[test]
    fn play_without_restart_keeps_existing() {
        let mut director = AudioDirector::default();
        director.apply(&AudioCommand::Play {
            id: LASER,
            looped: true,
            restart: false,
        });
        // Second non-restart play must not clobber the looped flag.
        director.apply(&AudioCommand::Play {
            id: LASER,
            looped: false,
            restart: false,
        });
        assert_eq!(director.looped_ids(), vec![LASER]);
    }

    #[test]
    fn stop_removes_sound() {
        let mut director = AudioDirector::default();
        director.apply(&AudioCommand::Play {
            id: LASER,
            looped: false,
            restart: true,
        });
        assert!(director.is_playing(LASER));
        director.apply(&AudioCommand::Stop(LASER));
        assert!(!director.is_playing(LASER));
    }

    #[test]
    fn fade_out_expires_after_duration() {
        let mut director = AudioDirector::default();
        director.apply(&AudioCommand::Play {
            id: LASER,
            looped: true,
            restart: true,
        });
        director.apply(&AudioCommand::FadeOutStop { id: LASER, ms: 500.0 });
        director.tick_fades(300.0);
        assert!(director.is_playing(LASER));
        director.tick_fades(300.0);
        assert!(!director.is_playing(LASER));
    }
}
