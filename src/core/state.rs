//! Core domain: top-level app states.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    /// Loading tuning data and sprite sheets.
    #[default]
    Boot,
    /// The fight simulation is running.
    Fight,
}
