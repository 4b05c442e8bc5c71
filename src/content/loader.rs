//! Content domain: RON tuning loader.

use std::fmt;
use std::fs;

use bevy::prelude::*;

use crate::content::tuning::GameplayTuning;

#[derive(Debug)]
pub enum TuningLoadError {
    Io(std::io::Error),
    Parse(ron::error::SpannedError),
}

impl fmt::Display for TuningLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningLoadError::Io(e) => write!(f, "could not read tuning file: {e}"),
            TuningLoadError::Parse(e) => write!(f, "could not parse tuning file: {e}"),
        }
    }
}

impl std::error::Error for TuningLoadError {}

impl From<std::io::Error> for TuningLoadError {
    fn from(e: std::io::Error) -> Self {
        TuningLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for TuningLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        TuningLoadError::Parse(e)
    }
}

pub fn load_tuning(path: &str) -> Result<GameplayTuning, TuningLoadError> {
    let text = fs::read_to_string(path)?;
    let options = ron::Options::default()
        .with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME);
    Ok(options.from_str(&text)?)
}

pub(crate) fn load_tuning_resource(mut commands: Commands) {
    let path = "assets/data/tuning.ron";
    let tuning = match load_tuning(path) {
        Ok(tuning) => {
            info!("Loaded tuning from {path}");
            tuning
        }
        Err(e) => {
            warn!("{e}; using default tuning");
            GameplayTuning::default()
        }
    };
    commands.insert_resource(tuning);
}
