// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{RawScenarioFile, ScenarioFile};
use crate::errors::Result;

/// Load a scenario file from a given path and return the raw `RawScenarioFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation (dependency references, cycles, etc.). Use
/// [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawScenarioFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let scenario: RawScenarioFile = toml::from_str(&contents)?;

    Ok(scenario)
}

/// Load a scenario file from path and run validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ScenarioFile> {
    let raw = load_from_path(&path)?;
    let scenario = ScenarioFile::try_from(raw)?;
    Ok(scenario)
}

/// Load the scenario at `path`, or fall back to the built-in demo plan.
pub fn load_or_demo(path: Option<&Path>) -> Result<ScenarioFile> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading scenario file");
            load_and_validate(path)
        }
        None => {
            debug!("no scenario file given; using built-in demo plan");
            Ok(ScenarioFile::demo())
        }
    }
}

/// Default location of the key/value handoff store shared by the
/// `configure`, `dashboard` and `report` commands.
pub fn default_state_path() -> PathBuf {
    PathBuf::from(".pmsim").join("session.toml")
}
