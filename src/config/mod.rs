// src/config/mod.rs

//! Configuration for pmsim.
//!
//! Responsibilities:
//! - Define the TOML-backed scenario model (`model.rs`).
//! - Load a scenario file from disk (`loader.rs`).
//! - Validate ids, dependency references and acyclicity (`validate.rs`).
//! - Capture and hand off the four session scalars (`handoff.rs`).

pub mod handoff;
pub mod loader;
pub mod model;
pub mod validate;

pub use handoff::{
    capture, ConfigForm, FileStore, KeyValueStore, MemoryStore, SessionConfig,
};
pub use loader::{default_state_path, load_and_validate, load_from_path, load_or_demo};
pub use model::{AgentConfig, RawScenarioFile, ScenarioFile, TaskConfig};
