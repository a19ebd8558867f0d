// src/config/handoff.rs

//! Configuration capture and the key/value handoff between commands.
//!
//! `configure` writes four string entries; `dashboard` and `report` read
//! them back through [`SessionConfig::load`], falling back to defaults for
//! anything absent or unusable.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::errors::{Result, SimError};

pub const KEY_NUM_SIMULATIONS: &str = "simConfig_numSimulations";
pub const KEY_ERROR_MARGIN: &str = "simConfig_errorMargin";
pub const KEY_MAX_STEPS: &str = "simConfig_maxSteps";
pub const KEY_FILE_NAME: &str = "simConfig_fileName";

pub const DEFAULT_NUM_SIMULATIONS: u32 = 10;
pub const DEFAULT_ERROR_MARGIN_PERCENT: u32 = 10;
pub const DEFAULT_MAX_STEPS: u32 = 200;
pub const DEFAULT_FILE_NAME: &str = "Software Development Plan.xml";

/// String key/value storage shared between commands.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write all entries in one go.
    fn set_all(&mut self, entries: &[(&str, String)]) -> Result<()>;
}

/// Volatile store, used by tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_all(&mut self, entries: &[(&str, String)]) -> Result<()> {
        for (key, value) in entries {
            self.entries.insert(key.to_string(), value.clone());
        }
        Ok(())
    }
}

/// Store backed by a flat TOML table of strings.
///
/// A missing file reads as an empty store. Writes create the parent
/// directory when needed.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&contents)?)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.get(key).cloned())
    }

    fn set_all(&mut self, entries: &[(&str, String)]) -> Result<()> {
        let mut current = self.read_entries()?;
        for (key, value) in entries {
            current.insert(key.to_string(), value.clone());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, toml::to_string(&current)?)?;
        debug!(path = %self.path.display(), "handoff store written");
        Ok(())
    }
}

/// Raw operator input, one optional text value per field.
///
/// `None` means the field was not supplied at all.
#[derive(Debug, Clone, Default)]
pub struct ConfigForm {
    pub num_simulations: Option<String>,
    pub error_margin: Option<String>,
    pub max_steps: Option<String>,
    pub file_name: Option<String>,
}

/// Persist the form into `store`.
///
/// Every field is required; if one is missing nothing is written and a
/// [`SimError::MissingField`] names the first absent field.
pub fn capture(form: &ConfigForm, store: &mut dyn KeyValueStore) -> Result<()> {
    let fields = [
        ("num_simulations", KEY_NUM_SIMULATIONS, &form.num_simulations),
        ("error_margin", KEY_ERROR_MARGIN, &form.error_margin),
        ("max_steps", KEY_MAX_STEPS, &form.max_steps),
        ("file_name", KEY_FILE_NAME, &form.file_name),
    ];

    let mut entries = Vec::with_capacity(fields.len());
    for (label, key, value) in fields {
        match value {
            Some(v) => entries.push((key, v.trim().to_string())),
            None => return Err(SimError::MissingField(label.to_string())),
        }
    }

    store.set_all(&entries)?;
    info!(
        num_simulations = %entries[0].1,
        error_margin = %entries[1].1,
        max_steps = %entries[2].1,
        file_name = %entries[3].1,
        "configuration saved"
    );
    Ok(())
}

/// The four scalars as seen by the dashboard and the report.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub num_simulations: u32,
    pub error_margin_percent: u32,
    pub max_steps: u32,
    pub file_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            num_simulations: DEFAULT_NUM_SIMULATIONS,
            error_margin_percent: DEFAULT_ERROR_MARGIN_PERCENT,
            max_steps: DEFAULT_MAX_STEPS,
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl SessionConfig {
    /// Read the handoff entries, applying defaults per field.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self> {
        let defaults = Self::default();

        let num_simulations = int_or_default(
            store.get(KEY_NUM_SIMULATIONS)?,
            KEY_NUM_SIMULATIONS,
            defaults.num_simulations,
        );
        let error_margin_percent = int_or_default(
            store.get(KEY_ERROR_MARGIN)?,
            KEY_ERROR_MARGIN,
            defaults.error_margin_percent,
        );
        let max_steps = int_or_default(store.get(KEY_MAX_STEPS)?, KEY_MAX_STEPS, defaults.max_steps);
        let file_name = store
            .get(KEY_FILE_NAME)?
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.file_name);

        Ok(Self {
            num_simulations,
            error_margin_percent: error_margin_percent.min(100),
            max_steps,
            file_name,
        })
    }

    /// Error margin as a fraction in `[0, 1]`.
    pub fn error_margin(&self) -> f64 {
        f64::from(self.error_margin_percent.min(100)) / 100.0
    }
}

fn int_or_default(raw: Option<String>, key: &str, default: u32) -> u32 {
    match raw.as_deref().and_then(parse_leading_int) {
        Some(v) if v > 0 => v,
        Some(_) | None => {
            if raw.is_some() {
                warn!(key, value = ?raw, default, "unusable handoff value; using default");
            }
            default
        }
    }
}

/// Parse the leading run of ASCII digits, ignoring surrounding whitespace
/// and anything after the digits ("12 steps" -> 12).
fn parse_leading_int(s: &str) -> Option<u32> {
    let digits: String = s.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_yields_defaults() {
        let store = MemoryStore::new();
        let cfg = SessionConfig::load(&store).unwrap();
        assert_eq!(cfg, SessionConfig::default());
        assert!((cfg.error_margin() - 0.10).abs() < 1e-12);
    }

    #[test]
    fn zero_and_garbage_fall_back_to_defaults() {
        let mut store = MemoryStore::new();
        store
            .set_all(&[
                (KEY_MAX_STEPS, "0".to_string()),
                (KEY_NUM_SIMULATIONS, "lots".to_string()),
                (KEY_ERROR_MARGIN, "25%".to_string()),
            ])
            .unwrap();

        let cfg = SessionConfig::load(&store).unwrap();
        assert_eq!(cfg.max_steps, DEFAULT_MAX_STEPS);
        assert_eq!(cfg.num_simulations, DEFAULT_NUM_SIMULATIONS);
        assert_eq!(cfg.error_margin_percent, 25);
    }

    #[test]
    fn error_margin_is_capped_at_one_hundred_percent() {
        let mut store = MemoryStore::new();
        store.set_all(&[(KEY_ERROR_MARGIN, "250".to_string())]).unwrap();
        let cfg = SessionConfig::load(&store).unwrap();
        assert_eq!(cfg.error_margin_percent, 100);
        assert_eq!(cfg.error_margin(), 1.0);
    }

    #[test]
    fn capture_with_missing_field_writes_nothing() {
        let mut store = MemoryStore::new();
        let form = ConfigForm {
            num_simulations: Some("5".into()),
            error_margin: Some("10".into()),
            max_steps: None,
            file_name: Some("plan.xml".into()),
        };

        match capture(&form, &mut store) {
            Err(SimError::MissingField(field)) => assert_eq!(field, "max_steps"),
            other => panic!("expected MissingField, got {other:?}"),
        }
        assert_eq!(store.get(KEY_NUM_SIMULATIONS).unwrap(), None);
    }
}
