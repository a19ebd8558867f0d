// tests/handoff_file_store.rs

use std::fs;

use tempfile::tempdir;

use pmsim::config::handoff::{
    DEFAULT_FILE_NAME, DEFAULT_MAX_STEPS, KEY_MAX_STEPS, KEY_NUM_SIMULATIONS,
};
use pmsim::config::{capture, ConfigForm, FileStore, KeyValueStore, SessionConfig};
use pmsim::errors::SimError;

fn full_form() -> ConfigForm {
    ConfigForm {
        num_simulations: Some("25".into()),
        error_margin: Some("15".into()),
        max_steps: Some("400".into()),
        file_name: Some("Bridge.xml".into()),
    }
}

#[test]
fn round_trip_through_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("session.toml");

    let mut store = FileStore::new(&path);
    capture(&full_form(), &mut store).unwrap();
    assert!(path.exists());

    // A fresh store on the same path sees the saved values.
    let cfg = SessionConfig::load(&FileStore::new(&path)).unwrap();
    assert_eq!(cfg.num_simulations, 25);
    assert_eq!(cfg.error_margin_percent, 15);
    assert_eq!(cfg.max_steps, 400);
    assert_eq!(cfg.file_name, "Bridge.xml");
    assert!((cfg.error_margin() - 0.15).abs() < 1e-12);
}

#[test]
fn missing_field_writes_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.toml");
    let mut store = FileStore::new(&path);

    let mut form = full_form();
    form.max_steps = None;

    match capture(&form, &mut store) {
        Err(SimError::MissingField(field)) => assert_eq!(field, "max_steps"),
        other => panic!("expected MissingField, got {other:?}"),
    }
    assert!(!path.exists());
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().unwrap();
    let cfg = SessionConfig::load(&FileStore::new(dir.path().join("absent.toml"))).unwrap();
    assert_eq!(cfg, SessionConfig::default());
    assert_eq!(cfg.max_steps, DEFAULT_MAX_STEPS);
    assert_eq!(cfg.file_name, DEFAULT_FILE_NAME);
}

#[test]
fn unusable_values_fall_back_per_field() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.toml");
    fs::write(
        &path,
        format!("{KEY_NUM_SIMULATIONS} = \"many\"\n{KEY_MAX_STEPS} = \"0\"\n"),
    )
    .unwrap();

    let store = FileStore::new(&path);
    assert_eq!(store.get(KEY_NUM_SIMULATIONS).unwrap().as_deref(), Some("many"));

    let cfg = SessionConfig::load(&store).unwrap();
    assert_eq!(cfg.num_simulations, 10);
    assert_eq!(cfg.max_steps, DEFAULT_MAX_STEPS);
}

#[test]
fn corrupt_file_is_a_toml_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.toml");
    fs::write(&path, "not = [valid").unwrap();

    let err = SessionConfig::load(&FileStore::new(&path)).unwrap_err();
    assert!(matches!(err, SimError::TomlError(_)));
}
