//! Loading exported characters from disk and writing artifacts back.

use pf2e_core::testing::{sample_character_json, sample_record};
use pf2e_core::{load_record, parse_record, write_artifact, CharacterSheet, PersistError, Save};
use std::fs;
use tempfile::TempDir;

fn write_json(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write fixture");
    path
}

#[test]
fn test_load_sample_export() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = write_json(&dir, "valeros.json", &sample_character_json().to_string());

    let record = load_record(&path).expect("Sample export should load");
    assert_eq!(record.metadata.name.as_deref(), Some("Valeros"));
    assert_eq!(record.level(), 3);
    assert_eq!(record.feats.len(), 4);
    assert_eq!(record.equipment.len(), 3);
}

#[test]
fn test_json_export_matches_rust_sample() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = write_json(&dir, "valeros.json", &sample_character_json().to_string());

    let loaded = CharacterSheet::from_record(&load_record(&path).unwrap());
    let built = CharacterSheet::from_record(&sample_record());
    assert_eq!(loaded, built);
}

#[test]
fn test_loaded_sheet_values() {
    let dir = TempDir::new().unwrap();
    let path = write_json(&dir, "valeros.json", &sample_character_json().to_string());
    let sheet = CharacterSheet::from_record(&load_record(&path).unwrap());

    // STR 18 (+4), expert (+4), level 3
    assert_eq!(sheet.skill("Athletics").unwrap().bonus, 11);
    // WIS 12 (+1), trained (+2), level 3
    assert_eq!(sheet.save(Save::Will).unwrap().bonus, 6);
    assert_eq!(sheet.core.armor_class, 21);
    assert_eq!(sheet.core.class_dc, 19);
    assert_eq!(sheet.core.hit_points.display(), "41 / 47");
    assert_eq!(sheet.equipment[2].bulk, "—");
    assert_eq!(sheet.attacks[1].traits, "deadly d10, range 60 ft");
    assert_eq!(sheet.resistances[0].display(), "fire 2 - from ring");
    assert_eq!(sheet.weaknesses[0].display(), "cold iron 1");
}

#[test]
fn test_non_object_perception_still_loads() {
    let mut export = sample_character_json();
    export["character"]["derived"]["perception"] = serde_json::json!(5);

    let record = parse_record(&export.to_string()).expect("Export should still load");
    let sheet = CharacterSheet::from_record(&record);
    // No modifier, rank from the proficiencies block.
    assert_eq!(sheet.core.perception.display(), "+0 (Expert)");
    assert_eq!(sheet.core.armor_class, 21);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = load_record(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, PersistError::Io(_)));
}

#[test]
fn test_malformed_file_is_json_error() {
    let dir = TempDir::new().unwrap();
    let path = write_json(&dir, "broken.json", "{ \"character\": { \"identity\": ");
    let err = load_record(&path).unwrap_err();
    assert!(matches!(err, PersistError::Json(_)));
}

#[test]
fn test_write_artifact_replaces_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sheet.bin");
    fs::write(&path, b"old contents that are longer").unwrap();

    write_artifact(&path, b"new").expect("Write should succeed");
    assert_eq!(fs::read(&path).unwrap(), b"new");

    // No temporary files left behind.
    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_write_artifact_into_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("sheet.bin");
    let err = write_artifact(&path, b"data").unwrap_err();
    assert!(matches!(err, PersistError::Io(_)));
    assert!(!path.exists());
}
