//! Reading character exports and writing finished sheets.

use crate::record::{CharacterFile, CharacterRecord};
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors from loading a record or writing an artifact.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid character file: expected a JSON object, found {found}")]
    InvalidFormat { found: &'static str },
}

/// Load a character from an exported JSON file.
pub fn load_record(path: impl AsRef<Path>) -> Result<CharacterRecord, PersistError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let record = parse_record(&content)?;
    log::info!("Loaded character record from {}", path.display());
    Ok(record)
}

/// Parse a character export.
///
/// Accepts the `{"character": {...}}` envelope as well as a bare record.
pub fn parse_record(content: &str) -> Result<CharacterRecord, PersistError> {
    let value: Value = serde_json::from_str(content)?;

    if !value.is_object() {
        return Err(PersistError::InvalidFormat {
            found: json_kind(&value),
        });
    }

    if value.get("character").is_some() {
        let file: CharacterFile = serde_json::from_value(value)?;
        Ok(file.character)
    } else {
        Ok(serde_json::from_value(value)?)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Write a finished artifact.
///
/// The bytes go to a temporary file next to `path` which is then renamed
/// over it, so a failed write never leaves a truncated sheet behind.
pub fn write_artifact(path: impl AsRef<Path>, bytes: &[u8]) -> Result<(), PersistError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    log::info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
