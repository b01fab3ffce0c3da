use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::SettingsError;

const POINTER_FILE: &str = "settings_path.json";

#[derive(Debug, Serialize, Deserialize)]
struct SettingsPointer {
    path: Option<PathBuf>,
}

/// `settings_path.json` in the current working directory.
pub fn default_pointer_path() -> Result<PathBuf, SettingsError> {
    let cwd = std::env::current_dir().map_err(|e| SettingsError::io(Path::new("."), e))?;
    Ok(cwd.join(POINTER_FILE))
}

/// Read the settings location recorded in the pointer file.
///
/// A missing pointer file, a missing `path` key, or a path that is not an
/// existing file all yield `None`. Malformed JSON is an error.
pub fn read_pointer(pointer: &Path) -> Result<Option<PathBuf>, SettingsError> {
    if pointer.is_dir() {
        warn!("pointer {} is a directory, not a file", pointer.display());
        return Ok(None);
    }
    let content = match fs::read_to_string(pointer) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("pointer file {} does not exist", pointer.display());
            return Ok(None);
        }
        Err(e) => return Err(SettingsError::io(pointer, e)),
    };

    let record: SettingsPointer =
        serde_json::from_str(&content).map_err(|e| SettingsError::json(pointer, e))?;
    let Some(path) = record.path else {
        warn!("key 'path' not found in {}", pointer.display());
        return Ok(None);
    };
    if !path.is_file() {
        warn!("settings path {} is not a file", path.display());
        return Ok(None);
    }
    Ok(Some(path))
}

pub fn write_pointer(pointer: &Path, settings_path: &Path) -> Result<(), SettingsError> {
    let record = SettingsPointer {
        path: Some(settings_path.to_path_buf()),
    };
    let content = serde_json::to_string_pretty(&record).map_err(|e| SettingsError::json(pointer, e))?;
    fs::write(pointer, content).map_err(|e| SettingsError::io(pointer, e))
}
