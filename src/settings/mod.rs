// Persisted application settings
pub mod pointer;
pub mod prompt;

use log::{info, warn};
use serde_json::{Map, Value};
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use pointer::{default_pointer_path, read_pointer, write_pointer};
pub use prompt::prompt_settings;

/// Keys whose values are masked when settings are displayed.
const SECRET_KEYS: [&str; 4] = ["password", "pwd", "client_id", "token"];

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to decode JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid settings: {0}")]
    InvalidValue(String),
}

impl SettingsError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        SettingsError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn json(path: &Path, source: serde_json::Error) -> Self {
        SettingsError::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Where the settings handed back by [`open_or_create`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsSource {
    Loaded(PathBuf),
    Saved(PathBuf),
    /// Prompted for, but no destination was chosen.
    Unsaved,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServerSettings {
    values: Map<String, Value>,
}

impl ServerSettings {
    pub fn from_map(values: Map<String, Value>) -> Self {
        ServerSettings { values }
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|e| SettingsError::io(path, e))?;
        match serde_json::from_str::<Value>(&content).map_err(|e| SettingsError::json(path, e))? {
            Value::Object(values) => Ok(ServerSettings { values }),
            other => Err(SettingsError::InvalidValue(format!(
                "{} holds {} instead of an object",
                path.display(),
                json_kind(&other)
            ))),
        }
    }

    /// Write the settings to `destination`.
    ///
    /// `None` means the user cancelled choosing a destination; nothing is
    /// written and `Ok(None)` is returned.
    pub fn save(&self, destination: Option<&Path>) -> Result<Option<PathBuf>, SettingsError> {
        let Some(path) = destination else {
            warn!("settings save cancelled, nothing persisted");
            return Ok(None);
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SettingsError::io(parent, e))?;
        }
        let content = serde_json::to_string_pretty(&self.values).map_err(|e| SettingsError::json(path, e))?;
        fs::write(path, content).map_err(|e| SettingsError::io(path, e))?;
        info!("settings saved to {}", path.display());
        Ok(Some(path.to_path_buf()))
    }

    pub fn client_id(&self) -> Option<&str> {
        self.values.get("client_id").and_then(Value::as_str)
    }

    pub fn permissions(&self) -> Option<i64> {
        self.values.get("permissions").and_then(Value::as_i64)
    }

    pub fn token(&self) -> Option<&str> {
        self.values.get("token").and_then(Value::as_str)
    }

    /// Render every key with secrets replaced by `*` of equal length.
    pub fn masked(&self) -> String {
        let mut out = String::from("{\n");
        for (key, value) in &self.values {
            let shown = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            if SECRET_KEYS.contains(&key.as_str()) {
                out.push_str(&format!("\t{}:\t{}\n", key, "*".repeat(shown.chars().count())));
            } else {
                out.push_str(&format!("\t{}:\t{}\n", key, shown));
            }
        }
        out.push('}');
        out
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

/// Where new settings are written when no destination is given.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("host-inventory").join("settings.json"))
}

/// Load settings through the pointer file, or prompt for new ones.
///
/// New settings are prompted for when `new` is set, when the pointer does
/// not lead to a settings file, or when that file cannot be decoded. Freshly
/// prompted settings are saved to `destination` and the pointer is updated
/// only if the save happened.
pub fn open_or_create<R: BufRead, W: Write>(
    pointer: &Path,
    destination: Option<&Path>,
    new: bool,
    input: &mut R,
    output: &mut W,
) -> Result<(ServerSettings, SettingsSource), SettingsError> {
    if !new {
        if let Some(path) = read_pointer(pointer)? {
            match ServerSettings::load(&path) {
                Ok(settings) => return Ok((settings, SettingsSource::Loaded(path))),
                Err(SettingsError::Json { path, source }) => {
                    warn!("unable to decode {}: {}, requesting input", path.display(), source);
                }
                Err(e) => return Err(e),
            }
        } else {
            warn!("no settings file found, requesting input");
        }
    } else {
        info!("creating new settings");
    }

    let settings = prompt_settings(input, output)?;
    match settings.save(destination)? {
        Some(saved) => {
            write_pointer(pointer, &saved)?;
            Ok((settings, SettingsSource::Saved(saved)))
        }
        None => Ok((settings, SettingsSource::Unsaved)),
    }
}
