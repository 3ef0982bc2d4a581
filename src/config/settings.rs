use super::ConfigError;
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Tunables for the external programs. Every field has a default, so a
/// settings file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub decoder: DecoderSettings,
    pub mixer: MixerSettings,
    pub library: LibrarySettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderSettings {
    pub program: String,
    pub args: Vec<String>,
    /// How long a quit waits for the decoder to go away before killing it.
    pub stop_grace_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixerSettings {
    pub program: String,
    /// Tried in order until one succeeds.
    pub controls: Vec<String>,
    pub step_percent: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub banner_delay_ms: u64,
}

impl Default for DecoderSettings {
    fn default() -> Self {
        Self {
            program: "mpg123".to_string(),
            args: vec!["-q".to_string()],
            stop_grace_ms: 1000,
        }
    }
}

impl Default for MixerSettings {
    fn default() -> Self {
        Self {
            program: "amixer".to_string(),
            controls: vec!["Master".to_string(), "PCM".to_string()],
            step_percent: 5,
        }
    }
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self { extension: "mp3".to_string() }
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { banner_delay_ms: 1000 }
    }
}

impl Settings {
    /// Loads `path`, or the per-user default location when `path` is `None`.
    /// A missing file falls back to defaults; nothing is written back.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            return Ok(Self::default());
        };

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        let settings = Self::from_toml(&content).map_err(|source| ConfigError::Settings {
            path: path.clone(),
            source,
        })?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn default_path() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join("mpplay").join("settings.toml"))
    }
}
