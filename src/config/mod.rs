// Configuration management for mpplay
// mp.conf holds the music directory and the last language; settings.toml
// (optional) tunes the external commands.

pub mod settings;

pub use settings::Settings;

use crate::locale::Language;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_CONFIG_FILE: &str = "mp.conf";
const LANGUAGE_KEY: &str = "language=";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("invalid settings file {}: {source}", .path.display())]
    Settings { path: PathBuf, source: toml::de::Error },
}

/// Contents of the plain-text `mp.conf` file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub directory: Option<PathBuf>,
    /// Parsed but not applied; the language asked for at startup wins.
    pub language: Option<Language>,
}

impl ConfigFile {
    pub fn parse(content: &str) -> Self {
        let mut config = ConfigFile::default();

        for line in content.lines() {
            let line = line.trim_end_matches('\r');
            if let Some(code) = line.strip_prefix(LANGUAGE_KEY) {
                config.language = Language::from_code(code);
            } else if config.directory.is_none() && !line.is_empty() {
                config.directory = Some(PathBuf::from(line));
            }
        }

        config
    }

    /// A missing file is not an error, it just means nothing is configured yet.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => {
                let config = Self::parse(&content);
                info!("Loaded {} (directory: {:?})", path.display(), config.directory);
                Ok(config)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No config file at {}", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read { path: path.to_path_buf(), source }),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(dir) = self.directory.as_ref().filter(|d| !d.as_os_str().is_empty()) {
            out.push_str(&dir.to_string_lossy());
            out.push('\n');
        }
        let lang = self.language.unwrap_or_default();
        out.push_str(LANGUAGE_KEY);
        out.push_str(lang.code());
        out.push('\n');
        out
    }

    /// Overwrites the file with the directory line followed by the language line.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        fs::write(path, self.render())
            .map_err(|source| ConfigError::Write { path: path.to_path_buf(), source })?;
        info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_first_plain_line_is_directory() {
        let config = ConfigFile::parse("/music/a\n/music/b\nlanguage=pl\n");
        assert_eq!(config.directory, Some(PathBuf::from("/music/a")));
        assert_eq!(config.language, Some(Language::Pl));
    }

    #[test]
    fn test_language_line_first_and_blank_lines() {
        let config = ConfigFile::parse("language=en\n\n/srv/mp3\r\n");
        assert_eq!(config.directory, Some(PathBuf::from("/srv/mp3")));
        assert_eq!(config.language, Some(Language::En));

        let config = ConfigFile::parse("language=xx\n");
        assert_eq!(config.directory, None);
        assert_eq!(config.language, None);
    }

    #[test]
    fn test_missing_file_is_empty_config() {
        let dir = tempdir().unwrap();
        let config = ConfigFile::load(&dir.path().join("mp.conf")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mp.conf");
        let config = ConfigFile {
            directory: Some(PathBuf::from("/home/me/Music")),
            language: Some(Language::Pl),
        };
        config.save(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "/home/me/Music\nlanguage=pl\n");
        assert_eq!(ConfigFile::load(&path).unwrap(), config);
    }

    #[test]
    fn test_empty_directory_writes_only_language() {
        let config = ConfigFile { directory: Some(PathBuf::new()), language: None };
        assert_eq!(config.render(), "language=en\n");
    }
}
