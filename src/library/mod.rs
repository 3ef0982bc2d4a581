// Music discovery - one flat directory, one extension
// No recursion and no sorting: files come back in directory order.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("no .{extension} files in {}", .dir.display())]
    NoAudioFiles { dir: PathBuf, extension: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFile {
    pub path: PathBuf,
}

impl AudioFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[derive(Debug, Clone)]
pub struct MusicScanner {
    extension: String,
}

impl MusicScanner {
    pub fn new(extension: impl Into<String>) -> Self {
        Self { extension: extension.into() }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Case-sensitive: `song.MP3` does not match `mp3`.
    pub fn is_audio_file(&self, path: &Path) -> bool {
        path.extension().and_then(|ext| ext.to_str()) == Some(self.extension.as_str())
    }

    pub fn scan_directory(&self, dir: &Path) -> Result<Vec<AudioFile>, LibraryError> {
        if !dir.is_dir() {
            return Err(LibraryError::NotADirectory(dir.to_path_buf()));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                    continue;
                }
            };

            if self.is_audio_file(entry.path()) {
                debug!("Found {}", entry.path().display());
                files.push(AudioFile::new(entry.into_path()));
            }
        }

        if files.is_empty() {
            return Err(LibraryError::NoAudioFiles {
                dir: dir.to_path_buf(),
                extension: self.extension.clone(),
            });
        }

        info!("Found {} .{} files in {}", files.len(), self.extension, dir.display());
        Ok(files)
    }
}

impl Default for MusicScanner {
    fn default() -> Self {
        Self::new("mp3")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_only_exact_extension_top_level() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("one.mp3"), b"x").unwrap();
        fs::write(dir.path().join("two.mp3"), b"x").unwrap();
        fs::write(dir.path().join("loud.MP3"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("deep.mp3"), b"x").unwrap();

        let mut names: Vec<String> = MusicScanner::default()
            .scan_directory(dir.path())
            .unwrap()
            .iter()
            .map(AudioFile::display_name)
            .collect();
        names.sort();

        assert_eq!(names, vec!["one.mp3", "two.mp3"]);
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("cover.jpg"), b"x").unwrap();

        let err = MusicScanner::default().scan_directory(dir.path()).unwrap_err();
        assert!(matches!(err, LibraryError::NoAudioFiles { .. }));
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let err = MusicScanner::default()
            .scan_directory(&dir.path().join("gone"))
            .unwrap_err();
        assert!(matches!(err, LibraryError::NotADirectory(_)));
    }

    #[test]
    fn test_custom_extension() {
        let scanner = MusicScanner::new("ogg");
        assert!(scanner.is_audio_file(Path::new("/a/b.ogg")));
        assert!(!scanner.is_audio_file(Path::new("/a/b.mp3")));
        assert!(!scanner.is_audio_file(Path::new("/a/ogg")));
    }
}
