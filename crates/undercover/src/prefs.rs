//! File-backed preferences: saved player names, word list locator and the
//! last first speaker.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use undercover_engine::LastStarterStore;

/// Persisted preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// First speaker of the previous match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_starter: Option<String>,
    /// Names from the last setup, in table order.
    #[serde(default)]
    pub player_names: Vec<String>,
    /// Custom word list location, empty for the built-in list.
    #[serde(default)]
    pub word_locator: String,
}

/// [`Preferences`] bound to a TOML file.
///
/// Changes stay in memory until [`FilePreferences::save`] is called.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    prefs: Preferences,
}

impl FilePreferences {
    /// Opens the file at `path`. A missing file reads as empty preferences.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PrefsError> {
        let path = path.as_ref().to_path_buf();
        let prefs = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| PrefsError::new(format!("Failed to read preferences: {}", e)))?;
            toml::from_str(&content)
                .map_err(|e| PrefsError::new(format!("Failed to parse preferences: {}", e)))?
        } else {
            debug!("No preferences file yet");
            Preferences::default()
        };
        Ok(Self { path, prefs })
    }

    /// Writes the preferences back, creating the parent directory if needed.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn save(&self) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| PrefsError::new(format!("Failed to create {}: {}", parent.display(), e)))?;
        }
        let content = toml::to_string(&self.prefs)
            .map_err(|e| PrefsError::new(format!("Failed to encode preferences: {}", e)))?;
        std::fs::write(&self.path, content)
            .map_err(|e| PrefsError::new(format!("Failed to write preferences: {}", e)))?;
        info!("Preferences saved");
        Ok(())
    }

    /// Current values.
    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    /// Saved player names.
    pub fn player_names(&self) -> &[String] {
        &self.prefs.player_names
    }

    /// Replaces the saved player names.
    pub fn set_player_names(&mut self, names: Vec<String>) {
        self.prefs.player_names = names;
    }

    /// Saved word list locator.
    pub fn word_locator(&self) -> &str {
        &self.prefs.word_locator
    }

    /// Replaces the saved word list locator.
    pub fn set_word_locator(&mut self, locator: impl Into<String>) {
        self.prefs.word_locator = locator.into();
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LastStarterStore for FilePreferences {
    fn last_starter(&self) -> Option<String> {
        self.prefs.last_starter.clone()
    }

    fn set_last_starter(&mut self, name: &str) {
        self.prefs.last_starter = Some(name.to_string());
    }
}

/// Preferences error.
#[derive(Debug, Clone, Display, Error)]
#[display("Preferences error: {} at {}:{}", message, file, line)]
pub struct PrefsError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl PrefsError {
    /// Creates a new preferences error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = FilePreferences::open(dir.path().join("prefs.toml")).unwrap();
        assert_eq!(prefs.preferences(), &Preferences::default());
        assert_eq!(prefs.last_starter(), None);
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.toml");

        let mut prefs = FilePreferences::open(&path).unwrap();
        prefs.set_player_names(vec!["Ana".into(), "Bo".into()]);
        prefs.set_word_locator("https://example.org/words.txt");
        prefs.set_last_starter("Bo");
        prefs.save().unwrap();

        let reopened = FilePreferences::open(&path).unwrap();
        assert_eq!(reopened.player_names(), ["Ana", "Bo"]);
        assert_eq!(reopened.word_locator(), "https://example.org/words.txt");
        assert_eq!(reopened.last_starter().as_deref(), Some("Bo"));
    }

    #[test]
    fn test_corrupt_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "player_names = 3").unwrap();
        assert!(FilePreferences::open(&path).is_err());
    }
}
