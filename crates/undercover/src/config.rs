//! Application configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use undercover_engine::{RoleCounts, SpeakingPolicy};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "undercover.toml";

/// Settings for the terminal companion.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where saved names, word locator and last starter live.
    #[serde(default = "default_preferences_path")]
    preferences_path: PathBuf,

    /// Undercover players per match (0 = random).
    #[serde(default)]
    undercover_count: usize,

    /// Mr. White players per match (0 = random).
    #[serde(default)]
    mr_white_count: usize,

    /// How the speaking order is drawn.
    #[serde(default)]
    speaking_policy: SpeakingPolicy,

    /// Tracing filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

#[instrument]
fn default_preferences_path() -> PathBuf {
    PathBuf::from("undercover_prefs.toml")
}

#[instrument]
fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preferences_path: default_preferences_path(),
            undercover_count: 0,
            mr_white_count: 0,
            speaking_policy: SpeakingPolicy::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(policy = %config.speaking_policy, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, defaults otherwise.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Requested impostor counts, coupled the way the setup sliders are.
    ///
    /// A fixed undercover count with a random Mr. White count deals one
    /// Mr. White; a random undercover count makes both random.
    pub fn role_counts(&self) -> RoleCounts {
        RoleCounts::new(self.undercover_count, self.mr_white_count).coupled()
    }

    /// Overrides the impostor counts where a value is given.
    pub fn with_role_counts(mut self, undercover: Option<usize>, mr_white: Option<usize>) -> Self {
        if let Some(n) = undercover {
            self.undercover_count = n;
        }
        if let Some(n) = mr_white {
            self.mr_white_count = n;
        }
        self
    }

    /// Overrides the preferences path.
    pub fn with_preferences_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.preferences_path = path.into();
        self
    }

    /// Overrides the speaking policy.
    pub fn with_speaking_policy(mut self, policy: SpeakingPolicy) -> Self {
        self.speaking_policy = policy;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
