//! Configuration management for the tag list.
//!
//! A [`Config`] bundles the three groups of knobs the widget exposes:
//! colors ([`Appearance`]), sizes ([`Metrics`]) and mode flags
//! ([`Behavior`]). It can be loaded from a TOML file; every field is
//! optional in the file and falls back to its default.

mod appearance;
mod settings;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use appearance::Appearance;
pub use settings::{Behavior, Font, Metrics};

/// Environment variable that overrides the configuration file location.
pub const CONFIG_PATH_ENV: &str = "TAGLIST_CONFIG";

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// Failed to read the configuration file.
    #[error("failed to read configuration file: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the configuration file.
    #[error("failed to write configuration file: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to create the configuration directory.
    #[error("failed to create configuration directory: {0}")]
    CreateDirError(#[source] std::io::Error),

    /// The configuration file is not valid TOML for [`Config`].
    #[error("invalid configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// A value is outside its allowed range.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Complete tag list configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Colors and decoration.
    pub appearance: Appearance,
    /// Font, paddings, margins and size limits.
    pub metrics: Metrics,
    /// Mode flags.
    pub behavior: Behavior,
}

impl Config {
    /// Configuration sized for a terminal where one point is one cell.
    pub fn terminal() -> Self {
        Self {
            metrics: Metrics::terminal(),
            ..Self::default()
        }
    }

    /// Default location of the configuration file.
    ///
    /// `$TAGLIST_CONFIG` wins when set, otherwise
    /// `<config dir>/taglist/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("taglist").join("config.toml"))
    }

    /// Load the configuration from the default location.
    ///
    /// A missing file yields the terminal defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or validated.
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::terminal());
        }
        Self::load_from(&path)
    }

    /// Load and validate the configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config = Self::from_toml(&contents)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse and validate a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or fails validation.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::CreateDirError)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(ConfigError::WriteError)?;
        debug!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Validate all sections.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` naming the first bad value.
    pub fn validate(&self) -> Result<()> {
        self.metrics.validate()
    }
}
