//! Front-end settings
//!
//! Loads `~/.config/rime-switcher/settings.toml`, which locates the engine's
//! data directories and picks the colour space used for parsed colours.
//! Every field is optional; a missing default file yields built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::ColorSpace;

/// Shared data shipped with the input method bundle.
pub const DEFAULT_SHARED_DATA_DIR: &str = "/Library/Input Methods/Squirrel.app/Contents/SharedSupport";

/// User data dir relative to the home directory.
pub const USER_DATA_SUBDIR: &str = "Library/Rime";

/// Front-end settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Root for user documents and relative image paths
    #[serde(default = "default_user_data_dir")]
    pub user_data_dir: PathBuf,

    /// Root for shipped documents
    #[serde(default = "default_shared_data_dir")]
    pub shared_data_dir: PathBuf,

    /// Colour space attached to parsed colours
    #[serde(default)]
    pub color_space: ColorSpace,
}

fn default_user_data_dir() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(USER_DATA_SUBDIR),
        None => PathBuf::from(USER_DATA_SUBDIR),
    }
}

fn default_shared_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SHARED_DATA_DIR)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_data_dir: default_user_data_dir(),
            shared_data_dir: default_shared_data_dir(),
            color_space: ColorSpace::default(),
        }
    }
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Settings file not found: {0}")]
    NotFound(PathBuf),
}

impl Settings {
    /// Default settings file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config/rime-switcher/settings.toml"))
    }

    /// Load from the default location, falling back to defaults if absent
    pub fn load_default() -> Result<Self, SettingsError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from a specific path
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Err(SettingsError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse settings from a TOML string
    pub fn parse(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Settings rooted at explicit directories, other fields defaulted
    pub fn with_dirs(user_data_dir: impl Into<PathBuf>, shared_data_dir: impl Into<PathBuf>) -> Self {
        Self {
            user_data_dir: user_data_dir.into(),
            shared_data_dir: shared_data_dir.into(),
            color_space: ColorSpace::default(),
        }
    }
}
