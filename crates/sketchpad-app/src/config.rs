//! Application configuration.

use crate::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use sketchpad_core::{SerializableColor, SurfaceConfig};
use std::path::{Path, PathBuf};

/// Settings for a Sketchpad session, usually read from a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Drawing surface settings.
    pub surface: SurfaceConfig,
    /// Where saved drawings go. Defaults to the user's Downloads directory.
    pub output_dir: Option<PathBuf>,
    /// Color under the background when exporting. Transparent if unset.
    pub clear_color: Option<SerializableColor>,
}

impl AppConfig {
    /// Read a configuration file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| AppError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Output directory to use: the configured one, else Downloads, else the
    /// current directory.
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
