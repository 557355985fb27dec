//! Sketchpad Application
//!
//! A command line shell around the drawing surface: it loads configuration,
//! replays pointer scripts through the gesture controller and saves the
//! flattened drawing as a timestamped PNG.

mod app;
mod cli;
mod config;
mod script;
mod storage;

pub use app::App;
pub use cli::Cli;
pub use config::AppConfig;
pub use script::{Action, load_script, parse_script};
pub use storage::{ImageSaver, timestamp_filename};

use sketchpad_render::{ExportError, ImportError};
use std::path::PathBuf;
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid script {}: {source}", .path.display())]
    Script {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Background import failed: {0}")]
    Import(#[from] ImportError),
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;
