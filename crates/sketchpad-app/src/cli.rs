//! Command line entry point.

use crate::config::AppConfig;
use crate::script::{Action, load_script};
use crate::{App, AppResult};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sketchpad", about = "Replay a drawing script and save the result as PNG")]
pub struct Cli {
    /// JSON configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Image to draw over. The surface takes its size.
    #[arg(long)]
    pub background: Option<PathBuf>,

    /// JSON list of actions to replay.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Directory for the saved PNG.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,
}

impl Cli {
    /// Load the config file, if any, and apply command line overrides.
    pub fn app_config(&self) -> AppResult<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        if let Some(dir) = &self.out_dir {
            config.output_dir = Some(dir.clone());
        }
        if let Some(width) = self.width {
            config.surface.width = width;
        }
        if let Some(height) = self.height {
            config.surface.height = height;
        }
        Ok(config)
    }

    /// Build the session, replay the script and save.
    ///
    /// The drawing is saved at the end unless the script already ends with a save.
    pub fn run(&self) -> AppResult<PathBuf> {
        let mut app = App::new(self.app_config()?);

        if let Some(path) = &self.background {
            app.load_background(path)?;
        }

        let actions = match &self.script {
            Some(path) => load_script(path)?,
            None => Vec::new(),
        };
        app.run_script(&actions)?;

        if !matches!(actions.last(), Some(Action::Save)) {
            app.save()?;
        }
        Ok(app.save_path().to_path_buf())
    }
}
