//! A drawing session: one surface, its gesture controller and a save target.

use crate::AppResult;
use crate::config::AppConfig;
use crate::script::Action;
use crate::storage::ImageSaver;
use sketchpad_core::{GestureController, SerializableColor, Surface};
use sketchpad_render::{ExportRaster, encode_png, load_image};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub struct App {
    config: AppConfig,
    surface: Surface,
    gestures: GestureController,
    saver: ImageSaver,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self::with_start_time(config, SystemTime::now())
    }

    /// Create a session whose save file is named after `started`.
    pub fn with_start_time(config: AppConfig, started: SystemTime) -> Self {
        let surface = Surface::with_config(config.surface.clone());
        let saver = ImageSaver::new(config.resolved_output_dir(), started);
        log::info!(
            "New {}x{} surface, saving to {}",
            surface.width(),
            surface.height(),
            saver.path().display()
        );
        Self {
            config,
            surface,
            gestures: GestureController::new(),
            saver,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    pub fn gestures(&self) -> &GestureController {
        &self.gestures
    }

    pub fn save_path(&self) -> &Path {
        self.saver.path()
    }

    /// Decode an image file and make it the background.
    ///
    /// On failure the surface is left untouched.
    pub fn load_background(&mut self, path: &Path) -> AppResult<()> {
        let raster = load_image(path)?;
        self.surface.import_background(raster);
        Ok(())
    }

    /// Apply one scripted action.
    pub fn apply(&mut self, action: &Action) -> AppResult<()> {
        if let Some(event) = action.pointer_event() {
            self.gestures.handle(&mut self.surface, event);
            return Ok(());
        }

        match action {
            Action::Undo => {
                self.surface.undo();
            }
            Action::Redo => {
                self.surface.redo();
            }
            Action::Clear => self.surface.clear_all(),
            Action::Color { color } => self.surface.set_brush_color(*color),
            Action::Size { size } => self.surface.set_brush_size(*size),
            Action::Alpha { alpha } => self.surface.set_brush_alpha(*alpha),
            Action::Erase { color } => match color {
                Some(color) => self.surface.erase_with(*color),
                None => self.surface.erase(),
            },
            Action::Background { path } => self.load_background(path)?,
            Action::Save => {
                self.save()?;
            }
            Action::Down { .. } | Action::Move { .. } | Action::Up { .. } | Action::Cancel => {}
        }
        Ok(())
    }

    /// Apply every action in order, stopping at the first error.
    pub fn run_script(&mut self, actions: &[Action]) -> AppResult<()> {
        for (index, action) in actions.iter().enumerate() {
            self.apply(action).inspect_err(|e| {
                log::error!("Action {index} ({action:?}) failed: {e}");
            })?;
        }
        Ok(())
    }

    /// Flatten the surface and write it as PNG to this session's file.
    pub fn save(&self) -> AppResult<PathBuf> {
        let clear_color = self
            .config
            .clear_color
            .unwrap_or_else(SerializableColor::transparent);
        let raster = self.surface.export_raster_with(clear_color)?;
        let png_data = encode_png(&raster)?;
        let path = self.saver.save(&png_data)?;
        Ok(path.to_path_buf())
    }
}
