//! Scripted input: a JSON list of pointer events and brush commands.
//!
//! ```json
//! [
//!   { "action": "color", "color": { "r": 0, "g": 0, "b": 255, "a": 255 } },
//!   { "action": "down", "x": 10, "y": 10 },
//!   { "action": "move", "x": 90, "y": 90 },
//!   { "action": "up" },
//!   { "action": "save" }
//! ]
//! ```

use crate::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use sketchpad_core::{Point, PointerEvent, SerializableColor};
use std::path::{Path, PathBuf};

/// One step of a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up {
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
    },
    Cancel,
    Undo,
    Redo,
    Clear,
    Color { color: SerializableColor },
    Size { size: f64 },
    Alpha { alpha: i32 },
    /// Switch to the eraser. Paints white unless `color` is given.
    Erase {
        #[serde(default)]
        color: Option<SerializableColor>,
    },
    /// Replace the background with a decoded image file.
    Background { path: PathBuf },
    Save,
}

impl Action {
    /// The pointer event this action stands for, if any.
    pub fn pointer_event(&self) -> Option<PointerEvent> {
        match *self {
            Action::Down { x, y } => Some(PointerEvent::Down {
                position: Point::new(x, y),
            }),
            Action::Move { x, y } => Some(PointerEvent::Move {
                position: Point::new(x, y),
            }),
            Action::Up { x, y } => Some(PointerEvent::Up {
                position: Point::new(x, y),
            }),
            Action::Cancel => Some(PointerEvent::Cancel),
            _ => None,
        }
    }
}

pub fn parse_script(json: &str) -> Result<Vec<Action>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Read a script file.
pub fn load_script(path: &Path) -> AppResult<Vec<Action>> {
    let json = std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let actions = parse_script(&json).map_err(|source| AppError::Script {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Loaded {} actions from {}", actions.len(), path.display());
    Ok(actions)
}
