//! Turns pointer events into stroke lifecycle calls.

use crate::surface::Surface;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    /// The platform abandoned the gesture (e.g. the touch was stolen).
    Cancel,
}

/// Gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Drawing,
}

/// Two-state machine that drives a [`Surface`]'s begin/extend/commit calls.
///
/// Events that make no sense in the current state (a move or up while idle,
/// a second down while drawing) are dropped.
#[derive(Debug, Clone, Default)]
pub struct GestureController {
    state: GestureState,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.state == GestureState::Drawing
    }

    /// Feed one event. Returns true if it changed the surface.
    pub fn handle(&mut self, surface: &mut Surface, event: PointerEvent) -> bool {
        match (self.state, event) {
            (GestureState::Idle, PointerEvent::Down { position }) => {
                if surface.is_drawing() {
                    // Someone else left a stroke open; start clean.
                    surface.cancel_stroke();
                }
                let style = surface.default_style();
                match surface.begin_stroke(position, style) {
                    Ok(()) => {
                        self.state = GestureState::Drawing;
                        true
                    }
                    Err(e) => {
                        log::warn!("Pointer down rejected: {e}");
                        false
                    }
                }
            }
            (GestureState::Drawing, PointerEvent::Move { position }) => {
                surface.extend_stroke(position)
            }
            (GestureState::Drawing, PointerEvent::Up { .. }) => {
                self.state = GestureState::Idle;
                surface.commit_stroke()
            }
            (GestureState::Drawing, PointerEvent::Cancel) => {
                self.state = GestureState::Idle;
                surface.cancel_stroke()
            }
            (state, event) => {
                log::debug!("Ignoring {event:?} while {state:?}");
                false
            }
        }
    }

    /// Convenience for a pointer down at `point`.
    pub fn pointer_down(&mut self, surface: &mut Surface, point: Point) -> bool {
        self.handle(surface, PointerEvent::Down { position: point })
    }

    /// Convenience for a pointer move to `point`.
    pub fn pointer_move(&mut self, surface: &mut Surface, point: Point) -> bool {
        self.handle(surface, PointerEvent::Move { position: point })
    }

    /// Convenience for a pointer up at `point`.
    pub fn pointer_up(&mut self, surface: &mut Surface, point: Point) -> bool {
        self.handle(surface, PointerEvent::Up { position: point })
    }
}
