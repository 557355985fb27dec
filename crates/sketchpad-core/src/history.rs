//! Committed strokes and the redo buffer.

use crate::stroke::Stroke;
use serde::{Deserialize, Serialize};

/// What happens to the redo buffer when the board changes for reasons other
/// than undo/redo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedoPolicy {
    /// Committing a stroke or clearing the board leaves the redo buffer alone.
    #[default]
    Retain,
    /// Committing a stroke or clearing the board empties the redo buffer.
    DiscardOnChange,
}

/// Ordered committed strokes plus a LIFO redo buffer.
#[derive(Debug, Clone, Default)]
pub struct HistoryStack {
    /// Strokes in drawing order, oldest first.
    committed: Vec<Stroke>,
    /// Strokes removed by undo, most recent last.
    redo_buffer: Vec<Stroke>,
    policy: RedoPolicy,
}

impl HistoryStack {
    /// Create an empty history with the default redo policy.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: RedoPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> RedoPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: RedoPolicy) {
        self.policy = policy;
    }

    /// Append a stroke to the committed list.
    /// Returns false (and keeps the history unchanged) for an empty stroke.
    pub fn commit(&mut self, stroke: Stroke) -> bool {
        if stroke.is_empty() {
            log::debug!("Ignoring commit of empty stroke");
            return false;
        }

        self.committed.push(stroke);
        if self.policy == RedoPolicy::DiscardOnChange {
            self.redo_buffer.clear();
        }
        log::debug!(
            "Committed stroke ({} committed, {} redoable)",
            self.committed.len(),
            self.redo_buffer.len()
        );
        true
    }

    /// Move the most recent committed stroke to the redo buffer.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        if let Some(stroke) = self.committed.pop() {
            self.redo_buffer.push(stroke);
            true
        } else {
            false
        }
    }

    /// Move the most recently undone stroke back onto the committed list.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        if let Some(stroke) = self.redo_buffer.pop() {
            self.committed.push(stroke);
            true
        } else {
            false
        }
    }

    /// Empty the committed list. The redo buffer is kept unless the policy
    /// says otherwise.
    pub fn clear(&mut self) {
        self.committed.clear();
        if self.policy == RedoPolicy::DiscardOnChange {
            self.redo_buffer.clear();
        }
    }

    pub fn committed(&self) -> &[Stroke] {
        &self.committed
    }

    pub fn redo_buffer(&self) -> &[Stroke] {
        &self.redo_buffer
    }

    /// Number of committed strokes.
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    /// Number of strokes waiting in the redo buffer.
    pub fn redo_len(&self) -> usize {
        self.redo_buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_buffer.is_empty()
    }
}
