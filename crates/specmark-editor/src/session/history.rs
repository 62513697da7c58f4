//! Undo/redo and the single commit path for the session.

use tracing::debug;

use super::EditorSession;
use crate::commands::EditCommand;
use crate::interaction::InteractionState;

impl EditorSession {
    /// Applies `command` to the committed boxes and records it.
    ///
    /// A command that fails leaves the collection as it was and nothing is
    /// recorded.
    pub(crate) fn commit(&mut self, command: EditCommand) -> bool {
        let snapshot = self.boxes.clone();
        if let Err(e) = command.apply(&mut self.boxes) {
            debug!("Rejected {}: {}", command.name(), e);
            self.boxes = snapshot;
            return false;
        }
        debug!("Committed {} ({} boxes)", command.name(), self.boxes.len());
        self.history.push(command);
        self.selection.retain_valid(self.boxes.len());
        true
    }

    /// Reverts the last commit. Any gesture in progress is discarded first.
    pub fn undo(&mut self) -> bool {
        self.interaction = InteractionState::Idle;
        match self.history.undo(&mut self.boxes) {
            Ok(Some(_)) => {
                self.selection.retain_valid(self.boxes.len());
                true
            }
            Ok(None) => false,
            Err(e) => {
                debug!("Undo failed: {}", e);
                false
            }
        }
    }

    /// Re-applies the last undone commit.
    pub fn redo(&mut self) -> bool {
        self.interaction = InteractionState::Idle;
        match self.history.redo(&mut self.boxes) {
            Ok(Some(_)) => {
                self.selection.retain_valid(self.boxes.len());
                true
            }
            Ok(None) => false,
            Err(e) => {
                debug!("Redo failed: {}", e);
                false
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}
