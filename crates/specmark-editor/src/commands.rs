//! Reversible edits to the committed box collection and the undo/redo
//! history that stores them.

use specmark_core::GeometryError;
use tracing::debug;

use crate::model::{BoundingBox, BoxCollection};

/// A committed edit that can be applied and reverted.
///
/// Entries are `(index, box)` pairs. For additions and removals the
/// indices are the positions the boxes occupy while present.
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    AddBoxes {
        entries: Vec<(usize, BoundingBox)>,
    },
    RemoveBoxes {
        entries: Vec<(usize, BoundingBox)>,
    },
    UpdateBoxes {
        before: Vec<(usize, BoundingBox)>,
        after: Vec<(usize, BoundingBox)>,
    },
    Composite {
        name: String,
        commands: Vec<EditCommand>,
    },
}

fn sorted(entries: &[(usize, BoundingBox)]) -> Vec<&(usize, BoundingBox)> {
    let mut v: Vec<_> = entries.iter().collect();
    v.sort_by_key(|(i, _)| *i);
    v
}

fn insert_all(
    boxes: &mut BoxCollection,
    entries: &[(usize, BoundingBox)],
) -> Result<(), GeometryError> {
    for (index, bbox) in sorted(entries) {
        boxes.insert(*index, bbox.clone())?;
    }
    Ok(())
}

fn remove_all(boxes: &mut BoxCollection, entries: &[(usize, BoundingBox)]) {
    for (index, _) in sorted(entries).into_iter().rev() {
        boxes.remove(*index);
    }
}

fn replace_all(
    boxes: &mut BoxCollection,
    entries: &[(usize, BoundingBox)],
) -> Result<(), GeometryError> {
    for (index, bbox) in entries {
        boxes.replace(*index, bbox.clone())?;
    }
    Ok(())
}

impl EditCommand {
    /// Returns the name of the command for display.
    pub fn name(&self) -> &str {
        match self {
            EditCommand::AddBoxes { .. } => "Add Boxes",
            EditCommand::RemoveBoxes { .. } => "Remove Boxes",
            EditCommand::UpdateBoxes { .. } => "Update Boxes",
            EditCommand::Composite { name, .. } => name,
        }
    }

    pub fn apply(&self, boxes: &mut BoxCollection) -> Result<(), GeometryError> {
        match self {
            EditCommand::AddBoxes { entries } => insert_all(boxes, entries),
            EditCommand::RemoveBoxes { entries } => {
                remove_all(boxes, entries);
                Ok(())
            }
            EditCommand::UpdateBoxes { after, .. } => replace_all(boxes, after),
            EditCommand::Composite { commands, .. } => {
                for command in commands {
                    command.apply(boxes)?;
                }
                Ok(())
            }
        }
    }

    pub fn revert(&self, boxes: &mut BoxCollection) -> Result<(), GeometryError> {
        match self {
            EditCommand::AddBoxes { entries } => {
                remove_all(boxes, entries);
                Ok(())
            }
            EditCommand::RemoveBoxes { entries } => insert_all(boxes, entries),
            EditCommand::UpdateBoxes { before, .. } => replace_all(boxes, before),
            EditCommand::Composite { commands, .. } => {
                for command in commands.iter().rev() {
                    command.revert(boxes)?;
                }
                Ok(())
            }
        }
    }
}

/// Bounded undo/redo stacks.
#[derive(Debug, Clone)]
pub struct UndoManager {
    undo_stack: Vec<EditCommand>,
    redo_stack: Vec<EditCommand>,
    max_depth: usize,
}

impl UndoManager {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Records an already-applied command. Clears the redo stack and drops
    /// the oldest entries beyond the depth limit.
    pub fn push(&mut self, command: EditCommand) {
        self.redo_stack.clear();
        self.undo_stack.push(command);
        if self.undo_stack.len() > self.max_depth {
            let excess = self.undo_stack.len() - self.max_depth;
            self.undo_stack.drain(..excess);
        }
    }

    /// Reverts the most recent command. Returns its name. On failure the
    /// collection and both stacks are left untouched.
    pub fn undo(&mut self, boxes: &mut BoxCollection) -> Result<Option<String>, GeometryError> {
        let Some(command) = self.undo_stack.pop() else {
            return Ok(None);
        };
        let snapshot = boxes.clone();
        if let Err(e) = command.revert(boxes) {
            *boxes = snapshot;
            self.undo_stack.push(command);
            return Err(e);
        }
        debug!("Undo: {}", command.name());
        let name = command.name().to_string();
        self.redo_stack.push(command);
        Ok(Some(name))
    }

    /// Re-applies the most recently undone command. Returns its name.
    pub fn redo(&mut self, boxes: &mut BoxCollection) -> Result<Option<String>, GeometryError> {
        let Some(command) = self.redo_stack.pop() else {
            return Ok(None);
        };
        let snapshot = boxes.clone();
        if let Err(e) = command.apply(boxes) {
            *boxes = snapshot;
            self.redo_stack.push(command);
            return Err(e);
        }
        debug!("Redo: {}", command.name());
        let name = command.name().to_string();
        self.undo_stack.push(command);
        Ok(Some(name))
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new(100)
    }
}
