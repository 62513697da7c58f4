//! Load/save through annotation documents.

use std::path::Path;

use specmark_core::Result;
use tracing::info;

use super::EditorSession;
use crate::interaction::InteractionState;
use crate::model::{BoundingBox, BoxCollection};
use crate::serialization::{diff, AnnotationDocument, BoxDiff};

impl EditorSession {
    /// Replaces the session's boxes with `records`.
    ///
    /// All records are validated first; on failure the session is unchanged.
    /// Selection, gesture and history are reset.
    pub fn load_boxes(&mut self, records: Vec<BoundingBox>) -> Result<()> {
        let boxes = BoxCollection::load(records)?;
        self.saved = boxes.to_records();
        self.boxes = boxes;
        self.selection.clear();
        self.interaction = InteractionState::Idle;
        self.history.clear();
        info!("Session loaded {} boxes", self.boxes.len());
        Ok(())
    }

    pub fn load_document(&mut self, document: AnnotationDocument) -> Result<()> {
        document.validate(&self.config.persistence)?;
        self.load_boxes(document.bounding_boxes)?;
        self.recording_id = document.recording_id;
        Ok(())
    }

    pub fn to_document(&self) -> AnnotationDocument {
        let mut document = AnnotationDocument::new(self.boxes.to_records());
        document.recording_id = self.recording_id;
        document
    }

    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let document = AnnotationDocument::load_from_file(path, &self.config.persistence)?;
        self.load_document(document)
    }

    /// Writes the full box list. Pending changes are cleared on success.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let mut document = self.to_document();
        document.save_to_file(path, &self.config.persistence)?;
        self.saved = document.bounding_boxes;
        Ok(())
    }

    /// Changes since the last load or save.
    pub fn pending_changes(&self) -> BoxDiff {
        diff(&self.saved, self.boxes.as_slice())
    }

    pub fn is_modified(&self) -> bool {
        !self.pending_changes().is_empty()
    }

    /// Records the current boxes as saved by an external store.
    pub fn mark_saved(&mut self) {
        self.saved = self.boxes.to_records();
    }
}
