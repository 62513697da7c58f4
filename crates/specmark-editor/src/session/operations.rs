//! Commands applied to the current selection.
//!
//! Each operation returns `true` when it committed a change. Operations
//! whose preconditions are not met (empty selection, fewer than three boxes
//! to distribute, fewer than two to merge) do nothing. A gesture in
//! progress is discarded before any operation runs.

use tracing::debug;

use super::EditorSession;
use crate::arrange::{
    self, align_boxes, distribute_boxes, duplicate_boxes, group_overlapping, merge_rects,
    Alignment, DistributeAxis,
};
use crate::commands::EditCommand;
use crate::geometry;
use crate::interaction::InteractionState;
use crate::model::{BoundingBox, Rect};

impl EditorSession {
    /// The drag and resize states index into the committed boxes, so they
    /// cannot outlive a commit made from outside the gesture.
    fn discard_gesture(&mut self) {
        if !self.interaction.is_idle() {
            debug!("Discarded {} before edit", self.interaction.name());
            self.interaction = InteractionState::Idle;
        }
    }

    /// Selected indices in ascending order, out-of-range entries dropped.
    fn selected_sorted(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .selection
            .selected()
            .iter()
            .copied()
            .filter(|&i| i < self.boxes.len())
            .collect();
        indices.sort_unstable();
        indices
    }

    /// Commits the selected boxes whose rectangles differ in `updated`.
    ///
    /// The rearrangement is all or nothing: if any moved box would leave the
    /// bounds, no box changes.
    fn commit_rearranged(&mut self, updated: &[BoundingBox]) -> bool {
        let bounds = self.bounds();
        let mut before = Vec::new();
        let mut after = Vec::new();

        for index in self.selected_sorted() {
            let (Some(original), Some(candidate)) = (self.boxes.get(index), updated.get(index))
            else {
                continue;
            };
            if original.rect() == candidate.rect() {
                continue;
            }
            if !bounds.contains_rect(&candidate.rect()) {
                debug!("Rejected rearrangement: box {} would leave the bounds", index);
                return false;
            }
            match self.finalize(candidate.clone()) {
                Ok(b) => {
                    before.push((index, original.clone()));
                    after.push((index, b));
                }
                Err(e) => {
                    debug!("Rejected rearrangement of box {}: {}", index, e);
                    return false;
                }
            }
        }

        if after.is_empty() {
            return false;
        }
        self.commit(EditCommand::UpdateBoxes { before, after })
    }

    pub fn align_selected(&mut self, alignment: Alignment) -> bool {
        self.discard_gesture();
        let mut boxes = self.boxes.to_records();
        align_boxes(&mut boxes, self.selection.selected(), alignment);
        self.commit_rearranged(&boxes)
    }

    pub fn distribute_selected(&mut self, axis: DistributeAxis) -> bool {
        self.discard_gesture();
        let mut boxes = self.boxes.to_records();
        distribute_boxes(&mut boxes, self.selection.selected(), axis);
        self.commit_rearranged(&boxes)
    }

    /// Snaps position and size of every selected box to the configured grid.
    pub fn snap_selected_to_grid(&mut self) -> bool {
        self.discard_gesture();
        let grid = self.config.geometry.grid_size;
        let bounds = self.bounds();
        let mut boxes = self.boxes.to_records();
        for &index in self.selection.selected() {
            if let Some(b) = boxes.get_mut(index) {
                b.set_rect(geometry::constrain_to_bounds(
                    arrange::snap_rect(&b.rect(), grid),
                    &bounds,
                ));
            }
        }
        self.commit_rearranged(&boxes)
    }

    /// Appends offset copies of the selected boxes and selects the copies.
    pub fn duplicate_selected(&mut self) -> bool {
        self.discard_gesture();
        let offset = self.config.geometry;
        let copies = duplicate_boxes(
            self.boxes.as_slice(),
            &self.selected_sorted(),
            offset.duplicate_offset_x,
            offset.duplicate_offset_y,
        );

        let start = self.boxes.len();
        let mut entries = Vec::with_capacity(copies.len());
        for copy in copies {
            match self.finalize(copy) {
                Ok(b) => entries.push((start + entries.len(), b)),
                Err(e) => debug!("Skipped duplicate: {}", e),
            }
        }
        if entries.is_empty() {
            return false;
        }

        let new_indices: Vec<usize> = entries.iter().map(|(i, _)| *i).collect();
        if !self.commit(EditCommand::AddBoxes { entries }) {
            return false;
        }
        self.selection.set(new_indices);
        true
    }

    pub fn delete_selected(&mut self) -> bool {
        self.discard_gesture();
        let entries: Vec<(usize, BoundingBox)> = self
            .selected_sorted()
            .into_iter()
            .filter_map(|i| self.boxes.get(i).map(|b| (i, b.clone())))
            .collect();
        if entries.is_empty() {
            return false;
        }
        if !self.commit(EditCommand::RemoveBoxes { entries }) {
            return false;
        }
        self.selection.clear();
        true
    }

    /// Replaces the selected boxes with their envelope.
    ///
    /// The merged box takes its label, confidence and metadata from the
    /// lowest-indexed selected box, and is appended after the remaining
    /// boxes.
    pub fn merge_selected(&mut self) -> bool {
        self.discard_gesture();
        let entries: Vec<(usize, BoundingBox)> = self
            .selected_sorted()
            .into_iter()
            .filter_map(|i| self.boxes.get(i).map(|b| (i, b.clone())))
            .collect();
        if entries.len() < 2 {
            return false;
        }

        let rects: Vec<Rect> = entries.iter().map(|(_, b)| b.rect()).collect();
        let Some(envelope) = merge_rects(&rects) else {
            return false;
        };
        let mut merged = entries[0].1.clone();
        merged.set_rect(envelope);
        let merged = match self.finalize(merged) {
            Ok(b) => b,
            Err(e) => {
                debug!("Rejected merge: {}", e);
                return false;
            }
        };

        let index = self.boxes.len() - entries.len();
        let command = EditCommand::Composite {
            name: "Merge Boxes".to_string(),
            commands: vec![
                EditCommand::RemoveBoxes { entries },
                EditCommand::AddBoxes {
                    entries: vec![(index, merged)],
                },
            ],
        };
        if !self.commit(command) {
            return false;
        }
        self.selection.select_only(index);
        true
    }

    /// Partition of all boxes into groups of transitively overlapping boxes.
    pub fn overlap_groups(&self) -> Vec<Vec<usize>> {
        let rects: Vec<Rect> = self.boxes.iter().map(|b| b.rect()).collect();
        group_overlapping(&rects)
    }

    /// Selects every box in the overlap group containing `index`.
    pub fn select_overlap_group(&mut self, index: usize) -> bool {
        let Some(group) = self
            .overlap_groups()
            .into_iter()
            .find(|g| g.contains(&index))
        else {
            return false;
        };
        self.selection.set(group);
        true
    }
}
