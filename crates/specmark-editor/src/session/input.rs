//! Pointer, wheel and keyboard dispatch.
//!
//! Pointer-down picks a gesture in this order: a handle of a selected box,
//! then the top-most box body, then empty space. Moves only update the
//! gesture's preview; the committed boxes change on pointer-up.

use specmark_core::GeometryError;
use tracing::{debug, trace};

use super::{EditorSession, EventOutcome};
use crate::arrange::{merge_rects, snap_rect};
use crate::commands::EditCommand;
use crate::geometry::{self, Bounds};
use crate::interaction::{
    DragState, DrawingState, EditorMode, InputEvent, InteractionState, Key, KeyEvent, Modifiers,
    PointerEvent, PointerKind, ResizeState, SelectionState, WheelEvent,
};
use crate::model::{BoundingBox, Point, Rect};
use crate::selection_manager::boxes_in_rect;
use crate::transform;

/// Moves every rectangle by one shared delta, limited so the group as a
/// whole stays inside `bounds`.
fn move_group(initial: &[(usize, Rect)], dx: f64, dy: f64, bounds: &Bounds) -> Vec<(usize, Rect)> {
    let Some(envelope) = merge_rects(initial.iter().map(|(_, r)| r)) else {
        return Vec::new();
    };
    let moved = geometry::move_rect(&envelope, dx, dy, bounds);
    let (dx, dy) = (moved.x - envelope.x, moved.y - envelope.y);
    initial
        .iter()
        .map(|(i, r)| (*i, r.translated(dx, dy)))
        .collect()
}

impl EditorSession {
    pub fn handle_event(&mut self, event: impl Into<InputEvent>) -> EventOutcome {
        match event.into() {
            InputEvent::Pointer(e) => self.handle_pointer(e),
            InputEvent::Wheel(e) => self.handle_wheel(e),
            InputEvent::Key(e) => self.handle_key(e),
        }
    }

    /// Converts a stage position to world space at the live zoom and scroll.
    pub fn stage_to_world(&self, position: Point) -> Point {
        transform::stage_to_world(
            position,
            self.viewport.scroll_offset(),
            self.viewport.zoom(),
            self.context.dims,
            &self.context.layout,
        )
    }

    /// Discards the active gesture. When idle, clears the selection instead.
    pub fn cancel(&mut self) -> EventOutcome {
        if !self.interaction.is_idle() {
            debug!("Cancelled {}", self.interaction.name());
            self.interaction = InteractionState::Idle;
            return EventOutcome::Cancelled;
        }
        if !self.selection.is_empty() {
            self.selection.clear();
            return EventOutcome::Preview;
        }
        EventOutcome::Ignored
    }

    /// Prepares a box for commit: position clamped into bounds, optional
    /// grid snap, positive size, derived time/frequency fields.
    pub(crate) fn finalize(&self, mut bbox: BoundingBox) -> Result<BoundingBox, GeometryError> {
        let bounds = self.bounds();
        let mut rect = geometry::move_rect(&bbox.rect(), 0.0, 0.0, &bounds);
        if self.config.geometry.snap_to_grid {
            rect = geometry::constrain_to_bounds(
                snap_rect(&rect, self.config.geometry.grid_size),
                &bounds,
            );
        }
        bbox.set_rect(geometry::ensure_non_degenerate(rect)?);
        bbox.derive_domain_fields(&self.context);
        bbox.validate()?;
        Ok(bbox)
    }

    fn handle_pointer(&mut self, event: PointerEvent) -> EventOutcome {
        let point = self.stage_to_world(event.position);
        match event.kind {
            PointerKind::Down => self.pointer_down(point, event.modifiers),
            PointerKind::Move => self.pointer_move(point),
            PointerKind::Up => self.pointer_up(point),
        }
    }

    fn pointer_down(&mut self, point: Point, modifiers: Modifiers) -> EventOutcome {
        if !self.interaction.is_idle() {
            return EventOutcome::Ignored;
        }

        let boxes = self.boxes.as_slice();
        let radius = self.config.geometry.handle_radius;

        if let Some((index, handle)) =
            geometry::find_handle_in(point, boxes, self.selection.selected(), radius)
        {
            let initial_box = boxes[index].clone();
            self.interaction = InteractionState::Resizing(ResizeState {
                resized_index: index,
                handle,
                current_rect: initial_box.rect(),
                initial_box,
            });
            return EventOutcome::Preview;
        }

        if let Some(index) = geometry::find_box_at_point(point, boxes) {
            if modifiers.shift {
                self.selection.toggle(index);
                return EventOutcome::Preview;
            }
            if !self.selection.is_selected(index) {
                self.selection.select_only(index);
            }
            self.begin_drag(index, point);
            return EventOutcome::Preview;
        }

        self.interaction = match self.mode {
            EditorMode::Draw => InteractionState::Drawing(DrawingState {
                start_point: point,
                current_box: None,
            }),
            EditorMode::Select => {
                if !modifiers.shift {
                    self.selection.clear();
                }
                InteractionState::Selecting(SelectionState {
                    selected_indices: Vec::new(),
                    selection_rect: Rect::new(point.x, point.y, 0.0, 0.0),
                    start_point: point,
                    additive: modifiers.shift,
                })
            }
        };
        EventOutcome::Preview
    }

    fn begin_drag(&mut self, index: usize, point: Point) {
        let mut indices = self.selection.selected().to_vec();
        indices.sort_unstable();
        let initial_positions: Vec<(usize, Rect)> = indices
            .into_iter()
            .filter_map(|i| self.boxes.get(i).map(|b| (i, b.rect())))
            .collect();
        let origin = self
            .boxes
            .get(index)
            .map(|b| Point::new(b.x, b.y))
            .unwrap_or(point);

        self.interaction = InteractionState::Dragging(DragState {
            dragged_index: index,
            drag_offset: Point::new(point.x - origin.x, point.y - origin.y),
            current_positions: initial_positions.clone(),
            initial_positions,
            start_point: point,
        });
    }

    fn pointer_move(&mut self, point: Point) -> EventOutcome {
        let bounds = self.bounds();
        let min_size = self.config.geometry.min_box_size;

        match &mut self.interaction {
            InteractionState::Idle => EventOutcome::Ignored,
            InteractionState::Drawing(state) => {
                let rect =
                    geometry::constrain_to_bounds(Rect::from_corners(state.start_point, point), &bounds);
                state.current_box = rect.has_area().then_some(rect);
                EventOutcome::Preview
            }
            InteractionState::Dragging(state) => {
                let dx = point.x - state.start_point.x;
                let dy = point.y - state.start_point.y;
                state.current_positions = move_group(&state.initial_positions, dx, dy, &bounds);
                EventOutcome::Preview
            }
            InteractionState::Resizing(state) => {
                state.current_rect = geometry::resize_rect(
                    &state.initial_box.rect(),
                    state.handle,
                    point,
                    min_size,
                    &bounds,
                );
                EventOutcome::Preview
            }
            InteractionState::Selecting(state) => {
                state.selection_rect = Rect::new(
                    state.start_point.x,
                    state.start_point.y,
                    point.x - state.start_point.x,
                    point.y - state.start_point.y,
                );
                state.selected_indices = boxes_in_rect(self.boxes.as_slice(), &state.selection_rect);
                EventOutcome::Preview
            }
        }
    }

    fn pointer_up(&mut self, point: Point) -> EventOutcome {
        if self.interaction.is_idle() {
            return EventOutcome::Ignored;
        }
        self.pointer_move(point);

        match std::mem::take(&mut self.interaction) {
            InteractionState::Idle => EventOutcome::Ignored,
            InteractionState::Drawing(state) => self.finish_drawing(state, point),
            InteractionState::Dragging(state) => self.finish_drag(state),
            InteractionState::Resizing(state) => self.finish_resize(state),
            InteractionState::Selecting(state) => {
                if state.additive {
                    for index in state.selected_indices {
                        self.selection.add(index);
                    }
                } else {
                    self.selection.set(state.selected_indices);
                }
                EventOutcome::Preview
            }
        }
    }

    fn finish_drawing(&mut self, state: DrawingState, end: Point) -> EventOutcome {
        let created = geometry::create_box_from_drag(state.start_point, end, &self.context)
            .and_then(|b| self.finalize(b));
        let bbox = match created {
            Ok(b) => b,
            Err(e) => {
                debug!("Discarded drawn box: {}", e);
                return EventOutcome::Cancelled;
            }
        };

        let index = self.boxes.len();
        if !self.commit(EditCommand::AddBoxes {
            entries: vec![(index, bbox)],
        }) {
            return EventOutcome::Cancelled;
        }
        self.selection.select_only(index);
        EventOutcome::Committed
    }

    fn finish_drag(&mut self, state: DragState) -> EventOutcome {
        if !state.has_moved() {
            return EventOutcome::Preview;
        }

        let mut before = Vec::with_capacity(state.current_positions.len());
        let mut after = Vec::with_capacity(state.current_positions.len());
        for (index, rect) in state.current_positions {
            let Some(original) = self.boxes.get(index) else {
                continue;
            };
            let mut moved = original.clone();
            moved.set_rect(rect);
            match self.finalize(moved) {
                Ok(b) => {
                    before.push((index, original.clone()));
                    after.push((index, b));
                }
                Err(e) => {
                    debug!("Discarded move of box {}: {}", index, e);
                    return EventOutcome::Cancelled;
                }
            }
        }

        if self.commit(EditCommand::UpdateBoxes { before, after }) {
            EventOutcome::Committed
        } else {
            EventOutcome::Cancelled
        }
    }

    fn finish_resize(&mut self, state: ResizeState) -> EventOutcome {
        if state.current_rect == state.initial_box.rect() {
            return EventOutcome::Preview;
        }

        let mut resized = state.initial_box.clone();
        resized.set_rect(state.current_rect);
        let resized = match self.finalize(resized) {
            Ok(b) => b,
            Err(e) => {
                debug!("Discarded resize of box {}: {}", state.resized_index, e);
                return EventOutcome::Cancelled;
            }
        };

        let index = state.resized_index;
        if self.commit(EditCommand::UpdateBoxes {
            before: vec![(index, state.initial_box)],
            after: vec![(index, resized)],
        }) {
            EventOutcome::Committed
        } else {
            EventOutcome::Cancelled
        }
    }

    fn handle_wheel(&mut self, event: WheelEvent) -> EventOutcome {
        let before = (self.viewport.zoom(), self.viewport.scroll_offset());

        if event.modifiers.ctrl {
            if event.delta_y < 0.0 {
                self.viewport.zoom_in_at(event.position.x);
            } else if event.delta_y > 0.0 {
                self.viewport.zoom_out_at(event.position.x);
            }
        } else {
            let delta = if event.delta_x != 0.0 {
                event.delta_x
            } else {
                event.delta_y
            };
            self.viewport.scroll_by(delta);
        }

        if (self.viewport.zoom(), self.viewport.scroll_offset()) == before {
            EventOutcome::Ignored
        } else {
            trace!("{}", self.viewport);
            EventOutcome::ViewportChanged
        }
    }

    fn handle_key(&mut self, event: KeyEvent) -> EventOutcome {
        if event.key == Key::Escape {
            return self.cancel();
        }
        // The committed boxes never change mid-gesture.
        if !self.interaction.is_idle() {
            return EventOutcome::Ignored;
        }

        let committed = match event.key {
            Key::Delete | Key::Backspace => self.delete_selected(),
            Key::Undo => self.undo(),
            Key::Redo => self.redo(),
            Key::Duplicate => self.duplicate_selected(),
            Key::SelectAll => {
                if self.boxes.is_empty() {
                    return EventOutcome::Ignored;
                }
                self.select_all();
                return EventOutcome::Preview;
            }
            Key::Escape | Key::Other(_) => return EventOutcome::Ignored,
        };

        if committed {
            EventOutcome::Committed
        } else {
            EventOutcome::Ignored
        }
    }
}
