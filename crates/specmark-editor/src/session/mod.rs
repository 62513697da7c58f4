//! Editing session.
//!
//! Owns everything that changes while a recording is being annotated: the
//! viewport, the committed boxes, the selection, the active interaction
//! and the undo history. Nothing here is global; callers hold the session
//! and feed it input.
//!
//! This module is split into submodules:
//! - `input`: pointer, wheel and keyboard dispatch
//! - `operations`: align, distribute, duplicate, delete, snap, merge
//! - `history`: undo/redo and the commit path
//! - `file_io`: load/save through annotation documents
//! - `queue`: per-frame input queue

mod file_io;
mod history;
mod input;
mod operations;
mod queue;

pub use queue::InputQueue;

use specmark_settings::EditorConfig;
use tracing::debug;

use crate::commands::UndoManager;
use crate::geometry::Bounds;
use crate::interaction::{EditorMode, InteractionState};
use crate::model::{BoundingBox, BoxCollection, DomainContext};
use crate::renderer::RenderFrame;
use crate::selection_manager::SelectionManager;
use crate::viewport::Viewport;

/// Result of handling one input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Nothing changed
    Ignored,
    /// Ephemeral state or selection changed; redraw without a commit
    Preview,
    /// The committed collection changed
    Committed,
    /// The active gesture was discarded or rejected
    Cancelled,
    /// Zoom or scroll changed
    ViewportChanged,
}

impl EventOutcome {
    pub fn needs_redraw(&self) -> bool {
        !matches!(self, EventOutcome::Ignored)
    }
}

#[derive(Debug, Clone)]
pub struct EditorSession {
    config: EditorConfig,
    context: DomainContext,
    viewport: Viewport,
    boxes: BoxCollection,
    selection: SelectionManager,
    interaction: InteractionState,
    history: UndoManager,
    mode: EditorMode,
    recording_id: Option<i64>,
    /// Boxes as of the last load or save
    saved: Vec<BoundingBox>,
}

impl EditorSession {
    /// Creates an empty session. The configured layout replaces the one in
    /// `context`, and the viewport initially shows the whole content width.
    pub fn new(config: EditorConfig, context: DomainContext) -> Self {
        let context = context.with_layout(config.layout());
        let content_width = context.content_width();
        Self {
            viewport: Viewport::new(content_width, content_width, config.viewport),
            history: UndoManager::new(config.history.max_depth),
            config,
            context,
            boxes: BoxCollection::new(),
            selection: SelectionManager::new(),
            interaction: InteractionState::Idle,
            mode: EditorMode::Select,
            recording_id: None,
            saved: Vec::new(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn context(&self) -> &DomainContext {
        &self.context
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn boxes(&self) -> &BoxCollection {
        &self.boxes
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Switches mode. Any gesture in progress is discarded.
    pub fn set_mode(&mut self, mode: EditorMode) {
        self.interaction = InteractionState::Idle;
        self.mode = mode;
    }

    pub fn recording_id(&self) -> Option<i64> {
        self.recording_id
    }

    /// Area boxes are constrained to.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_context(&self.context)
    }

    /// Replaces the recording metadata and canvas size. Box rectangles are
    /// kept; their time and frequency fields are derived again.
    pub fn set_context(&mut self, context: DomainContext) {
        self.interaction = InteractionState::Idle;
        self.context = context.with_layout(self.config.layout());
        self.viewport.set_content_width(self.context.content_width());
        let records: Vec<BoundingBox> = self
            .boxes
            .iter()
            .map(|b| {
                let mut b = b.clone();
                b.derive_domain_fields(&self.context);
                b
            })
            .collect();
        let mut boxes = BoxCollection::new();
        for (index, record) in records.into_iter().enumerate() {
            if let Err(e) = boxes.push(record) {
                debug!("Dropped box {} after context change: {}", index, e);
            }
        }
        self.boxes = boxes;
        self.selection.retain_valid(self.boxes.len());
        self.history.clear();
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport.set_viewport_width(width);
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(self.boxes.len());
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selects `index` only. Out-of-range indices clear the selection.
    pub fn select(&mut self, index: usize) {
        if index < self.boxes.len() {
            self.selection.select_only(index);
        } else {
            self.selection.clear();
        }
    }

    /// Snapshot for the renderer.
    pub fn render_frame(&self) -> RenderFrame {
        let mut boxes = self.boxes.to_records();
        match &self.interaction {
            InteractionState::Dragging(state) => {
                for (index, rect) in &state.current_positions {
                    if let Some(b) = boxes.get_mut(*index) {
                        b.set_rect(*rect);
                    }
                }
            }
            InteractionState::Resizing(state) => {
                if let Some(b) = boxes.get_mut(state.resized_index) {
                    b.set_rect(state.current_rect);
                }
            }
            _ => {}
        }

        RenderFrame {
            viewport: self.viewport.state(),
            boxes,
            interaction: self.interaction.clone(),
            selected: self.selection.selected().to_vec(),
            layout: self.context.layout,
        }
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default(), DomainContext::default())
    }
}
