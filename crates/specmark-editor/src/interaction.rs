//! Input records and the ephemeral interaction state.
//!
//! Exactly one interaction is active at a time. Gestures carry their own
//! preview data so the committed collection is never touched until the
//! pointer is released.

use serde::{Deserialize, Serialize};

use crate::geometry::Handle;
use crate::model::{BoundingBox, Point, Rect};

/// What a pointer-down on empty space starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    /// Rubber-band selection
    #[default]
    Select,
    /// Draw a new box
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// Pointer event. `position` is relative to the visible time-axis stage,
/// before scroll and zoom are undone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Point,
    pub modifiers: Modifiers,
    pub kind: PointerKind,
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Down, x, y)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Move, x, y)
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Up, x, y)
    }

    fn new(kind: PointerKind, x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            modifiers: Modifiers::NONE,
            kind,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Wheel event. With ctrl held it zooms around `position.x`; otherwise
/// `delta_x`/`delta_y` scroll the time axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub position: Point,
    pub delta_x: f64,
    pub delta_y: f64,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Delete,
    Backspace,
    Undo,
    Redo,
    Duplicate,
    SelectAll,
    Other(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Wheel(WheelEvent),
    Key(KeyEvent),
}

impl From<PointerEvent> for InputEvent {
    fn from(event: PointerEvent) -> Self {
        InputEvent::Pointer(event)
    }
}

impl From<WheelEvent> for InputEvent {
    fn from(event: WheelEvent) -> Self {
        InputEvent::Wheel(event)
    }
}

impl From<KeyEvent> for InputEvent {
    fn from(event: KeyEvent) -> Self {
        InputEvent::Key(event)
    }
}

/// A box being drawn. `current_box` is `None` until the drag has area.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingState {
    pub start_point: Point,
    pub current_box: Option<Rect>,
}

/// One or more selected boxes being moved together.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    /// Box under the pointer when the drag started
    pub dragged_index: usize,
    /// Pointer position minus the dragged box's origin at drag start
    pub drag_offset: Point,
    /// Rectangles of every moved box at drag start
    pub initial_positions: Vec<(usize, Rect)>,
    pub start_point: Point,
    /// Latest preview rectangles, same order as `initial_positions`
    pub current_positions: Vec<(usize, Rect)>,
}

impl DragState {
    pub fn has_moved(&self) -> bool {
        self.initial_positions != self.current_positions
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResizeState {
    pub resized_index: usize,
    pub handle: Handle,
    pub initial_box: BoundingBox,
    pub current_rect: Rect,
}

/// Rubber-band selection in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    /// Indices that would be selected if the pointer were released now
    pub selected_indices: Vec<usize>,
    pub selection_rect: Rect,
    pub start_point: Point,
    /// Extend the existing selection instead of replacing it
    pub additive: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Drawing(DrawingState),
    Dragging(DragState),
    Resizing(ResizeState),
    Selecting(SelectionState),
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::Drawing(_) => "drawing",
            InteractionState::Dragging(_) => "dragging",
            InteractionState::Resizing(_) => "resizing",
            InteractionState::Selecting(_) => "selecting",
        }
    }

    /// Preview rectangle of the active gesture, if it has one: the box being
    /// drawn, the rubber band, or the box being resized.
    pub fn preview_rect(&self) -> Option<Rect> {
        match self {
            InteractionState::Drawing(state) => state.current_box,
            InteractionState::Selecting(state) => Some(state.selection_rect.normalized()),
            InteractionState::Resizing(state) => Some(state.current_rect),
            InteractionState::Dragging(_) | InteractionState::Idle => None,
        }
    }
}
