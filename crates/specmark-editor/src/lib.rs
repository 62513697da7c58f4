//! # Specmark Editor
//!
//! Coordinate and geometry engine for annotating time/frequency regions on a
//! zoomable spectrogram. It keeps a scrollable, DPI-aware render surface
//! consistent with a collection of annotated rectangles while boxes are
//! drawn, dragged, resized and arranged.
//!
//! ## Core Components
//!
//! - **Transform**: seconds/Hz to pixels, world to screen, canvas sizing
//! - **Viewport**: zoom-to-cursor, scroll clamping, device pixel ratio
//! - **Geometry**: hit-testing, corner handles, create/resize/move/constrain
//! - **Arrange**: alignment, distribution, duplication, overlap grouping
//! - **Session**: input dispatch over an explicit interaction state machine
//! - **Commands**: undo/redo of committed edits
//! - **Serialization**: annotation documents at the persistence boundary
//!
//! ## Architecture
//!
//! ```text
//! InputEvent ──> EditorSession ──> InteractionState (preview)
//!                     │                  │
//!                     │  pointer-up      │
//!                     v                  v
//!               EditCommand ──> BoxCollection ──> RenderFrame ──> renderer
//!                     │
//!                 UndoManager
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use specmark_editor::{EditorMode, EditorSession, PointerEvent};
//!
//! let mut session = EditorSession::default();
//! session.set_mode(EditorMode::Draw);
//!
//! session.handle_event(PointerEvent::down(96.0, 0.0));
//! session.handle_event(PointerEvent::moved(200.0, 100.0));
//! session.handle_event(PointerEvent::up(288.0, 195.0));
//!
//! let b = session.boxes().get(0).unwrap();
//! assert!((b.start_time - 1.0).abs() < 1e-9);
//! ```

pub mod arrange;
pub mod commands;
pub mod geometry;
pub mod interaction;
pub mod model;
pub mod renderer;
pub mod selection_manager;
pub mod serialization;
pub mod session;
pub mod transform;
pub mod viewport;

pub use arrange::{Alignment, DistributeAxis};
pub use commands::{EditCommand, UndoManager};
pub use geometry::{Bounds, Handle};
pub use interaction::{
    DragState, DrawingState, EditorMode, InputEvent, InteractionState, Key, KeyEvent, Modifiers,
    PointerEvent, PointerKind, ResizeState, SelectionState, WheelEvent,
};
pub use model::{BoundingBox, BoxCollection, ContentDims, DomainContext, Point, Rect};
pub use renderer::RenderFrame;
pub use selection_manager::SelectionManager;
pub use serialization::{AnnotationDocument, BoxDiff};
pub use session::{EditorSession, EventOutcome, InputQueue};
pub use transform::{CanvasSize, ScreenRect};
pub use viewport::{FixedPixelRatio, PixelRatioSource, Viewport, ViewportState};
