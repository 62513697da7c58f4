//! # Specmark
//!
//! Geometry engine for a spectrogram annotation editor:
//! - Time/frequency to pixel transforms under zoom, scroll and DPI scaling
//! - Zoom-to-cursor viewport control
//! - Bounding-box drawing, hit-testing, resize, move and constraint
//! - Multi-box selection, alignment, distribution and overlap grouping
//!
//! ## Architecture
//!
//! Specmark is organized as a workspace with multiple crates:
//!
//! 1. **specmark-core** - Layout constants and error types
//! 2. **specmark-settings** - Editor configuration and persistence
//! 3. **specmark-editor** - Transforms, viewport, geometry, session, history
//! 4. **specmark** - Re-exports and logging setup

pub use specmark_core::{Error, GeometryError, LayoutConstants, Result, ValidationError};
pub use specmark_editor as editor;
pub use specmark_settings::{
    EditorConfig, GeometrySettings, HistorySettings, PersistenceSettings, SettingsError,
    ViewportSettings,
};

pub use specmark_editor::{
    Alignment, AnnotationDocument, BoundingBox, BoxCollection, BoxDiff, ContentDims,
    DistributeAxis, DomainContext, EditorMode, EditorSession, EventOutcome, Handle, InputEvent,
    InputQueue, InteractionState, Key, KeyEvent, Modifiers, Point, PointerEvent, Rect,
    RenderFrame, Viewport, ViewportState, WheelEvent,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Cargo profile the library was built with
pub const BUILD_PROFILE: &str = env!("BUILD_PROFILE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
