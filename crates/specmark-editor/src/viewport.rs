//! Viewport and zoom control for the time axis.
//!
//! Owns zoom level, horizontal scroll offset and device pixel ratio for one
//! editing session. Zoom applies to the time axis only; the frequency axis
//! is never scaled. Scroll is kept inside `[0, max_scroll]` after every
//! change to zoom, content width or viewport width.

use std::fmt;

use specmark_settings::ViewportSettings;
use tracing::trace;

use crate::transform::{self, CanvasSize};

/// Source of the platform-reported device pixel ratio.
pub trait PixelRatioSource {
    /// The reported ratio, or `None` when it cannot be detected.
    fn device_pixel_ratio(&self) -> Option<f64>;
}

/// A pixel ratio source that always reports the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPixelRatio(pub Option<f64>);

impl PixelRatioSource for FixedPixelRatio {
    fn device_pixel_ratio(&self) -> Option<f64> {
        self.0
    }
}

/// Sanitizes a reported pixel ratio: 1 when unknown or invalid, otherwise
/// clamped to `[1, max]`.
pub fn resolve_device_pixel_ratio(reported: Option<f64>, max: f64) -> f64 {
    match reported {
        Some(ratio) if ratio.is_finite() && ratio > 0.0 => ratio.clamp(1.0, max.max(1.0)),
        _ => 1.0,
    }
}

/// Read-only snapshot handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub zoom: f64,
    pub scroll_offset: f64,
    pub device_pixel_ratio: f64,
    /// Visible width of the scroll container in screen pixels
    pub viewport_width: f64,
    /// Width of the content at zoom 1 in world pixels
    pub content_width: f64,
}

/// Zoom/scroll controller.
#[derive(Debug, Clone)]
pub struct Viewport {
    zoom: f64,
    scroll_offset: f64,
    device_pixel_ratio: f64,
    content_width: f64,
    viewport_width: f64,
    settings: ViewportSettings,
}

impl Viewport {
    /// Creates a viewport showing `viewport_width` screen pixels of a
    /// `content_width` wide world at the minimum zoom.
    pub fn new(content_width: f64, viewport_width: f64, settings: ViewportSettings) -> Self {
        Self {
            zoom: settings.min_zoom,
            scroll_offset: 0.0,
            device_pixel_ratio: 1.0,
            content_width: content_width.max(0.0),
            viewport_width: viewport_width.max(0.0),
            settings,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    pub fn content_width(&self) -> f64 {
        self.content_width
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn min_zoom(&self) -> f64 {
        self.settings.min_zoom
    }

    pub fn max_zoom(&self) -> f64 {
        self.settings.max_zoom
    }

    pub fn state(&self) -> ViewportState {
        ViewportState {
            zoom: self.zoom,
            scroll_offset: self.scroll_offset,
            device_pixel_ratio: self.device_pixel_ratio,
            viewport_width: self.viewport_width,
            content_width: self.content_width,
        }
    }

    /// Largest scroll offset at the current zoom. Never negative.
    pub fn max_scroll(&self) -> f64 {
        (self.content_width * self.zoom - self.viewport_width).max(0.0)
    }

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.max(self.settings.min_zoom).min(self.settings.max_zoom)
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_scroll());
    }

    /// Sets the zoom level, clamped to the configured bounds. Non-finite
    /// values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            return;
        }
        self.zoom = self.clamp_zoom(zoom);
        self.clamp_scroll();
    }

    /// Zooms while keeping the world point under `cursor_screen_x` fixed.
    ///
    /// `cursor_screen_x` is relative to the visible viewport. The world
    /// point is computed from the live scroll offset:
    ///
    /// ```text
    /// world_x    = (cursor + scroll) / old_zoom
    /// new_scroll = world_x * new_zoom - cursor     (clamped to [0, max_scroll])
    /// ```
    pub fn zoom_to_cursor(&mut self, cursor_screen_x: f64, new_zoom: f64) {
        if !new_zoom.is_finite() || !cursor_screen_x.is_finite() {
            return;
        }

        let world_x = transform::screen_to_world(
            transform::absolute_screen_position(cursor_screen_x, self.scroll_offset),
            self.zoom,
        );

        self.zoom = self.clamp_zoom(new_zoom);
        self.scroll_offset = transform::world_to_screen(world_x, self.zoom) - cursor_screen_x;
        self.clamp_scroll();

        trace!(
            "zoom_to_cursor: cursor={:.1} world={:.2} zoom={:.3} scroll={:.1}",
            cursor_screen_x,
            world_x,
            self.zoom,
            self.scroll_offset
        );
    }

    /// Zooms in one step around the cursor.
    pub fn zoom_in_at(&mut self, cursor_screen_x: f64) {
        self.zoom_to_cursor(cursor_screen_x, self.zoom * self.settings.zoom_step);
    }

    /// Zooms out one step around the cursor.
    pub fn zoom_out_at(&mut self, cursor_screen_x: f64) {
        self.zoom_to_cursor(cursor_screen_x, self.zoom / self.settings.zoom_step);
    }

    /// Returns to the minimum zoom with no scroll.
    pub fn reset_zoom(&mut self) {
        self.zoom = self.settings.min_zoom;
        self.scroll_offset = 0.0;
    }

    pub fn set_scroll_offset(&mut self, offset: f64) {
        if !offset.is_finite() {
            return;
        }
        self.scroll_offset = offset;
        self.clamp_scroll();
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.set_scroll_offset(self.scroll_offset + delta);
    }

    pub fn set_content_width(&mut self, width: f64) {
        self.content_width = width.max(0.0);
        self.clamp_scroll();
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width.max(0.0);
        self.clamp_scroll();
    }

    /// Reads the platform ratio, falling back to 1 and capping at the
    /// configured maximum, and stores it.
    pub fn update_device_pixel_ratio(&mut self, source: &impl PixelRatioSource) -> f64 {
        self.device_pixel_ratio = resolve_device_pixel_ratio(
            source.device_pixel_ratio(),
            self.settings.max_device_pixel_ratio,
        );
        self.device_pixel_ratio
    }

    /// Backing/display size of the time-axis surface for `height` logical pixels.
    pub fn canvas_size(&self, height: f64) -> CanvasSize {
        transform::canvas_size(self.content_width, height, self.zoom, self.device_pixel_ratio)
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Scroll: {:.1}px | DPR: {:.1}",
            self.zoom, self.scroll_offset, self.device_pixel_ratio
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(960.0, 960.0, ViewportSettings::default())
    }
}
