//! Coordinate transforms between domain units and pixel space.
//!
//! Three coordinate systems are involved:
//! - Domain units: seconds along the time axis, Hz along the frequency axis.
//! - World space: content pixels at zoom 1, no scroll, no gutter. Stored
//!   boxes live here.
//! - Screen space: world space after zoom (horizontal only) and, for
//!   backing surfaces, device pixel ratio scaling.
//!
//! Every function is pure and returns 0 instead of NaN or infinity when a
//! denominator is zero.

use specmark_core::LayoutConstants;

use crate::model::{ContentDims, Point, Rect};
use crate::viewport::ViewportState;

/// `numerator / denominator`, or 0 when the quotient is not finite.
fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let q = numerator / denominator;
    if q.is_finite() {
        q
    } else {
        0.0
    }
}

/// Maps a time to a horizontal pixel.
///
/// ```text
/// pixel = (time / duration) * (total_width - gutter) * zoom [+ gutter]
/// ```
pub fn time_to_pixel(
    time: f64,
    duration: f64,
    total_width: f64,
    zoom: f64,
    include_gutter: bool,
    layout: &LayoutConstants,
) -> f64 {
    let content_width = layout.content_width(total_width);
    let pixel = safe_div(time, duration) * content_width * zoom;
    if include_gutter {
        pixel + layout.frequency_scale_width()
    } else {
        pixel
    }
}

/// Inverse of [`time_to_pixel`].
pub fn pixel_to_time(
    pixel: f64,
    duration: f64,
    total_width: f64,
    zoom: f64,
    include_gutter: bool,
    layout: &LayoutConstants,
) -> f64 {
    let content_width = layout.content_width(total_width);
    let offset = if include_gutter {
        pixel - layout.frequency_scale_width()
    } else {
        pixel
    };
    safe_div(offset, content_width * zoom) * duration
}

/// Maps a frequency to a vertical pixel. High frequencies sit at the top.
pub fn frequency_to_pixel(frequency: f64, max_frequency: f64, height: f64) -> f64 {
    if max_frequency == 0.0 {
        return 0.0;
    }
    height * (1.0 - safe_div(frequency, max_frequency))
}

/// Inverse of [`frequency_to_pixel`].
pub fn pixel_to_frequency(pixel: f64, max_frequency: f64, height: f64) -> f64 {
    if height == 0.0 {
        return 0.0;
    }
    max_frequency * (1.0 - safe_div(pixel, height))
}

pub fn world_to_screen(world_x: f64, zoom: f64) -> f64 {
    world_x * zoom
}

pub fn screen_to_world(screen_x: f64, zoom: f64) -> f64 {
    safe_div(screen_x, zoom)
}

/// Viewport-relative position to a position relative to the full
/// scrollable content.
pub fn absolute_screen_position(point: f64, scroll_offset: f64) -> f64 {
    point + scroll_offset
}

/// Converts a pointer position on the stage to world coordinates.
///
/// The horizontal component is scrolled, unzoomed, then clamped to
/// `[0, content_width * zoom - 1]` where `content_width` excludes the gutter.
/// The vertical axis is never zoomed or scrolled; it is clamped to
/// `[0, dims.height - 1]`.
pub fn stage_to_world(
    stage_point: Point,
    scroll_offset: f64,
    zoom: f64,
    dims: ContentDims,
    layout: &LayoutConstants,
) -> Point {
    let absolute_x = absolute_screen_position(stage_point.x, scroll_offset);
    let world_x = screen_to_world(absolute_x, zoom);

    let max_x = (layout.content_width(dims.width) * zoom - 1.0).max(0.0);
    let max_y = (dims.height - 1.0).max(0.0);

    Point::new(world_x.clamp(0.0, max_x), stage_point.y.clamp(0.0, max_y))
}

/// Backing-surface and displayed size of a canvas.
///
/// The backing surface carries `devicePixelRatio` times more pixels than
/// the displayed size; pointer math always uses the displayed size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    /// Backing surface width in physical pixels
    pub backing_width: u32,
    /// Backing surface height in physical pixels
    pub backing_height: u32,
    /// Displayed width in logical pixels
    pub style_width: f64,
    /// Displayed height in logical pixels
    pub style_height: f64,
}

impl CanvasSize {
    /// Scale the renderer must apply so logical coordinates fill the backing surface.
    pub fn render_scale(&self) -> (f64, f64) {
        (
            safe_div(self.backing_width as f64, self.style_width),
            safe_div(self.backing_height as f64, self.style_height),
        )
    }
}

/// Sizes a canvas for `width x height` logical pixels at the given zoom.
pub fn canvas_size(width: f64, height: f64, zoom: f64, device_pixel_ratio: f64) -> CanvasSize {
    let to_px = |v: f64| round_px(v).max(0) as u32;
    CanvasSize {
        backing_width: to_px(width * zoom * device_pixel_ratio),
        backing_height: to_px(height * device_pixel_ratio),
        style_width: width * zoom,
        style_height: height,
    }
}

/// Rounding applied wherever world geometry crosses into integer screen
/// pixels. Halves round away from zero.
pub fn round_px(value: f64) -> i64 {
    if value.is_finite() {
        value.round() as i64
    } else {
        0
    }
}

/// Integer screen-space rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenRect {
    pub screen_x: i64,
    pub screen_y: i64,
    pub screen_width: i64,
    pub screen_height: i64,
}

/// Converts a world rectangle to integer screen space.
///
/// Each field is rounded independently, so an edge may be off by up to
/// half a pixel relative to the exact product.
pub fn transform_box_to_screen(rect: &Rect, zoom: f64) -> ScreenRect {
    ScreenRect {
        screen_x: round_px(world_to_screen(rect.x, zoom)),
        screen_y: round_px(rect.y),
        screen_width: round_px(world_to_screen(rect.width, zoom)),
        screen_height: round_px(rect.height),
    }
}

/// Screen rectangle relative to the visible viewport, gutter included.
pub fn transform_box_to_viewport(
    rect: &Rect,
    zoom: f64,
    scroll_offset: f64,
    layout: &LayoutConstants,
) -> ScreenRect {
    let x = world_to_screen(rect.x, zoom) - scroll_offset + layout.frequency_scale_width();
    ScreenRect {
        screen_x: round_px(x),
        ..transform_box_to_screen(rect, zoom)
    }
}

/// Time range currently visible in the viewport, in seconds.
pub fn visible_time_range(
    viewport: &ViewportState,
    duration: f64,
    dims: ContentDims,
    layout: &LayoutConstants,
) -> (f64, f64) {
    let start = pixel_to_time(
        viewport.scroll_offset,
        duration,
        dims.width,
        viewport.zoom,
        false,
        layout,
    );
    let end = pixel_to_time(
        viewport.scroll_offset + viewport.viewport_width,
        duration,
        dims.width,
        viewport.zoom,
        false,
        layout,
    );
    (start.clamp(0.0, duration.max(0.0)), end.clamp(0.0, duration.max(0.0)))
}
