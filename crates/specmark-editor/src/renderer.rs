//! Frame snapshot handed to renderers.
//!
//! The editor never draws. Each frame a renderer receives the viewport
//! state, the boxes to draw (committed boxes with any drag or resize
//! preview composited over them) and the active interaction, and asks the
//! transform engine for integer screen rectangles.

use specmark_core::LayoutConstants;

use crate::interaction::InteractionState;
use crate::model::BoundingBox;
use crate::transform::{self, CanvasSize, ScreenRect};
use crate::viewport::ViewportState;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: ViewportState,
    pub boxes: Vec<BoundingBox>,
    pub interaction: InteractionState,
    pub selected: Vec<usize>,
    pub layout: LayoutConstants,
}

impl RenderFrame {
    /// Content-relative screen rectangles, one per box.
    pub fn screen_rects(&self) -> Vec<ScreenRect> {
        self.boxes
            .iter()
            .map(|b| transform::transform_box_to_screen(&b.rect(), self.viewport.zoom))
            .collect()
    }

    /// Screen rectangles relative to the visible viewport, gutter included.
    pub fn viewport_rects(&self) -> Vec<ScreenRect> {
        self.boxes
            .iter()
            .map(|b| {
                transform::transform_box_to_viewport(
                    &b.rect(),
                    self.viewport.zoom,
                    self.viewport.scroll_offset,
                    &self.layout,
                )
            })
            .collect()
    }

    /// Screen rectangle of the gesture preview (new box, rubber band or
    /// resized box), if any.
    pub fn preview_rect(&self) -> Option<ScreenRect> {
        self.interaction
            .preview_rect()
            .map(|r| transform::transform_box_to_screen(&r, self.viewport.zoom))
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Backing surface for a time-axis layer `height` logical pixels tall.
    pub fn canvas_size(&self, height: f64) -> CanvasSize {
        transform::canvas_size(
            self.viewport.content_width,
            height,
            self.viewport.zoom,
            self.viewport.device_pixel_ratio,
        )
    }
}
