//! Bounding-box geometry: hit-testing, handles, creation, resize, move and
//! bounds constraint. All rectangles are in world pixel space.

use serde::{Deserialize, Serialize};
use specmark_core::{GeometryError, LayoutConstants};

use crate::model::{BoundingBox, ContentDims, DomainContext, Point, Rect};

/// Corner handle used to resize a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    Nw,
    Ne,
    Sw,
    Se,
}

impl Handle {
    pub const ALL: [Handle; 4] = [Handle::Nw, Handle::Ne, Handle::Sw, Handle::Se];

    /// Corner of `rect` this handle sits on.
    pub fn position(&self, rect: &Rect) -> Point {
        match self {
            Handle::Nw => Point::new(rect.x, rect.y),
            Handle::Ne => Point::new(rect.right(), rect.y),
            Handle::Sw => Point::new(rect.x, rect.bottom()),
            Handle::Se => Point::new(rect.right(), rect.bottom()),
        }
    }

    /// The diagonally opposite handle, which stays fixed during a resize.
    pub fn opposite(&self) -> Handle {
        match self {
            Handle::Nw => Handle::Se,
            Handle::Ne => Handle::Sw,
            Handle::Sw => Handle::Ne,
            Handle::Se => Handle::Nw,
        }
    }
}

/// Drawable area for boxes: `[0, max_x] x [0, max_y]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(max_x: f64, max_y: f64) -> Self {
        Self {
            max_x: max_x.max(0.0),
            max_y: max_y.max(0.0),
        }
    }

    /// Content width without the gutter by the spectrogram band height.
    pub fn from_content(dims: ContentDims, layout: &LayoutConstants) -> Self {
        Self::new(
            layout.content_width(dims.width),
            layout.spectrogram_height(dims.height),
        )
    }

    pub fn from_context(ctx: &DomainContext) -> Self {
        Self::from_content(ctx.dims, &ctx.layout)
    }

    /// Whether `rect` lies inside the bounds, allowing for rounding at the
    /// far edges.
    pub fn contains_rect(&self, rect: &Rect) -> bool {
        const TOLERANCE: f64 = 1e-9;
        rect.x >= 0.0
            && rect.y >= 0.0
            && rect.right() <= self.max_x + TOLERANCE
            && rect.bottom() <= self.max_y + TOLERANCE
    }

    fn clamp_point(&self, point: Point) -> Point {
        Point::new(point.x.clamp(0.0, self.max_x), point.y.clamp(0.0, self.max_y))
    }
}

/// Closed-interval containment on both axes.
pub fn is_point_in_box(point: Point, rect: &Rect) -> bool {
    point.x >= rect.x && point.x <= rect.right() && point.y >= rect.y && point.y <= rect.bottom()
}

/// Index of the top-most box containing `point`. Later boxes are drawn on
/// top, so the scan runs back to front.
pub fn find_box_at_point(point: Point, boxes: &[BoundingBox]) -> Option<usize> {
    boxes
        .iter()
        .enumerate()
        .rev()
        .find(|(_, b)| is_point_in_box(point, &b.rect()))
        .map(|(i, _)| i)
}

/// Handle of `rect` within `radius` of `point`, if any.
pub fn find_handle_at_point(point: Point, rect: &Rect, radius: f64) -> Option<Handle> {
    Handle::ALL
        .into_iter()
        .find(|h| h.position(rect).distance_to(&point) <= radius)
}

/// Top-most `(index, handle)` among `candidates` under `point`.
pub fn find_handle_in(
    point: Point,
    boxes: &[BoundingBox],
    candidates: &[usize],
    radius: f64,
) -> Option<(usize, Handle)> {
    let mut ordered: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|&i| i < boxes.len())
        .collect();
    ordered.sort_unstable();
    ordered
        .into_iter()
        .rev()
        .find_map(|i| find_handle_at_point(point, &boxes[i].rect(), radius).map(|h| (i, h)))
}

/// Rejects rectangles without positive area.
pub fn ensure_non_degenerate(rect: Rect) -> Result<Rect, GeometryError> {
    if rect.has_area() {
        Ok(rect)
    } else {
        Err(GeometryError::DegenerateBox {
            width: rect.width,
            height: rect.height,
        })
    }
}

/// Clamps position first, then shrinks width and height so the rectangle
/// never extends past the bounds.
pub fn constrain_to_bounds(rect: Rect, bounds: &Bounds) -> Rect {
    let rect = rect.normalized();
    let x = rect.x.clamp(0.0, bounds.max_x);
    let y = rect.y.clamp(0.0, bounds.max_y);
    Rect::new(
        x,
        y,
        rect.width.min(bounds.max_x - x),
        rect.height.min(bounds.max_y - y),
    )
}

/// Creates a box from a drag between two world points.
///
/// The rectangle is normalized, constrained to the spectrogram band, and
/// its time/frequency fields are derived from the content-area dimensions.
pub fn create_box_from_drag(
    start: Point,
    end: Point,
    ctx: &DomainContext,
) -> Result<BoundingBox, GeometryError> {
    let rect = constrain_to_bounds(Rect::from_corners(start, end), &Bounds::from_context(ctx));
    let rect = ensure_non_degenerate(rect)?;
    let bbox = BoundingBox::from_rect(rect, ctx);
    bbox.validate()?;
    Ok(bbox)
}

/// Resizes `initial` by dragging `handle` to `point`.
///
/// The opposite corner is held fixed and neither edge may shrink below
/// `min_size`, except where the held edge lies closer than `min_size` to
/// the origin of the bounds. The pointer is clamped into the bounds before
/// the handle is applied, and the result is constrained afterwards.
pub fn resize_rect(
    initial: &Rect,
    handle: Handle,
    point: Point,
    min_size: f64,
    bounds: &Bounds,
) -> Rect {
    let p = bounds.clamp_point(point);
    let right = initial.right();
    let bottom = initial.bottom();

    let (x, width) = match handle {
        Handle::Nw | Handle::Sw => {
            let x = p.x.min(right - min_size).max(0.0);
            (x, right - x)
        }
        Handle::Ne | Handle::Se => (initial.x, (p.x - initial.x).max(min_size)),
    };

    let (y, height) = match handle {
        Handle::Nw | Handle::Ne => {
            let y = p.y.min(bottom - min_size).max(0.0);
            (y, bottom - y)
        }
        Handle::Sw | Handle::Se => (initial.y, (p.y - initial.y).max(min_size)),
    };

    constrain_to_bounds(Rect::new(x, y, width, height), bounds)
}

/// Translates `rect` by `(dx, dy)` and clamps its position so the whole
/// rectangle stays inside the bounds. Size is left alone unless it is
/// larger than the bounds themselves.
pub fn move_rect(rect: &Rect, dx: f64, dy: f64, bounds: &Bounds) -> Rect {
    let moved = rect.translated(dx, dy);
    let x = moved.x.clamp(0.0, (bounds.max_x - rect.width).max(0.0));
    let y = moved.y.clamp(0.0, (bounds.max_y - rect.height).max(0.0));
    constrain_to_bounds(Rect::new(x, y, rect.width, rect.height), bounds)
}
