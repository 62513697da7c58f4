use serde::{Deserialize, Serialize};
use specmark_core::{GeometryError, LayoutConstants};

use super::{ContentDims, Rect};
use crate::transform;

/// Label assigned to boxes drawn without one.
pub const DEFAULT_LABEL: &str = "None";

fn default_label() -> String {
    DEFAULT_LABEL.to_string()
}

/// An annotated time/frequency region.
///
/// `x`, `y`, `width`, `height` live in world pixel space and are the source
/// of truth for interaction; the time and frequency fields are derived from
/// them through [`DomainContext`] whenever the rectangle changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default)]
    pub min_frequency: Option<f64>,
    #[serde(default)]
    pub max_frequency: Option<f64>,
    #[serde(default = "default_label")]
    pub label: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default, alias = "extra_metadata")]
    pub metadata: Option<serde_json::Value>,
}

impl BoundingBox {
    /// Creates a box from a rectangle and an explicit time range.
    pub fn new(rect: Rect, start_time: f64, end_time: f64) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            start_time,
            end_time,
            min_frequency: None,
            max_frequency: None,
            label: default_label(),
            confidence: None,
            metadata: None,
        }
    }

    /// Creates a box whose time/frequency fields are derived from `rect`.
    pub fn from_rect(rect: Rect, ctx: &DomainContext) -> Self {
        let mut bbox = Self::new(rect, 0.0, 0.0);
        bbox.derive_domain_fields(ctx);
        bbox
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Recomputes time and frequency from the current rectangle.
    pub fn derive_domain_fields(&mut self, ctx: &DomainContext) {
        let total_width = ctx.dims.width;
        self.start_time =
            transform::pixel_to_time(self.x, ctx.duration, total_width, 1.0, false, &ctx.layout);
        self.end_time = transform::pixel_to_time(
            self.x + self.width,
            ctx.duration,
            total_width,
            1.0,
            false,
            &ctx.layout,
        );

        let band = ctx.spectrogram_height();
        // Inverted axis: the top edge carries the highest frequency.
        self.max_frequency = Some(transform::pixel_to_frequency(
            self.y,
            ctx.max_frequency,
            band,
        ));
        self.min_frequency = Some(transform::pixel_to_frequency(
            self.y + self.height,
            ctx.max_frequency,
            band,
        ));
    }

    /// Checks the record invariants: positive size, increasing time range,
    /// ordered frequency range, finite coordinates.
    pub fn validate(&self) -> Result<(), GeometryError> {
        for (field, value) in [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
            ("start_time", self.start_time),
            ("end_time", self.end_time),
        ] {
            if !value.is_finite() {
                return Err(GeometryError::NonFinite { field });
            }
        }

        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(GeometryError::DegenerateBox {
                width: self.width,
                height: self.height,
            });
        }

        if self.end_time <= self.start_time {
            return Err(GeometryError::InvalidTimeRange {
                start: self.start_time,
                end: self.end_time,
            });
        }

        if let (Some(min), Some(max)) = (self.min_frequency, self.max_frequency) {
            if max < min {
                return Err(GeometryError::InvalidFrequencyRange { min, max });
            }
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Per-recording inputs needed to map pixels to seconds and Hz.
///
/// Duration and maximum frequency come from the audio metadata service and
/// are treated as read-only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainContext {
    /// Recording duration in seconds
    pub duration: f64,
    /// Nyquist / display ceiling in Hz
    pub max_frequency: f64,
    /// Full canvas size, gutter included
    pub dims: ContentDims,
    pub layout: LayoutConstants,
}

impl DomainContext {
    pub fn new(duration: f64, max_frequency: f64, dims: ContentDims) -> Self {
        Self {
            duration,
            max_frequency,
            dims,
            layout: LayoutConstants::DEFAULT,
        }
    }

    pub fn with_layout(mut self, layout: LayoutConstants) -> Self {
        self.layout = layout;
        self
    }

    /// Width of the time axis in world pixels.
    pub fn content_width(&self) -> f64 {
        self.layout.content_width(self.dims.width)
    }

    /// Height of the band reserved for the spectrogram.
    pub fn spectrogram_height(&self) -> f64 {
        self.layout.spectrogram_height(self.dims.height)
    }
}

impl Default for DomainContext {
    fn default() -> Self {
        Self::new(10.0, 20_000.0, ContentDims::default())
    }
}
