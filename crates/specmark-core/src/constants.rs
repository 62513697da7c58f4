//! Canvas layout constants.
//!
//! The editor canvas is split into a fixed-width frequency-scale gutter on
//! the left and three horizontal bands stacked top to bottom: spectrogram,
//! timeline, waveform. Band sizes are fractions of the total canvas height.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default handle radius in pixels.
pub const DEFAULT_HANDLE_RADIUS: f64 = 8.0;

/// Default minimum box edge in pixels.
pub const DEFAULT_MIN_BOX_SIZE: f64 = 10.0;

/// Default offset applied to duplicated boxes.
pub const DEFAULT_DUPLICATE_OFFSET: (f64, f64) = (20.0, 20.0);

/// Upper bound on the device pixel ratio used for backing surfaces.
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 4.0;

/// Immutable description of how the canvas is partitioned.
///
/// A different layout means a different `LayoutConstants` value; the fields
/// are private so an existing value can never be changed in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConstants {
    frequency_scale_width: f64,
    spectrogram_height_ratio: f64,
    timeline_top_ratio: f64,
    timeline_height_ratio: f64,
    waveform_top_ratio: f64,
    waveform_height_ratio: f64,
}

impl LayoutConstants {
    /// The layout used by the spectrogram editor.
    pub const DEFAULT: LayoutConstants = LayoutConstants {
        frequency_scale_width: 40.0,
        spectrogram_height_ratio: 0.6,
        timeline_top_ratio: 0.6,
        timeline_height_ratio: 0.05,
        waveform_top_ratio: 0.65,
        waveform_height_ratio: 0.35,
    };

    /// Builds a validated layout.
    pub fn new(
        frequency_scale_width: f64,
        spectrogram_height_ratio: f64,
        timeline_top_ratio: f64,
        timeline_height_ratio: f64,
        waveform_top_ratio: f64,
        waveform_height_ratio: f64,
    ) -> Result<Self> {
        let layout = Self {
            frequency_scale_width,
            spectrogram_height_ratio,
            timeline_top_ratio,
            timeline_height_ratio,
            waveform_top_ratio,
            waveform_height_ratio,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Checks that every ratio is a fraction and the bands fit the canvas.
    pub fn validate(&self) -> Result<()> {
        if !self.frequency_scale_width.is_finite() || self.frequency_scale_width < 0.0 {
            return Err(Error::other("Frequency scale width must be >= 0"));
        }

        let ratios = [
            ("spectrogram_height_ratio", self.spectrogram_height_ratio),
            ("timeline_top_ratio", self.timeline_top_ratio),
            ("timeline_height_ratio", self.timeline_height_ratio),
            ("waveform_top_ratio", self.waveform_top_ratio),
            ("waveform_height_ratio", self.waveform_height_ratio),
        ];
        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::other(format!("{name} must be within [0, 1], got {value}")));
            }
        }

        let total =
            self.spectrogram_height_ratio + self.timeline_height_ratio + self.waveform_height_ratio;
        if total > 1.0 + 1e-9 {
            return Err(Error::other(format!(
                "Layout bands exceed the canvas height (sum = {total})"
            )));
        }

        Ok(())
    }

    pub fn frequency_scale_width(&self) -> f64 {
        self.frequency_scale_width
    }

    pub fn spectrogram_height_ratio(&self) -> f64 {
        self.spectrogram_height_ratio
    }

    pub fn timeline_top_ratio(&self) -> f64 {
        self.timeline_top_ratio
    }

    pub fn timeline_height_ratio(&self) -> f64 {
        self.timeline_height_ratio
    }

    pub fn waveform_top_ratio(&self) -> f64 {
        self.waveform_top_ratio
    }

    pub fn waveform_height_ratio(&self) -> f64 {
        self.waveform_height_ratio
    }

    /// Width left for content once the gutter is removed. Never negative.
    pub fn content_width(&self, total_width: f64) -> f64 {
        (total_width - self.frequency_scale_width).max(0.0)
    }

    /// Height of the spectrogram band for a canvas of `total_height`.
    pub fn spectrogram_height(&self, total_height: f64) -> f64 {
        total_height * self.spectrogram_height_ratio
    }

    /// `(top, height)` of the timeline band in pixels.
    pub fn timeline_band(&self, total_height: f64) -> (f64, f64) {
        (
            total_height * self.timeline_top_ratio,
            total_height * self.timeline_height_ratio,
        )
    }

    /// `(top, height)` of the waveform band in pixels.
    pub fn waveform_band(&self, total_height: f64) -> (f64, f64) {
        (
            total_height * self.waveform_top_ratio,
            total_height * self.waveform_height_ratio,
        )
    }
}

impl Default for LayoutConstants {
    fn default() -> Self {
        Self::DEFAULT
    }
}
