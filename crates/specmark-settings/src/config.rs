//! Configuration and settings management for Specmark
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Viewport settings (zoom bounds, zoom step, pixel ratio cap)
//! - Geometry settings (minimum box size, handle radius, duplicate offset, grid)
//! - History settings (undo depth)
//! - Persistence limits applied to records on load and save
//! - Optional layout override

use serde::{Deserialize, Serialize};
use specmark_core::constants::{
    DEFAULT_DUPLICATE_OFFSET, DEFAULT_HANDLE_RADIUS, DEFAULT_MIN_BOX_SIZE, MAX_DEVICE_PIXEL_RATIO,
};
use specmark_core::LayoutConstants;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Viewport and zoom settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    /// Smallest allowed zoom level
    pub min_zoom: f64,
    /// Largest allowed zoom level
    pub max_zoom: f64,
    /// Multiplier applied by a single zoom-in step
    pub zoom_step: f64,
    /// Cap on the device pixel ratio used for backing surfaces
    pub max_device_pixel_ratio: f64,
}

impl ViewportSettings {
    /// Bounds used by the spectrogram/waveform editor.
    pub fn spectrogram() -> Self {
        Self {
            min_zoom: 1.0,
            max_zoom: 6.0,
            zoom_step: 1.2,
            max_device_pixel_ratio: MAX_DEVICE_PIXEL_RATIO,
        }
    }

    /// Wider bounds used by the general drawing canvas.
    pub fn canvas() -> Self {
        Self {
            min_zoom: 0.5,
            max_zoom: 10.0,
            ..Self::spectrogram()
        }
    }
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self::spectrogram()
    }
}

/// Box geometry settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometrySettings {
    /// Minimum width/height a resize may produce, in pixels
    pub min_box_size: f64,
    /// Distance from a corner at which the handle is grabbed, in pixels
    pub handle_radius: f64,
    /// Horizontal offset applied to duplicated boxes
    pub duplicate_offset_x: f64,
    /// Vertical offset applied to duplicated boxes
    pub duplicate_offset_y: f64,
    /// Grid spacing used for snapping, in pixels
    pub grid_size: f64,
    /// Snap committed geometry to the grid
    pub snap_to_grid: bool,
}

impl Default for GeometrySettings {
    fn default() -> Self {
        Self {
            min_box_size: DEFAULT_MIN_BOX_SIZE,
            handle_radius: DEFAULT_HANDLE_RADIUS,
            duplicate_offset_x: DEFAULT_DUPLICATE_OFFSET.0,
            duplicate_offset_y: DEFAULT_DUPLICATE_OFFSET.1,
            grid_size: 10.0,
            snap_to_grid: false,
        }
    }
}

/// Undo history settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of undoable edits kept
    pub max_depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { max_depth: 100 }
    }
}

/// Limits applied to box records crossing the persistence boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceSettings {
    /// Largest accepted x/y/width/height value
    pub max_coordinate: f64,
    /// Largest accepted end time, in seconds
    pub max_duration: f64,
    /// Largest accepted frequency, in Hz
    pub max_frequency: f64,
}

impl Default for PersistenceSettings {
    fn default() -> Self {
        Self {
            max_coordinate: 10_000.0,
            max_duration: 3600.0,
            max_frequency: 48_000.0,
        }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EditorConfig {
    /// Zoom and pixel ratio settings
    pub viewport: ViewportSettings,
    /// Box geometry settings
    pub geometry: GeometrySettings,
    /// Undo history settings
    pub history: HistorySettings,
    /// Persistence limits
    pub persistence: PersistenceSettings,
    /// Optional replacement for the default canvas layout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutConstants>,
}

impl EditorConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// The layout in effect: the configured override or the default.
    pub fn layout(&self) -> LayoutConstants {
        self.layout.unwrap_or(LayoutConstants::DEFAULT)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                )
                .into())
            }
        };

        config.validate()?;
        info!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                )
                .into())
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        info!("Saved editor config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let vp = &self.viewport;
        if !(vp.min_zoom > 0.0) {
            return Err(invalid("viewport.min_zoom", "must be > 0"));
        }
        if vp.min_zoom > vp.max_zoom {
            return Err(invalid("viewport.max_zoom", "must be >= min_zoom"));
        }
        if !(vp.zoom_step > 1.0) {
            return Err(invalid("viewport.zoom_step", "must be > 1"));
        }
        if !(vp.max_device_pixel_ratio >= 1.0) {
            return Err(invalid("viewport.max_device_pixel_ratio", "must be >= 1"));
        }

        let geo = &self.geometry;
        if !(geo.min_box_size > 0.0) {
            return Err(invalid("geometry.min_box_size", "must be > 0"));
        }
        if !(geo.handle_radius >= 0.0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "geometry.handle_radius".to_string(),
                value: geo.handle_radius.to_string(),
            }
            .into());
        }
        if !geo.duplicate_offset_x.is_finite() || !geo.duplicate_offset_y.is_finite() {
            return Err(invalid("geometry.duplicate_offset", "must be finite"));
        }
        if geo.snap_to_grid && !(geo.grid_size > 0.0) {
            return Err(invalid("geometry.grid_size", "must be > 0 when snapping"));
        }

        if self.history.max_depth == 0 {
            return Err(invalid("history.max_depth", "must be >= 1"));
        }

        let p = &self.persistence;
        if !(p.max_coordinate > 0.0 && p.max_duration > 0.0 && p.max_frequency > 0.0) {
            return Err(invalid("persistence", "limits must be > 0"));
        }

        if let Some(layout) = &self.layout {
            layout
                .validate()
                .map_err(|e| invalid("layout", &e.to_string()))?;
        }

        Ok(())
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: &EditorConfig) {
        self.viewport = other.viewport;
        self.geometry = other.geometry;
        self.history = other.history;
        self.persistence = other.persistence;
        if other.layout.is_some() {
            self.layout = other.layout;
        }
    }

    /// Platform config directory for Specmark.
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("specmark"))
            .ok_or_else(|| {
                ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()).into()
            })
    }

    /// Default location of the editor config file.
    pub fn default_config_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join("editor.toml"))
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

fn invalid(key: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidSetting {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
