//! Specmark Settings Crate
//!
//! Handles editor configuration: viewport bounds, geometry tolerances,
//! history depth and persistence limits, loaded from JSON or TOML.

pub mod config;
pub mod error;

pub use config::{
    EditorConfig, GeometrySettings, HistorySettings, PersistenceSettings, ViewportSettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
