//! # Specmark Core
//!
//! Core types shared by every Specmark crate: the fixed canvas layout
//! ratios and the error taxonomy used at the persistence and configuration
//! boundaries.

pub mod constants;
pub mod error;

pub use constants::LayoutConstants;
pub use error::{Error, GeometryError, Result, ValidationError};
