//! Persistence boundary for annotation documents.
//!
//! A document is the ordered list of boxes for one recording, stored as
//! JSON. Records are validated in both directions: the bounding-box
//! invariants first, then the record limits from [`PersistenceSettings`].

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use specmark_core::{Error, Result, ValidationError};
use specmark_settings::PersistenceSettings;
use tracing::{info, warn};

use crate::model::BoundingBox;

/// Document format version
const FILE_FORMAT_VERSION: &str = "1.0";

fn default_version() -> String {
    FILE_FORMAT_VERSION.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationDocument {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub recording_id: Option<i64>,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub bounding_boxes: Vec<BoundingBox>,
}

impl AnnotationDocument {
    pub fn new(bounding_boxes: Vec<BoundingBox>) -> Self {
        Self {
            version: default_version(),
            recording_id: None,
            saved_at: None,
            bounding_boxes,
        }
    }

    pub fn with_recording_id(mut self, recording_id: i64) -> Self {
        self.recording_id = Some(recording_id);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates every record, reporting the first failure with its index.
    pub fn validate(&self, limits: &PersistenceSettings) -> Result<()> {
        for (index, record) in self.bounding_boxes.iter().enumerate() {
            record
                .validate()
                .map_err(|source| Error::InvalidRecord { index, source })?;
            validate_record(record, limits).map_err(|source| Error::Validation { index, source })?;
        }
        Ok(())
    }

    /// Reads and validates a document.
    pub fn load_from_file(path: impl AsRef<Path>, limits: &PersistenceSettings) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let document = Self::from_json(&content)?;
        if let Err(e) = document.validate(limits) {
            warn!("Rejected annotation document {}: {}", path.display(), e);
            return Err(e);
        }
        info!(
            "Loaded {} boxes from {}",
            document.bounding_boxes.len(),
            path.display()
        );
        Ok(document)
    }

    /// Validates, stamps `saved_at` and writes the document.
    pub fn save_to_file(
        &mut self,
        path: impl AsRef<Path>,
        limits: &PersistenceSettings,
    ) -> Result<()> {
        let path = path.as_ref();
        self.validate(limits)?;
        self.saved_at = Some(Utc::now());
        std::fs::write(path, self.to_json()?)?;
        info!(
            "Saved {} boxes to {}",
            self.bounding_boxes.len(),
            path.display()
        );
        Ok(())
    }
}

fn check_coordinate(field: &'static str, value: f64, limit: f64) -> std::result::Result<(), ValidationError> {
    if value < 0.0 {
        return Err(ValidationError::NegativeCoordinate { field, value });
    }
    if value > limit {
        return Err(ValidationError::CoordinateTooLarge { field, value, limit });
    }
    Ok(())
}

/// Record limits accepted by the annotation store.
///
/// Coordinates must lie in `[0, max_coordinate]`, times must start at or
/// after zero and end within `max_duration`, frequencies must lie in
/// `[0, max_frequency]`, and the label must not be blank.
pub fn validate_record(
    record: &BoundingBox,
    limits: &PersistenceSettings,
) -> std::result::Result<(), ValidationError> {
    check_coordinate("x", record.x, limits.max_coordinate)?;
    check_coordinate("y", record.y, limits.max_coordinate)?;
    check_coordinate("width", record.width, limits.max_coordinate)?;
    check_coordinate("height", record.height, limits.max_coordinate)?;

    if record.start_time < 0.0 {
        return Err(ValidationError::NegativeStartTime {
            start: record.start_time,
        });
    }
    if record.end_time > limits.max_duration {
        return Err(ValidationError::DurationExceeded {
            end: record.end_time,
            limit: limits.max_duration,
        });
    }

    if let Some(min) = record.min_frequency {
        if min < 0.0 {
            return Err(ValidationError::NegativeFrequency { min });
        }
    }
    if let Some(max) = record.max_frequency {
        if max > limits.max_frequency {
            return Err(ValidationError::FrequencyAboveLimit {
                max,
                limit: limits.max_frequency,
            });
        }
    }

    if record.label.trim().is_empty() {
        return Err(ValidationError::EmptyLabel);
    }
    Ok(())
}

/// Index-based difference between two box lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxDiff {
    /// Boxes present only in the current list, with their indices
    pub added: Vec<(usize, BoundingBox)>,
    /// Boxes present only in the previous list, with their indices
    pub removed: Vec<(usize, BoundingBox)>,
    /// Indices present in both whose contents differ, with the new box
    pub modified: Vec<(usize, BoundingBox)>,
}

impl BoxDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    pub fn change_count(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }
}

/// Compares `previous` and `current` position by position.
pub fn diff(previous: &[BoundingBox], current: &[BoundingBox]) -> BoxDiff {
    let shared = previous.len().min(current.len());
    let modified = (0..shared)
        .filter(|&i| previous[i] != current[i])
        .map(|i| (i, current[i].clone()))
        .collect();
    let added = current
        .iter()
        .enumerate()
        .skip(shared)
        .map(|(i, b)| (i, b.clone()))
        .collect();
    let removed = previous
        .iter()
        .enumerate()
        .skip(shared)
        .map(|(i, b)| (i, b.clone()))
        .collect();
    BoxDiff {
        added,
        removed,
        modified,
    }
}
