use specmark_core::{Error, GeometryError, Result};
use tracing::debug;

use super::BoundingBox;

/// Ordered collection of committed boxes. Index order is draw order: the
/// last entry is drawn on top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxCollection {
    boxes: Vec<BoundingBox>,
}

impl BoxCollection {
    pub fn new() -> Self {
        Self { boxes: Vec::new() }
    }

    /// Builds a collection from loaded records. Fails on the first invalid
    /// record and keeps nothing.
    pub fn load(records: Vec<BoundingBox>) -> Result<Self> {
        for (index, record) in records.iter().enumerate() {
            record
                .validate()
                .map_err(|source| Error::InvalidRecord { index, source })?;
        }
        Ok(Self { boxes: records })
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&BoundingBox> {
        self.boxes.get(index)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &BoundingBox> {
        self.boxes.iter()
    }

    pub fn as_slice(&self) -> &[BoundingBox] {
        &self.boxes
    }

    /// Appends a box after validating it. Returns the new index.
    pub fn push(&mut self, bbox: BoundingBox) -> std::result::Result<usize, GeometryError> {
        if let Err(e) = bbox.validate() {
            debug!("Rejected box: {}", e);
            return Err(e);
        }
        self.boxes.push(bbox);
        Ok(self.boxes.len() - 1)
    }

    /// Inserts a validated box at `index` (clamped to the end).
    pub fn insert(&mut self, index: usize, bbox: BoundingBox) -> std::result::Result<(), GeometryError> {
        bbox.validate()?;
        let index = index.min(self.boxes.len());
        self.boxes.insert(index, bbox);
        Ok(())
    }

    /// Replaces the box at `index`, keeping the old one if the new one is invalid.
    pub fn replace(
        &mut self,
        index: usize,
        bbox: BoundingBox,
    ) -> std::result::Result<BoundingBox, GeometryError> {
        let len = self.boxes.len();
        let slot = self
            .boxes
            .get_mut(index)
            .ok_or(GeometryError::IndexOutOfRange { index, len })?;
        bbox.validate()?;
        Ok(std::mem::replace(slot, bbox))
    }

    pub fn remove(&mut self, index: usize) -> Option<BoundingBox> {
        if index < self.boxes.len() {
            Some(self.boxes.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.boxes.clear();
    }

    pub fn to_records(&self) -> Vec<BoundingBox> {
        self.boxes.clone()
    }
}
