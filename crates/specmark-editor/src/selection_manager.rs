use crate::arrange::rects_overlap;
use crate::model::{BoundingBox, Rect};

/// Indices of boxes intersecting `selection` with positive area.
///
/// The selection rectangle may have negative width or height; it is
/// normalized first.
pub fn boxes_in_rect(boxes: &[BoundingBox], selection: &Rect) -> Vec<usize> {
    let selection = selection.normalized();
    boxes
        .iter()
        .enumerate()
        .filter(|(_, b)| rects_overlap(&b.rect(), &selection))
        .map(|(i, _)| i)
        .collect()
}

/// Tracks which boxes are selected.
///
/// Indices are kept in the order they were selected; the last one is the
/// primary selection. Multi-object operations that care about order (such
/// as distribution) sort on their own.
///
/// # Selection Model
///
/// - **Single click**: replaces the selection with one box
/// - **Shift+click**: toggles one box without touching the others
/// - **Rubber band**: selects every box overlapping the dragged rectangle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionManager {
    selected: Vec<usize>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use specmark_editor::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert!(manager.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            selected: Vec::new(),
        }
    }

    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// The most recently selected index.
    pub fn primary(&self) -> Option<usize> {
        self.selected.last().copied()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn select_only(&mut self, index: usize) {
        self.selected.clear();
        self.selected.push(index);
    }

    pub fn add(&mut self, index: usize) {
        if !self.is_selected(index) {
            self.selected.push(index);
        }
    }

    /// Adds `index` if absent, removes it otherwise.
    pub fn toggle(&mut self, index: usize) {
        if let Some(pos) = self.selected.iter().position(|&i| i == index) {
            self.selected.remove(pos);
        } else {
            self.selected.push(index);
        }
    }

    pub fn set(&mut self, indices: impl IntoIterator<Item = usize>) {
        self.selected.clear();
        for i in indices {
            self.add(i);
        }
    }

    pub fn select_all(&mut self, len: usize) {
        self.set(0..len);
    }

    /// Selects every box overlapping `rect`. With `multi`, the result is
    /// added to the current selection instead of replacing it.
    pub fn select_in_rect(&mut self, boxes: &[BoundingBox], rect: &Rect, multi: bool) {
        if !multi {
            self.selected.clear();
        }
        for i in boxes_in_rect(boxes, rect) {
            self.add(i);
        }
    }

    /// Keeps indices consistent after the box at `index` is removed.
    pub fn on_removed(&mut self, index: usize) {
        self.selected.retain(|&i| i != index);
        for i in &mut self.selected {
            if *i > index {
                *i -= 1;
            }
        }
    }

    /// Drops indices that no longer exist.
    pub fn retain_valid(&mut self, len: usize) {
        self.selected.retain(|&i| i < len);
    }
}
