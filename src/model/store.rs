//! Storage for the annotation boxes of one canvas.

use std::collections::BTreeMap;

use annotext_geometry::{Point, TextMetrics};

use super::annotation::{AnnotationBox, BoxId, SelectionState};
use crate::constants::text_box;

/// All annotation boxes on a canvas plus the exclusive focus pointer.
///
/// Ids are handed out monotonically, so iterating the map yields boxes in
/// creation order. At most one box is ever `Selected` or `Editing`; the
/// `focused` field names it.
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    boxes: BTreeMap<BoxId, AnnotationBox>,
    next_id: BoxId,
    focused: Option<BoxId>,
    metrics: TextMetrics,
    default_width: f64,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::with_metrics(TextMetrics::default(), text_box::DEFAULT_WIDTH)
    }

    /// Create a store using custom text metrics and default box width.
    pub fn with_metrics(metrics: TextMetrics, default_width: f64) -> Self {
        Self {
            boxes: BTreeMap::new(),
            next_id: 1,
            focused: None,
            metrics,
            default_width,
        }
    }

    pub fn metrics(&self) -> &TextMetrics {
        &self.metrics
    }

    /// Create an empty, unselected box at `position` and return its id.
    pub fn create(&mut self, position: Point) -> BoxId {
        let id = self.next_id;
        self.next_id += 1;
        let width = self.default_width;
        let height = self.metrics.content_height("", width);
        self.boxes.insert(
            id,
            AnnotationBox {
                id,
                position,
                width,
                height,
                text: String::new(),
                selection: SelectionState::Unselected,
            },
        );
        log::debug!("Created box {} at ({:.1}, {:.1})", id, position.x, position.y);
        id
    }

    /// Remove a box. Unknown ids are a no-op and return `None`.
    pub fn delete(&mut self, id: BoxId) -> Option<AnnotationBox> {
        let removed = self.boxes.remove(&id);
        if removed.is_some() {
            if self.focused == Some(id) {
                self.focused = None;
            }
            log::debug!("Deleted box {}", id);
        }
        removed
    }

    /// Remove every box.
    pub fn clear(&mut self) {
        self.boxes.clear();
        self.focused = None;
    }

    /// Move a box's top-left corner. Returns false for unknown ids.
    pub fn move_to(&mut self, id: BoxId, position: Point) -> bool {
        let Some(b) = self.boxes.get_mut(&id) else {
            return false;
        };
        b.position = position;
        true
    }

    /// Set a box's width and re-derive its height. Returns false for unknown ids.
    pub fn resize(&mut self, id: BoxId, width: f64) -> bool {
        let metrics = self.metrics;
        let Some(b) = self.boxes.get_mut(&id) else {
            return false;
        };
        b.width = width;
        b.height = metrics.content_height(&b.text, width);
        true
    }

    /// Replace a box's text and re-derive its height. Returns false for unknown ids.
    pub fn set_text(&mut self, id: BoxId, text: impl Into<String>) -> bool {
        let metrics = self.metrics;
        let Some(b) = self.boxes.get_mut(&id) else {
            return false;
        };
        b.text = text.into();
        b.height = metrics.content_height(&b.text, b.width);
        true
    }

    /// Move focus to `id` with the given state, clearing whichever box held it.
    fn focus(&mut self, id: BoxId, state: SelectionState) {
        if !self.boxes.contains_key(&id) {
            return;
        }
        if let Some(prev) = self.focused.filter(|prev| *prev != id) {
            if let Some(b) = self.boxes.get_mut(&prev) {
                b.selection = SelectionState::Unselected;
            }
        }
        if let Some(b) = self.boxes.get_mut(&id) {
            b.selection = state;
        }
        self.focused = Some(id);
    }

    /// Select a box, deselecting (and unfocusing) any other box first.
    pub fn select(&mut self, id: BoxId) {
        self.focus(id, SelectionState::Selected);
    }

    /// Give a box text focus; any previously selected or focused box is cleared.
    pub fn enter_edit(&mut self, id: BoxId) {
        self.focus(id, SelectionState::Editing);
    }

    /// Clear whichever box is selected or being edited.
    pub fn deselect(&mut self) {
        if let Some(prev) = self.focused.take() {
            if let Some(b) = self.boxes.get_mut(&prev) {
                b.selection = SelectionState::Unselected;
            }
        }
    }

    /// Drop text focus. The box that was being edited becomes unselected.
    pub fn exit_edit(&mut self) {
        if self.editing().is_some() {
            self.deselect();
        }
    }

    /// The box currently selected or being edited, if any.
    pub fn focused(&self) -> Option<BoxId> {
        self.focused
    }

    /// The box currently marked `Selected`, if any.
    pub fn selected(&self) -> Option<BoxId> {
        self.focused
            .filter(|id| self.state_of(*id) == Some(SelectionState::Selected))
    }

    /// The box currently marked `Editing`, if any.
    pub fn editing(&self) -> Option<BoxId> {
        self.focused
            .filter(|id| self.state_of(*id) == Some(SelectionState::Editing))
    }

    fn state_of(&self, id: BoxId) -> Option<SelectionState> {
        self.boxes.get(&id).map(|b| b.selection)
    }

    pub fn get(&self, id: BoxId) -> Option<&AnnotationBox> {
        self.boxes.get(&id)
    }

    pub fn contains(&self, id: BoxId) -> bool {
        self.boxes.contains_key(&id)
    }

    /// All boxes in creation order.
    pub fn list(&self) -> impl DoubleEndedIterator<Item = &AnnotationBox> {
        self.boxes.values()
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

impl Default for AnnotationStore {
    fn default() -> Self {
        Self::new()
    }
}
