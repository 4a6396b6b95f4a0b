//! Annotation box types.

use annotext_geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Unique identifier for an annotation box.
pub type BoxId = u64;

/// Focus state of a single box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionState {
    /// Not selected and not focused
    #[default]
    Unselected,
    /// Selected (chrome highlighted), no text focus
    Selected,
    /// Has text-input focus
    Editing,
}

impl SelectionState {
    /// Check if the box has text focus.
    pub fn is_editing(&self) -> bool {
        matches!(self, SelectionState::Editing)
    }
}

/// A free-floating text annotation positioned in container pixels.
///
/// Height is derived from width and text by the owning store and can't be
/// set directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationBox {
    pub(crate) id: BoxId,
    pub(crate) position: Point,
    pub(crate) width: f64,
    pub(crate) height: f64,
    pub(crate) text: String,
    pub(crate) selection: SelectionState,
}

impl AnnotationBox {
    pub fn id(&self) -> BoxId {
        self.id
    }

    /// Top-left corner in container space.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Content-derived height.
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Bounding rectangle of the box body.
    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }
}
