//! Transient drag/resize state.
//!
//! Lives only for the duration of one pointer sequence and is reset on
//! pointer-up, pointer-cancel, or touch-end.

use annotext_geometry::Point;

use super::event::ResizeDirection;
use crate::model::BoxId;

/// Where a resize started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeAnchor {
    pub direction: ResizeDirection,
    pub start_pointer_x: f64,
    pub start_width: f64,
    pub start_left: f64,
}

/// The single active interaction, if any.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    /// Moving a box; `offset` is the pointer position relative to the box origin at drag start
    Dragging { box_id: BoxId, offset: Point },
    /// Changing a box's width
    Resizing { box_id: BoxId, anchor: ResizeAnchor },
}

/// Interaction state owned by the controller.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    mode: InteractionMode,
    /// Set when a pointer-up ends a drag/resize so the click that follows
    /// isn't mistaken for a click on empty canvas.
    suppress_click: bool,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.mode, InteractionMode::Idle)
    }

    /// The box being dragged or resized.
    pub fn active_box(&self) -> Option<BoxId> {
        match self.mode {
            InteractionMode::Idle => None,
            InteractionMode::Dragging { box_id, .. } | InteractionMode::Resizing { box_id, .. } => {
                Some(box_id)
            }
        }
    }

    pub fn start_drag(&mut self, box_id: BoxId, offset: Point) {
        self.mode = InteractionMode::Dragging { box_id, offset };
        self.suppress_click = false;
    }

    pub fn start_resize(&mut self, box_id: BoxId, anchor: ResizeAnchor) {
        self.mode = InteractionMode::Resizing { box_id, anchor };
        self.suppress_click = false;
    }

    /// Return to idle. Returns the box that was active, if any.
    pub fn reset(&mut self) -> Option<BoxId> {
        let ended = self.active_box();
        if ended.is_some() {
            self.suppress_click = true;
        }
        self.mode = InteractionMode::Idle;
        ended
    }

    /// Consume the click-suppression flag.
    pub fn take_suppress_click(&mut self) -> bool {
        std::mem::take(&mut self.suppress_click)
    }

    pub(crate) fn clear_suppress_click(&mut self) {
        self.suppress_click = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_lifecycle() {
        let mut state = InteractionState::new();
        assert!(state.is_idle());

        state.start_drag(3, Point::new(5.0, 6.0));
        assert_eq!(state.active_box(), Some(3));

        assert_eq!(state.reset(), Some(3));
        assert!(state.is_idle());
        assert_eq!(state.active_box(), None);
    }

    #[test]
    fn test_reset_when_idle() {
        let mut state = InteractionState::new();
        assert_eq!(state.reset(), None);
        assert!(!state.take_suppress_click());
    }

    #[test]
    fn test_suppress_click_after_interaction() {
        let mut state = InteractionState::new();
        state.start_resize(
            1,
            ResizeAnchor {
                direction: ResizeDirection::East,
                start_pointer_x: 0.0,
                start_width: 100.0,
                start_left: 0.0,
            },
        );
        state.reset();
        assert!(state.take_suppress_click());
        assert!(!state.take_suppress_click());
    }
}
