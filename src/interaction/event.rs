//! Input events consumed by the interaction controller.
//!
//! Positions are in container pixels. Hosts translate their native
//! mouse/touch/text events into these, attaching the hit target that was
//! under the pointer (see [`crate::Canvas::hit_test`]).

use annotext_geometry::Point;

use crate::model::BoxId;

/// Which input device produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Mouse buttons. Touches always report `Primary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
    Other(u16),
}

/// Horizontal edge a resize grip sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeDirection {
    East,
    West,
}

/// The part of a box that was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxPart {
    /// The text area itself
    Body,
    /// The move grip
    DragHandle,
    /// One of the width grips
    Resize(ResizeDirection),
    /// The delete control
    DeleteButton,
}

/// What lies under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Empty canvas background
    Canvas,
    /// A box or one of its controls
    Box { id: BoxId, part: BoxPart },
}

/// Input events the controller reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse button pressed or touch started.
    PointerDown {
        pointer: PointerKind,
        button: MouseButton,
        position: Point,
        target: HitTarget,
    },
    /// Mouse or touch moved.
    PointerMove { pointer: PointerKind, position: Point },
    /// Mouse button released or touch ended.
    PointerUp { pointer: PointerKind, position: Point },
    /// The platform cancelled the pointer sequence.
    PointerCancel,
    /// Primary click or tap (delivered after the matching `PointerUp`).
    Click {
        button: MouseButton,
        position: Point,
        target: HitTarget,
    },
    /// Double-click or double-tap.
    DoubleClick { position: Point, target: HitTarget },
    /// The text of a box was edited.
    TextChanged { id: BoxId, text: String },
    /// A box lost text focus.
    FocusLost { id: BoxId },
}

impl InputEvent {
    /// Primary mouse press.
    pub fn mouse_down(position: Point, target: HitTarget) -> Self {
        InputEvent::PointerDown {
            pointer: PointerKind::Mouse,
            button: MouseButton::Primary,
            position,
            target,
        }
    }

    pub fn mouse_move(position: Point) -> Self {
        InputEvent::PointerMove {
            pointer: PointerKind::Mouse,
            position,
        }
    }

    pub fn mouse_up(position: Point) -> Self {
        InputEvent::PointerUp {
            pointer: PointerKind::Mouse,
            position,
        }
    }

    pub fn touch_start(position: Point, target: HitTarget) -> Self {
        InputEvent::PointerDown {
            pointer: PointerKind::Touch,
            button: MouseButton::Primary,
            position,
            target,
        }
    }

    pub fn touch_move(position: Point) -> Self {
        InputEvent::PointerMove {
            pointer: PointerKind::Touch,
            position,
        }
    }

    pub fn touch_end(position: Point) -> Self {
        InputEvent::PointerUp {
            pointer: PointerKind::Touch,
            position,
        }
    }

    /// Primary click or tap.
    pub fn click(position: Point, target: HitTarget) -> Self {
        InputEvent::Click {
            button: MouseButton::Primary,
            position,
            target,
        }
    }
}

/// How an event was handled, and whether the host should suppress its
/// default action (text selection, page scrolling).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Not relevant to the canvas
    Ignored,
    /// Handled; the host's default action may still run
    Handled,
    /// Handled; the host must suppress its default action
    Captured,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }

    pub fn prevents_default(&self) -> bool {
        matches!(self, EventResult::Captured)
    }
}
