//! Pointer, touch and text interaction with annotation boxes.
//!
//! Hosts hit-test raw input against the canvas, wrap it in an
//! [`InputEvent`], and feed it to the [`InteractionController`], which
//! dispatches to the [`AnnotationView`] of the box involved.

mod controller;
mod event;
mod state;
mod view;

pub use controller::InteractionController;
pub use event::{
    BoxPart, EventResult, HitTarget, InputEvent, MouseButton, PointerKind, ResizeDirection,
};
pub use state::{InteractionMode, InteractionState, ResizeAnchor};
pub use view::{AnnotationView, InteractionContext, TextBoxView};
