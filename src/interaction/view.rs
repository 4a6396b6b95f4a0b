//! Per-box event handling.
//!
//! The controller routes pointer and text events to an [`AnnotationView`]
//! for the box involved, handing it an [`InteractionContext`] with the model
//! and interaction state it may mutate.

use annotext_geometry::{Point, Rect};

use super::event::{BoxPart, EventResult, ResizeDirection};
use super::state::{InteractionMode, InteractionState, ResizeAnchor};
use crate::model::{AnnotationStore, BoxId};

/// Everything a view may read or mutate while handling one event.
pub struct InteractionContext<'a> {
    pub store: &'a mut AnnotationStore,
    pub state: &'a mut InteractionState,
    /// Rectangle a dragged box must stay inside
    pub clamp_region: Rect,
    /// Narrowest width a resize may produce
    pub min_width: f64,
}

/// Event capabilities of an annotation on the canvas.
pub trait AnnotationView {
    /// The box this view handles.
    fn id(&self) -> BoxId;

    /// Pointer pressed on `part` of this box.
    fn on_pointer_down(
        &self,
        ctx: &mut InteractionContext<'_>,
        part: BoxPart,
        position: Point,
    ) -> EventResult;

    /// Pointer moved while this box is the active interaction.
    fn on_pointer_move(&self, ctx: &mut InteractionContext<'_>, position: Point) -> EventResult;

    /// Pointer released or cancelled while this box is the active interaction.
    fn on_pointer_up(&self, ctx: &mut InteractionContext<'_>) -> EventResult;

    /// The box's text was edited.
    fn on_text_change(&self, ctx: &mut InteractionContext<'_>, text: &str) -> EventResult;
}

/// The auto-growing text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBoxView {
    id: BoxId,
}

impl TextBoxView {
    pub fn new(id: BoxId) -> Self {
        Self { id }
    }

    fn begin_drag(&self, ctx: &mut InteractionContext<'_>, position: Point, origin: Point) {
        ctx.store.select(self.id);
        ctx.state.start_drag(self.id, position.offset_from(origin));
        log::debug!("Drag started on box {}", self.id);
    }
}

impl AnnotationView for TextBoxView {
    fn id(&self) -> BoxId {
        self.id
    }

    fn on_pointer_down(
        &self,
        ctx: &mut InteractionContext<'_>,
        part: BoxPart,
        position: Point,
    ) -> EventResult {
        let Some(b) = ctx.store.get(self.id) else {
            return EventResult::Ignored;
        };
        let origin = b.position();
        let width = b.width();
        let editing = b.selection().is_editing();

        match part {
            // Pressing inside a focused box places the caret
            BoxPart::Body if editing => EventResult::Handled,
            BoxPart::Body | BoxPart::DragHandle => {
                self.begin_drag(ctx, position, origin);
                EventResult::Captured
            }
            BoxPart::Resize(direction) => {
                ctx.store.select(self.id);
                ctx.state.start_resize(
                    self.id,
                    ResizeAnchor {
                        direction,
                        start_pointer_x: position.x,
                        start_width: width,
                        start_left: origin.x,
                    },
                );
                log::debug!("Resize ({:?}) started on box {}", direction, self.id);
                EventResult::Captured
            }
            // Deletion happens on click, after confirmation
            BoxPart::DeleteButton => EventResult::Handled,
        }
    }

    fn on_pointer_move(&self, ctx: &mut InteractionContext<'_>, position: Point) -> EventResult {
        // The box may have been deleted mid-interaction; the gesture still
        // owns the pointer until it ends
        let Some(b) = ctx.store.get(self.id) else {
            return if ctx.state.active_box() == Some(self.id) {
                EventResult::Captured
            } else {
                EventResult::Ignored
            };
        };
        let current = b.position();
        let size = b.size();

        match ctx.state.mode() {
            InteractionMode::Dragging { box_id, offset } if box_id == self.id => {
                let wanted = position.offset_from(offset);
                let clamped = ctx.clamp_region.clamp_origin(wanted, size);
                ctx.store.move_to(self.id, clamped);
                EventResult::Captured
            }
            InteractionMode::Resizing { box_id, anchor } if box_id == self.id => {
                let delta = position.x - anchor.start_pointer_x;
                let (width, left) = match anchor.direction {
                    ResizeDirection::East => {
                        ((anchor.start_width + delta).max(ctx.min_width), current.x)
                    }
                    ResizeDirection::West => {
                        let wanted = anchor.start_width - delta;
                        if wanted < ctx.min_width {
                            // At minimum width the left edge stays put
                            (ctx.min_width, current.x)
                        } else {
                            (wanted, anchor.start_left + delta)
                        }
                    }
                };
                ctx.store.resize(self.id, width);
                ctx.store.move_to(self.id, Point::new(left, current.y));
                EventResult::Captured
            }
            _ => EventResult::Ignored,
        }
    }

    fn on_pointer_up(&self, ctx: &mut InteractionContext<'_>) -> EventResult {
        match ctx.state.reset() {
            Some(id) => {
                log::debug!("Interaction on box {} ended", id);
                EventResult::Handled
            }
            None => EventResult::Ignored,
        }
    }

    fn on_text_change(&self, ctx: &mut InteractionContext<'_>, text: &str) -> EventResult {
        if ctx.store.set_text(self.id, text) {
            EventResult::Handled
        } else {
            EventResult::Ignored
        }
    }
}
