//! Pointer/touch state machine.

use annotext_geometry::Rect;

use super::event::{BoxPart, EventResult, HitTarget, InputEvent, MouseButton};
use super::state::InteractionState;
use super::view::{AnnotationView, InteractionContext, TextBoxView};
use crate::confirm::Confirm;
use crate::constants::labels;
use crate::model::{AnnotationStore, BoxId};

/// Routes input events to box views and owns the interaction state.
///
/// Only one drag or resize can be in flight; presses that arrive while one
/// is active are ignored until the pointer is released.
#[derive(Debug, Clone)]
pub struct InteractionController {
    state: InteractionState,
    min_width: f64,
}

impl InteractionController {
    pub fn new(min_width: f64) -> Self {
        Self {
            state: InteractionState::new(),
            min_width,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn min_width(&self) -> f64 {
        self.min_width
    }

    /// Process one input event.
    ///
    /// `clamp_region` is the rectangle dragged boxes must stay within; it is
    /// recomputed by the caller for every event since the container or image
    /// may have changed size.
    pub fn handle(
        &mut self,
        event: InputEvent,
        store: &mut AnnotationStore,
        clamp_region: Rect,
        confirm: &mut dyn Confirm,
    ) -> EventResult {
        let min_width = self.min_width;
        let mut ctx = InteractionContext {
            store,
            state: &mut self.state,
            clamp_region,
            min_width,
        };

        match event {
            InputEvent::PointerDown {
                button,
                position,
                target,
                ..
            } => {
                if button != MouseButton::Primary {
                    return EventResult::Ignored;
                }
                if !ctx.state.is_idle() {
                    log::warn!("Pointer down while an interaction is active - ignoring");
                    return EventResult::Ignored;
                }
                ctx.state.clear_suppress_click();
                match target {
                    HitTarget::Canvas => EventResult::Ignored,
                    HitTarget::Box { id, part } => {
                        TextBoxView::new(id).on_pointer_down(&mut ctx, part, position)
                    }
                }
            }
            InputEvent::PointerMove { position, .. } => match ctx.state.active_box() {
                Some(id) => TextBoxView::new(id).on_pointer_move(&mut ctx, position),
                None => EventResult::Ignored,
            },
            InputEvent::PointerUp { .. } | InputEvent::PointerCancel => {
                match ctx.state.active_box() {
                    Some(id) => TextBoxView::new(id).on_pointer_up(&mut ctx),
                    None => {
                        ctx.state.reset();
                        EventResult::Ignored
                    }
                }
            }
            InputEvent::Click {
                button,
                position,
                target,
            } => {
                if button != MouseButton::Primary {
                    return EventResult::Ignored;
                }
                let after_interaction = ctx.state.take_suppress_click();
                match target {
                    HitTarget::Canvas if after_interaction => EventResult::Ignored,
                    HitTarget::Canvas => {
                        ctx.store.deselect();
                        let id = ctx.store.create(position);
                        ctx.store.enter_edit(id);
                        log::info!(
                            "📝 New text box {} at ({:.0}, {:.0})",
                            id,
                            position.x,
                            position.y
                        );
                        EventResult::Handled
                    }
                    HitTarget::Box {
                        id,
                        part: BoxPart::DeleteButton,
                    } => Self::delete_with(&mut ctx, id, confirm),
                    HitTarget::Box {
                        id,
                        part: BoxPart::Body,
                    } => {
                        if !ctx.store.contains(id) {
                            return EventResult::Ignored;
                        }
                        if ctx.store.editing() != Some(id) {
                            ctx.store.select(id);
                        }
                        EventResult::Handled
                    }
                    // Handles and grips already selected the box on press
                    HitTarget::Box { .. } => EventResult::Handled,
                }
            }
            InputEvent::DoubleClick { target, .. } => match target {
                HitTarget::Box {
                    id,
                    part: BoxPart::Body,
                } if ctx.store.contains(id) => {
                    ctx.store.enter_edit(id);
                    log::debug!("Editing box {}", id);
                    EventResult::Handled
                }
                _ => EventResult::Ignored,
            },
            InputEvent::TextChanged { id, text } => {
                TextBoxView::new(id).on_text_change(&mut ctx, &text)
            }
            InputEvent::FocusLost { id } => {
                if ctx.store.editing() == Some(id) {
                    ctx.store.exit_edit();
                    EventResult::Handled
                } else {
                    EventResult::Ignored
                }
            }
        }
    }

    /// Delete a box after asking the user. Unknown ids are silently ignored.
    pub fn delete_box(
        &mut self,
        id: BoxId,
        store: &mut AnnotationStore,
        confirm: &mut dyn Confirm,
    ) -> EventResult {
        let mut ctx = InteractionContext {
            store,
            state: &mut self.state,
            clamp_region: Rect::default(),
            min_width: self.min_width,
        };
        Self::delete_with(&mut ctx, id, confirm)
    }

    fn delete_with(
        ctx: &mut InteractionContext<'_>,
        id: BoxId,
        confirm: &mut dyn Confirm,
    ) -> EventResult {
        if !ctx.store.contains(id) {
            return EventResult::Ignored;
        }
        if !confirm.confirm(labels::CONFIRM_DELETE) {
            return EventResult::Handled;
        }
        if ctx.state.active_box() == Some(id) {
            ctx.state.reset();
        }
        ctx.store.delete(id);
        log::info!("🗑️ Deleted text box {}", id);
        EventResult::Handled
    }

    /// Drop any in-flight interaction without a pointer-up.
    pub fn cancel(&mut self) {
        self.state.reset();
    }
}
