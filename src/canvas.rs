//! The annotation canvas: boxes over a contain-fit background image.
//!
//! [`Canvas`] ties the annotation store and interaction controller to the
//! live container and image sizes, and carries the presentation flags the
//! export path toggles while a capture is in progress.

use annotext_geometry::{compute_image_bounds, GeometryError, ImageBounds, Point, Rect, Size};

use crate::config::{ChromeConfig, ClampRegion, InteractionConfig};
use crate::confirm::Confirm;
use crate::constants::labels;
use crate::interaction::{
    BoxPart, EventResult, HitTarget, InputEvent, InteractionController, ResizeDirection,
};
use crate::model::{AnnotationBox, AnnotationStore, BoxId};

/// State of the print affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintButton {
    pub enabled: bool,
    pub label: &'static str,
}

impl PrintButton {
    pub fn idle() -> Self {
        Self {
            enabled: true,
            label: labels::PRINT_IDLE,
        }
    }

    pub fn busy() -> Self {
        Self {
            enabled: false,
            label: labels::PRINT_BUSY,
        }
    }
}

impl Default for PrintButton {
    fn default() -> Self {
        Self::idle()
    }
}

/// A container holding a background image and its annotation boxes.
#[derive(Debug, Clone)]
pub struct Canvas {
    store: AnnotationStore,
    controller: InteractionController,
    clamp_policy: ClampRegion,
    chrome: ChromeConfig,
    container: Size,
    /// Intrinsic size of the background image, once known
    image: Option<Size>,
    /// Chrome is hidden while a capture or print is in progress
    printing: bool,
    print_button: PrintButton,
}

impl Canvas {
    /// Create a canvas with default interaction settings.
    pub fn new(container: Size) -> Self {
        Self::with_config(&InteractionConfig::default(), container)
    }

    pub fn with_config(config: &InteractionConfig, container: Size) -> Self {
        Self {
            store: AnnotationStore::with_metrics(config.text, config.default_box_width),
            controller: InteractionController::new(config.min_box_width),
            clamp_policy: config.clamp_region,
            chrome: config.chrome,
            container,
            image: None,
            printing: false,
            print_button: PrintButton::idle(),
        }
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn container_size(&self) -> Size {
        self.container
    }

    /// Update the container size after a layout change. Boxes keep their
    /// pixel positions.
    pub fn set_container_size(&mut self, container: Size) {
        self.container = container;
    }

    pub fn image_size(&self) -> Option<Size> {
        self.image
    }

    /// Record the intrinsic size of the background image once it has loaded.
    pub fn set_image_size(&mut self, image: Size) {
        log::debug!("Background image is {}x{}", image.width, image.height);
        self.image = Some(image);
    }

    pub fn is_printing(&self) -> bool {
        self.printing
    }

    pub fn print_button(&self) -> PrintButton {
        self.print_button
    }

    pub fn clamp_policy(&self) -> ClampRegion {
        self.clamp_policy
    }

    /// Where the image is drawn inside the current container.
    ///
    /// Always derived from the live sizes; never cached.
    pub fn image_bounds(&self) -> Result<ImageBounds, GeometryError> {
        let image = self.image.unwrap_or(Size::new(0.0, 0.0));
        compute_image_bounds(self.container, image)
    }

    /// The rectangle dragged boxes are kept inside.
    ///
    /// Falls back to the whole container while the image size is unknown.
    pub fn clamp_region(&self) -> Rect {
        let whole = Rect::from_size(self.container);
        match self.clamp_policy {
            ClampRegion::Container => whole,
            ClampRegion::Image => self.image_bounds().map(|b| b.rect()).unwrap_or(whole),
        }
    }

    /// Feed one input event through the interaction controller.
    pub fn handle_event(&mut self, event: InputEvent, confirm: &mut dyn Confirm) -> EventResult {
        if self.printing {
            return EventResult::Ignored;
        }
        let region = self.clamp_region();
        self.controller.handle(event, &mut self.store, region, confirm)
    }

    /// Find what lies under `point`, checking the most recently created box first.
    pub fn hit_test(&self, point: Point) -> HitTarget {
        self.store
            .list()
            .rev()
            .find_map(|b| {
                hit_box(b, point, &self.chrome, !self.printing).map(|part| HitTarget::Box {
                    id: b.id(),
                    part,
                })
            })
            .unwrap_or(HitTarget::Canvas)
    }

    /// Delete a box after confirmation. Returns whether it was removed.
    pub fn delete_box(&mut self, id: BoxId, confirm: &mut dyn Confirm) -> bool {
        self.controller.delete_box(id, &mut self.store, confirm);
        !self.store.contains(id)
    }

    /// Remove every box after confirmation. Returns whether anything changed.
    pub fn reset(&mut self, confirm: &mut dyn Confirm) -> bool {
        if !confirm.confirm(labels::CONFIRM_RESET) {
            return false;
        }
        self.controller.cancel();
        let removed = self.store.len();
        self.store.clear();
        log::info!("🧹 Cleared {} text boxes", removed);
        true
    }

    pub(crate) fn store_mut(&mut self) -> &mut AnnotationStore {
        &mut self.store
    }

    /// Enter or leave the printing presentation.
    pub(crate) fn set_printing(&mut self, printing: bool) {
        if printing {
            self.controller.cancel();
            self.store.deselect();
            self.print_button = PrintButton::busy();
        } else {
            self.print_button = PrintButton::idle();
        }
        self.printing = printing;
    }
}

fn hit_box(
    b: &AnnotationBox,
    point: Point,
    chrome: &ChromeConfig,
    with_chrome: bool,
) -> Option<BoxPart> {
    let rect = b.rect();
    if with_chrome {
        let hs = chrome.handle_size;
        let half_grip = chrome.grip_width / 2.0;
        let delete = Rect::new(rect.right() - hs, rect.y - hs, hs, hs);
        let handle = Rect::new(rect.x, rect.y - hs, hs, hs);
        let east = Rect::new(rect.right() - half_grip, rect.y, chrome.grip_width, rect.height);
        let west = Rect::new(rect.x - half_grip, rect.y, chrome.grip_width, rect.height);

        if delete.contains(point) {
            return Some(BoxPart::DeleteButton);
        }
        if handle.contains(point) {
            return Some(BoxPart::DragHandle);
        }
        if east.contains(point) {
            return Some(BoxPart::Resize(ResizeDirection::East));
        }
        if west.contains(point) {
            return Some(BoxPart::Resize(ResizeDirection::West));
        }
    }
    rect.contains(point).then_some(BoxPart::Body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SelectionState;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn yes(_: &str) -> bool {
        true
    }

    fn no(_: &str) -> bool {
        false
    }

    fn canvas() -> Canvas {
        let mut c = Canvas::new(Size::new(800.0, 600.0));
        c.set_image_size(Size::new(1600.0, 800.0));
        c
    }

    fn click_at(c: &mut Canvas, x: f64, y: f64) -> EventResult {
        let p = Point::new(x, y);
        let target = c.hit_test(p);
        c.handle_event(InputEvent::click(p, target), &mut yes)
    }

    #[test]
    fn test_image_bounds_follow_container() {
        let mut c = canvas();
        let b = c.image_bounds().unwrap();
        assert!(approx_eq(b.offset_y, 100.0));
        assert!(approx_eq(b.rendered_height, 400.0));

        c.set_container_size(Size::new(400.0, 600.0));
        let b = c.image_bounds().unwrap();
        assert!(approx_eq(b.rendered_width, 400.0));
        assert!(approx_eq(b.offset_y, 200.0));
    }

    #[test]
    fn test_image_bounds_without_image() {
        let c = Canvas::new(Size::new(800.0, 600.0));
        assert!(matches!(c.image_bounds(), Err(GeometryError::EmptyImage { .. })));
        assert_eq!(c.clamp_region(), Rect::new(0.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn test_clamp_region_policies() {
        let c = canvas();
        assert_eq!(c.clamp_region(), Rect::new(0.0, 100.0, 800.0, 400.0));

        let config = InteractionConfig {
            clamp_region: ClampRegion::Container,
            ..Default::default()
        };
        let mut c = Canvas::with_config(&config, Size::new(800.0, 600.0));
        c.set_image_size(Size::new(1600.0, 800.0));
        assert_eq!(c.clamp_policy(), ClampRegion::Container);
        assert_eq!(c.clamp_region(), Rect::new(0.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn test_hit_test_chrome() {
        let mut c = canvas();
        click_at(&mut c, 200.0, 200.0);
        let id = c.store().editing().unwrap();
        let b = c.store().get(id).unwrap().rect();

        let part = |c: &Canvas, x: f64, y: f64| match c.hit_test(Point::new(x, y)) {
            HitTarget::Box { part, .. } => Some(part),
            HitTarget::Canvas => None,
        };
        assert_eq!(part(&c, b.x + 50.0, b.y + 5.0), Some(BoxPart::Body));
        assert_eq!(part(&c, b.x + 5.0, b.y - 5.0), Some(BoxPart::DragHandle));
        assert_eq!(part(&c, b.right() - 5.0, b.y - 5.0), Some(BoxPart::DeleteButton));
        assert_eq!(
            part(&c, b.right() + 2.0, b.y + 5.0),
            Some(BoxPart::Resize(ResizeDirection::East))
        );
        assert_eq!(
            part(&c, b.x - 2.0, b.y + 5.0),
            Some(BoxPart::Resize(ResizeDirection::West))
        );
        assert_eq!(part(&c, b.x + 50.0, b.y - 5.0), None);
        assert_eq!(part(&c, 700.0, 500.0), None);
    }

    #[test]
    fn test_hit_test_prefers_newest() {
        let mut c = canvas();
        click_at(&mut c, 200.0, 200.0);
        let first = c.store().editing().unwrap();
        click_at(&mut c, 700.0, 400.0);
        let second = c.store().editing().unwrap();
        // Drag the second box over the first
        c.store_mut().move_to(second, Point::new(200.0, 200.0));

        match c.hit_test(Point::new(250.0, 205.0)) {
            HitTarget::Box { id, .. } => {
                assert_eq!(id, second);
                assert_ne!(id, first);
            }
            HitTarget::Canvas => panic!("expected a box"),
        }
    }

    #[test]
    fn test_click_flow_create_then_select() {
        let mut c = canvas();
        click_at(&mut c, 200.0, 200.0);
        let a = c.store().editing().unwrap();
        click_at(&mut c, 400.0, 300.0);
        let b = c.store().editing().unwrap();
        assert_ne!(a, b);

        click_at(&mut c, 210.0, 210.0);
        assert_eq!(c.store().selected(), Some(a));
        assert_eq!(c.store().get(b).unwrap().selection(), SelectionState::Unselected);
    }

    #[test]
    fn test_drag_stays_on_image() {
        let mut c = canvas();
        click_at(&mut c, 200.0, 200.0);
        let id = c.store().editing().unwrap();
        c.handle_event(InputEvent::FocusLost { id }, &mut yes);

        let start = Point::new(210.0, 205.0);
        let target = c.hit_test(start);
        c.handle_event(InputEvent::mouse_down(start, target), &mut yes);
        c.handle_event(InputEvent::mouse_move(Point::new(210.0, 5.0)), &mut yes);
        c.handle_event(InputEvent::mouse_up(Point::new(210.0, 5.0)), &mut yes);

        // Letterbox band above the image is off limits
        assert!(approx_eq(c.store().get(id).unwrap().position().y, 100.0));
    }

    #[test]
    fn test_drag_scenario_container_clamp() {
        let config = InteractionConfig {
            clamp_region: ClampRegion::Container,
            ..Default::default()
        };
        let mut c = Canvas::with_config(&config, Size::new(800.0, 600.0));
        click_at(&mut c, 750.0, 300.0);
        let id = c.store().editing().unwrap();
        c.handle_event(InputEvent::FocusLost { id }, &mut yes);

        let start = Point::new(760.0, 305.0);
        c.handle_event(InputEvent::mouse_down(start, c.hit_test(start)), &mut yes);
        c.handle_event(InputEvent::mouse_move(Point::new(960.0, 305.0)), &mut yes);
        assert!(approx_eq(c.store().get(id).unwrap().position().x, 700.0));
    }

    #[test]
    fn test_delete_box_confirmation() {
        let mut c = canvas();
        click_at(&mut c, 200.0, 200.0);
        let id = c.store().editing().unwrap();

        assert!(!c.delete_box(id, &mut no));
        assert!(c.store().contains(id));
        assert!(c.delete_box(id, &mut yes));
        assert!(c.store().is_empty());
        // Unknown id: still reported as absent, nothing else happens
        assert!(c.delete_box(id, &mut yes));
    }

    #[test]
    fn test_delete_button_click() {
        let mut c = canvas();
        click_at(&mut c, 200.0, 200.0);
        let id = c.store().editing().unwrap();
        let r = c.store().get(id).unwrap().rect();
        click_at(&mut c, r.right() - 5.0, r.y - 5.0);
        assert!(!c.store().contains(id));
    }

    #[test]
    fn test_reset() {
        let mut c = canvas();
        click_at(&mut c, 200.0, 200.0);
        click_at(&mut c, 400.0, 300.0);

        assert!(!c.reset(&mut no));
        assert_eq!(c.store().len(), 2);
        assert!(c.reset(&mut yes));
        assert!(c.store().is_empty());
        assert_eq!(c.store().focused(), None);
    }

    #[test]
    fn test_printing_presentation() {
        let mut c = canvas();
        click_at(&mut c, 200.0, 200.0);
        let id = c.store().editing().unwrap();
        let r = c.store().get(id).unwrap().rect();

        c.set_printing(true);
        assert!(c.is_printing());
        assert_eq!(c.print_button(), PrintButton::busy());
        assert_eq!(c.store().focused(), None);
        // Chrome is hidden, so the handle area is background
        assert_eq!(c.hit_test(Point::new(r.x + 5.0, r.y - 5.0)), HitTarget::Canvas);
        assert_eq!(click_at(&mut c, 600.0, 300.0), EventResult::Ignored);

        c.set_printing(false);
        assert_eq!(c.print_button(), PrintButton::idle());
        assert!(c.print_button().enabled);
    }
}
