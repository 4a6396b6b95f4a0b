//! Size-invariant annotation layout.
//!
//! Box positions are stored as fractions of the rendered image so the same
//! layout can be replayed into any container size.

use annotext_geometry::{
    from_image_fraction, to_image_fraction, ImageBounds, ImageFraction, Point, TextMetrics,
};
use serde::{Deserialize, Serialize};

use crate::model::{AnnotationStore, BoxId};

/// One box expressed relative to the rendered image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchoredBox {
    pub id: BoxId,
    /// Top-left corner as an image fraction
    pub fx: f64,
    pub fy: f64,
    /// Width as a fraction of the rendered image width
    pub width_fraction: f64,
    pub text: String,
}

/// A box placed back into pixel space for a particular container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedBox {
    pub id: BoxId,
    pub position: Point,
    pub width: f64,
    pub height: f64,
}

/// Every box of a canvas, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnchoredLayout {
    pub boxes: Vec<AnchoredBox>,
}

impl AnchoredLayout {
    /// Snapshot the store relative to the live image bounds.
    pub fn capture(store: &AnnotationStore, bounds: &ImageBounds) -> Self {
        let boxes = store
            .list()
            .map(|b| {
                let fraction = to_image_fraction(b.position(), bounds);
                AnchoredBox {
                    id: b.id(),
                    fx: fraction.fx,
                    fy: fraction.fy,
                    width_fraction: b.width() / bounds.rendered_width,
                    text: b.text().to_string(),
                }
            })
            .collect();
        Self { boxes }
    }

    /// Place the layout into `bounds`, reflowing heights for the new widths.
    ///
    /// Positions are not clamped: a box that sits partly outside the image
    /// on screen lands at the same image-relative spot in the target.
    pub fn project(&self, bounds: &ImageBounds, metrics: &TextMetrics) -> Vec<PlacedBox> {
        self.boxes
            .iter()
            .map(|b| {
                let width = b.width_fraction * bounds.rendered_width;
                PlacedBox {
                    id: b.id,
                    position: from_image_fraction(ImageFraction::new(b.fx, b.fy), bounds),
                    width,
                    height: metrics.content_height(&b.text, width),
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use annotext_geometry::{compute_image_bounds, Size};

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    fn bounds(cw: f64, ch: f64) -> ImageBounds {
        compute_image_bounds(Size::new(cw, ch), Size::new(1600.0, 800.0)).unwrap()
    }

    #[test]
    fn test_capture_fractions() {
        let mut store = AnnotationStore::new();
        let id = store.create(Point::new(100.0, 150.0));
        store.set_text(id, "hi");

        let layout = AnchoredLayout::capture(&store, &bounds(800.0, 600.0));
        assert_eq!(layout.len(), 1);
        let b = &layout.boxes[0];
        assert!(approx_eq(b.fx, 0.125));
        assert!(approx_eq(b.fy, 0.125));
        assert!(approx_eq(b.width_fraction, 0.125));
        assert_eq!(b.text, "hi");
    }

    #[test]
    fn test_project_into_larger_target() {
        let mut store = AnnotationStore::new();
        store.create(Point::new(100.0, 150.0));
        let layout = AnchoredLayout::capture(&store, &bounds(800.0, 600.0));

        let target = bounds(1600.0, 1200.0);
        let placed = layout.project(&target, store.metrics());
        let p = placed[0];
        assert!(approx_eq(p.position.x, 200.0));
        assert!(approx_eq(p.position.y, 300.0));
        assert!(approx_eq(p.width, 200.0));
        assert!(approx_eq(p.height, store.metrics().content_height("", 200.0)));
    }

    #[test]
    fn test_project_same_bounds_is_identity() {
        let mut store = AnnotationStore::new();
        let a = store.create(Point::new(123.4, 234.5));
        store.set_text(a, "some longer text to wrap");
        store.resize(a, 170.0);
        let b = store.create(Point::new(600.0, 420.0));

        let live = bounds(800.0, 600.0);
        let layout = AnchoredLayout::capture(&store, &live);
        let placed = layout.project(&live, store.metrics());

        for (p, id) in placed.iter().zip([a, b]) {
            let live_box = store.get(id).unwrap();
            assert_eq!(p.id, id);
            assert!(approx_eq(p.position.x, live_box.position().x));
            assert!(approx_eq(p.position.y, live_box.position().y));
            assert!(approx_eq(p.width, live_box.width()));
            assert!(approx_eq(p.height, live_box.height()));
        }
    }

    #[test]
    fn test_project_keeps_boxes_outside_image() {
        // 800x600 container letterboxes the 2:1 image between y=100 and y=500
        let mut store = AnnotationStore::new();
        let id = store.create(Point::new(750.0, 520.0));
        store.set_text(id, "in the band below the image");
        let live = bounds(800.0, 600.0);
        let layout = AnchoredLayout::capture(&store, &live);

        let placed = layout.project(&live, store.metrics());
        assert!(approx_eq(placed[0].position.x, 750.0));
        assert!(approx_eq(placed[0].position.y, 520.0));

        // Same image-relative spot at double size
        let target = bounds(1600.0, 1200.0);
        let placed = layout.project(&target, store.metrics());
        assert!(approx_eq(placed[0].position.x, 1500.0));
        assert!(approx_eq(placed[0].position.y, 1040.0));
    }

    #[test]
    fn test_layout_json() {
        let mut store = AnnotationStore::new();
        let id = store.create(Point::new(100.0, 150.0));
        store.set_text(id, "note");
        let layout = AnchoredLayout::capture(&store, &bounds(800.0, 600.0));

        let json = layout.to_json().unwrap();
        let back: AnchoredLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(back, layout);
        assert!(json.contains("\"width_fraction\""));
    }
}
