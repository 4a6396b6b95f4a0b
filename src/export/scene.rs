//! Render-ready description of a canvas handed to capture collaborators.

use std::fmt;

use annotext_geometry::{ImageBounds, Rect, Size, TextMetrics};
use serde::{Deserialize, Serialize};

use super::layout::PlacedBox;
use crate::canvas::Canvas;
use crate::model::BoxId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneBox {
    pub id: BoxId,
    pub rect: Rect,
    pub text: String,
}

/// A canvas as it should appear in a capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Container size
    pub size: Size,
    /// Where the background image is drawn, if it has loaded
    pub image: Option<Rect>,
    pub boxes: Vec<SceneBox>,
    /// Whether per-box controls are visible
    pub show_chrome: bool,
}

impl Scene {
    /// Snapshot the live canvas.
    pub fn snapshot(canvas: &Canvas) -> Self {
        let boxes = canvas
            .store()
            .list()
            .map(|b| SceneBox {
                id: b.id(),
                rect: b.rect(),
                text: b.text().to_string(),
            })
            .collect();
        Self {
            size: canvas.container_size(),
            image: canvas.image_bounds().ok().map(|bounds| bounds.rect()),
            boxes,
            show_chrome: !canvas.is_printing(),
        }
    }

    pub fn find(&self, id: BoxId) -> Option<&SceneBox> {
        self.boxes.iter().find(|b| b.id == id)
    }
}

/// Mutation applied to the collaborator's working copy of the scene before
/// it is rasterised.
pub trait CloneHook: fmt::Debug {
    fn apply(&self, scene: &mut Scene);
}

/// Moves a cloned scene into target-space geometry.
#[derive(Debug, Clone)]
pub struct RemapHook {
    target: Size,
    bounds: ImageBounds,
    placed: Vec<PlacedBox>,
    metrics: TextMetrics,
}

impl RemapHook {
    pub fn new(
        target: Size,
        bounds: ImageBounds,
        placed: Vec<PlacedBox>,
        metrics: TextMetrics,
    ) -> Self {
        Self {
            target,
            bounds,
            placed,
            metrics,
        }
    }
}

impl CloneHook for RemapHook {
    fn apply(&self, scene: &mut Scene) {
        scene.size = self.target;
        scene.image = Some(self.bounds.rect());
        scene.show_chrome = false;
        // Boxes are matched by id; the clone may not preserve order
        for b in &mut scene.boxes {
            match self.placed.iter().find(|p| p.id == b.id) {
                Some(p) => {
                    let height = self.metrics.content_height(&b.text, p.width);
                    b.rect = Rect::new(p.position.x, p.position.y, p.width, height);
                }
                None => log::warn!("Box {} has no target placement", b.id),
            }
        }
    }
}
