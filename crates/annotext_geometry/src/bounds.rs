//! Contain-fit bounds and image-fraction mapping.
//!
//! Nothing here is cached: container size and the image's intrinsic size can
//! both change between calls, so callers recompute bounds whenever they need
//! them.

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::types::{ImageFraction, Point, Rect, Size};

/// The sub-rectangle of a container covered by a contain-fit image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageBounds {
    /// Horizontal letterbox offset from the container's left edge
    pub offset_x: f64,
    /// Vertical letterbox offset from the container's top edge
    pub offset_y: f64,
    /// Width of the image as drawn (always > 0)
    pub rendered_width: f64,
    /// Height of the image as drawn (always > 0)
    pub rendered_height: f64,
}

impl ImageBounds {
    /// The rendered image area as a rectangle in container space.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.offset_x,
            self.offset_y,
            self.rendered_width,
            self.rendered_height,
        )
    }

    pub fn rendered_size(&self) -> Size {
        Size::new(self.rendered_width, self.rendered_height)
    }
}

/// Fit an image of intrinsic size `image` inside `container`, preserving aspect ratio.
///
/// A relatively wider image spans the full container width and is centred
/// vertically; otherwise it spans the full height and is centred horizontally.
pub fn compute_image_bounds(container: Size, image: Size) -> Result<ImageBounds> {
    if !container.is_usable() {
        return Err(GeometryError::EmptyContainer {
            width: container.width,
            height: container.height,
        });
    }
    if !image.is_usable() {
        return Err(GeometryError::EmptyImage {
            width: image.width,
            height: image.height,
        });
    }

    let container_aspect = container.aspect();
    let image_aspect = image.aspect();

    let bounds = if image_aspect > container_aspect {
        let rendered_height = container.width / image_aspect;
        ImageBounds {
            offset_x: 0.0,
            offset_y: (container.height - rendered_height) / 2.0,
            rendered_width: container.width,
            rendered_height,
        }
    } else {
        let rendered_width = container.height * image_aspect;
        ImageBounds {
            offset_x: (container.width - rendered_width) / 2.0,
            offset_y: 0.0,
            rendered_width,
            rendered_height: container.height,
        }
    };

    Ok(bounds)
}

/// Express a container-space point as a fraction of the rendered image.
///
/// The result is deliberately unclamped; points in the letterbox area map
/// outside `[0, 1]`.
pub fn to_image_fraction(point: Point, bounds: &ImageBounds) -> ImageFraction {
    ImageFraction {
        fx: (point.x - bounds.offset_x) / bounds.rendered_width,
        fy: (point.y - bounds.offset_y) / bounds.rendered_height,
    }
}

/// Inverse of [`to_image_fraction`].
pub fn from_image_fraction(fraction: ImageFraction, bounds: &ImageBounds) -> Point {
    Point {
        x: bounds.offset_x + fraction.fx * bounds.rendered_width,
        y: bounds.offset_y + fraction.fy * bounds.rendered_height,
    }
}
