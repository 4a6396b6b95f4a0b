//! Basic geometry types in container pixel space.

use serde::{Deserialize, Serialize};

/// A 2D point in container pixels, origin at the container's top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    pub fn offset_from(&self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Check that both dimensions are finite and strictly positive.
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Width divided by height.
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge X coordinate
    pub x: f64,
    /// Top edge Y coordinate
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin covering `size`.
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if a point is inside the rectangle (left/top inclusive, right/bottom exclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Clamp the top-left of a `size`-sized box so the whole box stays inside `self`.
    ///
    /// When the box is larger than the rectangle on an axis, it is pinned to
    /// the rectangle's leading edge on that axis.
    pub fn clamp_origin(&self, origin: Point, size: Size) -> Point {
        let max_x = self.right() - size.width;
        let max_y = self.bottom() - size.height;
        Point::new(
            origin.x.min(max_x).max(self.x),
            origin.y.min(max_y).max(self.y),
        )
    }
}

/// A position expressed relative to the rendered image rectangle.
///
/// `(0, 0)` is the image's top-left and `(1, 1)` its bottom-right. Values
/// outside `[0, 1]` are legal and describe points in the letterbox area.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageFraction {
    pub fx: f64,
    pub fy: f64,
}

impl ImageFraction {
    pub fn new(fx: f64, fy: f64) -> Self {
        Self { fx, fy }
    }
}
