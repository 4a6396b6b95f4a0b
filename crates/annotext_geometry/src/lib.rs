//! annotext_geometry - Contain-fit image geometry and text metrics.
//!
//! Pure, stateless helpers shared by the interaction and export layers:
//! converting between container pixels and image fractions, and estimating
//! how tall a wrapped block of text is at a given width.

pub mod bounds;
pub mod error;
pub mod text_metrics;
pub mod types;

pub use bounds::{compute_image_bounds, from_image_fraction, to_image_fraction, ImageBounds};
pub use error::{GeometryError, Result};
pub use text_metrics::TextMetrics;
pub use types::{ImageFraction, Point, Rect, Size};
