//! annotext - Text annotations over a responsively scaled image
//!
//! Boxes are created, moved, resized and edited through pointer and touch
//! events on a [`Canvas`]. On export their layout is expressed relative to
//! the rendered image and replayed at the capture resolution, so it survives
//! viewport and aspect-ratio changes.

mod canvas;
mod color_utils;
pub mod config;
mod confirm;
pub mod constants;
pub mod export;
pub mod headless;
pub mod interaction;
pub mod model;

pub use annotext_geometry as geometry;
pub use canvas::{Canvas, PrintButton};
pub use config::AppConfig;
pub use confirm::Confirm;
pub use export::{ExportCoordinator, ExportError, ExportOutcome};
