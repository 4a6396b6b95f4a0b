//! Capture and print export of an annotated canvas.
//!
//! Export snapshots every box as an image-relative [`AnchoredLayout`],
//! replays it into the export target size, and hands the result to the
//! injected [`CaptureBackend`] and [`PrintBackend`]. The canvas is held in an
//! [`ExportSession`] for the duration so its live state is always restored.

mod collaborators;
mod coordinator;
mod error;
mod layout;
mod scene;
mod session;

pub use collaborators::{
    CaptureBackend, CaptureRequest, CapturedImage, CloseOnce, PrintBackend, PrintPreview,
    PrintSurface,
};
pub use coordinator::{encode_png, ExportCoordinator, ExportOutcome};
pub use error::{CaptureError, CaptureFailure, ExportError};
pub use layout::{AnchoredBox, AnchoredLayout, PlacedBox};
pub use scene::{CloneHook, RemapHook, Scene, SceneBox};
pub use session::ExportSession;
