//! Capture and print collaborators driven by the export coordinator.

use std::fmt;

use futures::channel::oneshot;
use futures::future::LocalBoxFuture;

use super::error::CaptureError;
use super::scene::{CloneHook, Scene};
use crate::config::CaptureOptions;

/// Everything a capture backend needs besides the scene itself.
#[derive(Debug)]
pub struct CaptureRequest {
    /// Target width in CSS pixels, before `options.scale`
    pub width: f64,
    pub height: f64,
    pub options: CaptureOptions,
    /// Applied to the backend's working copy of the scene before rendering
    pub hook: Option<Box<dyn CloneHook>>,
}

impl CaptureRequest {
    /// Apply the clone hook, if any, to `scene`.
    pub fn prepare(&self, scene: &mut Scene) {
        if let Some(hook) = &self.hook {
            hook.apply(scene);
        }
    }
}

/// A captured RGBA8 bitmap.
#[derive(Clone, PartialEq, Eq)]
pub struct CapturedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl CapturedImage {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapturedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

/// Renders a scene to a bitmap.
///
/// The returned future may be dropped before it completes if the capture
/// times out; implementations must not rely on it being polled to the end.
pub trait CaptureBackend {
    fn capture(
        &mut self,
        scene: Scene,
        request: CaptureRequest,
    ) -> LocalBoxFuture<'static, Result<CapturedImage, CaptureError>>;
}

/// An open print preview (a popup window in a browser).
pub trait PrintSurface {
    fn close(&mut self);
}

/// A print preview plus its best-effort "printing finished" signal.
///
/// `after_print` may never fire; the sender being dropped counts as no signal.
pub struct PrintPreview {
    pub surface: Box<dyn PrintSurface>,
    pub after_print: oneshot::Receiver<()>,
}

impl fmt::Debug for PrintPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrintPreview").finish_non_exhaustive()
    }
}

/// Opens print dialogs.
pub trait PrintBackend {
    /// Show a print preview of a PNG image. `None` means the preview could
    /// not be opened (popup blocked).
    fn open_preview(&mut self, png: &[u8]) -> Option<PrintPreview>;

    /// Print the live page directly.
    fn print_live(&mut self, scene: &Scene);
}

/// Closes a print surface exactly once, on [`CloseOnce::close`] or on drop.
pub struct CloseOnce {
    surface: Option<Box<dyn PrintSurface>>,
}

impl CloseOnce {
    pub fn new(surface: Box<dyn PrintSurface>) -> Self {
        Self {
            surface: Some(surface),
        }
    }

    /// Close the surface. Returns false if it was already closed.
    pub fn close(&mut self) -> bool {
        match self.surface.take() {
            Some(mut surface) => {
                surface.close();
                true
            }
            None => false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.surface.is_none()
    }
}

impl Drop for CloseOnce {
    fn drop(&mut self) {
        self.close();
    }
}
