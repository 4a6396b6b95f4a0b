//! Export pipeline: remap, capture, print, restore.

use std::io::Cursor;

use annotext_geometry::compute_image_bounds;
use futures::future;
use image::{ImageFormat, RgbaImage};
use web_time::Instant;

use super::collaborators::{
    CaptureBackend, CaptureRequest, CapturedImage, CloseOnce, PrintBackend,
};
use super::error::{CaptureFailure, ExportError};
use super::layout::AnchoredLayout;
use super::scene::{CloneHook, RemapHook, Scene};
use super::session::ExportSession;
use crate::canvas::Canvas;
use crate::config::{CaptureMode, ExportConfig};
use crate::confirm::Confirm;

/// How an export ended. The canvas is back in its interactive state in
/// every case.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// The captured image was sent to the print preview
    Printed,
    /// Capture failed and the user chose to print the live page
    FallbackPrinted(ExportError),
    /// Capture failed and the user declined the live print
    FallbackDeclined(ExportError),
    /// The capture succeeded but could not be printed
    Failed(ExportError),
}

impl ExportOutcome {
    pub fn error(&self) -> Option<&ExportError> {
        match self {
            ExportOutcome::Printed => None,
            ExportOutcome::FallbackPrinted(e)
            | ExportOutcome::FallbackDeclined(e)
            | ExportOutcome::Failed(e) => Some(e),
        }
    }
}

/// Drives the capture and print collaborators for a canvas.
pub struct ExportCoordinator {
    capture: Option<Box<dyn CaptureBackend>>,
    printer: Box<dyn PrintBackend>,
    config: ExportConfig,
}

impl ExportCoordinator {
    pub fn new(
        capture: Option<Box<dyn CaptureBackend>>,
        printer: Box<dyn PrintBackend>,
        config: ExportConfig,
    ) -> Self {
        Self {
            capture,
            printer,
            config,
        }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn has_capture(&self) -> bool {
        self.capture.is_some()
    }

    /// Capture the canvas at the export target size and print it.
    ///
    /// Capture failures (including timeouts) fall back to a confirmed
    /// print of the live page once the canvas has been restored.
    pub async fn export(
        &mut self,
        canvas: &mut Canvas,
        confirm: &mut dyn Confirm,
    ) -> ExportOutcome {
        let started = Instant::now();
        log::info!("🖨️ Export started ({} boxes)", canvas.store().len());

        let captured = {
            let mut session = ExportSession::begin(canvas);
            self.capture_scene(&mut session).await
        };

        let printed = match captured {
            Ok(image) => {
                log::info!(
                    "🖨️ Captured {}x{} in {:.0?}",
                    image.width,
                    image.height,
                    started.elapsed()
                );
                self.print_image(image).await
            }
            Err(e) => Err(e),
        };

        match printed {
            Ok(()) => ExportOutcome::Printed,
            Err(e) if e.is_capture_failure() => {
                log::warn!("Capture failed after {:.0?}: {}", started.elapsed(), e);
                if confirm.confirm(&e.fallback_prompt()) {
                    self.printer.print_live(&Scene::snapshot(canvas));
                    ExportOutcome::FallbackPrinted(e)
                } else {
                    ExportOutcome::FallbackDeclined(e)
                }
            }
            Err(e) => {
                log::error!("Print failed: {}", e);
                ExportOutcome::Failed(e)
            }
        }
    }

    async fn capture_scene(
        &mut self,
        session: &mut ExportSession<'_>,
    ) -> Result<CapturedImage, ExportError> {
        let Some(backend) = self.capture.as_mut() else {
            return Err(ExportError::CaptureUnavailable);
        };

        let canvas = session.canvas();
        let live_bounds = canvas.image_bounds()?;
        let image = canvas.image_size().unwrap_or_default();
        let target = self.config.target.resolve(canvas.container_size());
        let target_bounds = compute_image_bounds(target, image)?;
        let metrics = *canvas.store().metrics();

        let layout = AnchoredLayout::capture(canvas.store(), &live_bounds);
        let placed = layout.project(&target_bounds, &metrics);
        log::debug!(
            "Remapped {} boxes to {}x{} target",
            placed.len(),
            target.width,
            target.height
        );

        let (scene, hook) = match self.config.capture_mode {
            CaptureMode::Clone => {
                let hook: Box<dyn CloneHook> =
                    Box::new(RemapHook::new(target, target_bounds, placed, metrics));
                (Scene::snapshot(session.canvas()), Some(hook))
            }
            CaptureMode::Live => {
                session.apply_live(target, &placed);
                (Scene::snapshot(session.canvas()), None)
            }
        };

        let request = CaptureRequest {
            width: target.width,
            height: target.height,
            options: self.config.capture.clone(),
            hook,
        };

        let after = self.config.capture_timeout();
        // On timeout the capture future is dropped; its result can never land
        let image = match tokio::time::timeout(after, backend.capture(scene, request)).await {
            Err(_) => return Err(ExportError::CaptureTimeout { after }),
            Ok(Err(e)) => {
                return Err(ExportError::CaptureFailed {
                    cause: CaptureFailure::from(e),
                });
            }
            Ok(Ok(image)) => image,
        };

        if image.is_empty() {
            return Err(ExportError::CaptureFailed {
                cause: CaptureFailure::EmptyImage,
            });
        }
        Ok(image)
    }

    async fn print_image(&mut self, image: CapturedImage) -> Result<(), ExportError> {
        let png = encode_png(image)?;
        let preview = self
            .printer
            .open_preview(&png)
            .ok_or(ExportError::PopupBlocked)?;

        let mut surface = CloseOnce::new(preview.surface);
        let after_print = preview.after_print;
        let signalled = async {
            // A dropped sender means no signal is coming
            if after_print.await.is_err() {
                future::pending::<()>().await;
            }
        };

        tokio::select! {
            () = signalled => log::debug!("Print dialog reported completion"),
            () = tokio::time::sleep(self.config.print_close_delay()) => {
                log::debug!("No after-print signal, closing preview");
            }
        }
        surface.close();
        Ok(())
    }
}

/// Encode an RGBA bitmap as PNG. The pixel buffer is moved, not copied.
pub fn encode_png(image: CapturedImage) -> Result<Vec<u8>, ExportError> {
    let CapturedImage {
        width,
        height,
        rgba,
    } = image;
    let len = rgba.len();
    let Some(buffer) = RgbaImage::from_raw(width, height, rgba) else {
        return Err(ExportError::EncodingFailed(format!(
            "{} bytes do not form a {}x{} RGBA image",
            len, width, height
        )));
    };
    let mut bytes = Cursor::new(Vec::new());
    buffer
        .write_to(&mut bytes, ImageFormat::Png)
        .map_err(|e| ExportError::EncodingFailed(e.to_string()))?;
    Ok(bytes.into_inner())
}
