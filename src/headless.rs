//! Collaborators for running without a browser or native print dialog.
//!
//! [`SceneRasterizer`] paints scenes into RGBA bitmaps with the `image`
//! crate, [`PngFilePrinter`] "prints" by writing files into a directory, and
//! [`AlwaysConfirm`]/[`NeverConfirm`] answer prompts unattended.

use std::path::PathBuf;

use annotext_geometry::Rect;
use futures::channel::oneshot;
use futures::future::{self, FutureExt, LocalBoxFuture};
use image::{Rgba, RgbaImage};

use crate::color_utils::parse_hex_rgba;
use crate::confirm::Confirm;
use crate::constants::export::MAX_CAPTURE_PIXELS;
use crate::export::{
    CaptureBackend, CaptureError, CaptureRequest, CapturedImage, PrintBackend, PrintPreview,
    PrintSurface, Scene,
};

/// Capture backend that rasterises scenes as flat rectangles.
///
/// Text is not rendered; each box is drawn as a filled rectangle with a
/// border so layout can be checked visually.
#[derive(Debug, Clone)]
pub struct SceneRasterizer {
    pub image_color: [u8; 4],
    pub box_fill: [u8; 4],
    pub box_border: [u8; 4],
    /// Captures larger than this fail instead of allocating
    pub max_pixels: u64,
}

impl Default for SceneRasterizer {
    fn default() -> Self {
        Self {
            image_color: [96, 128, 160, 255],
            box_fill: [255, 255, 255, 255],
            box_border: [32, 32, 32, 255],
            max_pixels: MAX_CAPTURE_PIXELS,
        }
    }
}

impl SceneRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paint `scene` at `scale` pixels per CSS pixel.
    ///
    /// Fails without allocating when the bitmap would exceed `max_pixels`.
    pub fn rasterize(
        &self,
        scene: &Scene,
        width: f64,
        height: f64,
        scale: f64,
        background: [u8; 4],
    ) -> Result<RgbaImage, CaptureError> {
        let px = |v: f64| (v * scale).round().max(0.0) as u32;
        let (w, h) = (px(width), px(height));
        if u64::from(w) * u64::from(h) > self.max_pixels {
            return Err(CaptureError::new(format!(
                "{}x{} capture exceeds the {} pixel limit",
                w, h, self.max_pixels
            )));
        }
        let mut img = RgbaImage::from_pixel(w, h, Rgba(background));

        if let Some(image) = scene.image {
            fill_rect(&mut img, &image, scale, Rgba(self.image_color));
        }
        for b in &scene.boxes {
            fill_rect(&mut img, &b.rect, scale, Rgba(self.box_border));
            let inner = Rect::new(
                b.rect.x + 1.0,
                b.rect.y + 1.0,
                (b.rect.width - 2.0).max(0.0),
                (b.rect.height - 2.0).max(0.0),
            );
            fill_rect(&mut img, &inner, scale, Rgba(self.box_fill));
        }
        Ok(img)
    }
}

impl CaptureBackend for SceneRasterizer {
    fn capture(
        &mut self,
        mut scene: Scene,
        request: CaptureRequest,
    ) -> LocalBoxFuture<'static, Result<CapturedImage, CaptureError>> {
        let Some(background) = parse_hex_rgba(&request.options.background) else {
            let message = format!("invalid background colour {:?}", request.options.background);
            return future::ready(Err(CaptureError::new(message))).boxed_local();
        };
        request.prepare(&mut scene);

        let img = match self.rasterize(
            &scene,
            request.width,
            request.height,
            request.options.scale,
            background,
        ) {
            Ok(img) => img,
            Err(e) => return future::ready(Err(e)).boxed_local(),
        };
        log::debug!(
            "Rasterised {} boxes into {}x{}",
            scene.boxes.len(),
            img.width(),
            img.height()
        );
        let captured = CapturedImage {
            width: img.width(),
            height: img.height(),
            rgba: img.into_raw(),
        };
        future::ready(Ok(captured)).boxed_local()
    }
}

/// Fill a CSS-pixel rectangle, clipped to the image.
fn fill_rect(img: &mut RgbaImage, rect: &Rect, scale: f64, color: Rgba<u8>) {
    let (w, h) = (img.width() as i64, img.height() as i64);
    let min_x = ((rect.x * scale).round() as i64).clamp(0, w);
    let min_y = ((rect.y * scale).round() as i64).clamp(0, h);
    let max_x = ((rect.right() * scale).round() as i64).clamp(0, w);
    let max_y = ((rect.bottom() * scale).round() as i64).clamp(0, h);

    for py in min_y..max_y {
        for px in min_x..max_x {
            img.put_pixel(px as u32, py as u32, color);
        }
    }
}

/// Print surface backed by a file on disk.
#[derive(Debug)]
struct FileSurface {
    path: PathBuf,
}

impl PrintSurface for FileSurface {
    fn close(&mut self) {
        log::debug!("Closed print preview {:?}", self.path);
    }
}

/// Print backend that writes previews as PNG files and live prints as JSON
/// scene dumps.
#[derive(Debug)]
pub struct PngFilePrinter {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngFilePrinter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Files written so far, oldest first.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write(&mut self, name: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self
            .dir
            .join(format!("{:03}-{}", self.written.len() + 1, name));
        std::fs::write(&path, bytes)?;
        self.written.push(path.clone());
        Ok(path)
    }
}

impl PrintBackend for PngFilePrinter {
    fn open_preview(&mut self, png: &[u8]) -> Option<PrintPreview> {
        let path = match self.write("print-preview.png", png) {
            Ok(path) => path,
            Err(e) => {
                log::warn!("Could not write print preview to {:?}: {}", self.dir, e);
                return None;
            }
        };
        log::info!("🖨️ Print preview written to {:?}", path);

        // Writing the file is the whole print job
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(());
        Some(PrintPreview {
            surface: Box::new(FileSurface { path }),
            after_print: rx,
        })
    }

    fn print_live(&mut self, scene: &Scene) {
        let json = match serde_json::to_vec_pretty(scene) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to serialize live scene: {}", e);
                return;
            }
        };
        match self.write("live-print.json", &json) {
            Ok(path) => log::info!("🖨️ Live page written to {:?}", path),
            Err(e) => log::warn!("Could not write live print to {:?}: {}", self.dir, e),
        }
    }
}

/// Agrees to every prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        log::info!("Confirm: {} -> yes", message);
        true
    }
}

/// Declines every prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl Confirm for NeverConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        log::info!("Confirm: {} -> no", message);
        false
    }
}
