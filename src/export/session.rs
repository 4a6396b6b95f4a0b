//! Scoped export mode for a canvas.

use annotext_geometry::{Point, Size};

use super::layout::PlacedBox;
use crate::canvas::Canvas;
use crate::model::BoxId;

/// Puts a canvas into printing presentation and restores it when dropped.
///
/// Dropping the session leaves export mode and puts back the container size
/// and any box geometry remapped in place. The selection cleared on entry is
/// not restored.
pub struct ExportSession<'a> {
    canvas: &'a mut Canvas,
    container: Size,
    /// Original geometry of boxes remapped in place
    saved: Vec<(BoxId, Point, f64)>,
}

impl<'a> ExportSession<'a> {
    pub fn begin(canvas: &'a mut Canvas) -> Self {
        let container = canvas.container_size();
        canvas.set_printing(true);
        log::debug!(
            "Export mode on ({}x{} container)",
            container.width,
            container.height
        );
        Self {
            canvas,
            container,
            saved: Vec::new(),
        }
    }

    pub fn canvas(&self) -> &Canvas {
        self.canvas
    }

    /// Remap the live canvas to target-space geometry.
    pub fn apply_live(&mut self, target: Size, placed: &[PlacedBox]) {
        if self.saved.is_empty() {
            self.saved = self
                .canvas
                .store()
                .list()
                .map(|b| (b.id(), b.position(), b.width()))
                .collect();
        }
        self.canvas.set_container_size(target);
        let store = self.canvas.store_mut();
        for p in placed {
            store.resize(p.id, p.width);
            store.move_to(p.id, p.position);
        }
    }
}

impl Drop for ExportSession<'_> {
    fn drop(&mut self) {
        let store = self.canvas.store_mut();
        for (id, position, width) in self.saved.drain(..) {
            store.resize(id, width);
            store.move_to(id, position);
        }
        self.canvas.set_container_size(self.container);
        self.canvas.set_printing(false);
        log::debug!("Export mode off, live state restored");
    }
}
