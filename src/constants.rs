//! Global constants for annotext.
//!
//! Defaults for values that are also exposed through [`crate::config`].

/// Annotation box sizing.
pub mod text_box {
    /// Width of a freshly created box
    pub const DEFAULT_WIDTH: f64 = 100.0;
    /// Narrowest width a resize can produce
    pub const MIN_WIDTH: f64 = 50.0;
}

/// Per-box chrome geometry used for hit testing.
pub mod chrome {
    /// Side length of the square drag handle and delete button
    pub const HANDLE_SIZE: f64 = 20.0;
    /// Width of the east/west resize grips, centred on the box edge
    pub const GRIP_WIDTH: f64 = 8.0;
}

/// Export and print timings.
pub mod export {
    /// How long to wait for the capture collaborator before giving up
    pub const CAPTURE_TIMEOUT_MS: u64 = 30_000;
    /// How long a print preview stays open if no after-print signal arrives
    pub const PRINT_CLOSE_DELAY_MS: u64 = 1_000;
    /// Per-image load timeout handed to the capture collaborator
    pub const IMAGE_LOAD_TIMEOUT_MS: u64 = 15_000;
    /// Capture resolution multiplier
    pub const CAPTURE_SCALE: f64 = 2.0;
    /// Fill behind the letterboxed image in captures
    pub const CAPTURE_BACKGROUND: &str = "#f0f0f0";
    /// Largest bitmap the headless rasterizer will allocate (256 MiB of RGBA)
    pub const MAX_CAPTURE_PIXELS: u64 = 64 * 1024 * 1024;
}

/// User-facing labels and prompts.
pub mod labels {
    pub const PRINT_IDLE: &str = "Print Page";
    pub const PRINT_BUSY: &str = "Preparing...";
    pub const CONFIRM_DELETE: &str = "Are you sure you want to delete this text box?";
    pub const CONFIRM_RESET: &str = "Are you sure you want to reset and clear all text boxes?";
    pub const FALLBACK_PREFIX: &str = "Screenshot capture failed. ";
    pub const FALLBACK_CROSS_ORIGIN: &str = "Cross-origin image restriction. ";
    pub const FALLBACK_QUESTION: &str = "Would you like to print the page directly instead?";
}
