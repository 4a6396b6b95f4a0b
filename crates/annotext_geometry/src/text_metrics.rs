//! Text measurement for auto-growing annotation boxes.
//!
//! Estimates how tall a block of wrapped text is at a given box width, based
//! on fixed-advance font metrics. A box's height is always the value returned
//! by [`TextMetrics::content_height`] for its current width and text.

use serde::{Deserialize, Serialize};

/// Metrics for a specific font/size combination plus box padding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextMetrics {
    /// Font size in pixels
    pub size: f64,
    /// Average character width as a ratio of font size
    pub char_width_ratio: f64,
    /// Line height as a ratio of font size
    pub line_height_ratio: f64,
    /// Horizontal padding on each side of the text area
    pub padding_x: f64,
    /// Vertical padding above and below the text area
    pub padding_y: f64,
}

impl TextMetrics {
    /// Default metrics for a 16px monospace font with small padding.
    pub const MONO: TextMetrics = TextMetrics {
        size: 16.0,
        char_width_ratio: 0.6, // Monospace: all chars same width
        line_height_ratio: 1.2,
        padding_x: 4.0,
        padding_y: 4.0,
    };

    /// Create metrics for a specific font size.
    pub fn new(size: f64) -> Self {
        Self {
            size,
            ..Self::MONO
        }
    }

    pub fn char_width(&self) -> f64 {
        self.size * self.char_width_ratio
    }

    pub fn line_height(&self) -> f64 {
        self.size * self.line_height_ratio
    }

    /// Number of characters that fit on one visual row of a box `box_width` wide.
    ///
    /// Never less than one, so very narrow boxes still make progress.
    pub fn chars_per_row(&self, box_width: f64) -> usize {
        let usable = (box_width - 2.0 * self.padding_x).max(0.0);
        let per_row = (usable / self.char_width()).floor();
        if per_row.is_finite() && per_row >= 1.0 {
            per_row as usize
        } else {
            1
        }
    }

    /// Count the visual rows `text` occupies once wrapped to `box_width`.
    ///
    /// Every hard line contributes at least one row (an empty text is one row,
    /// and a trailing newline opens a new row).
    pub fn row_count(&self, text: &str, box_width: f64) -> usize {
        let per_row = self.chars_per_row(box_width);
        text.split('\n')
            .map(|line| {
                let chars = line.chars().count();
                chars.div_ceil(per_row).max(1)
            })
            .sum()
    }

    /// Minimum height that shows `text` at `box_width` without vertical clipping.
    pub fn content_height(&self, text: &str, box_width: f64) -> f64 {
        self.row_count(text, box_width) as f64 * self.line_height() + 2.0 * self.padding_y
    }

    /// Height of a box holding a single (possibly empty) line.
    pub fn single_line_height(&self) -> f64 {
        self.line_height() + 2.0 * self.padding_y
    }
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self::MONO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_default_metrics() {
        let m = TextMetrics::default();
        assert_eq!(m.size, 16.0);
        // 16.0 * 1.2 = 19.2
        assert!(approx_eq(m.line_height(), 19.2));
    }

    #[test]
    fn test_empty_text_is_one_line() {
        let m = TextMetrics::default();
        assert_eq!(m.row_count("", 100.0), 1);
        assert!(approx_eq(m.content_height("", 100.0), m.single_line_height()));
    }

    #[test]
    fn test_chars_per_row() {
        let m = TextMetrics::default();
        // (100 - 8) / 9.6 = 9.58 -> 9
        assert_eq!(m.chars_per_row(100.0), 9);
        assert_eq!(m.chars_per_row(1.0), 1);
    }

    #[test]
    fn test_wrapping_grows_height() {
        let m = TextMetrics::default();
        // 20 chars at 9 per row -> 3 rows
        assert_eq!(m.row_count("abcdefghijklmnopqrst", 100.0), 3);
        assert!(m.content_height("abcdefghijklmnopqrst", 100.0) > m.single_line_height());
    }

    #[test]
    fn test_widening_reduces_rows() {
        let m = TextMetrics::default();
        let text = "abcdefghijklmnopqrst";
        assert!(m.row_count(text, 300.0) < m.row_count(text, 100.0));
        assert_eq!(m.row_count(text, 300.0), 1);
    }

    #[test]
    fn test_hard_newlines() {
        let m = TextMetrics::default();
        assert_eq!(m.row_count("a\nb", 100.0), 2);
        assert_eq!(m.row_count("a\n", 100.0), 2);
        assert_eq!(m.row_count("\n\n", 100.0), 3);
    }
}
