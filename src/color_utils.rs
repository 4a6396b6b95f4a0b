//! Color utility functions shared by the headless renderer.

/// Parse a CSS-style `#rrggbb` or `#rgb` hex color.
///
/// # Returns
/// RGB bytes, or `None` if the string is not a valid hex color
pub fn parse_hex_rgb(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.trim().strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        6 => {
            let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
            Some([channel(0)?, channel(2)?, channel(4)?])
        }
        3 => {
            // #abc is shorthand for #aabbcc
            let channel = |i: usize| u8::from_str_radix(&digits[i..=i], 16).ok().map(|v| v * 17);
            Some([channel(0)?, channel(1)?, channel(2)?])
        }
        _ => None,
    }
}

/// Parse a hex color into an opaque RGBA pixel.
pub fn parse_hex_rgba(hex: &str) -> Option<[u8; 4]> {
    parse_hex_rgb(hex).map(|[r, g, b]| [r, g, b, 255])
}
