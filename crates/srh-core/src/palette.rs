//! The fixed highlight palette.

use serde::Serialize;

/// A highlight color with its light and dark mode variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighlightColor {
    pub id: &'static str,
    pub name: &'static str,
    pub light: &'static str,
    pub dark: &'static str,
}

impl HighlightColor {
    /// Hex value for the requested mode.
    pub fn hex(&self, dark_mode: bool) -> &'static str {
        if dark_mode { self.dark } else { self.light }
    }
}

/// Color used when a rule is authored without one.
pub const DEFAULT_COLOR_ID: &str = "yellow";

pub const PALETTE: [HighlightColor; 8] = [
    color("red", "Red", "#ffccc7", "#5c1a1a"),
    color("orange", "Orange", "#ffe7ba", "#5c3d1a"),
    color("yellow", "Yellow", "#fffbe6", "#5c5a1a"),
    color("green", "Green", "#d9f7be", "#1a5c2e"),
    color("blue", "Blue", "#bae7ff", "#1a3d5c"),
    color("purple", "Purple", "#efdbff", "#3d1a5c"),
    color("pink", "Pink", "#ffd6e7", "#5c1a3d"),
    color("gray", "Gray", "#f0f0f0", "#3d3d3d"),
];

const fn color(
    id: &'static str,
    name: &'static str,
    light: &'static str,
    dark: &'static str,
) -> HighlightColor {
    HighlightColor {
        id,
        name,
        light,
        dark,
    }
}

/// Looks up a palette entry by id.
pub fn find_color(id: &str) -> Option<&'static HighlightColor> {
    PALETTE.iter().find(|c| c.id == id)
}

/// Parses `#rrggbb` into an RGB triple.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}
