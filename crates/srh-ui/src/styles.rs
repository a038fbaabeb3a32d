//! Styling for highlighter CLI output.
//!
//! Palette colors render as truecolor swatches and row backgrounds; the
//! remaining semantic colors mark pass/fail results in `explain` and
//! `validate` output. Everything degrades to plain text when color is off.

use owo_colors::OwoColorize;
use srh_core::palette::{self, HighlightColor};

use crate::terminal::supports_color;

// Semantic colors
const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // #c2d94c
const FAIL: (u8, u8, u8) = (0xf0, 0x71, 0x78); // #f07178
const MUTED: (u8, u8, u8) = (0x6c, 0x76, 0x80); // #6c7680
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff); // #59c2ff

// Text drawn over palette backgrounds
const TEXT_ON_LIGHT: (u8, u8, u8) = (0x1f, 0x1f, 0x1f);
const TEXT_ON_DARK: (u8, u8, u8) = (0xf5, 0xf5, 0xf5);

pub const ICON_PASS: &str = "\u{2713}"; // ✓
pub const ICON_FAIL: &str = "\u{2716}"; // ✖
pub const ICON_SKIP: &str = "-";

/// Two full blocks, drawn in the swatch color.
pub const SWATCH: &str = "\u{2588}\u{2588}";

fn color_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).to_string()
    } else {
        s.to_string()
    }
}

pub fn render_pass(s: &str) -> String {
    color_str(s, PASS)
}

pub fn render_fail(s: &str) -> String {
    color_str(s, FAIL)
}

pub fn render_muted(s: &str) -> String {
    color_str(s, MUTED)
}

pub fn render_accent(s: &str) -> String {
    color_str(s, ACCENT)
}

pub fn render_bold(s: &str) -> String {
    if supports_color() {
        s.bold().to_string()
    } else {
        s.to_string()
    }
}

/// ✓ or ✖ for a condition or rule result.
pub fn render_outcome(matched: bool) -> String {
    if matched {
        render_pass(ICON_PASS)
    } else {
        render_fail(ICON_FAIL)
    }
}

// ---------------------------------------------------------------------------
// Palette rendering
// ---------------------------------------------------------------------------

/// A swatch for `hex`, or the bare text marker when color is off.
pub fn render_swatch_hex(hex: &str) -> String {
    match palette::hex_to_rgb(hex) {
        Some(rgb) if supports_color() => color_str(SWATCH, rgb),
        _ => "[]".to_string(),
    }
}

/// A swatch for a palette entry in the given mode.
pub fn render_swatch(color: &HighlightColor, dark_mode: bool) -> String {
    render_swatch_hex(color.hex(dark_mode))
}

/// Renders `s` over a highlight background.
///
/// Without color support, or without a resolvable color, `s` is returned
/// unchanged.
pub fn render_highlighted(s: &str, hex: Option<&str>, dark_mode: bool) -> String {
    let Some(bg) = hex.and_then(palette::hex_to_rgb) else {
        return s.to_string();
    };
    if !supports_color() {
        return s.to_string();
    }
    let fg = if dark_mode { TEXT_ON_DARK } else { TEXT_ON_LIGHT };
    s.truecolor(fg.0, fg.1, fg.2)
        .on_truecolor(bg.0, bg.1, bg.2)
        .to_string()
}
