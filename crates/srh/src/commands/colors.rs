//! `srh colors` -- list the highlight palette.

use anyhow::Result;
use serde::Serialize;
use srh_core::palette::{DEFAULT_COLOR_ID, HighlightColor, PALETTE};
use srh_ui::styles::{render_bold, render_swatch};

use crate::context::RuntimeContext;
use crate::output::{format_table, output_json};

#[derive(Debug, Serialize)]
struct ColorEntry<'a> {
    #[serde(flatten)]
    color: &'a HighlightColor,
    /// Hex for the active theme.
    hex: &'static str,
}

/// Execute the `srh colors` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let dark_mode = ctx.dark_mode();

    if ctx.json {
        let entries: Vec<ColorEntry<'_>> = PALETTE
            .iter()
            .map(|color| ColorEntry {
                color,
                hex: color.hex(dark_mode),
            })
            .collect();
        output_json(&entries);
        return Ok(());
    }

    let rows: Vec<Vec<String>> = PALETTE
        .iter()
        .map(|c| {
            let default = if c.id == DEFAULT_COLOR_ID { "default" } else { "" };
            vec![
                c.id.to_string(),
                c.name.to_string(),
                c.hex(dark_mode).to_string(),
                default.to_string(),
            ]
        })
        .collect();
    let lines = format_table(&["ID", "Name", "Hex", ""], &rows);
    println!("   {}", render_bold(lines[0].trim_end()));
    println!("   {}", lines[1].trim_end());
    for (color, line) in PALETTE.iter().zip(&lines[2..]) {
        println!("{} {}", render_swatch(color, dark_mode), line.trim_end());
    }
    Ok(())
}
