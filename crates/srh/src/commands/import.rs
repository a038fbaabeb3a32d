//! `srh import` -- add rules from an export document or a bare rule array.

use anyhow::{Context, Result};
use srh_core::interchange::{ImportMode, import_into, parse_import};

use crate::cli::ImportArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `srh import` command.
pub fn run(ctx: &RuntimeContext, args: &ImportArgs) -> Result<()> {
    let data = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let incoming = parse_import(&data)
        .with_context(|| format!("failed to import {}", args.file.display()))?;

    let (path, mut list) = ctx.load_rules(&args.source)?;
    let mode = if args.replace {
        ImportMode::Replace
    } else {
        ImportMode::Append
    };
    let ids = import_into(&mut list, incoming, mode);
    ctx.save_rules(&path, &list)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "imported": ids.len(),
            "ids": ids,
            "total": list.len(),
        }));
    } else if !ctx.quiet {
        println!(
            "Imported {} rule(s) into {} ({} total)",
            ids.len(),
            path.display(),
            list.len()
        );
    }
    Ok(())
}
