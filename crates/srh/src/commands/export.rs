//! `srh export` -- write rules in the interchange format.

use anyhow::{Context, Result};
use chrono::Utc;
use srh_core::interchange::export_rules;

use crate::cli::ExportArgs;
use crate::context::RuntimeContext;

/// Execute the `srh export` command.
///
/// The export document is JSON either way; `--json` only affects the
/// confirmation printed when writing to a file.
pub fn run(ctx: &RuntimeContext, args: &ExportArgs) -> Result<()> {
    let (_, list) = ctx.load_rules(&args.source)?;
    let doc = export_rules(&list, Utc::now());
    let json = serde_json::to_string_pretty(&doc).context("failed to serialize export")?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            if ctx.json {
                crate::output::output_json(&serde_json::json!({
                    "exported": doc.rules.len(),
                    "path": path.display().to_string(),
                }));
            } else if !ctx.quiet {
                println!("Exported {} rule(s) to {}", doc.rules.len(), path.display());
            }
        }
        None => println!("{json}"),
    }
    Ok(())
}
