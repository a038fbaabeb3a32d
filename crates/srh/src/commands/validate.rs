//! `srh validate` -- check a rule list against a board's columns.
//!
//! Exits non-zero when any rule has a problem.

use anyhow::{Result, bail};
use serde::Serialize;
use srh_core::validation::validate_rules;
use srh_ui::styles::{ICON_FAIL, ICON_PASS, render_fail, render_muted, render_pass};

use crate::cli::ValidateArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Problem {
    rule_id: String,
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    valid: bool,
    rules: usize,
    problems: Vec<Problem>,
}

/// Execute the `srh validate` command.
pub fn run(ctx: &RuntimeContext, args: &ValidateArgs) -> Result<()> {
    let board = ctx.load_board(&args.board)?;
    let (path, list) = ctx.load_rules(&args.source)?;

    let problems: Vec<Problem> = validate_rules(&list, &board.columns)
        .into_iter()
        .map(|(rule_id, err)| Problem {
            rule_id,
            message: err.to_string(),
        })
        .collect();

    let report = Report {
        valid: problems.is_empty(),
        rules: list.len(),
        problems,
    };

    if ctx.json {
        output_json(&report);
    } else {
        for problem in &report.problems {
            let id = if problem.rule_id.is_empty() {
                "(no id)"
            } else {
                &problem.rule_id
            };
            let name = list
                .get(&problem.rule_id)
                .map(|r| r.display_name())
                .unwrap_or_default();
            println!(
                "{} {} {} {}",
                render_fail(ICON_FAIL),
                id,
                render_muted(&format!("({name})")),
                problem.message
            );
        }
        if report.valid && !ctx.quiet {
            println!(
                "{} {} rule(s) in {} are valid",
                render_pass(ICON_PASS),
                report.rules,
                path.display()
            );
        }
    }

    if !report.valid {
        bail!("{} problem(s) found in {}", report.problems.len(), path.display());
    }
    Ok(())
}
