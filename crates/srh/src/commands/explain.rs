//! `srh explain` -- show how every rule evaluates against one row.

use anyhow::{Context, Result};
use serde::Serialize;
use srh_core::enums::ConditionLogic;
use srh_core::rule::display_name;
use srh_engine::{FailReason, Highlight, Verdict};
use srh_ui::styles::{
    ICON_FAIL, ICON_PASS, ICON_SKIP, render_accent, render_bold, render_fail, render_muted,
    render_outcome, render_pass, render_swatch_hex,
};

use crate::cli::ExplainArgs;
use crate::context::RuntimeContext;
use crate::output::{describe_condition, output_json};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConditionReport {
    column_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    column_title: Option<String>,
    operator: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    verdict: Verdict,
    #[serde(skip)]
    description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RuleReport {
    rule_id: String,
    rule_name: String,
    enabled: bool,
    condition_logic: ConditionLogic,
    matched: bool,
    winner: bool,
    conditions: Vec<ConditionReport>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Explanation {
    item_id: String,
    item_name: String,
    highlight: Option<Highlight>,
    rules: Vec<RuleReport>,
}

/// Execute the `srh explain` command.
pub fn run(ctx: &RuntimeContext, args: &ExplainArgs) -> Result<()> {
    let board = ctx.load_board(&args.board)?;
    let (_, rules) = ctx.load_rules(&args.source)?;
    let item = board
        .item(&args.item)
        .with_context(|| format!("item '{}' not found on board", args.item))?;

    let evaluator = ctx.evaluator(&board.columns);
    let highlight = evaluator.resolve(item, &rules, ctx.dark_mode());

    let reports: Vec<RuleReport> = rules
        .iter()
        .map(|rule| RuleReport {
            rule_id: rule.id.clone(),
            rule_name: rule.name.clone(),
            enabled: rule.enabled,
            condition_logic: rule.effective_logic(),
            matched: evaluator.rule_matches(rule, item),
            winner: highlight.as_ref().is_some_and(|h| h.rule_id == rule.id),
            conditions: rule
                .conditions
                .iter()
                .map(|cond| ConditionReport {
                    column_id: cond.column_id.clone(),
                    column_title: board.column(&cond.column_id).map(|c| c.title.clone()),
                    operator: cond.operator.to_string(),
                    value: cond.value.clone(),
                    verdict: evaluator.check(cond, item),
                    description: describe_condition(cond, Some(&board.columns)),
                })
                .collect(),
        })
        .collect();

    let explanation = Explanation {
        item_id: item.id.clone(),
        item_name: item.name.clone(),
        highlight,
        rules: reports,
    };

    if ctx.json {
        output_json(&explanation);
        return Ok(());
    }

    print_explanation(&explanation);
    Ok(())
}

fn print_explanation(ex: &Explanation) {
    println!("{} {}", render_bold(&format!("Item {}:", ex.item_id)), ex.item_name);
    match &ex.highlight {
        Some(h) => {
            let swatch = h.color.as_deref().map(render_swatch_hex).unwrap_or_default();
            let more = match h.more_count() {
                0 => String::new(),
                n => format!(" (+{n} more)"),
            };
            println!(
                "Highlight: {} {} [{}] {}{}",
                swatch,
                render_accent(display_name(&h.rule_name)),
                h.rule_id,
                h.color_id,
                more
            );
        }
        None => println!("Highlight: {}", render_muted("none")),
    }

    if ex.rules.is_empty() {
        println!();
        println!("{}", render_muted("No rules defined."));
        return;
    }

    for (i, rule) in ex.rules.iter().enumerate() {
        println!();
        let icon = if rule.enabled {
            render_outcome(rule.matched)
        } else {
            render_muted(ICON_SKIP)
        };
        let mut suffix = String::new();
        if !rule.enabled {
            suffix.push_str(" (disabled)");
        }
        if rule.winner {
            suffix.push_str(" (winner)");
        }
        println!(
            "{}. {} {} [{}] {}{}",
            i + 1,
            icon,
            render_bold(display_name(&rule.rule_name)),
            rule.rule_id,
            rule.condition_logic,
            render_muted(&suffix)
        );
        for cond in &rule.conditions {
            let (icon, note) = match cond.verdict {
                Verdict::Matched => (render_pass(ICON_PASS), String::new()),
                Verdict::NotMatched => (render_fail(ICON_FAIL), String::new()),
                Verdict::Failed(reason) => (
                    render_fail(ICON_FAIL),
                    render_muted(&format!(" ({})", reason_text(reason))),
                ),
            };
            println!("     {} {}{}", icon, cond.description, note);
        }
    }
}

fn reason_text(reason: FailReason) -> &'static str {
    match reason {
        FailReason::UnknownColumn => "unknown column",
        FailReason::UnsupportedOperator => "operator not valid for this column",
        FailReason::MissingValue => "missing value",
        FailReason::AbsentData => "no value in this row",
    }
}
