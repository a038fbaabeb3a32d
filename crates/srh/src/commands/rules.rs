//! `srh rules` -- list and edit a stored rule list.
//!
//! Every mutating subcommand loads the list, applies one change and writes
//! the whole list back. Rule order is priority order.

use anyhow::{Context, Result, bail};
use srh_core::board::{Board, Column};
use srh_core::enums::{ConditionLogic, Operator};
use srh_core::palette;
use srh_core::rule::{Condition, Rule, RuleBuilder};
use srh_core::rule_list::Direction;
use srh_core::validation::{MAX_NAME_LEN, rule_problems};
use srh_engine::catalog::default_operator;
use srh_ui::pager;

use crate::cli::{
    LogicArg, MoveArg, RuleAddArgs, RuleEditArgs, RuleIdArgs, RuleMoveArgs, RulesArgs,
    RulesCommands, RulesListArgs,
};
use crate::context::RuntimeContext;
use crate::output::{describe_rule, format_table, output_json};

/// Execute the `srh rules` command.
pub fn run(ctx: &RuntimeContext, args: &RulesArgs) -> Result<()> {
    match &args.command {
        RulesCommands::List(list_args) => run_list(ctx, args, list_args),
        RulesCommands::Add(add_args) => run_add(ctx, args, add_args),
        RulesCommands::Edit(edit_args) => run_edit(ctx, args, edit_args),
        RulesCommands::Delete(id_args) => run_delete(ctx, args, id_args),
        RulesCommands::Toggle(id_args) => run_set_enabled(ctx, args, id_args, None),
        RulesCommands::Enable(id_args) => run_set_enabled(ctx, args, id_args, Some(true)),
        RulesCommands::Disable(id_args) => run_set_enabled(ctx, args, id_args, Some(false)),
        RulesCommands::Move(move_args) => run_move(ctx, args, move_args),
    }
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

fn run_list(ctx: &RuntimeContext, args: &RulesArgs, list_args: &RulesListArgs) -> Result<()> {
    let (path, list) = ctx.load_rules(&args.source)?;

    if ctx.json {
        output_json(&list);
        return Ok(());
    }

    if list.is_empty() {
        if !ctx.quiet {
            println!("No rules in {}", path.display());
        }
        return Ok(());
    }

    let board = ctx.load_board_if_available(&list_args.board)?;
    let columns = board.as_ref().map(|b| b.columns.as_slice());

    let rows: Vec<Vec<String>> = list
        .iter()
        .enumerate()
        .map(|(i, rule)| {
            vec![
                (i + 1).to_string(),
                rule.id.clone(),
                if rule.enabled { "on" } else { "off" }.to_string(),
                rule.color_id.clone(),
                rule.display_name().to_string(),
                describe_rule(rule, columns),
            ]
        })
        .collect();

    let mut out = String::new();
    for line in format_table(&["#", "ID", "State", "Color", "Name", "Conditions"], &rows) {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    pager::page(&out);
    Ok(())
}

// ---------------------------------------------------------------------------
// add / edit
// ---------------------------------------------------------------------------

fn run_add(ctx: &RuntimeContext, args: &RulesArgs, add: &RuleAddArgs) -> Result<()> {
    let (path, mut list) = ctx.load_rules(&args.source)?;
    let board = ctx.load_board_if_available(&add.board)?;
    let columns = board.as_ref().map(|b| b.columns.as_slice());

    let mut builder = RuleBuilder::new(add.name.trim())
        .color(add.color.trim())
        .enabled(!add.disabled)
        .logic(logic(add.logic));
    for text in &add.conditions {
        builder = builder.condition(parse_condition(text, columns)?);
    }
    let rule = builder.build();
    check_rule(&rule, board.as_ref())?;

    let id = list.add(rule)?;
    ctx.save_rules(&path, &list)?;

    if ctx.json {
        output_json(&list.get(&id));
    } else if !ctx.quiet {
        println!("Added rule {id} to {}", path.display());
    }
    Ok(())
}

fn run_edit(ctx: &RuntimeContext, args: &RulesArgs, edit: &RuleEditArgs) -> Result<()> {
    let (path, mut list) = ctx.load_rules(&args.source)?;
    let mut rule = list
        .get(&edit.id)
        .cloned()
        .with_context(|| format!("rule not found: {}", edit.id))?;
    let board = ctx.load_board_if_available(&edit.board)?;
    let columns = board.as_ref().map(|b| b.columns.as_slice());

    if let Some(name) = &edit.name {
        rule.name = name.trim().to_string();
    }
    if let Some(color) = &edit.color {
        rule.color_id = color.trim().to_string();
    }
    if let Some(l) = edit.logic {
        rule.condition_logic = logic(l);
    }
    if !edit.conditions.is_empty() {
        rule.conditions = edit
            .conditions
            .iter()
            .map(|text| parse_condition(text, columns))
            .collect::<Result<_>>()?;
    }
    check_rule(&rule, board.as_ref())?;

    list.replace(rule)?;
    ctx.save_rules(&path, &list)?;

    if ctx.json {
        output_json(&list.get(&edit.id));
    } else if !ctx.quiet {
        println!("Updated rule {}", edit.id);
    }
    Ok(())
}

fn logic(arg: LogicArg) -> ConditionLogic {
    match arg {
        LogicArg::And => ConditionLogic::And,
        LogicArg::Or => ConditionLogic::Or,
    }
}

/// Parse `COLUMN:OPERATOR[:VALUE]`. The value may itself contain colons.
///
/// An empty operator (`COLUMN::VALUE`) takes the column's default operator,
/// which needs the board's columns.
fn parse_condition(text: &str, columns: Option<&[Column]>) -> Result<Condition> {
    let mut parts = text.splitn(3, ':');
    let column = parts.next().map(str::trim).filter(|s| !s.is_empty());
    let operator = parts.next().map(str::trim);
    let (Some(column), Some(operator)) = (column, operator) else {
        bail!("invalid condition '{text}' (expected COLUMN:OPERATOR[:VALUE])");
    };

    let operator = if operator.is_empty() {
        column_default_operator(text, column, columns)?
    } else {
        Operator::from(operator)
    };
    if !operator.is_builtin() {
        bail!(
            "unknown operator '{operator}' in condition '{text}'\nHint: run 'srh operators <column-type>'"
        );
    }

    Ok(match parts.next() {
        Some(value) if !value.is_empty() => Condition::new(column, operator, value),
        _ => Condition::valueless(column, operator),
    })
}

fn column_default_operator(
    text: &str,
    column_id: &str,
    columns: Option<&[Column]>,
) -> Result<Operator> {
    let Some(columns) = columns else {
        bail!(
            "condition '{text}' has no operator\nHint: pass --board to use the column's default operator"
        );
    };
    let Some(column) = columns.iter().find(|c| c.id == column_id) else {
        bail!("unknown column '{column_id}' in condition '{text}'");
    };
    Ok(default_operator(&column.column_type))
}

/// Reject a rule that can never be authored: unknown color or overlong name
/// always; anything else only when board columns are available.
fn check_rule(rule: &Rule, board: Option<&Board>) -> Result<()> {
    let problems: Vec<String> = match board {
        Some(board) => rule_problems(rule, &board.columns)
            .iter()
            .map(ToString::to_string)
            .collect(),
        None => {
            let mut problems = Vec::new();
            if rule.name.chars().count() > MAX_NAME_LEN {
                problems.push(format!(
                    "name must be {MAX_NAME_LEN} characters or less (got {})",
                    rule.name.chars().count()
                ));
            }
            if palette::find_color(&rule.color_id).is_none() {
                problems.push(format!("unknown color: {}", rule.color_id));
            }
            problems
        }
    };

    if !problems.is_empty() {
        bail!("invalid rule:\n  {}", problems.join("\n  "));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// delete / toggle / enable / disable / move
// ---------------------------------------------------------------------------

fn run_delete(ctx: &RuntimeContext, args: &RulesArgs, id_args: &RuleIdArgs) -> Result<()> {
    let (path, mut list) = ctx.load_rules(&args.source)?;
    let removed = list.remove(&id_args.id)?;
    ctx.save_rules(&path, &list)?;

    if ctx.json {
        output_json(&removed);
    } else if !ctx.quiet {
        println!("Deleted rule {} ({})", removed.id, removed.display_name());
    }
    Ok(())
}

/// `enabled: None` flips the current state.
fn run_set_enabled(
    ctx: &RuntimeContext,
    args: &RulesArgs,
    id_args: &RuleIdArgs,
    enabled: Option<bool>,
) -> Result<()> {
    let (path, mut list) = ctx.load_rules(&args.source)?;
    let enabled = match enabled {
        Some(state) => {
            list.set_enabled(&id_args.id, state)?;
            state
        }
        None => list.toggle(&id_args.id)?,
    };
    ctx.save_rules(&path, &list)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "id": id_args.id,
            "enabled": enabled,
        }));
    } else if !ctx.quiet {
        let state = if enabled { "enabled" } else { "disabled" };
        println!("Rule {} {state}", id_args.id);
    }
    Ok(())
}

fn run_move(ctx: &RuntimeContext, args: &RulesArgs, move_args: &RuleMoveArgs) -> Result<()> {
    let (path, mut list) = ctx.load_rules(&args.source)?;
    let direction = match move_args.direction {
        MoveArg::Up => Direction::Up,
        MoveArg::Down => Direction::Down,
    };
    let moved = list.move_rule(&move_args.id, direction)?;
    if moved {
        ctx.save_rules(&path, &list)?;
    }
    let position = list
        .iter()
        .position(|r| r.id == move_args.id)
        .map_or(0, |i| i + 1);

    if ctx.json {
        output_json(&serde_json::json!({
            "id": move_args.id,
            "moved": moved,
            "position": position,
        }));
    } else if !ctx.quiet {
        if moved {
            println!("Moved rule {} to position {position}", move_args.id);
        } else {
            let end = match direction {
                Direction::Up => "top",
                Direction::Down => "bottom",
            };
            println!("Rule {} is already at the {end}", move_args.id);
        }
    }
    Ok(())
}
