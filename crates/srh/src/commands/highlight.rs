//! `srh highlight` -- show board rows with the rule that colors each one.

use std::fmt::Write as _;

use anyhow::{Result, bail};
use serde::Serialize;
use srh_core::board::{Column, Item};
use srh_core::rule::display_name;
use srh_engine::evaluator::display_text;
use srh_engine::{Highlight, HighlightTable};
use srh_ui::pager;
use srh_ui::styles::{render_bold, render_highlighted, render_muted, render_swatch_hex};
use srh_ui::terminal::{is_tty, terminal_width, truncate};
use tracing::debug;

use crate::cli::HighlightArgs;
use crate::context::RuntimeContext;
use crate::output::{format_table, output_json};

const NAME_WIDTH: usize = 40;
const CELL_WIDTH: usize = 24;

/// One row of `--json` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RowHighlight<'a> {
    item_id: &'a str,
    item_name: &'a str,
    highlight: Option<&'a Highlight>,
}

/// Execute the `srh highlight` command.
pub fn run(ctx: &RuntimeContext, args: &HighlightArgs) -> Result<()> {
    let board = ctx.load_board(&args.board)?;
    let (_, rules) = ctx.load_rules(&args.source)?;
    let dark_mode = ctx.dark_mode();

    let (items, page, pages) = if args.all {
        (board.items.as_slice(), 1, 1)
    } else {
        paginate(&board.items, args.page as usize, ctx.config.page_size)?
    };

    let evaluator = ctx.evaluator(&board.columns);
    let table = HighlightTable::compute_with(&evaluator, items, rules.as_slice(), dark_mode);
    debug!(
        rows = table.len(),
        highlighted = table.highlighted_count(),
        "computed highlight table"
    );

    let shown: Vec<&Item> = items
        .iter()
        .filter(|item| !args.only_highlighted || table.get(&item.id).is_some())
        .collect();

    if ctx.json {
        let rows: Vec<RowHighlight<'_>> = shown
            .iter()
            .map(|item| RowHighlight {
                item_id: &item.id,
                item_name: &item.name,
                highlight: table.get(&item.id),
            })
            .collect();
        output_json(&rows);
        return Ok(());
    }

    if shown.is_empty() {
        if !ctx.quiet {
            println!("No items to show.");
        }
        return Ok(());
    }

    let preview: Vec<&Column> = board
        .rule_columns()
        .take(ctx.config.preview_columns)
        .collect();

    let mut headers = vec!["Item"];
    headers.extend(preview.iter().map(|c| c.title.as_str()));
    headers.push("Rule");

    let rows: Vec<Vec<String>> = shown
        .iter()
        .map(|item| {
            let mut row = vec![truncate(&item.name, NAME_WIDTH)];
            row.extend(
                preview
                    .iter()
                    .map(|col| truncate(&cell_text(col, item), CELL_WIDTH)),
            );
            row.push(table.get(&item.id).map(rule_cell).unwrap_or_default());
            row
        })
        .collect();

    // Rows are prefixed by a swatch column; clip to the terminal on a TTY.
    let max_width = if is_tty() {
        terminal_width().saturating_sub(3)
    } else {
        usize::MAX
    };
    let lines: Vec<String> = format_table(&headers, &rows)
        .into_iter()
        .map(|line| truncate(&line, max_width))
        .collect();
    let mut out = String::new();
    let _ = writeln!(out, "   {}", render_bold(lines[0].trim_end()));
    let _ = writeln!(out, "   {}", render_muted(lines[1].trim_end()));
    for (item, line) in shown.iter().zip(&lines[2..]) {
        match table.get(&item.id) {
            Some(h) => {
                let swatch = h
                    .color
                    .as_deref()
                    .map(render_swatch_hex)
                    .unwrap_or_else(|| "  ".to_string());
                let _ = writeln!(
                    out,
                    "{swatch} {}",
                    render_highlighted(line, h.color.as_deref(), dark_mode)
                );
            }
            None => {
                let _ = writeln!(out, "   {}", line.trim_end());
            }
        }
    }

    if !ctx.quiet {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}",
            render_muted(&footer(page, pages, table.highlighted_count(), table.len()))
        );
        if rules.is_empty() {
            let _ = writeln!(out, "{}", render_muted("No rules defined; nothing is highlighted."));
        } else if ctx.verbose {
            for (rule_id, wins) in table.wins_by_rule() {
                let name = rules.get(rule_id).map(|r| r.display_name()).unwrap_or(rule_id);
                let _ = writeln!(out, "{}", render_muted(&format!("  {name}: {wins} row(s)")));
            }
        }
    }

    pager::page(&out);
    Ok(())
}

/// Slice out page `page` (1-based). An empty board has one empty page.
fn paginate(items: &[Item], page: usize, page_size: usize) -> Result<(&[Item], usize, usize)> {
    let page_size = page_size.max(1);
    let pages = items.len().div_ceil(page_size).max(1);
    if page == 0 || page > pages {
        bail!("page {page} is out of range (1-{pages})");
    }
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(items.len());
    Ok((&items[start..end], page, pages))
}

/// Display text of a cell, as conditions see it.
fn cell_text(column: &Column, item: &Item) -> String {
    item.value(&column.id)
        .map(|cell| display_text(column, cell))
        .unwrap_or_default()
}

fn rule_cell(h: &Highlight) -> String {
    let name = display_name(&h.rule_name);
    match h.more_count() {
        0 => name.to_string(),
        n => format!("{name} (+{n} more)"),
    }
}

fn footer(page: usize, pages: usize, highlighted: usize, rows: usize) -> String {
    format!("Page {page}/{pages} \u{b7} {highlighted} of {rows} rows highlighted")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use srh_core::board::ColumnValue;
    use srh_core::enums::ColumnType;

    fn items(n: usize) -> Vec<Item> {
        (1..=n)
            .map(|i| Item::new(i.to_string(), format!("Item {i}")))
            .collect()
    }

    #[test]
    fn paginate_splits_pages() {
        let all = items(45);
        let (page, n, pages) = paginate(&all, 3, 20).unwrap();
        assert_eq!((page.len(), n, pages), (5, 3, 3));
        assert_eq!(page[0].id, "41");
        assert!(paginate(&all, 4, 20).is_err());
    }

    #[test]
    fn empty_board_has_one_page() {
        let (page, _, pages) = paginate(&[], 1, 20).unwrap();
        assert!(page.is_empty());
        assert_eq!(pages, 1);
    }

    #[test]
    fn status_cell_falls_back_to_label() {
        let column = Column::new("s", "Status", ColumnType::Status)
            .with_settings(serde_json::json!({"labels": {"1": "Done"}}));
        let item = Item::new("1", "x")
            .with_value(ColumnValue::raw("s", serde_json::json!({"index": 1})));
        assert_eq!(cell_text(&column, &item), "Done");
        assert_eq!(cell_text(&column, &Item::new("2", "y")), "");
    }

    #[test]
    fn rule_cell_counts_extra_matches() {
        let h = Highlight {
            rule_id: "r-1".into(),
            rule_name: "Late".into(),
            color_id: "red".into(),
            color: Some("#ffccc7".into()),
            total_matches: 3,
            all_matching_rule_ids: vec!["r-1".into(), "r-2".into(), "r-3".into()],
        };
        assert_eq!(rule_cell(&h), "Late (+2 more)");
    }
}
