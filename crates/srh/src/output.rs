//! Output formatting helpers for the `srh` CLI.
//!
//! Provides JSON output, aligned tables and one-line rule descriptions.

use std::io::{self, Write};

use serde::Serialize;
use srh_core::board::Column;
use srh_core::rule::{Condition, Rule};
use srh_engine::catalog::operator_label;

/// Print a value as pretty-printed JSON to stdout.
///
/// Terminates the process with exit code 1 if serialization fails.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Lay out a table: a header line, a dashed separator, then one line per row.
///
/// Widths are measured in characters. Trailing padding is kept so callers can
/// paint whole lines.
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let join = |cells: &mut dyn Iterator<Item = (usize, String)>| -> String {
        let mut line = String::new();
        for (i, cell) in cells {
            if i > 0 {
                line.push_str("  ");
            }
            match widths.get(i) {
                Some(&w) => {
                    let pad = w.saturating_sub(cell.chars().count());
                    line.push_str(&cell);
                    line.push_str(&" ".repeat(pad));
                }
                None => line.push_str(&cell),
            }
        }
        line
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(join(&mut headers.iter().map(|h| h.to_string()).enumerate()));
    lines.push(join(&mut widths.iter().map(|w| "-".repeat(*w)).enumerate()));
    for row in rows {
        lines.push(join(&mut row.iter().cloned().enumerate()));
    }
    lines
}

/// Print a simple table with headers and rows.
///
/// Nothing is printed when there are no rows.
pub fn output_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    for line in format_table(headers, rows) {
        let _ = writeln!(handle, "{}", line.trim_end());
    }
}

// ---------------------------------------------------------------------------
// Rule descriptions
// ---------------------------------------------------------------------------

/// Describe a condition, e.g. `Status is "Done"`.
///
/// With board columns, column titles and type-specific operator labels are
/// used; otherwise the raw ids.
pub fn describe_condition(condition: &Condition, columns: Option<&[Column]>) -> String {
    let column = columns.and_then(|cols| cols.iter().find(|c| c.id == condition.column_id));
    let subject = match column {
        Some(c) if !c.title.is_empty() => c.title.clone(),
        _ => condition.column_id.clone(),
    };
    let verb = column
        .and_then(|c| operator_label(&c.column_type, &condition.operator))
        .map(str::to_owned)
        .unwrap_or_else(|| condition.operator.as_str().replace('_', " "));

    if condition.operator.is_valueless() {
        format!("{subject} {verb}")
    } else {
        format!(
            "{subject} {verb} \"{}\"",
            condition.value.as_deref().unwrap_or_default()
        )
    }
}

/// Describe all conditions of a rule joined by its logic.
pub fn describe_rule(rule: &Rule, columns: Option<&[Column]>) -> String {
    if rule.conditions.is_empty() {
        return "(no conditions)".to_string();
    }
    let joiner = format!(" {} ", rule.effective_logic());
    rule.conditions
        .iter()
        .map(|c| describe_condition(c, columns))
        .collect::<Vec<_>>()
        .join(&joiner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use srh_core::enums::{ColumnType, ConditionLogic, Operator};
    use srh_core::rule::RuleBuilder;

    #[test]
    fn table_pads_by_characters() {
        let lines = format_table(
            &["Item", "Rule"],
            &[
                vec!["Crème".into(), "Late".into()],
                vec!["Tea".into(), "".into()],
            ],
        );
        assert_eq!(lines[0], "Item   Rule");
        assert_eq!(lines[1], "-----  ----");
        assert_eq!(lines[2], "Crème  Late");
        assert_eq!(lines[3], "Tea        ");
    }

    #[test]
    fn describe_with_and_without_columns() {
        let rule = RuleBuilder::new("Late")
            .condition(Condition::new("status", Operator::NotEquals, "Done"))
            .condition(Condition::valueless("due", Operator::IsOverdue))
            .logic(ConditionLogic::Or)
            .build();

        assert_eq!(
            describe_rule(&rule, None),
            "status not equals \"Done\" OR due is overdue"
        );

        let columns = vec![
            Column::new("status", "Status", ColumnType::Status),
            Column::new("due", "Due", ColumnType::Date),
        ];
        assert_eq!(
            describe_rule(&rule, Some(&columns)),
            "Status is not \"Done\" OR Due is overdue"
        );
    }

    #[test]
    fn describe_empty_rule() {
        let rule = RuleBuilder::new("Nothing").build();
        assert_eq!(describe_rule(&rule, None), "(no conditions)");
    }
}
