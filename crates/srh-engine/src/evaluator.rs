//! Condition evaluator.
//!
//! Evaluates one condition against one row. Evaluation fails closed: a
//! misconfigured condition or missing data yields `false`, never an error.

use chrono::{Datelike, Days, Local, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, trace};

use srh_core::board::{Column, ColumnValue, Item};
use srh_core::enums::{Operator, OperatorFamily};
use srh_core::number::parse_leading_number;
use srh_core::payload::{self, CheckboxPayload, DatePayload, parse_date_time};
use srh_core::rule::Condition;

/// Why a condition was not evaluated against the row's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailReason {
    /// The condition targets a column the board doesn't have.
    UnknownColumn,
    /// The operator isn't offered for the column's type.
    UnsupportedOperator,
    /// The operator needs a value and none was given.
    MissingValue,
    /// The row has no value for the column.
    AbsentData,
}

/// Outcome of evaluating one condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", content = "reason", rename_all = "snake_case")]
pub enum Verdict {
    Matched,
    NotMatched,
    Failed(FailReason),
}

impl Verdict {
    pub fn is_match(self) -> bool {
        self == Verdict::Matched
    }
}

/// Evaluates conditions against rows of one board at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    columns: &'a [Column],
    now: NaiveDateTime,
}

impl<'a> Evaluator<'a> {
    /// An evaluator using the local clock.
    pub fn new(columns: &'a [Column]) -> Self {
        Self::at(columns, Local::now().naive_local())
    }

    /// An evaluator with a fixed local "now".
    pub fn at(columns: &'a [Column], now: NaiveDateTime) -> Self {
        Self { columns, now }
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    /// Returns `true` if `item` satisfies `condition`.
    pub fn evaluate(&self, condition: &Condition, item: &Item) -> bool {
        self.check(condition, item).is_match()
    }

    /// Evaluates `condition`, reporting why it failed closed if it did.
    pub fn check(&self, condition: &Condition, item: &Item) -> Verdict {
        let Some(column) = self.columns.iter().find(|c| c.id == condition.column_id) else {
            debug!(column = %condition.column_id, "condition targets unknown column");
            return Verdict::Failed(FailReason::UnknownColumn);
        };

        let family = column.family();
        if !family.supports(&condition.operator) {
            debug!(
                column = %column.id,
                operator = %condition.operator,
                %family,
                "operator not valid for column type"
            );
            return Verdict::Failed(FailReason::UnsupportedOperator);
        }

        let value = condition.value_str();
        if condition.operator.requires_value() && value.is_none() {
            debug!(operator = %condition.operator, "operator requires a value");
            return Verdict::Failed(FailReason::MissingValue);
        }

        let Some(cell) = item.value(&condition.column_id) else {
            // Absent data satisfies only is_empty.
            return if condition.operator == Operator::IsEmpty {
                Verdict::Matched
            } else {
                trace!(item = %item.id, column = %column.id, "no column value");
                Verdict::Failed(FailReason::AbsentData)
            };
        };

        let matched = self.apply(&condition.operator, value.unwrap_or(""), column, cell);
        trace!(
            item = %item.id,
            column = %column.id,
            operator = %condition.operator,
            matched,
            "condition evaluated"
        );
        if matched {
            Verdict::Matched
        } else {
            Verdict::NotMatched
        }
    }

    fn apply(&self, op: &Operator, value: &str, column: &Column, cell: &ColumnValue) -> bool {
        let text = display_text(column, cell);
        match op {
            Operator::Equals => text.to_lowercase() == value.to_lowercase(),
            Operator::NotEquals => text.to_lowercase() != value.to_lowercase(),
            Operator::Contains => text.to_lowercase().contains(&value.to_lowercase()),
            Operator::NotContains => !text.to_lowercase().contains(&value.to_lowercase()),
            Operator::IsEmpty => text.trim().is_empty(),
            Operator::IsNotEmpty => !text.trim().is_empty(),

            Operator::GreaterThan => compare_numbers(&text, value, |a, b| a > b),
            Operator::LessThan => compare_numbers(&text, value, |a, b| a < b),
            Operator::GreaterOrEqual => compare_numbers(&text, value, |a, b| a >= b),
            Operator::LessOrEqual => compare_numbers(&text, value, |a, b| a <= b),

            Operator::IsChecked => is_checked(cell),
            Operator::IsNotChecked => !is_checked(cell),

            Operator::IsOverdue => cell_date(cell).is_some_and(|d| d < self.today()),
            Operator::IsToday => cell_date(cell).is_some_and(|d| d == self.today()),
            Operator::IsThisWeek => cell_date(cell).is_some_and(|d| self.in_this_week(d)),
            Operator::Before => compare_dates(cell, value, |a, b| a < b),
            Operator::After => compare_dates(cell, value, |a, b| a > b),

            Operator::Custom(name) => {
                debug!(operator = %name, "unknown operator");
                false
            }
        }
    }

    /// Sunday through Saturday of the current week, inclusive.
    fn in_this_week(&self, date: NaiveDate) -> bool {
        let today = self.today();
        let offset = u64::from(today.weekday().num_days_from_sunday());
        let Some(start) = today.checked_sub_days(Days::new(offset)) else {
            return false;
        };
        let Some(end) = start.checked_add_days(Days::new(6)) else {
            return false;
        };
        start <= date && date <= end
    }
}

/// Evaluates `condition` against `item` using the local clock.
pub fn evaluate(condition: &Condition, item: &Item, columns: &[Column]) -> bool {
    Evaluator::new(columns).evaluate(condition, item)
}

/// The text a condition compares against.
///
/// Choice columns without display text fall back to the label of the
/// payload's status index.
pub fn display_text(column: &Column, cell: &ColumnValue) -> String {
    match cell.text.as_deref() {
        Some(t) if !t.is_empty() => t.to_owned(),
        _ if column.family() == OperatorFamily::Choice => cell
            .status_index()
            .and_then(|i| column.label_for_index(i))
            .unwrap_or_default(),
        _ => String::new(),
    }
}

fn compare_numbers(text: &str, value: &str, cmp: impl Fn(f64, f64) -> bool) -> bool {
    match (parse_leading_number(text), parse_leading_number(value)) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}

fn is_checked(cell: &ColumnValue) -> bool {
    payload::decode::<CheckboxPayload>(cell.raw_value.as_ref()).is_some_and(|p| p.is_checked())
}

fn cell_date_time(cell: &ColumnValue) -> Option<NaiveDateTime> {
    payload::decode::<DatePayload>(cell.raw_value.as_ref())?.date_time()
}

fn cell_date(cell: &ColumnValue) -> Option<NaiveDate> {
    cell_date_time(cell).map(|dt| dt.date())
}

fn compare_dates(
    cell: &ColumnValue,
    value: &str,
    cmp: impl Fn(NaiveDateTime, NaiveDateTime) -> bool,
) -> bool {
    match (cell_date_time(cell), parse_date_time(value)) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use srh_core::enums::ColumnType;

    // Sunday 2026-10-18, 09:30 local.
    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap()
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name", ColumnType::Name),
            Column::new("notes", "Notes", ColumnType::Text),
            Column::new("status", "Status", ColumnType::Status)
                .with_settings(json!({"labels": {"0": "Working on it", "1": "Done"}})),
            Column::new("est", "Estimate", ColumnType::Numbers),
            Column::new("stars", "Stars", ColumnType::Rating),
            Column::new("due", "Due", ColumnType::Date),
            Column::new("check", "Check", ColumnType::Checkbox),
        ]
    }

    fn eval(cond: Condition, item: &Item) -> bool {
        let cols = columns();
        Evaluator::at(&cols, now()).evaluate(&cond, item)
    }

    fn due(date: &str) -> Item {
        Item::new("1", "Task").with_value(ColumnValue::raw("due", json!({ "date": date })))
    }

    #[test]
    fn equals_is_case_insensitive() {
        let item = Item::new("1", "Task").with_value(ColumnValue::text("status", "done"));
        assert!(eval(Condition::new("status", Operator::Equals, "Done"), &item));
        assert!(!eval(Condition::new("status", Operator::NotEquals, "DONE"), &item));
    }

    #[test]
    fn contains_and_not_contains() {
        let item = Item::new("1", "Task").with_value(ColumnValue::text("notes", "Blocked by QA"));
        assert!(eval(Condition::new("notes", Operator::Contains, "qa"), &item));
        assert!(eval(Condition::new("notes", Operator::NotContains, "design"), &item));
        assert!(!eval(Condition::new("notes", Operator::NotContains, "blocked"), &item));
    }

    #[test]
    fn absent_value_satisfies_only_is_empty() {
        let item = Item::new("1", "Task");
        assert!(eval(Condition::valueless("notes", Operator::IsEmpty), &item));
        assert!(!eval(Condition::valueless("notes", Operator::IsNotEmpty), &item));
        assert!(!eval(Condition::new("notes", Operator::Equals, "x"), &item));
        assert!(!eval(Condition::new("notes", Operator::NotEquals, "x"), &item));
        assert!(!eval(Condition::valueless("check", Operator::IsNotChecked), &item));
    }

    #[test]
    fn whitespace_text_is_empty() {
        let item = Item::new("1", "Task").with_value(ColumnValue::text("notes", "   "));
        assert!(eval(Condition::valueless("notes", Operator::IsEmpty), &item));

        let item = Item::new("1", "Task").with_value(ColumnValue::raw("notes", json!(null)));
        assert!(eval(Condition::valueless("notes", Operator::IsEmpty), &item));
    }

    #[test]
    fn numeric_comparisons() {
        let item = Item::new("1", "Task")
            .with_value(ColumnValue::text("est", " 5 "))
            .with_value(ColumnValue::text("stars", "3"));
        assert!(eval(Condition::new("est", Operator::GreaterThan, "4.5"), &item));
        assert!(!eval(Condition::new("est", Operator::LessThan, "5"), &item));
        assert!(eval(Condition::new("est", Operator::GreaterOrEqual, "5"), &item));
        assert!(eval(Condition::new("est", Operator::LessOrEqual, "5.0"), &item));
        assert!(eval(Condition::new("stars", Operator::LessThan, "4"), &item));
    }

    #[test]
    fn numbers_read_from_leading_literal() {
        let item = Item::new("1", "Task").with_value(ColumnValue::text("est", "5 hours"));
        assert!(eval(Condition::new("est", Operator::GreaterThan, "1"), &item));
        assert!(!eval(Condition::new("est", Operator::LessThan, "1"), &item));

        let item = Item::new("1", "Task").with_value(ColumnValue::text("est", "5"));
        assert!(eval(Condition::new("est", Operator::LessThan, "Infinity"), &item));
    }

    #[test]
    fn numeric_parse_failure_is_false() {
        let item = Item::new("1", "Task").with_value(ColumnValue::text("est", "about 5"));
        assert!(!eval(Condition::new("est", Operator::GreaterThan, "1"), &item));
        assert!(!eval(Condition::new("est", Operator::LessThan, "1"), &item));

        let item = Item::new("1", "Task").with_value(ColumnValue::text("est", "5"));
        assert!(!eval(Condition::new("est", Operator::GreaterThan, "abc"), &item));
        assert!(!eval(Condition::new("est", Operator::GreaterThan, "NaN"), &item));
        assert!(!eval(Condition::new("est", Operator::LessThan, "inf"), &item));
        assert!(!eval(Condition::new("est", Operator::LessThan, "+inf"), &item));
    }

    #[test]
    fn checkbox_payloads() {
        let checked = Item::new("1", "Task")
            .with_value(ColumnValue::raw("check", json!("{\"checked\":true}")));
        assert!(eval(Condition::valueless("check", Operator::IsChecked), &checked));
        assert!(!eval(Condition::valueless("check", Operator::IsNotChecked), &checked));

        let string_true = Item::new("1", "Task")
            .with_value(ColumnValue::raw("check", json!("{\"checked\":\"true\"}")));
        assert!(!eval(Condition::valueless("check", Operator::IsChecked), &string_true));
        assert!(eval(Condition::valueless("check", Operator::IsNotChecked), &string_true));

        let bool_checked =
            Item::new("1", "Task").with_value(ColumnValue::raw("check", json!({"checked": true})));
        assert!(eval(Condition::valueless("check", Operator::IsChecked), &bool_checked));

        let garbage = Item::new("1", "Task").with_value(ColumnValue::raw("check", json!("{oops")));
        assert!(!eval(Condition::valueless("check", Operator::IsChecked), &garbage));
        assert!(eval(Condition::valueless("check", Operator::IsNotChecked), &garbage));

        let no_payload = Item::new("1", "Task").with_value(ColumnValue::text("check", ""));
        assert!(eval(Condition::valueless("check", Operator::IsNotChecked), &no_payload));
    }

    #[test]
    fn overdue_boundaries() {
        let cond = || Condition::valueless("due", Operator::IsOverdue);
        assert!(eval(cond(), &due("2026-10-17")));
        assert!(!eval(cond(), &due("2026-10-18")));
        assert!(!eval(cond(), &due("2026-10-19")));
    }

    #[test]
    fn today() {
        let cond = || Condition::valueless("due", Operator::IsToday);
        assert!(eval(cond(), &due("2026-10-18")));
        assert!(!eval(cond(), &due("2026-10-17")));
    }

    #[test]
    fn this_week_runs_sunday_to_saturday() {
        let cond = || Condition::valueless("due", Operator::IsThisWeek);
        assert!(eval(cond(), &due("2026-10-18")));
        assert!(eval(cond(), &due("2026-10-24")));
        assert!(!eval(cond(), &due("2026-10-17")));
        assert!(!eval(cond(), &due("2026-10-25")));

        // From mid-week, the week still starts on the previous Sunday.
        let cols = columns();
        let wednesday = NaiveDate::from_ymd_opt(2026, 10, 21)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap();
        let ev = Evaluator::at(&cols, wednesday);
        assert!(ev.evaluate(&cond(), &due("2026-10-18")));
        assert!(!ev.evaluate(&cond(), &due("2026-10-17")));
    }

    #[test]
    fn before_and_after() {
        let item = due("2026-10-10");
        assert!(eval(Condition::new("due", Operator::Before, "2026-10-11"), &item));
        assert!(!eval(Condition::new("due", Operator::Before, "2026-10-10"), &item));
        assert!(eval(Condition::new("due", Operator::After, "2026-10-09"), &item));
        assert!(!eval(Condition::new("due", Operator::After, "not a date"), &item));
    }

    #[test]
    fn date_time_refines_comparison() {
        let item = Item::new("1", "Task").with_value(ColumnValue::raw(
            "due",
            json!("{\"date\":\"2026-10-10\",\"time\":\"15:00:00\"}"),
        ));
        assert!(eval(Condition::new("due", Operator::After, "2026-10-10 12:00"), &item));
        assert!(eval(Condition::new("due", Operator::Before, "2026-10-10T16:00:00"), &item));
    }

    #[test]
    fn unparseable_date_payload_fails_every_date_operator() {
        let item = Item::new("1", "Task").with_value(ColumnValue::raw("due", json!("{bad")));
        for op in [Operator::IsOverdue, Operator::IsToday, Operator::IsThisWeek] {
            assert!(!eval(Condition::valueless("due", op), &item));
        }
        assert!(!eval(Condition::new("due", Operator::Before, "2030-01-01"), &item));
    }

    #[test]
    fn status_label_fallback() {
        let item = Item::new("1", "Task")
            .with_value(ColumnValue::raw("status", json!("{\"index\":1}")));
        assert!(eval(Condition::new("status", Operator::Equals, "done"), &item));
    }

    #[test]
    fn fail_closed_reasons() {
        let cols = columns();
        let ev = Evaluator::at(&cols, now());
        let item = Item::new("1", "Task").with_value(ColumnValue::text("status", "Done"));

        assert_eq!(
            ev.check(&Condition::new("ghost", Operator::Equals, "x"), &item),
            Verdict::Failed(FailReason::UnknownColumn)
        );
        assert_eq!(
            ev.check(&Condition::new("status", Operator::Contains, "Do"), &item),
            Verdict::Failed(FailReason::UnsupportedOperator)
        );
        assert_eq!(
            ev.check(&Condition::new("status", Operator::from("bogus_op"), "x"), &item),
            Verdict::Failed(FailReason::UnsupportedOperator)
        );
        assert_eq!(
            ev.check(&Condition::new("status", Operator::Equals, ""), &item),
            Verdict::Failed(FailReason::MissingValue)
        );
        assert_eq!(
            ev.check(&Condition::new("notes", Operator::Equals, "x"), &item),
            Verdict::Failed(FailReason::AbsentData)
        );
        assert_eq!(
            ev.check(&Condition::new("status", Operator::Equals, "Done"), &item),
            Verdict::Matched
        );
    }
}
