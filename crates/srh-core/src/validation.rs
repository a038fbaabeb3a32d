//! Rule validation against a board's columns.
//!
//! Validation is advisory: evaluation fails closed on its own, so an invalid
//! rule simply never matches. These checks exist to tell the author why.

use std::collections::HashSet;

use crate::board::Column;
use crate::enums::Operator;
use crate::number::parse_leading_number;
use crate::palette;
use crate::payload::parse_date_time;
use crate::rule::Rule;

/// Maximum rule name length in characters.
pub const MAX_NAME_LEN: usize = 200;

/// Error type for validation failures.
///
/// Condition positions are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must be 200 characters or less (got {0})")]
    NameTooLong(usize),

    #[error("unknown color: {0}")]
    UnknownColor(String),

    #[error("rule has no conditions")]
    NoConditions,

    #[error("condition {position}: unknown column '{column_id}'")]
    UnknownColumn { position: usize, column_id: String },

    #[error("condition {position}: operator '{operator}' is not valid for {column_type} columns")]
    UnsupportedOperator {
        position: usize,
        operator: String,
        column_type: String,
    },

    #[error("condition {position}: operator '{operator}' requires a value")]
    MissingValue { position: usize, operator: String },

    #[error("condition {position}: '{value}' is not a number")]
    NonNumericValue { position: usize, value: String },

    #[error("condition {position}: '{value}' is not a date")]
    InvalidDate { position: usize, value: String },

    #[error("duplicate rule id: {0}")]
    DuplicateId(String),
}

/// Validates a rule, returning the first problem found.
pub fn validate_rule(rule: &Rule, columns: &[Column]) -> Result<(), ValidationError> {
    match rule_problems(rule, columns).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Every problem with a single rule, in check order.
pub fn rule_problems(rule: &Rule, columns: &[Column]) -> Vec<ValidationError> {
    let mut problems = Vec::new();

    let name_len = rule.name.chars().count();
    if name_len > MAX_NAME_LEN {
        problems.push(ValidationError::NameTooLong(name_len));
    }
    if palette::find_color(&rule.color_id).is_none() {
        problems.push(ValidationError::UnknownColor(rule.color_id.clone()));
    }
    if rule.conditions.is_empty() {
        problems.push(ValidationError::NoConditions);
    }

    for (i, cond) in rule.conditions.iter().enumerate() {
        let position = i + 1;
        let Some(column) = columns.iter().find(|c| c.id == cond.column_id) else {
            problems.push(ValidationError::UnknownColumn {
                position,
                column_id: cond.column_id.clone(),
            });
            continue;
        };

        if !column.family().supports(&cond.operator) {
            problems.push(ValidationError::UnsupportedOperator {
                position,
                operator: cond.operator.as_str().to_owned(),
                column_type: column.column_type.as_str().to_owned(),
            });
            continue;
        }

        if cond.operator.is_valueless() {
            continue;
        }
        let Some(value) = cond.value_str() else {
            problems.push(ValidationError::MissingValue {
                position,
                operator: cond.operator.as_str().to_owned(),
            });
            continue;
        };

        if cond.operator.is_numeric_comparison() && parse_leading_number(value).is_none() {
            problems.push(ValidationError::NonNumericValue {
                position,
                value: value.to_owned(),
            });
        }
        if matches!(cond.operator, Operator::Before | Operator::After)
            && parse_date_time(value).is_none()
        {
            problems.push(ValidationError::InvalidDate {
                position,
                value: value.to_owned(),
            });
        }
    }

    problems
}

/// Validates a whole list, reporting every problem tagged with its rule id.
pub fn validate_rules<'a, I>(rules: I, columns: &[Column]) -> Vec<(String, ValidationError)>
where
    I: IntoIterator<Item = &'a Rule>,
{
    let mut seen = HashSet::new();
    let mut report = Vec::new();
    for rule in rules {
        if !rule.id.is_empty() && !seen.insert(rule.id.as_str()) {
            report.push((rule.id.clone(), ValidationError::DuplicateId(rule.id.clone())));
        }
        for problem in rule_problems(rule, columns) {
            report.push((rule.id.clone(), problem));
        }
    }
    report
}
