//! Operator catalog: which operators a column type offers, and their labels.

use serde::Serialize;
use srh_core::enums::{ColumnType, Operator, OperatorFamily};

/// One selectable operator for a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorInfo {
    pub operator_id: Operator,
    pub label: &'static str,
}

/// The operator family for a column type.
pub fn family_for(column_type: &ColumnType) -> OperatorFamily {
    column_type.family()
}

/// Ordered operators (with labels) for a column type.
pub fn operators_for_column_type(column_type: &ColumnType) -> Vec<OperatorInfo> {
    let family = family_for(column_type);
    family
        .operators()
        .iter()
        .map(|op| OperatorInfo {
            operator_id: op.clone(),
            label: label(family, op),
        })
        .collect()
}

/// Label of `op` for a column type, or `None` if the type doesn't offer it.
pub fn operator_label(column_type: &ColumnType, op: &Operator) -> Option<&'static str> {
    let family = family_for(column_type);
    family.supports(op).then(|| label(family, op))
}

/// The first operator offered for a column type.
pub fn default_operator(column_type: &ColumnType) -> Operator {
    family_for(column_type)
        .operators()
        .first()
        .cloned()
        .unwrap_or_default()
}

fn label(family: OperatorFamily, op: &Operator) -> &'static str {
    match (family, op) {
        (OperatorFamily::Choice | OperatorFamily::Date, Operator::Equals) => "is",
        (OperatorFamily::Choice, Operator::NotEquals) => "is not",
        (_, Operator::Equals) => "equals",
        (_, Operator::NotEquals) => "does not equal",
        (_, Operator::Contains) => "contains",
        (_, Operator::NotContains) => "does not contain",
        (_, Operator::IsEmpty) => "is empty",
        (_, Operator::IsNotEmpty) => "is not empty",
        (_, Operator::GreaterThan) => "is greater than",
        (_, Operator::LessThan) => "is less than",
        (_, Operator::GreaterOrEqual) => "is greater than or equal",
        (_, Operator::LessOrEqual) => "is less than or equal",
        (_, Operator::Before) => "is before",
        (_, Operator::After) => "is after",
        (_, Operator::IsOverdue) => "is overdue",
        (_, Operator::IsToday) => "is today",
        (_, Operator::IsThisWeek) => "is this week",
        (_, Operator::IsChecked) => "is checked",
        (_, Operator::IsNotChecked) => "is not checked",
        (_, Operator::Custom(_)) => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(t: &str) -> Vec<String> {
        operators_for_column_type(&ColumnType::from(t))
            .into_iter()
            .map(|o| o.operator_id.to_string())
            .collect()
    }

    #[test]
    fn status_operators() {
        let ops = operators_for_column_type(&ColumnType::Status);
        let pairs: Vec<(&str, &str)> = ops
            .iter()
            .map(|o| (o.operator_id.as_str(), o.label))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("equals", "is"),
                ("not_equals", "is not"),
                ("is_empty", "is empty"),
                ("is_not_empty", "is not empty"),
            ]
        );
    }

    #[test]
    fn number_family_for_numbers_and_rating() {
        let expected = vec![
            "equals",
            "not_equals",
            "greater_than",
            "less_than",
            "greater_or_equal",
            "less_or_equal",
            "is_empty",
            "is_not_empty",
        ];
        assert_eq!(ids("numbers"), expected);
        assert_eq!(ids("rating"), expected);
    }

    #[test]
    fn date_and_checkbox() {
        assert_eq!(
            ids("date"),
            vec![
                "equals",
                "before",
                "after",
                "is_overdue",
                "is_today",
                "is_this_week",
                "is_empty",
                "is_not_empty",
            ]
        );
        assert_eq!(ids("checkbox"), vec!["is_checked", "is_not_checked"]);
        assert_eq!(
            operator_label(&ColumnType::Date, &Operator::Equals),
            Some("is")
        );
    }

    #[test]
    fn unknown_type_gets_text_operators() {
        assert_eq!(ids("mirror"), ids("text"));
        assert_eq!(
            operator_label(&ColumnType::from("mirror"), &Operator::NotEquals),
            Some("does not equal")
        );
    }

    #[test]
    fn label_absent_for_foreign_operator() {
        assert_eq!(operator_label(&ColumnType::Checkbox, &Operator::Equals), None);
        assert_eq!(
            operator_label(&ColumnType::Text, &Operator::from("bogus_op")),
            None
        );
    }

    #[test]
    fn default_operator_is_first() {
        assert_eq!(default_operator(&ColumnType::Checkbox), Operator::IsChecked);
        assert_eq!(default_operator(&ColumnType::Date), Operator::Equals);
    }
}
