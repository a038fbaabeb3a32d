//! Rule matching: which enabled rules a row satisfies, in list order.

use srh_core::board::{Column, Item};
use srh_core::enums::ConditionLogic;
use srh_core::rule::Rule;
use tracing::trace;

use crate::evaluator::Evaluator;

impl Evaluator<'_> {
    /// Returns `true` if the rule's conditions hold for `item`.
    ///
    /// The enabled flag is not consulted. An empty condition list is true
    /// under AND and false under OR.
    pub fn rule_matches(&self, rule: &Rule, item: &Item) -> bool {
        match rule.effective_logic() {
            ConditionLogic::And => rule.conditions.iter().all(|c| self.evaluate(c, item)),
            ConditionLogic::Or => rule.conditions.iter().any(|c| self.evaluate(c, item)),
        }
    }

    /// Enabled rules matching `item`, preserving list order.
    pub fn matching_rules<'r, I>(&self, item: &Item, rules: I) -> Vec<&'r Rule>
    where
        I: IntoIterator<Item = &'r Rule>,
    {
        let matches: Vec<&Rule> = rules
            .into_iter()
            .filter(|r| r.enabled && self.rule_matches(r, item))
            .collect();
        trace!(item = %item.id, matches = matches.len(), "rules matched");
        matches
    }
}

/// Checks a single rule against `item` using the local clock.
pub fn rule_matches(rule: &Rule, item: &Item, columns: &[Column]) -> bool {
    Evaluator::new(columns).rule_matches(rule, item)
}

/// Enabled rules matching `item` using the local clock.
pub fn matching_rules<'r, I>(item: &Item, rules: I, columns: &[Column]) -> Vec<&'r Rule>
where
    I: IntoIterator<Item = &'r Rule>,
{
    Evaluator::new(columns).matching_rules(item, rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use srh_core::board::ColumnValue;
    use srh_core::enums::{ColumnType, Operator};
    use srh_core::rule::{Condition, RuleBuilder};

    fn columns() -> Vec<Column> {
        vec![
            Column::new("status", "Status", ColumnType::Status),
            Column::new("prio", "Priority", ColumnType::Priority),
        ]
    }

    fn item() -> Item {
        Item::new("1", "Task")
            .with_value(ColumnValue::text("status", "Done"))
            .with_value(ColumnValue::text("prio", "Low"))
    }

    fn two_conditions(logic: ConditionLogic) -> Rule {
        RuleBuilder::new("Two")
            .id("r")
            .logic(logic)
            .condition(Condition::new("status", Operator::Equals, "Done"))
            .condition(Condition::new("prio", Operator::Equals, "High"))
            .build()
    }

    fn with_prio(prio: &str) -> Item {
        Item::new("2", "Other")
            .with_value(ColumnValue::text("status", "Done"))
            .with_value(ColumnValue::text("prio", prio))
    }

    #[test]
    fn and_requires_every_condition() {
        let rule = two_conditions(ConditionLogic::And);
        assert!(!rule_matches(&rule, &item(), &columns()));
        assert!(rule_matches(&rule, &with_prio("High"), &columns()));
    }

    #[test]
    fn or_requires_any_condition() {
        let rule = two_conditions(ConditionLogic::Or);
        assert!(rule_matches(&rule, &item(), &columns()));

        let neither = Item::new("3", "Neither")
            .with_value(ColumnValue::text("status", "Stuck"))
            .with_value(ColumnValue::text("prio", "Low"));
        assert!(!rule_matches(&rule, &neither, &columns()));
    }

    #[test]
    fn empty_conditions() {
        let mut rule = two_conditions(ConditionLogic::And);
        rule.conditions.clear();
        assert!(rule_matches(&rule, &item(), &columns()));

        rule.condition_logic = ConditionLogic::Or;
        assert!(!rule_matches(&rule, &item(), &columns()));
    }

    #[test]
    fn single_condition_treats_or_as_and() {
        let rule = RuleBuilder::new("One")
            .logic(ConditionLogic::Or)
            .condition(Condition::new("status", Operator::Equals, "Done"))
            .build();
        assert!(rule_matches(&rule, &item(), &columns()));
    }

    #[test]
    fn disabled_rules_never_match() {
        let mut rule = RuleBuilder::new("Always")
            .id("a")
            .condition(Condition::valueless("status", Operator::IsNotEmpty))
            .build();
        assert_eq!(matching_rules(&item(), [&rule], &columns()).len(), 1);

        rule.enabled = false;
        assert!(matching_rules(&item(), [&rule], &columns()).is_empty());
        // rule_matches ignores the flag.
        assert!(rule_matches(&rule, &item(), &columns()));
    }

    #[test]
    fn preserves_list_order() {
        let rules: Vec<Rule> = ["c", "a", "b"]
            .iter()
            .map(|id| {
                RuleBuilder::new(*id)
                    .id(*id)
                    .condition(Condition::new("status", Operator::Equals, "done"))
                    .build()
            })
            .collect();
        let ids: Vec<&str> = matching_rules(&item(), &rules, &columns())
            .into_iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }
}
