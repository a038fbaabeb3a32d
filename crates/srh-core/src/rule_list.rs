//! Ordered rule list and its editing operations.
//!
//! Order is priority: the first matching rule wins a row. Every edit keeps
//! ids unique within the list.

use std::collections::HashSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::idgen;
use crate::rule::Rule;

/// Error type for rule list edits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleListError {
    #[error("rule not found: {0}")]
    NotFound(String),

    #[error("rule id already in use: {0}")]
    DuplicateId(String),
}

/// Direction for [`RuleList::move_rule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// An ordered list of rules, serialized as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleList {
    rules: Vec<Rule>,
}

impl RuleList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn as_slice(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    fn position(&self, id: &str) -> Result<usize, RuleListError> {
        self.rules
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| RuleListError::NotFound(id.to_owned()))
    }

    /// Generates an id not used by any rule in the list.
    pub fn fresh_id(&self, name: &str) -> String {
        let existing: HashSet<&str> = self.rules.iter().map(|r| r.id.as_str()).collect();
        idgen::unique_rule_id(&existing, name, Utc::now())
    }

    /// Appends a rule, generating an id when it has none. Returns the id.
    pub fn add(&mut self, mut rule: Rule) -> Result<String, RuleListError> {
        if rule.id.is_empty() {
            rule.id = self.fresh_id(&rule.name);
        } else if self.get(&rule.id).is_some() {
            return Err(RuleListError::DuplicateId(rule.id));
        }
        let id = rule.id.clone();
        self.rules.push(rule);
        Ok(id)
    }

    /// Replaces the rule with the same id, keeping its position.
    pub fn replace(&mut self, rule: Rule) -> Result<(), RuleListError> {
        let idx = self.position(&rule.id)?;
        self.rules[idx] = rule;
        Ok(())
    }

    /// Removes and returns the rule with `id`.
    pub fn remove(&mut self, id: &str) -> Result<Rule, RuleListError> {
        let idx = self.position(id)?;
        Ok(self.rules.remove(idx))
    }

    /// Flips `enabled` and returns the new state.
    pub fn toggle(&mut self, id: &str) -> Result<bool, RuleListError> {
        let idx = self.position(id)?;
        let rule = &mut self.rules[idx];
        rule.enabled = !rule.enabled;
        Ok(rule.enabled)
    }

    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> Result<(), RuleListError> {
        let idx = self.position(id)?;
        self.rules[idx].enabled = enabled;
        Ok(())
    }

    /// Swaps the rule with its neighbour. Returns `false` at either end.
    pub fn move_rule(&mut self, id: &str, direction: Direction) -> Result<bool, RuleListError> {
        let idx = self.position(id)?;
        let target = match direction {
            Direction::Up if idx > 0 => idx - 1,
            Direction::Down if idx + 1 < self.rules.len() => idx + 1,
            _ => return Ok(false),
        };
        self.rules.swap(idx, target);
        Ok(true)
    }

    /// Drops every rule.
    pub fn clear(&mut self) {
        self.rules.clear();
    }
}

impl From<Vec<Rule>> for RuleList {
    fn from(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}

impl<'a> IntoIterator for &'a RuleList {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::Operator;
    use crate::rule::{Condition, RuleBuilder};
    use pretty_assertions::assert_eq;

    fn rule(id: &str) -> Rule {
        RuleBuilder::new(format!("Rule {id}"))
            .id(id)
            .condition(Condition::valueless("c1", Operator::IsNotEmpty))
            .build()
    }

    fn list(ids: &[&str]) -> RuleList {
        ids.iter().map(|id| rule(id)).collect::<Vec<_>>().into()
    }

    fn ids(list: &RuleList) -> Vec<&str> {
        list.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn add_generates_id_and_rejects_duplicates() {
        let mut l = list(&["a"]);
        let id = l.add(RuleBuilder::new("New").build()).unwrap();
        assert!(id.starts_with("r-"));
        assert_eq!(l.len(), 2);
        assert_eq!(l.add(rule("a")), Err(RuleListError::DuplicateId("a".into())));
    }

    #[test]
    fn move_swaps_neighbours() {
        let mut l = list(&["a", "b", "c"]);
        assert_eq!(l.move_rule("c", Direction::Up), Ok(true));
        assert_eq!(ids(&l), vec!["a", "c", "b"]);
        assert_eq!(l.move_rule("a", Direction::Down), Ok(true));
        assert_eq!(ids(&l), vec!["c", "a", "b"]);
    }

    #[test]
    fn move_past_ends_is_noop() {
        let mut l = list(&["a", "b"]);
        assert_eq!(l.move_rule("a", Direction::Up), Ok(false));
        assert_eq!(l.move_rule("b", Direction::Down), Ok(false));
        assert_eq!(ids(&l), vec!["a", "b"]);
    }

    #[test]
    fn toggle_and_set_enabled() {
        let mut l = list(&["a"]);
        assert_eq!(l.toggle("a"), Ok(false));
        assert!(!l.get("a").unwrap().enabled);
        assert_eq!(l.toggle("a"), Ok(true));
        l.set_enabled("a", false).unwrap();
        assert!(!l.get("a").unwrap().enabled);
    }

    #[test]
    fn replace_keeps_position() {
        let mut l = list(&["a", "b", "c"]);
        let mut edited = rule("b");
        edited.name = "Edited".into();
        edited.color_id = "blue".into();
        l.replace(edited).unwrap();
        assert_eq!(ids(&l), vec!["a", "b", "c"]);
        assert_eq!(l.get("b").unwrap().name, "Edited");
    }

    #[test]
    fn remove_and_unknown_ids() {
        let mut l = list(&["a", "b"]);
        assert_eq!(l.remove("a").unwrap().id, "a");
        assert_eq!(ids(&l), vec!["b"]);
        assert_eq!(l.remove("zzz"), Err(RuleListError::NotFound("zzz".into())));
        assert_eq!(l.toggle("zzz"), Err(RuleListError::NotFound("zzz".into())));
        assert_eq!(
            l.move_rule("zzz", Direction::Up),
            Err(RuleListError::NotFound("zzz".into()))
        );
        assert!(l.replace(rule("zzz")).is_err());
    }

    #[test]
    fn serializes_as_array() {
        let l = list(&["a"]);
        let v = serde_json::to_value(&l).unwrap();
        assert!(v.is_array());
        let back: RuleList = serde_json::from_value(v).unwrap();
        assert_eq!(back, l);
    }
}
